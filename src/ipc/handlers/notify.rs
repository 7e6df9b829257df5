use crate::ipc::helpers::{required_str, respond, store_ref, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::notify;
use crate::repo::students;
use serde_json::json;

fn send(
    state: &AppState,
    params: &serde_json::Value,
    sms: bool,
) -> Result<serde_json::Value, HandlerErr> {
    let student_id = required_str(params, "studentId")?;
    let store = store_ref(state)?;
    let student =
        students::find_by_id(store, &student_id).ok_or_else(|| HandlerErr::not_found("student"))?;
    let sent = if sms {
        if student.parent_phone.trim().is_empty() {
            return Err(HandlerErr::bad_params("student has no parent phone"));
        }
        notify::send_sms(&student.parent_phone, &student.name)
    } else {
        notify::send_email(&student.parent_email, &student.name)
    };
    Ok(json!({ "notification": sent }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "notify.email" => Some(respond(&req.id, send(state, &req.params, false))),
        "notify.sms" => Some(respond(&req.id, send(state, &req.params, true))),
        _ => None,
    }
}
