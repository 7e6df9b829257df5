use crate::ipc::helpers::{optional_str, required_str, respond, store_mut, store_ref, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::records::{new_id, Teacher};
use crate::repo::teachers;
use serde_json::json;

fn handle_teachers_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let all = state.store.as_ref().map(teachers::list).unwrap_or_default();
    respond(&req.id, Ok(json!({ "teachers": all })))
}

fn get(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let id = required_str(params, "id")?;
    let store = store_ref(state)?;
    let teacher = teachers::find_by_id(store, &id).ok_or_else(|| HandlerErr::not_found("teacher"))?;
    Ok(json!({ "teacher": teacher }))
}

fn create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let teacher = Teacher::new(
        new_id("teacher"),
        required_str(params, "teacherId")?,
        required_str(params, "name")?,
        required_str(params, "email")?,
        optional_str(params, "phone"),
    );
    let store = store_mut(state)?;
    teachers::add(store, teacher.clone());
    tracing::info!(teacher_id = %teacher.teacher_id, "teacher added");
    Ok(json!({ "teacher": teacher }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "teachers.list" => Some(handle_teachers_list(state, req)),
        "teachers.get" => Some(respond(&req.id, get(state, &req.params))),
        "teachers.create" => Some(respond(&req.id, create(state, &req.params))),
        _ => None,
    }
}
