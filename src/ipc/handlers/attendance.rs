use crate::ipc::helpers::{
    optional_str, required_str, respond, session_user_id, store_mut, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::records::{new_id, now_label, today_label, AttendanceRecord, AttendanceStatus};
use crate::repo::{attendance, students};
use serde_json::json;

fn handle_attendance_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return respond(&req.id, Ok(json!({ "records": [] })));
    };
    let p = &req.params;
    let records = if let Some(sid) = optional_str(p, "studentId") {
        attendance::by_student_id(store, &sid)
    } else if let Some(tid) = optional_str(p, "teacherId") {
        attendance::by_teacher_id(store, &tid)
    } else if let Some(date) = optional_str(p, "date") {
        attendance::by_date(store, &date)
    } else {
        attendance::list(store)
    };
    respond(&req.id, Ok(json!({ "records": records })))
}

fn mark(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = required_str(params, "studentId")?;
    let status = match optional_str(params, "status") {
        None => AttendanceStatus::Present,
        Some(s) => AttendanceStatus::parse(&s)
            .ok_or_else(|| HandlerErr::bad_params("status must be Present or Absent"))?,
    };
    let teacher_id = session_user_id(state);

    let store = store_mut(state)?;
    let student =
        students::find_by_id(store, &student_id).ok_or_else(|| HandlerErr::not_found("student"))?;
    let record = AttendanceRecord {
        id: new_id("attendance"),
        student_id: student.id,
        student_name: student.name,
        date: today_label(),
        time: now_label(),
        status,
        teacher_id,
    };
    attendance::add(store, record.clone());
    Ok(json!({ "record": record }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.list" => Some(handle_attendance_list(state, req)),
        "attendance.mark" => Some(respond(&req.id, mark(state, &req.params))),
        _ => None,
    }
}
