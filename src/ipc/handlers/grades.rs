use crate::ipc::helpers::{
    optional_str, required_number, required_str, respond, session_user_id, store_mut, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::records::{new_id, today_label, Grade};
use crate::repo::{grades, students};
use crate::stats;
use serde_json::json;

fn grade_json(g: &Grade) -> serde_json::Value {
    let pct = stats::grade_percentage(g);
    let mut v = json!(g);
    v["percentage"] = json!(pct);
    v["band"] = json!(stats::GradeBand::from_percentage(pct));
    v
}

pub(super) fn grades_json(gs: &[Grade]) -> Vec<serde_json::Value> {
    gs.iter().map(grade_json).collect()
}

fn handle_grades_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return respond(&req.id, Ok(json!({ "grades": [] })));
    };
    let gs = match optional_str(&req.params, "studentId") {
        Some(sid) => grades::by_student_id(store, &sid),
        None => grades::list(store),
    };
    respond(&req.id, Ok(json!({ "grades": grades_json(&gs) })))
}

fn create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = required_str(params, "studentId")?;
    let subject = required_str(params, "subject")?;
    let marks = required_number(params, "marks")?;
    let max_marks = required_number(params, "maxMarks")?;
    if max_marks <= 0.0 {
        return Err(HandlerErr::bad_params("maxMarks must be greater than 0"));
    }
    if marks < 0.0 {
        return Err(HandlerErr::bad_params("marks must not be negative"));
    }
    let teacher_id = session_user_id(state);

    let store = store_mut(state)?;
    if students::find_by_id(store, &student_id).is_none() {
        return Err(HandlerErr::not_found("student"));
    }
    let grade = Grade {
        id: new_id("grade"),
        student_id,
        subject,
        marks,
        max_marks,
        date: today_label(),
        teacher_id,
    };
    grades::add(store, grade.clone());
    Ok(json!({ "grade": grade_json(&grade) }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.list" => Some(handle_grades_list(state, req)),
        "grades.create" => Some(respond(&req.id, create(state, &req.params))),
        _ => None,
    }
}
