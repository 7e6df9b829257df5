use crate::ipc::helpers::{
    optional_str, required_str, respond, session_user_id, store_mut, store_ref, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::records::{new_id, Student};
use crate::repo::{classes, students};
use serde_json::json;

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(store) = state.store.as_ref() else {
        return respond(&req.id, Ok(json!({ "students": [] })));
    };
    let all = match optional_str(&req.params, "class") {
        Some(class) => students::by_class(store, &class),
        None => students::list(store),
    };
    respond(&req.id, Ok(json!({ "students": all })))
}

fn get(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let id = required_str(params, "id")?;
    let store = store_ref(state)?;
    let student = students::find_by_id(store, &id).ok_or_else(|| HandlerErr::not_found("student"))?;
    Ok(json!({ "student": student }))
}

fn create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let owner = session_user_id(state);
    let student = Student {
        id: new_id("student"),
        name: required_str(params, "name")?,
        class: required_str(params, "class")?,
        parent_name: required_str(params, "parentName")?,
        parent_email: required_str(params, "parentEmail")?,
        parent_phone: optional_str(params, "parentPhone").unwrap_or_default(),
        teacher_id: (!owner.is_empty()).then_some(owner),
    };
    let store = store_mut(state)?;
    // Class is free text; an unknown name is kept as entered.
    if classes::find_by_name(store, &student.class).is_none() {
        tracing::debug!(class = %student.class, "student class matches no known class");
    }
    students::add(store, student.clone());
    Ok(json!({ "student": student }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.get" => Some(respond(&req.id, get(state, &req.params))),
        "students.create" => Some(respond(&req.id, create(state, &req.params))),
        _ => None,
    }
}
