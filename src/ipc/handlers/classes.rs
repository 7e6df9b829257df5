use crate::ipc::helpers::{optional_str, required_str, respond, store_mut, store_ref, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::records::{new_id, SchoolClass};
use crate::repo::classes;
use serde_json::json;

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let all = state.store.as_ref().map(classes::list).unwrap_or_default();
    respond(&req.id, Ok(json!({ "classes": all })))
}

fn get(state: &AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let id = required_str(params, "id")?;
    let store = store_ref(state)?;
    let class = classes::find_by_id(store, &id).ok_or_else(|| HandlerErr::not_found("class"))?;
    Ok(json!({ "class": class }))
}

fn create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let name = required_str(params, "name")?;
    let Some(raw) = params.get("subjects").and_then(|v| v.as_array()) else {
        return Err(HandlerErr::bad_params("subjects must be an array of strings"));
    };
    let mut subjects = Vec::with_capacity(raw.len());
    for v in raw {
        let Some(s) = v.as_str() else {
            return Err(HandlerErr::bad_params("subjects must be an array of strings"));
        };
        let t = s.trim();
        if !t.is_empty() {
            subjects.push(t.to_string());
        }
    }
    if subjects.is_empty() {
        return Err(HandlerErr::bad_params("at least one subject is required"));
    }

    let class = SchoolClass {
        id: new_id("class"),
        name,
        subjects,
        teacher_id: optional_str(params, "teacherId"),
    };
    let store = store_mut(state)?;
    classes::add(store, class.clone());
    Ok(json!({ "class": class }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_classes_list(state, req)),
        "classes.get" => Some(respond(&req.id, get(state, &req.params))),
        "classes.create" => Some(respond(&req.id, create(state, &req.params))),
        _ => None,
    }
}
