use crate::ipc::helpers::{optional_str, required_str, respond, store_mut, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::records::{new_id, Role, User};
use crate::repo::users;
use serde_json::json;

fn handle_users_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let all = state.store.as_ref().map(users::list).unwrap_or_default();
    respond(&req.id, Ok(json!({ "users": all })))
}

fn create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let name = required_str(params, "name")?;
    let email = required_str(params, "email")?;
    let role_raw = required_str(params, "role")?;
    let role = Role::parse(&role_raw)
        .ok_or_else(|| HandlerErr::bad_params("role must be admin, teacher or parent"))?;

    let user = User {
        id: new_id(role.as_str()),
        name,
        email,
        role,
        phone: optional_str(params, "phone"),
    };
    let store = store_mut(state)?;
    users::add(store, user.clone());
    Ok(json!({ "user": user }))
}

fn handle_users_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, create(state, &req.params))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "users.list" => Some(handle_users_list(state, req)),
        "users.create" => Some(handle_users_create(state, req)),
        _ => None,
    }
}
