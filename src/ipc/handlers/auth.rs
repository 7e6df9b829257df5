use crate::ipc::helpers::{respond, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::records::Role;
use serde_json::json;

fn login(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    // Email is matched verbatim, so it is not trimmed here either.
    let email = params
        .get("email")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::bad_params("missing email"))?
        .to_string();
    let role_raw = params
        .get("role")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::bad_params("missing role"))?;

    // An unknown role can never match a stored user.
    let Some(role) = Role::parse(role_raw) else {
        return Ok(json!({ "success": false }));
    };

    let AppState { store, session, .. } = state;
    let store = store
        .as_mut()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))?;
    if !session.login(store, &email, role) {
        return Ok(json!({ "success": false }));
    }
    Ok(json!({
        "success": true,
        "user": session.current_user(),
        "dashboard": role.dashboard(),
    }))
}

fn handle_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    respond(&req.id, login(state, &req.params))
}

fn handle_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.store.as_mut() {
        Some(store) => state.session.logout(store),
        None => state.session = Default::default(),
    }
    respond(&req.id, Ok(json!({ "ok": true })))
}

fn handle_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    let user = state.session.current_user();
    respond(
        &req.id,
        Ok(json!({
            "user": user,
            "dashboard": user.map(|u| u.role.dashboard()),
        })),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(handle_login(state, req)),
        "auth.logout" => Some(handle_logout(state, req)),
        "auth.current" => Some(handle_current(state, req)),
        _ => None,
    }
}
