use crate::ipc::error::{err, ok};
use crate::ipc::types::AppState;
use crate::kv::Store;
use crate::records::{Role, User};
use crate::session::SessionState;

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_params(message: impl Into<String>) -> Self {
        Self::new("bad_params", message)
    }

    pub fn not_found(what: &str) -> Self {
        Self::new("not_found", format!("{} not found", what))
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

pub fn respond(id: &str, res: Result<serde_json::Value, HandlerErr>) -> serde_json::Value {
    match res {
        Ok(v) => ok(id, v),
        Err(e) => e.response(id),
    }
}

/// Trimmed string param; absent and blank both count as missing.
pub fn optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    optional_str(params, key).ok_or_else(|| HandlerErr::bad_params(format!("missing {}", key)))
}

pub fn required_number(params: &serde_json::Value, key: &str) -> Result<f64, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_f64())
        .filter(|n| n.is_finite())
        .ok_or_else(|| HandlerErr::bad_params(format!("missing or non-numeric {}", key)))
}

pub fn store_mut(state: &mut AppState) -> Result<&mut Store, HandlerErr> {
    state
        .store
        .as_mut()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))
}

pub fn store_ref(state: &AppState) -> Result<&Store, HandlerErr> {
    state
        .store
        .as_ref()
        .ok_or_else(|| HandlerErr::new("no_workspace", "select a workspace first"))
}

pub fn require_role(state: &AppState, role: Role) -> Result<User, HandlerErr> {
    match state.session.state() {
        SessionState::Anonymous => Err(HandlerErr::new("not_authenticated", "log in first")),
        SessionState::Authenticated(user) if user.role == role => Ok(user.clone()),
        SessionState::Authenticated(_) => Err(HandlerErr::new(
            "forbidden",
            format!("requires the {} role", role.as_str()),
        )),
    }
}

/// Id of the logged-in user, or empty when nobody is logged in.
pub fn session_user_id(state: &AppState) -> String {
    state
        .session
        .current_user()
        .map(|u| u.id.clone())
        .unwrap_or_default()
}
