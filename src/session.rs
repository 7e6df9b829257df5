use crate::kv::{StorageKey, Store};
use crate::records::{Role, User};
use crate::repo::users;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Anonymous,
    Authenticated(User),
}

/// The active login. Persisted under the current-user key so a restarted
/// daemon picks the same user back up; never re-validated against `users`.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: SessionState::Anonymous,
        }
    }
}

impl Session {
    pub fn restore(store: &Store) -> Self {
        match store.get::<User>(StorageKey::CurrentUser.as_str()) {
            Some(user) => Self {
                state: SessionState::Authenticated(user),
            },
            None => Self::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(u) => Some(u),
            SessionState::Anonymous => None,
        }
    }

    /// Succeeds iff a stored user has exactly this (email, role). A success
    /// replaces any previous login.
    pub fn login(&mut self, store: &mut Store, email: &str, role: Role) -> bool {
        let Some(user) = users::find_by_login(store, email, role) else {
            return false;
        };
        store.set(StorageKey::CurrentUser.as_str(), &user);
        tracing::info!(user_id = %user.id, role = role.as_str(), "login");
        self.state = SessionState::Authenticated(user);
        true
    }

    pub fn logout(&mut self, store: &mut Store) {
        store.remove(StorageKey::CurrentUser.as_str());
        if let SessionState::Authenticated(u) = &self.state {
            tracing::info!(user_id = %u.id, "logout");
        }
        self.state = SessionState::Anonymous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn seeded() -> Store {
        let mut store = Store::in_memory();
        seed::bootstrap(&mut store);
        store
    }

    #[test]
    fn login_sets_current_user_and_logout_clears_it() {
        let mut store = seeded();
        let mut session = Session::restore(&store);
        assert_eq!(session.state(), &SessionState::Anonymous);

        assert!(session.login(&mut store, "parent@school.com", Role::Parent));
        assert_eq!(session.current_user().map(|u| u.id.as_str()), Some("parent-1"));

        session.logout(&mut store);
        assert!(session.current_user().is_none());
        assert!(store.get::<User>(StorageKey::CurrentUser.as_str()).is_none());

        // Logging out twice is harmless.
        session.logout(&mut store);
        assert_eq!(session.state(), &SessionState::Anonymous);
    }

    #[test]
    fn failed_login_keeps_previous_state() {
        let mut store = seeded();
        let mut session = Session::default();
        assert!(session.login(&mut store, "admin@school.com", Role::Admin));
        assert!(!session.login(&mut store, "admin@school.com", Role::Parent));
        assert!(!session.login(&mut store, "Admin@School.com", Role::Admin));
        assert_eq!(session.current_user().map(|u| u.role), Some(Role::Admin));
    }

    #[test]
    fn fresh_login_overwrites_and_survives_restore() {
        let mut store = seeded();
        let mut session = Session::default();
        assert!(session.login(&mut store, "admin@school.com", Role::Admin));
        assert!(session.login(&mut store, "teacher@school.com", Role::Teacher));

        let restored = Session::restore(&store);
        assert_eq!(restored.current_user().map(|u| u.id.as_str()), Some("teacher-1"));
    }
}
