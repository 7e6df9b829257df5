use super::Record;
use crate::kv::{StorageKey, Store};
use crate::records::{Role, User};

impl Record for User {
    const KEY: StorageKey = StorageKey::Users;

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn list(store: &Store) -> Vec<User> {
    super::list(store)
}

pub fn add(store: &mut Store, user: User) {
    super::add(store, user)
}

#[cfg_attr(not(test), allow(dead_code))]
pub fn find_by_id(store: &Store, id: &str) -> Option<User> {
    super::find_by_id(store, id)
}

/// Identity lookup for login. Email comparison is exact, case included.
pub fn find_by_login(store: &Store, email: &str, role: Role) -> Option<User> {
    super::find_by(store, |u: &User| u.email == email && u.role == role)
}
