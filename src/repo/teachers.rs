use super::Record;
use crate::kv::{StorageKey, Store};
use crate::records::Teacher;

impl Record for Teacher {
    const KEY: StorageKey = StorageKey::Teachers;

    fn id(&self) -> &str {
        &self.user.id
    }
}

pub fn list(store: &Store) -> Vec<Teacher> {
    super::list(store)
}

/// Appends to the teacher collection, then registers the teacher as a login
/// identity unless a user with the same (email, role) already exists. The two
/// writes are independent.
pub fn add(store: &mut Store, teacher: Teacher) {
    super::add(store, teacher.clone());
    let user = teacher.user;
    if super::users::find_by_login(store, &user.email, user.role).is_none() {
        super::users::add(store, user);
    }
}

pub fn find_by_id(store: &Store, id: &str) -> Option<Teacher> {
    super::find_by_id(store, id)
}
