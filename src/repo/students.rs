use super::Record;
use crate::kv::{StorageKey, Store};
use crate::records::Student;

impl Record for Student {
    const KEY: StorageKey = StorageKey::Students;

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn list(store: &Store) -> Vec<Student> {
    super::list(store)
}

pub fn add(store: &mut Store, student: Student) {
    super::add(store, student)
}

pub fn find_by_id(store: &Store, id: &str) -> Option<Student> {
    super::find_by_id(store, id)
}

pub fn by_class(store: &Store, class_name: &str) -> Vec<Student> {
    super::filter_by(store, |s: &Student| s.class == class_name)
}

pub fn by_parent_email(store: &Store, email: &str) -> Option<Student> {
    super::find_by(store, |s: &Student| s.parent_email == email)
}
