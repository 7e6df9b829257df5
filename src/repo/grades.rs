use super::Record;
use crate::kv::{StorageKey, Store};
use crate::records::Grade;

impl Record for Grade {
    const KEY: StorageKey = StorageKey::Grades;

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn list(store: &Store) -> Vec<Grade> {
    super::list(store)
}

pub fn add(store: &mut Store, grade: Grade) {
    super::add(store, grade)
}

pub fn by_student_id(store: &Store, student_id: &str) -> Vec<Grade> {
    super::filter_by(store, |g: &Grade| g.student_id == student_id)
}
