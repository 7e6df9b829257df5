use super::Record;
use crate::kv::{StorageKey, Store};
use crate::records::SchoolClass;

impl Record for SchoolClass {
    const KEY: StorageKey = StorageKey::Classes;

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn list(store: &Store) -> Vec<SchoolClass> {
    super::list(store)
}

pub fn add(store: &mut Store, class: SchoolClass) {
    super::add(store, class)
}

pub fn find_by_id(store: &Store, id: &str) -> Option<SchoolClass> {
    super::find_by_id(store, id)
}

pub fn find_by_name(store: &Store, name: &str) -> Option<SchoolClass> {
    super::find_by(store, |c: &SchoolClass| c.name == name)
}
