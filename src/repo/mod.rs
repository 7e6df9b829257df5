//! Collection repositories.
//!
//! Every collection is one JSON array under a fixed key. Writes read the
//! whole array, append, and write the whole array back; finders are linear
//! scans in insertion order.

pub mod attendance;
pub mod classes;
pub mod grades;
pub mod students;
pub mod teachers;
pub mod users;

use crate::kv::{StorageKey, Store};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub trait Record: Serialize + DeserializeOwned + Clone {
    const KEY: StorageKey;

    fn id(&self) -> &str;
}

pub fn list<T: Record>(store: &Store) -> Vec<T> {
    store.get::<Vec<T>>(T::KEY.as_str()).unwrap_or_default()
}

pub fn add<T: Record>(store: &mut Store, record: T) {
    let mut all = list::<T>(store);
    all.push(record);
    store.set(T::KEY.as_str(), &all);
}

pub fn find_by<T: Record>(store: &Store, pred: impl Fn(&T) -> bool) -> Option<T> {
    list::<T>(store).into_iter().find(|r| pred(r))
}

pub fn find_by_id<T: Record>(store: &Store, id: &str) -> Option<T> {
    find_by(store, |r: &T| r.id() == id)
}

pub fn filter_by<T: Record>(store: &Store, pred: impl Fn(&T) -> bool) -> Vec<T> {
    list::<T>(store).into_iter().filter(|r| pred(r)).collect()
}
