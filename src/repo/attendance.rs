use super::Record;
use crate::kv::{StorageKey, Store};
use crate::records::AttendanceRecord;

impl Record for AttendanceRecord {
    const KEY: StorageKey = StorageKey::Attendance;

    fn id(&self) -> &str {
        &self.id
    }
}

pub fn list(store: &Store) -> Vec<AttendanceRecord> {
    super::list(store)
}

pub fn add(store: &mut Store, record: AttendanceRecord) {
    super::add(store, record)
}

pub fn by_student_id(store: &Store, student_id: &str) -> Vec<AttendanceRecord> {
    super::filter_by(store, |r: &AttendanceRecord| r.student_id == student_id)
}

pub fn by_teacher_id(store: &Store, teacher_id: &str) -> Vec<AttendanceRecord> {
    super::filter_by(store, |r: &AttendanceRecord| r.teacher_id == teacher_id)
}

/// `date` is compared as the stored label, not as a calendar date.
pub fn by_date(store: &Store, date: &str) -> Vec<AttendanceRecord> {
    super::filter_by(store, |r: &AttendanceRecord| r.date == date)
}
