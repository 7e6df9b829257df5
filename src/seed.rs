use crate::kv::Store;
use crate::records::{
    date_label, AttendanceRecord, AttendanceStatus, Grade, Role, SchoolClass, Student, Teacher,
    User,
};
use crate::repo::{self, attendance, classes, grades, students, users};
use serde::Serialize;

const DEMO_TEACHER: &str = "demo-teacher";
const DEMO_DAYS: i64 = 7;
// Day offsets (0 = today) the demo student missed.
const DEMO_ABSENT_OFFSETS: &[i64] = &[4];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
    pub users: usize,
    pub teachers: usize,
    pub classes: usize,
}

fn default_users() -> Vec<User> {
    let mk = |id: &str, name: &str, email: &str, role: Role, phone: &str| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        phone: Some(phone.to_string()),
    };
    vec![
        mk("admin-1", "System Admin", "admin@school.com", Role::Admin, "1234567890"),
        mk("teacher-1", "John Smith", "teacher@school.com", Role::Teacher, "1234567891"),
        mk("parent-1", "Sarah Johnson", "parent@school.com", Role::Parent, "1234567892"),
    ]
}

fn default_teacher() -> Teacher {
    Teacher::new(
        "teacher-1".to_string(),
        "T001".to_string(),
        "John Smith".to_string(),
        "teacher@school.com".to_string(),
        Some("1234567891".to_string()),
    )
}

fn default_classes() -> Vec<SchoolClass> {
    let core = ["Mathematics", "Science", "English", "History", "Geography"];
    let senior = [
        "Advanced Mathematics",
        "Physics",
        "Chemistry",
        "English Literature",
        "Economics",
    ];
    let mk = |id: &str, name: &str, subjects: &[&str]| SchoolClass {
        id: id.to_string(),
        name: name.to_string(),
        subjects: subjects.iter().map(|s| s.to_string()).collect(),
        teacher_id: None,
    };
    vec![
        mk("class-1", "Grade 10-A", &core),
        mk("class-2", "Grade 10-B", &core),
        mk("class-3", "Grade 11-A", &senior),
    ]
}

/// Fills each of users, teachers and classes with its defaults when that
/// collection is empty. Populated collections are left untouched, so repeated
/// calls never duplicate records.
pub fn bootstrap(store: &mut Store) -> SeedReport {
    let mut report = SeedReport::default();

    if users::list(store).is_empty() {
        for u in default_users() {
            users::add(store, u);
            report.users += 1;
        }
    }

    // The default teacher is already a user; skip the registration path.
    if repo::list::<Teacher>(store).is_empty() {
        repo::add(store, default_teacher());
        report.teachers += 1;
    }

    if classes::list(store).is_empty() {
        for c in default_classes() {
            classes::add(store, c);
            report.classes += 1;
        }
    }

    if report != SeedReport::default() {
        tracing::info!(
            users = report.users,
            teachers = report.teachers,
            classes = report.classes,
            "seeded default records"
        );
    }
    report
}

/// Resolves the student shown to a parent, creating demo data the first time
/// so the dashboard has something to display.
pub fn ensure_parent_demo(store: &mut Store, parent: &User) -> Student {
    let student = match students::by_parent_email(store, &parent.email) {
        Some(s) => s,
        None => {
            let all = students::list(store);
            match all.into_iter().next() {
                Some(first) => first,
                None => {
                    let s = Student {
                        id: "demo-student-1".to_string(),
                        name: "Alex Johnson".to_string(),
                        class: "Grade 10-A".to_string(),
                        parent_name: parent.name.clone(),
                        parent_email: parent.email.clone(),
                        parent_phone: "1234567890".to_string(),
                        teacher_id: None,
                    };
                    students::add(store, s.clone());
                    s
                }
            }
        }
    };

    if attendance::by_student_id(store, &student.id).is_empty() {
        let today = chrono::Local::now().date_naive();
        for i in 0..DEMO_DAYS {
            let status = if DEMO_ABSENT_OFFSETS.contains(&i) {
                AttendanceStatus::Absent
            } else {
                AttendanceStatus::Present
            };
            attendance::add(
                store,
                AttendanceRecord {
                    id: format!("demo-attendance-{i}"),
                    student_id: student.id.clone(),
                    student_name: student.name.clone(),
                    date: date_label(today - chrono::Duration::days(i)),
                    time: "09:00 AM".to_string(),
                    status,
                    teacher_id: DEMO_TEACHER.to_string(),
                },
            );
        }
    }

    if grades::by_student_id(store, &student.id).is_empty() {
        let date = date_label(chrono::Local::now().date_naive());
        let marks = [
            ("Mathematics", 85.0),
            ("Science", 92.0),
            ("English", 78.0),
            ("History", 88.0),
        ];
        for (i, (subject, m)) in marks.into_iter().enumerate() {
            grades::add(
                store,
                Grade {
                    id: format!("demo-grade-{}", i + 1),
                    student_id: student.id.clone(),
                    subject: subject.to_string(),
                    marks: m,
                    max_marks: 100.0,
                    date: date.clone(),
                    teacher_id: DEMO_TEACHER.to_string(),
                },
            );
        }
    }

    student
}
