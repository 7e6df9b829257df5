use super::grades::grades_json;
use crate::ipc::helpers::{require_role, respond, store_mut, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::records::{today_label, Role};
use crate::repo::{attendance, classes, grades, students};
use crate::seed;
use crate::stats;
use serde_json::json;

fn parent_overview(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let parent = require_role(state, Role::Parent)?;
    let store = store_mut(state)?;
    let student = seed::ensure_parent_demo(store, &parent);

    let records = attendance::by_student_id(store, &student.id);
    let gs = grades::by_student_id(store, &student.id);
    let average = stats::grade_average(&gs);
    Ok(json!({
        "student": student,
        "attendance": records,
        "attendanceSummary": stats::attendance_summary(&records),
        "grades": grades_json(&gs),
        "averageGrade": average,
        "averageBand": stats::GradeBand::from_percentage(average),
    }))
}

fn teacher_overview(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let teacher = require_role(state, Role::Teacher)?;
    let store = store_mut(state)?;
    let all_students = students::list(store);
    let today = today_label();
    let today_records = attendance::by_date(store, &today);
    Ok(json!({
        "today": today,
        "studentCount": all_students.len(),
        "todayCount": today_records.len(),
        "todayRecords": today_records,
        "myRecords": attendance::by_teacher_id(store, &teacher.id),
        "classes": classes::list(store),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "parent.overview" => Some(respond(&req.id, parent_overview(state))),
        "teacher.overview" => Some(respond(&req.id, teacher_overview(state))),
        _ => None,
    }
}
