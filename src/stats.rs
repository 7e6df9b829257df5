use crate::records::{AttendanceRecord, AttendanceStatus, Grade};
use serde::Serialize;

/// Half-up rounding of a non-negative ratio expressed as a whole percentage.
fn round_percent(x: f64) -> u32 {
    if !x.is_finite() || x <= 0.0 {
        return 0;
    }
    (x + 0.5).floor() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
    pub percentage: u32,
}

pub fn attendance_summary(records: &[AttendanceRecord]) -> AttendanceSummary {
    let present = records
        .iter()
        .filter(|r| r.status == AttendanceStatus::Present)
        .count();
    let total = records.len();
    let percentage = if total == 0 {
        0
    } else {
        round_percent(present as f64 / total as f64 * 100.0)
    };
    AttendanceSummary {
        present,
        absent: total - present,
        total,
        percentage,
    }
}

fn grade_ratio(grade: &Grade) -> f64 {
    // A zero maximum would divide by zero; such a grade counts as 0%.
    if grade.max_marks <= 0.0 {
        return 0.0;
    }
    grade.marks / grade.max_marks * 100.0
}

pub fn grade_percentage(grade: &Grade) -> u32 {
    round_percent(grade_ratio(grade))
}

/// Mean of unrounded per-grade percentages, rounded once at the end.
pub fn grade_average(grades: &[Grade]) -> u32 {
    if grades.is_empty() {
        return 0;
    }
    let total: f64 = grades.iter().map(grade_ratio).sum();
    round_percent(total / grades.len() as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeBand {
    Excellent,
    Good,
    Fair,
    NeedsAttention,
}

impl GradeBand {
    pub fn from_percentage(p: u32) -> Self {
        match p {
            90.. => GradeBand::Excellent,
            80..=89 => GradeBand::Good,
            70..=79 => GradeBand::Fair,
            _ => GradeBand::NeedsAttention,
        }
    }
}
