//! Grade and GPA computation.
//!
//! An assessment total is a fixed weighted sum of four component scores:
//! attendance 10%, assignment 20%, mid-exam 30%, final-exam 40%. A missing
//! component weighs in as zero, exactly like a zero score; callers that
//! want to distinguish "not yet graded" from "scored zero" must do so
//! before calling in.

const ATTENDANCE_WEIGHT: f64 = 0.10;
const ASSIGNMENT_WEIGHT: f64 = 0.20;
const MID_EXAM_WEIGHT: f64 = 0.30;
const FINAL_EXAM_WEIGHT: f64 = 0.40;

const PASS_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ComponentScores {
    pub(crate) attendance: Option<f64>,
    pub(crate) assignment: Option<f64>,
    pub(crate) mid_exam: Option<f64>,
    pub(crate) final_exam: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct GradeOutcome {
    pub(crate) total_score: f64,
    pub(crate) grade: &'static str,
    pub(crate) comment: &'static str,
}

pub(crate) fn grade_assessment(scores: ComponentScores) -> GradeOutcome {
    let total_score = scores.attendance.unwrap_or(0.0) * ATTENDANCE_WEIGHT
        + scores.assignment.unwrap_or(0.0) * ASSIGNMENT_WEIGHT
        + scores.mid_exam.unwrap_or(0.0) * MID_EXAM_WEIGHT
        + scores.final_exam.unwrap_or(0.0) * FINAL_EXAM_WEIGHT;

    GradeOutcome {
        total_score,
        grade: letter_grade(total_score),
        comment: if total_score >= PASS_THRESHOLD { "Pass" } else { "Fail" },
    }
}

pub(crate) fn letter_grade(total_score: f64) -> &'static str {
    if total_score >= 90.0 {
        "A"
    } else if total_score >= 80.0 {
        "B"
    } else if total_score >= 70.0 {
        "C"
    } else if total_score >= PASS_THRESHOLD {
        "D"
    } else {
        "F"
    }
}

/// Grade points on the 4.0 scale. Unknown letters count as zero, matching
/// the dashboard aggregates which bucket anything unrecognized with F.
pub(crate) fn grade_points(grade: &str) -> f64 {
    match grade {
        "A" => 4.0,
        "B" => 3.0,
        "C" => 2.0,
        "D" => 1.0,
        _ => 0.0,
    }
}

/// Unweighted mean of the mapped grade points; 0.0 for an empty input.
pub(crate) fn grade_point_average<'a, I>(grades: I) -> f64
where
    I: IntoIterator<Item = &'a str>,
{
    let mut total = 0.0;
    let mut count = 0usize;

    for grade in grades {
        total += grade_points(grade);
        count += 1;
    }

    if count == 0 {
        return 0.0;
    }

    total / count as f64
}
