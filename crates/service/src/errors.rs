use models::StudentId;
use thiserror::Error;

/// Failure kinds raised by [`crate::TranscriptStore`].
///
/// Unknown student and unknown course stay distinct variants even though the
/// HTTP layer answers 404 for both.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("student {0} not found")]
    StudentNotFound(StudentId),
    #[error("no grade recorded for student {student} in course {course}")]
    CourseNotFound { student: StudentId, course: String },
    #[error("student {student} already has a grade for course {course}")]
    DuplicateGrade { student: StudentId, course: String },
}

impl StoreError {
    pub fn empty_name() -> Self {
        Self::Validation("studentName must be a non-empty string".into())
    }

    pub fn bad_grade(detail: impl Into<String>) -> Self {
        Self::Validation(format!("grade must be a finite number: {}", detail.into()))
    }
}
