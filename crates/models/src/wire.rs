//! Request/response payloads for the HTTP surface, shared with the client.

use serde::{Deserialize, Serialize};

use crate::transcript::StudentId;

/// Body of `POST /transcripts`. The name is optional at the serde level so a
/// missing field reaches the validation path (400) instead of failing
/// deserialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(rename = "studentName", default)]
    pub student_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedStudent {
    #[serde(rename = "studentID")]
    pub student_id: StudentId,
}

/// Body of `POST /transcripts/:id/:course`. The grade is carried as raw JSON
/// so non-numeric values (e.g. a string) can be answered with 400 rather
/// than rejected by the extractor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddGradeRequest {
    #[serde(default)]
    pub grade: serde_json::Value,
}

/// Response of `GET /transcripts/:id/:course`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GradeReport {
    #[serde(rename = "studentID")]
    pub student_id: StudentId,
    pub course: String,
    pub grade: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_tolerates_missing_name() {
        let req: CreateStudentRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(req.student_name.is_none());
    }

    #[test]
    fn add_grade_request_accepts_any_json_grade() {
        let req: AddGradeRequest =
            serde_json::from_str(r#"{ "grade": "not a number" }"#).expect("deserialize");
        assert!(req.grade.as_f64().is_none());

        let req: AddGradeRequest = serde_json::from_str(r#"{ "grade": 90 }"#).expect("deserialize");
        assert_eq!(req.grade.as_f64(), Some(90.0));
    }
}
