use serde::{Deserialize, Serialize};

/// Store-assigned identifier, positive and never reused within a process.
pub type StudentId = u32;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Student {
    #[serde(rename = "studentID")]
    pub student_id: StudentId,
    #[serde(rename = "studentName")]
    pub student_name: String,
}

/// One recorded grade; a student holds at most one per course.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Grade {
    pub course: String,
    pub grade: f64,
}

/// Read view composing a student with its grades in insertion order.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    pub student: Student,
    pub grades: Vec<Grade>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn student_uses_wire_field_names() {
        let s = Student { student_id: 7, student_name: "Aziza".into() };
        let json = serde_json::to_value(&s).expect("serialize");
        assert_eq!(json["studentID"], 7);
        assert_eq!(json["studentName"], "Aziza");
    }

    #[test]
    fn transcript_round_trips_from_wire_json() {
        let json = r#"{
            "student": { "studentID": 1, "studentName": "Bob" },
            "grades": [ { "course": "CS360", "grade": 90.0 } ]
        }"#;
        let t: Transcript = serde_json::from_str(json).expect("deserialize");
        assert_eq!(t.student.student_id, 1);
        assert_eq!(t.grades.len(), 1);
        assert_eq!(t.grades[0].course, "CS360");
    }
}
