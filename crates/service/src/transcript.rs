use std::collections::BTreeMap;

use models::{Grade, Student, StudentId, Transcript};
use tracing::debug;

use crate::errors::StoreError;

/// IDs restart here on every `initialize`.
const FIRST_STUDENT_ID: StudentId = 1;

#[derive(Clone, Debug)]
struct StudentRecord {
    student: Student,
    grades: Vec<Grade>,
}

impl StudentRecord {
    fn transcript(&self) -> Transcript {
        Transcript { student: self.student.clone(), grades: self.grades.clone() }
    }
}

/// In-memory transcript manager.
///
/// Owns all student/grade state behind a small CRUD surface. Every operation
/// is synchronous and atomic: it either fully succeeds or fails with no side
/// effect. The store performs no locking of its own; the hosting layer must
/// serialize access (one request runs to completion before the next mutates
/// state).
///
/// Two uniqueness invariants are enforced here:
/// - student IDs are unique and never reused after deletion within a process
///   lifetime (monotonic counter);
/// - a student holds at most one grade per course.
#[derive(Clone, Debug)]
pub struct TranscriptStore {
    students: BTreeMap<StudentId, StudentRecord>,
    next_id: StudentId,
    seed: Vec<String>,
}

impl Default for TranscriptStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TranscriptStore {
    /// Empty store, IDs starting at 1.
    pub fn new() -> Self {
        Self::with_seed(Vec::new())
    }

    /// Store pre-populated with one student per seed name. `initialize`
    /// restores exactly this state; blank names are skipped.
    pub fn with_seed(seed: Vec<String>) -> Self {
        let mut store = Self { students: BTreeMap::new(), next_id: FIRST_STUDENT_ID, seed };
        store.initialize();
        store
    }

    /// Wholesale reset to the seeded starting state. Wipes all prior data
    /// and restarts the ID counter.
    pub fn initialize(&mut self) {
        self.students.clear();
        self.next_id = FIRST_STUDENT_ID;
        let seed = self.seed.clone();
        for name in seed {
            // 空白名字直接跳过，种子数据不参与校验失败
            let _ = self.add_student(&name);
        }
        debug!(seeded = self.students.len(), "store initialized");
    }

    /// Create a student and return its freshly allocated ID. Fails with a
    /// validation error when the name is empty or all-whitespace.
    pub fn add_student(&mut self, name: &str) -> Result<StudentId, StoreError> {
        if name.trim().is_empty() {
            return Err(StoreError::empty_name());
        }
        let id = self.next_id;
        self.next_id += 1;
        let record = StudentRecord {
            student: Student { student_id: id, student_name: name.to_string() },
            grades: Vec::new(),
        };
        self.students.insert(id, record);
        debug!(student_id = id, "student added");
        Ok(id)
    }

    /// All IDs whose student name equals `name` exactly. Empty vec (not an
    /// error) when none match.
    pub fn student_ids(&self, name: &str) -> Vec<StudentId> {
        self.students
            .values()
            .filter(|r| r.student.student_name == name)
            .map(|r| r.student.student_id)
            .collect()
    }

    /// Composed view for one student. Unknown IDs return `None` rather than
    /// an error; this asymmetry with the erroring lookups is part of the
    /// observable contract.
    pub fn transcript(&self, id: StudentId) -> Option<Transcript> {
        self.students.get(&id).map(StudentRecord::transcript)
    }

    /// Remove the student and all of its grades.
    pub fn delete_student(&mut self, id: StudentId) -> Result<(), StoreError> {
        match self.students.remove(&id) {
            Some(_) => {
                debug!(student_id = id, "student deleted");
                Ok(())
            }
            None => Err(StoreError::StudentNotFound(id)),
        }
    }

    /// Append a grade for `course`, keeping encounter order. Rejects unknown
    /// students, non-finite grade values and duplicate courses.
    pub fn add_grade(
        &mut self,
        id: StudentId,
        course: &str,
        grade: f64,
    ) -> Result<(), StoreError> {
        if !grade.is_finite() {
            return Err(StoreError::bad_grade(grade.to_string()));
        }
        let record = self.students.get_mut(&id).ok_or(StoreError::StudentNotFound(id))?;
        if record.grades.iter().any(|g| g.course == course) {
            return Err(StoreError::DuplicateGrade { student: id, course: course.to_string() });
        }
        record.grades.push(Grade { course: course.to_string(), grade });
        debug!(student_id = id, course, grade, "grade added");
        Ok(())
    }

    /// Grade for one (student, course) pair. Unknown students and unknown
    /// courses are distinct failures.
    pub fn grade(&self, id: StudentId, course: &str) -> Result<f64, StoreError> {
        let record = self.students.get(&id).ok_or(StoreError::StudentNotFound(id))?;
        record
            .grades
            .iter()
            .find(|g| g.course == course)
            .map(|g| g.grade)
            .ok_or_else(|| StoreError::CourseNotFound { student: id, course: course.to_string() })
    }

    /// Composed view for every stored student, ordered by ID.
    pub fn all_transcripts(&self) -> Vec<Transcript> {
        self.students.values().map(StudentRecord::transcript).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_student_returns_positive_id_and_empty_grades() {
        let mut store = TranscriptStore::new();
        let id = store.add_student("Aziza").expect("add");
        assert!(id > 0);
        assert!(store.student_ids("Aziza").contains(&id));

        let t = store.transcript(id).expect("present");
        assert_eq!(t.student.student_name, "Aziza");
        assert!(t.grades.is_empty());
    }

    #[test]
    fn same_name_gets_distinct_ids() {
        let mut store = TranscriptStore::new();
        let s1 = store.add_student("Aziza").expect("add");
        let s2 = store.add_student("Aziza").expect("add");
        assert_ne!(s1, s2);
        assert_eq!(store.student_ids("Aziza"), vec![s1, s2]);
    }

    #[test]
    fn add_student_rejects_empty_and_blank_names() {
        let mut store = TranscriptStore::new();
        assert!(matches!(store.add_student(""), Err(StoreError::Validation(_))));
        assert!(matches!(store.add_student("   "), Err(StoreError::Validation(_))));
        assert!(store.all_transcripts().is_empty());
    }

    #[test]
    fn transcript_returns_none_for_unknown_id() {
        let store = TranscriptStore::new();
        assert!(store.transcript(999_999).is_none());
    }

    #[test]
    fn delete_removes_only_the_requested_student() {
        let mut store = TranscriptStore::new();
        let id1 = store.add_student("A").expect("add");
        let id2 = store.add_student("B").expect("add");

        store.delete_student(id1).expect("delete");
        assert!(!store.student_ids("A").contains(&id1));
        assert!(store.student_ids("B").contains(&id2));
        assert!(store.transcript(id1).is_none());

        // second delete of the same ID raises
        assert_eq!(store.delete_student(id1), Err(StoreError::StudentNotFound(id1)));
    }

    #[test]
    fn ids_are_not_reused_after_deletion() {
        let mut store = TranscriptStore::new();
        let id1 = store.add_student("A").expect("add");
        store.delete_student(id1).expect("delete");
        let id2 = store.add_student("A").expect("add");
        assert!(id2 > id1);
    }

    #[test]
    fn add_grade_then_get_grade_round_trips() {
        let mut store = TranscriptStore::new();
        let id = store.add_student("X").expect("add");

        store.add_grade(id, "CS360", 95.0).expect("grade");
        store.add_grade(id, "CS411", 85.0).expect("grade");

        let t = store.transcript(id).expect("present");
        assert_eq!(
            t.grades,
            vec![
                Grade { course: "CS360".into(), grade: 95.0 },
                Grade { course: "CS411".into(), grade: 85.0 },
            ]
        );
        assert_eq!(store.grade(id, "CS360"), Ok(95.0));
    }

    #[test]
    fn duplicate_course_is_a_conflict_and_keeps_original_grade() {
        let mut store = TranscriptStore::new();
        let id = store.add_student("X").expect("add");
        store.add_grade(id, "CS360", 90.0).expect("grade");

        let err = store.add_grade(id, "CS360", 95.0).expect_err("duplicate");
        assert!(matches!(err, StoreError::DuplicateGrade { .. }));
        assert_eq!(store.grade(id, "CS360"), Ok(90.0));
    }

    #[test]
    fn non_finite_grades_are_rejected_without_side_effect() {
        let mut store = TranscriptStore::new();
        let id = store.add_student("X").expect("add");

        assert!(matches!(store.add_grade(id, "CS360", f64::NAN), Err(StoreError::Validation(_))));
        assert!(matches!(
            store.add_grade(id, "CS360", f64::INFINITY),
            Err(StoreError::Validation(_))
        ));
        assert!(store.transcript(id).expect("present").grades.is_empty());
    }

    #[test]
    fn grade_lookup_distinguishes_unknown_student_from_unknown_course() {
        let mut store = TranscriptStore::new();
        let id = store.add_student("Y").expect("add");
        store.add_grade(id, "CS360", 77.0).expect("grade");

        assert_eq!(store.grade(id, "CS360"), Ok(77.0));
        assert_eq!(
            store.grade(id, "CS411"),
            Err(StoreError::CourseNotFound { student: id, course: "CS411".into() })
        );
        assert_eq!(store.grade(424_242, "CS360"), Err(StoreError::StudentNotFound(424_242)));
    }

    #[test]
    fn add_grade_on_unknown_student_fails() {
        let mut store = TranscriptStore::new();
        assert_eq!(store.add_grade(5, "CS360", 90.0), Err(StoreError::StudentNotFound(5)));
    }

    #[test]
    fn initialize_restores_the_seeded_state() {
        let mut store = TranscriptStore::with_seed(vec!["Avery".into(), "Blake".into()]);
        assert_eq!(store.all_transcripts().len(), 2);
        assert_eq!(store.student_ids("Avery"), vec![1]);

        let extra = store.add_student("Newbie").expect("add");
        assert_eq!(extra, 3);

        store.initialize();
        assert_eq!(store.all_transcripts().len(), 2);
        assert!(store.student_ids("Newbie").is_empty());
        // counter restarts just above the seed
        assert_eq!(store.add_student("Newbie").expect("add"), 3);
    }

    // the end-to-end scenario from the original manager suite
    #[test]
    fn full_scenario() {
        let mut store = TranscriptStore::new();
        store.initialize();

        assert_eq!(store.add_student("Aziza").expect("add"), 1);
        assert_eq!(store.add_student("Aziza").expect("add"), 2);
        assert_eq!(store.student_ids("Aziza"), vec![1, 2]);

        store.add_grade(1, "CS360", 90.0).expect("grade");
        assert_eq!(store.grade(1, "CS360"), Ok(90.0));
        assert!(store.add_grade(1, "CS360", 95.0).is_err());

        store.delete_student(1).expect("delete");
        assert!(store.transcript(1).is_none());
        assert_eq!(store.student_ids("Aziza"), vec![2]);
    }
}
