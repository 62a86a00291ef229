//! Domain data model for the transcript system.
//! Plain serde types shared by the store, the HTTP layer and the client;
//! field renames pin the wire spelling (`studentID`, `studentName`).

pub mod transcript;
pub mod wire;

pub use transcript::{Grade, Student, StudentId, Transcript};
