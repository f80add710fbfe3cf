use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A graded submission. Nothing here prevents the same student from
/// submitting twice; each grading call records a fresh row.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Submission {
    pub id: Uuid,
    pub student_id: Uuid,
    pub quiz_id: Uuid,
    /// The raw submitted answers, one per question position.
    pub answers: Vec<String>,
    pub score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Submission {
    pub fn new(student_id: Uuid, quiz_id: Uuid, answers: Vec<String>, score: u32) -> Self {
        Submission {
            id: Uuid::new_v4(),
            student_id,
            quiz_id,
            answers,
            score,
            submitted_at: Some(Utc::now()),
        }
    }
}
