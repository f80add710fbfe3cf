use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A quiz moves from created-empty, to populated with questions, to completed
/// once any submission is recorded. The completion flag is global to the
/// quiz, not per student.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub id: Uuid,
    pub name: String,
    pub classroom_id: Uuid,
    /// User who generated the quiz.
    pub user_id: Uuid,
    pub is_completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Quiz {
    pub fn new(name: &str, classroom_id: Uuid, user_id: Uuid) -> Self {
        Quiz {
            id: Uuid::new_v4(),
            name: name.to_string(),
            classroom_id,
            user_id,
            is_completed: false,
            created_at: Some(Utc::now()),
        }
    }
}
