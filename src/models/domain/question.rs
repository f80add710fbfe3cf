use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::ParsedQuestion;

/// One multiple-choice question belonging to exactly one quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question_text: String,
    /// Options A through D, ordered.
    pub options: Vec<String>,
    /// The correct option letter, one of A-D.
    pub correct_answer: String,
}

impl Question {
    pub fn from_parsed(parsed: ParsedQuestion, quiz_id: Uuid) -> Self {
        Question {
            id: Uuid::new_v4(),
            quiz_id,
            question_text: parsed.text,
            options: parsed.options.to_vec(),
            correct_answer: parsed.correct,
        }
    }
}
