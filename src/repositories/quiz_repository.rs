use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{eq, Postgrest},
    errors::AppResult,
    models::domain::{Question, Quiz, Submission},
};

#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn insert_quiz(&self, quiz: Quiz) -> AppResult<Quiz>;
    async fn find_in_classroom(&self, quiz_id: Uuid, classroom_id: Uuid)
        -> AppResult<Option<Quiz>>;
    async fn list_by_classroom(&self, classroom_id: Uuid) -> AppResult<Vec<Quiz>>;
    async fn insert_questions(&self, questions: Vec<Question>) -> AppResult<()>;
    async fn questions_for_quiz(&self, quiz_id: Uuid) -> AppResult<Vec<Question>>;
    async fn insert_submission(&self, submission: Submission) -> AppResult<()>;
    async fn mark_completed(&self, quiz_id: Uuid) -> AppResult<()>;
}

pub struct RestQuizRepository {
    db: Postgrest,
}

impl RestQuizRepository {
    pub fn new(db: Postgrest) -> Self {
        Self { db }
    }
}

#[derive(Serialize)]
struct CompletedPatch {
    is_completed: bool,
}

#[async_trait]
impl QuizRepository for RestQuizRepository {
    async fn insert_quiz(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.db.insert_only("quizzes", &quiz).await?;
        Ok(quiz)
    }

    async fn find_in_classroom(
        &self,
        quiz_id: Uuid,
        classroom_id: Uuid,
    ) -> AppResult<Option<Quiz>> {
        let mut rows: Vec<Quiz> = self
            .db
            .select(
                "quizzes",
                &[
                    ("id", eq(quiz_id)),
                    ("classroom_id", eq(classroom_id)),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.pop())
    }

    async fn list_by_classroom(&self, classroom_id: Uuid) -> AppResult<Vec<Quiz>> {
        self.db
            .select("quizzes", &[("classroom_id", eq(classroom_id))])
            .await
    }

    async fn insert_questions(&self, questions: Vec<Question>) -> AppResult<()> {
        if questions.is_empty() {
            return Ok(());
        }
        self.db.insert_only("questions", &questions).await
    }

    async fn questions_for_quiz(&self, quiz_id: Uuid) -> AppResult<Vec<Question>> {
        self.db
            .select("questions", &[("quiz_id", eq(quiz_id))])
            .await
    }

    async fn insert_submission(&self, submission: Submission) -> AppResult<()> {
        self.db.insert_only("quiz_submissions", &submission).await
    }

    async fn mark_completed(&self, quiz_id: Uuid) -> AppResult<()> {
        self.db
            .update(
                "quizzes",
                &[("id", eq(quiz_id))],
                &CompletedPatch { is_completed: true },
            )
            .await
    }
}
