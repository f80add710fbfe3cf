use std::sync::Arc;
use uuid::Uuid;

use crate::{
    clients::CompletionClient,
    constants::quiz_prompt,
    content::{self, ALLOWED_EXTENSIONS},
    errors::{AppError, AppResult},
    models::{
        domain::{MemberRole, Question, Quiz},
        dto::response::{
            GenerateQuizDetails, GenerateQuizResponse, QuestionView, SubmitAnswersResponse,
        },
    },
    repositories::{ClassroomRepository, QuizRepository},
    services::grading::GradingService,
};

/// Parameters of a generation request, as carried by the multipart upload.
pub struct GenerateQuizInput {
    pub file_name: String,
    pub file_bytes: Vec<u8>,
    pub name: String,
    pub num_questions: u32,
    pub mcq: u32,
    pub frq: u32,
    pub classroom_id: Uuid,
}

pub struct QuizService {
    quizzes: Arc<dyn QuizRepository>,
    classrooms: Arc<dyn ClassroomRepository>,
    llm: Arc<dyn CompletionClient>,
}

impl QuizService {
    pub fn new(
        quizzes: Arc<dyn QuizRepository>,
        classrooms: Arc<dyn ClassroomRepository>,
        llm: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            quizzes,
            classrooms,
            llm,
        }
    }

    /// Extracts the uploaded document, asks the model for questions, and
    /// persists whatever parsed cleanly. Fails with 400 when nothing usable
    /// came back.
    pub async fn generate(
        &self,
        user_id: Uuid,
        input: GenerateQuizInput,
    ) -> AppResult<GenerateQuizResponse> {
        if input.num_questions < 1 {
            return Err(AppError::InvalidInput(
                "Number of questions must be at least 1".to_string(),
            ));
        }
        if input.mcq > input.num_questions {
            return Err(AppError::InvalidInput(
                "MCQ count must be between 0 and total questions".to_string(),
            ));
        }

        let extension = file_extension(&input.file_name).ok_or_else(|| {
            AppError::InvalidInput(format!(
                "File type not allowed. Please use: {}",
                ALLOWED_EXTENSIONS.join(", ")
            ))
        })?;

        let text = content::extract(&input.file_bytes, &extension)
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        if text.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "No readable text content found in the file".to_string(),
            ));
        }

        log::info!(
            "generating quiz '{}' from {} ({} chars extracted)",
            input.name,
            input.file_name,
            text.len()
        );

        let prompt = quiz_prompt(&content::truncate_for_prompt(&text), input.mcq);
        let completion = self.llm.complete(&prompt).await?;

        let parsed = content::parse_questions(&completion);
        if parsed.is_empty() {
            return Err(AppError::InvalidInput(
                "No valid questions generated. Please try with different content.".to_string(),
            ));
        }

        let quiz = self
            .quizzes
            .insert_quiz(Quiz::new(&input.name, input.classroom_id, user_id))
            .await?;

        let questions: Vec<Question> = parsed
            .into_iter()
            .map(|p| Question::from_parsed(p, quiz.id))
            .collect();
        let generated = questions.len();
        self.quizzes.insert_questions(questions).await?;

        log::info!("quiz {} created with {} questions", quiz.id, generated);

        Ok(GenerateQuizResponse {
            status: "success",
            quiz_id: quiz.id,
            classroom_id: input.classroom_id,
            questions_generated: generated,
            details: GenerateQuizDetails {
                name: input.name,
                total_questions: input.num_questions,
                mcq_count: input.mcq,
                frq_count: input.frq,
                file_processed: input.file_name,
            },
        })
    }

    /// Quiz content for a classroom member. The answer key is included only
    /// for teachers, or for everyone once the quiz is completed.
    pub async fn fetch(
        &self,
        classroom_id: Uuid,
        quiz_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Vec<QuestionView>> {
        let membership = self
            .classrooms
            .find_membership(classroom_id, user_id)
            .await?
            .ok_or_else(|| AppError::Forbidden("Not a member of this classroom".to_string()))?;

        let quiz = self
            .quizzes
            .find_in_classroom(quiz_id, classroom_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Quiz not found".to_string()))?;

        let reveal_answers = membership.role == MemberRole::Teacher || quiz.is_completed;

        let questions = self.quizzes.questions_for_quiz(quiz_id).await?;
        Ok(questions
            .into_iter()
            .map(|q| QuestionView {
                question_text: q.question_text,
                options: q.options,
                correct_answer: reveal_answers.then_some(q.correct_answer),
            })
            .collect())
    }

    /// Grades and persists a submission, then marks the quiz completed.
    /// Re-submission is allowed and re-marks the flag idempotently.
    pub async fn submit(
        &self,
        quiz_id: Uuid,
        student_id: Uuid,
        answers: Vec<String>,
    ) -> AppResult<SubmitAnswersResponse> {
        let questions = self.quizzes.questions_for_quiz(quiz_id).await?;
        let correct: Vec<String> = questions.into_iter().map(|q| q.correct_answer).collect();

        let outcome = GradingService::grade(&correct, &answers);

        self.quizzes
            .insert_submission(crate::models::domain::Submission::new(
                student_id,
                quiz_id,
                answers.clone(),
                outcome.score,
            ))
            .await?;
        self.quizzes.mark_completed(quiz_id).await?;

        log::info!(
            "quiz {} graded for {}: {}/{}",
            quiz_id,
            student_id,
            outcome.score,
            outcome.total
        );

        Ok(SubmitAnswersResponse {
            status: "success",
            score: outcome.score,
            percentage: outcome.percentage,
            answer: answers,
            correct_answers: correct,
        })
    }
}

/// Lower-cased extension including the dot, e.g. `.pdf`. A dot-file like
/// `.txt` has no stem and is treated as extensionless.
fn file_extension(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let ext = format!(".{}", ext.to_lowercase());
    ALLOWED_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}
