use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{MemberRole, Profile, Quiz};

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn success() -> Self {
        StatusResponse { status: "success" }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    pub status: &'static str,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub user_id: Uuid,
}

/// Teacher identity attached to classroom payloads. Profile fields are null
/// when the teacher has no profile row.
#[derive(Debug, Clone, Serialize)]
pub struct TeacherInfo {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub pronouns: Option<String>,
}

impl TeacherInfo {
    pub fn from_profile(teacher_id: Uuid, profile: Option<Profile>) -> Self {
        match profile {
            Some(p) => TeacherInfo {
                id: teacher_id,
                first_name: Some(p.first_name),
                last_name: Some(p.last_name),
                image_url: p.image_url,
                pronouns: p.pronouns,
            },
            None => TeacherInfo {
                id: teacher_id,
                first_name: None,
                last_name: None,
                image_url: None,
                pronouns: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomView {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub teacher: TeacherInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomResponse {
    pub status: &'static str,
    pub classroom: ClassroomView,
}

#[derive(Debug, Clone, Serialize)]
pub struct JoinClassroomResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub classroom: ClassroomView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomListEntry {
    pub id: Uuid,
    pub name: String,
    pub role: MemberRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
    pub teacher: TeacherInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomsResponse {
    pub status: &'static str,
    pub classrooms: Vec<ClassroomListEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberView {
    pub user_id: Uuid,
    pub role: MemberRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub pronouns: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassroomDetailResponse {
    pub status: &'static str,
    pub classroom: ClassroomView,
    pub quizzes: Vec<Quiz>,
    pub members: Vec<MemberView>,
    pub your_role: MemberRole,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentsResponse {
    pub status: &'static str,
    pub students: Vec<MemberView>,
    pub total_students: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
    pub pronouns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub status: &'static str,
    pub user: UserView,
}

/// Question as exposed to quiz fetchers. `correct_answer` is present only for
/// teachers, or for anyone once the quiz is completed.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub question_text: String,
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizDetails {
    pub name: String,
    pub total_questions: u32,
    pub mcq_count: u32,
    pub frq_count: u32,
    pub file_processed: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizResponse {
    pub status: &'static str,
    pub quiz_id: Uuid,
    pub classroom_id: Uuid,
    pub questions_generated: usize,
    pub details: GenerateQuizDetails,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswersResponse {
    pub status: &'static str,
    pub score: u32,
    pub percentage: f64,
    pub answer: Vec<String>,
    pub correct_answers: Vec<String>,
}
