use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupBody {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    pub image_url: Option<String>,
    pub pronouns: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginBody {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ClassroomCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinClassroomRequest {
    pub classroom_id: Uuid,
}

/// Multipart payload for quiz generation: the source document plus the quiz
/// parameters.
#[derive(Debug, MultipartForm)]
pub struct GenerateQuizForm {
    #[multipart(limit = "10MB")]
    pub file: Bytes,
    pub name: Text<String>,
    pub num_questions: Text<u32>,
    pub mcq: Text<u32>,
    pub frq: Option<Text<u32>>,
    pub classroom_id: Text<Uuid>,
}
