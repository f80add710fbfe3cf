use actix_multipart::form::MultipartForm;
use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    auth::SessionToken,
    errors::AppError,
    models::dto::request::GenerateQuizForm,
    services::GenerateQuizInput,
};

#[get("/classroom/{classroom_id}/quiz/{quiz_id}")]
pub async fn fetch_quiz(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, Uuid)>,
    session: SessionToken,
) -> Result<HttpResponse, AppError> {
    let (classroom_id, quiz_id) = path.into_inner();
    let user = state.account_service.resolve_user(session.as_str()).await?;

    let questions = state
        .quiz_service
        .fetch(classroom_id, quiz_id, user.id)
        .await?;

    Ok(HttpResponse::Ok().json(questions))
}

/// Answers arrive as a comma-separated letter list in the path, one entry
/// per question position.
#[post("/results/{quiz_id}/answers/{answer}")]
pub async fn submit_quiz_results(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
    session: SessionToken,
) -> Result<HttpResponse, AppError> {
    let (quiz_id, answer) = path.into_inner();
    let user = state.account_service.resolve_user(session.as_str()).await?;

    let answers: Vec<String> = answer.split(',').map(str::to_string).collect();
    let result = state.quiz_service.submit(quiz_id, user.id, answers).await?;

    Ok(HttpResponse::Ok().json(result))
}

#[post("/generate-quiz")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<GenerateQuizForm>,
    session: SessionToken,
) -> Result<HttpResponse, AppError> {
    let user = state.account_service.resolve_user(session.as_str()).await?;

    let file_name = form
        .file
        .file_name
        .clone()
        .ok_or_else(|| AppError::InvalidInput("Uploaded file has no name".to_string()))?;

    let input = GenerateQuizInput {
        file_name,
        file_bytes: form.file.data.to_vec(),
        name: form.name.into_inner(),
        num_questions: form.num_questions.into_inner(),
        mcq: form.mcq.into_inner(),
        frq: form.frq.map(|f| f.into_inner()).unwrap_or(0),
        classroom_id: form.classroom_id.into_inner(),
    };

    let response = state.quiz_service.generate(user.id, input).await?;
    Ok(HttpResponse::Ok().json(response))
}
