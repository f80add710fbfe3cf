use actix_web::{get, post, web, HttpResponse};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::SessionToken,
    errors::AppError,
    models::dto::{
        request::{ClassroomCreate, JoinClassroomRequest},
        response::{ClassroomResponse, ClassroomsResponse, JoinClassroomResponse, StudentsResponse},
    },
};

#[post("/classroom")]
pub async fn create_classroom(
    state: web::Data<AppState>,
    body: web::Json<ClassroomCreate>,
    session: SessionToken,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let user = state.account_service.resolve_user(session.as_str()).await?;
    let classroom = state.classroom_service.create(&body.name, user.id).await?;

    Ok(HttpResponse::Ok().json(ClassroomResponse {
        status: "success",
        classroom,
    }))
}

#[post("/classroom/join")]
pub async fn join_classroom(
    state: web::Data<AppState>,
    body: web::Json<JoinClassroomRequest>,
    session: SessionToken,
) -> Result<HttpResponse, AppError> {
    let user = state.account_service.resolve_user(session.as_str()).await?;
    let classroom = state
        .classroom_service
        .join(body.classroom_id, user.id)
        .await?;

    Ok(HttpResponse::Ok().json(JoinClassroomResponse {
        status: "success",
        message: "Successfully joined classroom",
        classroom,
    }))
}

#[get("/classrooms")]
pub async fn get_my_classrooms(
    state: web::Data<AppState>,
    session: SessionToken,
) -> Result<HttpResponse, AppError> {
    let user = state.account_service.resolve_user(session.as_str()).await?;
    let classrooms = state.classroom_service.list_for_user(user.id).await?;

    Ok(HttpResponse::Ok().json(ClassroomsResponse {
        status: "success",
        classrooms,
    }))
}

#[get("/classroom/{classroom_id}")]
pub async fn get_classroom_details(
    state: web::Data<AppState>,
    classroom_id: web::Path<Uuid>,
    session: SessionToken,
) -> Result<HttpResponse, AppError> {
    let user = state.account_service.resolve_user(session.as_str()).await?;
    let detail = state
        .classroom_service
        .detail(classroom_id.into_inner(), user.id)
        .await?;

    Ok(HttpResponse::Ok().json(detail))
}

#[get("/classroom/{classroom_id}/students")]
pub async fn get_classroom_students(
    state: web::Data<AppState>,
    classroom_id: web::Path<Uuid>,
    session: SessionToken,
) -> Result<HttpResponse, AppError> {
    let user = state.account_service.resolve_user(session.as_str()).await?;
    let students = state
        .classroom_service
        .students(classroom_id.into_inner(), user.id)
        .await?;

    Ok(HttpResponse::Ok().json(StudentsResponse {
        status: "success",
        total_students: students.len(),
        students,
    }))
}
