use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{removal_cookie, session_cookie, SessionToken},
    errors::AppError,
    models::dto::{
        request::{LoginBody, SignupBody},
        response::{LoginResponse, SignupResponse, StatusResponse, UserResponse},
    },
};

#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let session = state.account_service.sign_up(body).await?;

    let mut response = HttpResponse::Ok();
    // The auth service may withhold the token until email confirmation;
    // only set the session cookie when one was issued.
    if let Some(token) = &session.access_token {
        response.cookie(session_cookie(&state.cookie_signer, &state.config, token));
    }

    Ok(response.json(SignupResponse {
        status: "success",
        user_id: session.user.id,
    }))
}

#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let session = state
        .account_service
        .log_in(&body.email, &body.password)
        .await?;

    // log_in guarantees the token is present.
    let token = session.access_token.as_deref().unwrap_or_default();

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&state.cookie_signer, &state.config, token))
        .json(LoginResponse {
            status: "success",
            user_id: session.user.id,
        }))
}

#[post("/logout")]
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(removal_cookie(&state.config))
        .json(StatusResponse::success())
}

#[get("/user")]
pub async fn get_user(
    state: web::Data<AppState>,
    session: SessionToken,
) -> Result<HttpResponse, AppError> {
    let user = state.account_service.current_user(session.as_str()).await?;

    Ok(HttpResponse::Ok().json(UserResponse {
        status: "success",
        user,
    }))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
