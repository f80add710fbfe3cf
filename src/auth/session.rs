use std::future::{ready, Ready};

use actix_web::{
    cookie::{time, Cookie, SameSite},
    web, FromRequest, HttpRequest,
};

use crate::{auth::CookieSigner, config::Config, errors::AppError};

pub const SESSION_COOKIE: &str = "access_token";

/// The verified upstream access token, recovered from the signed session
/// cookie. Extraction fails with 401 when the cookie is missing, tampered
/// with, or older than the configured max age.
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for SessionToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(extract_session_token(req))
    }
}

fn extract_session_token(req: &HttpRequest) -> Result<SessionToken, AppError> {
    let signer = req
        .app_data::<web::Data<CookieSigner>>()
        .ok_or_else(|| AppError::Unauthenticated("Cookie signer not configured".to_string()))?;

    let cookie = req
        .cookie(SESSION_COOKIE)
        .ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_string()))?;

    signer
        .verify_default(cookie.value())
        .map(SessionToken)
        .map_err(|e| {
            log::debug!("session cookie rejected: {}", e);
            AppError::Unauthenticated("Not authenticated".to_string())
        })
}

/// Builds the signed session cookie set on signup and login.
pub fn session_cookie<'a>(signer: &CookieSigner, config: &Config, value: &str) -> Cookie<'a> {
    let mut builder = Cookie::build(SESSION_COOKIE, signer.sign(value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::seconds(config.cookie_max_age_secs));

    if let Some(domain) = &config.cookie_domain {
        builder = builder.domain(domain.clone());
    }

    builder.finish()
}

/// Builds an expired cookie with matching attributes so browsers drop the
/// session on logout.
pub fn removal_cookie<'a>(config: &Config) -> Cookie<'a> {
    let mut cookie = Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .finish();

    if let Some(domain) = &config.cookie_domain {
        cookie.set_domain(domain.clone());
    }

    cookie.make_removal();
    cookie
}
