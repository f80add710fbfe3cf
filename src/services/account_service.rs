use std::sync::Arc;

use crate::{
    clients::{AuthClient, AuthSession, AuthUser},
    errors::{AppError, AppResult},
    models::{
        domain::Profile,
        dto::{request::SignupBody, response::UserView},
    },
    repositories::ProfileRepository,
};

/// Signup, login, and session-token resolution. Credentials live in the
/// external auth service; this service only bridges it to profile rows.
pub struct AccountService {
    auth: Arc<dyn AuthClient>,
    profiles: Arc<dyn ProfileRepository>,
}

impl AccountService {
    pub fn new(auth: Arc<dyn AuthClient>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { auth, profiles }
    }

    /// Registers the user with the auth service, then stores the profile row
    /// under the auth-assigned id. Returns the session so the handler can set
    /// the cookie when the auth service issued a token immediately.
    pub async fn sign_up(&self, body: SignupBody) -> AppResult<AuthSession> {
        let session = self.auth.sign_up(&body.email, &body.password).await?;

        let profile = Profile {
            id: session.user.id,
            first_name: body.first_name,
            last_name: body.last_name,
            image_url: body.image_url,
            pronouns: body.pronouns,
        };
        self.profiles.insert(profile).await?;

        log::info!("signed up user {}", session.user.id);
        Ok(session)
    }

    pub async fn log_in(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let session = self.auth.sign_in_with_password(email, password).await?;

        if session.access_token.is_none() {
            return Err(AppError::Unauthenticated(
                "Login did not produce a session".to_string(),
            ));
        }

        log::info!("login successful for user {}", session.user.id);
        Ok(session)
    }

    /// Resolves a verified cookie's access token to the auth-service user.
    pub async fn resolve_user(&self, access_token: &str) -> AppResult<AuthUser> {
        self.auth.get_user(access_token).await
    }

    /// The authenticated user's identity merged with their profile row.
    /// A missing profile is not an error; its fields come back null.
    pub async fn current_user(&self, access_token: &str) -> AppResult<UserView> {
        let user = self.auth.get_user(access_token).await?;
        let profile = self.profiles.find_by_id(user.id).await?;

        Ok(match profile {
            Some(p) => UserView {
                id: user.id,
                email: user.email.unwrap_or_default(),
                first_name: Some(p.first_name),
                last_name: Some(p.last_name),
                image_url: p.image_url,
                pronouns: p.pronouns,
                created_at: user.created_at,
            },
            None => UserView {
                id: user.id,
                email: user.email.unwrap_or_default(),
                first_name: None,
                last_name: None,
                image_url: None,
                pronouns: None,
                created_at: user.created_at,
            },
        })
    }
}
