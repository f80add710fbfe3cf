use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Identity as reported by the external auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Result of a signup or password login. The auth service may withhold the
/// access token on signup (e.g. pending email confirmation).
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: AuthUser,
    pub access_token: Option<String>,
}

/// External identity provider. All user credentials and bearer tokens are
/// owned by this service; we only relay them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthSession>;
    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession>;
    async fn get_user(&self, access_token: &str) -> AppResult<AuthUser>;
}

/// GoTrue-style REST client (Supabase auth).
pub struct SupabaseAuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "error_description", alias = "message")]
    msg: Option<String>,
}

impl SupabaseAuthClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            api_key: config.supabase_key.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        let msg = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.msg)
            .unwrap_or_else(|| "auth service request failed".to_string());
        format!("{} ({})", msg, status)
    }

    /// The signup payload either nests the user under a session envelope or
    /// is the bare user object, depending on whether confirmation is needed.
    fn parse_session(body: serde_json::Value) -> AppResult<AuthSession> {
        let access_token = body
            .get("access_token")
            .and_then(|t| t.as_str())
            .map(str::to_string);

        let user_value = body.get("user").cloned().unwrap_or(body);
        let user: AuthUser = serde_json::from_value(user_value)?;

        Ok(AuthSession { user, access_token })
    }
}

#[async_trait]
impl AuthClient for SupabaseAuthClient {
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let response = self
            .http
            .post(self.endpoint("/signup"))
            .header("apikey", self.api_key.expose_secret())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::InvalidInput(Self::error_message(response).await));
        }

        Self::parse_session(response.json().await?)
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let response = self
            .http
            .post(self.endpoint("/token?grant_type=password"))
            .header("apikey", self.api_key.expose_secret())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Unauthenticated(
                Self::error_message(response).await,
            ));
        }

        Self::parse_session(response.json().await?)
    }

    async fn get_user(&self, access_token: &str) -> AppResult<AuthUser> {
        let response = self
            .http
            .get(self.endpoint("/user"))
            .header("apikey", self.api_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Unauthenticated("Invalid token".to_string()));
        }

        Ok(response.json().await?)
    }
}
