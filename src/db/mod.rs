use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// Minimal client for the PostgREST-style interface of the external database
/// service. All durable state lives there; this process holds nothing beyond
/// the request lifetime.
#[derive(Clone)]
pub struct Postgrest {
    http: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl Postgrest {
    pub fn new(config: &Config) -> Self {
        if HeaderValue::from_str(config.supabase_key.expose_secret()).is_err() {
            log::error!(
                "SUPABASE_KEY contains characters not allowed in an HTTP header; \
                 every database request will be sent unauthenticated"
            );
        }

        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/rest/v1", config.supabase_url.trim_end_matches('/')),
            api_key: config.supabase_key.clone(),
        }
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let key = self.api_key.expose_secret();
        if let Ok(value) = HeaderValue::from_str(key) {
            headers.insert("apikey", value);
        }
        if let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", key)) {
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
        headers
    }

    async fn check(response: reqwest::Response) -> AppResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Upstream(format!(
            "database request failed with {}: {}",
            status, body
        )))
    }

    /// `GET /{table}?{filters}`. Filters use PostgREST operator syntax,
    /// e.g. `("id", "eq.<uuid>")` or `("select", "role,joined_at")`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let response = self
            .http
            .get(format!("{}/{}", self.base_url, table))
            .headers(self.headers())
            .query(filters)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /{table}` returning the inserted representation.
    pub async fn insert<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> AppResult<Vec<T>> {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, table))
            .headers(self.headers())
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /{table}` discarding the representation.
    pub async fn insert_only<B: Serialize + Sync>(&self, table: &str, body: &B) -> AppResult<()> {
        let response = self
            .http
            .post(format!("{}/{}", self.base_url, table))
            .headers(self.headers())
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// `PATCH /{table}?{filters}`.
    pub async fn update<B: Serialize + Sync>(
        &self,
        table: &str,
        filters: &[(&str, String)],
        body: &B,
    ) -> AppResult<()> {
        let response = self
            .http
            .patch(format!("{}/{}", self.base_url, table))
            .headers(self.headers())
            .header("Prefer", "return=minimal")
            .query(filters)
            .json(body)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}

/// PostgREST equality filter value.
pub fn eq<T: std::fmt::Display>(value: T) -> String {
    format!("eq.{}", value)
}
