use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_key: SecretString,
    pub cookie_secret: SecretString,
    pub cookie_max_age_secs: i64,
    pub cookie_domain: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    pub llm_api_base: String,
    pub llm_api_key: SecretString,
    pub llm_model: String,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| "http://localhost:54321".to_string()),
            supabase_key: SecretString::from(
                env::var("SUPABASE_KEY").unwrap_or_else(|_| "supabase_key".to_string()),
            ),
            cookie_secret: SecretString::from(
                env::var("SECRET_KEY")
                    .unwrap_or_else(|_| "dev_secret_key_change_in_production".to_string()),
            ),
            cookie_max_age_secs: env::var("COOKIE_MAX_AGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(604_800), // 7 days
            cookie_domain: env::var("COOKIE_DOMAIN").ok().filter(|d| !d.is_empty()),
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3000".to_string())
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            llm_api_base: env::var("LLM_API_BASE")
                .unwrap_or_else(|_| "http://localhost:11434/v1".to_string()),
            llm_api_key: SecretString::from(
                env::var("LLM_API_KEY").unwrap_or_else(|_| "ollama".to_string()),
            ),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-oss:120b".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        let cookie_secret = self.cookie_secret.expose_secret();

        if cookie_secret == "dev_secret_key_change_in_production" {
            panic!(
                "FATAL: SECRET_KEY is using default value! Set SECRET_KEY environment variable to a secure random string."
            );
        }

        if cookie_secret.len() < 32 {
            panic!(
                "FATAL: SECRET_KEY is too short ({}). Must be at least 32 characters for security.",
                cookie_secret.len()
            );
        }

        if self.supabase_key.expose_secret() == "supabase_key" {
            panic!("FATAL: SUPABASE_KEY is using default value! Set SUPABASE_KEY environment variable.");
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_key: SecretString::from("test_supabase_key".to_string()),
            cookie_secret: SecretString::from("test_cookie_secret_key".to_string()),
            cookie_max_age_secs: 604_800,
            cookie_domain: None,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            llm_api_base: "http://localhost:11434/v1".to_string(),
            llm_api_key: SecretString::from("ollama".to_string()),
            llm_model: "test-model".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
