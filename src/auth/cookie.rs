use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Verification failures are reported distinctly but callers treat both as
/// "session absent".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CookieError {
    #[error("cookie signature is invalid")]
    BadSignature,
    #[error("cookie has expired")]
    Expired,
}

#[derive(Debug, Serialize, Deserialize)]
struct CookieClaims {
    /// The wrapped value (the upstream access token).
    sub: String,
    /// Issued-at, seconds since the epoch.
    iat: i64,
}

/// Wraps a value in a tamper-evident, time-stamped envelope suitable for an
/// HTTP cookie. The envelope is a compact HS256 JWS: forging or altering it
/// requires the server-held secret, and the embedded `iat` enforces a maximum
/// age at verification time.
#[derive(Clone)]
pub struct CookieSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    default_max_age: Duration,
}

impl CookieSigner {
    pub fn new(secret: &SecretString, default_max_age: Duration) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        // Expiry is enforced against `iat` and the caller-supplied max age,
        // not an `exp` claim, so stock exp validation is disabled.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
            default_max_age,
        }
    }

    pub fn default_max_age(&self) -> Duration {
        self.default_max_age
    }

    pub fn sign(&self, value: &str) -> String {
        self.sign_at(value, Utc::now().timestamp())
    }

    fn sign_at(&self, value: &str, issued_at: i64) -> String {
        let claims = CookieClaims {
            sub: value.to_string(),
            iat: issued_at,
        };

        // HS256 encoding only fails on a malformed key, which `from_secret`
        // cannot produce.
        encode(&Header::default(), &claims, &self.encoding_key)
            .unwrap_or_else(|e| unreachable!("HS256 cookie signing failed: {}", e))
    }

    pub fn verify(&self, token: &str, max_age: Duration) -> Result<String, CookieError> {
        let claims = decode::<CookieClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| CookieError::BadSignature)?;

        let age = Utc::now().timestamp() - claims.iat;
        if age > max_age.num_seconds() {
            return Err(CookieError::Expired);
        }

        Ok(claims.sub)
    }

    pub fn verify_default(&self, token: &str) -> Result<String, CookieError> {
        self.verify(token, self.default_max_age)
    }
}
