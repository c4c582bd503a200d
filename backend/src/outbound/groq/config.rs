//! Environment-driven settings for the Groq chat adapter.
//!
//! The API key is read once at startup and held in zeroizing memory. Only a
//! short fingerprint of it is ever logged.

use std::fmt;
use std::time::Duration;

use mockable::Env;
use reqwest::Url;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use zeroize::Zeroizing;

pub const API_KEY_ENV: &str = "GROQ_API_KEY";
pub const API_URL_ENV: &str = "GROQ_API_URL";
pub const TIMEOUT_ENV: &str = "GROQ_TIMEOUT_SECS";
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Bearer credential for the provider.
#[derive(Clone)]
pub struct ApiKey(Zeroizing<String>);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub(super) fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// First 8 bytes of the key's SHA-256 digest, hex encoded.
    ///
    /// # Examples
    /// ```
    /// use feedback_backend::outbound::groq::ApiKey;
    ///
    /// let fingerprint = ApiKey::new("gsk_example").fingerprint();
    /// assert_eq!(fingerprint.len(), 16);
    /// assert!(fingerprint.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.fingerprint()).finish()
    }
}

/// Settings for [`super::GroqHttpSource`].
#[derive(Debug, Clone)]
pub struct GroqSettings {
    /// `None` makes every request fail without touching the network.
    pub api_key: Option<ApiKey>,
    pub endpoint: Url,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

/// Errors raised while reading provider settings.
#[derive(Debug, thiserror::Error)]
pub enum GroqConfigError {
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Read provider settings from the environment.
///
/// A missing or blank key is tolerated with a warning; a malformed URL or
/// timeout is an error.
///
/// # Examples
/// ```
/// use feedback_backend::outbound::groq::groq_settings_from_env;
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "GROQ_API_KEY" => Some("gsk_example".to_owned()),
///     "GROQ_TIMEOUT_SECS" => Some("20".to_owned()),
///     _ => None,
/// });
///
/// let settings = groq_settings_from_env(&env).expect("valid settings");
/// assert!(settings.api_key.is_some());
/// assert_eq!(settings.timeout, Some(std::time::Duration::from_secs(20)));
/// ```
pub fn groq_settings_from_env<E: Env>(env: &E) -> Result<GroqSettings, GroqConfigError> {
    let api_key = api_key_from_env(env);
    let endpoint = endpoint_from_env(env)?;
    let timeout = timeout_from_env(env)?;

    match &api_key {
        Some(key) => info!(
            fingerprint = %key.fingerprint(),
            endpoint = %endpoint,
            "chat provider key loaded"
        ),
        None => warn!("{API_KEY_ENV} not set; assistant requests will fail"),
    }

    Ok(GroqSettings {
        api_key,
        endpoint,
        timeout,
    })
}

fn api_key_from_env<E: Env>(env: &E) -> Option<ApiKey> {
    let raw = Zeroizing::new(env.string(API_KEY_ENV)?);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(ApiKey::new(trimmed))
}

fn endpoint_from_env<E: Env>(env: &E) -> Result<Url, GroqConfigError> {
    let raw = env
        .string(API_URL_ENV)
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned());
    Url::parse(raw.trim()).map_err(|_| GroqConfigError::InvalidEnv {
        name: API_URL_ENV,
        value: raw,
        expected: "an absolute http(s) URL",
    })
}

fn timeout_from_env<E: Env>(env: &E) -> Result<Option<Duration>, GroqConfigError> {
    let Some(raw) = env.string(TIMEOUT_ENV) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(Some(Duration::from_secs(seconds))),
        _ => Err(GroqConfigError::InvalidEnv {
            name: TIMEOUT_ENV,
            value: raw,
            expected: "a positive number of seconds",
        }),
    }
}
