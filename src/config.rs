use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

/// Gemini endpoint, credentials and the two model ids used by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    pub api_url: String,
    pub api_key: String,
    pub question_model: String,
    pub feedback_model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
    pub gemini: GeminiConfig,
    pub client_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = require_env("DATABASE_URL")?;
        let database_max_connections = parse_env("DATABASE_MAX_CONNECTIONS", 10)?;
        let jwt = JwtConfig {
            secret: require_env("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "mockinterview".into()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "mockinterview-users".into()),
            ttl_minutes: check_ttl(parse_env("JWT_TTL_MINUTES", 60 * 24 * 7)?)?,
        };
        let gemini = GeminiConfig {
            api_url: std::env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into()),
            api_key: require_env("GEMINI_API_KEY")?,
            question_model: std::env::var("GEMINI_QUESTION_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".into()),
            feedback_model: std::env::var("GEMINI_FEEDBACK_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-lite".into()),
            timeout_secs: parse_env("GEMINI_TIMEOUT_SECS", 60)?,
        };
        let client_url = std::env::var("CLIENT_URL").ok().filter(|v| !v.is_empty());
        Ok(Self {
            database_url,
            database_max_connections,
            jwt,
            gemini,
            client_url,
        })
    }
}

/// Upper bound for `JWT_TTL_MINUTES`: one year.
pub const MAX_JWT_TTL_MINUTES: i64 = 60 * 24 * 365;

fn check_ttl(minutes: i64) -> anyhow::Result<i64> {
    if !(1..=MAX_JWT_TTL_MINUTES).contains(&minutes) {
        anyhow::bail!("JWT_TTL_MINUTES must be between 1 and {MAX_JWT_TTL_MINUTES}, got {minutes}");
    }
    Ok(minutes)
}

fn require_env(key: &str) -> anyhow::Result<String> {
    std::env::var(key).with_context(|| format!("required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(v) => v
            .parse::<T>()
            .with_context(|| format!("environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ttl_must_be_positive_and_bounded() {
        assert_eq!(check_ttl(60 * 24 * 7).unwrap(), 10080);
        assert_eq!(check_ttl(MAX_JWT_TTL_MINUTES).unwrap(), MAX_JWT_TTL_MINUTES);
        assert!(check_ttl(0).is_err());
        assert!(check_ttl(-5).is_err());
        assert!(check_ttl(i64::MAX).is_err());
    }
}
