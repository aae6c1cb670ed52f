use std::str::FromStr;

use folio_core::project::DEFAULT_PUBLIC_BASE_URL;
use folio_notify::TelegramConfig;

/// Default request body limit (25 MiB); images travel base64-encoded in JSON.
const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// What a create request reports when the project was stored but the
/// announcement could not be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyFailurePolicy {
    /// Report the delivery failure as a server error. The project stays stored.
    Strict,
    /// Log the delivery failure and report the creation as successful.
    BestEffort,
}

impl FromStr for NotifyFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "best-effort" | "best_effort" => Ok(Self::BestEffort),
            other => Err(format!(
                "unknown notify failure policy '{other}', expected 'strict' or 'best-effort'"
            )),
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. The bot
/// credentials default to empty strings and are never validated.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum accepted request body in bytes.
    pub max_body_bytes: usize,
    /// Public address prefix the bot API fetches images back from.
    pub public_base_url: String,
    /// Outcome of a create whose announcement failed.
    pub notify_failure_policy: NotifyFailurePolicy,
    /// Telegram channel settings.
    pub telegram: TelegramConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                     |
    /// |-------------------------|---------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                   |
    /// | `PORT`                  | `3000`                                      |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`                     |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                                        |
    /// | `MAX_BODY_BYTES`        | `26214400`                                  |
    /// | `PUBLIC_BASE_URL`       | `https://eyob-portfolio-backend.vercel.app` |
    /// | `NOTIFY_FAILURE_POLICY` | `strict`                                    |
    ///
    /// Telegram variables are documented on [`TelegramConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_body_bytes: usize = std::env::var("MAX_BODY_BYTES")
            .map(|v| v.parse().expect("MAX_BODY_BYTES must be a valid usize"))
            .unwrap_or(DEFAULT_MAX_BODY_BYTES);

        let public_base_url =
            std::env::var("PUBLIC_BASE_URL").unwrap_or_else(|_| DEFAULT_PUBLIC_BASE_URL.into());

        let notify_failure_policy = std::env::var("NOTIFY_FAILURE_POLICY")
            .map(|v| v.parse().unwrap_or_else(|e: String| panic!("{e}")))
            .unwrap_or(NotifyFailurePolicy::Strict);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            public_base_url,
            notify_failure_policy,
            telegram: TelegramConfig::from_env(),
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
