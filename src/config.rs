use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::signals::classifier::DEFAULT_CLASSIFIER_URL;
use crate::signals::gemini::{DEFAULT_GEMINI_MODEL, DEFAULT_GEMINI_URL};

/// Where audit records go.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditBackend {
    /// SQLite file at `db_path` (default)
    Sqlite,
    /// Structured log lines only, nothing persisted
    Log,
}

/// Runtime settings, read from the environment once per command.
///
/// The Gemini key only ever comes from `GEMINI_API_KEY`; `main` loads a
/// `.env` file first so local setups can keep it there.
pub struct Config {
    pub db_path: String,
    pub audit_backend: AuditBackend,
    /// Base URL of the classifier service (`/predict` is appended)
    pub classifier_url: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_url: String,
    /// Lexicon override file; the built-in list is used when unset
    pub lexicon_path: Option<PathBuf>,
    /// Overall deadline for one moderation request
    pub request_timeout: Duration,
    /// Per-call HTTP timeout for each signal client
    pub signal_timeout: Duration,
}

impl Config {
    /// Read every setting, applying defaults.
    ///
    /// Everything has a default except the Gemini API key, which is only
    /// checked (via `require_judge`) by commands that call the judge.
    pub fn load() -> Result<Self> {
        let audit_backend = match env::var("KREOLGUARD_AUDIT").as_deref() {
            Ok("log") => AuditBackend::Log,
            // "sqlite" or unset both default to SQLite
            _ => AuditBackend::Sqlite,
        };

        Ok(Self {
            db_path: env::var("KREOLGUARD_DB_PATH")
                .unwrap_or_else(|_| "./kreolguard.db".to_string()),
            audit_backend,
            classifier_url: env::var("CLASSIFIER_API_URL")
                .unwrap_or_else(|_| DEFAULT_CLASSIFIER_URL.to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_URL.to_string()),
            lexicon_path: env::var("KREOLGUARD_LEXICON_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            request_timeout: secs_var("KREOLGUARD_REQUEST_TIMEOUT_SECS", 30)?,
            signal_timeout: secs_var("KREOLGUARD_SIGNAL_TIMEOUT_SECS", 20)?,
        })
    }

    /// Check that the Gemini API key is configured.
    /// Call this before any operation that needs the judge.
    pub fn require_judge(&self) -> Result<()> {
        if self.gemini_api_key.is_empty() {
            anyhow::bail!(
                "GEMINI_API_KEY not set. Add it to your .env file.\n\
                 See .env.example for the required variables."
            );
        }
        Ok(())
    }
}

/// Read a whole-seconds duration, falling back to `default` when unset.
fn secs_var(name: &str, default: u64) -> Result<Duration> {
    match env::var(name) {
        Ok(value) => parse_secs(name, &value),
        Err(_) => Ok(Duration::from_secs(default)),
    }
}

fn parse_secs(name: &str, value: &str) -> Result<Duration> {
    let secs: u64 = value
        .trim()
        .parse()
        .with_context(|| format!("{name} must be a whole number of seconds, got {value:?}"))?;
    if secs == 0 {
        anyhow::bail!("{name} must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secs() {
        assert_eq!(parse_secs("X", " 15 ").unwrap(), Duration::from_secs(15));
    }

    #[test]
    fn test_parse_secs_rejects_zero_and_garbage() {
        assert!(parse_secs("X", "0").is_err());
        let err = parse_secs("KREOLGUARD_REQUEST_TIMEOUT_SECS", "soon").unwrap_err();
        assert!(err.to_string().contains("KREOLGUARD_REQUEST_TIMEOUT_SECS"));
    }

    #[test]
    fn test_require_judge_without_key() {
        let config = Config {
            db_path: "./kreolguard.db".to_string(),
            audit_backend: AuditBackend::Log,
            classifier_url: DEFAULT_CLASSIFIER_URL.to_string(),
            gemini_api_key: String::new(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_url: DEFAULT_GEMINI_URL.to_string(),
            lexicon_path: None,
            request_timeout: Duration::from_secs(30),
            signal_timeout: Duration::from_secs(20),
        };
        let err = config.require_judge().unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }
}
