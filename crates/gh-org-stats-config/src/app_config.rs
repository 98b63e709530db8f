//! Run configuration
//!
//! All parameters come from environment variables. A `.env` file in the
//! working directory is loaded first when present; variables already set in
//! the environment take precedence over it.

use crate::paths::default_output_path;
use chrono::{DateTime, NaiveDate, Utc};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub const ACCESS_TOKEN_VAR: &str = "GITHUB_ACCESS_TOKEN";
pub const ORGANIZATION_VAR: &str = "GITHUB_ORGANIZATION_NAME";
pub const SINCE_VAR: &str = "STATISTICS_SINCE_TIMESTAMP";
pub const LABEL_VAR: &str = "STATISTICS_LABEL";
pub const OUTPUT_FILE_VAR: &str = "STATISTICS_OUTPUT_FILE";
pub const REQUESTS_MAX_VAR: &str = "GITHUB_REQUESTS_MAX";
pub const API_URL_VAR: &str = "GITHUB_API_URL";

/// Default maximum number of concurrent GitHub requests
pub const DEFAULT_REQUESTS_MAX: usize = 100;

/// Invalid or incomplete configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set. Please set it or create a .env file.")]
    Missing(&'static str),

    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration of one statistics run
#[derive(Clone)]
pub struct StatsConfig {
    /// Bearer token attached to every request
    pub access_token: String,
    /// Organization whose repositories are scanned
    pub organization: String,
    /// Only count pull requests created at or after this instant
    pub since: Option<DateTime<Utc>>,
    /// Only count pull requests carrying this label
    pub label: Option<String>,
    /// Output log, doubles as resume state
    pub output_file: PathBuf,
    /// Maximum number of requests in flight
    pub max_in_flight: usize,
    /// API base URI override (GitHub Enterprise)
    pub api_url: Option<String>,
}

impl fmt::Debug for StatsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatsConfig")
            .field("access_token", &"<redacted>")
            .field("organization", &self.organization)
            .field("since", &self.since)
            .field("label", &self.label)
            .field("output_file", &self.output_file)
            .field("max_in_flight", &self.max_in_flight)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl StatsConfig {
    /// Load `.env` if present, then read the configuration from the environment
    pub fn load() -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => {
                log::debug!("Loaded .env file from: {:?}", path);
            }
            Err(_) => {
                log::debug!(".env file not found, will rely on environment variables");
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = get(ACCESS_TOKEN_VAR).ok_or(ConfigError::Missing(ACCESS_TOKEN_VAR))?;
        let organization = get(ORGANIZATION_VAR).ok_or(ConfigError::Missing(ORGANIZATION_VAR))?;

        let since = get(SINCE_VAR)
            .map(|value| {
                parse_since(&value).map_err(|reason| ConfigError::Invalid {
                    var: SINCE_VAR,
                    value,
                    reason,
                })
            })
            .transpose()?;

        let max_in_flight = match get(REQUESTS_MAX_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(max) if max > 0 => max,
                _ => {
                    return Err(ConfigError::Invalid {
                        var: REQUESTS_MAX_VAR,
                        value,
                        reason: "expected a positive integer".to_string(),
                    })
                }
            },
            None => DEFAULT_REQUESTS_MAX,
        };

        Ok(Self {
            access_token,
            organization,
            since,
            label: get(LABEL_VAR),
            output_file: get(OUTPUT_FILE_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_output_path),
            max_in_flight,
            api_url: get(API_URL_VAR),
        })
    }
}

/// Parse the `since` filter
///
/// Accepts an RFC 3339 timestamp (`2024-01-31T08:00:00Z`) or a plain date
/// (`2024-01-31`), the latter meaning midnight UTC.
pub fn parse_since(value: &str) -> Result<DateTime<Utc>, String> {
    let value = value.trim();

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| "expected an RFC 3339 timestamp or a YYYY-MM-DD date".to_string())
}
