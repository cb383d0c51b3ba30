//! Host configuration parsed from environment variables.

use panel::net::types::{BackendConfig, BackendKind};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_STORE_BASE_URL: &str = "https://firestore.googleapis.com/v1";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required variable {var}")]
    Missing { var: &'static str },
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub backend: BackendConfig,
}

impl ServerConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PANEL_BACKEND`: `firebase` (default) or `memory`
    /// - `FIREBASE_AUTH_BASE_URL`, `FIRESTORE_BASE_URL`: public Google endpoints
    ///
    /// Required when the backend is `firebase`:
    /// - `FIREBASE_API_KEY`
    /// - `FIREBASE_PROJECT_ID`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid { var: "PORT", value: raw })?,
            None => DEFAULT_PORT,
        };

        let kind = parse_backend(lookup("PANEL_BACKEND").as_deref())?;
        let required = |var: &'static str| match kind {
            BackendKind::Firebase => lookup(var)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing { var }),
            BackendKind::Memory => Ok(lookup(var).unwrap_or_default()),
        };
        let api_key = required("FIREBASE_API_KEY")?;
        let project_id = required("FIREBASE_PROJECT_ID")?;

        let base_url = |var: &str, default: &str| {
            lookup(var)
                .unwrap_or_else(|| default.to_owned())
                .trim_end_matches('/')
                .to_owned()
        };

        Ok(Self {
            port,
            backend: BackendConfig {
                backend: kind,
                api_key,
                project_id,
                auth_base_url: base_url("FIREBASE_AUTH_BASE_URL", DEFAULT_AUTH_BASE_URL),
                store_base_url: base_url("FIRESTORE_BASE_URL", DEFAULT_STORE_BASE_URL),
            },
        })
    }
}

fn parse_backend(raw: Option<&str>) -> Result<BackendKind, ConfigError> {
    match raw.map(str::trim).unwrap_or("firebase") {
        "firebase" => Ok(BackendKind::Firebase),
        "memory" => Ok(BackendKind::Memory),
        other => Err(ConfigError::Invalid { var: "PANEL_BACKEND", value: other.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
