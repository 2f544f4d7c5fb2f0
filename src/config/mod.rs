//! Configuration management for acrhook

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Environment variable that overrides the stored access token
pub const ACCESS_TOKEN_ENV: &str = "ACRHOOK_ACCESS_TOKEN";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default Azure subscription ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,

    /// Azure Resource Manager bearer token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    /// Management endpoint override (sovereign clouds, testing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".acrhook").join("config.yaml"))
    }

    /// Resolve an optional override into a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional path, falling back to the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration, treating a missing file as empty.
    ///
    /// Commands that can run purely from flags and environment use this so a
    /// first run works without `acrhook init`.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match Self::load_at(path) {
            Ok(config) => Ok(config),
            Err(crate::error::Error::Config(ConfigError::NotFound)) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Save configuration to an optional path, falling back to the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds a bearer token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Apply environment overrides on top of the file contents
    pub fn apply_env(&mut self) {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            if !token.trim().is_empty() {
                self.access_token = Some(token.trim().to_string());
            }
        }
    }

    /// Expiry of the configured access token, if it is a readable JWT
    pub fn token_expires_at(&self) -> Option<DateTime<Utc>> {
        self.access_token.as_deref().and_then(jwt_expiry)
    }

    /// Check if the access token is expired or will expire soon (within 5 minutes).
    ///
    /// Opaque tokens without an `exp` claim are assumed valid; the API decides.
    pub fn is_token_expired(&self) -> bool {
        match (&self.access_token, self.token_expires_at()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(_), Some(expires_at)) => {
                let buffer = chrono::Duration::minutes(5);
                expires_at - buffer < Utc::now()
            }
        }
    }

    /// Validate that an access token is present
    pub fn validate_auth(&self) -> Result<()> {
        if self.access_token.is_none() {
            return Err(ConfigError::MissingAccessToken.into());
        }
        Ok(())
    }
}

/// Decode base64url (URL-safe base64 without padding)
fn base64_decode_url(input: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    use base64::{Engine as _, engine::general_purpose};

    general_purpose::URL_SAFE_NO_PAD.decode(input.trim_end_matches('='))
}

/// Read the `exp` claim from a JWT without verifying it
fn jwt_expiry(token: &str) -> Option<DateTime<Utc>> {
    #[derive(Deserialize)]
    struct JwtPayload {
        exp: i64,
    }

    // header.payload.signature
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload_bytes = base64_decode_url(parts[1]).ok()?;
    let payload: JwtPayload = serde_json::from_slice(&payload_bytes).ok()?;
    DateTime::from_timestamp(payload.exp, 0)
}
