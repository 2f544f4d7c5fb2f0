//! Command execution context
//!
//! Loads config, merges flag/env overrides and builds the ARM client so the
//! individual commands don't repeat that boilerplate.

use std::sync::Arc;

use log::warn;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::AzureClient;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Subscription the client is scoped to
    pub subscription_id: String,
    pub client: Arc<AzureClient>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is fine as long as the subscription and token
    /// come from flags or environment.
    ///
    /// # Errors
    /// Returns an error if no access token or subscription can be resolved.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_or_default(opts.config_ref())?;
        config.apply_env();
        config.validate_auth()?;

        let subscription_id = resolve_subscription(opts, &config)?;

        if config.is_token_expired() {
            warn!("Access token appears to be expired; requests will likely be rejected");
        }

        let access_token = config
            .access_token
            .clone()
            .ok_or(ConfigError::MissingAccessToken)?;
        let api_host = opts.api_host.clone().or_else(|| config.api_host.clone());

        let client = Arc::new(AzureClient::with_host(
            subscription_id.clone(),
            access_token,
            api_host,
        )?);

        Ok(Self {
            subscription_id,
            client,
            format: opts.format,
        })
    }
}

/// Flag/env override wins over the config file
fn resolve_subscription(opts: &GlobalOptions, config: &Config) -> Result<String> {
    opts.subscription_ref()
        .or(config.subscription_id.as_deref())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingSubscription.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(subscription: Option<&str>) -> GlobalOptions {
        GlobalOptions {
            format: OutputFormat::Table,
            config: None,
            subscription: subscription.map(str::to_string),
            api_host: None,
        }
    }

    #[test]
    fn test_subscription_flag_overrides_config() {
        let config = Config {
            subscription_id: Some("from-config".to_string()),
            ..Default::default()
        };

        assert_eq!(
            resolve_subscription(&opts(Some("from-flag")), &config).unwrap(),
            "from-flag"
        );
        assert_eq!(
            resolve_subscription(&opts(None), &config).unwrap(),
            "from-config"
        );
    }

    #[test]
    fn test_missing_subscription() {
        let err = resolve_subscription(&opts(None), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Subscription not configured"));
    }
}
