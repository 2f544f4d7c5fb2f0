//! Global CLI options shared across all commands
//!
//! Precedence for every option is: CLI flag > environment variable > config
//! file > default. This struct captures the flag/env layer; the config file
//! is merged in `CommandContext`.

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub format: OutputFormat,

    /// Custom config file path (defaults to ~/.acrhook/config.yaml)
    pub config: Option<String>,

    /// Subscription ID override
    pub subscription: Option<String>,

    /// Management endpoint override
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Build from the parsed CLI, once, in main.rs
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            subscription: cli.subscription.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn subscription_ref(&self) -> Option<&str> {
        self.subscription.as_deref()
    }
}
