//! CLI command definitions and handlers

use clap::{Parser, Subcommand};

pub mod args;
pub mod context;
pub mod init;
pub mod name;
pub mod status;
pub mod webhook;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// acrhook - container registry webhooks for Azure App Service deployments
#[derive(Parser, Debug)]
#[command(name = "acrhook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "ACRHOOK_FORMAT",
        default_value = "table",
        hide_env = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "ACRHOOK_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override default Azure subscription
    #[arg(long, global = true, env = "ACRHOOK_SUBSCRIPTION_ID", hide_env = true)]
    pub subscription: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ACRHOOK_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Azure Resource Manager endpoint (sovereign clouds, testing)
    #[arg(long, global = true, env = "ACRHOOK_API_HOST", hide = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize acrhook configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Print a generated webhook name for an app without creating anything
    Name {
        /// Web app name the webhook name is derived from
        app_name: String,
    },

    /// Manage registry webhooks
    #[command(subcommand)]
    Webhook(WebhookCommands),
}

/// Webhook subcommands
#[derive(Subcommand, Debug)]
pub enum WebhookCommands {
    /// Create a push webhook that redeploys a web app
    Create(CreateArgs),

    /// List webhooks on an Azure Container Registry
    List {
        /// Registry name (without .azurecr.io)
        #[arg(long)]
        registry: String,

        /// Resource group of the registry
        #[arg(long)]
        resource_group: String,
    },
}

/// Arguments for `webhook create`
#[derive(Debug, Clone, clap::Args)]
pub struct CreateArgs {
    /// Web app (App Service site) name
    #[arg(long)]
    pub site: String,

    /// Resource group of the web app
    #[arg(long)]
    pub site_resource_group: String,

    /// Image the web app runs, e.g. contoso.azurecr.io/widgets:v1 or acme/widgets
    #[arg(long)]
    pub image: String,

    /// Resource group of the Azure Container Registry (ACR images only)
    #[arg(long)]
    pub registry_resource_group: Option<String>,

    /// Registry location; looked up when omitted (ACR images only)
    #[arg(long)]
    pub location: Option<String>,

    /// Print Docker Hub instructions without prompting
    #[arg(long)]
    pub no_prompt: bool,

    /// Print the web app callback URI (contains credentials) for Docker Hub setup
    #[arg(long)]
    pub show_callback_uri: bool,
}
