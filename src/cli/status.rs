//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::{ACCESS_TOKEN_ENV, Config};
use crate::error::{ConfigError, Error, Result};

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "acrhook Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let mut config = match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(Error::Config(ConfigError::NotFound)) => {
            println!(
                "{} No config file at {}",
                "⚠".yellow(),
                config_path.display()
            );
            println!("  → Run 'acrhook init' to configure");
            Config::default()
        }
        Err(e) => return Err(e),
    };
    let stored_token = config.access_token.is_some();
    config.apply_env();

    println!();

    match opts.subscription_ref().or(config.subscription_id.as_deref()) {
        Some(subscription) => println!("Subscription: {}", subscription.bold()),
        None => println!("{} Subscription not configured", "✗".red()),
    }

    if config.access_token.is_none() {
        println!("{} Access token not configured", "✗".red());
        return Ok(());
    }

    if !stored_token {
        println!("{} Access token from {}", "✓".green(), ACCESS_TOKEN_ENV);
    } else {
        println!("{} Access token configured", "✓".green());
    }

    match config.token_expires_at() {
        Some(expires_at) if config.is_token_expired() => println!(
            "{} Token expired or expiring (at {})",
            "⚠".yellow(),
            expires_at.to_rfc3339()
        ),
        Some(expires_at) => {
            let remaining = expires_at.signed_duration_since(chrono::Utc::now());
            println!(
                "  Token valid for {}h {}m",
                remaining.num_hours(),
                remaining.num_minutes() % 60
            );
        }
        None => println!("  Token expiry unknown (not a JWT)"),
    }

    if let Some(host) = opts.api_host.as_deref().or(config.api_host.as_deref()) {
        println!("  API host: {}", host);
    }

    Ok(())
}
