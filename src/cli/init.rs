//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Stores a default subscription and an ARM access token (for example the
/// output of `az account get-access-token --query accessToken -o tsv`).
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to acrhook!".bold().green());
    println!("Let's set up your Azure configuration.\n");

    let mut config = Config::load_or_default(opts.config_ref())?;
    let theme = ColorfulTheme::default();

    let mut subscription = Input::<String>::with_theme(&theme)
        .with_prompt("Azure subscription ID")
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            if input.trim().is_empty() {
                Err("Subscription ID cannot be empty")
            } else {
                Ok(())
            }
        });
    if let Some(existing) = opts.subscription_ref().or(config.subscription_id.as_deref()) {
        subscription = subscription.default(existing.to_string());
    }
    let subscription_id = subscription.interact_text()?;

    let access_token: String = Password::with_theme(&theme)
        .with_prompt("Azure Resource Manager access token")
        .interact()?;

    config.subscription_id = Some(subscription_id.trim().to_string());
    config.access_token = Some(access_token.trim().to_string());
    if opts.api_host.is_some() {
        config.api_host = opts.api_host.clone();
    }

    if let Some(expires_at) = config.token_expires_at() {
        if config.is_token_expired() {
            println!("{} Token is already expired or about to expire", "⚠".yellow());
        } else {
            println!("Token expires at {}", expires_at.to_rfc3339().bold());
        }
    }

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "acrhook status".cyan());
    println!(
        "  {} - List webhooks on a registry",
        "acrhook webhook list --registry <name> --resource-group <rg>".cyan()
    );

    Ok(())
}
