//! acrhook CLI - container registry webhooks for Azure App Service deployments

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod image;
mod output;
mod provision;

use cli::{Cli, Commands, GlobalOptions, WebhookCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --debug
    let default_filter = if cli.debug { "acrhook=debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("acrhook version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Name { app_name } => cli::name::run(&opts, &app_name),
        Commands::Webhook(cmd) => match cmd {
            WebhookCommands::Create(args) => cli::webhook::create(&opts, &args).await,
            WebhookCommands::List {
                registry,
                resource_group,
            } => cli::webhook::list(&opts, &registry, &resource_group).await,
        },
    }
}
