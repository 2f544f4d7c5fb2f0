//! Webhook command implementations

use std::sync::Arc;

use colored::Colorize;
use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{CommandContext, CreateArgs, GlobalOptions, OutputFormat};
use crate::client::{RegistryApi, SiteRef, Webhook};
use crate::error::Result;
use crate::image::ImageReference;
use crate::output::{Formattable, json, table};
use crate::provision::{
    DeployContext, ProvisionOutcome, RepositoryReference, TerminalPrompt, WebhookProvisioner,
    should_run,
};

/// Webhook row for table/JSON output
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct WebhookDisplay {
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "SCOPE")]
    pub scope: String,

    #[tabled(rename = "ACTIONS")]
    pub actions: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "LOCATION")]
    pub location: String,
}

impl From<Webhook> for WebhookDisplay {
    fn from(webhook: Webhook) -> Self {
        let actions: Vec<String> = webhook
            .properties
            .actions
            .iter()
            .map(ToString::to_string)
            .collect();

        Self {
            name: webhook.name,
            scope: webhook.properties.scope.unwrap_or_else(|| "*".to_string()),
            actions: actions.join(","),
            status: webhook
                .properties
                .status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            location: webhook.location,
        }
    }
}

/// Webhooks of one registry, as printed by `webhook list`
pub struct WebhookListing {
    registry: String,
    rows: Vec<WebhookDisplay>,
}

impl WebhookListing {
    pub fn new(registry: &str, webhooks: Vec<Webhook>) -> Self {
        Self {
            registry: registry.to_string(),
            rows: webhooks.into_iter().map(WebhookDisplay::from).collect(),
        }
    }
}

impl Formattable for WebhookListing {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Table => Ok(table::format_table(
                &self.rows,
                &format!(
                    "No webhooks on registry {}. Create one with `acrhook webhook create`.",
                    self.registry
                ),
            )),
            OutputFormat::Json => Ok(json::format_json(&self.rows)?),
        }
    }
}

/// Build the provisioner's input from CLI arguments.
///
/// ACR images without `--location` cost one registry lookup.
async fn deploy_context<R: RegistryApi>(client: &R, args: &CreateArgs) -> Result<DeployContext> {
    let image = ImageReference::parse(&args.image)?;

    let mut location = args.location.clone();
    if location.is_none() {
        if let (Some(registry), Some(resource_group)) = (
            image.acr_registry_name(),
            args.registry_resource_group.as_deref(),
        ) {
            debug!("Looking up location of registry {}", registry);
            location = Some(client.get_registry(resource_group, registry).await?.location);
        }
    }

    let provider = image.provider(args.registry_resource_group.as_deref(), location.as_deref())?;

    Ok(DeployContext {
        site: Some(SiteRef {
            name: args.site.clone(),
            resource_group: args.site_resource_group.clone(),
        }),
        repository: RepositoryReference {
            repository: image.path,
            tag: image.tag,
            provider,
        },
    })
}

/// Run the webhook create command
pub async fn create(opts: &GlobalOptions, args: &CreateArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let deploy = deploy_context(ctx.client.as_ref(), args).await?;

    if !should_run(&deploy) {
        println!(
            "{} {} has no webhook support; nothing to do.",
            "⚠".yellow(),
            args.image
        );
        return Ok(());
    }

    debug!(
        "Provisioning webhook for site {} in subscription {}",
        args.site, ctx.subscription_id
    );

    let interactive = !args.no_prompt && ctx.format == OutputFormat::Table;
    let prompt = TerminalPrompt::new(interactive).reveal_callback(args.show_callback_uri);
    let provisioner = WebhookProvisioner::new(ctx.client.clone(), Arc::new(prompt));

    match provisioner.run(&deploy).await? {
        ProvisionOutcome::Created(result) => match ctx.format {
            OutputFormat::Table => println!("{} {}", "✓".green(), result.completion_message()),
            OutputFormat::Json => println!("{}", json::format_json(&result)?),
        },
        ProvisionOutcome::AdvisoryDispatched { link } => match ctx.format {
            OutputFormat::Table => println!(
                "{} Docker Hub webhooks are configured by hand: {}",
                "ℹ".cyan(),
                link.bold()
            ),
            OutputFormat::Json => {
                #[derive(Serialize)]
                struct Advisory<'a> {
                    advisory: &'a str,
                }
                println!("{}", json::format_json(&Advisory { advisory: &link })?);
            }
        },
        ProvisionOutcome::Skipped => println!("Nothing to do."),
    }

    Ok(())
}

/// Run the webhook list command
pub async fn list(opts: &GlobalOptions, registry: &str, resource_group: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    debug!("Listing webhooks on {}/{}", resource_group, registry);
    let webhooks = ctx.client.list_webhooks(resource_group, registry).await?;
    debug!("Fetched {} webhooks", webhooks.len());

    WebhookListing::new(registry, webhooks).print(ctx.format)
}
