//! Webhook provisioning for a deployed web app

use std::sync::Arc;

use log::{debug, info};

use super::advisory::{HubAdvisory, OperatorPrompt, dispatch_best_effort};
use super::naming::generate_webhook_name;
use super::target::{
    AzureRegistry, DeployContext, DockerHubRepo, RegistryProvider, TargetApplication,
    WebhookRequest, WebhookResult,
};
use crate::client::{
    RegistryApi, SiteApi, SiteRef, WebhookCreateParameters, WebhookPropertiesCreateParameters,
};
use crate::error::{ApiError, Result};

/// What a provisioning run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// A registry webhook was created
    Created(WebhookResult),
    /// The operator was handed manual setup instructions
    AdvisoryDispatched { link: String },
    /// Nothing to do for this context
    Skipped,
}

/// Whether a provisioning run has anything to do for this context
pub fn should_run(ctx: &DeployContext) -> bool {
    ctx.site.is_some()
        && matches!(
            ctx.repository.provider,
            RegistryProvider::Azure(_) | RegistryProvider::DockerHub(_)
        )
}

/// Creates registry webhooks that redeploy a web app on image push
pub struct WebhookProvisioner<C> {
    client: Arc<C>,
    prompt: Arc<dyn OperatorPrompt>,
}

impl<C> WebhookProvisioner<C>
where
    C: SiteApi + RegistryApi,
{
    pub fn new(client: Arc<C>, prompt: Arc<dyn OperatorPrompt>) -> Self {
        Self { client, prompt }
    }

    /// Create the webhook, or hand the operator manual instructions.
    ///
    /// Remote errors are returned unchanged; nothing is retried or undone.
    pub async fn run(&self, ctx: &DeployContext) -> Result<ProvisionOutcome> {
        let Some(site) = ctx.site.as_ref() else {
            return Ok(ProvisionOutcome::Skipped);
        };

        match &ctx.repository.provider {
            RegistryProvider::Azure(registry) => {
                let result = self
                    .create_registry_webhook(site, registry, &ctx.repository.scope())
                    .await?;
                Ok(ProvisionOutcome::Created(result))
            }
            RegistryProvider::DockerHub(repo) => self.advise_docker_hub(site, repo).await,
            RegistryProvider::Other { host } => {
                debug!("No webhook support for registry {}", host);
                Ok(ProvisionOutcome::Skipped)
            }
        }
    }

    /// Resolve the web app's callback URI from its publishing credentials
    pub async fn resolve_target(&self, site: &SiteRef) -> Result<TargetApplication> {
        let credentials = self.client.get_publishing_credentials(site).await?;
        let scm_uri = credentials.properties.scm_uri.ok_or_else(|| {
            ApiError::InvalidResponse(format!(
                "publishing credentials for {} have no scmUri",
                site.name
            ))
        })?;
        Ok(TargetApplication::from_scm_uri(&site.name, &scm_uri))
    }

    async fn create_registry_webhook(
        &self,
        site: &SiteRef,
        registry: &AzureRegistry,
        scope: &str,
    ) -> Result<WebhookResult> {
        let app = self.resolve_target(site).await?;

        let request = WebhookRequest::push(
            generate_webhook_name(&app.name),
            app.callback_uri,
            registry.location.clone(),
            scope.to_string(),
        );

        debug!(
            "Creating webhook {} on registry {} (scope {})",
            request.name, registry.name, request.scope
        );

        let params = WebhookCreateParameters {
            location: request.location,
            properties: WebhookPropertiesCreateParameters {
                service_uri: request.service_uri,
                scope: request.scope,
                actions: request.actions,
                status: request.status,
            },
        };

        let webhook = self
            .client
            .create_webhook(&registry.resource_group, &registry.name, &request.name, &params)
            .await?;

        let result = WebhookResult::from(webhook);
        info!("{}", result.completion_message());
        Ok(result)
    }

    async fn advise_docker_hub(
        &self,
        site: &SiteRef,
        repo: &DockerHubRepo,
    ) -> Result<ProvisionOutcome> {
        let app = self.resolve_target(site).await?;
        let advisory = HubAdvisory::docker_hub(&repo.namespace, &repo.name, &app.callback_uri);
        let link = advisory.link.clone();

        dispatch_best_effort(self.prompt.clone(), advisory);

        Ok(ProvisionOutcome::AdvisoryDispatched { link })
    }
}
