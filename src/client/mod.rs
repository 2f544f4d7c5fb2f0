//! Azure Resource Manager API client

use async_trait::async_trait;

use crate::error::Result;

pub mod azure;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use azure::AzureClient;
#[cfg(test)]
pub use mock::MockAzureClient;
pub use models::{
    PublishingCredentials, Registry, Webhook, WebhookAction, WebhookCreateParameters,
    WebhookPropertiesCreateParameters, WebhookStatus,
};

/// App Service site reference inside a subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRef {
    /// Site (web app) name
    pub name: String,
    /// Resource group containing the site
    pub resource_group: String,
}

/// Application metadata operations (Microsoft.Web)
#[async_trait]
pub trait SiteApi: Send + Sync {
    /// Fetch the publishing credentials of a web app
    async fn get_publishing_credentials(&self, site: &SiteRef) -> Result<PublishingCredentials>;
}

/// Registry management operations (Microsoft.ContainerRegistry)
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Get a container registry
    async fn get_registry(&self, resource_group: &str, registry: &str) -> Result<Registry>;

    /// Create (or replace) a webhook on a registry
    async fn create_webhook(
        &self,
        resource_group: &str,
        registry: &str,
        webhook_name: &str,
        params: &WebhookCreateParameters,
    ) -> Result<Webhook>;

    /// List all webhooks on a registry, following `nextLink` pages
    async fn list_webhooks(&self, resource_group: &str, registry: &str) -> Result<Vec<Webhook>>;
}
