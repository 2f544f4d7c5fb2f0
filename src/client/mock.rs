//! Mock Azure client for testing
//!
//! Provides an in-memory implementation of the API traits for unit testing
//! without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::models::{PublishingCredentialsProperties, WebhookProperties};
use super::{
    PublishingCredentials, Registry, RegistryApi, SiteApi, SiteRef, Webhook,
    WebhookCreateParameters,
};
use crate::error::{ApiError, Result};

/// A `create_webhook` call as the mock received it
#[derive(Debug, Clone)]
pub struct CapturedCreate {
    pub resource_group: String,
    pub registry: String,
    pub webhook_name: String,
    pub params: WebhookCreateParameters,
}

/// Mock API client for testing.
///
/// Configure responses via builder methods, then use in tests.
#[derive(Default)]
pub struct MockAzureClient {
    /// SCM URI returned from get_publishing_credentials
    scm_uri: Arc<Mutex<Option<String>>>,
    /// Registries returned from get_registry
    registries: Arc<Mutex<Vec<Registry>>>,
    /// Webhooks created so far, returned from list_webhooks
    webhooks: Arc<Mutex<Vec<Webhook>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Error returned by create_webhook only - consumed on first create
    create_error: Arc<Mutex<Option<ApiError>>>,
    /// Captured create calls for test assertions
    created: Arc<Mutex<Vec<CapturedCreate>>>,
    /// Number of publishing credential lookups
    credential_calls: Arc<Mutex<usize>>,
}

impl MockAzureClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scm_uri(self, uri: &str) -> Self {
        *self.scm_uri.try_lock().expect("unshared mock") = Some(uri.to_string());
        self
    }

    pub fn with_registry(self, name: &str, location: &str) -> Self {
        self.registries
            .try_lock()
            .expect("unshared mock")
            .push(Registry {
                id: format!("/registries/{name}"),
                name: name.to_string(),
                location: location.to_string(),
            });
        self
    }

    /// Fail the next call with this error
    pub fn with_error(self, error: ApiError) -> Self {
        *self.error.try_lock().expect("unshared mock") = Some(error);
        self
    }

    /// Fail the next create_webhook call; other calls still succeed
    pub fn with_create_error(self, error: ApiError) -> Self {
        *self.create_error.try_lock().expect("unshared mock") = Some(error);
        self
    }

    pub async fn created(&self) -> Vec<CapturedCreate> {
        self.created.lock().await.clone()
    }

    pub async fn credential_calls(&self) -> usize {
        *self.credential_calls.lock().await
    }

    async fn take_error(&self) -> Result<()> {
        match self.error.lock().await.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SiteApi for MockAzureClient {
    async fn get_publishing_credentials(&self, site: &SiteRef) -> Result<PublishingCredentials> {
        *self.credential_calls.lock().await += 1;
        self.take_error().await?;

        Ok(PublishingCredentials {
            name: Some(site.name.clone()),
            properties: PublishingCredentialsProperties {
                scm_uri: self.scm_uri.lock().await.clone(),
                publishing_user_name: Some(format!("${}", site.name)),
            },
        })
    }
}

#[async_trait]
impl RegistryApi for MockAzureClient {
    async fn get_registry(&self, _resource_group: &str, registry: &str) -> Result<Registry> {
        self.take_error().await?;

        self.registries
            .lock()
            .await
            .iter()
            .find(|r| r.name == registry)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("registry {registry}")).into())
    }

    async fn create_webhook(
        &self,
        resource_group: &str,
        registry: &str,
        webhook_name: &str,
        params: &WebhookCreateParameters,
    ) -> Result<Webhook> {
        self.take_error().await?;
        if let Some(err) = self.create_error.lock().await.take() {
            return Err(err.into());
        }

        self.created.lock().await.push(CapturedCreate {
            resource_group: resource_group.to_string(),
            registry: registry.to_string(),
            webhook_name: webhook_name.to_string(),
            params: params.clone(),
        });

        let webhook = Webhook {
            id: format!(
                "/subscriptions/mock/resourceGroups/{resource_group}/providers/Microsoft.ContainerRegistry/registries/{registry}/webhooks/{webhook_name}"
            ),
            name: webhook_name.to_string(),
            location: params.location.clone(),
            properties: WebhookProperties {
                scope: Some(params.properties.scope.clone()),
                status: Some(params.properties.status),
                actions: params.properties.actions.clone(),
                provisioning_state: Some("Succeeded".to_string()),
            },
        };
        self.webhooks.lock().await.push(webhook.clone());
        Ok(webhook)
    }

    async fn list_webhooks(&self, _resource_group: &str, _registry: &str) -> Result<Vec<Webhook>> {
        self.take_error().await?;
        Ok(self.webhooks.lock().await.clone())
    }
}
