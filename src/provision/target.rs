//! Deployment targets and webhook request/result types

use serde::Serialize;

use crate::client::{SiteRef, Webhook, WebhookAction, WebhookStatus};

/// Path the App Service SCM site listens on for registry pushes
pub const DOCKER_HOOK_PATH: &str = "/docker/hook";

/// A web app whose callback URI has been resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetApplication {
    pub name: String,
    /// URI the registry calls on push
    pub callback_uri: String,
}

impl TargetApplication {
    /// Build from a site name and its SCM URI
    pub fn from_scm_uri(name: &str, scm_uri: &str) -> Self {
        Self {
            name: name.to_string(),
            callback_uri: format!("{}{}", scm_uri.trim_end_matches('/'), DOCKER_HOOK_PATH),
        }
    }
}

/// An Azure Container Registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AzureRegistry {
    pub name: String,
    pub resource_group: String,
    pub location: String,
}

/// A Docker Hub repository (`namespace/name`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerHubRepo {
    pub namespace: String,
    pub name: String,
}

/// Where a repository is hosted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryProvider {
    /// Managed registry with a webhook management API
    Azure(AzureRegistry),
    /// Third-party hub, webhooks are configured by hand
    DockerHub(DockerHubRepo),
    /// Anything else; no webhook support
    Other { host: String },
}

/// A repository and tag inside a registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryReference {
    /// Repository path without the registry host
    pub repository: String,
    pub tag: String,
    pub provider: RegistryProvider,
}

impl RepositoryReference {
    /// Webhook scope, `<repo>:<tag>`
    pub fn scope(&self) -> String {
        format!("{}:{}", self.repository, self.tag)
    }
}

/// What the provisioner is handed by the deployment flow
#[derive(Debug, Clone)]
pub struct DeployContext {
    /// The web app being deployed, once resolved
    pub site: Option<SiteRef>,
    pub repository: RepositoryReference,
}

/// The single create request built per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookRequest {
    pub name: String,
    pub service_uri: String,
    pub location: String,
    pub scope: String,
    pub actions: Vec<WebhookAction>,
    pub status: WebhookStatus,
}

impl WebhookRequest {
    /// A push-triggered, enabled webhook
    pub fn push(name: String, service_uri: String, location: String, scope: String) -> Self {
        Self {
            name,
            service_uri,
            location,
            scope,
            actions: vec![WebhookAction::Push],
            status: WebhookStatus::Enabled,
        }
    }
}

/// Confirmation fields of a created webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookResult {
    pub name: String,
    pub scope: String,
    pub id: String,
    pub location: String,
}

impl WebhookResult {
    /// Human-readable completion line
    pub fn completion_message(&self) -> String {
        format!(
            "Created webhook \"{}\" with scope \"{}\", id: \"{}\" and location: \"{}\"",
            self.name, self.scope, self.id, self.location
        )
    }
}

impl From<Webhook> for WebhookResult {
    fn from(webhook: Webhook) -> Self {
        Self {
            name: webhook.name,
            scope: webhook.properties.scope.unwrap_or_default(),
            id: webhook.id,
            location: webhook.location,
        }
    }
}
