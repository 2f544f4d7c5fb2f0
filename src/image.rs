//! Container image reference parsing and registry classification

use crate::error::{Error, Result};
use crate::provision::{AzureRegistry, DockerHubRepo, RegistryProvider};

/// Tag used when a reference has none
pub const DEFAULT_TAG: &str = "latest";

/// Azure Container Registry login server suffix
const ACR_SUFFIX: &str = ".azurecr.io";

/// Hosts that all mean Docker Hub
const DOCKER_HUB_HOSTS: &[&str] = &["docker.io", "index.docker.io", "registry-1.docker.io"];

/// A parsed `[host/]path[:tag]` reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Registry host, if the reference names one
    pub host: Option<String>,
    /// Repository path inside the registry (e.g. `team/widgets`)
    pub path: String,
    pub tag: String,
}

impl ImageReference {
    /// Parse an image reference such as `contoso.azurecr.io/widgets:v1`.
    ///
    /// Digest references are rejected; a webhook scope needs a tag.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidInput("image reference is empty".to_string()));
        }
        if input.contains('@') {
            return Err(Error::InvalidInput(format!(
                "digest references are not supported for webhooks: {input}"
            )));
        }

        let (host, rest) = match input.split_once('/') {
            Some((first, rest))
                if first.contains('.') || first.contains(':') || first == "localhost" =>
            {
                (Some(first.to_ascii_lowercase()), rest)
            }
            _ => (None, input),
        };

        // A colon after the last slash separates the tag
        let (path, tag) = match rest.rsplit_once(':') {
            Some((path, tag)) if !tag.contains('/') => (path, tag),
            _ => (rest, DEFAULT_TAG),
        };

        if path.is_empty() || path.split('/').any(str::is_empty) {
            return Err(Error::InvalidInput(format!(
                "invalid repository path in image reference: {input}"
            )));
        }
        if tag.is_empty() {
            return Err(Error::InvalidInput(format!(
                "empty tag in image reference: {input}"
            )));
        }

        Ok(Self {
            host,
            path: path.to_string(),
            tag: tag.to_string(),
        })
    }

    /// Whether the reference points at Docker Hub
    pub fn is_docker_hub(&self) -> bool {
        match &self.host {
            None => true,
            Some(host) => DOCKER_HUB_HOSTS.contains(&host.as_str()),
        }
    }

    /// ACR registry name when the host is `<name>.azurecr.io`
    pub fn acr_registry_name(&self) -> Option<&str> {
        self.host
            .as_deref()
            .and_then(|h| h.strip_suffix(ACR_SUFFIX))
            .filter(|name| !name.is_empty() && !name.contains('.'))
    }

    /// Classify the hosting registry.
    ///
    /// ACR references need the registry's resource group and location, which
    /// the caller resolves; Docker Hub references without a namespace use
    /// `library`.
    pub fn provider(
        &self,
        acr_resource_group: Option<&str>,
        acr_location: Option<&str>,
    ) -> Result<RegistryProvider> {
        if let Some(name) = self.acr_registry_name() {
            let resource_group = acr_resource_group.ok_or_else(|| {
                Error::InvalidInput(format!(
                    "--registry-resource-group is required for Azure registry {name}"
                ))
            })?;
            return Ok(RegistryProvider::Azure(AzureRegistry {
                name: name.to_string(),
                resource_group: resource_group.to_string(),
                location: acr_location.unwrap_or_default().to_string(),
            }));
        }

        if self.is_docker_hub() {
            let (namespace, name) = match self.path.split_once('/') {
                Some((namespace, name)) => (namespace, name),
                None => ("library", self.path.as_str()),
            };
            return Ok(RegistryProvider::DockerHub(DockerHubRepo {
                namespace: namespace.to_string(),
                name: name.to_string(),
            }));
        }

        Ok(RegistryProvider::Other {
            host: self.host.clone().unwrap_or_default(),
        })
    }
}
