//! Azure Resource Manager request and response models

use serde::{Deserialize, Serialize};

/// Publishing credentials of an App Service site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishingCredentials {
    /// Resource name (usually the site name)
    #[serde(default)]
    pub name: Option<String>,

    pub properties: PublishingCredentialsProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishingCredentialsProperties {
    /// SCM (Kudu) endpoint with embedded basic-auth credentials
    #[serde(default)]
    pub scm_uri: Option<String>,

    #[serde(default)]
    pub publishing_user_name: Option<String>,
}

/// Container registry resource (only the fields the tool reads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registry {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// Registry event that fires a webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookAction {
    #[serde(rename = "push")]
    Push,
    #[serde(rename = "delete")]
    Delete,
    #[serde(rename = "quarantine")]
    Quarantine,
    #[serde(rename = "chart_push")]
    ChartPush,
    #[serde(rename = "chart_delete")]
    ChartDelete,
}

impl std::fmt::Display for WebhookAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WebhookAction::Push => "push",
            WebhookAction::Delete => "delete",
            WebhookAction::Quarantine => "quarantine",
            WebhookAction::ChartPush => "chart_push",
            WebhookAction::ChartDelete => "chart_delete",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    Enabled,
    Disabled,
}

impl std::fmt::Display for WebhookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookStatus::Enabled => f.write_str("enabled"),
            WebhookStatus::Disabled => f.write_str("disabled"),
        }
    }
}

/// Body of the webhook create (PUT) call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookCreateParameters {
    pub location: String,
    pub properties: WebhookPropertiesCreateParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPropertiesCreateParameters {
    pub service_uri: String,
    pub scope: String,
    pub actions: Vec<WebhookAction>,
    pub status: WebhookStatus,
}

/// Webhook resource as returned by the registry API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    pub name: String,
    pub location: String,

    #[serde(default)]
    pub properties: WebhookProperties,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookProperties {
    #[serde(default)]
    pub scope: Option<String>,

    #[serde(default)]
    pub status: Option<WebhookStatus>,

    #[serde(default)]
    pub actions: Vec<WebhookAction>,

    #[serde(default)]
    pub provisioning_state: Option<String>,
}

/// One page of an ARM list response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,

    #[serde(default)]
    pub next_link: Option<String>,
}
