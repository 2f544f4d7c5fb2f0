//! Azure Resource Manager client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::models::ListPage;
use super::{
    PublishingCredentials, Registry, RegistryApi, SiteApi, SiteRef, Webhook,
    WebhookCreateParameters,
};
use crate::error::{ApiError, Result};

/// Public-cloud management endpoint
pub const DEFAULT_API_HOST: &str = "https://management.azure.com";

/// Microsoft.Web api-version
const WEB_API_VERSION: &str = "2022-03-01";

/// Microsoft.ContainerRegistry api-version
const REGISTRY_API_VERSION: &str = "2023-07-01";

/// ARM allows far more, this just keeps bursts polite
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Azure Resource Manager client scoped to one subscription
pub struct AzureClient {
    http: HttpClient,
    base_url: String,
    subscription_id: String,
    access_token: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl AzureClient {
    /// Create a client; `api_host` overrides the public-cloud endpoint
    pub fn with_host(
        subscription_id: String,
        access_token: String,
        api_host: Option<String>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        let base_url = api_host
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            http,
            base_url,
            subscription_id,
            access_token,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    fn resource_group_url(&self, resource_group: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}",
            self.base_url, self.subscription_id, resource_group
        )
    }

    fn registry_url(&self, resource_group: &str, registry: &str) -> String {
        format!(
            "{}/providers/Microsoft.ContainerRegistry/registries/{}",
            self.resource_group_url(resource_group),
            registry
        )
    }

    /// Make an authenticated request with an optional JSON body
    async fn request<T, B>(&self, method: Method, url: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.rate_limiter.until_ready().await;

        debug!("{} {}", method, url);

        let is_post = method == Method::POST;
        let mut builder = self
            .http
            .request(method, url)
            .bearer_auth(&self.access_token);
        builder = match body {
            Some(body) => builder.json(body),
            // ARM rejects bodiless POSTs without a length
            None if is_post => builder.header(reqwest::header::CONTENT_LENGTH, "0"),
            None => builder,
        };

        let response = builder.send().await.map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            let data = response.json::<T>().await.map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;
            return Ok(data);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60);
        let text = response.text().await.unwrap_or_default();
        let message = arm_error_message(&text).unwrap_or_else(|| {
            if text.is_empty() {
                status.to_string()
            } else {
                text.clone()
            }
        });

        debug!("{} -> {}: {}", url, status, message);

        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::CONFLICT => ApiError::Conflict(message),
            StatusCode::TOO_MANY_REQUESTS => {
                ApiError::RateLimit(Duration::from_secs(retry_after))
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::BadRequest(message)
            }
            status if status.is_server_error() => ApiError::ServerError(message),
            _ => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
        };
        Err(err.into())
    }
}

/// Pull `error.message` (and code) out of an ARM error envelope
fn arm_error_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        code: Option<String>,
        message: Option<String>,
    }

    #[derive(serde::Deserialize)]
    struct Envelope {
        error: ErrorBody,
    }

    let envelope: Envelope = serde_json::from_str(body).ok()?;
    match (envelope.error.code, envelope.error.message) {
        (Some(code), Some(message)) => Some(format!("{}: {}", code, message)),
        (None, Some(message)) => Some(message),
        (Some(code), None) => Some(code),
        (None, None) => None,
    }
}

#[async_trait]
impl SiteApi for AzureClient {
    async fn get_publishing_credentials(&self, site: &SiteRef) -> Result<PublishingCredentials> {
        let url = format!(
            "{}/providers/Microsoft.Web/sites/{}/config/publishingcredentials/list?api-version={}",
            self.resource_group_url(&site.resource_group),
            site.name,
            WEB_API_VERSION
        );
        self.request::<_, ()>(Method::POST, &url, None).await
    }
}

#[async_trait]
impl RegistryApi for AzureClient {
    async fn get_registry(&self, resource_group: &str, registry: &str) -> Result<Registry> {
        let url = format!(
            "{}?api-version={}",
            self.registry_url(resource_group, registry),
            REGISTRY_API_VERSION
        );
        self.request::<_, ()>(Method::GET, &url, None).await
    }

    async fn create_webhook(
        &self,
        resource_group: &str,
        registry: &str,
        webhook_name: &str,
        params: &WebhookCreateParameters,
    ) -> Result<Webhook> {
        let url = format!(
            "{}/webhooks/{}?api-version={}",
            self.registry_url(resource_group, registry),
            webhook_name,
            REGISTRY_API_VERSION
        );
        self.request(Method::PUT, &url, Some(params)).await
    }

    async fn list_webhooks(&self, resource_group: &str, registry: &str) -> Result<Vec<Webhook>> {
        let mut url = format!(
            "{}/webhooks?api-version={}",
            self.registry_url(resource_group, registry),
            REGISTRY_API_VERSION
        );
        let mut webhooks = Vec::new();

        loop {
            let page: ListPage<Webhook> = self.request::<_, ()>(Method::GET, &url, None).await?;
            webhooks.extend(page.value);
            match page.next_link {
                Some(next) if !next.is_empty() => url = next,
                _ => break,
            }
        }

        Ok(webhooks)
    }
}
