//! FusionAuth API client.
//!
//! [`Client`] wraps a `reqwest::Client` with the provider's API token and
//! tenant scope. It is built once during provider configuration and shared,
//! read-only, by every resource adapter; `reqwest::Client` is internally
//! reference counted and safe for concurrent use.
//!
//! Resource adapters depend on the [`TenantApi`] trait rather than on
//! [`Client`] directly so tests can substitute an in-process double.

pub mod error;
pub mod types;

pub use error::{ApiErrors, ClientError, ClientResult, ErrorDetail, FieldError};
pub use types::{CaptchaMethod, Tenant, TenantCaptchaConfiguration, TenantRequest, TenantResponse};

use crate::config::ClientSettings;
use log::debug;
use reqwest::{Method, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt;
use std::future::Future;
use url::Url;

/// Header carrying the tenant scope on every request.
pub const TENANT_ID_HEADER: &str = "X-FusionAuth-TenantId";

const USER_AGENT: &str = concat!("fusionauth-provider/", env!("CARGO_PKG_VERSION"));

/// Remote operations on FusionAuth tenants.
///
/// Implementations must be safe for concurrent use once constructed.
pub trait TenantApi: Send + Sync {
    /// Create a tenant (POST /api/tenant).
    fn create_tenant(
        &self,
        request: &TenantRequest,
    ) -> impl Future<Output = ClientResult<TenantResponse>> + Send;

    /// Retrieve a tenant by id (GET /api/tenant/{id}).
    fn retrieve_tenant(
        &self,
        tenant_id: &str,
    ) -> impl Future<Output = ClientResult<TenantResponse>> + Send;

    /// Replace a tenant (PUT /api/tenant/{id}).
    fn update_tenant(
        &self,
        tenant_id: &str,
        request: &TenantRequest,
    ) -> impl Future<Output = ClientResult<TenantResponse>> + Send;

    /// Delete a tenant (DELETE /api/tenant/{id}).
    fn delete_tenant(&self, tenant_id: &str) -> impl Future<Output = ClientResult<()>> + Send;
}

/// FusionAuth HTTP client scoped to one API token and, optionally, one tenant.
#[derive(Clone)]
pub struct Client {
    http_client: reqwest::Client,
    base_url: Url,
    api_token: String,
    tenant_id: Option<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .finish()
    }
}

impl Client {
    /// Build a client from resolved settings.
    pub fn new(settings: ClientSettings) -> ClientResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_http_client(settings, http_client))
    }

    /// Build a client around a pre-configured `reqwest::Client`.
    pub fn with_http_client(settings: ClientSettings, http_client: reqwest::Client) -> Self {
        Self {
            http_client,
            base_url: settings.base_url,
            api_token: settings.api_token,
            tenant_id: settings.tenant_id,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Tenant scope sent with every request, if configured.
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// `{endpoint}/api/tenant[/{id}]`, with the id percent-encoded as one segment.
    fn tenant_url(&self, tenant_id: Option<&str>) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| {
                ClientError::InvalidConfig(format!(
                    "endpoint '{}' cannot be used as a base URL",
                    self.base_url
                ))
            })?;
            segments.pop_if_empty().extend(["api", "tenant"]);
            if let Some(id) = tenant_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        debug!("FusionAuth {} {}", method, url.path());
        let builder = self
            .http_client
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, &self.api_token)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.tenant_id {
            Some(tenant_id) => builder.header(TENANT_ID_HEADER, tenant_id),
            None => builder,
        }
    }

    async fn send<T, B>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        missing_id: &str,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }
        Err(error_from_response(status, &body, missing_id))
    }

    async fn send_without_content(&self, url: Url, missing_id: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, url).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Err(error_from_response(status, &body, missing_id))
    }
}

/// Classify a non-success response.
fn error_from_response(status: StatusCode, body: &str, missing_id: &str) -> ClientError {
    match status {
        StatusCode::NOT_FOUND => ClientError::not_found("tenant", missing_id),
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        _ => match serde_json::from_str::<ApiErrors>(body) {
            Ok(errors) if errors.is_present() => ClientError::Rejected(errors),
            _ => ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body.to_string()
                },
            },
        },
    }
}

impl TenantApi for Client {
    async fn create_tenant(&self, request: &TenantRequest) -> ClientResult<TenantResponse> {
        let id = (!request.tenant.id.is_empty()).then_some(request.tenant.id.as_str());
        let url = self.tenant_url(id)?;
        self.send(Method::POST, url, Some(request), id.unwrap_or_default())
            .await
    }

    async fn retrieve_tenant(&self, tenant_id: &str) -> ClientResult<TenantResponse> {
        let url = self.tenant_url(Some(tenant_id))?;
        self.send::<_, ()>(Method::GET, url, None, tenant_id).await
    }

    async fn update_tenant(
        &self,
        tenant_id: &str,
        request: &TenantRequest,
    ) -> ClientResult<TenantResponse> {
        let url = self.tenant_url(Some(tenant_id))?;
        self.send(Method::PUT, url, Some(request), tenant_id).await
    }

    async fn delete_tenant(&self, tenant_id: &str) -> ClientResult<()> {
        let url = self.tenant_url(Some(tenant_id))?;
        self.send_without_content(url, tenant_id).await
    }
}
