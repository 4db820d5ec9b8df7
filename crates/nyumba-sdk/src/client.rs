//! HTTP client for the Nyumba API
//!
//! This module provides a type-safe client for the Nyumba marketplace API.
//!
//! # Authentication
//!
//! The client never reads tokens from ambient storage. A
//! [`CredentialProvider`] is injected through the builder and consulted on
//! every request; when it yields a token the client attaches
//! `Authorization: Bearer {token}`.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use nyumba_sdk::{auth::EnvToken, ClientBuilder};
//!
//! # async fn example() -> nyumba_sdk::Result<()> {
//! let client = ClientBuilder::default()
//!     .base_url("https://api.nyumba.co.ke")
//!     .credentials(EnvToken::default())
//!     .build()?;
//!
//! let listings = client.list_listings(None).await?;
//! # Ok(())
//! # }
//! ```

use crate::{
    auth::{CredentialProvider, NoCredentials, StaticToken},
    error::{ApiError, ErrorResponse, Result},
    types::{
        AccountSettings, InquiryRequest, InquiryResponse, Listing, ListingQuery, ListingRequest,
        MaintenanceRequest, NewMaintenanceRequest, PayRequest, PayResponse,
        PaymentStatusResponse, ReferralRecord, SettingsUpdate, Subscription,
        SubscriptionRequest, TenantLease, TenantRequest, Validate,
    },
};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default API URL when not specified
pub const DEFAULT_API_URL: &str = "https://api.nyumba.co.ke";

/// Default timeout in seconds for API requests
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Header carrying the per-action idempotency key on payment initiation
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// HTTP client for interacting with the Nyumba API
#[derive(Debug, Clone)]
pub struct NyumbaClient {
    http_client: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl NyumbaClient {
    /// Create a new client (private - use ClientBuilder instead)
    fn new(
        base_url: Url,
        http_client: reqwest::Client,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            http_client,
            base_url,
            credentials,
        }
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ===== Payments =====

    /// Ask the backend to push an M-Pesa payment prompt to the payer's phone
    pub async fn initiate_payment(
        &self,
        request: &PayRequest,
        idempotency_key: &str,
    ) -> Result<PayResponse> {
        let url = self.url(&["api", "payment", "pay"])?;
        let request = self
            .http_client
            .post(url)
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key)
            .json(request);
        self.send(request).await
    }

    /// Query the status of a payment by its checkout request id
    pub async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatusResponse> {
        self.get(&["api", "payment", "status", payment_id]).await
    }

    // ===== Listings =====

    /// List listings, optionally filtered
    pub async fn list_listings(&self, query: Option<&ListingQuery>) -> Result<Vec<Listing>> {
        let url = self.url(&["api", "listings"])?;
        let mut request = self.http_client.get(url);
        if let Some(q) = query {
            request = request.query(q);
        }
        self.send(request).await
    }

    pub async fn get_listing(&self, listing_id: &str) -> Result<Listing> {
        self.get(&["api", "listings", listing_id]).await
    }

    pub async fn create_listing(&self, listing: &ListingRequest) -> Result<Listing> {
        listing.validate()?;
        self.with_body(Method::POST, &["api", "listings"], listing).await
    }

    pub async fn replace_listing(&self, listing_id: &str, listing: &ListingRequest) -> Result<Listing> {
        listing.validate()?;
        self.with_body(Method::PUT, &["api", "listings", listing_id], listing)
            .await
    }

    pub async fn delete_listing(&self, listing_id: &str) -> Result<()> {
        self.delete(&["api", "listings", listing_id]).await
    }

    // ===== Tenants =====

    pub async fn list_tenants(&self) -> Result<Vec<TenantLease>> {
        self.get(&["api", "tenants"]).await
    }

    /// Fetch a tenant and their lease, including the balance due
    pub async fn get_tenant(&self, tenant_id: &str) -> Result<TenantLease> {
        self.get(&["api", "tenants", tenant_id]).await
    }

    pub async fn create_tenant(&self, tenant: &TenantRequest) -> Result<TenantLease> {
        tenant.validate()?;
        self.with_body(Method::POST, &["api", "tenants"], tenant).await
    }

    pub async fn replace_tenant(&self, tenant_id: &str, tenant: &TenantRequest) -> Result<TenantLease> {
        tenant.validate()?;
        self.with_body(Method::PUT, &["api", "tenants", tenant_id], tenant)
            .await
    }

    pub async fn delete_tenant(&self, tenant_id: &str) -> Result<()> {
        self.delete(&["api", "tenants", tenant_id]).await
    }

    // ===== Maintenance =====

    pub async fn list_maintenance_requests(&self) -> Result<Vec<MaintenanceRequest>> {
        self.get(&["api", "maintenance"]).await
    }

    pub async fn get_maintenance_request(&self, request_id: &str) -> Result<MaintenanceRequest> {
        self.get(&["api", "maintenance", request_id]).await
    }

    pub async fn create_maintenance_request(
        &self,
        request: &NewMaintenanceRequest,
    ) -> Result<MaintenanceRequest> {
        request.validate()?;
        self.with_body(Method::POST, &["api", "maintenance"], request)
            .await
    }

    pub async fn replace_maintenance_request(
        &self,
        request_id: &str,
        request: &NewMaintenanceRequest,
    ) -> Result<MaintenanceRequest> {
        request.validate()?;
        self.with_body(Method::PUT, &["api", "maintenance", request_id], request)
            .await
    }

    pub async fn delete_maintenance_request(&self, request_id: &str) -> Result<()> {
        self.delete(&["api", "maintenance", request_id]).await
    }

    // ===== Subscriptions =====

    pub async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.get(&["api", "subscriptions"]).await
    }

    pub async fn create_subscription(&self, request: &SubscriptionRequest) -> Result<Subscription> {
        request.validate()?;
        self.with_body(Method::POST, &["api", "subscriptions"], request)
            .await
    }

    pub async fn replace_subscription(
        &self,
        subscription_id: &str,
        request: &SubscriptionRequest,
    ) -> Result<Subscription> {
        request.validate()?;
        self.with_body(
            Method::PUT,
            &["api", "subscriptions", subscription_id],
            request,
        )
        .await
    }

    pub async fn delete_subscription(&self, subscription_id: &str) -> Result<()> {
        self.delete(&["api", "subscriptions", subscription_id]).await
    }

    // ===== Referrals, inquiries, settings =====

    pub async fn list_referrals(&self) -> Result<Vec<ReferralRecord>> {
        self.get(&["api", "referrals"]).await
    }

    pub async fn submit_inquiry(&self, inquiry: &InquiryRequest) -> Result<InquiryResponse> {
        inquiry.validate()?;
        self.with_body(Method::POST, &["api", "inquiries"], inquiry)
            .await
    }

    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<AccountSettings> {
        update.validate()?;
        self.with_body(Method::PUT, &["api", "settings"], update).await
    }

    // ===== Private Helper Methods =====

    /// Resolve path segments against the base URL, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(blank) = segments.iter().position(|s| s.trim().is_empty()) {
            return Err(ApiError::InvalidRequest {
                message: format!("empty path segment at position {blank}"),
            });
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidRequest {
                message: format!("base URL cannot be a base: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Apply authentication to request
    async fn apply_auth(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        match self.credentials.bearer_token().await? {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Ok(request),
        }
    }

    /// Authenticate, send and decode
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = self.apply_auth(request).await?;
        let response = request.send().await.map_err(ApiError::from_transport)?;
        self.handle_response(response).await
    }

    /// Generic GET request
    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.url(segments)?;
        debug!(%url, "GET");
        self.send(self.http_client.get(url)).await
    }

    /// Generic request with a JSON body
    async fn with_body<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T> {
        let url = self.url(segments)?;
        debug!(%url, %method, "request with body");
        self.send(self.http_client.request(method, url).json(body))
            .await
    }

    /// Generic DELETE request, ignoring any response body
    async fn delete(&self, segments: &[&str]) -> Result<()> {
        let url = self.url(segments)?;
        debug!(%url, "DELETE");
        let request = self.apply_auth(self.http_client.delete(url)).await?;
        let response = request.send().await.map_err(ApiError::from_transport)?;
        if response.status().is_success() {
            Ok(())
        } else {
            self.handle_error_response(response).await
        }
    }

    /// Handle successful response
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        if response.status().is_success() {
            response.json().await.map_err(ApiError::HttpClient)
        } else {
            self.handle_error_response(response).await
        }
    }

    /// Handle error response
    async fn handle_error_response<T>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();

        let parsed = serde_json::from_str::<ErrorResponse>(&error_text).ok();
        let message = parsed
            .as_ref()
            .and_then(|body| body.text())
            .map(str::to_string);

        debug!(%status, body = %error_text, "request failed");

        match status {
            StatusCode::UNAUTHORIZED => Err(ApiError::Authentication {
                message: message.unwrap_or_else(|| "Authentication failed".into()),
            }),
            StatusCode::FORBIDDEN => Err(ApiError::Authorization {
                message: message.unwrap_or_else(|| "Access forbidden".into()),
            }),
            StatusCode::TOO_MANY_REQUESTS => Err(ApiError::RateLimitExceeded),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound {
                resource: message.unwrap_or_else(|| "Resource not found".into()),
            }),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(ApiError::BadRequest {
                    message: message.unwrap_or(error_text),
                })
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                Err(ApiError::ServiceUnavailable)
            }
            _ => Err(ApiError::Internal {
                message: message.unwrap_or_else(|| {
                    format!("Request failed with status {status}: {error_text}")
                }),
            }),
        }
    }
}

/// Builder for constructing a NyumbaClient with custom configuration
#[derive(Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    credentials: Option<Arc<dyn CredentialProvider>>,
    bearer_token: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL for the API
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Inject the credential provider consulted on every request
    pub fn credentials(mut self, provider: impl CredentialProvider + 'static) -> Self {
        self.credentials = Some(Arc::new(provider));
        self.bearer_token = None;
        self
    }

    /// Shorthand for a fixed bearer token
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self.credentials = None;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<NyumbaClient> {
        let raw_url = self.base_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(raw_url.trim()).map_err(|e| ApiError::InvalidRequest {
            message: format!("Invalid base URL '{raw_url}': {e}"),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidRequest {
                message: format!("Unsupported URL scheme '{}'", base_url.scheme()),
            });
        }

        let credentials: Arc<dyn CredentialProvider> = match (self.credentials, self.bearer_token) {
            (Some(provider), _) => provider,
            (None, Some(token)) => Arc::new(StaticToken::new(token)?),
            (None, None) => Arc::new(NoCredentials),
        };

        let mut http_builder = reqwest::Client::builder().timeout(
            self.timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        );
        if let Some(connect_timeout) = self.connect_timeout {
            http_builder = http_builder.connect_timeout(connect_timeout);
        }
        let http_client = http_builder.build().map_err(ApiError::HttpClient)?;

        debug!(
            base_url = %base_url,
            credentials = credentials.name(),
            "built Nyumba API client"
        );

        Ok(NyumbaClient::new(base_url, http_client, credentials))
    }
}
