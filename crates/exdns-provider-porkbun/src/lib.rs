// # Porkbun DNS Provider
//
// This crate provides the Porkbun record client for the external-dns webhook.
//
// ## Scope
//
// - One HTTP request per RecordClient call
// - Full error propagation (no retry, no backoff, no caching)
// - HTTP timeout configured (30 seconds)
// - Specific error mapping for HTTP status codes (401/403, 404, 429, 5xx)
//   and for `"status": "ERROR"` payloads
//
// All zone matching, translation and ordering lives in `exdns-core`.
//
// ## Security Requirements
//
// - API key and secret key NEVER appear in logs or Debug output
// - Credentials travel in the JSON body, never in the URL
// - Construction fails fast if either credential is empty
//
// ## API Reference
//
// - Porkbun API v3: https://porkbun.com/api/json/v3/documentation
// - Retrieve records: POST `/dns/retrieve/:domain`
// - Create record:    POST `/dns/create/:domain`
// - Edit record:      POST `/dns/edit/:domain/:id`
// - Delete record:    POST `/dns/delete/:domain/:id`

use async_trait::async_trait;
use exdns_core::config::{ProviderConfig, WebhookConfig};
use exdns_core::traits::{Provider, ProviderFactory, RecordClient};
use exdns_core::{DomainFilter, ProviderRecord, Reconciler};
use exdns_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Porkbun API base URL
const PORKBUN_API_BASE: &str = "https://api.porkbun.com/api/json/v3";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider name used in errors and logs
const PROVIDER_NAME: &str = "porkbun";

/// Porkbun record API client
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the credentials.
pub struct PorkbunClient {
    /// Porkbun API key
    /// ⚠️ NEVER log this value
    api_key: String,

    /// Porkbun secret API key
    /// ⚠️ NEVER log this value
    secret_key: String,

    /// API base URL (overridable for tests)
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the credentials
impl fmt::Debug for PorkbunClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PorkbunClient")
            .field("api_key", &"<REDACTED>")
            .field("secret_key", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Credentials sent with every request
#[derive(Serialize)]
struct Credentials<'a> {
    apikey: &'a str,
    secretapikey: &'a str,
}

/// Body of create and edit requests
#[derive(Serialize)]
struct RecordRequest<'a> {
    #[serde(flatten)]
    credentials: Credentials<'a>,
    name: &'a str,
    #[serde(rename = "type")]
    record_type: &'a str,
    content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    ttl: Option<&'a str>,
}

/// Porkbun returns ids as strings when listing and as numbers on create
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Number(n) => write!(f, "{}", n),
            WireValue::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    id: WireValue,
    name: String,
    #[serde(rename = "type")]
    record_type: String,
    content: String,
    #[serde(default)]
    ttl: Option<WireValue>,
}

impl From<WireRecord> for ProviderRecord {
    fn from(record: WireRecord) -> Self {
        ProviderRecord {
            id: record.id.to_string(),
            record_type: record.record_type,
            name: record.name,
            content: record.content,
            ttl: record.ttl.map(|ttl| ttl.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RetrieveResponse {
    #[serde(default)]
    records: Vec<WireRecord>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: WireValue,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {}

impl PorkbunClient {
    /// Create a new Porkbun client
    ///
    /// # Parameters
    ///
    /// - `api_key`: Porkbun API key (`pk1_...`)
    /// - `secret_key`: Porkbun secret API key (`sk1_...`)
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either credential is empty or the
    /// HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let secret_key = secret_key.into();

        if api_key.is_empty() {
            return Err(Error::config("porkbun provider requires an API key"));
        }
        if secret_key.is_empty() {
            return Err(Error::config("porkbun provider requires a secret key"));
        }

        // Build HTTP client with timeout
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            secret_key,
            base_url: PORKBUN_API_BASE.to_string(),
            client,
        })
    }

    /// Point the client at a different API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn credentials(&self) -> Credentials<'_> {
        Credentials {
            apikey: &self.api_key,
            secretapikey: &self.secret_key,
        }
    }

    fn record_request<'a>(&'a self, record: &'a ProviderRecord) -> RecordRequest<'a> {
        RecordRequest {
            credentials: self.credentials(),
            name: &record.name,
            record_type: &record.record_type,
            content: &record.content,
            ttl: Some(record.ttl.as_str()).filter(|ttl| !ttl.is_empty()),
        }
    }

    /// POST `body` to `path` and decode a successful response
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /:path
    /// Content-Type: application/json
    ///
    /// {"apikey": "...", "secretapikey": "...", ...}
    /// ```
    async fn call<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("Calling Porkbun API: POST /{}", path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::http(format!("Request to /{} failed: {}", path, e)))?;

        let status = response.status();

        // Map HTTP status codes to specific errors
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            let message = error_message(&text).unwrap_or(text);
            return match status.as_u16() {
                401 | 403 => Err(Error::auth(format!(
                    "Invalid API key or insufficient permissions. Status: {} - {}",
                    status, message
                ))),
                404 => Err(Error::not_found(format!("/{}: {}", path, message))),
                429 => Err(Error::rate_limited(format!(
                    "Rate limit exceeded. Please retry later. Status: {}",
                    status
                ))),
                500..=599 => Err(Error::provider(
                    PROVIDER_NAME,
                    format!("Porkbun server error (transient): {} - {}", status, message),
                )),
                _ => Err(Error::provider(
                    PROVIDER_NAME,
                    format!("/{} failed: {} - {}", path, status, message),
                )),
            };
        }

        let text = response
            .text()
            .await
            .map_err(|e| Error::http(format!("Failed to read response from /{}: {}", path, e)))?;

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            Error::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
        })?;

        if json["status"].as_str() != Some("SUCCESS") {
            let message = json["message"].as_str().unwrap_or("unknown error");
            return Err(Error::provider(
                PROVIDER_NAME,
                format!("/{} failed: {}", path, message),
            ));
        }

        serde_json::from_value(json).map_err(|e| {
            Error::provider(PROVIDER_NAME, format!("Invalid response format: {}", e))
        })
    }
}

/// Extract the `message` of an error payload, if the body is one
fn error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json["message"].as_str().map(str::to_string)
}

#[async_trait]
impl RecordClient for PorkbunClient {
    async fn list_records(&self, zone: &str) -> Result<Vec<ProviderRecord>> {
        let response: RetrieveResponse = self
            .call(&format!("dns/retrieve/{}", zone), &self.credentials())
            .await?;

        tracing::debug!("Retrieved {} record(s) for {}", response.records.len(), zone);
        Ok(response.records.into_iter().map(ProviderRecord::from).collect())
    }

    async fn create_record(&self, zone: &str, record: &ProviderRecord) -> Result<String> {
        let response: CreateResponse = self
            .call(&format!("dns/create/{}", zone), &self.record_request(record))
            .await?;

        Ok(response.id.to_string())
    }

    async fn update_record(&self, zone: &str, id: i64, record: &ProviderRecord) -> Result<()> {
        let _: StatusResponse = self
            .call(&format!("dns/edit/{}/{}", zone, id), &self.record_request(record))
            .await?;

        Ok(())
    }

    async fn delete_record(&self, zone: &str, id: i64) -> Result<()> {
        let _: StatusResponse = self
            .call(&format!("dns/delete/{}/{}", zone, id), &self.credentials())
            .await?;

        Ok(())
    }

    fn client_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Factory for creating Porkbun-backed providers
#[derive(Debug, Default)]
pub struct PorkbunFactory {
    base_url: Option<String>,
}

impl PorkbunFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build clients against a different API base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }
}

impl ProviderFactory for PorkbunFactory {
    fn create(&self, config: &WebhookConfig) -> Result<Box<dyn Provider>> {
        config.validate()?;

        match &config.provider {
            ProviderConfig::Porkbun {
                api_key,
                secret_key,
            } => {
                let domain_filter = DomainFilter::new(&config.domain_filter)?;

                let mut client = PorkbunClient::new(api_key.clone(), secret_key.clone())?;
                if let Some(base_url) = &self.base_url {
                    client = client.with_base_url(base_url.clone());
                }

                tracing::info!(
                    "Porkbun provider configured for {} zone(s)",
                    domain_filter.zones().len()
                );

                Ok(Box::new(Reconciler::new(Box::new(client), domain_filter)))
            }
        }
    }
}
