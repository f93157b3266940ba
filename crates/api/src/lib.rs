//! Fleetdeck backend API client.
//!
//! This module provides a lightweight client for the dashboard backend.
//! It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Discovering the bearer token from `FLEETDECK_API_KEY`
//! - Validating `FLEETDECK_API_BASE` for safety
//! - The three wire contracts the configuration engine produces/consumes:
//!   credential create, scheduled-task create, and the task
//!   execution-configuration read
//!
//! The primary entry point is [`FleetClient`]. Create an instance via
//! [`FleetClient::new_from_env`], then call the typed operations.
//!
//! # Example
//!
//! ```ignore
//! use fleetdeck_api::FleetClient;
//! use anyhow::Result;
//!
//! async fn run() -> Result<()> {
//!     let client = FleetClient::new_from_env()?;
//!     let config = client.fetch_task_execution_config("task-9").await?;
//!     println!("declared keys: {:?}", config.keys().collect::<Vec<_>>());
//!     Ok(())
//! }
//! ```

use std::env;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use fleetdeck_types::{CredentialPayload, ExecutionConfig, ScheduledTaskPayload};
use fleetdeck_util::redact_sensitive;
use reqwest::{Client, RequestBuilder, StatusCode, Url, header};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming the backend base URL.
pub const API_BASE_ENV_VAR: &str = "FLEETDECK_API_BASE";
/// Environment variable carrying the bearer token.
pub const API_KEY_ENV_VAR: &str = "FLEETDECK_API_KEY";

const DEFAULT_BASE_URL: &str = "https://api.fleetdeck.io";

/// Allowed hostnames or base domains for non-local configurations of
/// `FLEETDECK_API_BASE`. Subdomains of these domains are also allowed.
const ALLOWED_FLEETDECK_DOMAINS: &[&str] = &["fleetdeck.io", "fleetdeck.dev"];
/// Hostnames allowed for local development regardless of scheme.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Errors surfaced from a backend operation.
///
/// Transport and backend failures are surfaced once to the operator and are
/// never retried automatically by this layer; the in-progress dialog draft
/// is preserved by the caller so a retry needs no re-entry.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Backend { status: StatusCode, body: String },
}

#[derive(Debug, Clone)]
/// Thin wrapper around a configured `reqwest::Client` for backend access.
///
/// The client pre-configures default headers and builds requests against a
/// validated base URL. Authentication is read from the environment.
pub struct FleetClient {
    pub base_url: String,
    pub http: Client,
    pub user_agent: String,
}

impl FleetClient {
    /// Construct a [`FleetClient`] from environment variables.
    ///
    /// The base URL is taken from `FLEETDECK_API_BASE` (if set) or falls
    /// back to the default public API. Non-localhost hosts must use HTTPS
    /// and be within an allowed fleetdeck domain. The bearer token comes
    /// from `FLEETDECK_API_KEY`; requests are sent unauthenticated when it
    /// is absent, and the backend rejects them with a normal error
    /// response.
    pub fn new_from_env() -> Result<Self> {
        let api_token = env::var(API_KEY_ENV_VAR).ok();

        let mut default_headers = header::HeaderMap::new();
        if let Some(api_token) = api_token {
            let authorization_header_value = format!("Bearer {}", api_token);
            default_headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&authorization_header_value).context("authorization header value")?,
            );
        }
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("build http client")?;

        let base_url = env::var(API_BASE_ENV_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.into());
        validate_base_url(&base_url)?;

        Ok(Self {
            base_url,
            http,
            user_agent: format!("fleetdeck-cli/0.1; {}", env::consts::OS),
        })
    }

    /// Build a `reqwest::RequestBuilder` for a method and API-relative path.
    pub fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "building request");

        self.http
            .request(method, url)
            .header(header::USER_AGENT, &self.user_agent)
    }

    /// Store a credential described by a validated payload.
    pub async fn create_credential(&self, payload: &CredentialPayload) -> Result<Value, ApiError> {
        let response = self
            .request(reqwest::Method::POST, "/credentials")
            .json(payload)
            .send()
            .await?;
        read_json_response(response).await
    }

    /// Create a recurring scheduled task run.
    pub async fn create_scheduled_task(&self, payload: &ScheduledTaskPayload) -> Result<Value, ApiError> {
        let response = self
            .request(reqwest::Method::POST, "/scheduled-tasks")
            .json(payload)
            .send()
            .await?;
        read_json_response(response).await
    }

    /// Read a task's execution configuration.
    ///
    /// Only the key set (plus values for default-seeding) matters to the
    /// engine; a task without an execution configuration yields an empty
    /// map rather than an error.
    pub async fn fetch_task_execution_config(&self, task_id: &str) -> Result<ExecutionConfig, ApiError> {
        let path = format!("/tasks/{}", task_id);
        let response = self.request(reqwest::Method::GET, &path).send().await?;
        let body = read_json_response(response).await?;
        let envelope: TaskEnvelope = serde_json::from_value(body).unwrap_or_default();
        Ok(envelope.execution_config.unwrap_or_default())
    }
}

/// Task read envelope; everything but the execution configuration is the
/// dashboard's concern, not the engine's.
#[derive(Debug, Default, Deserialize)]
struct TaskEnvelope {
    #[serde(default)]
    execution_config: Option<ExecutionConfig>,
}

/// Turns a response into JSON, mapping non-2xx statuses onto
/// [`ApiError::Backend`] with a redacted body excerpt.
async fn read_json_response(response: reqwest::Response) -> Result<Value, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Backend {
            status,
            body: redact_sensitive(&body),
        });
    }
    if status == StatusCode::NO_CONTENT {
        return Ok(Value::Null);
    }
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS, and host must be one of the allowed
///   fleetdeck domains or a subdomain thereof
fn validate_base_url(base: &str) -> Result<()> {
    let parsed_base_url = Url::parse(base).map_err(|e| anyhow!("Invalid FLEETDECK_API_BASE URL '{}': {}", base, e))?;

    let host_name = parsed_base_url
        .host_str()
        .ok_or_else(|| anyhow!("FLEETDECK_API_BASE must include a host"))?;

    // Local development allowances: localhost/127.0.0.1 with any scheme.
    if LOCALHOST_DOMAINS
        .iter()
        .any(|&allowed| host_name.eq_ignore_ascii_case(allowed))
    {
        return Ok(());
    }

    // Production/staging: must be HTTPS and end with one of the allowed domains.
    if parsed_base_url.scheme() != "https" {
        return Err(anyhow!(
            "FLEETDECK_API_BASE must use https for non-localhost hosts; got '{}://'",
            parsed_base_url.scheme()
        ));
    }

    let is_allowed_domain = ALLOWED_FLEETDECK_DOMAINS.iter().any(|&allowed_domain| {
        host_name.eq_ignore_ascii_case(allowed_domain) || host_name.ends_with(&format!(".{}", allowed_domain))
    });
    if !is_allowed_domain {
        return Err(anyhow!(
            "FLEETDECK_API_BASE host '{}' is not allowed; must be one of {:?} or a subdomain, or localhost",
            host_name,
            ALLOWED_FLEETDECK_DOMAINS
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_allows_any_scheme() {
        assert!(validate_base_url("http://localhost:8080").is_ok());
        assert!(validate_base_url("http://127.0.0.1:3000").is_ok());
    }

    #[test]
    fn non_localhost_requires_https() {
        assert!(validate_base_url("http://api.fleetdeck.io").is_err());
        assert!(validate_base_url("https://api.fleetdeck.io").is_ok());
    }

    #[test]
    fn domain_allow_list_covers_subdomains_only() {
        assert!(validate_base_url("https://staging.fleetdeck.dev").is_ok());
        assert!(validate_base_url("https://fleetdeck.io").is_ok());
        assert!(validate_base_url("https://evil-fleetdeck.io").is_err());
        assert!(validate_base_url("https://example.com").is_err());
    }

    #[test]
    fn base_url_defaults_and_respects_env() {
        temp_env::with_var(API_BASE_ENV_VAR, None::<&str>, || {
            temp_env::with_var(API_KEY_ENV_VAR, None::<&str>, || {
                let client = FleetClient::new_from_env().expect("default base is valid");
                assert_eq!(client.base_url, DEFAULT_BASE_URL);
            });
        });

        temp_env::with_var(API_BASE_ENV_VAR, Some("http://localhost:9999"), || {
            temp_env::with_var(API_KEY_ENV_VAR, None::<&str>, || {
                let client = FleetClient::new_from_env().expect("localhost base is valid");
                assert_eq!(client.base_url, "http://localhost:9999");
            });
        });

        temp_env::with_var(API_BASE_ENV_VAR, Some("https://not-allowed.example.com"), || {
            assert!(FleetClient::new_from_env().is_err());
        });
    }

    #[test]
    fn task_envelope_tolerates_missing_execution_config() {
        let envelope: TaskEnvelope = serde_json::from_str(r#"{ "id": "task-1", "name": "Crawl" }"#).expect("parse task");
        assert!(envelope.execution_config.is_none());

        let envelope: TaskEnvelope =
            serde_json::from_str(r#"{ "execution_config": { "url": "https://example.com", "depth": 2 } }"#)
                .expect("parse task");
        let config = envelope.execution_config.expect("config present");
        let keys: Vec<&String> = config.keys().collect();
        assert_eq!(keys, vec!["url", "depth"]);
    }
}
