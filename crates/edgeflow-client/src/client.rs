//! Signed HTTP client

use crate::error::{ClientError, Result};
use crate::signer::{EdgeGridSigner, RequestSigner};
use crate::transport::{Method, Transport};
use async_trait::async_trait;
use edgeflow_config::Credentials;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("edgeflow/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout; a hung call fails the step instead of stalling a poll loop
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// EdgeGrid-authenticated API client
pub struct EdgeGridClient<S = EdgeGridSigner> {
    http: reqwest::Client,
    base_url: Url,
    signer: S,
}

impl EdgeGridClient<EdgeGridSigner> {
    /// Client for the host and API client named in `credentials`
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let base_url = Url::parse(&credentials.base_url())?;
        Self::with_signer(base_url, EdgeGridSigner::new(credentials))
    }
}

impl<S: RequestSigner> EdgeGridClient<S> {
    pub fn with_signer(base_url: Url, signer: S) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url,
            signer,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl<S: RequestSigner> Transport for EdgeGridClient<S> {
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let url = self.base_url.join(path)?;
        let authorization = self.signer.authorization(method, &url)?;

        tracing::debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method.into(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, authorization);
        if let Some(body) = body {
            request = request.body(body);
        }

        let http_error = |source| ClientError::Http {
            method: method.to_string(),
            path: path.to_string(),
            source,
        };

        let response = request.send().await.map_err(http_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(http_error)?;

        if !status.is_success() {
            tracing::debug!("{} {} -> {}", method, path, status);
            return Err(ClientError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(bytes.to_vec())
    }
}
