//! EdgeGrid (EG1-HMAC-SHA256) request signing
//!
//! ```text
//! signing_key = base64(HMAC-SHA256(client_secret, timestamp))
//! data        = METHOD \t scheme \t host \t path?query \t headers \t content_hash \t auth_prefix
//! signature   = base64(HMAC-SHA256(signing_key, data))
//! ```
//!
//! EG1 only hashes POST bodies. The transport issues GET and PUT, so the
//! content hash is always empty, and no headers are signed.

use crate::error::{ClientError, Result};
use crate::transport::Method;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use edgeflow_config::Credentials;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::Url;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "EG1-HMAC-SHA256";

/// Produces the `Authorization` header value for a request
pub trait RequestSigner: Send + Sync {
    fn authorization(&self, method: Method, url: &Url) -> Result<String>;
}

/// Signs requests with an `.edgerc` API client
pub struct EdgeGridSigner {
    client_token: String,
    client_secret: String,
    access_token: String,
}

impl EdgeGridSigner {
    pub fn new(credentials: &Credentials) -> Self {
        Self {
            client_token: credentials.client_token.clone(),
            client_secret: credentials.client_secret.clone(),
            access_token: credentials.access_token.clone(),
        }
    }

    fn sign_with(&self, method: Method, url: &Url, timestamp: &str, nonce: &str) -> Result<String> {
        let auth_prefix = format!(
            "{} client_token={};access_token={};timestamp={};nonce={};",
            ALGORITHM, self.client_token, self.access_token, timestamp, nonce
        );

        let host = url
            .host_str()
            .ok_or_else(|| ClientError::Signing(format!("URL has no host: {}", url)))?;
        let host = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let mut relative_url = url.path().to_string();
        if let Some(query) = url.query() {
            relative_url.push('?');
            relative_url.push_str(query);
        }

        let data_to_sign = [
            method.as_str(),
            url.scheme(),
            host.as_str(),
            relative_url.as_str(),
            "",
            "",
            auth_prefix.as_str(),
        ]
        .join("\t");

        let signing_key = hmac_base64(self.client_secret.as_bytes(), timestamp.as_bytes())?;
        let signature = hmac_base64(signing_key.as_bytes(), data_to_sign.as_bytes())?;

        Ok(format!("{}signature={}", auth_prefix, signature))
    }
}

impl RequestSigner for EdgeGridSigner {
    fn authorization(&self, method: Method, url: &Url) -> Result<String> {
        let timestamp = chrono::Utc::now().format("%Y%m%dT%H:%M:%S+0000").to_string();
        let nonce = uuid::Uuid::new_v4().to_string();
        self.sign_with(method, url, &timestamp, &nonce)
    }
}

fn hmac_base64(key: &[u8], data: &[u8]) -> Result<String> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| ClientError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
