//! Transport abstraction
//!
//! Everything above this crate talks to the API through [`Transport`], so
//! tests can swap the signed HTTP client for a scripted fake.

use crate::error::Result;
use async_trait::async_trait;
use std::fmt;

/// HTTP methods used against the configuration APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Put,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Put => reqwest::Method::PUT,
        }
    }
}

/// Issues one request and returns the raw response body
///
/// Implementations send JSON, authenticate the request, and turn any status
/// outside [200, 300) into [`crate::ClientError::Status`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        (**self).send(method, path, body).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        (**self).send(method, path, body).await
    }
}
