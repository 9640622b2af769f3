//! EdgeGrid-signed HTTP transport for edgeflow
//!
//! This crate is the only place that speaks HTTP. Callers depend on the
//! [`Transport`] trait; the production implementation is [`EdgeGridClient`],
//! which signs each request with [`EdgeGridSigner`].
//!
//! # Example
//!
//! ```ignore
//! use edgeflow_client::{EdgeGridClient, Method, Transport};
//! use edgeflow_config::Credentials;
//!
//! let credentials = Credentials::load("~/.edgerc", "default")?;
//! let client = EdgeGridClient::new(&credentials)?;
//!
//! let body = client
//!     .send(Method::Get, "/appsec/v1/configs/12345/versions", None)
//!     .await?;
//! ```

pub mod client;
pub mod error;
pub mod signer;
pub mod transport;

pub use client::EdgeGridClient;
pub use error::{ClientError, Result};
pub use signer::{EdgeGridSigner, RequestSigner};
pub use transport::{Method, Transport};
