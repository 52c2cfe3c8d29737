//! Core library for the `apicall` CLI.
//!
//! This crate defines:
//! - The API call adapter: one outbound request, one decoded result or failure
//! - The transport seam it delegates network I/O to
//! - Credential configuration
//! - Request builders and response schemas for each external service
//! - Formatting and the console flows built on top
//!
//! It is used by `apicall-cli`, but can also be reused by other binaries or services.

pub mod adapter;
pub mod config;
pub mod error;
pub mod report;
pub mod request;
pub mod script;
pub mod service;
pub mod transport;

pub use adapter::ApiAdapter;
pub use config::{Config, CredentialKey};
pub use error::{ApiFailure, ApiResult};
pub use request::{Credential, Method, RequestSpec};
pub use script::Scripts;
pub use service::{Endpoints, ServiceId};
pub use transport::{ReqwestTransport, Transport, TransportError, TransportRequest, TransportResponse};
