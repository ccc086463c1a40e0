//! # microsandbox SDK
//!
//! Client-side configuration for talking to a microsandbox server.
//!
//! This crate holds the settings a client resolves once at startup (server URL, namespace,
//! sandbox name, API key) and the producer used to tag each request with a fresh identifier.
//! Identifiers come from [`msb_uuid::UuidValue`].
//!
//! **No transport concerns**: HTTP clients and request plumbing live with the caller.

pub mod config;
pub mod constants;

pub use config::{sandbox_name_for, RequestIdProducer, SdkConfig, SdkConfigBuilder};
pub use msb_uuid::{UuidError, UuidValue};

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// A setting was empty or otherwise unusable
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Generating a default sandbox name failed
    #[error("failed to generate identifier: {0}")]
    Uuid(#[from] UuidError),
}

pub type SdkResult<T> = std::result::Result<T, SdkError>;
