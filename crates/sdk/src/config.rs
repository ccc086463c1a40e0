//! SDK runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed to whatever issues
//! requests. The library never reads environment variables itself; callers read them and hand
//! the values to [`SdkConfig::from_env_values`].

use crate::constants::{DEFAULT_NAMESPACE, DEFAULT_SERVER_URL, SANDBOX_NAME_PREFIX};
use crate::{SdkError, SdkResult};
use msb_uuid::UuidValue;
use std::fmt;
use std::sync::Arc;

/// Produces the identifier attached to each outgoing request.
pub type RequestIdProducer = Arc<dyn Fn() -> String + Send + Sync>;

/// Default producer: a fresh version 4 UUID in canonical text form.
///
/// Aborts if the OS random source is unavailable, since there is no sensible fallback id.
fn default_request_id() -> String {
    UuidValue::must_generate().to_string()
}

/// Renders the sandbox name for `id`: `sandbox-` plus the first four octets as 8 lower-case
/// hex digits.
pub fn sandbox_name_for(id: &UuidValue) -> String {
    let [a, b, c, d, ..] = id.into_bytes();
    format!(
        "{SANDBOX_NAME_PREFIX}{:08x}",
        u32::from_be_bytes([a, b, c, d])
    )
}

/// SDK configuration resolved at startup.
#[derive(Clone)]
pub struct SdkConfig {
    server_url: String,
    namespace: String,
    name: String,
    api_key: Option<String>,
    request_id_producer: RequestIdProducer,
}

impl SdkConfig {
    /// Starts a builder with every field at its default.
    pub fn builder() -> SdkConfigBuilder {
        SdkConfigBuilder::default()
    }

    /// Resolves configuration from optional, already-read values.
    ///
    /// Values that are `None` or blank after trimming fall back to the defaults.
    pub fn from_env_values(
        server_url: Option<String>,
        namespace: Option<String>,
        name: Option<String>,
        api_key: Option<String>,
    ) -> SdkResult<Self> {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        let mut builder = Self::builder();
        if let Some(server_url) = present(server_url) {
            builder = builder.server_url(server_url);
        }
        if let Some(namespace) = present(namespace) {
            builder = builder.namespace(namespace);
        }
        if let Some(name) = present(name) {
            builder = builder.name(name);
        }
        if let Some(api_key) = present(api_key) {
            builder = builder.api_key(api_key);
        }
        builder.build()
    }

    /// Base URL of the microsandbox server.
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Namespace sandboxes are created in.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Sandbox name, either configured or generated as `sandbox-xxxxxxxx`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// API key sent with requests, if one was configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Calls the configured producer for the next request identifier.
    pub fn next_request_id(&self) -> String {
        (self.request_id_producer)()
    }
}

impl fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SdkConfig")
            .field("server_url", &self.server_url)
            .field("namespace", &self.namespace)
            .field("name", &self.name)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// Builder for [`SdkConfig`].
#[derive(Default)]
pub struct SdkConfigBuilder {
    server_url: Option<String>,
    namespace: Option<String>,
    name: Option<String>,
    api_key: Option<String>,
    request_id_producer: Option<RequestIdProducer>,
}

impl SdkConfigBuilder {
    /// Sets the server URL.
    ///
    /// # Arguments
    ///
    /// * `server_url` - Base URL, e.g. `http://127.0.0.1:5555`. Must not be blank.
    pub fn server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = Some(server_url.into());
        self
    }

    /// Sets the namespace. Must not be blank.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets an explicit sandbox name instead of a generated one.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replaces the default UUID-based request id producer.
    pub fn request_id_producer<F>(mut self, producer: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.request_id_producer = Some(Arc::new(producer));
        self
    }

    /// Validates the settings and fills in defaults.
    ///
    /// When no name was given, one is derived from a freshly generated UUID.
    ///
    /// # Errors
    ///
    /// - [`SdkError::InvalidInput`] if the server URL, namespace or an explicit name is empty.
    /// - [`SdkError::Uuid`] if a default name was needed and no entropy was available.
    pub fn build(self) -> SdkResult<SdkConfig> {
        let server_url = self
            .server_url
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        if server_url.trim().is_empty() {
            return Err(SdkError::InvalidInput("server_url cannot be empty".into()));
        }

        let namespace = self
            .namespace
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        if namespace.trim().is_empty() {
            return Err(SdkError::InvalidInput("namespace cannot be empty".into()));
        }

        let name = match self.name {
            Some(name) if name.trim().is_empty() => {
                return Err(SdkError::InvalidInput("name cannot be empty".into()));
            }
            Some(name) => name,
            None => sandbox_name_for(&UuidValue::generate()?),
        };

        let request_id_producer = match self.request_id_producer {
            Some(producer) => {
                tracing::debug!("using custom request id producer");
                producer
            }
            None => Arc::new(default_request_id) as RequestIdProducer,
        };

        tracing::debug!(%server_url, %namespace, %name, "sdk config resolved");

        Ok(SdkConfig {
            server_url,
            namespace,
            name,
            api_key: self.api_key,
            request_id_producer,
        })
    }
}
