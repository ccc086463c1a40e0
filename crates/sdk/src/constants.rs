//! Default values for the SDK configuration.

/// Server the SDK talks to when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5555";

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Prefix of generated sandbox names.
pub const SANDBOX_NAME_PREFIX: &str = "sandbox-";

/// Printf-style template for generated sandbox names: the prefix plus 8 zero-padded
/// lower-case hex digits. Rendered by [`crate::sandbox_name_for`].
pub const DEFAULT_NAME_TEMPLATE: &str = "sandbox-%08x";
