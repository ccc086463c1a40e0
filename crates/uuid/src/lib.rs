//! 128-bit identifiers for the microsandbox SDK.
//!
//! The SDK tags requests and names sandboxes with random (version 4) UUIDs. This crate owns the
//! value type used for that, [`UuidValue`], together with its text and binary encodings.
//!
//! ## Canonical text form
//! - Length: 36
//! - Layout: `8-4-4-4-12` hex digits, `-` at offsets 8, 13, 18 and 23
//! - Characters: lower-case `0-9` and `a-f` on output; parsing is case-insensitive
//! - Example: `550e8400-e29b-41d4-a716-446655440000`
//!
//! ## Binary form
//! The 16 raw octets in the same order as the text groups (octets 0-3, 4-5, 6-7, 8-9, 10-15).
//!
//! Notes:
//! - Parsing accepts any syntactically valid UUID, not only version 4.
//! - The nil value (all zero octets) is an ordinary value. Use `Option<UuidValue>` for absence.
//! - [`UuidValue::must_generate`] and [`UuidValue::must_parse`] panic on failure and are not
//!   meant for untrusted input.

mod codec;
mod service;

// Re-export public types
pub use codec::StoredValue;
pub use service::UuidValue;

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// The secure random source could not supply 16 bytes.
    #[error("secure random source unavailable: {0}")]
    Entropy(#[source] rand::Error),

    /// Text was not 36 characters, or a binary buffer was not 16 bytes.
    #[error("invalid UUID length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Separators in the wrong place or non-hex digits.
    #[error("invalid UUID format: {0}")]
    InvalidFormat(String),

    /// The storage codec was handed a value kind it cannot read.
    #[error("cannot convert {0} to UUID")]
    TypeMismatch(&'static str),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
