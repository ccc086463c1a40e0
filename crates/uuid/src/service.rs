//! The [`UuidValue`] type: generation, parsing, formatting and introspection.

use crate::{UuidError, UuidResult};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::{fmt, str::FromStr};

/// Length of the canonical text form.
pub(crate) const TEXT_LEN: usize = 36;

/// Number of octets in a UUID.
pub(crate) const OCTET_LEN: usize = 16;

const DASH_OFFSETS: [usize; 4] = [8, 13, 18, 23];

/// Text groups as `(text offset, first octet, end octet)`.
const GROUPS: [(usize, usize, usize); 5] = [
    (0, 0, 4),
    (9, 4, 6),
    (14, 6, 8),
    (19, 8, 10),
    (24, 10, 16),
];

/// A 128-bit universally unique identifier.
///
/// The value is 16 octets with plain value semantics: it is `Copy`, compares and hashes by its
/// octets, and orders the same way its canonical text sorts.
///
/// # Construction
/// - [`UuidValue::generate`] draws a fresh random version 4 identifier.
/// - [`UuidValue::parse`] decodes the 36-character canonical text form (any version).
/// - [`UuidValue::from_bytes`] wraps 16 raw octets as-is.
/// - [`UuidValue::NIL`] is the all-zero value.
///
/// Only generated values are guaranteed to carry the version 4 / RFC 4122 variant bits.
///
/// # Display format
/// `Display` always produces the lower-case canonical form, e.g.
/// `550e8400-e29b-41d4-a716-446655440000`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UuidValue([u8; OCTET_LEN]);

impl UuidValue {
    /// The nil UUID, `00000000-0000-0000-0000-000000000000`.
    pub const NIL: Self = Self([0; OCTET_LEN]);

    /// Returns the nil UUID.
    pub const fn nil() -> Self {
        Self::NIL
    }

    /// Wraps 16 raw octets without touching the version or variant bits.
    pub const fn from_bytes(bytes: [u8; OCTET_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrows the 16 octets in text-group order.
    pub const fn as_bytes(&self) -> &[u8; OCTET_LEN] {
        &self.0
    }

    /// Consumes the value, returning its octets.
    ///
    /// # Returns
    ///
    /// The same 16 octets [`UuidValue::as_bytes`] borrows, by value.
    pub const fn into_bytes(self) -> [u8; OCTET_LEN] {
        self.0
    }

    /// Returns true if every octet is zero.
    pub fn is_nil(&self) -> bool {
        self.0 == [0; OCTET_LEN]
    }

    /// Generates a random version 4 UUID from the operating system's secure random source.
    ///
    /// May block briefly on platforms whose entropy pool is not yet seeded.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Entropy`] if the random source cannot supply 16 bytes.
    pub fn generate() -> UuidResult<Self> {
        Self::generate_with(&mut OsRng)
    }

    /// Generates a random version 4 UUID from the given secure random source.
    ///
    /// All 16 octets are drawn from `rng`, then octet 6 is stamped with version 4 and octet 8
    /// with the RFC 4122 variant, whatever bits were drawn there.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::Entropy`] if `rng` fails to fill the buffer.
    pub fn generate_with<R>(rng: &mut R) -> UuidResult<Self>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let mut bytes = [0u8; OCTET_LEN];
        rng.try_fill_bytes(&mut bytes).map_err(UuidError::Entropy)?;

        bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
        bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122
        Ok(Self(bytes))
    }

    /// Generates a random version 4 UUID, aborting if no entropy is available.
    ///
    /// # Panics
    ///
    /// Panics if the secure random source fails. Use [`UuidValue::generate`] where that failure
    /// must be handled.
    pub fn must_generate() -> Self {
        match Self::generate() {
            Ok(value) => value,
            Err(err) => panic!("must_generate: {err}"),
        }
    }

    /// Parses the 36-character canonical text form.
    ///
    /// Hex digits may be upper or lower case. The version and variant bits are not checked, so a
    /// syntactically valid UUID of any version is accepted.
    ///
    /// # Errors
    ///
    /// - [`UuidError::InvalidLength`] if `input` is not 36 bytes long.
    /// - [`UuidError::InvalidFormat`] if a separator is not `-` or a digit is not hex.
    pub fn parse(input: &str) -> UuidResult<Self> {
        Self::parse_bytes(input.as_bytes())
    }

    /// Parses text that is trusted to be a valid UUID, such as a literal in source code.
    ///
    /// # Panics
    ///
    /// Panics if `input` does not parse. Never call this on untrusted input.
    pub fn must_parse(input: &str) -> Self {
        match Self::parse(input) {
            Ok(value) => value,
            Err(err) => panic!("must_parse({input:?}): {err}"),
        }
    }

    /// Checks that `input` parses, discarding the value.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`UuidValue::parse`].
    pub fn validate(input: &str) -> UuidResult<()> {
        Self::parse(input).map(|_| ())
    }

    pub(crate) fn parse_bytes(input: &[u8]) -> UuidResult<Self> {
        if input.len() != TEXT_LEN {
            return Err(UuidError::InvalidLength {
                expected: TEXT_LEN,
                actual: input.len(),
            });
        }

        if let Some(offset) = DASH_OFFSETS.iter().find(|&&i| input[i] != b'-') {
            return Err(UuidError::InvalidFormat(format!(
                "expected '-' at offset {offset}"
            )));
        }

        let mut bytes = [0u8; OCTET_LEN];
        for &(text_start, start, end) in &GROUPS {
            let digits = &input[text_start..text_start + 2 * (end - start)];
            hex::decode_to_slice(digits, &mut bytes[start..end]).map_err(|err| match err {
                hex::FromHexError::InvalidHexCharacter { c, index } => UuidError::InvalidFormat(
                    format!("invalid hex character {c:?} at offset {}", text_start + index),
                ),
                other => UuidError::InvalidFormat(other.to_string()),
            })?;
        }

        Ok(Self(bytes))
    }

    /// Returns the lower-case canonical text form.
    pub fn hyphenated(&self) -> String {
        let mut text = String::with_capacity(TEXT_LEN);
        for (i, &(_, start, end)) in GROUPS.iter().enumerate() {
            if i > 0 {
                text.push('-');
            }
            text.push_str(&hex::encode(&self.0[start..end]));
        }
        text
    }

    /// Returns the version nibble (high 4 bits of octet 6). Not validated.
    pub fn version(&self) -> u8 {
        self.0[6] >> 4
    }

    /// Returns `(octet8 >> 5) ^ 0b100`, the raw variant integer. Not validated or decoded.
    ///
    /// The RFC 4122 layout (`10x` in the top bits) maps to 0 or 1, so every generated value
    /// reports 0 or 1 here.
    pub fn variant(&self) -> u8 {
        (self.0[8] >> 5) ^ 0b100
    }
}

impl fmt::Display for UuidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hyphenated())
    }
}

impl fmt::Debug for UuidValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UuidValue({})", self.hyphenated())
    }
}

impl FromStr for UuidValue {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UuidValue::parse(s)
    }
}

impl TryFrom<&str> for UuidValue {
    type Error = UuidError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        UuidValue::parse(value)
    }
}

impl From<[u8; OCTET_LEN]> for UuidValue {
    fn from(bytes: [u8; OCTET_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for UuidValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<::uuid::Uuid> for UuidValue {
    fn from(value: ::uuid::Uuid) -> Self {
        Self(*value.as_bytes())
    }
}

impl From<UuidValue> for ::uuid::Uuid {
    fn from(value: UuidValue) -> Self {
        ::uuid::Uuid::from_bytes(value.0)
    }
}
