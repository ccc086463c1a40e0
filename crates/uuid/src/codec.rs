//! Text, binary and storage encodings of [`UuidValue`].

use crate::service::{OCTET_LEN, TEXT_LEN};
use crate::{UuidError, UuidResult, UuidValue};

/// A scalar as handed to or read back from an external store, such as a database column.
///
/// Reading a [`UuidValue`] dispatches on the variant:
/// - `Uuid` is copied directly.
/// - `Blob` of exactly 16 bytes is copied as binary; any other blob is decoded as text.
/// - `Text` is decoded as text.
/// - `Null` yields [`UuidValue::NIL`].
/// - `Integer`, `Real` and `Boolean` are rejected with [`UuidError::TypeMismatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum StoredValue {
    /// Missing or SQL `NULL`
    Null,
    /// Already a typed UUID
    Uuid(UuidValue),
    /// Raw bytes: 16 octets, or text bytes
    Blob(Vec<u8>),
    /// Canonical or upper-case text
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
}

impl StoredValue {
    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            StoredValue::Null => "null",
            StoredValue::Uuid(_) => "uuid",
            StoredValue::Blob(_) => "blob",
            StoredValue::Text(_) => "text",
            StoredValue::Integer(_) => "integer",
            StoredValue::Real(_) => "real",
            StoredValue::Boolean(_) => "boolean",
        }
    }
}

impl UuidValue {
    /// Encodes the canonical text form as ASCII bytes.
    pub fn to_text_bytes(&self) -> Vec<u8> {
        self.hyphenated().into_bytes()
    }

    /// Decodes the canonical text form from raw bytes.
    ///
    /// # Errors
    ///
    /// Same as [`UuidValue::parse`]: [`UuidError::InvalidLength`] unless `data` is 36 bytes,
    /// [`UuidError::InvalidFormat`] for bad separators or digits.
    pub fn from_text_bytes(data: &[u8]) -> UuidResult<Self> {
        Self::parse_bytes(data)
    }

    /// Encodes the 16 raw octets. No separators, no bit stamping.
    pub fn to_binary(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Decodes 16 raw octets verbatim. Version and variant bits are not checked.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidLength`] unless `data` is exactly 16 bytes.
    pub fn from_binary(data: &[u8]) -> UuidResult<Self> {
        let bytes: [u8; OCTET_LEN] = data.try_into().map_err(|_| UuidError::InvalidLength {
            expected: OCTET_LEN,
            actual: data.len(),
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Value written to an external store: the canonical text form.
    pub fn to_stored(&self) -> StoredValue {
        StoredValue::Text(self.hyphenated())
    }

    /// Reads a value back from an external store.
    ///
    /// # Errors
    ///
    /// - [`UuidError::TypeMismatch`] for numeric and boolean sources.
    /// - Text codec errors for text or non-16-byte blobs.
    pub fn from_stored(source: &StoredValue) -> UuidResult<Self> {
        match source {
            StoredValue::Uuid(value) => Ok(*value),
            StoredValue::Blob(data) if data.len() == OCTET_LEN => Self::from_binary(data),
            StoredValue::Blob(data) => Self::from_text_bytes(data),
            StoredValue::Text(text) => Self::parse(text),
            StoredValue::Null => Ok(Self::NIL),
            other => Err(UuidError::TypeMismatch(other.kind())),
        }
    }
}

impl TryFrom<&[u8]> for UuidValue {
    type Error = UuidError;

    /// Binary decode; see [`UuidValue::from_binary`].
    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        UuidValue::from_binary(data)
    }
}

impl From<UuidValue> for StoredValue {
    fn from(value: UuidValue) -> Self {
        value.to_stored()
    }
}

impl TryFrom<StoredValue> for UuidValue {
    type Error = UuidError;

    fn try_from(source: StoredValue) -> Result<Self, Self::Error> {
        UuidValue::from_stored(&source)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UuidValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.hyphenated())
        } else {
            serializer.serialize_bytes(self.as_bytes())
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UuidValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct UuidVisitor;

        impl<'de> serde::de::Visitor<'de> for UuidVisitor {
            type Value = UuidValue;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(
                    f,
                    "a {TEXT_LEN}-character UUID string or {OCTET_LEN} raw bytes"
                )
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                UuidValue::parse(v).map_err(E::custom)
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.len() == OCTET_LEN {
                    UuidValue::from_binary(v).map_err(E::custom)
                } else {
                    UuidValue::from_text_bytes(v).map_err(E::custom)
                }
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_str(UuidVisitor)
        } else {
            deserializer.deserialize_bytes(UuidVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn sample() -> UuidValue {
        UuidValue::must_parse(SAMPLE)
    }

    #[test]
    fn test_text_codec_encodes_canonical_ascii() {
        assert_eq!(sample().to_text_bytes(), SAMPLE.as_bytes());
    }

    #[test]
    fn test_text_codec_decode_errors() {
        assert!(matches!(
            UuidValue::from_text_bytes(b"550e8400"),
            Err(UuidError::InvalidLength { actual: 8, .. })
        ));
        assert!(matches!(
            UuidValue::from_text_bytes(b"550e8400 e29b-41d4-a716-446655440000"),
            Err(UuidError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_text_codec_decodes_invalid_utf8_as_format_error() {
        let mut data = SAMPLE.as_bytes().to_vec();
        data[0] = 0xff;

        assert!(matches!(
            UuidValue::from_text_bytes(&data),
            Err(UuidError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_binary_codec_copies_octets_verbatim() {
        let data: Vec<u8> = (0u8..16).collect();
        let value = UuidValue::from_binary(&data).unwrap();

        assert_eq!(value.to_binary(), data);
        assert_eq!(value.to_string(), "00010203-0405-0607-0809-0a0b0c0d0e0f");
        // No stamping on decode.
        assert_eq!(value.version(), 0);
    }

    #[test]
    fn test_binary_codec_round_trips_every_byte_value() {
        for b in 0..=u8::MAX {
            let data = [b; 16];
            assert_eq!(UuidValue::from_binary(&data).unwrap().to_binary(), data);
        }
    }

    #[test]
    fn test_binary_codec_rejects_wrong_length() {
        for len in [0usize, 15, 17, 36] {
            let data = vec![0u8; len];
            match UuidValue::from_binary(&data) {
                Err(UuidError::InvalidLength { expected, actual }) => {
                    assert_eq!(expected, 16);
                    assert_eq!(actual, len);
                }
                other => panic!("Expected InvalidLength for {len} bytes, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_try_from_slice_is_binary_decode() {
        let value = UuidValue::try_from(sample().as_bytes().as_slice()).unwrap();

        assert_eq!(value, sample());
    }

    #[test]
    fn test_to_stored_writes_text() {
        assert_eq!(sample().to_stored(), StoredValue::Text(SAMPLE.to_string()));
        assert_eq!(StoredValue::from(sample()), sample().to_stored());
    }

    #[test]
    fn test_from_stored_accepts_each_supported_kind() {
        let value = sample();

        assert_eq!(UuidValue::from_stored(&StoredValue::Uuid(value)).unwrap(), value);
        assert_eq!(
            UuidValue::from_stored(&StoredValue::Blob(value.to_binary())).unwrap(),
            value
        );
        assert_eq!(
            UuidValue::from_stored(&StoredValue::Blob(value.to_text_bytes())).unwrap(),
            value
        );
        assert_eq!(
            UuidValue::from_stored(&StoredValue::Text(SAMPLE.to_uppercase())).unwrap(),
            value
        );
    }

    #[test]
    fn test_from_stored_null_yields_nil() {
        let value = UuidValue::from_stored(&StoredValue::Null).unwrap();

        assert!(value.is_nil());
    }

    #[test]
    fn test_from_stored_surfaces_text_errors() {
        assert!(matches!(
            UuidValue::from_stored(&StoredValue::Text("abc".into())),
            Err(UuidError::InvalidLength { .. })
        ));
        assert!(matches!(
            UuidValue::from_stored(&StoredValue::Blob(vec![0u8; 20])),
            Err(UuidError::InvalidLength { actual: 20, .. })
        ));
    }

    #[test]
    fn test_from_stored_rejects_unsupported_kinds() {
        for (source, kind) in [
            (StoredValue::Integer(42), "integer"),
            (StoredValue::Real(1.5), "real"),
            (StoredValue::Boolean(true), "boolean"),
        ] {
            match UuidValue::try_from(source) {
                Err(err @ UuidError::TypeMismatch(_)) => {
                    assert_eq!(err.to_string(), format!("cannot convert {kind} to UUID"));
                }
                other => panic!("Expected TypeMismatch for {kind}, got {other:?}"),
            }
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_json_uses_canonical_string() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, format!("\"{SAMPLE}\""));

        let back: UuidValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_json_rejects_invalid_string() {
        let result: Result<UuidValue, _> = serde_json::from_str("\"550e8400\"");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid UUID length"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_bincode_round_trips_raw_octets() {
        let encoded = bincode::serialize(&sample()).unwrap();

        // u64 length prefix followed by the 16 octets.
        assert_eq!(encoded.len(), 8 + 16);
        assert_eq!(&encoded[8..], sample().as_bytes());

        let back: UuidValue = bincode::deserialize(&encoded).unwrap();
        assert_eq!(back, sample());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_bincode_decodes_text_bytes() {
        let encoded = bincode::serialize(&SAMPLE.as_bytes().to_vec()).unwrap();

        let back: UuidValue = bincode::deserialize(&encoded).unwrap();
        assert_eq!(back, sample());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_bincode_rejects_wrong_length_bytes() {
        let encoded = bincode::serialize(&vec![0u8; 20]).unwrap();

        let err = bincode::deserialize::<UuidValue>(&encoded).unwrap_err();
        assert!(err.to_string().contains("invalid UUID length"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_optional_field_keeps_absence_distinct_from_nil() {
        #[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
        struct Sandbox {
            id: Option<UuidValue>,
        }

        let absent: Sandbox = serde_json::from_str(r#"{"id":null}"#).unwrap();
        let nil: Sandbox =
            serde_json::from_str(r#"{"id":"00000000-0000-0000-0000-000000000000"}"#).unwrap();

        assert_eq!(absent.id, None);
        assert_eq!(nil.id, Some(UuidValue::NIL));
    }
}
