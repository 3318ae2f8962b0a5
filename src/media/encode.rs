/// Data URI encoding and decoding
///
/// Images travel through the app as self-describing data URIs:
/// `data:<mime>;base64,<payload>`. Encoding and decoding are exact
/// inverses, so the original bytes are always recoverable.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

use super::validate::MediaType;

/// A base64 payload paired with its media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub media_type: MediaType,
    /// Base64-encoded image bytes (standard alphabet, with padding)
    pub payload: String,
}

/// Why a data URI string could not be decoded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("not a data URI")]
    MissingScheme,
    #[error("data URI has no base64 payload")]
    MissingPayload,
    #[error("unknown media type `{0}`")]
    UnknownMediaType(String),
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

impl DataUri {
    /// Encode raw image bytes into a data URI
    pub fn encode(media_type: MediaType, bytes: &[u8]) -> Self {
        DataUri {
            media_type,
            payload: STANDARD.encode(bytes),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` string
    pub fn decode(uri: &str) -> Result<Self, DecodeError> {
        let rest = uri.strip_prefix("data:").ok_or(DecodeError::MissingScheme)?;

        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or(DecodeError::MissingPayload)?;

        let media_type = MediaType::from_mime(mime)
            .ok_or_else(|| DecodeError::UnknownMediaType(mime.to_string()))?;

        Ok(DataUri {
            media_type,
            payload: payload.to_string(),
        })
    }

    /// Decode the payload back into the original bytes
    pub fn bytes(&self) -> Result<Vec<u8>, DecodeError> {
        STANDARD
            .decode(&self.payload)
            .map_err(|e| DecodeError::InvalidBase64(e.to_string()))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.media_type.mime(), self.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::validate::MAX_FILE_BYTES;

    fn round_trip(media_type: MediaType, bytes: &[u8]) {
        let encoded = DataUri::encode(media_type, bytes);
        let decoded = DataUri::decode(&encoded.to_string()).unwrap();

        assert_eq!(decoded, encoded);
        assert_eq!(decoded.media_type, media_type);
        assert_eq!(decoded.bytes().unwrap(), bytes);
    }

    #[test]
    fn test_round_trip_empty() {
        round_trip(MediaType::Png, &[]);
    }

    #[test]
    fn test_round_trip_single_byte() {
        round_trip(MediaType::Jpeg, &[0xff]);
    }

    #[test]
    fn test_round_trip_small_payload() {
        round_trip(MediaType::WebP, b"not really webp but bytes are bytes");
    }

    #[test]
    fn test_round_trip_max_accepted_size() {
        let bytes = vec![0xabu8; MAX_FILE_BYTES as usize];
        let encoded = DataUri::encode(MediaType::Jpeg, &bytes);
        let decoded = DataUri::decode(&encoded.to_string()).unwrap();
        assert_eq!(decoded.bytes().unwrap().len(), bytes.len());
        assert_eq!(decoded.bytes().unwrap(), bytes);
    }

    #[test]
    fn test_display_format() {
        let uri = DataUri::encode(MediaType::Jpeg, &[0, 1, 2]);
        assert_eq!(uri.to_string(), "data:image/jpeg;base64,AAEC");
    }

    #[test]
    fn test_decode_rejects_non_data_uri() {
        assert_eq!(
            DataUri::decode("https://example.com/photo.jpg"),
            Err(DecodeError::MissingScheme)
        );
    }

    #[test]
    fn test_decode_rejects_missing_payload() {
        assert_eq!(
            DataUri::decode("data:image/png"),
            Err(DecodeError::MissingPayload)
        );
    }

    #[test]
    fn test_decode_rejects_unknown_media_type() {
        assert_eq!(
            DataUri::decode("data:image/gif;base64,AAEC"),
            Err(DecodeError::UnknownMediaType("image/gif".to_string()))
        );
    }

    #[test]
    fn test_garbage_payload_fails_on_bytes() {
        let uri = DataUri::decode("data:image/png;base64,@@@@").unwrap();
        assert!(matches!(uri.bytes(), Err(DecodeError::InvalidBase64(_))));
    }
}
