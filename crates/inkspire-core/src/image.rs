//! Image payloads exchanged with the models and written to disk.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{InkspireError, Result};

/// Mime type assumed when a payload does not say otherwise.
pub const DEFAULT_MIME_TYPE: &str = "image/png";

/// Raw image bytes plus their mime type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageData {
    pub mime_type: String,
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl ImageData {
    pub fn new(mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// PNG image from raw bytes.
    pub fn png(bytes: Vec<u8>) -> Self {
        Self::new(DEFAULT_MIME_TYPE, bytes)
    }

    /// Decodes a base64 payload as returned in `inlineData.data`.
    pub fn from_base64(mime_type: impl Into<String>, data: &str) -> Result<Self> {
        let bytes = BASE64_STANDARD.decode(data.trim())?;
        Ok(Self::new(mime_type, bytes))
    }

    /// Parses `data:<mime>;base64,<payload>`.
    ///
    /// A bare base64 string is accepted too and treated as PNG, as is a data
    /// URL without a mime segment.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let Some(rest) = url.strip_prefix("data:") else {
            return Self::from_base64(DEFAULT_MIME_TYPE, url);
        };

        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| InkspireError::validation("Data URL has no payload"))?;

        let mime_type = header
            .split(';')
            .next()
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_MIME_TYPE);

        if !header.split(';').any(|segment| segment == "base64") {
            return Err(InkspireError::validation(
                "Only base64 encoded data URLs are supported",
            ));
        }

        Self::from_base64(mime_type, payload)
    }

    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
