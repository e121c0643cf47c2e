//! Response encoding
//!
//! Wraps engine results in an envelope carrying producer metadata, for callers that
//! log or forward responses and need to know which engine build produced them.

use crate::error::EngineError;
use crate::{ENGINE_VERSION, PRODUCER_NAME};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Producer metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Producer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Result wrapped with producer metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub producer: Producer,
    pub computed_at_utc: String,
    pub data: T,
}

/// Encoder for producing enveloped JSON responses
pub struct ResponseEncoder {
    instance_id: String,
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseEncoder {
    /// Create a new encoder with a unique instance ID
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create an encoder with a specific instance ID
    pub fn with_instance_id(instance_id: String) -> Self {
        Self { instance_id }
    }

    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Wrap a result in an envelope stamped with the current time
    pub fn wrap<T>(&self, data: T) -> Envelope<T> {
        Envelope {
            producer: Producer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            computed_at_utc: Utc::now().to_rfc3339(),
            data,
        }
    }

    /// Encode a result as enveloped JSON
    pub fn encode_to_json<T: Serialize>(
        &self,
        data: &T,
        pretty: bool,
    ) -> Result<String, EngineError> {
        let envelope = self.wrap(data);
        let json = if pretty {
            serde_json::to_string_pretty(&envelope)
        } else {
            serde_json::to_string(&envelope)
        };
        json.map_err(|e| EngineError::EncodingError(e.to_string()))
    }
}
