//! Records held by the timestamping service.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ProtocolError;

/// Nanoseconds in one millisecond
pub const NANOS_PER_MILLI: u64 = 1_000_000;

/// A named content hash anchored by the service.
///
/// Clients only hold read-only copies; the service assigns the transaction id and creation time.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TimestampRecord {
    name: String,

    /// Hex encoded digest of the timestamped content
    #[serde(rename = "data")]
    content_hash: String,

    #[serde(rename = "txid")]
    transaction_id: TransactionId,

    #[serde(rename = "time")]
    created_at: CreatedAt,
}

impl TimestampRecord {
    pub fn new(
        name: String,
        content_hash: String,
        transaction_id: TransactionId,
        created_at: CreatedAt,
    ) -> Self {
        Self {
            name,
            content_hash,
            transaction_id,
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn created_at(&self) -> CreatedAt {
        self.created_at
    }

    /// Parses the body of a `get_timestamps` response, preserving the service's order.
    pub fn list_from_json(json: &[u8]) -> Result<Vec<TimestampRecord>, ProtocolError> {
        Ok(serde_json::from_slice(json)?)
    }
}

/// Opaque identifier the service assigns to a record when it is created.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TransactionId(String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TransactionId {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ProtocolError::EmptyTransactionId);
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for TransactionId {
    type Error = ProtocolError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::try_from(value.to_string())
    }
}

impl From<TransactionId> for String {
    fn from(value: TransactionId) -> Self {
        value.0
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Creation time of a record as nanoseconds since the Unix epoch.
///
/// Services built on 64-bit nanosecond clocks frequently emit the value as a decimal string to
/// survive JSON number precision limits, so both encodings are accepted.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct CreatedAt(u64);

impl CreatedAt {
    pub fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Milliseconds since the epoch, truncating sub-millisecond precision
    pub fn as_millis(&self) -> u64 {
        self.0 / NANOS_PER_MILLI
    }
}

impl<'de> Deserialize<'de> for CreatedAt {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Nanos {
            Number(u64),
            Text(String),
        }

        match Nanos::deserialize(deserializer)? {
            Nanos::Number(n) => Ok(CreatedAt(n)),
            Nanos::Text(s) => s
                .trim()
                .parse::<u64>()
                .map(CreatedAt)
                .map_err(|_| serde::de::Error::custom(ProtocolError::InvalidTime(s))),
        }
    }
}
