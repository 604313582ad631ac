//! The creation call and its response.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::record::TransactionId;

/// Length of a hex encoded SHA-256 digest
pub const CONTENT_HASH_HEX_LEN: usize = 64;

/// Body of a `create_timestamp` call: a user supplied name and the hex encoded digest of the
/// file being timestamped.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreateTimestamp {
    name: String,
    data: String,
}

impl CreateTimestamp {
    /// Builds a creation request, refusing an empty name or a malformed digest.
    pub fn new(name: impl Into<String>, data: impl Into<String>) -> Result<Self, ProtocolError> {
        let request = Self {
            name: name.into(),
            data: data.into(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.name.is_empty() {
            return Err(ProtocolError::EmptyName);
        }

        if !is_content_hash(&self.data) {
            return Err(ProtocolError::InvalidContentHash(self.data.clone()));
        }

        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The hex encoded content hash
    pub fn data(&self) -> &str {
        &self.data
    }
}

/// Response to a successful `create_timestamp` call
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CreatedTimestamp {
    pub txid: TransactionId,
}

/// True when `value` looks like a hex encoded SHA-256 digest
pub fn is_content_hash(value: &str) -> bool {
    value.len() == CONTENT_HASH_HEX_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "ae4b3280e56e2faf83f414a6e3dabe9d5fbe18976544c05fed121accb85b53fc";

    #[test]
    fn accepts_name_and_digest() {
        let req = CreateTimestamp::new("contract.pdf", HASH).unwrap();
        assert_eq!(req.name(), "contract.pdf");
        assert_eq!(req.data(), HASH);
    }

    #[test]
    fn rejects_empty_name() {
        assert!(matches!(
            CreateTimestamp::new("", HASH),
            Err(ProtocolError::EmptyName)
        ));
    }

    #[test]
    fn rejects_malformed_digests() {
        let upper = HASH.to_uppercase();
        let short = &HASH[..62];
        let not_hex = HASH.replace('a', "g");

        for bad in [upper.as_str(), short, not_hex.as_str(), ""] {
            match CreateTimestamp::new("n", bad) {
                Err(ProtocolError::InvalidContentHash(v)) => assert_eq!(v, bad),
                other => panic!("expected InvalidContentHash, got {other:?}"),
            }
        }
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let req = CreateTimestamp::new("contract.pdf", HASH).unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "contract.pdf", "data": HASH })
        );
    }

    #[test]
    fn created_response_requires_txid() {
        let ok: CreatedTimestamp = serde_json::from_str(r#"{"txid":"abc"}"#).unwrap();
        assert_eq!(ok.txid.as_str(), "abc");

        assert!(serde_json::from_str::<CreatedTimestamp>(r#"{"txid":""}"#).is_err());
    }
}
