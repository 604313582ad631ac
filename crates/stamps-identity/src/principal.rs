//! Textual names for callers.

use std::fmt::{Display, Formatter};

use aws_lc_rs::digest::{SHA224, digest};
use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};

use crate::provider::IdentityError;

const CHECKSUM_LEN: usize = 4;
const GROUP_LEN: usize = 5;

/// Names a caller. Derived from the SHA-224 hash of the caller's public key and rendered as
/// lowercase base32 of `CRC32C(hash) || hash`, in dash separated groups of five characters.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Principal {
    hash: Vec<u8>,
}

impl Principal {
    pub fn from_public_key(public_key: &[u8]) -> Self {
        let hash = digest(&SHA224, public_key);
        Self {
            hash: hash.as_ref().to_vec(),
        }
    }

    /// Parses the textual form, verifying its checksum.
    pub fn from_text(text: &str) -> Result<Self, IdentityError> {
        let invalid = || IdentityError::InvalidPrincipal(text.to_string());

        let compact: String = text
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let raw = BASE32_NOPAD
            .decode(compact.as_bytes())
            .map_err(|_| invalid())?;

        if raw.len() <= CHECKSUM_LEN {
            return Err(invalid());
        }

        let (checksum, hash) = raw.split_at(CHECKSUM_LEN);
        if checksum != crc32c::crc32c(hash).to_be_bytes() {
            return Err(invalid());
        }

        let principal = Self {
            hash: hash.to_vec(),
        };

        // only the canonical rendering is accepted
        if principal.to_text() != text {
            return Err(invalid());
        }

        Ok(principal)
    }

    pub fn to_text(&self) -> String {
        let mut raw = crc32c::crc32c(&self.hash).to_be_bytes().to_vec();
        raw.extend_from_slice(&self.hash);

        let encoded = BASE32_NOPAD.encode(&raw).to_ascii_lowercase();

        encoded
            .as_bytes()
            .chunks(GROUP_LEN)
            .map(|c| std::str::from_utf8(c).expect("base32 is ascii"))
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl TryFrom<String> for Principal {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_text(&value)
    }
}

impl From<Principal> for String {
    fn from(value: Principal) -> Self {
        value.to_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_round_trip() {
        let principal = Principal::from_public_key(&[0x11u8; 32]);
        let text = principal.to_text();

        assert_eq!(Principal::from_text(&text).unwrap(), principal);
    }

    #[test]
    fn text_is_grouped_lowercase_base32() {
        let text = Principal::from_public_key(&[0x22u8; 32]).to_text();

        // 4 checksum bytes + 28 hash bytes = 32 bytes = 52 base32 characters
        assert_eq!(text.replace('-', "").len(), 52);
        for group in text.split('-') {
            assert!(group.len() <= GROUP_LEN);
        }
        assert!(text.chars().all(|c| c == '-' || c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn distinct_keys_distinct_principals() {
        let a = Principal::from_public_key(&[0x01u8; 32]);
        let b = Principal::from_public_key(&[0x02u8; 32]);
        assert_ne!(a, b);
    }

    #[test]
    fn corrupted_text_is_rejected() {
        let text = Principal::from_public_key(&[0x33u8; 32]).to_text();

        // flip one character in the hash portion
        let mut chars: Vec<char> = text.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'a' { 'b' } else { 'a' };
        let corrupted: String = chars.into_iter().collect();

        assert!(matches!(
            Principal::from_text(&corrupted),
            Err(IdentityError::InvalidPrincipal(_))
        ));
        assert!(Principal::from_text("not a principal").is_err());
        assert!(Principal::from_text("").is_err());
    }
}
