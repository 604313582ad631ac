use std::fmt::{Debug, Formatter};

use data_encoding::HEXLOWER;
use stamps_common::crypto::random_bytes;
use stamps_common::encoding::try_decode_exact;
use zeroize::ZeroizeOnDrop;

use crate::provider::IdentityError;

/// Length of an Ed25519 seed in bytes
pub const SEED_LEN: usize = 32;

/// Secret value used to derive the key pair of an [`Identity`](crate::Identity).
#[derive(ZeroizeOnDrop)]
pub struct Seed {
    value: [u8; SEED_LEN],
}

impl Seed {
    pub fn new(value: &[u8]) -> Result<Self, IdentityError> {
        let value: [u8; SEED_LEN] = value.try_into().map_err(|_| {
            IdentityError::InvalidSeed(format!(
                "seed must be {SEED_LEN} bytes, got {}",
                value.len()
            ))
        })?;

        Ok(Self { value })
    }

    pub fn new_random() -> Self {
        Self {
            value: random_bytes::<SEED_LEN>(),
        }
    }

    /// Decodes a hex or base64 encoded seed
    pub fn from_encoded(encoded: &str) -> Result<Self, IdentityError> {
        let value = try_decode_exact::<SEED_LEN>(encoded)?;
        Ok(Self { value })
    }

    pub fn expose(&self) -> &[u8] {
        &self.value
    }

    pub(crate) fn to_hex(&self) -> String {
        HEXLOWER.encode(&self.value)
    }
}

impl Debug for Seed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seed(len={})", self.value.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_length_is_rejected() {
        assert!(matches!(
            Seed::new(&[0u8; 16]),
            Err(IdentityError::InvalidSeed(_))
        ));
        assert!(Seed::new(&[0u8; 32]).is_ok());
    }

    #[test]
    fn encoded_round_trip() {
        let seed = Seed::new(&[0x07u8; 32]).unwrap();
        let decoded = Seed::from_encoded(&seed.to_hex()).unwrap();
        assert_eq!(decoded.expose(), seed.expose());
    }

    #[test]
    fn debug_hides_the_value() {
        let seed = Seed::new(&[0xabu8; 32]).unwrap();
        let shown = format!("{seed:?}");
        assert_eq!(shown, "Seed(len=32)");
        assert!(!shown.contains("ab"));
    }
}
