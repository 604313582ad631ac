use std::fmt::{Debug, Formatter};

use aws_lc_rs::signature::{ED25519, Ed25519KeyPair, KeyPair, UnparsedPublicKey};
use stamps_common::crypto::ContentHash;

use crate::principal::Principal;
use crate::provider::IdentityError;
use crate::seed::Seed;

/// Domain separator prefixed to every signed request
pub const REQUEST_DOMAIN: &[u8] = b"\x0Estamps-request";

/// An authenticated caller: an Ed25519 key pair and the [`Principal`] derived from it.
pub struct Identity {
    seed: Seed,
    keypair: Ed25519KeyPair,
    principal: Principal,
}

impl Identity {
    pub fn from_seed(seed: Seed) -> Result<Self, IdentityError> {
        let keypair = Ed25519KeyPair::from_seed_unchecked(seed.expose())
            .map_err(|e| IdentityError::KeyRejected(e.to_string()))?;
        let principal = Principal::from_public_key(keypair.public_key().as_ref());

        Ok(Self {
            seed,
            keypair,
            principal,
        })
    }

    /// Creates a brand new identity from a random seed
    pub fn generate() -> Result<Self, IdentityError> {
        Self::from_seed(Seed::new_random())
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.keypair
            .public_key()
            .as_ref()
            .try_into()
            .expect("ed25519 public keys are 32 bytes")
    }

    pub fn sign(&self, data: &[u8]) -> [u8; 64] {
        self.keypair
            .sign(data)
            .as_ref()
            .try_into()
            .expect("ed25519 signatures are 64 bytes")
    }

    /// Signs a service call. See [`request_signing_payload`] for what is covered.
    pub fn sign_request(
        &self,
        method: &str,
        path: &str,
        expiry_nanos: u64,
        body: &[u8],
    ) -> [u8; 64] {
        let payload = request_signing_payload(method, path, expiry_nanos, body);
        self.sign(&payload)
    }

    pub(crate) fn seed(&self) -> &Seed {
        &self.seed
    }
}

impl Debug for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity({})", self.principal)
    }
}

/// The bytes signed for a service call:
/// `REQUEST_DOMAIN || method || 0x00 || path || 0x00 || expiry (u64 BE) || SHA-256(body)`
pub fn request_signing_payload(
    method: &str,
    path: &str,
    expiry_nanos: u64,
    body: &[u8],
) -> Vec<u8> {
    let mut payload = REQUEST_DOMAIN.to_vec();
    payload.extend_from_slice(method.as_bytes());
    payload.push(0);
    payload.extend_from_slice(path.as_bytes());
    payload.push(0);
    payload.extend_from_slice(&expiry_nanos.to_be_bytes());
    payload.extend_from_slice(ContentHash::of_bytes(body).as_bytes());
    payload
}

/// Checks an Ed25519 `signature` over `data` made by `public_key`
pub fn verify_signature(public_key: &[u8], data: &[u8], signature: &[u8]) -> bool {
    UnparsedPublicKey::new(&ED25519, public_key)
        .verify(data, signature)
        .is_ok()
}
