//! Caller identities for the Stamps service.
//!
//! An [`Identity`] is an Ed25519 key pair derived from a secret [`Seed`]. Its [`Principal`] names
//! the caller to the service and every call is signed with the key pair. An
//! [`IdentityProvider`] runs the interactive login flow and keeps track of whether a session is
//! still active.

#![forbid(unsafe_code)]

pub mod file;
pub mod identity;
pub mod memory;
pub mod principal;
pub mod provider;
pub mod seed;

pub use file::FileIdentityProvider;
pub use identity::{Identity, request_signing_payload, verify_signature};
pub use memory::MemoryIdentityProvider;
pub use principal::Principal;
pub use provider::{IdentityError, IdentityProvider, LoginPrompt, TerminalPrompt};
pub use seed::Seed;
