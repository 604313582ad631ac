//! Wire types for the Stamps timestamping service.
//!
//! The service stores [`TimestampRecord`]s on behalf of an authenticated caller. Clients create
//! records with [`CreateTimestamp`] and receive a [`CreatedTimestamp`] carrying the
//! [`TransactionId`] assigned by the service. Records are never updated or deleted by a client.

// The protocol crate uses only safe Rust.
#![forbid(unsafe_code)]

pub mod create;
pub mod error;
pub mod record;
pub mod util;

pub use create::{CreateTimestamp, CreatedTimestamp};
pub use error::ProtocolError;
pub use record::{CreatedAt, TimestampRecord, TransactionId};
