//! This crate provides shared functionality used by multiple crates in the project,
//! including content hashing, encoding/decoding helpers, and display formatting.

#![forbid(unsafe_code)]

pub mod crypto;
pub mod display;
pub mod encoding;
