//! Client for the Stamps timestamping service.
//!
//! A file is timestamped by hashing its bytes locally and handing the digest, together with a
//! name, to the remote service. The [`UploadWorkflow`](upload::UploadWorkflow) drives that
//! exchange and the [`ListingWorkflow`](listing::ListingWorkflow) shows the caller's records.
//!
//! Both workflows talk to the service through the [`TimestampService`] trait and receive the
//! caller's identity through an explicit [`Session`](session::Session), so they can be exercised
//! against substitutes without any network or identity stack:
//!
//! ```no_run
//! use stamps_client::http::HttpActor;
//! use stamps_client::notify::LogNotifier;
//! use stamps_client::session::Session;
//! use stamps_client::upload::{SelectedFile, UploadWorkflow};
//! use stamps_identity::Identity;
//!
//! let session = Session::signed_in(Identity::generate().unwrap());
//! let actor = HttpActor::builder("https://stamps.example.com").build();
//!
//! let upload = UploadWorkflow::new();
//! upload.select_file(SelectedFile::from_path("contract.pdf"));
//! upload.set_name("Signed contract");
//!
//! let txid = upload.submit(&session, &actor, &LogNotifier).unwrap();
//! println!("created {txid}");
//! ```

#![forbid(unsafe_code)]

pub mod args;
pub mod clipboard;
pub mod config;
pub mod http;
pub mod listing;
pub mod nav;
pub mod notify;
pub mod service;
pub mod session;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_utils;

pub use service::{ServiceError, TimestampService};
