//! The remote timestamping service as seen by the workflows.

use stamps_identity::Identity;
use stamps_protocol::{CreateTimestamp, ProtocolError, TimestampRecord, TransactionId};

/// Things that can go wrong when calling the service
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    #[error("could not reach the service: {0}")]
    Transport(String),

    #[error("service answered with HTTP status {0}")]
    Status(u16),

    #[error("bad service response: {0}")]
    BadResponse(String),

    #[error("{0}")]
    Protocol(#[from] ProtocolError),
}

/// The two capabilities of the remote service. Every call is made on behalf of `identity`.
///
/// [`HttpActor`](crate::http::HttpActor) is the production implementation; tests substitute
/// their own.
pub trait TimestampService: Send + Sync {
    /// Anchors `request` and returns the transaction id the service assigned to it.
    fn create_timestamp(
        &self,
        identity: &Identity,
        request: &CreateTimestamp,
    ) -> Result<TransactionId, ServiceError>;

    /// All records created by `identity`, in the service's order.
    fn get_timestamps(&self, identity: &Identity) -> Result<Vec<TimestampRecord>, ServiceError>;
}
