//! The timestamping service over HTTP.
//!
//! Each call is signed by the caller's identity. The signature covers the method, the path, an
//! expiry time and the SHA-256 of the body (see
//! [`request_signing_payload`](stamps_identity::request_signing_payload)), and travels in the
//! `x-stamps-*` headers next to the principal and public key.

use std::time::Duration;

use data_encoding::BASE64;
use stamps_common::encoding::hexdump;
use stamps_identity::Identity;
use stamps_protocol::util::ClockSource;
use stamps_protocol::{
    CreateTimestamp, CreatedTimestamp, ProtocolError, TimestampRecord, TransactionId,
};
use tracing::{debug, trace};
use ureq::Agent;

use crate::service::{ServiceError, TimestampService};

/// Path of the timestamp collection on the service
pub const TIMESTAMPS_PATH: &str = "/api/v1/timestamps";

pub const PRINCIPAL_HEADER: &str = "x-stamps-principal";
pub const PUBLIC_KEY_HEADER: &str = "x-stamps-public-key";
pub const EXPIRY_HEADER: &str = "x-stamps-expiry";
pub const SIGNATURE_HEADER: &str = "x-stamps-signature";

const USER_AGENT: &str = concat!("stamps/", env!("CARGO_PKG_VERSION"));

pub struct HttpActorBuilder {
    base_url: String,
    timeout: Option<Duration>,
    request_expiry: Option<Duration>,
    clock: ClockSource,
}

impl HttpActorBuilder {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    const DEFAULT_REQUEST_EXPIRY: Duration = Duration::from_secs(5 * 60);

    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
            request_expiry: None,
            clock: ClockSource::System,
        }
    }

    /// Upper bound on a whole call, connection through reading the body
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// How long after signing the service should still accept a call
    pub fn request_expiry(mut self, request_expiry: Duration) -> Self {
        self.request_expiry = Some(request_expiry);
        self
    }

    pub fn clock(mut self, clock: ClockSource) -> Self {
        self.clock = clock;
        self
    }

    pub fn build(self) -> HttpActor {
        let timeout = self.timeout.unwrap_or(Self::DEFAULT_TIMEOUT);

        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();

        HttpActor {
            agent: Agent::new_with_config(config),
            base_url: self.base_url,
            request_expiry: self.request_expiry.unwrap_or(Self::DEFAULT_REQUEST_EXPIRY),
            clock: self.clock,
        }
    }
}

/// Calls the timestamping service at `base_url` on behalf of an [`Identity`].
pub struct HttpActor {
    agent: Agent,
    base_url: String,
    request_expiry: Duration,
    clock: ClockSource,
}

impl HttpActor {
    pub fn builder(base_url: &str) -> HttpActorBuilder {
        HttpActorBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The authentication headers for one call.
    pub fn signed_headers(
        &self,
        identity: &Identity,
        method: &str,
        path: &str,
        body: &[u8],
    ) -> [(&'static str, String); 4] {
        let expiry = self
            .clock
            .epoch_nanos()
            .saturating_add(self.request_expiry.as_nanos() as u64);
        let signature = identity.sign_request(method, path, expiry, body);

        [
            (PRINCIPAL_HEADER, identity.principal().to_text()),
            (PUBLIC_KEY_HEADER, BASE64.encode(&identity.public_key_bytes())),
            (EXPIRY_HEADER, expiry.to_string()),
            (SIGNATURE_HEADER, BASE64.encode(&signature)),
        ]
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn post(&self, identity: &Identity, path: &str, body: &[u8]) -> Result<Vec<u8>, ServiceError> {
        let url = self.url(path);
        debug!("POST {url} ({} bytes)", body.len());
        trace_dump(body);

        let mut request = self
            .agent
            .post(&url)
            .header("user-agent", USER_AGENT)
            .content_type("application/json");

        for (name, value) in self.signed_headers(identity, "POST", path, body) {
            request = request.header(name, value);
        }

        let mut response = request.send(body).map_err(map_ureq_error)?;
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(map_ureq_error)?;
        trace_dump(&bytes);
        Ok(bytes)
    }

    fn get(&self, identity: &Identity, path: &str) -> Result<Vec<u8>, ServiceError> {
        let url = self.url(path);
        debug!("GET {url}");

        let mut request = self.agent.get(&url).header("user-agent", USER_AGENT);

        for (name, value) in self.signed_headers(identity, "GET", path, &[]) {
            request = request.header(name, value);
        }

        let mut response = request.call().map_err(map_ureq_error)?;
        let bytes = response
            .body_mut()
            .read_to_vec()
            .map_err(map_ureq_error)?;
        trace_dump(&bytes);
        Ok(bytes)
    }
}

impl TimestampService for HttpActor {
    fn create_timestamp(
        &self,
        identity: &Identity,
        request: &CreateTimestamp,
    ) -> Result<TransactionId, ServiceError> {
        request.validate()?;
        let body = serde_json::to_vec(request).map_err(ProtocolError::from)?;

        let response = self.post(identity, TIMESTAMPS_PATH, &body)?;
        let created: CreatedTimestamp = serde_json::from_slice(&response)
            .map_err(|e| ServiceError::BadResponse(e.to_string()))?;

        Ok(created.txid)
    }

    fn get_timestamps(&self, identity: &Identity) -> Result<Vec<TimestampRecord>, ServiceError> {
        let response = self.get(identity, TIMESTAMPS_PATH)?;
        let records = TimestampRecord::list_from_json(&response)
            .map_err(|e| ServiceError::BadResponse(e.to_string()))?;

        debug!("received {} timestamps", records.len());
        Ok(records)
    }
}

fn map_ureq_error(error: ureq::Error) -> ServiceError {
    match error {
        ureq::Error::StatusCode(status) => ServiceError::Status(status),
        e => ServiceError::Transport(e.to_string()),
    }
}

fn trace_dump(data: &[u8]) {
    if tracing::enabled!(tracing::Level::TRACE) {
        let mut dump = Vec::new();
        if hexdump(data, &mut dump).is_ok() {
            trace!("\n{}", String::from_utf8_lossy(&dump));
        }
    }
}

#[cfg(test)]
mod tests {
    use stamps_identity::{request_signing_payload, verify_signature};

    use super::*;
    use crate::test_utils::test_identity;

    fn header<'a>(headers: &'a [(&'static str, String)], name: &str) -> &'a str {
        headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn trailing_slashes_are_dropped() {
        let actor = HttpActor::builder("http://localhost:8080//").build();
        assert_eq!(actor.base_url(), "http://localhost:8080");
        assert_eq!(
            actor.url(TIMESTAMPS_PATH),
            "http://localhost:8080/api/v1/timestamps"
        );
    }

    #[test]
    fn headers_carry_a_verifiable_signature() {
        let clock = ClockSource::new_mock(1_000);
        let actor = HttpActor::builder("http://localhost")
            .clock(clock)
            .request_expiry(Duration::from_secs(60))
            .build();
        let identity = test_identity();
        let body = br#"{"name":"a","data":"b"}"#;

        let headers = actor.signed_headers(&identity, "POST", TIMESTAMPS_PATH, body);

        assert_eq!(header(&headers, PRINCIPAL_HEADER), identity.principal().to_text());
        assert_eq!(header(&headers, EXPIRY_HEADER), "1060000000000");

        let public_key = BASE64.decode(header(&headers, PUBLIC_KEY_HEADER).as_bytes()).unwrap();
        let signature = BASE64.decode(header(&headers, SIGNATURE_HEADER).as_bytes()).unwrap();
        assert_eq!(public_key, identity.public_key_bytes());

        let payload = request_signing_payload("POST", TIMESTAMPS_PATH, 1_060_000_000_000, body);
        assert!(verify_signature(&public_key, &payload, &signature));

        // a different body must not verify
        let tampered = request_signing_payload("POST", TIMESTAMPS_PATH, 1_060_000_000_000, b"{}");
        assert!(!verify_signature(&public_key, &tampered, &signature));
    }

    #[test]
    fn status_errors_keep_the_code() {
        assert!(matches!(
            map_ureq_error(ureq::Error::StatusCode(404)),
            ServiceError::Status(404)
        ));
        assert!(matches!(
            map_ureq_error(ureq::Error::ConnectionFailed),
            ServiceError::Transport(_)
        ));
    }

    #[test]
    fn invalid_requests_are_not_sent() {
        // nothing listens on port 9; a request that got this far would fail with Transport
        let actor = HttpActor::builder("http://127.0.0.1:9").build();
        let bad: CreateTimestamp =
            serde_json::from_str(r#"{"name":"","data":"00"}"#).unwrap();

        assert!(matches!(
            actor.create_timestamp(&test_identity(), &bad),
            Err(ServiceError::Protocol(ProtocolError::EmptyName))
        ));
    }
}
