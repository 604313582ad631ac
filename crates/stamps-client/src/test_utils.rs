//! Substitutes for the service, the user and the notification surface.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use stamps_identity::{Identity, LoginPrompt, Seed};
use stamps_protocol::{CreateTimestamp, CreatedAt, TimestampRecord, TransactionId};

use crate::notify::{Notification, Notifier, Status};
use crate::service::{ServiceError, TimestampService};

pub struct Answer(pub bool);

impl LoginPrompt for Answer {
    fn confirm(&mut self, _question: &str) -> std::io::Result<bool> {
        Ok(self.0)
    }
}

pub fn test_identity() -> Identity {
    Identity::from_seed(Seed::new(&[0x5eu8; 32]).unwrap()).unwrap()
}

pub fn record(name: &str, txid: &str, nanos: u64) -> TimestampRecord {
    TimestampRecord::new(
        name.to_string(),
        "00".repeat(32),
        TransactionId::try_from(txid).unwrap(),
        CreatedAt::from_nanos(nanos),
    )
}

/// Answers from canned results and remembers what it was asked.
pub struct FakeService {
    created: Mutex<Vec<CreateTimestamp>>,
    list_calls: AtomicUsize,
    create_result: Mutex<Result<String, u16>>,
    list_result: Mutex<Result<Vec<TimestampRecord>, u16>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self {
            created: Mutex::new(Vec::new()),
            list_calls: AtomicUsize::new(0),
            create_result: Mutex::new(Ok("txid-0001".to_string())),
            list_result: Mutex::new(Ok(Vec::new())),
        }
    }

    pub fn create_answers(self, result: Result<&str, u16>) -> Self {
        *self.create_result.lock().unwrap() = result.map(str::to_string);
        self
    }

    pub fn list_answers(&self, result: Result<Vec<TimestampRecord>, u16>) {
        *self.list_result.lock().unwrap() = result;
    }

    pub fn created(&self) -> Vec<CreateTimestamp> {
        self.created.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl TimestampService for FakeService {
    fn create_timestamp(
        &self,
        _identity: &Identity,
        request: &CreateTimestamp,
    ) -> Result<TransactionId, ServiceError> {
        self.created.lock().unwrap().push(request.clone());

        match &*self.create_result.lock().unwrap() {
            Ok(txid) => Ok(TransactionId::try_from(txid.as_str())?),
            Err(status) => Err(ServiceError::Status(*status)),
        }
    }

    fn get_timestamps(&self, _identity: &Identity) -> Result<Vec<TimestampRecord>, ServiceError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        match &*self.list_result.lock().unwrap() {
            Ok(records) => Ok(records.clone()),
            Err(status) => Err(ServiceError::Status(*status)),
        }
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().unwrap().last().cloned()
    }

    pub fn count(&self, status: Status) -> usize {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.status == status)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}
