//! Creating a timestamp: pick a file, name it, hash it, submit it.
//!
//! ```text
//! Idle -> FileSelected -> NameEntered -> Hashing -> Submitting -> Succeeded | Failed
//! ```
//!
//! The file is read and hashed in full before the service is contacted, so a read failure never
//! reaches the network. Only one submission may be in flight per workflow; further triggers are
//! rejected with [`UploadError::AlreadySubmitting`] until it resolves.

use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use stamps_common::crypto::{ContentHash, DigestError};
use stamps_protocol::{CreateTimestamp, ProtocolError, TransactionId};
use tracing::{debug, error, info};

use crate::notify::{Notification, Notifier};
use crate::service::{ServiceError, TimestampService};
use crate::session::Session;

const MISSING_INPUT: &str = "Please select a file and provide a name for the timestamp.";

#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum ValidationError {
    #[error("no file selected")]
    MissingFile,

    #[error("no timestamp name given")]
    MissingName,
}

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error("not signed in")]
    NotSignedIn,

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("hashing failed: {0}")]
    Hashing(#[from] DigestError),

    #[error("{0}")]
    Protocol(#[from] ProtocolError),

    #[error("creating timestamp failed: {0}")]
    Remote(#[from] ServiceError),
}

/// Where the workflow currently is
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum UploadPhase {
    Idle,
    FileSelected,
    NameEntered,
    Hashing,
    Submitting,
    Succeeded(TransactionId),
    Failed(String),
}

/// A file chosen for timestamping: on disk, already in memory, or a stream that can be read once.
#[derive(Debug)]
pub struct SelectedFile {
    name: String,
    source: FileSource,
}

enum FileSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    Stream(Mutex<Option<Box<dyn Read + Send>>>),
}

impl fmt::Debug for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            FileSource::Bytes(bytes) => write!(f, "Bytes({} bytes)", bytes.len()),
            FileSource::Stream(_) => f.write_str("Stream"),
        }
    }
}

impl SelectedFile {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self {
            name,
            source: FileSource::Path(path.to_path_buf()),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Bytes(bytes),
        }
    }

    /// Content read from `reader` when the file is hashed. The stream is consumed by the first
    /// submission; later ones fail with [`UploadError::Hashing`].
    pub fn from_reader(name: impl Into<String>, reader: impl Read + Send + 'static) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Stream(Mutex::new(Some(Box::new(reader)))),
        }
    }

    /// File name for display
    pub fn name(&self) -> &str {
        &self.name
    }

    fn content_hash(&self) -> Result<ContentHash, DigestError> {
        match &self.source {
            FileSource::Path(path) => ContentHash::of_file(path),
            FileSource::Bytes(bytes) => Ok(ContentHash::of_bytes(bytes)),
            FileSource::Stream(stream) => {
                let reader = stream
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .take()
                    .ok_or_else(|| io::Error::other("stream was already read"))?;
                ContentHash::of_reader(reader)
            }
        }
    }
}

struct Form {
    file: Option<Arc<SelectedFile>>,
    name: String,
    phase: UploadPhase,
}

impl Form {
    fn editing_phase(&self) -> UploadPhase {
        match (&self.file, self.name.is_empty()) {
            (_, false) => UploadPhase::NameEntered,
            (Some(_), true) => UploadPhase::FileSelected,
            (None, true) => UploadPhase::Idle,
        }
    }
}

/// Drives the creation of one timestamp at a time.
pub struct UploadWorkflow {
    form: Mutex<Form>,
    in_flight: AtomicBool,
}

impl Default for UploadWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadWorkflow {
    pub fn new() -> Self {
        Self {
            form: Mutex::new(Form {
                file: None,
                name: String::new(),
                phase: UploadPhase::Idle,
            }),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn select_file(&self, file: SelectedFile) {
        debug!("file selected: {}", file.name());
        let mut form = self.form();
        form.file = Some(Arc::new(file));
        self.after_edit(&mut form);
    }

    pub fn set_name(&self, name: &str) {
        let mut form = self.form();
        form.name = name.to_string();
        self.after_edit(&mut form);
    }

    /// Forgets the selected file and name. Has no effect on a submission in flight.
    pub fn reset(&self) {
        let mut form = self.form();
        form.file = None;
        form.name.clear();
        self.after_edit(&mut form);
    }

    pub fn phase(&self) -> UploadPhase {
        self.form().phase.clone()
    }

    /// The loading indicator: true while hashing or submitting
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn selected_file_name(&self) -> Option<String> {
        self.form().file.as_ref().map(|f| f.name().to_string())
    }

    /// Hashes the selected file and asks `service` to timestamp it under the chosen name.
    ///
    /// Every outcome other than a rejected duplicate trigger is also reported to `notifier`.
    /// The selected file and name are kept afterwards; call [`reset`](Self::reset) to clear them.
    pub fn submit(
        &self,
        session: &Session,
        service: &dyn TimestampService,
        notifier: &dyn Notifier,
    ) -> Result<TransactionId, UploadError> {
        let Some(_loading) = InFlight::claim(&self.in_flight) else {
            debug!("ignoring submit while another submission is in flight");
            return Err(UploadError::AlreadySubmitting);
        };

        let (file, name) = match self.inputs() {
            Ok(inputs) => inputs,
            Err(e) => {
                notifier.notify(Notification::error("Error", MISSING_INPUT));
                return Err(e.into());
            }
        };

        let Some(identity) = session.identity() else {
            notifier.notify(Notification::error(
                "Error",
                "Please login to create a timestamp.",
            ));
            return Err(UploadError::NotSignedIn);
        };

        self.set_phase(UploadPhase::Hashing);
        let hash = match file.content_hash() {
            Ok(hash) => hash,
            Err(e) => {
                error!("hashing '{}' failed: {e}", file.name());
                self.set_phase(UploadPhase::Failed(e.to_string()));
                notifier.notify(Notification::error(
                    "Error",
                    format!("Could not read '{}'.", file.name()),
                ));
                return Err(e.into());
            }
        };
        debug!("hash of '{}': {hash}", file.name());

        let request = CreateTimestamp::new(name, hash.to_hex())?;

        self.set_phase(UploadPhase::Submitting);
        match service.create_timestamp(identity, &request) {
            Ok(txid) => {
                info!("created timestamp '{}': {txid}", request.name());
                self.set_phase(UploadPhase::Succeeded(txid.clone()));
                notifier.notify(Notification::success(
                    "Success",
                    format!("Timestamp created successfully. TXID: {txid}"),
                ));
                Ok(txid)
            }
            Err(e) => {
                error!("failed to create timestamp: {e}");
                self.set_phase(UploadPhase::Failed(e.to_string()));
                notifier.notify(Notification::error(
                    "Error",
                    "Failed to create timestamp. Please try again.",
                ));
                Err(e.into())
            }
        }
    }

    fn inputs(&self) -> Result<(Arc<SelectedFile>, String), ValidationError> {
        let form = self.form();
        let file = form.file.clone().ok_or(ValidationError::MissingFile)?;
        if form.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        Ok((file, form.name.clone()))
    }

    fn after_edit(&self, form: &mut Form) {
        if !self.is_loading() {
            form.phase = form.editing_phase();
        }
    }

    fn set_phase(&self, phase: UploadPhase) {
        self.form().phase = phase;
    }

    fn form(&self) -> MutexGuard<'_, Form> {
        self.form.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Holds the in-flight flag for the duration of one submission and releases it on every exit.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
