//! The caller's timestamps.
//!
//! Records are fetched in one call whenever the session changes identity and replace whatever
//! was held before, in the order the service returned them. A failed fetch keeps the previous
//! records on show and raises a notification.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use jiff::tz::TimeZone;
use stamps_common::display::{DisplayError, format_created_at, truncate_txid};
use stamps_identity::Identity;
use stamps_protocol::TimestampRecord;
use tracing::{debug, error};

use crate::clipboard::Clipboard;
use crate::notify::{Notification, Notifier};
use crate::service::{ServiceError, TimestampService};
use crate::session::Session;

const COPIED_DURATION: Duration = Duration::from_secs(2);

#[derive(thiserror::Error, Debug)]
pub enum ListingError {
    #[error("fetching timestamps failed: {0}")]
    Remote(#[from] ServiceError),

    #[error("no timestamp at position {0}")]
    NoSuchRecord(usize),

    #[error("clipboard: {0}")]
    Clipboard(#[from] io::Error),

    #[error("{0}")]
    Display(#[from] DisplayError),
}

/// What the listing shows
#[derive(Debug, Eq, PartialEq)]
pub enum ListingView<'a> {
    Unauthenticated,
    Loading,
    Empty,
    Populated(&'a [TimestampRecord]),
}

/// One record prepared for display
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ListingEntry {
    pub name: String,
    pub date: String,
    /// Shortened for display, see [`truncate_txid`]
    pub txid: String,
}

#[derive(Debug, Default)]
pub struct ListingWorkflow {
    records: Vec<TimestampRecord>,
    authenticated: bool,
    loading: bool,
    synced: bool,
    seen_identity: Option<Arc<Identity>>,
    last_error: Option<String>,
}

impl ListingWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches when the identity held by `session` is not the one seen on the last call. Two
    /// sessions built separately count as different identities even for the same seed. Returns
    /// whether a fetch was attempted.
    pub fn sync(
        &mut self,
        session: &Session,
        service: &dyn TimestampService,
        notifier: &dyn Notifier,
    ) -> Result<bool, ListingError> {
        let unchanged = match (&self.seen_identity, session.identity()) {
            (Some(seen), Some(current)) => Arc::ptr_eq(seen, current),
            (None, None) => true,
            _ => false,
        };
        if self.synced && unchanged {
            return Ok(false);
        }
        self.synced = true;
        self.seen_identity = session.identity().cloned();

        if !session.is_authenticated() {
            self.clear();
            return Ok(false);
        }

        self.refresh(session, service, notifier)?;
        Ok(true)
    }

    /// Fetches the caller's records now. Signed out sessions are never sent to the service.
    pub fn refresh(
        &mut self,
        session: &Session,
        service: &dyn TimestampService,
        notifier: &dyn Notifier,
    ) -> Result<(), ListingError> {
        let Some(identity) = self.begin_refresh(session) else {
            return Ok(());
        };
        let result = service.get_timestamps(&identity);
        self.finish_refresh(result, notifier)
    }

    /// First half of [`refresh`](Self::refresh): marks the listing as loading and hands back the
    /// identity to fetch for, or clears the listing when `session` is signed out.
    pub fn begin_refresh(&mut self, session: &Session) -> Option<Arc<Identity>> {
        let Some(identity) = session.identity() else {
            self.clear();
            return None;
        };

        self.authenticated = true;
        self.loading = true;
        Some(identity.clone())
    }

    /// Second half of [`refresh`](Self::refresh): takes in the service's answer.
    pub fn finish_refresh(
        &mut self,
        result: Result<Vec<TimestampRecord>, ServiceError>,
        notifier: &dyn Notifier,
    ) -> Result<(), ListingError> {
        self.loading = false;

        match result {
            Ok(records) => {
                debug!("listing {} timestamps", records.len());
                self.records = records;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                error!("failed to fetch timestamps: {e}");
                self.last_error = Some(e.to_string());
                notifier.notify(Notification::error(
                    "Error",
                    "Could not load your timestamps. Showing the last list received.",
                ));
                Err(e.into())
            }
        }
    }

    pub fn view(&self) -> ListingView<'_> {
        if !self.authenticated {
            ListingView::Unauthenticated
        } else if self.loading {
            ListingView::Loading
        } else if self.records.is_empty() {
            ListingView::Empty
        } else {
            ListingView::Populated(&self.records)
        }
    }

    pub fn records(&self) -> &[TimestampRecord] {
        &self.records
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Why the most recent fetch failed, cleared by the next successful one
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The held records formatted for display, dates in `tz` using `format`.
    pub fn entries(&self, tz: &TimeZone, format: &str) -> Result<Vec<ListingEntry>, ListingError> {
        self.records
            .iter()
            .map(|record| {
                Ok(ListingEntry {
                    name: record.name().to_string(),
                    date: format_created_at(record.created_at(), tz, format)?,
                    txid: truncate_txid(record.transaction_id().as_str()),
                })
            })
            .collect()
    }

    /// Text rendering of the current view. Records are numbered from 1, matching
    /// [`copy_txid`](Self::copy_txid).
    pub fn render(&self, tz: &TimeZone, format: &str) -> Result<String, ListingError> {
        let mut out = String::from("My Timestamps\n\n");

        match self.view() {
            ListingView::Unauthenticated => out.push_str("Please login to view timestamps\n"),
            ListingView::Loading => out.push_str("Loading...\n"),
            ListingView::Empty => out.push_str("No timestamps found\n"),
            ListingView::Populated(_) => {
                for (n, entry) in self.entries(tz, format)?.iter().enumerate() {
                    out.push_str(&format!("[{}] {}\n", n + 1, entry.name));
                    out.push_str(&format!("    {}\n", entry.date));
                    out.push_str(&format!("    TxID: {}\n", entry.txid));
                }
            }
        }

        Ok(out)
    }

    /// Places the full transaction id of record `position` (counting from 1) on the clipboard.
    pub fn copy_txid(
        &self,
        position: usize,
        clipboard: &mut dyn Clipboard,
        notifier: &dyn Notifier,
    ) -> Result<(), ListingError> {
        let record = position
            .checked_sub(1)
            .and_then(|index| self.records.get(index))
            .ok_or(ListingError::NoSuchRecord(position))?;

        clipboard.set_text(record.transaction_id().as_str())?;
        notifier.notify(
            Notification::success("Copied!", record.transaction_id().as_str())
                .with_duration(COPIED_DURATION),
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.records.clear();
        self.authenticated = false;
        self.loading = false;
        self.last_error = None;
    }
}
