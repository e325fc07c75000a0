use parking_lot::Mutex;

use super::AuditRecord;

/// Shared in-memory store of emitted audit records.
///
/// Attach one to an [`AuditEmitter`](super::AuditEmitter) to keep every
/// record it writes. Interior mutability via `parking_lot::Mutex`, so a
/// single trail can sit behind an `Arc` and be fed from many request
/// threads at once.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use audit_extract::audit::{AuditEmitter, AuditRecord, AuditTrail};
///
/// let trail = Arc::new(AuditTrail::new());
/// let emitter = AuditEmitter::with_trail(Arc::clone(&trail));
///
/// emitter.emit(&AuditRecord::new(Some("req-1")));
/// emitter.emit(&AuditRecord::new(Some("req-2")));
///
/// assert_eq!(trail.for_request("req-2").len(), 1);
/// assert_eq!(trail.take().len(), 2);
/// assert!(trail.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct AuditTrail {
    records: Mutex<Vec<AuditRecord>>,
}

impl AuditTrail {
    /// Creates an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record`.
    pub fn record(&self, record: AuditRecord) {
        self.records.lock().push(record);
    }

    /// Returns a copy of everything kept so far, oldest first.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    /// Returns the records assembled for `request_id`, oldest first.
    pub fn for_request(&self, request_id: &str) -> Vec<AuditRecord> {
        self.records
            .lock()
            .iter()
            .filter(|record| record.request_id() == Some(request_id))
            .cloned()
            .collect()
    }

    /// Removes and returns everything kept so far.
    pub fn take(&self) -> Vec<AuditRecord> {
        std::mem::take(&mut *self.records.lock())
    }

    /// Number of records kept.
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Whether no record is kept.
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}
