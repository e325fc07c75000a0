//! Emits assembled audit records through tracing.

use std::sync::Arc;

use super::{AuditRecord, AuditTrail};

/// Tracing target used for emitted audit records.
pub const AUDIT_TARGET: &str = "audit_extract::audit";

/// Writes audit records to the `tracing` pipeline.
///
/// Each record becomes one `info` event under [`AUDIT_TARGET`], with the
/// request id as a structured field and the rendered record as the message.
/// An emitter built with [`with_trail`](Self::with_trail) also keeps every
/// record it emits.
///
/// # Example
///
/// ```
/// use audit_extract::audit::{AuditEmitter, AuditRecord};
///
/// let record = AuditRecord::new(Some("req-123"))
///     .with_field("AuthnFlowId", vec!["authn/Password".to_string()]);
///
/// AuditEmitter::new().emit(&record);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AuditEmitter {
    trail: Option<Arc<AuditTrail>>,
}

impl AuditEmitter {
    /// Creates an emitter that only logs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an emitter that logs and appends every record to `trail`.
    pub fn with_trail(trail: Arc<AuditTrail>) -> Self {
        Self { trail: Some(trail) }
    }

    /// Returns the attached trail, if any.
    pub fn trail(&self) -> Option<&AuditTrail> {
        self.trail.as_deref()
    }

    /// Emits a record as a structured tracing event.
    pub fn emit(&self, record: &AuditRecord) {
        tracing::info!(
            target: AUDIT_TARGET,
            request_id = record.request_id().unwrap_or("<none>"),
            fields = record.len(),
            "{}",
            record
        );

        if let Some(trail) = &self.trail {
            trail.record(record.clone());
        }
    }
}
