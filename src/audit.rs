//! Audit record assembly for hosts.
//!
//! This module provides:
//! - `AuditFields`: Registry binding extractors to named audit fields
//! - `AuditRecord`: The per-request result of running every extractor
//! - `AuditEmitter`: Writes records to the tracing pipeline
//! - `AuditTrail`: Shared in-memory store an emitter can append to
//!
//! Records only ever contain what the registered extractors return.

mod emitter;
mod fields;
mod record;
mod trail;

pub use emitter::{AUDIT_TARGET, AuditEmitter};
pub use fields::AuditFields;
pub use record::AuditRecord;
pub use trail::AuditTrail;
