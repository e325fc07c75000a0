//! Audit value extractors.
//!
//! This module provides:
//! - `AuditExtractor`: The contract every extractor implements
//! - `AuthnFlowIdExtractor`: Flow id of the completed authentication
//! - `AttributeValueExtractor`: Values of one unfiltered attribute
//!
//! Extractors are immutable after construction. A missing context, subcontext
//! or value is never an error: the result is simply empty.

mod attribute_value;
mod authn_flow;

pub use attribute_value::AttributeValueExtractor;
pub use authn_flow::AuthnFlowIdExtractor;

use crate::context::RequestContext;

/// Pulls zero or more string values out of a request for an audit record.
///
/// An empty vector means "nothing to audit", not failure. Implementations
/// must not mutate the context.
pub trait AuditExtractor: Send + Sync {
    /// Extracts values from `ctx`. `None` is treated as a context without data.
    fn extract(&self, ctx: Option<&RequestContext>) -> Vec<String>;
}

impl<E: AuditExtractor + ?Sized> AuditExtractor for Box<E> {
    fn extract(&self, ctx: Option<&RequestContext>) -> Vec<String> {
        (**self).extract(ctx)
    }
}

impl<E: AuditExtractor + ?Sized> AuditExtractor for std::sync::Arc<E> {
    fn extract(&self, ctx: Option<&RequestContext>) -> Vec<String> {
        (**self).extract(ctx)
    }
}
