use std::fmt;

use crate::context::RequestContext;

const NO_REQUEST_ID: &str = "<none>";

/// A request-scoped diagnostic logger for extractors.
///
/// Every message carries the request id and the name of the extractor that
/// produced it, so fallbacks can be traced back to a single request.
/// It is lifetime-bound to the context it was created from.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ExtractLog<'a> {
    request_id: &'a str,
    extractor: &'static str,
}

impl<'a> ExtractLog<'a> {
    /// Creates a logger for `extractor` running against `ctx`.
    pub(crate) fn new(ctx: Option<&'a RequestContext>, extractor: &'static str) -> Self {
        Self {
            request_id: ctx.and_then(RequestContext::request_id).unwrap_or(NO_REQUEST_ID),
            extractor,
        }
    }

    /// Logs a warning-level message with request ID.
    pub(crate) fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(request_id = %self.request_id, extractor = self.extractor, "{}", args);
    }

    /// Logs a debug-level message with request ID.
    pub(crate) fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(request_id = %self.request_id, extractor = self.extractor, "{}", args);
    }
}
