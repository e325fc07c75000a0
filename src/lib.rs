//! Audit value extractors for identity-provider request processing.
//!
//! This crate pulls individual values out of per-request state so they can
//! be written to an audit log:
//! - **Flow id**: which authentication flow completed for the request
//! - **Attribute values**: the unfiltered values of one named attribute
//!
//! Absent data is normal. Extractors return an empty vector when anything
//! along the lookup path is missing, and only construction can fail.
//!
//! # Core Types
//!
//! - [`RequestContext`]: Per-request state holding typed [`Subcontexts`]
//! - [`AuditExtractor`]: The extraction contract
//! - [`AuthnFlowIdExtractor`]: Flow id of the completed [`AuthenticationResult`]
//! - [`AttributeValueExtractor`]: Values of one attribute in the [`AttributeContext`]
//! - [`ContextLookup`]: Injectable strategy for locating a subcontext
//! - [`audit::AuditFields`]: Binds extractors to named audit fields
//!
//! # Examples
//!
//! ```
//! use audit_extract::{
//!     AuditExtractor, AuthenticationContext, AuthenticationResult, AuthnFlowIdExtractor,
//!     Principal, RequestContext,
//! };
//!
//! let mut ctx = RequestContext::new("req-123");
//! ctx.subcontexts_mut()
//!     .get_or_create::<AuthenticationContext>()
//!     .set_result(AuthenticationResult::new("mockFlowId", Principal::new("mockUser")));
//!
//! let extractor = AuthnFlowIdExtractor::new();
//! assert_eq!(extractor.extract(Some(&ctx)), ["mockFlowId"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attribute;
pub mod audit;
mod authn;
mod context;
mod error;
mod extractor;
mod logging;
mod lookup;

pub use attribute::{AttributeContext, AttributeValue, IdpAttribute, RelyingPartyContext};
pub use authn::{AuthenticationContext, AuthenticationResult, Principal};
pub use context::{RequestContext, Subcontexts};
pub use error::{ConfigError, Error, ErrorKind};
pub use extractor::{AttributeValueExtractor, AuditExtractor, AuthnFlowIdExtractor};
pub use lookup::{ChildContextLookup, ContextLookup, FnLookup};
