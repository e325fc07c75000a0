use std::fmt;

use super::AuditExtractor;
use crate::authn::AuthenticationContext;
use crate::context::RequestContext;
use crate::error::{ConfigError, ErrorKind};
use crate::logging::ExtractLog;
use crate::lookup::{ChildContextLookup, ContextLookup};

/// Extracts the flow id of the request's completed authentication.
///
/// Returns `[flow_id]` when the [`AuthenticationContext`] holds a result,
/// and an empty vector otherwise.
///
/// # Examples
///
/// ```
/// use audit_extract::{
///     AuditExtractor, AuthenticationContext, AuthenticationResult, AuthnFlowIdExtractor,
///     Principal, RequestContext,
/// };
///
/// let extractor = AuthnFlowIdExtractor::new();
///
/// let mut ctx = RequestContext::new("req-1");
/// assert!(extractor.extract(Some(&ctx)).is_empty());
///
/// ctx.subcontexts_mut()
///     .get_or_create::<AuthenticationContext>()
///     .set_result(AuthenticationResult::new("authn/Password", Principal::new("alice")));
/// assert_eq!(extractor.extract(Some(&ctx)), ["authn/Password"]);
/// ```
pub struct AuthnFlowIdExtractor {
    authn_lookup: Box<dyn ContextLookup<AuthenticationContext>>,
}

impl AuthnFlowIdExtractor {
    const NAME: &'static str = "authn_flow_id";

    /// Creates an extractor that reads the direct [`AuthenticationContext`] child.
    pub fn new() -> Self {
        Self {
            authn_lookup: Box::new(ChildContextLookup::new()),
        }
    }

    /// Creates an extractor with a custom lookup strategy.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConfigError)` with [`ErrorKind::MissingLookupStrategy`]
    /// if `strategy` is `None`.
    pub fn with_lookup<L>(strategy: Option<L>) -> Result<Self, ConfigError>
    where
        L: ContextLookup<AuthenticationContext> + 'static,
    {
        match strategy {
            Some(lookup) => Ok(Self {
                authn_lookup: Box::new(lookup),
            }),
            None => Err(ConfigError::new(
                ErrorKind::MissingLookupStrategy,
                "AuthenticationContext lookup strategy cannot be null",
            )),
        }
    }
}

impl Default for AuthnFlowIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AuthnFlowIdExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthnFlowIdExtractor").finish_non_exhaustive()
    }
}

impl AuditExtractor for AuthnFlowIdExtractor {
    fn extract(&self, ctx: Option<&RequestContext>) -> Vec<String> {
        let log = ExtractLog::new(ctx, Self::NAME);

        let result = ctx
            .and_then(|ctx| self.authn_lookup.lookup(ctx))
            .and_then(AuthenticationContext::result);

        match result {
            Some(result) => {
                log.debug(format_args!(
                    "Authentication context found, returning {}",
                    result.flow_id()
                ));
                vec![result.flow_id().to_string()]
            }
            None => {
                log.warn(format_args!("Could not find the AuthenticationResult"));
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authn::{AuthenticationResult, Principal};
    use crate::lookup::FnLookup;

    const FLOW_ID: &str = "mockFlowId";

    fn context_with_result(flow_id: &str) -> RequestContext {
        let mut ctx = RequestContext::new("req-authn");
        ctx.subcontexts_mut()
            .get_or_create::<AuthenticationContext>()
            .set_result(AuthenticationResult::new(flow_id, Principal::new("mockUser")));
        ctx
    }

    #[test]
    fn missing_lookup_fails_construction() {
        let result =
            AuthnFlowIdExtractor::with_lookup::<ChildContextLookup<AuthenticationContext>>(None);

        let err = result.expect_err("construction must fail");
        assert_eq!(err.kind, ErrorKind::MissingLookupStrategy);
    }

    #[test]
    fn no_context_yields_empty() {
        let extractor = AuthnFlowIdExtractor::new();
        assert!(extractor.extract(None).is_empty());
    }

    #[test]
    fn no_authentication_context_yields_empty() {
        let ctx = RequestContext::new("req-empty");
        assert!(AuthnFlowIdExtractor::new().extract(Some(&ctx)).is_empty());
    }

    #[test]
    fn no_result_yields_empty() {
        let mut ctx = RequestContext::new("req-no-result");
        ctx.subcontexts_mut().get_or_create::<AuthenticationContext>();

        assert!(AuthnFlowIdExtractor::new().extract(Some(&ctx)).is_empty());
    }

    #[test]
    fn result_yields_flow_id() {
        let ctx = context_with_result(FLOW_ID);
        assert_eq!(AuthnFlowIdExtractor::new().extract(Some(&ctx)), [FLOW_ID]);
    }

    #[test]
    fn extraction_does_not_mutate_context() {
        let ctx = RequestContext::new("req-readonly");
        AuthnFlowIdExtractor::new().extract(Some(&ctx));
        assert!(ctx.subcontexts().is_empty());
    }

    #[test]
    fn custom_lookup_is_used() {
        // Never finds anything, even when the default would.
        let never = FnLookup::new::<AuthenticationContext>(|_: &RequestContext| None);
        let extractor = AuthnFlowIdExtractor::with_lookup(Some(never)).expect("lookup supplied");

        let ctx = context_with_result(FLOW_ID);
        assert!(extractor.extract(Some(&ctx)).is_empty());
    }
}
