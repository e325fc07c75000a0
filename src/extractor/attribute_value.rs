use std::fmt;

use super::AuditExtractor;
use crate::attribute::{trim_attribute_id, AttributeContext, RelyingPartyContext};
use crate::context::RequestContext;
use crate::error::{ConfigError, ErrorKind};
use crate::logging::ExtractLog;
use crate::lookup::{ChildContextLookup, ContextLookup};

/// Extracts the values of one unfiltered attribute.
///
/// The attribute is read from the [`AttributeContext`] child of the
/// request's [`RelyingPartyContext`]. Values are rendered with their
/// `Display` form and returned in stored order.
///
/// # Examples
///
/// ```
/// use audit_extract::{
///     AttributeContext, AttributeValueExtractor, AuditExtractor, IdpAttribute,
///     RelyingPartyContext, RequestContext,
/// };
///
/// let extractor = AttributeValueExtractor::new("mail").expect("valid attribute id");
///
/// let mut ctx = RequestContext::new("req-1");
/// ctx.subcontexts_mut()
///     .get_or_create::<RelyingPartyContext>()
///     .subcontexts_mut()
///     .get_or_create::<AttributeContext>()
///     .set_unfiltered_attributes([
///         IdpAttribute::new("mail").expect("valid attribute id").with_values(["a@example.org", "b@example.org"]),
///     ]);
///
/// assert_eq!(extractor.extract(Some(&ctx)), ["a@example.org", "b@example.org"]);
/// ```
pub struct AttributeValueExtractor {
    rp_lookup: Box<dyn ContextLookup<RelyingPartyContext>>,
    attribute_id: String,
}

impl AttributeValueExtractor {
    const NAME: &'static str = "attribute_value";

    /// Creates an extractor for `attribute_id` that reads the direct
    /// [`RelyingPartyContext`] child.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConfigError)` with [`ErrorKind::MissingAttributeId`] if
    /// the id is blank.
    pub fn new(attribute_id: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_lookup(
            Some(ChildContextLookup::<RelyingPartyContext>::new()),
            Some(attribute_id.into()),
        )
    }

    /// Creates an extractor with a custom relying party lookup strategy.
    ///
    /// Surrounding whitespace is trimmed from `attribute_id`.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConfigError)` if `strategy` is `None`
    /// ([`ErrorKind::MissingLookupStrategy`]), or if `attribute_id` is `None`
    /// or blank ([`ErrorKind::MissingAttributeId`]).
    pub fn with_lookup<L>(strategy: Option<L>, attribute_id: Option<String>) -> Result<Self, ConfigError>
    where
        L: ContextLookup<RelyingPartyContext> + 'static,
    {
        let rp_lookup = strategy.ok_or_else(|| {
            ConfigError::new(
                ErrorKind::MissingLookupStrategy,
                "RelyingPartyContext lookup strategy cannot be null",
            )
        })?;

        let attribute_id = attribute_id
            .as_deref()
            .and_then(trim_attribute_id)
            .ok_or_else(|| {
                ConfigError::new(ErrorKind::MissingAttributeId, "Attribute id cannot be null")
            })?
            .to_string();

        Ok(Self {
            rp_lookup: Box::new(rp_lookup),
            attribute_id,
        })
    }

    /// Returns the configured attribute id.
    pub fn attribute_id(&self) -> &str {
        &self.attribute_id
    }
}

impl fmt::Debug for AttributeValueExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeValueExtractor")
            .field("attribute_id", &self.attribute_id)
            .finish_non_exhaustive()
    }
}

impl AuditExtractor for AttributeValueExtractor {
    fn extract(&self, ctx: Option<&RequestContext>) -> Vec<String> {
        let log = ExtractLog::new(ctx, Self::NAME);

        let Some(rp) = ctx.and_then(|ctx| self.rp_lookup.lookup(ctx)) else {
            log.debug(format_args!("No relying party context available"));
            return Vec::new();
        };

        let Some(attributes) = rp.subcontexts().get::<AttributeContext>() else {
            log.debug(format_args!("No attribute context available"));
            return Vec::new();
        };

        let Some(attribute) = attributes.unfiltered_attribute(&self.attribute_id) else {
            log.debug(format_args!(
                "No attribute found with id {}",
                self.attribute_id
            ));
            return Vec::new();
        };

        let values: Vec<String> = attribute.values().iter().map(ToString::to_string).collect();
        log.debug(format_args!(
            "Attribute {} found, returning {} value(s)",
            self.attribute_id,
            values.len()
        ));
        values
    }
}
