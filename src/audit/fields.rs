use std::fmt;

use super::AuditRecord;
use crate::context::RequestContext;
use crate::error::{ConfigError, ErrorKind};
use crate::extractor::AuditExtractor;

/// Binds extractors to named audit fields.
///
/// The host builds one `AuditFields` at startup and calls
/// [`assemble`](Self::assemble) once per processed request.
///
/// # Example
///
/// ```
/// use audit_extract::audit::AuditFields;
/// use audit_extract::{AttributeValueExtractor, AuthnFlowIdExtractor, RequestContext};
///
/// let mut fields = AuditFields::new();
/// fields
///     .register("AuthnFlowId", AuthnFlowIdExtractor::new())?
///     .register("mail", AttributeValueExtractor::new("mail")?)?;
///
/// let record = fields.assemble(Some(&RequestContext::new("req-1")));
/// assert_eq!(record.to_string(), "AuthnFlowId=|mail=");
/// # Ok::<(), audit_extract::Error>(())
/// ```
#[derive(Default)]
pub struct AuditFields {
    fields: Vec<(String, Box<dyn AuditExtractor>)>,
}

impl AuditFields {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `extractor` under `field`.
    ///
    /// Returns the registry to allow chaining.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConfigError)` if `field` is blank
    /// ([`ErrorKind::InvalidFieldName`]) or already registered
    /// ([`ErrorKind::DuplicateField`]).
    pub fn register(
        &mut self,
        field: impl Into<String>,
        extractor: impl AuditExtractor + 'static,
    ) -> Result<&mut Self, ConfigError> {
        let field = field.into();
        let field = field.trim();

        if field.is_empty() {
            return Err(ConfigError::new(
                ErrorKind::InvalidFieldName,
                "Audit field name cannot be empty",
            ));
        }

        if self.fields.iter().any(|(name, _)| name == field) {
            return Err(ConfigError::new(
                ErrorKind::DuplicateField {
                    field: field.to_string(),
                },
                "Audit field is already registered",
            ));
        }

        self.fields.push((field.to_string(), Box::new(extractor)));
        Ok(self)
    }

    /// Returns the registered field names in registration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of registered fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no field is registered.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Runs every extractor once against `ctx` and collects the results.
    pub fn assemble(&self, ctx: Option<&RequestContext>) -> AuditRecord {
        let mut record = AuditRecord::new(ctx.and_then(RequestContext::request_id));
        for (name, extractor) in &self.fields {
            record.push(name.as_str(), extractor.extract(ctx));
        }
        record
    }
}

impl fmt::Debug for AuditFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.field_names()).finish()
    }
}
