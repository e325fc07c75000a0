//! Assembled audit records.

use std::fmt;

/// The extracted values of every registered audit field for one request.
///
/// Fields keep registration order. A field whose extractor found nothing is
/// still present, with no values.
///
/// # Example
///
/// ```
/// use audit_extract::audit::AuditRecord;
///
/// let record = AuditRecord::new(Some("req-123"))
///     .with_field("AuthnFlowId", vec!["authn/Password".to_string()])
///     .with_field("mail", Vec::new());
///
/// assert_eq!(record.values("AuthnFlowId"), Some(&["authn/Password".to_string()][..]));
/// assert_eq!(record.to_string(), "AuthnFlowId=authn/Password|mail=");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    request_id: Option<String>,
    fields: Vec<(String, Vec<String>)>,
}

impl AuditRecord {
    /// Creates a record with no fields.
    pub fn new(request_id: Option<impl Into<String>>) -> Self {
        Self {
            request_id: request_id.map(Into::into),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn with_field(mut self, field: impl Into<String>, values: Vec<String>) -> Self {
        self.push(field, values);
        self
    }

    pub(crate) fn push(&mut self, field: impl Into<String>, values: Vec<String>) {
        self.fields.push((field.into(), values));
    }

    /// Returns the request identifier, if known.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Returns the values of `field`, or `None` if it is not part of the record.
    pub fn values(&self, field: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, values)| values.as_slice())
    }

    /// Returns all fields in registration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Renders `field=v1,v2` pairs separated by `|`.
impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, values)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}={}", name, values.join(","))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_record() {
        let record = AuditRecord::new(None::<String>);
        assert!(record.is_empty());
        assert_eq!(record.request_id(), None);
        assert_eq!(record.to_string(), "");
    }

    #[test]
    fn fields_keep_order() {
        let record = AuditRecord::new(Some("req-1"))
            .with_field("b", strings(&["2"]))
            .with_field("a", strings(&["1"]));

        let names: Vec<&str> = record.fields().map(|(name, _)| name).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn values_lookup() {
        let record = AuditRecord::new(Some("req-1")).with_field("mail", strings(&["x", "y"]));

        assert_eq!(record.values("mail"), Some(&strings(&["x", "y"])[..]));
        assert_eq!(record.values("uid"), None);
    }

    #[test]
    fn display_joins_values() {
        let record = AuditRecord::new(Some("req-1"))
            .with_field("AuthnFlowId", strings(&["mockFlowId"]))
            .with_field("mockAttributeId", strings(&["v1", "v2"]))
            .with_field("missing", Vec::new());

        assert_eq!(
            record.to_string(),
            "AuthnFlowId=mockFlowId|mockAttributeId=v1,v2|missing="
        );
    }
}
