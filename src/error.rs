use std::fmt;

/// Errors that can occur in the audit extraction crate.
///
/// Only configuration problems are errors. Missing request data is reported
/// as an empty extraction result, never through this type.
#[derive(Debug)]
pub enum Error {
    /// An extractor or audit field was configured incorrectly
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

/// A construction-time configuration failure.
#[derive(Debug)]
pub struct ConfigError {
    /// The kind of configuration failure
    pub kind: ErrorKind,
    /// Human-readable message explaining the failure
    pub message: String,
}

impl ConfigError {
    /// Creates a new configuration error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// The kind of configuration failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A context lookup strategy was not supplied
    MissingLookupStrategy,
    /// The attribute identifier was missing or blank
    MissingAttributeId,
    /// An audit field name was blank
    InvalidFieldName,
    /// An audit field name was registered twice
    DuplicateField {
        /// The field that was already registered
        field: String,
    },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingLookupStrategy => write!(f, "MissingLookupStrategy"),
            ErrorKind::MissingAttributeId => write!(f, "MissingAttributeId"),
            ErrorKind::InvalidFieldName => write!(f, "InvalidFieldName"),
            ErrorKind::DuplicateField { field } => write!(f, "DuplicateField '{}'", field),
        }
    }
}
