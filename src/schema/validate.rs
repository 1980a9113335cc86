//! Typed validation results.

use std::fmt;

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    /// A required field is absent or null.
    Missing,
    /// The value has the wrong JSON type.
    WrongType { expected: &'static str },
    /// A numeric value is below the declared minimum.
    BelowMinimum { min: f64 },
    /// The field is not declared by the schema.
    Unknown,
    /// The field is store-assigned and cannot be supplied by callers.
    Immutable,
    /// The value passed the schema but could not be decoded (e.g. integer overflow).
    Malformed { reason: String },
}

/// A validation failure at a dotted field path (e.g. `variants.1.stock`).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub path: String,
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(path: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Missing => write!(f, "{}: field is required", self.path),
            FieldErrorKind::WrongType { expected } => {
                write!(f, "{}: expected {}", self.path, expected)
            }
            FieldErrorKind::BelowMinimum { min } => {
                write!(f, "{}: must be at least {}", self.path, min)
            }
            FieldErrorKind::Unknown => write!(f, "{}: unknown field", self.path),
            FieldErrorKind::Immutable => write!(f, "{}: field cannot be set", self.path),
            FieldErrorKind::Malformed { reason } => write!(f, "{}: {}", self.path, reason),
        }
    }
}

/// The non-empty list of field errors produced by a failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors {
    /// Display name of the document kind, filled in by the gateway.
    document: Option<&'static str>,
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self {
            document: None,
            errors,
        }
    }

    /// Attach the document display name used in the error message.
    pub fn for_document(mut self, name: &'static str) -> Self {
        self.document = Some(name);
        self
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether any error refers to the given field path.
    pub fn has_field(&self, path: &str) -> bool {
        self.errors.iter().any(|e| e.path == path)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation failed: ", self.document.unwrap_or("document"))?;
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
