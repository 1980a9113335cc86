//! Schema - Declared document shapes and the validator that enforces them.
//!
//! Schemas are usually generated by `#[derive(Document)]` / `#[derive(Schematic)]`
//! and validated explicitly before every create and update, so malformed
//! documents never reach the store.
//!
//! ## Example
//!
//! ```ignore
//! use docgate::{Schematic, Document};
//! use serde_json::json;
//!
//! let body = json!({ "name": "Ada", "age": 3 });
//! let errors = Student::schema().validate(body.as_object().unwrap()).unwrap_err();
//! // `age` below minimum, `course` missing
//! assert_eq!(errors.len(), 2);
//! ```

mod validate;

pub use validate::{FieldError, FieldErrorKind, ValidationErrors};

use serde_json::{Map, Value};

/// The declared shape of a document or embedded document.
#[derive(Debug)]
pub struct Schema {
    pub fields: &'static [Field],
}

/// A single declared field.
#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Inclusive lower bound, numeric kinds only.
    pub min: Option<f64>,
}

/// The type a field must hold.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Boolean,
    /// Ordered sequence of embedded documents.
    List(fn() -> &'static Schema),
    /// A single embedded document.
    Embedded(fn() -> &'static Schema),
}

impl FieldKind {
    /// Human-readable type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
            FieldKind::List(_) => "array",
            FieldKind::Embedded(_) => "object",
        }
    }
}

impl Schema {
    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate a complete document against this schema.
    ///
    /// Every violation is collected; validation does not stop at the first one.
    pub fn validate(&self, doc: &Map<String, Value>) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        self.collect_errors("", doc, &mut errors);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(errors))
        }
    }

    /// Replace `null` list fields with an empty list, including nested ones.
    ///
    /// An optional list accepts `null`, but lists deserialize into `Vec`,
    /// which has no null.
    pub fn fill_null_lists(&self, doc: &mut Map<String, Value>) {
        for field in self.fields {
            let Some(value) = doc.get_mut(field.name) else {
                continue;
            };
            match field.kind {
                FieldKind::List(schema) => {
                    if value.is_null() {
                        *value = Value::Array(Vec::new());
                    } else if let Some(items) = value.as_array_mut() {
                        for item in items.iter_mut().filter_map(Value::as_object_mut) {
                            schema().fill_null_lists(item);
                        }
                    }
                }
                FieldKind::Embedded(schema) => {
                    if let Some(obj) = value.as_object_mut() {
                        schema().fill_null_lists(obj);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_errors(&self, prefix: &str, doc: &Map<String, Value>, errors: &mut Vec<FieldError>) {
        for field in self.fields {
            let path = join_path(prefix, field.name);
            match doc.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        errors.push(FieldError::new(path, FieldErrorKind::Missing));
                    }
                }
                Some(value) => field.check(&path, value, errors),
            }
        }

        for key in doc.keys() {
            if self.field(key).is_none() {
                errors.push(FieldError::new(join_path(prefix, key), FieldErrorKind::Unknown));
            }
        }
    }
}

impl Field {
    fn check(&self, path: &str, value: &Value, errors: &mut Vec<FieldError>) {
        let wrong_type = || FieldError::new(path.to_string(), FieldErrorKind::WrongType {
            expected: self.kind.type_name(),
        });

        match self.kind {
            FieldKind::Text => {
                if !value.is_string() {
                    errors.push(wrong_type());
                }
            }
            FieldKind::Boolean => {
                if !value.is_boolean() {
                    errors.push(wrong_type());
                }
            }
            FieldKind::Number => match value.as_f64() {
                Some(n) => self.check_min(path, n, errors),
                None => errors.push(wrong_type()),
            },
            FieldKind::Integer => {
                if value.is_i64() || value.is_u64() {
                    if let Some(n) = value.as_f64() {
                        self.check_min(path, n, errors);
                    }
                } else {
                    errors.push(wrong_type());
                }
            }
            FieldKind::List(schema) => match value.as_array() {
                Some(items) => {
                    for (i, item) in items.iter().enumerate() {
                        let item_path = format!("{}.{}", path, i);
                        match item.as_object() {
                            Some(obj) => schema().collect_errors(&item_path, obj, errors),
                            None => errors.push(FieldError::new(
                                item_path,
                                FieldErrorKind::WrongType { expected: "object" },
                            )),
                        }
                    }
                }
                None => errors.push(wrong_type()),
            },
            FieldKind::Embedded(schema) => match value.as_object() {
                Some(obj) => schema().collect_errors(path, obj, errors),
                None => errors.push(wrong_type()),
            },
        }
    }

    fn check_min(&self, path: &str, n: f64, errors: &mut Vec<FieldError>) {
        if let Some(min) = self.min {
            if n < min {
                errors.push(FieldError::new(
                    path.to_string(),
                    FieldErrorKind::BelowMinimum { min },
                ));
            }
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}
