//! The validator seam: declarative schemas and pre-built validators.
//!
//! Every collection is bound to one validator at `collect` time. The
//! binding accepts either a raw declarative [`Schema`] or a pre-built
//! [`Validator`] implementation; [`ValidatorSpec`] is the tagged union
//! over the two, resolved once into a single capability.

use crate::error::{CoreError, CoreResult};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Checks a raw value and normalizes it into an accepted payload.
///
/// Validation happens before any mutation or flush; a failing
/// validator leaves the store untouched.
pub trait Validator: Send + Sync {
    /// Validates `raw`, returning the value to store or a
    /// [`CoreError::Validation`].
    fn validate(&self, raw: &Value) -> CoreResult<Value>;
}

/// Expected type of one schema field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// A JSON boolean.
    Bool,
    /// Any JSON array.
    Array,
    /// A nested object, validated against its own schema.
    Object(Schema),
    /// Any JSON value, including null.
    Any,
}

impl FieldType {
    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Bool => "boolean",
            FieldType::Array => "array",
            FieldType::Object(_) => "object",
            FieldType::Any => "any",
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A declarative document schema.
///
/// The raw value must be a JSON object carrying every declared field
/// with the declared type. Undeclared extra fields pass through
/// untouched; on success the raw value is stored unchanged.
///
/// # Example
///
/// ```rust
/// use jotdb_core::{FieldType, Schema, Validator};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .field("name", FieldType::String)
///     .field("age", FieldType::Number);
///
/// assert!(schema.validate(&json!({"name": "ada", "age": 36})).is_ok());
/// assert!(schema.validate(&json!({"name": 1})).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: IndexMap<String, FieldType>,
}

impl Schema {
    /// Creates an empty schema (accepts any object).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a required field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.insert(name.into(), ty);
        self
    }

    fn check(&self, value: &Value, path: &str) -> CoreResult<()> {
        let Some(object) = value.as_object() else {
            return Err(CoreError::validation(format!(
                "`{path}`: expected object, found {}",
                type_name(value)
            )));
        };

        for (name, ty) in &self.fields {
            let field_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}.{name}")
            };

            let Some(field) = object.get(name) else {
                return Err(CoreError::validation(format!(
                    "`{field_path}`: missing required field"
                )));
            };

            let ok = match ty {
                FieldType::String => field.is_string(),
                FieldType::Number => field.is_number(),
                FieldType::Bool => field.is_boolean(),
                FieldType::Array => field.is_array(),
                FieldType::Object(nested) => {
                    nested.check(field, &field_path)?;
                    true
                }
                FieldType::Any => true,
            };

            if !ok {
                return Err(CoreError::validation(format!(
                    "`{field_path}`: expected {}, found {}",
                    ty.name(),
                    type_name(field)
                )));
            }
        }

        Ok(())
    }
}

impl Validator for Schema {
    fn validate(&self, raw: &Value) -> CoreResult<Value> {
        self.check(raw, "")?;
        Ok(raw.clone())
    }
}

/// What a collection can be bound with: a raw declarative schema or a
/// pre-built validator.
///
/// Resolved once at `collect` time into a single shared [`Validator`];
/// there is no runtime shape-sniffing of the supplied value.
#[derive(Clone)]
pub enum ValidatorSpec {
    /// A raw declarative schema.
    Schema(Schema),
    /// A pre-built validator.
    Custom(Arc<dyn Validator>),
}

impl ValidatorSpec {
    /// Wraps a pre-built validator.
    pub fn custom<V: Validator + 'static>(validator: V) -> Self {
        Self::Custom(Arc::new(validator))
    }

    /// Resolves the spec into the canonical validator capability.
    pub(crate) fn resolve(self) -> Arc<dyn Validator> {
        match self {
            Self::Schema(schema) => Arc::new(schema),
            Self::Custom(validator) => validator,
        }
    }
}

impl From<Schema> for ValidatorSpec {
    fn from(schema: Schema) -> Self {
        Self::Schema(schema)
    }
}

impl fmt::Debug for ValidatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(schema) => f.debug_tuple("Schema").field(schema).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_schema_accepts_any_object() {
        let schema = Schema::new();
        assert!(schema.validate(&json!({})).is_ok());
        assert!(schema.validate(&json!({"anything": [1, 2]})).is_ok());
    }

    #[test]
    fn empty_schema_rejects_non_object() {
        let schema = Schema::new();
        assert!(schema.validate(&json!(5)).is_err());
        assert!(schema.validate(&json!("text")).is_err());
        assert!(schema.validate(&json!(null)).is_err());
    }

    #[test]
    fn declared_field_must_be_present() {
        let schema = Schema::new().field("name", FieldType::String);
        let err = schema.validate(&json!({})).unwrap_err();
        assert!(matches!(err, CoreError::Validation { .. }));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn declared_field_must_have_declared_type() {
        let schema = Schema::new().field("name", FieldType::String);
        let err = schema.validate(&json!({"name": 1})).unwrap_err();
        assert!(err.to_string().contains("expected string"));
    }

    #[test]
    fn extra_fields_pass_through() {
        let schema = Schema::new().field("name", FieldType::String);
        let raw = json!({"name": "ada", "extra": true});
        let value = schema.validate(&raw).unwrap();
        assert_eq!(value, raw);
    }

    #[test]
    fn nested_object_schema() {
        let schema = Schema::new().field(
            "address",
            FieldType::Object(Schema::new().field("city", FieldType::String)),
        );

        assert!(schema
            .validate(&json!({"address": {"city": "london"}}))
            .is_ok());

        let err = schema
            .validate(&json!({"address": {"city": 7}}))
            .unwrap_err();
        assert!(err.to_string().contains("address.city"));
    }

    #[test]
    fn any_field_accepts_null() {
        let schema = Schema::new().field("meta", FieldType::Any);
        assert!(schema.validate(&json!({"meta": null})).is_ok());
    }

    #[test]
    fn custom_validator_resolves() {
        struct EvenOnly;

        impl Validator for EvenOnly {
            fn validate(&self, raw: &Value) -> CoreResult<Value> {
                match raw.as_i64() {
                    Some(n) if n % 2 == 0 => Ok(raw.clone()),
                    _ => Err(CoreError::validation("expected an even integer")),
                }
            }
        }

        let validator = ValidatorSpec::custom(EvenOnly).resolve();
        assert!(validator.validate(&json!(4)).is_ok());
        assert!(validator.validate(&json!(3)).is_err());
    }
}
