//! Configuration validation against a [`Schema`].
//!
//! Runs before any lifecycle operation so malformed configuration, such as
//! an unsupported `captcha.method`, is rejected without a network call.
//! Unlike a fail-fast validator, every violation is collected so the
//! engine can report them together.

use super::types::{Attribute, AttributeType, Schema, Validator};
use crate::error::ValidationError;
use serde_json::{Map, Value};
use uuid::Uuid;

impl Schema {
    /// Validate a configuration or planned state object.
    ///
    /// Null values are treated as unset. Computed-only attributes may carry
    /// the value the engine already knows; it is checked like any other.
    pub fn validate(&self, value: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        match value.as_object() {
            Some(object) => validate_object(&self.attributes, object, "", &mut errors),
            None => errors.push(ValidationError::ExpectedObject {
                attribute: "<root>".to_string(),
            }),
        }
        errors
    }
}

fn path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn validate_object(
    attributes: &std::collections::BTreeMap<String, Attribute>,
    object: &Map<String, Value>,
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    for (name, attribute) in attributes {
        let attribute_path = path(prefix, name);
        match object.get(name) {
            None | Some(Value::Null) => {
                if attribute.required {
                    errors.push(ValidationError::missing_required(attribute_path));
                }
            }
            Some(value) => validate_value(attribute, value, &attribute_path, errors),
        }
    }

    for name in object.keys() {
        if !attributes.contains_key(name) {
            errors.push(ValidationError::UnknownAttribute {
                attribute: path(prefix, name),
            });
        }
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

fn validate_value(
    attribute: &Attribute,
    value: &Value,
    attribute_path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let type_matches = match attribute.attribute_type {
        AttributeType::String => value.is_string(),
        AttributeType::Bool => value.is_boolean(),
        AttributeType::Float64 => value.is_number(),
        AttributeType::SingleNested => value.is_object(),
    };
    if !type_matches {
        errors.push(ValidationError::invalid_type(
            attribute_path,
            attribute.attribute_type.as_str(),
            value_type(value),
        ));
        return;
    }

    if let (AttributeType::SingleNested, Some(object)) =
        (attribute.attribute_type, value.as_object())
    {
        validate_object(&attribute.attributes, object, attribute_path, errors);
        return;
    }

    for validator in &attribute.validators {
        match validator {
            Validator::OneOf(allowed) => {
                if let Some(text) = value.as_str() {
                    if !allowed.iter().any(|candidate| candidate == text) {
                        errors.push(ValidationError::InvalidCanonicalValue {
                            attribute: attribute_path.to_string(),
                            value: text.to_string(),
                            allowed: allowed.clone(),
                        });
                    }
                }
            }
            Validator::Uuid => {
                if let Some(text) = value.as_str() {
                    if Uuid::parse_str(text).is_err() {
                        errors.push(ValidationError::invalid_identifier(attribute_path, text));
                    }
                }
            }
        }
    }
}
