//! Core schema type definitions for provider and resource configuration.
//!
//! A [`Schema`] declares the attributes the declarative engine may set or
//! read for one provider block or resource kind, with their type, whether
//! they are required, optional or computed, and any value constraints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A provider or resource schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema version, bumped when stored state needs upgrading
    #[serde(default)]
    pub version: i64,
    /// Plain-text description
    pub description: String,
    /// Description rendered by documentation tooling
    pub markdown_description: String,
    /// Attribute definitions keyed by attribute name
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            version: 0,
            markdown_description: description.clone(),
            description,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_markdown_description(mut self, markdown: impl Into<String>) -> Self {
        self.markdown_description = markdown.into();
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }
}

/// Attribute data types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
    Float64,
    /// A single nested object with its own attributes
    SingleNested,
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Float64 => "number",
            Self::SingleNested => "object",
        }
    }
}

/// Value constraints checked before a resource operation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// String value must be one of the listed values
    OneOf(Vec<String>),
    /// String value must parse as a UUID
    Uuid,
}

/// Definition of one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    pub description: String,
    pub markdown_description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub computed: bool,
    /// Value is hidden from plan output and logs
    #[serde(default)]
    pub sensitive: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
    /// Sub-attributes for [`AttributeType::SingleNested`]
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, Attribute>,
}

impl Attribute {
    fn new(attribute_type: AttributeType) -> Self {
        Self {
            attribute_type,
            description: String::new(),
            markdown_description: String::new(),
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            validators: Vec::new(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn required_string() -> Self {
        Self {
            required: true,
            ..Self::new(AttributeType::String)
        }
    }

    pub fn optional_string() -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::String)
        }
    }

    pub fn computed_string() -> Self {
        Self {
            computed: true,
            ..Self::new(AttributeType::String)
        }
    }

    pub fn optional_bool() -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::Bool)
        }
    }

    pub fn computed_bool() -> Self {
        Self {
            computed: true,
            ..Self::new(AttributeType::Bool)
        }
    }

    pub fn optional_float64() -> Self {
        Self {
            optional: true,
            ..Self::new(AttributeType::Float64)
        }
    }

    /// An optional nested object.
    pub fn optional_single_nested(attributes: BTreeMap<String, Attribute>) -> Self {
        Self {
            optional: true,
            attributes,
            ..Self::new(AttributeType::SingleNested)
        }
    }

    /// Set both descriptions to the same text.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.markdown_description = description.clone();
        self.description = description;
        self
    }

    pub fn with_markdown_description(mut self, markdown: impl Into<String>) -> Self {
        self.markdown_description = markdown.into();
        self
    }

    /// Let the remote system fill the value when configuration leaves it unset.
    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.validators
            .push(Validator::OneOf(values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn uuid(mut self) -> Self {
        self.validators.push(Validator::Uuid);
        self
    }

    /// Computed-only attributes are set by the remote system, never by configuration.
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }
}
