//! Schema definitions and validation for provider and resource configuration.
//!
//! # Key Types
//!
//! - [`Schema`] - attribute declarations for one provider block or resource kind
//! - [`Attribute`] - type, requiredness, sensitivity and value constraints
//! - [`Validator`] - constraints checked before a lifecycle operation runs
//!
//! # Examples
//!
//! ```rust
//! use fusionauth_provider::schema::{Attribute, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::new("Example")
//!     .with_attribute("id", Attribute::computed_string())
//!     .with_attribute("name", Attribute::required_string());
//!
//! assert!(schema.validate(&json!({"name": "acme"})).is_empty());
//! assert_eq!(schema.validate(&json!({})).len(), 1);
//! ```

pub mod types;
pub mod validation;

pub use types::{Attribute, AttributeType, Schema, Validator};
