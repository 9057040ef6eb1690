//! Error types for provider configuration and local validation.
//!
//! Remote failures live in [`crate::client::ClientError`]; the errors here are
//! raised before any network call is attempted.

/// Errors raised while resolving the provider configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No API token in the configuration block or the environment
    #[error(
        "While configuring the provider, the API token was not found in the {env_var} environment variable or provider configuration block api_token attribute."
    )]
    MissingApiToken { env_var: &'static str },

    /// No endpoint in the configuration block or the environment
    #[error(
        "While configuring the provider, the API endpoint was not found in the {env_var} environment variable or provider configuration block endpoint attribute."
    )]
    MissingEndpoint { env_var: &'static str },

    /// Endpoint could not be used as a base URL
    #[error(
        "While configuring the provider, the API endpoint '{endpoint}' was unable to be parsed as a URL: {reason}"
    )]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The HTTP client could not be built
    #[error("Unable to build the FusionAuth HTTP client: {message}")]
    Client { message: String },
}

impl ConfigError {
    /// Short, human-readable summary used as the diagnostic title.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::MissingApiToken { .. } => "Missing API Token Configuration",
            Self::MissingEndpoint { .. } => "Missing Endpoint Configuration",
            Self::InvalidEndpoint { .. } => "Unable to parse FusionAuth API Endpoint",
            Self::Client { .. } => "Unable to create FusionAuth client",
        }
    }

    /// Configuration attribute the error refers to, if any.
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            Self::MissingApiToken { .. } => Some("api_token"),
            Self::MissingEndpoint { .. } | Self::InvalidEndpoint { .. } => Some("endpoint"),
            Self::Client { .. } => None,
        }
    }

    /// Create an invalid endpoint error
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }
}

/// Validation errors for resource configuration and state.
///
/// Schema-level variants carry the dotted attribute path (`captcha.method`)
/// so they can be attached to the offending attribute.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Required attribute is missing or null
    #[error("Required attribute '{attribute}' is missing")]
    MissingRequiredAttribute { attribute: String },

    /// Attribute value doesn't match the declared type
    #[error("Attribute '{attribute}' has invalid type, expected {expected}, got {actual}")]
    InvalidAttributeType {
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Value outside the attribute's enumerated set
    #[error("Attribute '{attribute}' has invalid value '{value}', allowed values: {allowed:?}")]
    InvalidCanonicalValue {
        attribute: String,
        value: String,
        allowed: Vec<String>,
    },

    /// Attribute not declared by the schema
    #[error("Unknown attribute '{attribute}'")]
    UnknownAttribute { attribute: String },

    /// Resource state or nested block is not an object
    #[error("Attribute '{attribute}' must be an object")]
    ExpectedObject { attribute: String },

    /// Tenant name is empty
    #[error("Attribute 'name' cannot be empty")]
    EmptyName,

    /// Operation needs a remote identifier the state does not have
    #[error("Unable to {operation} a {resource} without an 'id'")]
    MissingId {
        operation: String,
        resource: String,
    },

    /// Identifier attribute is not a UUID
    #[error("Attribute '{attribute}' must be a UUID, got '{value}'")]
    InvalidIdentifier { attribute: String, value: String },

    /// State could not be decoded into the resource model
    #[error("Unable to decode resource state: {0}")]
    MalformedState(#[from] serde_json::Error),
}

impl ValidationError {
    /// Create a missing required attribute error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidAttributeType {
            attribute: attribute.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a missing id error
    pub fn missing_id(operation: impl ToString, resource: impl Into<String>) -> Self {
        Self::MissingId {
            operation: operation.to_string(),
            resource: resource.into(),
        }
    }

    /// Create an invalid identifier error
    pub fn invalid_identifier(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Attribute path the error refers to, if any.
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredAttribute { attribute }
            | Self::InvalidAttributeType { attribute, .. }
            | Self::InvalidCanonicalValue { attribute, .. }
            | Self::UnknownAttribute { attribute }
            | Self::ExpectedObject { attribute }
            | Self::InvalidIdentifier { attribute, .. } => Some(attribute),
            Self::EmptyName => Some("name"),
            Self::MissingId { .. } => Some("id"),
            Self::MalformedState(_) => None,
        }
    }
}

// Result type aliases for convenience
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type ValidationResult<T> = Result<T, ValidationError>;
