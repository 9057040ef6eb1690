//! Error types for the FusionAuth client.
//!
//! FusionAuth reports request problems as a structured error set:
//!
//! ```json
//! {
//!   "fieldErrors": {
//!     "tenant.name": [{ "code": "[duplicate]tenant.name", "message": "..." }]
//!   },
//!   "generalErrors": [{ "code": "[LicenseRequired]", "message": "..." }]
//! }
//! ```
//!
//! [`ApiErrors`] models that body; [`ClientError`] separates it from
//! not-found responses and transport failures.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// One complaint from the FusionAuth API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorDetail {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}

/// A complaint paired with the request field it concerns, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError<'a> {
    pub field: Option<&'a str>,
    pub detail: &'a ErrorDetail,
}

impl fmt::Display for FieldError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Some(field) => write!(
                f,
                "{} {}: {}",
                self.detail.code, field, self.detail.message
            ),
            None => write!(f, "{} {}", self.detail.code, self.detail.message),
        }
    }
}

/// Structured error set returned by the FusionAuth API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrors {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_errors: BTreeMap<String, Vec<ErrorDetail>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub general_errors: Vec<ErrorDetail>,
}

impl ApiErrors {
    /// Add a complaint about a specific request field.
    pub fn with_field_error(mut self, field: impl Into<String>, detail: ErrorDetail) -> Self {
        self.field_errors.entry(field.into()).or_default().push(detail);
        self
    }

    /// Add a complaint that is not tied to a field.
    pub fn with_general_error(mut self, detail: ErrorDetail) -> Self {
        self.general_errors.push(detail);
        self
    }

    /// Whether the set contains at least one complaint.
    pub fn is_present(&self) -> bool {
        !self.general_errors.is_empty() || self.field_errors.values().any(|v| !v.is_empty())
    }

    /// Total number of complaints.
    pub fn len(&self) -> usize {
        self.general_errors.len() + self.field_errors.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_present()
    }

    /// Iterate general errors first, then field errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = FieldError<'_>> {
        let general = self
            .general_errors
            .iter()
            .map(|detail| FieldError { field: None, detail });
        let fields = self.field_errors.iter().flat_map(|(field, details)| {
            details.iter().map(move |detail| FieldError {
                field: Some(field.as_str()),
                detail,
            })
        });
        general.chain(fields)
    }
}

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Errors that can occur while talking to FusionAuth.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{resource} with id '{id}' was not found")]
    NotFound {
        /// The kind of entity that was requested
        resource: String,
        /// The identifier that was not found
        id: String,
    },

    #[error("FusionAuth rejected the request: {0}")]
    Rejected(ApiErrors),

    #[error("FusionAuth rejected the API token (401 Unauthorized)")]
    Unauthorized,

    #[error("unexpected response status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body, or a placeholder when empty
        body: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("request deadline exceeded before FusionAuth responded")]
    DeadlineExceeded,

    #[error("request was cancelled")]
    Cancelled,

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// Create a not found error
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Whether the remote entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The structured remote error set, when FusionAuth returned a non-empty one.
    pub fn api_errors(&self) -> Option<&ApiErrors> {
        match self {
            Self::Rejected(errors) if errors.is_present() => Some(errors),
            _ => None,
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fusionauth_error_body() {
        let body = json!({
            "fieldErrors": {
                "tenant.name": [
                    {"code": "[duplicate]tenant.name", "message": "A Tenant with name [acme] already exists."}
                ]
            },
            "generalErrors": [
                {"code": "[LicenseRequired]", "message": "A license is required."}
            ]
        });
        let errors: ApiErrors = serde_json::from_value(body).unwrap();
        assert!(errors.is_present());
        assert_eq!(errors.len(), 2);

        let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        assert_eq!(rendered[0], "[LicenseRequired] A license is required.");
        assert_eq!(
            rendered[1],
            "[duplicate]tenant.name tenant.name: A Tenant with name [acme] already exists."
        );
    }

    #[test]
    fn test_empty_error_set_is_not_present() {
        let errors: ApiErrors = serde_json::from_str("{}").unwrap();
        assert!(!errors.is_present());
        assert!(errors.is_empty());

        let rejected = ClientError::Rejected(errors);
        assert!(rejected.api_errors().is_none());
    }

    #[test]
    fn test_not_found_is_distinguished() {
        let error = ClientError::not_found("tenant", "abc");
        assert!(error.is_not_found());
        assert!(error.api_errors().is_none());
        assert_eq!(error.to_string(), "tenant with id 'abc' was not found");

        let other = ClientError::UnexpectedStatus {
            status: 500,
            body: "oops".to_string(),
        };
        assert!(!other.is_not_found());
    }
}
