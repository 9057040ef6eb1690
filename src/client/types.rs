//! Wire types for the FusionAuth tenant API.
//!
//! [`Tenant`] is the full remote entity. The attributes this crate manages are
//! typed fields; every other attribute FusionAuth returns (email, JWT, OAuth,
//! password rules, ...) is kept verbatim in [`Tenant::other`] so nothing is
//! lost when a response is decoded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// CAPTCHA provider used by a tenant.
///
/// Configuration may only name one of [`CaptchaMethod::ALL`]. Responses are
/// decoded leniently: a method this crate does not know yet lands in
/// [`CaptchaMethod::Other`] and is sent back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptchaMethod {
    GoogleRecaptchaV2,
    GoogleRecaptchaV3,
    HCaptcha,
    HCaptchaEnterprise,
    #[serde(untagged)]
    Other(String),
}

impl CaptchaMethod {
    /// Methods accepted in configuration.
    pub const ALL: [CaptchaMethod; 4] = [
        CaptchaMethod::GoogleRecaptchaV2,
        CaptchaMethod::GoogleRecaptchaV3,
        CaptchaMethod::HCaptcha,
        CaptchaMethod::HCaptchaEnterprise,
    ];

    /// Wire name, as FusionAuth spells it.
    pub fn as_str(&self) -> &str {
        match self {
            CaptchaMethod::GoogleRecaptchaV2 => "GoogleRecaptchaV2",
            CaptchaMethod::GoogleRecaptchaV3 => "GoogleRecaptchaV3",
            CaptchaMethod::HCaptcha => "HCaptcha",
            CaptchaMethod::HCaptchaEnterprise => "HCaptchaEnterprise",
            CaptchaMethod::Other(name) => name,
        }
    }

    /// Every configurable wire name, in declaration order.
    pub fn names() -> Vec<String> {
        Self::ALL.iter().map(|m| m.as_str().to_string()).collect()
    }
}

impl fmt::Display for CaptchaMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `tenant.captchaConfiguration`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantCaptchaConfiguration {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captcha_method: Option<CaptchaMethod>,
    #[serde(default)]
    pub secret_key: String,
    #[serde(default)]
    pub site_key: String,
    #[serde(default)]
    pub threshold: f64,
}

/// A FusionAuth tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Read-only; false only for the default tenant before the setup wizard ran
    #[serde(default, skip_serializing)]
    pub configured: bool,
    #[serde(default)]
    pub captcha_configuration: TenantCaptchaConfiguration,
    /// Epoch milliseconds, read-only
    #[serde(default, skip_serializing)]
    pub insert_instant: Option<i64>,
    /// Epoch milliseconds, read-only
    #[serde(default, skip_serializing)]
    pub last_update_instant: Option<i64>,
    /// Attributes not managed by this crate
    #[serde(flatten)]
    pub other: serde_json::Map<String, serde_json::Value>,
}

impl Tenant {
    pub fn inserted_at(&self) -> Option<DateTime<Utc>> {
        self.insert_instant.and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_update_instant
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// Request body for create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantRequest {
    pub tenant: Tenant,
}

impl TenantRequest {
    pub fn new(tenant: Tenant) -> Self {
        Self { tenant }
    }
}

/// Response body for create, retrieve and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantResponse {
    pub tenant: Tenant,
}
