//! Tenant resource model and its mapping to the FusionAuth wire types.
//!
//! The model tracks a deliberate subset of a FusionAuth tenant: `id`,
//! `configured`, `name` and the CAPTCHA configuration. Everything else on the
//! remote entity is left to FusionAuth defaults and never enters state.

use crate::client::{CaptchaMethod, Tenant, TenantCaptchaConfiguration, TenantRequest};
use crate::error::{ValidationError, ValidationResult};
use crate::resource::ResourceMapper;
use crate::schema::{Attribute, Schema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// State of one `fusionauth_tenant` resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantResourceModel {
    /// Assigned by FusionAuth on create; `None` until then
    #[serde(default)]
    pub id: Option<String>,
    /// Computed by FusionAuth; unknown until the first response
    #[serde(default)]
    pub configured: Option<bool>,
    /// Missing only in imported state before the first read
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub captcha: Option<TenantCaptchaModel>,
}

/// `captcha` block of a tenant resource.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantCaptchaModel {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub method: Option<CaptchaMethod>,
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub site_key: Option<String>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl fmt::Debug for TenantCaptchaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<sensitive>");
        f.debug_struct("TenantCaptchaModel")
            .field("enabled", &self.enabled)
            .field("method", &self.method)
            .field("secret_key", &redact(&self.secret_key))
            .field("site_key", &redact(&self.site_key))
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl TenantResourceModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// State holding only an identifier, as produced by import.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn with_captcha(mut self, captcha: TenantCaptchaModel) -> Self {
        self.captcha = Some(captcha);
        self
    }

    /// Remote identifier, if one has been assigned.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    /// Checks that must hold before create or update.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(())
    }
}

impl ResourceMapper for TenantResourceModel {
    type Request = TenantRequest;
    type Remote = Tenant;

    /// Build the upstream payload.
    ///
    /// Unset optional values become their zero value, which FusionAuth reads
    /// as disabled or unset.
    fn to_request(&self) -> TenantRequest {
        let captcha = self.captcha.clone().unwrap_or_default();
        TenantRequest::new(Tenant {
            id: self.id.clone().unwrap_or_default(),
            name: self.name.clone(),
            captcha_configuration: TenantCaptchaConfiguration {
                enabled: captcha.enabled.unwrap_or_default(),
                captcha_method: captcha.method,
                secret_key: captcha.secret_key.unwrap_or_default(),
                site_key: captcha.site_key.unwrap_or_default(),
                threshold: captcha.threshold.unwrap_or_default(),
            },
            ..Default::default()
        })
    }

    /// Overwrite every tracked field from the authoritative remote entity.
    fn set_state(&mut self, tenant: &Tenant) {
        let captcha = &tenant.captcha_configuration;
        self.id = Some(tenant.id.clone());
        self.configured = Some(tenant.configured);
        self.name = tenant.name.clone();
        self.captcha = Some(TenantCaptchaModel {
            enabled: Some(captcha.enabled),
            method: captcha.captcha_method.clone(),
            secret_key: Some(captcha.secret_key.clone()),
            site_key: Some(captcha.site_key.clone()),
            threshold: Some(captcha.threshold),
        });
    }
}

/// Schema declared for `fusionauth_tenant`.
pub fn tenant_schema() -> Schema {
    Schema::new("FusionAuth Tenant")
        .with_markdown_description(
            "A FusionAuth Tenant is a named object that represents a discrete namespace for Users, \
             Applications and Groups. A user is unique by email address or username within a tenant.\n\n\
             Tenants may be useful to support a multi-tenant application where you wish to use a single \
             instance of FusionAuth but require the ability to have duplicate users across the tenants in \
             your own application.",
        )
        .with_attribute(
            "id",
            Attribute::computed_string()
                .uuid()
                .with_description("The unique identifier for this Tenant."),
        )
        .with_attribute(
            "configured",
            Attribute::computed_bool()
                .with_description(
                    "Indicates the tenant has been configured. It is always true, except for default \
                     tenant when the setup wizard has not been completed, in which case it is false.",
                )
                .with_markdown_description(
                    "Indicates the tenant has been configured. It is always `true`, except for default \
                     tenant when the setup wizard has not been completed, in which case it is `false`.",
                ),
        )
        .with_attribute(
            "name",
            Attribute::required_string().with_description("The unique name of the Tenant."),
        )
        .with_attribute("captcha", captcha_schema())
}

fn captcha_schema() -> Attribute {
    let methods = CaptchaMethod::names();
    let mut attributes = BTreeMap::new();
    attributes.insert(
        "enabled".to_string(),
        Attribute::optional_bool()
            .computed()
            .with_description("Whether captcha configuration is enabled."),
    );
    attributes.insert(
        "method".to_string(),
        Attribute::optional_string()
            .computed()
            .with_description("The type of captcha method to use.")
            .with_markdown_description(format!(
                "The type of captcha method to use. Must be One Of {{{}}}",
                methods.join(", ")
            ))
            .one_of(methods),
    );
    attributes.insert(
        "secret_key".to_string(),
        Attribute::optional_string()
            .computed()
            .sensitive()
            .with_description("The secret key for this captcha method."),
    );
    attributes.insert(
        "site_key".to_string(),
        Attribute::optional_string()
            .computed()
            .sensitive()
            .with_description("The site key for this captcha method."),
    );
    attributes.insert(
        "threshold".to_string(),
        Attribute::optional_float64().computed().with_description(
            "The numeric threshold which separates a passing score from a failing one. This value \
             only applies if using either the Google v3 or HCaptcha Enterprise method, otherwise \
             this value is ignored.",
        ),
    );

    // FusionAuth always returns a captcha configuration, so state carries one
    // even when configuration leaves the block unset.
    Attribute::optional_single_nested(attributes)
        .computed()
        .with_description("Provides CAPTCHA configuration for the tenant.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Validator;
    use serde_json::json;

    #[test]
    fn test_to_request_zero_values_without_captcha() {
        let request = TenantResourceModel::new("acme").to_request();
        assert_eq!(request.tenant.id, "");
        assert_eq!(request.tenant.name, "acme");
        assert_eq!(
            request.tenant.captcha_configuration,
            TenantCaptchaConfiguration::default()
        );
    }

    #[test]
    fn test_to_request_maps_captcha() {
        let model = TenantResourceModel::new("acme").with_captcha(TenantCaptchaModel {
            enabled: Some(true),
            method: Some(CaptchaMethod::HCaptcha),
            secret_key: Some("secret".to_string()),
            site_key: None,
            threshold: Some(0.5),
        });
        let captcha = model.to_request().tenant.captcha_configuration;
        assert!(captcha.enabled);
        assert_eq!(captcha.captcha_method, Some(CaptchaMethod::HCaptcha));
        assert_eq!(captcha.secret_key, "secret");
        assert_eq!(captcha.site_key, "");
        assert_eq!(captcha.threshold, 0.5);
    }

    #[test]
    fn test_set_state_overwrites_every_tracked_field() {
        let mut model = TenantResourceModel::new("planned").with_captcha(TenantCaptchaModel {
            enabled: Some(true),
            secret_key: Some("stale".to_string()),
            ..Default::default()
        });
        let tenant: Tenant = serde_json::from_value(json!({
            "id": "11111111-1111-1111-1111-111111111111",
            "name": "acme",
            "configured": true,
            "captchaConfiguration": {"enabled": false, "captchaMethod": "GoogleRecaptchaV3", "threshold": 0.7}
        }))
        .unwrap();

        model.set_state(&tenant);

        assert_eq!(model.id(), Some("11111111-1111-1111-1111-111111111111"));
        assert_eq!(model.configured, Some(true));
        assert_eq!(model.name, "acme");
        let captcha = model.captcha.unwrap();
        assert_eq!(captcha.enabled, Some(false));
        assert_eq!(captcha.method, Some(CaptchaMethod::GoogleRecaptchaV3));
        assert_eq!(captcha.secret_key.as_deref(), Some(""));
        assert_eq!(captcha.threshold, Some(0.7));
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        assert!(TenantResourceModel::new("acme").validate().is_ok());
        assert!(matches!(
            TenantResourceModel::new("  ").validate(),
            Err(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn test_set_state_keeps_unrecognised_remote_method() {
        let tenant: Tenant = serde_json::from_value(json!({
            "id": "11111111-1111-1111-1111-111111111111",
            "name": "acme",
            "captchaConfiguration": {"enabled": true, "captchaMethod": "ReCaptchaEnterprise"}
        }))
        .unwrap();

        let mut model = TenantResourceModel::default();
        model.set_state(&tenant);

        let method = model.captcha.as_ref().and_then(|c| c.method.clone());
        assert_eq!(
            method,
            Some(CaptchaMethod::Other("ReCaptchaEnterprise".to_string()))
        );
        assert_eq!(
            model.to_request().tenant.captcha_configuration.captcha_method,
            method
        );
    }

    #[test]
    fn test_schema_shape() {
        let schema = tenant_schema();
        let id = schema.attribute("id").unwrap();
        assert!(id.is_read_only());
        assert_eq!(id.validators, vec![Validator::Uuid]);
        assert!(schema.attribute("configured").unwrap().is_read_only());
        assert!(schema.attribute("name").unwrap().required);

        let captcha = schema.attribute("captcha").unwrap();
        assert!(captcha.optional);
        assert!(captcha.computed);
        assert!(!captcha.is_read_only());
        for (name, attribute) in &captcha.attributes {
            assert!(attribute.optional && attribute.computed, "{name}");
        }
        assert!(captcha.attributes["secret_key"].sensitive);
        assert!(captcha.attributes["site_key"].sensitive);
        assert_eq!(
            captcha.attributes["method"].validators,
            vec![Validator::OneOf(CaptchaMethod::names())]
        );
        assert!(
            captcha.attributes["method"]
                .markdown_description
                .contains("HCaptchaEnterprise")
        );
    }

    #[test]
    fn test_debug_hides_captcha_keys() {
        let captcha = TenantCaptchaModel {
            secret_key: Some("top-secret".to_string()),
            ..Default::default()
        };
        assert!(!format!("{captcha:?}").contains("top-secret"));
    }
}
