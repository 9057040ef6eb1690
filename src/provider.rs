//! Provider entry point and engine boundary.
//!
//! [`FusionAuthProvider`] describes the provider (type name, version,
//! schemas) and turns a provider configuration block into a
//! [`ConfiguredProvider`]. Configuration builds exactly one [`Client`],
//! which every resource adapter then shares through an `Arc`.
//!
//! [`ConfiguredProvider`] dispatches lifecycle operations by resource type
//! name with states encoded as JSON, the shape the declarative engine
//! exchanges with plugins.
//!
//! # Example
//!
//! ```rust,no_run
//! use fusionauth_provider::{FusionAuthProvider, OperationContext};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), fusionauth_provider::Diagnostics> {
//! let provider = FusionAuthProvider::new("dev");
//! let configured = provider.configure(&json!({
//!     "endpoint": "https://auth.example.com",
//!     "api_token": "token",
//! }))?;
//!
//! let context = OperationContext::with_generated_id();
//! let state = configured
//!     .create("fusionauth_tenant", &context, json!({"name": "acme"}))
//!     .await?;
//! println!("created tenant {}", state["id"]);
//! # Ok(())
//! # }
//! ```

use crate::client::{Client, TenantApi};
use crate::config::{ENV_API_TOKEN, ENV_ENDPOINT, ENV_TENANT, ProviderConfig};
use crate::context::OperationContext;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{ConfigError, ValidationError};
use crate::resource::{self, Resource, TenantResource};
use crate::schema::{Attribute, Schema};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Provider type name; resource type names are prefixed with it.
pub const PROVIDER_TYPE_NAME: &str = "fusionauth";

/// Identity reported to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
}

/// The FusionAuth provider before configuration.
#[derive(Debug, Clone)]
pub struct FusionAuthProvider {
    version: String,
}

impl FusionAuthProvider {
    /// `version` is `dev` for local builds, `test` under acceptance tests,
    /// or the release version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
        }
    }

    pub fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: PROVIDER_TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    /// Schema of the provider configuration block.
    pub fn schema(&self) -> Schema {
        Schema::new("Interact with FusionAuth.")
            .with_attribute(
                "api_token",
                Attribute::optional_string().sensitive().with_description(format!(
                    "The API token used to authenticate with FusionAuth. May also be provided \
                     via the {ENV_API_TOKEN} environment variable."
                )),
            )
            .with_attribute(
                "endpoint",
                Attribute::optional_string().with_description(format!(
                    "The URL of the FusionAuth instance, for example https://auth.example.com. \
                     May also be provided via the {ENV_ENDPOINT} environment variable."
                )),
            )
            .with_attribute(
                "tenant",
                Attribute::optional_string().with_description(format!(
                    "Scope every request to this FusionAuth tenant id. May also be provided \
                     via the {ENV_TENANT} environment variable."
                )),
            )
    }

    /// Schemas of every resource this provider manages, keyed by type name.
    pub fn resource_schemas(&self) -> BTreeMap<String, Schema> {
        let tenant = TenantResource::<Client>::KIND;
        BTreeMap::from([(
            format!("{PROVIDER_TYPE_NAME}_{tenant}"),
            resource::tenant::tenant_schema(),
        )])
    }

    /// Configure from a provider block, falling back to the process environment.
    pub fn configure(&self, config: &Value) -> Result<ConfiguredProvider<Client>, Diagnostics> {
        self.configure_with_env(config, ProviderConfig::from_env())
    }

    /// Configure from a provider block with an explicit environment fallback.
    pub fn configure_with_env(
        &self,
        config: &Value,
        env: ProviderConfig,
    ) -> Result<ConfiguredProvider<Client>, Diagnostics> {
        let block = self.decode_block(config)?;
        debug!("Configuring FusionAuth provider: {block:?}");

        let settings = block.merge(env).resolve()?;
        let client = Client::new(settings).map_err(|e| {
            Diagnostics::from(ConfigError::Client {
                message: e.to_string(),
            })
        })?;
        info!(
            "Configured FusionAuth client for {} (tenant: {})",
            client.base_url(),
            client.tenant_id().unwrap_or("<default>")
        );

        Ok(ConfiguredProvider::new(Arc::new(client)))
    }

    fn decode_block(&self, config: &Value) -> Result<ProviderConfig, Diagnostics> {
        if config.is_null() {
            return Ok(ProviderConfig::default());
        }
        let errors = self.schema().validate(config);
        if !errors.is_empty() {
            return Err(errors.into_iter().map(Diagnostic::from).collect());
        }
        serde_json::from_value(config.clone())
            .map_err(|e| ValidationError::MalformedState(e).into())
    }
}

/// A configured provider: one shared client and the adapters built on it.
#[derive(Debug)]
pub struct ConfiguredProvider<C = Client> {
    client: Arc<C>,
    tenant: TenantResource<C>,
}

impl<C> Clone for ConfiguredProvider<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            tenant: self.tenant.clone(),
        }
    }
}

impl<C: TenantApi> ConfiguredProvider<C> {
    /// Wire every resource adapter to the given client.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            tenant: TenantResource::new(Arc::clone(&client)),
            client,
        }
    }

    /// The client shared by every resource adapter.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// The `fusionauth_tenant` adapter.
    pub fn tenant(&self) -> &TenantResource<C> {
        &self.tenant
    }

    /// Type names of every managed resource.
    pub fn resource_types(&self) -> Vec<String> {
        vec![self.tenant.type_name(PROVIDER_TYPE_NAME)]
    }

    fn tenant_for(&self, type_name: &str) -> Result<&TenantResource<C>, Diagnostics> {
        if type_name == self.tenant.type_name(PROVIDER_TYPE_NAME) {
            Ok(&self.tenant)
        } else {
            Err(Diagnostic::error(
                "Unsupported Resource Type",
                format!("The {PROVIDER_TYPE_NAME} provider does not manage resources of type '{type_name}'."),
            )
            .into())
        }
    }

    /// Create a resource from its planned configuration.
    pub async fn create(
        &self,
        type_name: &str,
        context: &OperationContext,
        planned: Value,
    ) -> Result<Value, Diagnostics> {
        let resource = self.tenant_for(type_name)?;
        resource::create_state(resource, context, planned).await
    }

    /// Refresh a resource; `None` means it should be removed from state.
    pub async fn read(
        &self,
        type_name: &str,
        context: &OperationContext,
        state: Value,
    ) -> Result<Option<Value>, Diagnostics> {
        let resource = self.tenant_for(type_name)?;
        resource::read_state(resource, context, state).await
    }

    /// Update a resource from its prior state and planned configuration.
    pub async fn update(
        &self,
        type_name: &str,
        context: &OperationContext,
        prior: Value,
        planned: Value,
    ) -> Result<Value, Diagnostics> {
        let resource = self.tenant_for(type_name)?;
        resource::update_state(resource, context, prior, planned).await
    }

    pub async fn delete(
        &self,
        type_name: &str,
        context: &OperationContext,
        state: Value,
    ) -> Result<(), Diagnostics> {
        let resource = self.tenant_for(type_name)?;
        resource::delete_state(resource, context, state).await
    }

    /// Import an existing remote resource by identifier.
    pub async fn import(
        &self,
        type_name: &str,
        context: &OperationContext,
        id: &str,
    ) -> Result<Value, Diagnostics> {
        let resource = self.tenant_for(type_name)?;
        resource::import_state(resource, context, id).await
    }
}
