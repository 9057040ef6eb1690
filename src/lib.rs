//! FusionAuth provider for declarative infrastructure engines.
//!
//! Manages FusionAuth tenants as a `fusionauth_tenant` resource: the engine
//! hands in planned configuration or prior state, and the provider turns
//! each lifecycle operation into one call against the FusionAuth REST API
//! and maps the authoritative response back into state.
//!
//! # Core Components
//!
//! - [`FusionAuthProvider`] - provider metadata, schemas and configuration
//! - [`ConfiguredProvider`] - lifecycle dispatch by resource type name
//! - [`TenantResource`] - the tenant lifecycle adapter
//! - [`Client`] - FusionAuth HTTP client behind the [`TenantApi`] trait
//! - [`Diagnostics`] - user-facing errors and warnings
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fusionauth_provider::{FusionAuthProvider, OperationContext};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads FUSIONAUTH_API_TOKEN / FUSIONAUTH_ENDPOINT when the block omits them.
//! let provider = FusionAuthProvider::new(env!("CARGO_PKG_VERSION"));
//! let configured = provider.configure(&json!({}))?;
//!
//! let context = OperationContext::with_generated_id();
//! let state = configured
//!     .read("fusionauth_tenant", &context, json!({"id": "a3a8ad0c-3d1c-4f3a-8f6e-7e8f7a1b2c3d"}))
//!     .await?;
//! println!("{state:?}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod provider;
pub mod resource;
pub mod schema;

// Re-export commonly used types for convenience
pub use client::{CaptchaMethod, Client, ClientError, ClientResult, TenantApi};
pub use config::{ClientSettings, ProviderConfig};
pub use context::{CancellationHandle, Operation, OperationContext};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{ConfigError, ConfigResult, ValidationError, ValidationResult};
pub use provider::{ConfiguredProvider, FusionAuthProvider, ProviderMetadata};
pub use resource::{Resource, ResourceMapper, TenantCaptchaModel, TenantResource, TenantResourceModel};
pub use schema::{Attribute, AttributeType, Schema};
