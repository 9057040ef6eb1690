//! Resource lifecycle adapters.
//!
//! A [`Resource`] converts between declarative state and one kind of remote
//! entity with create, read, update, delete and import operations. Each
//! operation owns the model it is given, returns the model to persist, and
//! reports failures as [`Diagnostics`] without persisting partial state.
//!
//! The `*_state` functions wrap a resource at the engine boundary, where
//! state travels as JSON: they validate configuration against the
//! resource schema, decode it into the typed model, run the operation, and
//! encode the result.
//!
//! # Key Components
//!
//! * [`Resource`] - lifecycle trait implemented once per resource kind
//! * [`ResourceMapper`] - pure state/wire conversion used by the adapters
//! * [`report`] - translation of remote failures into diagnostics
//! * [`tenant`] - the `fusionauth_tenant` adapter

pub mod mapper;
pub mod report;
pub mod tenant;

pub use mapper::ResourceMapper;
pub use report::report_errors;
pub use tenant::{TenantCaptchaModel, TenantResource, TenantResourceModel};

use crate::context::OperationContext;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ValidationError;
use crate::schema::Schema;
use log::trace;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;

/// Lifecycle adapter for one resource kind.
pub trait Resource: Send + Sync {
    /// Typed state of one resource instance.
    type Model: Serialize + DeserializeOwned + Send;

    /// Resource kind, appended to the provider type name (`fusionauth_<kind>`).
    const KIND: &'static str;

    /// Full resource type name under the given provider.
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_{}", Self::KIND)
    }

    /// Schema declared to the engine.
    fn schema(&self) -> Schema;

    /// Create the remote entity and return the state to persist.
    fn create(
        &self,
        context: &OperationContext,
        plan: Self::Model,
    ) -> impl Future<Output = Result<Self::Model, Diagnostics>> + Send;

    /// Refresh state from the remote entity; `None` when it no longer exists.
    fn read(
        &self,
        context: &OperationContext,
        state: Self::Model,
    ) -> impl Future<Output = Result<Option<Self::Model>, Diagnostics>> + Send;

    /// Apply planned changes to an existing remote entity.
    fn update(
        &self,
        context: &OperationContext,
        plan: Self::Model,
    ) -> impl Future<Output = Result<Self::Model, Diagnostics>> + Send;

    /// Delete the remote entity.
    fn delete(
        &self,
        context: &OperationContext,
        state: Self::Model,
    ) -> impl Future<Output = Result<(), Diagnostics>> + Send;

    /// Adopt an existing remote entity by identifier.
    fn import_state(
        &self,
        context: &OperationContext,
        id: &str,
    ) -> impl Future<Output = Result<Self::Model, Diagnostics>> + Send;
}

/// Validate configuration against `schema` and decode it.
fn decode_config<M: DeserializeOwned>(schema: &Schema, config: Value) -> Result<M, Diagnostics> {
    let errors = schema.validate(&config);
    if !errors.is_empty() {
        return Err(errors.into_iter().map(Diagnostic::from).collect());
    }
    decode_state(config)
}

/// Decode previously persisted state.
fn decode_state<M: DeserializeOwned>(state: Value) -> Result<M, Diagnostics> {
    serde_json::from_value(state).map_err(|e| ValidationError::MalformedState(e).into())
}

fn encode_state<M: Serialize>(model: &M) -> Result<Value, Diagnostics> {
    serde_json::to_value(model).map_err(|e| {
        Diagnostics::from(Diagnostic::error(
            "Unable to encode resource state",
            e.to_string(),
        ))
    })
}

/// Create from a JSON plan.
pub async fn create_state<R: Resource>(
    resource: &R,
    context: &OperationContext,
    planned: Value,
) -> Result<Value, Diagnostics> {
    let plan = decode_config(&resource.schema(), planned)?;
    let saved = resource.create(context, plan).await?;
    trace!("[{}] encoding created {} state", context.request_id, R::KIND);
    encode_state(&saved)
}

/// Read from JSON state; `None` tells the engine to drop the resource.
pub async fn read_state<R: Resource>(
    resource: &R,
    context: &OperationContext,
    state: Value,
) -> Result<Option<Value>, Diagnostics> {
    let state = decode_state(state)?;
    match resource.read(context, state).await? {
        Some(refreshed) => encode_state(&refreshed).map(Some),
        None => Ok(None),
    }
}

/// Update from a JSON plan.
///
/// Computed-only attributes the plan leaves unknown (`null`) keep their prior
/// value, so the planned state always carries the remote `id`. Optional
/// computed blocks left unset are sent as unset.
pub async fn update_state<R: Resource>(
    resource: &R,
    context: &OperationContext,
    prior: Value,
    mut planned: Value,
) -> Result<Value, Diagnostics> {
    let schema = resource.schema();
    if let (Some(planned), Some(prior)) = (planned.as_object_mut(), prior.as_object()) {
        for (name, attribute) in &schema.attributes {
            let unknown = planned.get(name).is_none_or(Value::is_null);
            if attribute.is_read_only() && unknown {
                if let Some(value) = prior.get(name) {
                    planned.insert(name.clone(), value.clone());
                }
            }
        }
    }

    let plan = decode_config(&schema, planned)?;
    let saved = resource.update(context, plan).await?;
    encode_state(&saved)
}

/// Delete from JSON state.
pub async fn delete_state<R: Resource>(
    resource: &R,
    context: &OperationContext,
    state: Value,
) -> Result<(), Diagnostics> {
    let state = decode_state(state)?;
    resource.delete(context, state).await
}

/// Import by identifier, returning the JSON state to persist.
pub async fn import_state<R: Resource>(
    resource: &R,
    context: &OperationContext,
    id: &str,
) -> Result<Value, Diagnostics> {
    let imported = resource.import_state(context, id).await?;
    encode_state(&imported)
}
