//! The `fusionauth_tenant` resource.
//!
//! [`TenantResource`] holds the shared client and runs each lifecycle
//! operation as one request/response exchange with FusionAuth. Tenants that
//! disappear outside of configuration are dropped from state on read and
//! treated as already deleted on delete.

pub mod model;

pub use model::{TenantCaptchaModel, TenantResourceModel, tenant_schema};

use super::report::{
    reported_create_errors, reported_delete_errors, reported_read_errors, reported_update_errors,
};
use super::{Resource, ResourceMapper};
use crate::client::{Client, TenantApi};
use crate::context::{Operation, OperationContext};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ValidationError;
use crate::schema::Schema;
use log::{debug, trace, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Resource kind name.
pub const RESOURCE_KIND: &str = "tenant";

/// Lifecycle adapter for FusionAuth tenants.
#[derive(Debug)]
pub struct TenantResource<C = Client> {
    client: Arc<C>,
}

impl<C> Clone for TenantResource<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: TenantApi> TenantResource<C> {
    /// Create an adapter sharing the given configured client.
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// The client every operation of this adapter goes through.
    pub fn client(&self) -> &C {
        &self.client
    }

    fn required_id(state: &TenantResourceModel, operation: Operation) -> Result<String, Diagnostics> {
        let id = state
            .id()
            .ok_or_else(|| ValidationError::missing_id(operation, RESOURCE_KIND))?;
        Ok(parse_tenant_id(id)?)
    }
}

/// Tenant ids are UUIDs; anything else is rejected before a request is made.
fn parse_tenant_id(id: &str) -> Result<String, ValidationError> {
    Uuid::parse_str(id)
        .map(|_| id.to_string())
        .map_err(|_| ValidationError::invalid_identifier("id", id))
}

impl<C: TenantApi> Resource for TenantResource<C> {
    type Model = TenantResourceModel;

    const KIND: &'static str = RESOURCE_KIND;

    fn schema(&self) -> Schema {
        tenant_schema()
    }

    async fn create(
        &self,
        context: &OperationContext,
        mut plan: TenantResourceModel,
    ) -> Result<TenantResourceModel, Diagnostics> {
        debug!(
            "Creating tenant resource '{}' (request: '{}')",
            plan.name, context.request_id
        );
        plan.validate()?;

        let mut diags = Diagnostics::new();
        let payload = plan.to_request();
        let response = match context.run(self.client.create_tenant(&payload)).await {
            Ok(response) => response,
            Err(error) => {
                reported_create_errors(&mut diags, &error, RESOURCE_KIND);
                trace!("error attempting to create a tenant resource: {error}");
                return Err(diags);
            }
        };
        trace!("successfully created a tenant resource");

        plan.set_state(&response.tenant);
        trace!("successfully converted created tenant response to domain model");
        Ok(plan)
    }

    async fn read(
        &self,
        context: &OperationContext,
        mut state: TenantResourceModel,
    ) -> Result<Option<TenantResourceModel>, Diagnostics> {
        let id = Self::required_id(&state, Operation::Read)?;
        debug!(
            "Reading tenant resource ID '{}' (request: '{}')",
            id, context.request_id
        );

        let mut diags = Diagnostics::new();
        let response = match context.run(self.client.retrieve_tenant(&id)).await {
            Ok(response) => response,
            Err(error) if error.is_not_found() => {
                warn!("tenant '{id}' no longer exists in FusionAuth, removing it from state");
                return Ok(None);
            }
            Err(error) => {
                reported_read_errors(&mut diags, &error, RESOURCE_KIND);
                trace!("error attempting to read a tenant resource: {error}");
                return Err(diags);
            }
        };
        trace!("successfully read tenant resource ID: {id}");

        state.set_state(&response.tenant);
        trace!("successfully converted read tenant response to domain model");
        Ok(Some(state))
    }

    async fn update(
        &self,
        context: &OperationContext,
        mut plan: TenantResourceModel,
    ) -> Result<TenantResourceModel, Diagnostics> {
        let id = Self::required_id(&plan, Operation::Update)?;
        debug!(
            "Updating tenant resource ID '{}' (request: '{}')",
            id, context.request_id
        );
        plan.validate()?;

        let mut diags = Diagnostics::new();
        let payload = plan.to_request();
        let response = match context.run(self.client.update_tenant(&id, &payload)).await {
            Ok(response) => response,
            Err(error) => {
                reported_update_errors(&mut diags, &error, RESOURCE_KIND);
                trace!("error attempting to update a tenant resource: {error}");
                return Err(diags);
            }
        };
        trace!("successfully updated tenant resource ID: {id}");

        plan.set_state(&response.tenant);
        trace!("successfully converted updated tenant response to domain model");
        Ok(plan)
    }

    async fn delete(
        &self,
        context: &OperationContext,
        state: TenantResourceModel,
    ) -> Result<(), Diagnostics> {
        let id = Self::required_id(&state, Operation::Delete)?;
        debug!(
            "Deleting tenant resource ID '{}' (request: '{}')",
            id, context.request_id
        );

        let mut diags = Diagnostics::new();
        match context.run(self.client.delete_tenant(&id)).await {
            Ok(()) => {
                trace!("successfully deleted tenant resource ID: {id}");
                Ok(())
            }
            Err(error) if error.is_not_found() => {
                warn!("tenant '{id}' was already deleted outside of configuration");
                Ok(())
            }
            Err(error) => {
                reported_delete_errors(&mut diags, &error, RESOURCE_KIND);
                trace!("error attempting to delete a tenant resource: {error}");
                Err(diags)
            }
        }
    }

    async fn import_state(
        &self,
        context: &OperationContext,
        id: &str,
    ) -> Result<TenantResourceModel, Diagnostics> {
        if id.trim().is_empty() {
            return Err(Diagnostic::error(
                "Missing Resource Import Identifier",
                "Importing a fusionauth_tenant requires the tenant's identifier.",
            )
            .with_attribute("id")
            .into());
        }

        let id = parse_tenant_id(id.trim())?;

        debug!("Importing tenant resource ID '{id}' (request: '{}')", context.request_id);
        match self.read(context, TenantResourceModel::with_id(id.as_str())).await? {
            Some(imported) => Ok(imported),
            None => Err(Diagnostic::error(
                "Cannot import non-existent remote object",
                format!(
                    "While attempting to import an existing object to fusionauth_tenant, the \
                     provider detected that no object exists with the id '{id}'."
                ),
            )
            .into()),
        }
    }
}
