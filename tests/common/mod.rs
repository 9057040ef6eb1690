//! Shared test utilities for tenant lifecycle tests.
//!
//! [`MockTenantApi`] is an in-memory stand-in for FusionAuth: it records
//! every call, stores tenants the way the server would, and can be scripted
//! to fail or stall the next request.

#![allow(dead_code)]

use fusionauth_provider::client::{
    ApiErrors, ClientError, ClientResult, ErrorDetail, Tenant, TenantApi, TenantRequest,
    TenantResponse,
};
use fusionauth_provider::{CaptchaMethod, OperationContext, TenantCaptchaModel};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

/// Initialise logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One remote call as observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(TenantRequest),
    Retrieve(String),
    Update(String, TenantRequest),
    Delete(String),
}

/// Recording, scriptable in-memory tenant API.
#[derive(Debug, Default)]
pub struct MockTenantApi {
    tenants: Mutex<HashMap<String, Tenant>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<VecDeque<ClientError>>,
    delay: Mutex<Option<Duration>>,
}

impl MockTenantApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tenant as if it had been created out of band.
    pub fn with_tenant(self, tenant: Tenant) -> Self {
        self.tenants
            .lock()
            .unwrap()
            .insert(tenant.id.clone(), tenant);
        self
    }

    /// Fail the next call with `error`.
    pub fn fail_next(&self, error: ClientError) {
        self.failures.lock().unwrap().push_back(error);
    }

    /// Delay every call before it is answered.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Remove a tenant as if it had been deleted out of band.
    pub fn remove(&self, id: &str) {
        self.tenants.lock().unwrap().remove(id);
    }

    pub fn tenant(&self, id: &str) -> Option<Tenant> {
        self.tenants.lock().unwrap().get(id).cloned()
    }

    pub fn tenant_count(&self) -> usize {
        self.tenants.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn begin(&self, call: Call) -> ClientResult<()> {
        self.calls.lock().unwrap().push(call);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.failures.lock().unwrap().pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn stored(&self, id: &str) -> ClientResult<Tenant> {
        self.tenant(id)
            .ok_or_else(|| ClientError::not_found("tenant", id))
    }
}

/// Server-side view of a written tenant: assigned id, configured, timestamps.
fn persisted(mut tenant: Tenant, id: String, existing: Option<&Tenant>) -> Tenant {
    let now = chrono::Utc::now().timestamp_millis();
    tenant.id = id;
    tenant.configured = true;
    tenant.insert_instant = existing.and_then(|t| t.insert_instant).or(Some(now));
    tenant.last_update_instant = Some(now);
    tenant
}

impl TenantApi for MockTenantApi {
    async fn create_tenant(&self, request: &TenantRequest) -> ClientResult<TenantResponse> {
        self.begin(Call::Create(request.clone())).await?;
        let id = if request.tenant.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            request.tenant.id.clone()
        };
        let tenant = persisted(request.tenant.clone(), id.clone(), None);
        self.tenants.lock().unwrap().insert(id, tenant.clone());
        Ok(TenantResponse { tenant })
    }

    async fn retrieve_tenant(&self, tenant_id: &str) -> ClientResult<TenantResponse> {
        self.begin(Call::Retrieve(tenant_id.to_string())).await?;
        Ok(TenantResponse {
            tenant: self.stored(tenant_id)?,
        })
    }

    async fn update_tenant(
        &self,
        tenant_id: &str,
        request: &TenantRequest,
    ) -> ClientResult<TenantResponse> {
        self.begin(Call::Update(tenant_id.to_string(), request.clone()))
            .await?;
        let existing = self.stored(tenant_id)?;
        let tenant = persisted(
            request.tenant.clone(),
            tenant_id.to_string(),
            Some(&existing),
        );
        self.tenants
            .lock()
            .unwrap()
            .insert(tenant_id.to_string(), tenant.clone());
        Ok(TenantResponse { tenant })
    }

    async fn delete_tenant(&self, tenant_id: &str) -> ClientResult<()> {
        self.begin(Call::Delete(tenant_id.to_string())).await?;
        self.tenants
            .lock()
            .unwrap()
            .remove(tenant_id)
            .map(|_| ())
            .ok_or_else(|| ClientError::not_found("tenant", tenant_id))
    }
}

/// A context for a single test operation.
pub fn context() -> OperationContext {
    OperationContext::with_generated_id()
}

/// A remote tenant as FusionAuth would return it.
pub fn remote_tenant(id: &str, name: &str) -> Tenant {
    Tenant {
        id: id.to_string(),
        name: name.to_string(),
        configured: true,
        insert_instant: Some(1_700_000_000_000),
        last_update_instant: Some(1_700_000_000_000),
        ..Default::default()
    }
}

pub fn hcaptcha() -> TenantCaptchaModel {
    TenantCaptchaModel {
        enabled: Some(true),
        method: Some(CaptchaMethod::HCaptcha),
        secret_key: Some("secret".to_string()),
        site_key: Some("site".to_string()),
        threshold: Some(0.5),
    }
}

/// FusionAuth's rejection of a duplicate tenant name.
pub fn duplicate_name_error() -> ClientError {
    ClientError::Rejected(ApiErrors::default().with_field_error(
        "tenant.name",
        ErrorDetail::new(
            "[duplicate]tenant.name",
            "A Tenant with name [acme] already exists.",
        ),
    ))
}

/// A rejection carrying `count` distinct complaints.
pub fn rejection_with(count: usize) -> ClientError {
    let errors = (0..count).fold(ApiErrors::default(), |errors, i| {
        errors.with_field_error(
            format!("tenant.field{i}"),
            ErrorDetail::new(format!("[invalid]tenant.field{i}"), format!("Problem {i}")),
        )
    });
    ClientError::Rejected(errors)
}

/// Planned JSON configuration for a tenant resource.
pub fn planned_tenant(name: &str) -> Value {
    json!({"name": name})
}
