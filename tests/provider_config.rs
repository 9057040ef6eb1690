//! Provider configuration from the configuration block and the environment.

use fusionauth_provider::config::{ENV_API_TOKEN, ENV_ENDPOINT, ENV_TENANT};
use fusionauth_provider::{FusionAuthProvider, ProviderConfig};
use serde_json::json;
use std::collections::HashMap;

fn environment(vars: &[(&str, &str)]) -> ProviderConfig {
    let vars: HashMap<&str, &str> = vars.iter().copied().collect();
    ProviderConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()))
}

#[test]
fn test_environment_only_configuration() {
    let configured = FusionAuthProvider::new("test")
        .configure_with_env(
            &json!({}),
            environment(&[
                (ENV_API_TOKEN, "env-token"),
                (ENV_ENDPOINT, "https://auth.example.com/fusionauth"),
                (ENV_TENANT, "env-tenant"),
            ]),
        )
        .unwrap();

    assert_eq!(
        configured.client().base_url().as_str(),
        "https://auth.example.com/fusionauth"
    );
    assert_eq!(configured.client().tenant_id(), Some("env-tenant"));
}

#[test]
fn test_block_values_win_over_environment() {
    let configured = FusionAuthProvider::new("test")
        .configure_with_env(
            &json!({"endpoint": "http://localhost:9011", "tenant": "block-tenant"}),
            environment(&[
                (ENV_API_TOKEN, "env-token"),
                (ENV_ENDPOINT, "https://ignored.example.com"),
                (ENV_TENANT, "env-tenant"),
            ]),
        )
        .unwrap();

    assert_eq!(configured.client().base_url().as_str(), "http://localhost:9011/");
    assert_eq!(configured.client().tenant_id(), Some("block-tenant"));
}

#[test]
fn test_every_problem_is_reported_as_an_error() {
    let diags = FusionAuthProvider::new("test")
        .configure_with_env(&json!({"endpoint": "not a url"}), environment(&[]))
        .unwrap_err();

    assert_eq!(diags.len(), 2);
    let attributes: Vec<_> = diags.iter().filter_map(|d| d.attribute.as_deref()).collect();
    assert_eq!(attributes, vec!["api_token", "endpoint"]);
}

#[test]
fn test_wrong_attribute_type_in_block() {
    let diags = FusionAuthProvider::new("test")
        .configure_with_env(&json!({"api_token": 42}), environment(&[]))
        .unwrap_err();

    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags.iter().next().unwrap().attribute.as_deref(),
        Some("api_token")
    );
}

#[test]
fn test_schemas_serialize_for_documentation() {
    let provider = FusionAuthProvider::new("1.0.0");
    let document = json!({
        "provider": provider.metadata(),
        "provider_schema": provider.schema(),
        "resource_schemas": provider.resource_schemas(),
    });

    assert_eq!(document["provider"]["type_name"], json!("fusionauth"));
    assert_eq!(
        document["provider_schema"]["attributes"]["api_token"]["sensitive"],
        json!(true)
    );
    let tenant = &document["resource_schemas"]["fusionauth_tenant"]["attributes"];
    assert_eq!(tenant["name"]["required"], json!(true));
    assert_eq!(tenant["id"]["computed"], json!(true));
    assert_eq!(
        tenant["captcha"]["attributes"]["site_key"]["sensitive"],
        json!(true)
    );
}
