//! # Provider Schema Export
//!
//! Prints the provider configuration schema and every resource schema as a
//! single pretty-printed JSON document, for documentation generation.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin schema-export            # version "dev"
//! cargo run --bin schema-export -- 1.4.0   # explicit provider version
//! cargo run --bin schema-export -- --summary
//! ```
//!
//! ## Output
//!
//! ```text
//! {
//!   "provider": { "type_name": "fusionauth", "version": "dev" },
//!   "provider_schema": { ... },
//!   "resource_schemas": { "fusionauth_tenant": { ... } }
//! }
//! ```

use fusionauth_provider::FusionAuthProvider;
use fusionauth_provider::schema::Schema;
use serde_json::json;
use std::env;
use std::process;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let summary = args.iter().any(|arg| arg == "--summary");
    let version = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("dev");

    let provider = FusionAuthProvider::new(version);

    if summary {
        print_summary(&provider);
        return;
    }

    let document = json!({
        "provider": provider.metadata(),
        "provider_schema": provider.schema(),
        "resource_schemas": provider.resource_schemas(),
    });

    match serde_json::to_string_pretty(&document) {
        Ok(rendered) => println!("{rendered}"),
        Err(e) => {
            eprintln!("❌ Failed to render schemas: {e}");
            process::exit(1);
        }
    }
}

fn print_summary(provider: &FusionAuthProvider) {
    let metadata = provider.metadata();
    println!("Provider: {} ({})", metadata.type_name, metadata.version);
    print_schema_summary("provider", &provider.schema());
    for (type_name, schema) in provider.resource_schemas() {
        print_schema_summary(&type_name, &schema);
    }
}

fn print_schema_summary(name: &str, schema: &Schema) {
    println!("\n{name}:");
    println!("  Description: {}", schema.description);
    println!("  Attributes: {}", schema.attributes.len());

    for (attribute_name, attribute) in &schema.attributes {
        let mut flags = Vec::new();
        if attribute.required {
            flags.push("required");
        }
        if attribute.optional {
            flags.push("optional");
        }
        if attribute.computed {
            flags.push("computed");
        }
        if attribute.sensitive {
            flags.push("sensitive");
        }
        println!(
            "    - {attribute_name}: {} [{}]",
            attribute.attribute_type.as_str(),
            flags.join(", ")
        );
        for (nested_name, nested) in &attribute.attributes {
            println!(
                "        - {nested_name}: {}",
                nested.attribute_type.as_str()
            );
        }
    }
}
