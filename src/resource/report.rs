//! Translation of remote failures into diagnostics.
//!
//! A structured error set from FusionAuth becomes one diagnostic per
//! complaint; anything else (transport failure, unexpected status, decode
//! failure, cancellation) becomes a single diagnostic wrapping the raw error.
//! Every diagnostic names the operation and the resource kind.

use crate::client::ClientError;
use crate::context::Operation;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// Report create errors. Returns whether errors have been reported.
pub fn reported_create_errors(diags: &mut Diagnostics, error: &ClientError, resource: &str) -> bool {
    report_errors(diags, error, Operation::Create, resource)
}

/// Report read errors. Returns whether errors have been reported.
pub fn reported_read_errors(diags: &mut Diagnostics, error: &ClientError, resource: &str) -> bool {
    report_errors(diags, error, Operation::Read, resource)
}

/// Report update errors. Returns whether errors have been reported.
pub fn reported_update_errors(diags: &mut Diagnostics, error: &ClientError, resource: &str) -> bool {
    report_errors(diags, error, Operation::Update, resource)
}

/// Report delete errors. Returns whether errors have been reported.
pub fn reported_delete_errors(diags: &mut Diagnostics, error: &ClientError, resource: &str) -> bool {
    report_errors(diags, error, Operation::Delete, resource)
}

/// Add diagnostics for `error` and return whether `diags` now holds an error.
pub fn report_errors(
    diags: &mut Diagnostics,
    error: &ClientError,
    operation: Operation,
    resource: &str,
) -> bool {
    match error.api_errors() {
        Some(api_errors) => {
            for complaint in api_errors.iter() {
                let diagnostic = Diagnostic::error(
                    format!("Error attempting to {operation} a {resource}"),
                    format!(
                        "FusionAuth reported an error while attempting to {operation} a \
                         fusionauth_{resource} resource. Please fix the following error: {complaint}"
                    ),
                );
                diags.push(match complaint.field {
                    Some(field) => diagnostic.with_attribute(field),
                    None => diagnostic,
                });
            }
        }
        None => diags.add_error(
            "FusionAuth client error",
            format!("Unable to {operation} a fusionauth_{resource} resource, client returned: {error}"),
        ),
    }

    diags.has_error()
}
