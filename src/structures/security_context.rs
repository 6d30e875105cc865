//! Windows security context options.

use k8s_openapi::api::core::v1::WindowsSecurityContextOptions;

use crate::value::{Map, Value};

/// Flattens the options into a set block.
///
/// Set fields are rendered as they are, `Some("")` included. Unset fields
/// are omitted, so fully unset options flatten to a block with an empty
/// mapping.
pub fn flatten_windows_options(options: &WindowsSecurityContextOptions) -> Vec<Value> {
    let mut att = Map::new();
    att.put_some_string("gmsa_credential_spec", options.gmsa_credential_spec.as_deref());
    att.put_some_string(
        "gmsa_credential_spec_name",
        options.gmsa_credential_spec_name.as_deref(),
    );
    att.put_some_bool("host_process", options.host_process);
    att.put_some_string("run_as_username", options.run_as_user_name.as_deref());
    vec![Value::Map(att)]
}

/// Expands the options block.
///
/// Empty strings mean the field was not configured and leave it unset.
/// Values of an unexpected type are ignored, so expansion cannot fail.
pub fn expand_windows_options(list: &[Value]) -> WindowsSecurityContextOptions {
    let Some(att) = list.first().and_then(Value::as_map) else {
        tracing::trace!("windows options block is unset");
        return WindowsSecurityContextOptions::default();
    };

    let string = |key: &str| {
        att.get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    WindowsSecurityContextOptions {
        gmsa_credential_spec: string("gmsa_credential_spec"),
        gmsa_credential_spec_name: string("gmsa_credential_spec_name"),
        host_process: att.get("host_process").and_then(Value::as_bool),
        run_as_user_name: string("run_as_username"),
    }
}
