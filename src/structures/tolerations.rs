//! Pod scheduling tolerations.

use k8s_openapi::api::core::v1::Toleration;

use crate::attr::{self, AttrPath, Reader};
use crate::error::Result;
use crate::value::{Map, Value};

/// Flattens tolerations into a repeated block, one mapping per toleration.
///
/// Empty fields are omitted; `toleration_seconds` renders as decimal text.
pub fn flatten_tolerations(tolerations: &[Toleration]) -> Vec<Value> {
    tolerations
        .iter()
        .map(|t| {
            let mut att = Map::new();
            att.put_non_empty("key", t.key.as_deref());
            att.put_non_empty("value", t.value.as_deref());
            att.put_non_empty("operator", t.operator.as_deref());
            att.put_non_empty("effect", t.effect.as_deref());
            att.put_int64("toleration_seconds", t.toleration_seconds);
            Value::Map(att)
        })
        .collect()
}

/// Expands a repeated toleration block.
///
/// Fails on the first element whose `toleration_seconds` is not a decimal
/// integer; nothing is returned for the other elements in that case.
pub fn expand_tolerations(list: &[Value]) -> Result<Vec<Toleration>> {
    let path = AttrPath::root("tolerations");
    attr::elements(list, &path)
        .and_then(|elements| elements.iter().map(expand_toleration).collect())
        .inspect_err(|err| tracing::debug!(error = %err, "failed to expand tolerations"))
}

fn expand_toleration(r: &Reader<'_>) -> Result<Toleration> {
    Ok(Toleration {
        key: r.non_empty_string("key")?,
        value: r.non_empty_string("value")?,
        operator: r.non_empty_string("operator")?,
        effect: r.non_empty_string("effect")?,
        toleration_seconds: r.int64("toleration_seconds")?,
    })
}
