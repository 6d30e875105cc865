//! Secret, config map, empty dir and CSI volume sources.
//!
//! Every source is a set block. Which unset fields are omitted and which are
//! rendered as a zero value differs per source and is pinned field by field:
//!
//! | source     | always rendered                  | omitted when unset                              |
//! |------------|----------------------------------|-------------------------------------------------|
//! | secret     |                                  | secret_name, default_mode, optional, items      |
//! | config map | name                             | default_mode, optional, items                   |
//! | empty dir  | medium                           | size_limit                                      |
//! | csi        | driver, volume_attributes        | read_only, fs_type, node_publish_secret_ref     |

use k8s_openapi::api::core::v1::{
    CSIVolumeSource, ConfigMapVolumeSource, EmptyDirVolumeSource, KeyToPath,
    LocalObjectReference, SecretVolumeSource,
};

use crate::attr::{self, string_map, AttrPath, Reader};
use crate::error::Result;
use crate::value::{Map, Value};

// ============ Key to path items ============

/// Flattens `items` entries. Empty keys and paths are omitted.
pub fn flatten_key_to_path(items: &[KeyToPath]) -> Vec<Value> {
    items
        .iter()
        .map(|item| {
            let mut att = Map::new();
            att.put_non_empty("key", Some(item.key.as_str()));
            att.put_mode("mode", item.mode);
            att.put_non_empty("path", Some(item.path.as_str()));
            Value::Map(att)
        })
        .collect()
}

/// Expands `items` entries read at `path`.
pub fn expand_key_to_path(list: &[Value], path: &AttrPath) -> Result<Vec<KeyToPath>> {
    attr::elements(list, path)?
        .iter()
        .map(|r| -> Result<KeyToPath> {
            Ok(KeyToPath {
                key: r.string_or_default("key")?,
                mode: r.mode("mode")?,
                path: r.string_or_default("path")?,
            })
        })
        .collect()
}

pub(crate) fn expand_items(r: &Reader<'_>) -> Result<Option<Vec<KeyToPath>>> {
    let items = expand_key_to_path(r.list("items")?, &r.at("items"))?;
    Ok(Some(items).filter(|items| !items.is_empty()))
}

fn flatten_items(items: Option<&Vec<KeyToPath>>) -> Vec<Value> {
    items.map(|items| flatten_key_to_path(items)).unwrap_or_default()
}

// ============ Local object reference ============

pub fn flatten_local_object_reference(reference: &LocalObjectReference) -> Vec<Value> {
    let mut att = Map::new();
    att.put_string("name", &reference.name);
    vec![Value::Map(att)]
}

/// Expands a `{name}` block; an unset block reads as `None`.
pub fn expand_local_object_reference(
    list: &[Value],
    path: &AttrPath,
) -> Result<Option<LocalObjectReference>> {
    let Some(r) = attr::block(list, path)? else {
        return Ok(None);
    };
    Ok(Some(LocalObjectReference {
        name: r.string_or_default("name")?,
    }))
}

// ============ Secret ============

pub fn flatten_secret_volume_source(source: &SecretVolumeSource) -> Vec<Value> {
    let mut att = Map::new();
    att.put_mode("default_mode", source.default_mode);
    att.put_non_empty("secret_name", source.secret_name.as_deref());
    att.put_list("items", flatten_items(source.items.as_ref()));
    att.put_some_bool("optional", source.optional);
    vec![Value::Map(att)]
}

pub fn expand_secret_volume_source(list: &[Value]) -> Result<SecretVolumeSource> {
    let path = AttrPath::root("secret");
    expand_block(list, &path, |r| {
        Ok(SecretVolumeSource {
            default_mode: r.mode("default_mode")?,
            items: expand_items(r)?,
            optional: r.bool("optional")?,
            secret_name: r.non_empty_string("secret_name")?,
        })
    })
    .inspect_err(|err| tracing::debug!(error = %err, "failed to expand secret volume source"))
}

// ============ Config map ============

pub fn flatten_config_map_volume_source(source: &ConfigMapVolumeSource) -> Vec<Value> {
    let mut att = Map::new();
    att.put_mode("default_mode", source.default_mode);
    att.put_string("name", &source.name);
    att.put_list("items", flatten_items(source.items.as_ref()));
    att.put_some_bool("optional", source.optional);
    vec![Value::Map(att)]
}

pub fn expand_config_map_volume_source(list: &[Value]) -> Result<ConfigMapVolumeSource> {
    let path = AttrPath::root("config_map");
    expand_block(list, &path, |r| {
        Ok(ConfigMapVolumeSource {
            default_mode: r.mode("default_mode")?,
            items: expand_items(r)?,
            name: r.string_or_default("name")?,
            optional: r.bool("optional")?,
        })
    })
    .inspect_err(|err| tracing::debug!(error = %err, "failed to expand config map volume source"))
}

// ============ Empty dir ============

pub fn flatten_empty_dir_volume_source(source: &EmptyDirVolumeSource) -> Vec<Value> {
    let mut att = Map::new();
    att.put_string("medium", source.medium.as_deref().unwrap_or_default());
    att.put_quantity("size_limit", source.size_limit.as_ref());
    vec![Value::Map(att)]
}

pub fn expand_empty_dir_volume_source(list: &[Value]) -> Result<EmptyDirVolumeSource> {
    let path = AttrPath::root("empty_dir");
    expand_block(list, &path, |r| {
        Ok(EmptyDirVolumeSource {
            medium: r.non_empty_string("medium")?,
            size_limit: r.quantity("size_limit")?,
        })
    })
    .inspect_err(|err| tracing::debug!(error = %err, "failed to expand empty dir volume source"))
}

// ============ CSI ============

pub fn flatten_csi_volume_source(source: &CSIVolumeSource) -> Vec<Value> {
    let mut att = Map::new();
    att.put_string("driver", &source.driver);
    att.set(
        "volume_attributes",
        source
            .volume_attributes
            .as_ref()
            .map(string_map)
            .unwrap_or_default(),
    );
    att.put_some_bool("read_only", source.read_only);
    att.put_some_string("fs_type", source.fs_type.as_deref());
    if let Some(reference) = &source.node_publish_secret_ref {
        att.set(
            "node_publish_secret_ref",
            flatten_local_object_reference(reference),
        );
    }
    vec![Value::Map(att)]
}

pub fn expand_csi_volume_source(list: &[Value]) -> Result<CSIVolumeSource> {
    let path = AttrPath::root("csi");
    expand_block(list, &path, |r| {
        Ok(CSIVolumeSource {
            driver: r.string_or_default("driver")?,
            fs_type: r.string("fs_type")?.map(str::to_string),
            node_publish_secret_ref: expand_local_object_reference(
                r.list("node_publish_secret_ref")?,
                &r.at("node_publish_secret_ref"),
            )?,
            read_only: r.bool("read_only")?,
            volume_attributes: r.string_map("volume_attributes")?,
        })
    })
    .inspect_err(|err| tracing::debug!(error = %err, "failed to expand csi volume source"))
}

/// Expands a set block with `f`, or returns the zero value when it is unset.
pub(crate) fn expand_block<T, F>(list: &[Value], path: &AttrPath, f: F) -> Result<T>
where
    T: Default,
    F: FnOnce(&Reader<'_>) -> Result<T>,
{
    match attr::block(list, path)? {
        Some(r) => f(&r),
        None => Ok(T::default()),
    }
}
