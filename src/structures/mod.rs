//! Structures module - flatten and expand functions per workload entity.
//!
//! Flatteners turn a typed Kubernetes object into an attribute tree and never
//! fail. Expanders turn an attribute tree back into the typed object and
//! report a [`DecodeError`](crate::error::DecodeError) when a value cannot be decoded.

mod projected;
mod security_context;
mod tolerations;
mod volumes;

#[cfg(test)]
mod tolerations_test;




pub use projected::*;
pub use security_context::*;
pub use tolerations::*;
pub use volumes::{
    expand_config_map_volume_source, expand_csi_volume_source, expand_empty_dir_volume_source,
    expand_key_to_path, expand_local_object_reference, expand_secret_volume_source,
    flatten_config_map_volume_source, flatten_csi_volume_source, flatten_empty_dir_volume_source,
    flatten_key_to_path, flatten_local_object_reference, flatten_secret_volume_source,
};

use k8s_openapi::api::core::v1::{
    CSIVolumeSource, ConfigMapVolumeSource, EmptyDirVolumeSource, ProjectedVolumeSource,
    SecretVolumeSource, Toleration, WindowsSecurityContextOptions,
};

use crate::error::Result;
use crate::value::Value;

/// Structure pairs the flattener and expander of one entity.
pub trait Structure: Sized {
    /// Attribute name of the entity, used as the root of error paths.
    const KIND: &'static str;

    fn flatten(&self) -> Vec<Value>;

    fn expand(list: &[Value]) -> Result<Self>;
}

impl Structure for Vec<Toleration> {
    const KIND: &'static str = "tolerations";

    fn flatten(&self) -> Vec<Value> {
        flatten_tolerations(self)
    }

    fn expand(list: &[Value]) -> Result<Self> {
        expand_tolerations(list)
    }
}

impl Structure for SecretVolumeSource {
    const KIND: &'static str = "secret";

    fn flatten(&self) -> Vec<Value> {
        flatten_secret_volume_source(self)
    }

    fn expand(list: &[Value]) -> Result<Self> {
        expand_secret_volume_source(list)
    }
}

impl Structure for ConfigMapVolumeSource {
    const KIND: &'static str = "config_map";

    fn flatten(&self) -> Vec<Value> {
        flatten_config_map_volume_source(self)
    }

    fn expand(list: &[Value]) -> Result<Self> {
        expand_config_map_volume_source(list)
    }
}

impl Structure for EmptyDirVolumeSource {
    const KIND: &'static str = "empty_dir";

    fn flatten(&self) -> Vec<Value> {
        flatten_empty_dir_volume_source(self)
    }

    fn expand(list: &[Value]) -> Result<Self> {
        expand_empty_dir_volume_source(list)
    }
}

impl Structure for CSIVolumeSource {
    const KIND: &'static str = "csi";

    fn flatten(&self) -> Vec<Value> {
        flatten_csi_volume_source(self)
    }

    fn expand(list: &[Value]) -> Result<Self> {
        expand_csi_volume_source(list)
    }
}

impl Structure for ProjectedVolumeSource {
    const KIND: &'static str = "projected";

    fn flatten(&self) -> Vec<Value> {
        flatten_projected_volume_source(self)
    }

    fn expand(list: &[Value]) -> Result<Self> {
        expand_projected_volume_source(list)
    }
}

impl Structure for WindowsSecurityContextOptions {
    const KIND: &'static str = "windows_options";

    fn flatten(&self) -> Vec<Value> {
        flatten_windows_options(self)
    }

    fn expand(list: &[Value]) -> Result<Self> {
        Ok(expand_windows_options(list))
    }
}
