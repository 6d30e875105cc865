//! Projected volume sources.
//!
//! Each element of `sources` populates exactly one of five projection kinds.
//! Expansion reads the element into a [`Projection`] and rejects elements
//! that populate no kind or several.

use k8s_openapi::api::core::v1::{
    ClusterTrustBundleProjection, ConfigMapProjection, DownwardAPIProjection,
    DownwardAPIVolumeFile, ObjectFieldSelector, ProjectedVolumeSource, ResourceFieldSelector,
    SecretProjection, ServiceAccountTokenProjection, VolumeProjection,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, LabelSelectorRequirement};

use super::volumes::{expand_block, expand_items, flatten_key_to_path};
use crate::attr::{AttrPath, Reader};
use crate::error::{DecodeError, Result};
use crate::value::{Map, Value};

/// ProjectionKind is the discriminant of a [`Projection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    Secret,
    ConfigMap,
    DownwardApi,
    ServiceAccountToken,
    ClusterTrustBundle,
}

impl ProjectionKind {
    pub const ALL: [ProjectionKind; 5] = [
        ProjectionKind::Secret,
        ProjectionKind::ConfigMap,
        ProjectionKind::DownwardApi,
        ProjectionKind::ServiceAccountToken,
        ProjectionKind::ClusterTrustBundle,
    ];

    /// Attribute key holding this kind inside a `sources` element.
    pub fn key(self) -> &'static str {
        match self {
            ProjectionKind::Secret => "secret",
            ProjectionKind::ConfigMap => "config_map",
            ProjectionKind::DownwardApi => "downward_api",
            ProjectionKind::ServiceAccountToken => "service_account_token",
            ProjectionKind::ClusterTrustBundle => "cluster_trust_bundle",
        }
    }

    /// Comma separated list of every kind's key.
    pub fn key_list() -> String {
        ProjectionKind::ALL.map(ProjectionKind::key).join(", ")
    }
}

/// Projection is one element of a projected volume's `sources`.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Secret(SecretProjection),
    ConfigMap(ConfigMapProjection),
    DownwardApi(DownwardAPIProjection),
    ServiceAccountToken(ServiceAccountTokenProjection),
    ClusterTrustBundle(ClusterTrustBundleProjection),
}

impl Projection {
    pub fn kind(&self) -> ProjectionKind {
        match self {
            Projection::Secret(_) => ProjectionKind::Secret,
            Projection::ConfigMap(_) => ProjectionKind::ConfigMap,
            Projection::DownwardApi(_) => ProjectionKind::DownwardApi,
            Projection::ServiceAccountToken(_) => ProjectionKind::ServiceAccountToken,
            Projection::ClusterTrustBundle(_) => ProjectionKind::ClusterTrustBundle,
        }
    }
}

impl From<Projection> for VolumeProjection {
    fn from(projection: Projection) -> Self {
        match projection {
            Projection::Secret(p) => VolumeProjection {
                secret: Some(p),
                ..Default::default()
            },
            Projection::ConfigMap(p) => VolumeProjection {
                config_map: Some(p),
                ..Default::default()
            },
            Projection::DownwardApi(p) => VolumeProjection {
                downward_api: Some(p),
                ..Default::default()
            },
            Projection::ServiceAccountToken(p) => VolumeProjection {
                service_account_token: Some(p),
                ..Default::default()
            },
            Projection::ClusterTrustBundle(p) => VolumeProjection {
                cluster_trust_bundle: Some(p),
                ..Default::default()
            },
        }
    }
}

// ============ Projected volume source ============

pub fn flatten_projected_volume_source(source: &ProjectedVolumeSource) -> Vec<Value> {
    let mut att = Map::new();
    att.put_mode("default_mode", source.default_mode);
    let sources = source
        .sources
        .iter()
        .flatten()
        .map(flatten_volume_projection)
        .collect();
    att.put_list("sources", sources);
    vec![Value::Map(att)]
}

pub fn expand_projected_volume_source(list: &[Value]) -> Result<ProjectedVolumeSource> {
    let path = AttrPath::root("projected");
    expand_block(list, &path, |r| {
        let sources = r
            .list("sources")?
            .iter()
            .enumerate()
            .map(|(i, element)| expand_volume_projection(element, &r.at("sources").index(i)))
            .collect::<Result<Vec<_>>>()?;
        Ok(ProjectedVolumeSource {
            default_mode: r.mode("default_mode")?,
            sources: Some(sources).filter(|s| !s.is_empty()),
        })
    })
    .inspect_err(|err| tracing::debug!(error = %err, "failed to expand projected volume source"))
}

/// Flattens one `sources` element. Every populated kind gets its key.
pub fn flatten_volume_projection(projection: &VolumeProjection) -> Value {
    let VolumeProjection {
        cluster_trust_bundle,
        config_map,
        downward_api,
        secret,
        service_account_token,
    } = projection;

    let mut att = Map::new();
    if let Some(p) = secret {
        att.set(ProjectionKind::Secret.key(), flatten_secret_projection(p));
    }
    if let Some(p) = config_map {
        att.set(ProjectionKind::ConfigMap.key(), flatten_config_map_projection(p));
    }
    if let Some(p) = downward_api {
        att.set(ProjectionKind::DownwardApi.key(), flatten_downward_api_projection(p));
    }
    if let Some(p) = service_account_token {
        att.set(
            ProjectionKind::ServiceAccountToken.key(),
            flatten_service_account_token_projection(p),
        );
    }
    if let Some(p) = cluster_trust_bundle {
        att.set(
            ProjectionKind::ClusterTrustBundle.key(),
            flatten_cluster_trust_bundle_projection(p),
        );
    }
    Value::Map(att)
}

/// Expands one `sources` element found at `path`.
pub fn expand_volume_projection(element: &Value, path: &AttrPath) -> Result<VolumeProjection> {
    let map = element
        .as_map()
        .ok_or_else(|| DecodeError::type_mismatch(path.clone(), "map", element.type_name()))?;
    let r = Reader::new(map, path.clone());

    let mut populated = Vec::new();
    for kind in ProjectionKind::ALL {
        if let Some(block) = r.block(kind.key())? {
            populated.push((kind, block));
        }
    }

    let projection = match populated.as_slice() {
        [] => return Err(DecodeError::EmptyProjection { path: path.clone() }),
        [(kind, block)] => expand_projection(*kind, block)?,
        many => {
            return Err(DecodeError::AmbiguousProjection {
                path: path.clone(),
                kinds: many.iter().map(|(kind, _)| kind.key()).collect(),
            })
        }
    };
    Ok(projection.into())
}

fn expand_projection(kind: ProjectionKind, r: &Reader<'_>) -> Result<Projection> {
    Ok(match kind {
        ProjectionKind::Secret => Projection::Secret(expand_secret_projection(r)?),
        ProjectionKind::ConfigMap => Projection::ConfigMap(expand_config_map_projection(r)?),
        ProjectionKind::DownwardApi => Projection::DownwardApi(expand_downward_api_projection(r)?),
        ProjectionKind::ServiceAccountToken => {
            Projection::ServiceAccountToken(expand_service_account_token_projection(r)?)
        }
        ProjectionKind::ClusterTrustBundle => {
            Projection::ClusterTrustBundle(expand_cluster_trust_bundle_projection(r)?)
        }
    })
}

// ============ Secret and config map ============

fn flatten_secret_projection(p: &SecretProjection) -> Vec<Value> {
    let mut att = Map::new();
    att.put_non_empty("name", Some(p.name.as_str()));
    att.put_list("items", p.items.as_deref().map(flatten_key_to_path).unwrap_or_default());
    att.put_some_bool("optional", p.optional);
    vec![Value::Map(att)]
}

fn expand_secret_projection(r: &Reader<'_>) -> Result<SecretProjection> {
    Ok(SecretProjection {
        items: expand_items(r)?,
        name: r.string_or_default("name")?,
        optional: r.bool("optional")?,
    })
}

fn flatten_config_map_projection(p: &ConfigMapProjection) -> Vec<Value> {
    let mut att = Map::new();
    att.put_non_empty("name", Some(p.name.as_str()));
    att.put_list("items", p.items.as_deref().map(flatten_key_to_path).unwrap_or_default());
    att.put_some_bool("optional", p.optional);
    vec![Value::Map(att)]
}

fn expand_config_map_projection(r: &Reader<'_>) -> Result<ConfigMapProjection> {
    Ok(ConfigMapProjection {
        items: expand_items(r)?,
        name: r.string_or_default("name")?,
        optional: r.bool("optional")?,
    })
}

// ============ Downward API ============

fn flatten_downward_api_projection(p: &DownwardAPIProjection) -> Vec<Value> {
    let items = p
        .items
        .iter()
        .flatten()
        .map(flatten_downward_api_volume_file)
        .collect();
    let mut att = Map::new();
    att.put_list("items", items);
    vec![Value::Map(att)]
}

fn expand_downward_api_projection(r: &Reader<'_>) -> Result<DownwardAPIProjection> {
    let items = r
        .elements("items")?
        .iter()
        .map(expand_downward_api_volume_file)
        .collect::<Result<Vec<_>>>()?;
    Ok(DownwardAPIProjection {
        items: Some(items).filter(|items| !items.is_empty()),
    })
}

fn flatten_downward_api_volume_file(file: &DownwardAPIVolumeFile) -> Value {
    let mut att = Map::new();
    att.put_string("path", &file.path);
    att.put_mode("mode", file.mode);
    if let Some(field_ref) = &file.field_ref {
        let mut selector = Map::new();
        selector.put_non_empty("api_version", field_ref.api_version.as_deref());
        selector.put_string("field_path", &field_ref.field_path);
        att.set("field_ref", Value::block(selector));
    }
    if let Some(resource_ref) = &file.resource_field_ref {
        let mut selector = Map::new();
        selector.put_non_empty("container_name", resource_ref.container_name.as_deref());
        selector.put_string("resource", &resource_ref.resource);
        selector.put_quantity("divisor", resource_ref.divisor.as_ref());
        att.set("resource_field_ref", Value::block(selector));
    }
    Value::Map(att)
}

fn expand_downward_api_volume_file(r: &Reader<'_>) -> Result<DownwardAPIVolumeFile> {
    let field_ref = match r.block("field_ref")? {
        Some(s) => Some(ObjectFieldSelector {
            api_version: s.non_empty_string("api_version")?,
            field_path: s.string_or_default("field_path")?,
        }),
        None => None,
    };
    let resource_field_ref = match r.block("resource_field_ref")? {
        Some(s) => Some(ResourceFieldSelector {
            container_name: s.non_empty_string("container_name")?,
            divisor: s.quantity("divisor")?,
            resource: s.string_or_default("resource")?,
        }),
        None => None,
    };
    Ok(DownwardAPIVolumeFile {
        field_ref,
        mode: r.mode("mode")?,
        path: r.string_or_default("path")?,
        resource_field_ref,
    })
}

// ============ Service account token ============

fn flatten_service_account_token_projection(p: &ServiceAccountTokenProjection) -> Vec<Value> {
    let mut att = Map::new();
    att.put_non_empty("audience", p.audience.as_deref());
    att.put_int64("expiration_seconds", p.expiration_seconds);
    att.put_string("path", &p.path);
    vec![Value::Map(att)]
}

fn expand_service_account_token_projection(
    r: &Reader<'_>,
) -> Result<ServiceAccountTokenProjection> {
    Ok(ServiceAccountTokenProjection {
        audience: r.non_empty_string("audience")?,
        expiration_seconds: r.int64("expiration_seconds")?,
        path: r.string_or_default("path")?,
    })
}

// ============ Cluster trust bundle ============

fn flatten_cluster_trust_bundle_projection(p: &ClusterTrustBundleProjection) -> Vec<Value> {
    let mut att = Map::new();
    att.put_non_empty("name", p.name.as_deref());
    att.put_non_empty("signer_name", p.signer_name.as_deref());
    att.put_some_bool("optional", p.optional);
    att.put_string("path", &p.path);
    if let Some(selector) = &p.label_selector {
        att.set("label_selector", flatten_label_selector(selector));
    }
    vec![Value::Map(att)]
}

fn expand_cluster_trust_bundle_projection(r: &Reader<'_>) -> Result<ClusterTrustBundleProjection> {
    let label_selector = match r.block("label_selector")? {
        Some(s) => Some(expand_label_selector(&s)?),
        None => None,
    };
    Ok(ClusterTrustBundleProjection {
        label_selector,
        name: r.non_empty_string("name")?,
        optional: r.bool("optional")?,
        path: r.string_or_default("path")?,
        signer_name: r.non_empty_string("signer_name")?,
    })
}

fn flatten_label_selector(selector: &LabelSelector) -> Vec<Value> {
    let expressions = selector
        .match_expressions
        .iter()
        .flatten()
        .map(|req| {
            let mut att = Map::new();
            att.put_string("key", &req.key);
            att.put_string("operator", &req.operator);
            let values = req.values.iter().flatten().map(|v| Value::from(v.as_str())).collect();
            att.put_list("values", values);
            Value::Map(att)
        })
        .collect();

    let mut att = Map::new();
    att.put_string_map("match_labels", selector.match_labels.as_ref());
    att.put_list("match_expressions", expressions);
    vec![Value::Map(att)]
}

fn expand_label_selector(r: &Reader<'_>) -> Result<LabelSelector> {
    let expressions = r
        .elements("match_expressions")?
        .iter()
        .map(|req| -> Result<LabelSelectorRequirement> {
            Ok(LabelSelectorRequirement {
                key: req.string_or_default("key")?,
                operator: req.string_or_default("operator")?,
                values: req.string_list("values")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(LabelSelector {
        match_expressions: Some(expressions).filter(|e| !e.is_empty()),
        match_labels: r.string_map("match_labels")?,
    })
}
