//! # Kube Structures
//!
//! Bidirectional mapping between dynamic attribute trees and Kubernetes
//! workload objects.
//!
//! Resource-configuration systems describe nested objects as trees of maps,
//! lists and string scalars. This library flattens typed `k8s-openapi`
//! objects into such trees and expands trees back into typed objects while
//! keeping unset, zero and set fields apart.
//!
//! ## Modules
//!
//! - [`value`] - The dynamic attribute tree
//! - [`attr`] - Attribute paths and the per-field rendering and reading rules
//! - [`codec`] - Integer, file mode and quantity string codecs
//! - [`structures`] - Flatten and expand functions per entity
//! - [`error`] - Decode errors raised by expanders

pub mod attr;
pub mod codec;
pub mod error;
pub mod structures;
pub mod value;

pub use attr::AttrPath;
pub use error::{DecodeError, Result};
pub use structures::{Projection, ProjectionKind, Structure};
pub use value::{Map, Value};
