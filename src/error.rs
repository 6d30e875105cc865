//! Decode errors raised while expanding attribute trees.

use std::num::ParseIntError;
use thiserror::Error;

use crate::attr::AttrPath;
use crate::codec::QuantityError;

/// DecodeError reports an attribute value that cannot be converted into
/// the typed field it maps to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{path}: type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        path: AttrPath,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{path}: invalid integer {value:?}: {source}")]
    InvalidInteger {
        path: AttrPath,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{path}: invalid file mode {value:?}: expected octal digits")]
    InvalidMode { path: AttrPath, value: String },

    #[error("{path}: invalid quantity {value:?}: {source}")]
    InvalidQuantity {
        path: AttrPath,
        value: String,
        #[source]
        source: QuantityError,
    },

    #[error("{path}: projection sets none of {}", crate::structures::ProjectionKind::key_list())]
    EmptyProjection { path: AttrPath },

    #[error("{path}: projection sets more than one source: {}", .kinds.join(", "))]
    AmbiguousProjection {
        path: AttrPath,
        kinds: Vec<&'static str>,
    },
}

impl DecodeError {
    /// Creates a type mismatch error.
    pub fn type_mismatch(path: AttrPath, expected: &'static str, actual: &'static str) -> Self {
        DecodeError::TypeMismatch {
            path,
            expected,
            actual,
        }
    }

    /// Creates an invalid integer error.
    pub fn invalid_integer(path: AttrPath, value: impl Into<String>, source: ParseIntError) -> Self {
        DecodeError::InvalidInteger {
            path,
            value: value.into(),
            source,
        }
    }

    /// Creates an invalid file mode error.
    pub fn invalid_mode(path: AttrPath, value: impl Into<String>) -> Self {
        DecodeError::InvalidMode {
            path,
            value: value.into(),
        }
    }

    /// Creates an invalid quantity error.
    pub fn invalid_quantity(path: AttrPath, value: impl Into<String>, source: QuantityError) -> Self {
        DecodeError::InvalidQuantity {
            path,
            value: value.into(),
            source,
        }
    }

    /// Returns the path of the offending attribute.
    pub fn path(&self) -> &AttrPath {
        match self {
            DecodeError::TypeMismatch { path, .. }
            | DecodeError::InvalidInteger { path, .. }
            | DecodeError::InvalidMode { path, .. }
            | DecodeError::InvalidQuantity { path, .. }
            | DecodeError::EmptyProjection { path }
            | DecodeError::AmbiguousProjection { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
