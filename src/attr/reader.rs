//! Reading typed fields out of attribute mappings.
//!
//! A key holding `Null` is treated the same as a missing key. Whether a
//! present empty string counts as set is decided per field by the caller,
//! through [`Reader::string`] or [`Reader::non_empty_string`].

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use super::path::AttrPath;
use crate::codec::{decode_int64, decode_mode, decode_quantity};
use crate::error::{DecodeError, Result};
use crate::value::{Map, Value};

/// Returns the mapping of a set block, or `None` for an unset block.
///
/// A block is unset when the list is empty or its first element is `Null`.
pub fn block<'a>(list: &'a [Value], path: &AttrPath) -> Result<Option<Reader<'a>>> {
    match list.first() {
        None | Some(Value::Null) => {
            tracing::trace!(%path, "block is unset");
            Ok(None)
        }
        Some(Value::Map(map)) => Ok(Some(Reader::new(map, path.index(0)))),
        Some(other) => Err(DecodeError::type_mismatch(path.index(0), "map", other.type_name())),
    }
}

/// Returns a reader for every element of a repeated block.
pub fn elements<'a>(list: &'a [Value], path: &AttrPath) -> Result<Vec<Reader<'a>>> {
    list.iter()
        .enumerate()
        .map(|(i, element)| match element {
            Value::Map(map) => Ok(Reader::new(map, path.index(i))),
            other => Err(DecodeError::type_mismatch(path.index(i), "map", other.type_name())),
        })
        .collect()
}

/// Reader reads fields from one attribute mapping, tracking its path.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    map: &'a Map,
    path: AttrPath,
}

impl<'a> Reader<'a> {
    pub fn new(map: &'a Map, path: AttrPath) -> Self {
        Reader { map, path }
    }

    pub fn path(&self) -> &AttrPath {
        &self.path
    }

    /// Path of the given key inside this mapping.
    pub fn at(&self, key: &str) -> AttrPath {
        self.path.field(key)
    }

    /// Returns true if the key is present and not `Null`.
    pub fn has(&self, key: &str) -> bool {
        self.value(key).is_some()
    }

    fn value(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn mismatch(&self, key: &str, expected: &'static str, actual: &Value) -> DecodeError {
        DecodeError::type_mismatch(self.at(key), expected, actual.type_name())
    }

    /// Reads a string, `Some("")` included.
    pub fn string(&self, key: &str) -> Result<Option<&'a str>> {
        match self.value(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.mismatch(key, "string", other)),
        }
    }

    /// Reads a string, treating the empty string as unset.
    pub fn non_empty_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .string(key)?
            .filter(|s| !s.is_empty())
            .map(str::to_string))
    }

    /// Reads a string for a required typed field, defaulting to empty.
    pub fn string_or_default(&self, key: &str) -> Result<String> {
        Ok(self.string(key)?.unwrap_or_default().to_string())
    }

    pub fn bool(&self, key: &str) -> Result<Option<bool>> {
        match self.value(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(self.mismatch(key, "bool", other)),
        }
    }

    /// Reads a list; a missing key reads as an empty list.
    pub fn list(&self, key: &str) -> Result<&'a [Value]> {
        match self.value(key) {
            None => Ok(&[]),
            Some(Value::List(l)) => Ok(l),
            Some(other) => Err(self.mismatch(key, "list", other)),
        }
    }

    /// Reads a set block nested under the key.
    pub fn block(&self, key: &str) -> Result<Option<Reader<'a>>> {
        block(self.list(key)?, &self.at(key))
    }

    /// Reads every element of a repeated block nested under the key.
    pub fn elements(&self, key: &str) -> Result<Vec<Reader<'a>>> {
        elements(self.list(key)?, &self.at(key))
    }

    /// Reads a string-to-string mapping; missing and empty read as `None`.
    pub fn string_map(&self, key: &str) -> Result<Option<BTreeMap<String, String>>> {
        let map = match self.value(key) {
            None => return Ok(None),
            Some(Value::Map(m)) => m,
            Some(other) => return Err(self.mismatch(key, "map", other)),
        };
        if map.is_empty() {
            return Ok(None);
        }
        let path = self.at(key);
        map.iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                other => Err(DecodeError::type_mismatch(
                    path.field(k.as_str()),
                    "string",
                    other.type_name(),
                )),
            })
            .collect::<Result<BTreeMap<_, _>>>()
            .map(Some)
    }

    /// Reads a list of strings; missing and empty read as `None`.
    pub fn string_list(&self, key: &str) -> Result<Option<Vec<String>>> {
        let list = self.list(key)?;
        if list.is_empty() {
            return Ok(None);
        }
        let path = self.at(key);
        list.iter()
            .enumerate()
            .map(|(i, v)| match v {
                Value::String(s) => Ok(s.clone()),
                other => Err(DecodeError::type_mismatch(path.index(i), "string", other.type_name())),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }

    /// Reads file mode bits; an empty string reads as unset.
    pub fn mode(&self, key: &str) -> Result<Option<i32>> {
        match self.string(key)? {
            None | Some("") => Ok(None),
            Some(s) => decode_mode(s, &self.at(key)).map(Some),
        }
    }

    /// Reads a decimal integer; an empty string reads as unset.
    pub fn int64(&self, key: &str) -> Result<Option<i64>> {
        match self.string(key)? {
            None | Some("") => Ok(None),
            Some(s) => decode_int64(s, &self.at(key)).map(Some),
        }
    }

    /// Reads a quantity; an empty string reads as unset.
    pub fn quantity(&self, key: &str) -> Result<Option<Quantity>> {
        match self.string(key)? {
            None | Some("") => Ok(None),
            Some(s) => decode_quantity(s, &self.at(key)).map(Some),
        }
    }
}
