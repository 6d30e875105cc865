//! Rendering typed fields into attribute mappings.
//!
//! Each `put_*` method encodes one rendering rule. Flatteners pick the rule
//! per field, so the choice between an omitted key and a rendered zero value
//! stays visible at the call site.

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;

use crate::codec::{encode_int64, encode_mode, encode_quantity};
use crate::value::{Map, Value};

impl Map {
    /// Sets the key to the string, even when empty.
    pub fn put_string(&mut self, key: &str, value: &str) {
        self.set(key, value);
    }

    /// Sets the key only when the string is set and non-empty.
    pub fn put_non_empty(&mut self, key: &str, value: Option<&str>) {
        if let Some(s) = value.filter(|s| !s.is_empty()) {
            self.set(key, s);
        }
    }

    /// Sets the key only when the string is set, `Some("")` included.
    pub fn put_some_string(&mut self, key: &str, value: Option<&str>) {
        if let Some(s) = value {
            self.set(key, s);
        }
    }

    /// Sets the key only when the flag is set.
    pub fn put_some_bool(&mut self, key: &str, value: Option<bool>) {
        if let Some(b) = value {
            self.set(key, b);
        }
    }

    /// Sets the key to the mode string when the mode is set.
    pub fn put_mode(&mut self, key: &str, value: Option<i32>) {
        if let Some(mode) = value {
            self.set(key, encode_mode(mode));
        }
    }

    /// Sets the key to the decimal string when the integer is set.
    pub fn put_int64(&mut self, key: &str, value: Option<i64>) {
        if let Some(n) = value {
            self.set(key, encode_int64(n));
        }
    }

    /// Sets the key to the quantity text when the quantity is set.
    pub fn put_quantity(&mut self, key: &str, value: Option<&Quantity>) {
        if let Some(q) = value {
            self.set(key, encode_quantity(q));
        }
    }

    /// Sets the key to a list when the list is non-empty.
    pub fn put_list(&mut self, key: &str, items: Vec<Value>) {
        if !items.is_empty() {
            self.set(key, items);
        }
    }

    /// Sets the key to a string mapping when the mapping is non-empty.
    pub fn put_string_map(&mut self, key: &str, value: Option<&BTreeMap<String, String>>) {
        if let Some(m) = value.filter(|m| !m.is_empty()) {
            self.set(key, string_map(m));
        }
    }
}

/// Converts a string-to-string mapping into an attribute mapping.
pub fn string_map(m: &BTreeMap<String, String>) -> Map {
    m.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}
