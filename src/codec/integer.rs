//! Decimal integer strings.

use crate::attr::AttrPath;
use crate::error::{DecodeError, Result};

/// Renders an integer as decimal text.
pub fn encode_int64(n: i64) -> String {
    n.to_string()
}

/// Parses decimal text into an integer.
pub fn decode_int64(s: &str, path: &AttrPath) -> Result<i64> {
    s.parse::<i64>()
        .map_err(|e| DecodeError::invalid_integer(path.clone(), s, e))
}
