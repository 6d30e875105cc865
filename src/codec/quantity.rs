//! Kubernetes quantity strings.
//!
//! ```text
//! <quantity>        ::= <signedNumber><suffix>
//! <signedNumber>    ::= <number> | +<number> | -<number>
//! <number>          ::= <digits> | <digits>.<digits> | <digits>. | .<digits>
//! <suffix>          ::= <binarySI> | <decimalExponent> | <decimalSI>
//! <binarySI>        ::= Ki | Mi | Gi | Ti | Pi | Ei
//! <decimalSI>       ::= n | u | m | "" | k | M | G | T | P | E
//! <decimalExponent> ::= "e" <signedNumber> | "E" <signedNumber>
//! ```
//!
//! Quantities are validated and kept in the textual form they were given in;
//! the API server owns canonicalization.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use thiserror::Error;

use crate::attr::AttrPath;
use crate::error::{DecodeError, Result};

const BINARY_SI: &[&str] = &["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
const DECIMAL_SI: &[&str] = &["n", "u", "m", "", "k", "M", "G", "T", "P", "E"];

/// QuantityError describes why a string is not a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,

    #[error("quantity has no numeric part")]
    MissingNumber,

    #[error("unknown suffix {0:?}")]
    InvalidSuffix(String),
}

/// Parses a quantity string, keeping its text as given.
pub fn parse_quantity(s: &str) -> std::result::Result<Quantity, QuantityError> {
    if s.is_empty() {
        return Err(QuantityError::Empty);
    }

    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (digits_before, rest) = split_digits(unsigned);
    let (digits_after, suffix) = match rest.strip_prefix('.') {
        Some(fraction) => split_digits(fraction),
        None => ("", rest),
    };
    if digits_before.is_empty() && digits_after.is_empty() {
        return Err(QuantityError::MissingNumber);
    }

    if !is_valid_suffix(suffix) {
        return Err(QuantityError::InvalidSuffix(suffix.to_string()));
    }

    Ok(Quantity(s.to_string()))
}

/// Renders a quantity as text.
pub fn encode_quantity(q: &Quantity) -> String {
    q.0.clone()
}

/// Parses quantity text found at `path`.
pub fn decode_quantity(s: &str, path: &AttrPath) -> Result<Quantity> {
    parse_quantity(s).map_err(|e| DecodeError::invalid_quantity(path.clone(), s, e))
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

fn is_valid_suffix(suffix: &str) -> bool {
    if BINARY_SI.contains(&suffix) || DECIMAL_SI.contains(&suffix) {
        return true;
    }
    let Some(exponent) = suffix.strip_prefix(['e', 'E']) else {
        return false;
    };
    let exponent = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
    !exponent.is_empty() && exponent.bytes().all(|b| b.is_ascii_digit())
}
