//! Codec module - scalar conversions between attribute strings and typed fields.
//!
//! Attribute trees carry numbers as strings. Integers use decimal text, file
//! modes use octal text with a leading zero, and quantities keep their
//! Kubernetes textual form.

mod integer;
mod mode;
mod quantity;

pub use integer::*;
pub use mode::*;
pub use quantity::*;
