//! Value module - the dynamic attribute tree.
//!
//! Maps, ordered lists, strings and booleans, as exchanged with the
//! resource-configuration layer.

mod value;

pub use value::*;
