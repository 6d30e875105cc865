//! Attr module - paths into attribute trees and the optional-field policy.
//!
//! [`Reader`] pulls typed fields out of a mapping during expansion and the
//! `put_*` methods on [`Map`](crate::value::Map) render them during
//! flattening.

mod path;
mod reader;
mod writer;

pub use path::*;
pub use reader::*;
pub use writer::*;
