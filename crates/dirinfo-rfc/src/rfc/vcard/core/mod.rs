//! Content-line data model.
//!
//! - [`ContentLine`] - one logical line: group, name, parameters, value
//! - [`Params`] - ordered, case-insensitive parameter mapping
//! - [`StructuredValue`] - `;`-separated components
//! - [`Value`] - `,`-separated strings, shared by components and parameters
//! - [`PropertyName`] - normalized property names for dispatch

mod content_line;
mod parameter;
mod property;
mod value;

pub use content_line::ContentLine;
pub use parameter::Params;
pub use property::{PropertyName, is_valid_name};
pub use value::{StructuredValue, Value};
