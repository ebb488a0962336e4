//! Typed models

pub mod fields;
mod person;
mod record;
mod value;

pub use person::*;
pub use record::*;
pub use value::*;
