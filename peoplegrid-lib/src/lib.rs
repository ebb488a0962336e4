//! Synthetic people records and the table engine that displays them.
//!
//! The crate generates hierarchical person records and drives an interactive
//! table over them: filtering, grouping with aggregation, sorting, row
//! expansion, pagination, row selection and inline cell editing.

pub mod aggregate;
pub mod error;
pub mod generate;
pub mod model;
pub mod table;

pub use aggregate::rounded_median;
pub use error::Error;
pub use generate::make_data;
pub use table::Table;
