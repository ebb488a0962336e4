//! Field names shared by records, accessors and column ids.

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const AGE: &str = "age";
pub const VISITS: &str = "visits";
pub const PROGRESS: &str = "progress";
pub const STATUS: &str = "status";

/// All person fields in display order.
pub const ALL: [&str; 6] = [FIRST_NAME, LAST_NAME, AGE, VISITS, STATUS, PROGRESS];
