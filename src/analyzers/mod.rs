//! Frequency counts and descriptive statistics over a cleaned company table.

pub mod aggregate;
pub mod describe;
pub mod types;
pub mod utility;
