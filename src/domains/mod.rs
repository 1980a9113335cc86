//! Domains - The document shapes served by the `docgate` binary.
//!
//! Each domain lives in its own logical database, one collection per type.

pub mod catalog;
pub mod products;
pub mod students;
