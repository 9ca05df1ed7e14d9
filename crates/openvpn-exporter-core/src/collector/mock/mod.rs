//! Mock filesystem and fixture status documents for testing.

mod filesystem;
pub mod scenarios;

pub use filesystem::MockFs;
