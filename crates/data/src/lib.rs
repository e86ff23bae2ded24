//! Survey table loading for the avenue engine.
//!
//! [`loader`] turns a CSV export into a [`avenue_core::Dataset`];
//! [`fixtures`] provides a small deterministic table for tests and demos.

pub mod fixtures;
pub mod loader;
mod reader;

pub use fixtures::{demo_csv, demo_dataset};
pub use loader::{load_csv, parse_csv, LoadError};
