#![forbid(unsafe_code)]

//! Core domain model and dose rules for sacubitril/valsartan initiation.
//!
//! This crate provides:
//! - Validated patient assessment types
//! - Dose rule engine (hard stops, starting tier)
//! - Titration schedule builder
//! - Static reference tables
//! - Renderer-facing reports

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod titration;
pub mod engine;
pub mod reference;
pub mod report;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, OutputFormat};
pub use titration::build_schedule;
pub use engine::evaluate;
pub use reference::{get_reference_store, ReferenceStore, Table};
pub use report::{Report, ScheduleRow};
