//! Schedule loading and management for the payroll engine.
//!
//! This module provides functionality to load the statutory withholding
//! schedule from YAML files: metadata, deduction tier tables, tax
//! brackets, and the verification override table.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/jp2024").unwrap();
//! println!("Loaded schedule: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BasicDeductionTier, BracketConfig, DeductionConfig, EmploymentDeductionTier, OverrideBand,
    OverrideConfig, ScheduleConfig, ScheduleMetadata, SecondaryBand, TaxBracket,
};
