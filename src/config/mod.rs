//! Configuration loading and management for the payroll engine.
//!
//! This module loads engine metadata and date-versioned payroll rules from
//! YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll").unwrap();
//! println!("Loaded engine: {}", config.engine().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineMetadata, PayrollConfig, PayrollRules};
