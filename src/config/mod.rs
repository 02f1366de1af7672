//! Configuration loading and management for the Compensated Hours Engine.
//!
//! This module provides functionality to load engine configuration from YAML
//! files: the business window, entry policy, and administrator accounts.
//!
//! # Example
//!
//! ```no_run
//! use compensated_hours::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Window closes at {}", config.window().end);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AccessConfig, BusinessWindow, DEFAULT_WINDOW_END_MINUTES, DEFAULT_WINDOW_START_MINUTES,
    DuplicateDatePolicy, EngineConfig, EngineFileConfig, PolicyConfig,
};
