//! Compensated Hours Engine
//!
//! This crate converts attendance entries into compensated hours (time worked
//! before the business window opens or after it closes, plus manually declared
//! hours), validates entries, and aggregates progress toward each employee's
//! target.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
