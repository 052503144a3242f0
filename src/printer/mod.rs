//! # Printer Module
//!
//! This module provides printer-specific configurations.
//!
//! ## Modules
//!
//! - [`config`]: Printer hardware limits and defaults

pub mod config;

pub use config::PrinterConfig;
