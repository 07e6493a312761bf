//! Output formatting for subnet plans.
//!
//! This module handles rendering computed plans:
//! - [`csv`] - CSV output formatting
//! - [`terminal`] - Terminal table with colors
//! - [`json`] - JSON report

pub mod csv;
pub mod json;
pub mod terminal;

pub use csv::render_csv;
pub use json::render_json;
pub use terminal::{format_field, render_table};
