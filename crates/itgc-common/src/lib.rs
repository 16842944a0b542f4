//! Shared utilities for the ITGC review crates.
//!
//! This crate provides common helpers used across the workspace,
//! mainly Polars `AnyValue` conversions for cell-wise processing.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use polars::{
    any_to_f64, any_to_i64, any_to_string, any_to_string_non_empty, cell_string, format_numeric,
    parse_f64, parse_i64,
};
