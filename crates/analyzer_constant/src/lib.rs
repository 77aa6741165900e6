//! Shared constants for the crypto analyzer.

pub mod app;
pub mod inference;
pub mod limits;
