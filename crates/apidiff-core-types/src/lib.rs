//! Core types shared across apidiff facilities
//!
//! This crate provides foundational types used by the error, logging and
//! CLI layers:
//!
//! - **Correlation types**: RunId identifying one comparison run
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::RunId;
