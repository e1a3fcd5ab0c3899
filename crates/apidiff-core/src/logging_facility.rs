//! Structured logging facility for apidiff
//!
//! Every surface that runs a comparison logs through this facility:
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Correlation propagation via a run span carrying the `RunId`
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use apidiff_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! # Logging Macros
//!
//! - `log_op_start!(op, ...)` - Log operation start
//! - `log_op_end!(op, duration_ms = ...)` - Log operation end
//! - `log_op_error!(op, err, duration_ms = ...)` - Log operation error

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
