//! Utility modules for the validator
//!
//! - **error**: Error type and helpers shared by every module
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
