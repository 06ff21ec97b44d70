//! Integration tests for invoice-validator
//!
//! These tests drive the public API the way the command line front end does.

pub mod config_loading_tests;
pub mod http_client_tests;
pub mod recheck_tests;
