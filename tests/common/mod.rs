//! Common test utilities for invoice-validator
//!
//! # Usage
//!
//! ```rust
//! use crate::common::fixtures::{RecordingPresenter, ScriptedClient, StaticListView};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let client = ScriptedClient::new().fail("INV-002", "PDF raw text not found");
//!     // ...
//! }
//! ```

pub mod fixtures;

pub use fixtures::{RecordingPresenter, ResultFactory, ScriptedClient, StaticListView};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
