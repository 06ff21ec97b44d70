//! Core functionality of the validator
//!
//! This module contains the batch runner, the validation client and the
//! trigger surfaces built on top of them.

pub mod analysis_form;
pub mod batch;
pub mod debounce;
pub mod trigger;
pub mod validation;
