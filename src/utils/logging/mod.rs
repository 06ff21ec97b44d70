//! Logging utilities
//!
//! Subscriber setup and the log level / format types used by the config.

pub mod types;
pub mod utils;


pub use types::{LogFormat, LogLevel};
pub use utils::LoggingUtils;
