//! Utility modules
//!
//! - [`logger`] - tracing setup with optional file output
//! - [`time`] - date-string helpers shared by the draft builder, ledger and
//!   aggregator

pub mod logger;
pub mod time;

pub use logger::{init_logger, init_logger_with_file};
pub use time::{current_month, now_millis, today_string};
