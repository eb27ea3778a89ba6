//! Logging utilities for output and progress tracking

pub mod console;
pub mod log;
pub mod progress;

pub use log::{log_operation_complete, log_operation_start, log_skipped, log_warning};
pub use progress::{create_main_progress_bar, create_spinner, finish_progress_bar};
