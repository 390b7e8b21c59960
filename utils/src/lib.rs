//! Shared utilities for the split ticket workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
