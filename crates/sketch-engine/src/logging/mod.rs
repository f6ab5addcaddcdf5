//! Logging utilities.
//!
//! Library code only uses the `log` facade. Binaries (and tests that want output)
//! install `env_logger` through [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig};
