//! Per-run logging with file and host-callback output.

mod run_logger;
mod types;

pub use run_logger::RunLogger;
pub use types::{HostLogCallback, LogConfig, LogLevel, MessagePrefix};
