//! Error types for tcprobe.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-port transport
//! failures are classified but never fatal; only input validation and
//! pool construction errors abort an invocation.

use thiserror::Error;

/// Main error type for scanning operations.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("connection timed out")]
    Timeout,

    #[error("connection refused")]
    ConnectionRefused,

    #[error("host unreachable")]
    HostUnreachable,

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors surfaced by result sinks.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write results: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Top-level error type for the command-line interface.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid target: {0}")]
    Target(#[from] crate::types::TargetError),

    #[error("invalid port specification: {0}")]
    Ports(#[from] crate::types::PortError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
