//! # tcprobe - A Concurrent TCP Connectivity Prober
//!
//! tcprobe determines which ports on a host accept a TCP connection within
//! a bounded time, identifies likely services by port number, and
//! optionally captures initial banners.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use tcprobe::scanner::{run_scan, ScanConfig};
//! use tcprobe::types::{PortRange, ScanTarget};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = ScanTarget::parse("127.0.0.1").unwrap();
//!     let range: PortRange = "1-1024".parse().unwrap();
//!     let config = ScanConfig::new(Duration::from_millis(300), 200);
//!
//!     let report = run_scan(&target, range, &config).await.unwrap();
//!     for result in &report.results {
//!         println!("{}: {} ({})", result.port, result.status, result.service);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, ranges, and targets
//! - [`scanner`] - Batching, connect probes, and the scan coordinator
//! - [`banner`] - Best-effort banner capture
//! - [`services`] - Well-known port to service mapping
//! - [`sink`] - Result persistence behind the `ResultSink` trait
//! - [`error`] - Error types
//! - [`output`] - Terminal formatting

pub mod banner;
pub mod cli;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod sink;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ScanError, SinkError};
pub use scanner::{
    run_scan, run_scan_with_cancel, BannerPolicy, PortStatus, ProbeResult, ScanConfig, ScanReport,
};
pub use sink::{JsonFileSink, ResultSink};
pub use types::{Port, PortRange, ScanTarget};
