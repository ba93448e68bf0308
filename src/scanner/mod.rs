//! Scan engine - coordinates concurrent connect probes.
//!
//! Partitions the port range into batches, dispatches them onto a bounded
//! pool of tokio tasks, and aggregates open-port results into a collection
//! created fresh for every invocation.

pub mod batch;
pub mod probe;

use crate::error::{ScanError, ScanResult};
use crate::types::{PortRange, ScanTarget};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub use batch::{batch_ports, derive_batch_size, PortBatch};
pub use probe::ConnectProbe;

/// Status of a probed port.
///
/// Only `Open` ports produce a result; `Closed` and `Filtered` exist for
/// probe-level classification and debug diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// Port accepted a full TCP handshake.
    Open,
    /// Connection was refused or reset.
    Closed,
    /// No response within the timeout (commonly firewalled).
    Filtered,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
            Self::Filtered => write!(f, "filtered"),
        }
    }
}

/// Record of a successful probe. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Target address the probe connected to.
    pub ip: String,
    /// Port number found open.
    pub port: u16,
    /// Always `Open` for emitted records.
    pub status: PortStatus,
    /// Likely service, from the well-known port table ("Unknown" if absent).
    pub service: String,
    /// Captured banner, possibly empty.
    pub banner: String,
    /// When the probe completed, serialized as ISO-8601.
    pub timestamp: DateTime<Utc>,
}

/// When banner capture is attempted on an open port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerPolicy {
    /// Only for ports mapping to a recognized service (source behavior).
    #[default]
    RecognizedOnly,
    /// For every open port.
    Always,
}

/// Immutable configuration for one scan invocation.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Per-port connect timeout. Expected within [100ms, 5s].
    pub connect_timeout: Duration,
    /// Upper bound on concurrently executing probes (1-500).
    pub max_concurrency: usize,
    /// Whether to capture banners at all.
    pub collect_banner: bool,
    /// Which open ports get a banner read when capture is enabled.
    pub banner_policy: BannerPolicy,
}

impl ScanConfig {
    /// Hard upper bound on the worker pool size.
    pub const MAX_CONCURRENCY: usize = 500;
    /// Smallest accepted connect timeout.
    pub const MIN_TIMEOUT: Duration = Duration::from_millis(100);
    /// Largest accepted connect timeout.
    pub const MAX_TIMEOUT: Duration = Duration::from_secs(5);

    /// Create a configuration with the given timeout and concurrency.
    pub fn new(connect_timeout: Duration, max_concurrency: usize) -> Self {
        Self {
            connect_timeout,
            max_concurrency,
            collect_banner: false,
            banner_policy: BannerPolicy::default(),
        }
    }

    /// Enable banner capture.
    pub fn with_banners(mut self) -> Self {
        self.collect_banner = true;
        self
    }

    /// Override the banner capture policy.
    pub fn with_banner_policy(mut self, policy: BannerPolicy) -> Self {
        self.banner_policy = policy;
        self
    }

    /// Reject configurations the pool cannot be built from.
    pub fn validate(&self) -> ScanResult<()> {
        if self.max_concurrency == 0 || self.max_concurrency > Self::MAX_CONCURRENCY {
            return Err(ScanError::InvalidConfig(format!(
                "concurrency must be between 1 and {}, got {}",
                Self::MAX_CONCURRENCY,
                self.max_concurrency
            )));
        }
        if self.connect_timeout.is_zero() {
            return Err(ScanError::InvalidConfig(
                "connect timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), 200)
    }
}

/// Completed scan: the accumulated results plus invocation metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Target address scanned.
    pub target: String,
    /// Port range covered.
    pub range: String,
    /// Number of ports actually probed; less than the range length when
    /// the scan was cancelled early.
    pub ports_scanned: usize,
    /// Wall-clock duration of the whole scan.
    pub duration_ms: u64,
    /// Open-port records, sorted by port number.
    pub results: Vec<ProbeResult>,
}

impl ScanReport {
    /// Number of open ports found.
    pub fn open_count(&self) -> usize {
        self.results.len()
    }

    /// Sorted list of open port numbers.
    pub fn open_ports(&self) -> Vec<u16> {
        self.results.iter().map(|r| r.port).collect()
    }
}

/// Execute a complete scan of `range` against `target`.
pub async fn run_scan(
    target: &ScanTarget,
    range: PortRange,
    config: &ScanConfig,
) -> ScanResult<ScanReport> {
    run_scan_with_cancel(target, range, config, CancellationToken::new()).await
}

/// Execute a scan that an external caller can abort.
///
/// When `cancel` fires, workers stop before their next probe; results
/// collected up to that point are still returned.
pub async fn run_scan_with_cancel(
    target: &ScanTarget,
    range: PortRange,
    config: &ScanConfig,
    cancel: CancellationToken,
) -> ScanResult<ScanReport> {
    config.validate()?;

    let start = Instant::now();
    let batches = batch_ports(range, derive_batch_size(config.max_concurrency));
    debug!(
        batches = batches.len(),
        ports = range.len(),
        concurrency = config.max_concurrency,
        "dispatching scan"
    );

    let probe = Arc::new(ConnectProbe::new(
        target.ip,
        config.connect_timeout,
        config.collect_banner,
        config.banner_policy,
    ));
    // A fresh collection per invocation keeps runs isolated; it is shared
    // only for the duration of this scan.
    let results: Arc<Mutex<Vec<ProbeResult>>> = Arc::new(Mutex::new(Vec::new()));
    let probed = Arc::new(AtomicUsize::new(0));
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency));
    let mut workers = JoinSet::new();

    for ports in batches {
        let probe = Arc::clone(&probe);
        let results = Arc::clone(&results);
        let probed = Arc::clone(&probed);
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel.clone();

        workers.spawn(async move {
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => return,
            };

            for port in ports {
                if cancel.is_cancelled() {
                    return;
                }
                let outcome = probe.probe_port(port).await;
                probed.fetch_add(1, Ordering::Relaxed);
                if let Some(result) = outcome {
                    info!(
                        port = result.port,
                        service = %result.service,
                        banner = %result.banner,
                        "open port"
                    );
                    // Lock held only for the append, never across I/O.
                    results
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .push(result);
                }
            }
        });
    }

    // Barrier: every batch finishes before the collection is read. A
    // worker failure is local to its batch and must not abort siblings.
    while let Some(joined) = workers.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "scan worker failed");
        }
    }

    let mut collected = match Arc::try_unwrap(results) {
        Ok(mutex) => mutex.into_inner().unwrap_or_else(|p| p.into_inner()),
        // Unreachable after the join barrier, but cloning is a safe fallback.
        Err(arc) => arc.lock().unwrap_or_else(|p| p.into_inner()).clone(),
    };
    collected.sort_by_key(|r| r.port);

    Ok(ScanReport {
        target: target.to_string(),
        range: range.to_string(),
        ports_scanned: probed.load(Ordering::Relaxed),
        duration_ms: start.elapsed().as_millis() as u64,
        results: collected,
    })
}
