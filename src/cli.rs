//! Command-line interface definitions.
//!
//! Uses `clap` derive macros for declarative argument parsing. Address and
//! port-range validation happens here, before any network activity;
//! concurrency and timeout are clamped to their supported windows rather
//! than rejected, matching the scanner's documented bounds.

use crate::error::CliResult;
use crate::scanner::ScanConfig;
use crate::types::{PortRange, ScanTarget};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// A concurrent TCP connect prober.
#[derive(Parser, Debug)]
#[command(name = "tcprobe")]
#[command(version)]
#[command(about = "Probe a host for open TCP ports", long_about = None)]
pub struct Args {
    /// Target IP address (IPv4 or IPv6 literal)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Port to probe, or inclusive range (e.g. "80" or "1-1000")
    #[arg(short, long, default_value = "1-1000")]
    pub ports: String,

    /// Maximum number of concurrent probes (clamped to 1-500)
    #[arg(short = 'c', long, default_value = "200")]
    pub concurrency: usize,

    /// Connect timeout in seconds (clamped to 0.1-5.0)
    #[arg(short = 't', long, default_value = "0.3", value_parser = parse_timeout_secs)]
    pub timeout: f64,

    /// Write open-port results as JSON to this file
    #[arg(short, long, default_value = "scan_results.json")]
    pub output: PathBuf,

    /// Capture service banners from open ports
    #[arg(short = 'b', long)]
    pub banner: bool,

    /// Verbose diagnostics (debug-level logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Validate the target address. Fails before any scan starts.
    pub fn parse_target(&self) -> CliResult<ScanTarget> {
        Ok(self.target.parse::<ScanTarget>()?)
    }

    /// Validate and parse the port specification.
    pub fn parse_range(&self) -> CliResult<PortRange> {
        Ok(self.ports.parse::<PortRange>()?)
    }

    /// Build the scan configuration, clamping out-of-window values.
    pub fn scan_config(&self) -> ScanConfig {
        let timeout = Duration::from_secs_f64(self.timeout.clamp(
            ScanConfig::MIN_TIMEOUT.as_secs_f64(),
            ScanConfig::MAX_TIMEOUT.as_secs_f64(),
        ));
        let concurrency = self.concurrency.clamp(1, ScanConfig::MAX_CONCURRENCY);

        let config = ScanConfig::new(timeout, concurrency);
        if self.banner {
            config.with_banners()
        } else {
            config
        }
    }
}

/// Parse the timeout argument, rejecting non-finite values up front.
///
/// NaN would slip through `f64::clamp` unchanged and make
/// `Duration::from_secs_f64` panic; bad input must surface as a
/// diagnostic, not a backtrace.
fn parse_timeout_secs(s: &str) -> Result<f64, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("invalid timeout: {s}"))?;
    if !secs.is_finite() {
        return Err(format!("timeout must be a finite number of seconds: {s}"));
    }
    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["tcprobe", "127.0.0.1"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let args = args(&[]);
        assert_eq!(args.ports, "1-1000");
        assert_eq!(args.concurrency, 200);
        assert!(!args.banner);

        let config = args.scan_config();
        assert_eq!(config.connect_timeout, Duration::from_millis(300));
        assert_eq!(config.max_concurrency, 200);
        assert!(!config.collect_banner);
    }

    #[test]
    fn test_concurrency_clamped() {
        let config = args(&["-c", "9000"]).scan_config();
        assert_eq!(config.max_concurrency, ScanConfig::MAX_CONCURRENCY);

        let config = args(&["-c", "0"]).scan_config();
        assert_eq!(config.max_concurrency, 1);
    }

    #[test]
    fn test_timeout_clamped() {
        let config = args(&["-t", "0.01"]).scan_config();
        assert_eq!(config.connect_timeout, ScanConfig::MIN_TIMEOUT);

        let config = args(&["-t", "60"]).scan_config();
        assert_eq!(config.connect_timeout, ScanConfig::MAX_TIMEOUT);
    }

    #[test]
    fn test_non_finite_timeout_rejected() {
        assert!(Args::try_parse_from(["tcprobe", "127.0.0.1", "-t", "NaN"]).is_err());
        assert!(Args::try_parse_from(["tcprobe", "127.0.0.1", "-t", "inf"]).is_err());
        assert!(Args::try_parse_from(["tcprobe", "127.0.0.1", "-t", "infinity"]).is_err());
    }

    #[test]
    fn test_banner_flag() {
        assert!(args(&["--banner"]).scan_config().collect_banner);
    }

    #[test]
    fn test_target_validation() {
        assert!(args(&[]).parse_target().is_ok());

        let mut bad = args(&[]);
        bad.target = "not-an-ip".to_string();
        assert!(bad.parse_target().is_err());
    }

    #[test]
    fn test_range_validation() {
        let mut a = args(&[]);
        a.ports = "22".to_string();
        assert_eq!(a.parse_range().unwrap().len(), 1);

        a.ports = "500-100".to_string();
        assert!(a.parse_range().is_err());

        a.ports = "0-10".to_string();
        assert!(a.parse_range().is_err());
    }
}
