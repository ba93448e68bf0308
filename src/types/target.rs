//! Scan target types and address validation.
//!
//! A target is always a numeric IP literal. Validation uses the standard
//! library's address parser: no DNS lookups, no network side effects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// Error type for target parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TargetError {
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),
}

/// Check whether a string is a well-formed IPv4 or IPv6 literal.
///
/// Purely syntactic; malformed input yields `false`, never an error.
pub fn is_valid_address(address: &str) -> bool {
    address.parse::<IpAddr>().is_ok()
}

/// The host a scan is directed at, fixed for the duration of the scan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanTarget {
    /// The original input string.
    pub original: String,
    /// The parsed IP address.
    pub ip: IpAddr,
}

impl ScanTarget {
    /// Parse a target from an IP literal.
    pub fn parse(s: &str) -> Result<Self, TargetError> {
        let s = s.trim();
        let ip: IpAddr = s
            .parse()
            .map_err(|_| TargetError::InvalidAddress(s.to_string()))?;
        Ok(Self {
            original: s.to_string(),
            ip,
        })
    }

    /// Check if this target is IPv6.
    pub fn is_ipv6(&self) -> bool {
        self.ip.is_ipv6()
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ip)
    }
}

impl FromStr for ScanTarget {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
