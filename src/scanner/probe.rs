//! Single-port TCP connect probe.
//!
//! Determines openness by completing a full TCP handshake within a bounded
//! time, using the runtime's readiness notification rather than polling a
//! non-blocking socket in a loop. On success, optionally captures an
//! initial banner before the connection is dropped.

use crate::banner::read_banner;
use crate::error::{ScanError, ScanResult};
use crate::scanner::{BannerPolicy, PortStatus, ProbeResult};
use crate::services;
use crate::types::Port;
use chrono::Utc;
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

/// TCP connect prober for a single target host.
///
/// Completes the full TCP handshake, so no elevated privileges are needed.
/// One instance is shared by all workers of a scan; probing is stateless
/// per port.
pub struct ConnectProbe {
    target: IpAddr,
    timeout: Duration,
    collect_banner: bool,
    banner_policy: BannerPolicy,
}

impl ConnectProbe {
    /// Create a new probe.
    ///
    /// `timeout` is expected to be pre-clamped by the caller to the
    /// supported window (100 ms to 5 s).
    pub fn new(
        target: IpAddr,
        timeout: Duration,
        collect_banner: bool,
        banner_policy: BannerPolicy,
    ) -> Self {
        Self {
            target,
            timeout,
            collect_banner,
            banner_policy,
        }
    }

    /// The target this probe connects to.
    pub fn target(&self) -> IpAddr {
        self.target
    }

    /// Probe a single port.
    ///
    /// Returns `Some(ProbeResult)` only when the handshake completes within
    /// the timeout. Refused, reset, unreachable, and timed-out ports all
    /// yield `None`; the distinction is logged at debug level only. The
    /// connection is closed on every path.
    pub async fn probe_port(&self, port: Port) -> Option<ProbeResult> {
        let port_num = port.as_u16();
        let addr = SocketAddr::new(self.target, port_num);

        match self.attempt_connect(addr).await {
            Ok(mut stream) => {
                let service = services::service_label(port_num);
                let banner = if self.should_read_banner(port_num) {
                    read_banner(&mut stream).await
                } else {
                    String::new()
                };

                Some(ProbeResult {
                    ip: self.target.to_string(),
                    port: port_num,
                    status: PortStatus::Open,
                    service: service.to_string(),
                    banner,
                    timestamp: Utc::now(),
                })
            }
            Err(e) => {
                let status = match e {
                    ScanError::ConnectionRefused => PortStatus::Closed,
                    _ => PortStatus::Filtered,
                };
                debug!(port = port_num, %status, error = %e, "port not open");
                None
            }
        }
    }

    /// Attempt the handshake, classifying failures.
    async fn attempt_connect(&self, addr: SocketAddr) -> ScanResult<TcpStream> {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(match e.kind() {
                ErrorKind::ConnectionRefused | ErrorKind::ConnectionReset => {
                    ScanError::ConnectionRefused
                }
                _ => {
                    let msg = e.to_string();
                    if msg.contains("unreachable") {
                        if msg.contains("host") {
                            ScanError::HostUnreachable
                        } else {
                            ScanError::NetworkUnreachable(msg)
                        }
                    } else {
                        ScanError::ConnectionFailed(msg)
                    }
                }
            }),
            Err(_) => Err(ScanError::Timeout),
        }
    }

    fn should_read_banner(&self, port: u16) -> bool {
        if !self.collect_banner {
            return false;
        }
        match self.banner_policy {
            BannerPolicy::RecognizedOnly => services::is_recognized(port),
            BannerPolicy::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::time::Instant;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    fn probe_for(addr: SocketAddr, collect_banner: bool) -> ConnectProbe {
        ConnectProbe::new(
            addr.ip(),
            Duration::from_millis(500),
            collect_banner,
            BannerPolicy::RecognizedOnly,
        )
    }

    #[tokio::test]
    async fn test_open_port_yields_result() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = listener.accept().await;
        });

        let probe = probe_for(addr, false);
        let result = probe
            .probe_port(Port::new(addr.port()).unwrap())
            .await
            .expect("listener port should be open");

        assert_eq!(result.port, addr.port());
        assert_eq!(result.status, PortStatus::Open);
        assert_eq!(result.ip, "127.0.0.1");
        assert_eq!(result.banner, "");
    }

    #[tokio::test]
    async fn test_refused_port_yields_none() {
        // Bind then drop to find a port with nothing listening.
        let closed_port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let probe = ConnectProbe::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            Duration::from_millis(500),
            false,
            BannerPolicy::RecognizedOnly,
        );
        assert!(probe.probe_port(Port::new(closed_port).unwrap()).await.is_none());
    }

    #[tokio::test]
    async fn test_unrecognized_service_skips_banner() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let _ = socket.write_all(b"HELLO\n").await;
        });

        // Ephemeral ports are not in the service table, so with the
        // default policy no banner read happens even though data is sent.
        let probe = probe_for(addr, true);
        let result = probe
            .probe_port(Port::new(addr.port()).unwrap())
            .await
            .unwrap();
        assert_eq!(result.service, services::UNKNOWN_SERVICE);
        assert_eq!(result.banner, "");
    }

    #[test]
    fn test_recognized_only_gate() {
        let probe = ConnectProbe::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            Duration::from_millis(500),
            true,
            BannerPolicy::RecognizedOnly,
        );
        // Table port gets a banner attempt, unlisted port does not.
        assert!(probe.should_read_banner(8080));
        assert!(probe.should_read_banner(22));
        assert!(!probe.should_read_banner(12345));

        // Capture disabled wins over any policy.
        let disabled = ConnectProbe::new(
            IpAddr::V4(Ipv4Addr::LOCALHOST),
            Duration::from_millis(500),
            false,
            BannerPolicy::Always,
        );
        assert!(!disabled.should_read_banner(8080));
    }

    #[tokio::test]
    async fn test_always_policy_reads_banner() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let _ = socket.write_all(b"READY\n").await;
        });

        let probe = ConnectProbe::new(
            addr.ip(),
            Duration::from_millis(500),
            true,
            BannerPolicy::Always,
        );
        let result = probe
            .probe_port(Port::new(addr.port()).unwrap())
            .await
            .unwrap();
        assert_eq!(result.banner, "READY");
    }

    #[tokio::test]
    async fn test_filtered_port_bounded_by_timeout() {
        // Non-routable address: connect attempts black-hole or fail fast.
        let probe = ConnectProbe::new(
            "10.255.255.1".parse().unwrap(),
            Duration::from_millis(100),
            false,
            BannerPolicy::RecognizedOnly,
        );

        let start = Instant::now();
        let result = probe.probe_port(Port::new(81).unwrap()).await;
        assert!(result.is_none());
        assert!(start.elapsed() < Duration::from_secs(3));
    }
}
