//! Banner capture for established TCP connections.
//!
//! Performs a single passive read of whatever a service sends immediately
//! after accepting a connection. Best effort: any failure degrades to an
//! empty banner, never an error.

use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Maximum bytes to read for a banner.
const MAX_BANNER_SIZE: usize = 1024;

/// Read timeout, independent of the connect timeout.
const BANNER_TIMEOUT: Duration = Duration::from_secs(1);

/// Read an initial banner from an open connection.
///
/// One bounded read under a 1-second deadline. Bytes are decoded as UTF-8
/// tolerantly (invalid sequences replaced) and surrounding whitespace is
/// trimmed. Returns an empty string if the service sends nothing in time
/// or the read fails.
pub async fn read_banner(stream: &mut TcpStream) -> String {
    let mut buffer = vec![0u8; MAX_BANNER_SIZE];

    match timeout(BANNER_TIMEOUT, stream.read(&mut buffer)).await {
        Ok(Ok(n)) if n > 0 => String::from_utf8_lossy(&buffer[..n]).trim().to_string(),
        _ => String::new(),
    }
}
