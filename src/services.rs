//! Service identification based on well-known port numbers.
//!
//! Provides the static mapping from port numbers to likely service names
//! used to label open ports and to decide whether a banner read is worth
//! attempting.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Service name reported for ports absent from the table.
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Static map of well-known ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(21, "FTP");
    m.insert(22, "SSH");
    m.insert(23, "Telnet");
    m.insert(25, "SMTP");
    m.insert(53, "DNS");
    m.insert(80, "HTTP");
    m.insert(110, "POP3");
    m.insert(143, "IMAP");
    m.insert(443, "HTTPS");
    m.insert(445, "SMB");
    m.insert(993, "IMAPS");
    m.insert(995, "POP3S");
    m.insert(1433, "MSSQL");
    m.insert(1521, "Oracle");
    m.insert(3306, "MySQL");
    m.insert(3389, "RDP");
    m.insert(5432, "PostgreSQL");
    m.insert(5900, "VNC");
    m.insert(6379, "Redis");
    m.insert(8080, "HTTP-Alt");
    m.insert(8443, "HTTPS-Alt");
    m.insert(11211, "Memcached");
    m.insert(27017, "MongoDB");

    m
});

/// Look up the probable service name for a given port.
///
/// Returns `None` if the port is not in the well-known services table.
pub fn service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Get the service label for a port, falling back to [`UNKNOWN_SERVICE`].
pub fn service_label(port: u16) -> &'static str {
    service_name(port).unwrap_or(UNKNOWN_SERVICE)
}

/// Whether a port maps to a recognized service.
pub fn is_recognized(port: u16) -> bool {
    PORT_SERVICES.contains_key(&port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_ports() {
        assert_eq!(service_name(22), Some("SSH"));
        assert_eq!(service_name(80), Some("HTTP"));
        assert_eq!(service_name(443), Some("HTTPS"));
        assert_eq!(service_name(3306), Some("MySQL"));
        assert_eq!(service_name(11211), Some("Memcached"));
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(service_name(12345), None);
        assert_eq!(service_label(12345), UNKNOWN_SERVICE);
        assert!(!is_recognized(12345));
    }

    #[test]
    fn test_recognized() {
        assert!(is_recognized(6379));
        assert!(is_recognized(27017));
    }
}
