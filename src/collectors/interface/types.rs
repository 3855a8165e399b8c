use serde::{Deserialize, Serialize};
use std::fmt;

/// Socket family of one interface address entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressFamily {
    #[serde(rename = "IPv4")]
    Ipv4,
    #[serde(rename = "IPv6")]
    Ipv6,
    #[serde(rename = "UNIX")]
    Unix,
    #[serde(rename = "LINK")]
    Link,
    #[serde(rename = "OTHER")]
    Other,
}

impl AddressFamily {
    /// Total mapping from the raw socket family code.
    pub fn from_code(code: i32) -> Self {
        match code {
            libc::AF_INET => AddressFamily::Ipv4,
            libc::AF_INET6 => AddressFamily::Ipv6,
            libc::AF_UNIX => AddressFamily::Unix,
            #[cfg(any(target_os = "macos", target_os = "ios"))]
            libc::AF_LINK => AddressFamily::Link,
            _ => AddressFamily::Other,
        }
    }

    /// Whether addresses of this family have a textual IP form.
    pub fn is_ip(self) -> bool {
        matches!(self, AddressFamily::Ipv4 | AddressFamily::Ipv6)
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AddressFamily::Ipv4 => "IPv4",
            AddressFamily::Ipv6 => "IPv6",
            AddressFamily::Unix => "UNIX",
            AddressFamily::Link => "LINK",
            AddressFamily::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// One (interface, address) pair from the kernel's address list.
///
/// An interface with several addresses produces several records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceRecord {
    pub name: String,
    pub family: AddressFamily,
    /// Numeric address text for IP families, empty otherwise.
    pub address: String,
    pub up: bool,
    pub loopback: bool,
    pub running: bool,
}

impl fmt::Display for InterfaceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} up={} {} {}",
            self.name, self.up, self.family, self.address
        )
    }
}
