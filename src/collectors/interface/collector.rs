use crate::error::EnumerationError;

use super::types::{AddressFamily, InterfaceRecord};

/// NI_MAXHOST; large enough for any numeric IPv6 form with scope id.
#[cfg(unix)]
const HOST_BUFFER: usize = 1025;

/// Owns the kernel-allocated interface address list; freed on drop so the
/// list is released whether the walk finishes or bails.
#[cfg(unix)]
struct AddrList(*mut libc::ifaddrs);

#[cfg(unix)]
impl Drop for AddrList {
    fn drop(&mut self) {
        unsafe { libc::freeifaddrs(self.0) };
    }
}

/// Snapshot the interface address list, one record per (interface, address).
///
/// Entries without an address are skipped; IP addresses are rendered
/// numerically only, never through a reverse lookup, so nothing here
/// blocks on the network.
#[cfg(unix)]
pub fn interfaces() -> Result<Vec<InterfaceRecord>, EnumerationError> {
    let mut head: *mut libc::ifaddrs = std::ptr::null_mut();
    if unsafe { libc::getifaddrs(&mut head) } != 0 {
        return Err(EnumerationError::Ifaddrs(std::io::Error::last_os_error()));
    }
    let list = AddrList(head);

    let mut records = Vec::new();
    let mut cursor = list.0;
    while !cursor.is_null() {
        let entry = unsafe { &*cursor };
        cursor = entry.ifa_next;

        if entry.ifa_addr.is_null() {
            continue;
        }
        let family = AddressFamily::from_code(unsafe { (*entry.ifa_addr).sa_family } as i32);
        let address = if family.is_ip() {
            numeric_host(entry.ifa_addr, family)
        } else {
            String::new()
        };
        records.push(InterfaceRecord {
            name: crate::kernel::ptr_cstr(entry.ifa_name),
            family,
            address,
            up: entry.ifa_flags & libc::IFF_UP as libc::c_uint != 0,
            loopback: entry.ifa_flags & libc::IFF_LOOPBACK as libc::c_uint != 0,
            running: entry.ifa_flags & libc::IFF_RUNNING as libc::c_uint != 0,
        });
    }
    log::debug!("collected {} interface address records", records.len());
    Ok(records)
}

#[cfg(not(unix))]
pub fn interfaces() -> Result<Vec<InterfaceRecord>, EnumerationError> {
    Err(EnumerationError::Unsupported)
}

/// Render an IP socket address numerically (`NI_NUMERICHOST`).
///
/// A failed render degrades to an empty address rather than an error; the
/// record is still worth returning for its name and flags.
#[cfg(unix)]
fn numeric_host(addr: *mut libc::sockaddr, family: AddressFamily) -> String {
    let len = match family {
        AddressFamily::Ipv4 => std::mem::size_of::<libc::sockaddr_in>(),
        AddressFamily::Ipv6 => std::mem::size_of::<libc::sockaddr_in6>(),
        _ => return String::new(),
    } as libc::socklen_t;
    let mut host = [0 as libc::c_char; HOST_BUFFER];
    let rc = unsafe {
        libc::getnameinfo(
            addr,
            len,
            host.as_mut_ptr(),
            host.len() as libc::socklen_t,
            std::ptr::null_mut(),
            0,
            libc::NI_NUMERICHOST,
        )
    };
    if rc != 0 {
        log::warn!("could not render a numeric {family} address");
        return String::new();
    }
    crate::kernel::fixed_cstr(&host)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn live_list_classifies_and_flags() {
        let records = interfaces().expect("interface address list");
        // every machine has at least a loopback device
        assert!(!records.is_empty());
        assert!(records.iter().all(|r| !r.name.is_empty()));
        assert!(records.iter().any(|r| r.loopback));
        // non-IP families never carry an address
        assert!(records
            .iter()
            .filter(|r| !r.family.is_ip())
            .all(|r| r.address.is_empty()));
    }

    #[test]
    fn loopback_ipv4_renders_numerically() {
        let records = interfaces().expect("interface address list");
        if let Some(lo) = records
            .iter()
            .find(|r| r.loopback && r.family == AddressFamily::Ipv4)
        {
            assert_eq!(lo.address, "127.0.0.1");
        }
    }
}
