use crate::error::QueryError;

use super::types::TrafficStats;

#[cfg(target_os = "macos")]
use super::types::{Ip6Counters, TcpCounters};

/// IPV6CTL_STATS from netinet6/in6.h; no libc constant exists for it.
#[cfg(target_os = "macos")]
const IPV6CTL_STATS: libc::c_int = 6;

#[cfg(target_os = "macos")]
const IPV6_STATS_MIB: [libc::c_int; 4] = [
    libc::CTL_NET,
    libc::PF_INET6,
    libc::IPPROTO_IPV6,
    IPV6CTL_STATS,
];

/// Snapshot the aggregate network traffic counters.
///
/// TCP-layer counters are authoritative for the totals; the IP-layer
/// statistics are fetched so an inaccessible network stack fails loudly,
/// but their packet counters are not trusted on this platform. IPv6
/// counters join the packet totals only when the kernel exposes them; an
/// IPv6 stack that is present but unreadable is a hard error, not a
/// silent omission.
#[cfg(target_os = "macos")]
pub fn network_activity() -> Result<TrafficStats, QueryError> {
    let tcp_buf = crate::kernel::sysctl_by_name(c"net.inet.tcp.stats", "tcp stats")?;
    let tcp: TcpCounters = crate::kernel::decode_struct(&tcp_buf, "tcp stats")?;

    crate::kernel::sysctl_by_name(c"net.inet.ip.stats", "ip stats")?;

    let ip6 = match crate::kernel::sysctl_probe(&IPV6_STATS_MIB) {
        Ok(_) => {
            let buf = crate::kernel::sysctl_buffer(&IPV6_STATS_MIB, "ip6 stats")?;
            Some(crate::kernel::decode_struct::<Ip6Counters>(&buf, "ip6 stats")?)
        }
        Err(err) if ipv6_absent(&err) => {
            log::debug!("no IPv6 statistics on this system: {err}");
            None
        }
        Err(err) => {
            return Err(QueryError::Sysctl {
                what: "ip6 stats",
                source: err,
            })
        }
    };

    Ok(TrafficStats::from_counters(&tcp, ip6.as_ref()))
}

#[cfg(not(target_os = "macos"))]
pub fn network_activity() -> Result<TrafficStats, QueryError> {
    Err(QueryError::Unsupported)
}

/// Errors that mean "this kernel has no IPv6 statistics OID" as opposed to
/// a failed read of an existing one.
#[cfg(target_os = "macos")]
fn ipv6_absent(err: &std::io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(libc::ENOENT) | Some(libc::EPROTONOSUPPORT) | Some(libc::EAFNOSUPPORT)
    )
}
