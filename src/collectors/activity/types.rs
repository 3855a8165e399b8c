use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate network traffic counters.
///
/// Values are cumulative OS counters since boot, not deltas between polls.
/// Byte totals include retransmitted, duplicated, and out-of-order bytes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrafficStats {
    pub packets_sent: f64,
    pub packets_received: f64,
    pub bytes_sent: f64,
    pub bytes_received: f64,
}

impl TrafficStats {
    /// Derive the aggregate totals from the protocol-layer counters.
    ///
    /// TCP counters are authoritative for both packets and bytes. When the
    /// IPv6 layer is present its packet counters are added on top; its
    /// byte counters are not folded in, mirroring what the IPv6 statistics
    /// structure actually exposes.
    pub(crate) fn from_counters(tcp: &TcpCounters, ip6: Option<&Ip6Counters>) -> Self {
        let mut stats = TrafficStats {
            packets_sent: f64::from(tcp.tcps_sndtotal),
            packets_received: f64::from(tcp.tcps_rcvtotal),
            bytes_sent: f64::from(tcp.tcps_sndbyte) + f64::from(tcp.tcps_sndrexmitbyte),
            bytes_received: f64::from(tcp.tcps_rcvbyte)
                + f64::from(tcp.tcps_rcvoobyte)
                + f64::from(tcp.tcps_rcvdupbyte),
        };
        if let Some(ip6) = ip6 {
            stats.packets_sent += ip6.ip6s_localout as f64;
            stats.packets_received += ip6.ip6s_total as f64;
        }
        stats
    }
}

impl fmt::Display for TrafficStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sent {:.0} packets / {:.0} bytes, received {:.0} packets / {:.0} bytes",
            self.packets_sent, self.bytes_sent, self.packets_received, self.bytes_received
        )
    }
}

/// Leading counters of the kernel's TCP statistics structure
/// (netinet/tcp_var.h), through the receive byte counters this collector
/// consumes. The kernel buffer is larger; decoding only requires this
/// prefix to be present.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
#[allow(dead_code)] // layout-bearing fields; only a few counters are consumed
pub(crate) struct TcpCounters {
    pub tcps_connattempt: u32,
    pub tcps_accepts: u32,
    pub tcps_connects: u32,
    pub tcps_drops: u32,
    pub tcps_conndrops: u32,
    pub tcps_closed: u32,
    pub tcps_segstimed: u32,
    pub tcps_rttupdated: u32,
    pub tcps_delack: u32,
    pub tcps_timeoutdrop: u32,
    pub tcps_rexmttimeo: u32,
    pub tcps_persisttimeo: u32,
    pub tcps_keeptimeo: u32,
    pub tcps_keepprobe: u32,
    pub tcps_keepdrops: u32,
    pub tcps_sndtotal: u32,
    pub tcps_sndpack: u32,
    pub tcps_sndbyte: u32,
    pub tcps_sndrexmitpack: u32,
    pub tcps_sndrexmitbyte: u32,
    pub tcps_sndacks: u32,
    pub tcps_sndprobe: u32,
    pub tcps_sndurg: u32,
    pub tcps_sndwinup: u32,
    pub tcps_sndctrl: u32,
    pub tcps_rcvtotal: u32,
    pub tcps_rcvpack: u32,
    pub tcps_rcvbyte: u32,
    pub tcps_rcvbadsum: u32,
    pub tcps_rcvbadoff: u32,
    pub tcps_rcvmemdrop: u32,
    pub tcps_rcvshort: u32,
    pub tcps_rcvduppack: u32,
    pub tcps_rcvdupbyte: u32,
    pub tcps_rcvpartduppack: u32,
    pub tcps_rcvpartdupbyte: u32,
    pub tcps_rcvoopack: u32,
    pub tcps_rcvoobyte: u32,
}

/// Leading counters of the kernel's IPv6 statistics structure
/// (netinet6/ip6_var.h), through the local-output counter.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
#[allow(dead_code)] // layout-bearing fields; only a few counters are consumed
pub(crate) struct Ip6Counters {
    pub ip6s_total: u64,
    pub ip6s_tooshort: u64,
    pub ip6s_toosmall: u64,
    pub ip6s_fragments: u64,
    pub ip6s_fragdropped: u64,
    pub ip6s_fragtimeout: u64,
    pub ip6s_fragoverflow: u64,
    pub ip6s_forward: u64,
    pub ip6s_cantforward: u64,
    pub ip6s_redirectsent: u64,
    pub ip6s_delivered: u64,
    pub ip6s_localout: u64,
}
