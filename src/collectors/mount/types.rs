use serde::{Deserialize, Serialize};
use std::fmt;

/// A mounted filesystem backed by a real block device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountRecord {
    /// Device path the filesystem is mounted from (e.g. `/dev/disk1s1`).
    pub device: String,
    pub total_bytes: u64,
    pub free_bytes: u64,
    /// `free_bytes / total_bytes`, or 0 for a zero-size filesystem.
    pub fraction_free: f64,
}

impl MountRecord {
    pub fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;
        const TB: u64 = GB * 1024;

        if bytes >= TB {
            format!("{:.2} TB", bytes as f64 / TB as f64)
        } else if bytes >= GB {
            format!("{:.2} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.2} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.2} KB", bytes as f64 / KB as f64)
        } else {
            format!("{} B", bytes)
        }
    }
}

impl fmt::Display for MountRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} free of {} ({:.0}%)",
            self.device,
            MountRecord::format_size(self.free_bytes),
            MountRecord::format_size(self.total_bytes),
            self.fraction_free * 100.0
        )
    }
}
