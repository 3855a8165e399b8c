use crate::error::QueryError;

use super::types::MountRecord;

/// Mount sources below this prefix are real block devices; anything else
/// (proc-like, synthetic, network pseudo-mounts) is excluded from the
/// snapshot by policy.
const DEVICE_PREFIX: &str = "/dev/";

/// Snapshot the currently mounted device-backed filesystems.
///
/// Uses non-blocking enumeration: possibly-stale cached statistics are
/// preferred over hanging on an unresponsive remote mount. An empty mount
/// table yields an empty vector.
#[cfg(target_os = "macos")]
pub fn mounts() -> Result<Vec<MountRecord>, QueryError> {
    let mut list: *mut libc::statfs = std::ptr::null_mut();
    let count = unsafe { libc::getmntinfo(&mut list, libc::MNT_NOWAIT) };
    if count <= 0 || list.is_null() {
        return Ok(Vec::new());
    }
    let entries = unsafe { std::slice::from_raw_parts(list, count as usize) };
    let records: Vec<MountRecord> = entries
        .iter()
        .filter_map(|fs| {
            device_mount(
                &crate::kernel::fixed_cstr(&fs.f_mntfromname),
                fs.f_blocks,
                u64::from(fs.f_bsize),
                fs.f_bfree,
            )
        })
        .collect();
    log::debug!(
        "kept {} of {} mounts after device filtering",
        records.len(),
        entries.len()
    );
    Ok(records)
}

#[cfg(not(target_os = "macos"))]
pub fn mounts() -> Result<Vec<MountRecord>, QueryError> {
    Err(QueryError::Unsupported)
}

/// Build a record from one mount table entry, applying the device-path
/// filter and the capacity math.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn device_mount(
    source: &str,
    blocks: u64,
    block_size: u64,
    free_blocks: u64,
) -> Option<MountRecord> {
    if !source.starts_with(DEVICE_PREFIX) {
        return None;
    }
    let total_bytes = blocks.saturating_mul(block_size);
    let free_bytes = free_blocks.saturating_mul(block_size);
    let fraction_free = if total_bytes == 0 {
        0.0
    } else {
        free_bytes as f64 / total_bytes as f64
    };
    Some(MountRecord {
        device: source.to_string(),
        total_bytes,
        free_bytes,
        fraction_free,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_mounts_are_excluded() {
        let table = [
            ("/dev/disk1s1", 1_000_000u64, 4096u64, 250_000u64),
            ("devfs", 100, 512, 0),
            ("/dev/disk1s4", 500_000, 4096, 100_000),
        ];
        let records: Vec<MountRecord> = table
            .iter()
            .filter_map(|(src, blocks, bsize, bfree)| device_mount(src, *blocks, *bsize, *bfree))
            .collect();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|m| m.device.starts_with("/dev/")));
    }

    #[test]
    fn prefix_must_match_from_the_start() {
        // a source merely containing the prefix is still virtual
        assert!(device_mount("map auto_home /dev/x", 10, 512, 5).is_none());
    }

    #[test]
    fn capacity_math_uses_block_size() {
        let mount = device_mount("/dev/disk2s1", 1000, 4096, 400).expect("device mount");
        assert_eq!(mount.total_bytes, 4_096_000);
        assert_eq!(mount.free_bytes, 1_638_400);
        assert!((mount.fraction_free - 0.4).abs() < 1e-9);
    }

    #[test]
    fn zero_size_filesystem_reports_zero_fraction() {
        let mount = device_mount("/dev/empty", 0, 4096, 0).expect("device mount");
        assert_eq!(mount.total_bytes, 0);
        assert_eq!(mount.fraction_free, 0.0);
    }

    #[test]
    fn display_formats_sizes() {
        let mount = device_mount("/dev/disk1s1", 1 << 20, 1024, 1 << 19).expect("device mount");
        let line = mount.to_string();
        assert!(line.contains("/dev/disk1s1"));
        assert!(line.contains("50%"));
    }

    #[cfg(target_os = "macos")]
    #[test]
    fn live_mounts_are_all_device_backed() {
        let mounts = mounts().expect("mount table");
        assert!(mounts.iter().all(|m| m.device.starts_with("/dev/")));
    }
}
