use crate::error::QueryError;
use crate::users;

use super::types::ProcessRecord;

/// Hard cap on the per-process argument buffer, applied on top of the
/// kernel-reported maximum so a misreporting kernel cannot force an
/// unbounded allocation.
#[cfg(target_os = "macos")]
const ARG_BUFFER_CAP: usize = 8192;

/// Snapshot the full kernel process table.
///
/// Usernames are resolved through the system identity database; a failed
/// lookup falls back to the `<unknown>` sentinel rather than erroring.
pub fn processes() -> Result<Vec<ProcessRecord>, QueryError> {
    processes_with_resolver(users::resolve_user)
}

/// Snapshot the process table with a caller-supplied uid resolver.
#[cfg(target_os = "macos")]
pub fn processes_with_resolver<F>(resolve: F) -> Result<Vec<ProcessRecord>, QueryError>
where
    F: Fn(u32) -> String,
{
    let mib = [libc::CTL_KERN, libc::KERN_PROC, libc::KERN_PROC_ALL, 0];
    let buf = crate::kernel::sysctl_buffer(&mib, "process table")?;
    let procs = decode_process_table(&buf, &resolve);
    log::debug!("decoded {} process table entries", procs.len());
    Ok(procs)
}

#[cfg(not(target_os = "macos"))]
pub fn processes_with_resolver<F>(_resolve: F) -> Result<Vec<ProcessRecord>, QueryError>
where
    F: Fn(u32) -> String,
{
    Err(QueryError::Unsupported)
}

/// Decode a fetched process table buffer.
///
/// The table is a packed sequence of fixed-size `kinfo_proc` records, so a
/// successful fetch always decodes completely; only the fetch itself can
/// fail.
#[cfg(target_os = "macos")]
fn decode_process_table(buf: &[u8], resolve: &dyn Fn(u32) -> String) -> Vec<ProcessRecord> {
    crate::kernel::records::<libc::kinfo_proc>(buf)
        .map(|kp| {
            let uid = kp.kp_eproc.e_ucred.cr_uid;
            let started = kp.kp_proc.p_starttime;
            ProcessRecord {
                pid: kp.kp_proc.p_pid,
                parent_pid: kp.kp_eproc.e_ppid,
                uid,
                username: resolve(uid),
                command: crate::kernel::fixed_cstr(&kp.kp_proc.p_comm),
                start_time: crate::kernel::timestamp(started.tv_sec as i64, started.tv_usec as i64),
            }
        })
        .collect()
}

/// Fetch the argument vector of one process.
///
/// The first string is the executable path; a process with no recorded
/// arguments yields an empty vector, not an error. Fails for a pid that
/// does not exist or that the caller lacks privileges to inspect.
#[cfg(target_os = "macos")]
pub fn process_arguments(pid: i32) -> Result<Vec<String>, QueryError> {
    let argmax = crate::kernel::sysctl_int(&[libc::CTL_KERN, libc::KERN_ARGMAX], "argument size limit")
        .unwrap_or(ARG_BUFFER_CAP as libc::c_int);
    let cap = (argmax.max(0) as usize).min(ARG_BUFFER_CAP);
    let mib = [libc::CTL_KERN, libc::KERN_PROCARGS2, pid];
    let buf = crate::kernel::sysctl_into(&mib, cap, "process arguments (invalid pid or no privileges)")?;
    Ok(parse_argument_buffer(&buf))
}

#[cfg(not(target_os = "macos"))]
pub fn process_arguments(_pid: i32) -> Result<Vec<String>, QueryError> {
    Err(QueryError::Unsupported)
}

/// Parse a raw argument buffer.
///
/// Layout: a native-endian argument count, then the executable path and the
/// arguments as NUL-terminated strings packed contiguously, with an
/// unspecified number of padding NULs after the path. Parsing stops when
/// the count is exhausted or the buffer ends, whichever comes first:
/// trailing kernel padding is not reliably NUL-only, so the count alone
/// cannot be trusted, and a lying count must not walk past the fetch.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
fn parse_argument_buffer(buf: &[u8]) -> Vec<String> {
    let count_size = std::mem::size_of::<i32>();
    let Some(head) = buf.get(..count_size) else {
        return Vec::new();
    };
    let argc = i32::from_ne_bytes([head[0], head[1], head[2], head[3]]);
    if argc <= 0 {
        return Vec::new();
    }
    let wanted = argc as usize;

    let mut args = Vec::new();
    let mut start = count_size;
    for at in count_size..buf.len() {
        if args.len() == wanted {
            break;
        }
        if buf[at] == 0 {
            // zero-length fragments are padding between the executable
            // path and the first argument, not real arguments
            if at > start {
                args.push(String::from_utf8_lossy(&buf[start..at]).into_owned());
            }
            start = at + 1;
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(argc: i32, strings: &[&str], padding: usize) -> Vec<u8> {
        let mut buf = argc.to_ne_bytes().to_vec();
        for (index, s) in strings.iter().enumerate() {
            buf.extend_from_slice(s.as_bytes());
            buf.push(0);
            if index == 0 {
                buf.extend(std::iter::repeat(0).take(padding));
            }
        }
        buf
    }

    #[test]
    fn count_bounds_the_parse() {
        // executable path + one argument wanted; the environment block
        // behind them must not leak into the result
        let mut buf = encode(2, &["/bin/ls", "ls", "-l"], 3);
        buf.extend_from_slice(b"HOME=/var/root\0");
        assert_eq!(parse_argument_buffer(&buf), vec!["/bin/ls", "ls"]);
    }

    #[test]
    fn first_string_is_the_executable_path() {
        let buf = encode(3, &["/usr/bin/env", "env", "FOO=1"], 7);
        let args = parse_argument_buffer(&buf);
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], "/usr/bin/env");
    }

    #[test]
    fn buffer_exhaustion_stops_a_lying_count() {
        let buf = encode(16, &["/sbin/launchd", "launchd"], 1);
        assert_eq!(parse_argument_buffer(&buf), vec!["/sbin/launchd", "launchd"]);
    }

    #[test]
    fn padding_nuls_are_not_arguments() {
        let buf = encode(2, &["/bin/echo", "echo"], 12);
        assert_eq!(parse_argument_buffer(&buf), vec!["/bin/echo", "echo"]);
    }

    #[test]
    fn zero_arguments_is_empty_not_an_error() {
        assert!(parse_argument_buffer(&encode(0, &[], 0)).is_empty());
    }

    #[test]
    fn negative_count_is_empty() {
        assert!(parse_argument_buffer(&encode(-3, &["/bin/sh"], 0)).is_empty());
    }

    #[test]
    fn undersized_buffer_is_empty() {
        assert!(parse_argument_buffer(&[0x02]).is_empty());
    }

    #[test]
    fn unterminated_tail_is_ignored() {
        let mut buf = encode(4, &["/bin/cat", "cat"], 0);
        buf.extend_from_slice(b"truncat"); // no terminator
        assert_eq!(parse_argument_buffer(&buf), vec!["/bin/cat", "cat"]);
    }

    #[cfg(target_os = "macos")]
    mod live {
        use super::super::*;

        fn encode_table(entries: &[libc::kinfo_proc]) -> Vec<u8> {
            let mut buf = Vec::new();
            for entry in entries {
                let raw = unsafe {
                    std::slice::from_raw_parts(
                        (entry as *const libc::kinfo_proc).cast::<u8>(),
                        std::mem::size_of::<libc::kinfo_proc>(),
                    )
                };
                buf.extend_from_slice(raw);
            }
            buf
        }

        fn synthetic_proc(pid: i32, ppid: i32, uid: u32, comm: &str, sec: i64) -> libc::kinfo_proc {
            let mut kp: libc::kinfo_proc = unsafe { std::mem::zeroed() };
            kp.kp_proc.p_pid = pid;
            kp.kp_eproc.e_ppid = ppid;
            kp.kp_eproc.e_ucred.cr_uid = uid;
            kp.kp_proc.p_starttime.tv_sec = sec;
            kp.kp_proc.p_starttime.tv_usec = 250_000;
            for (slot, byte) in kp.kp_proc.p_comm.iter_mut().zip(comm.as_bytes()) {
                *slot = *byte as libc::c_char;
            }
            kp
        }

        #[test]
        fn synthetic_table_round_trips() {
            let entries = [
                synthetic_proc(1, 0, 0, "launchd", 1_600_000_000),
                synthetic_proc(501, 1, 501, "zsh", 1_600_000_100),
                synthetic_proc(777, 501, 501, "cargo", 1_600_000_200),
            ];
            let buf = encode_table(&entries);
            let procs = decode_process_table(&buf, &|uid| format!("user{uid}"));

            assert_eq!(procs.len(), 3);
            assert_eq!(procs[0].pid, 1);
            assert_eq!(procs[0].command, "launchd");
            assert_eq!(procs[1].parent_pid, 1);
            assert_eq!(procs[1].username, "user501");
            assert_eq!(procs[2].start_time.timestamp_millis(), 1_600_000_200_250);
        }

        #[test]
        fn live_table_has_unique_pids_and_usernames() {
            let procs = processes().expect("process table");
            assert!(!procs.is_empty());
            let mut pids: Vec<i32> = procs.iter().map(|p| p.pid).collect();
            pids.sort_unstable();
            pids.dedup();
            assert_eq!(pids.len(), procs.len(), "pids must be unique per snapshot");
            assert!(procs.iter().all(|p| !p.username.is_empty()));
        }

        #[test]
        fn own_arguments_start_with_the_executable() {
            let args = process_arguments(std::process::id() as i32).expect("own args");
            assert!(!args.is_empty());
            assert!(args[0].contains("process") || args[0].contains('/'));
        }
    }
}
