//! Identity lookups for numeric uids.
//!
//! Kept separate from the collectors so callers can swap in their own
//! resolver (see `processes_with_resolver`); the default goes through the
//! system identity database.

/// Sentinel username for uids the identity database cannot resolve.
pub const UNKNOWN_USER: &str = "<unknown>";

/// Resolve a uid to its username.
///
/// Never fails: a missing entry, a lookup error, or an empty name all
/// yield [`UNKNOWN_USER`].
#[cfg(unix)]
pub fn resolve_user(uid: u32) -> String {
    let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
    let mut entry: *mut libc::passwd = std::ptr::null_mut();
    let mut buf = vec![0 as libc::c_char; 1024];
    loop {
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut entry)
        };
        if rc == libc::ERANGE && buf.len() < 64 * 1024 {
            let doubled = buf.len() * 2;
            buf.resize(doubled, 0);
            continue;
        }
        if rc != 0 || entry.is_null() {
            return UNKNOWN_USER.to_string();
        }
        let name = unsafe { std::ffi::CStr::from_ptr(pwd.pw_name) };
        let name = String::from_utf8_lossy(name.to_bytes());
        return if name.is_empty() {
            UNKNOWN_USER.to_string()
        } else {
            name.into_owned()
        };
    }
}

#[cfg(not(unix))]
pub fn resolve_user(_uid: u32) -> String {
    UNKNOWN_USER.to_string()
}
