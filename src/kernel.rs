//! Shared access helpers for kernel query interfaces.
//!
//! The sysctl-backed collectors all follow the same probe-then-fetch
//! protocol: a size-only probe (null content pointer) learns the required
//! buffer length, the buffer is allocated at exactly that length, and a
//! second call fills it. Decoding then works on the owned byte buffer with
//! explicit bounds checks instead of raw pointer arithmetic.

use chrono::{DateTime, Utc};
use std::mem;
use std::ptr;

use crate::error::QueryError;

/// Iterate the fixed-size records packed into a kernel buffer.
///
/// Yields exactly `buf.len() / size_of::<T>()` values; a partial trailing
/// record is never read.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(crate) fn records<T: Copy>(buf: &[u8]) -> impl Iterator<Item = T> + '_ {
    buf.chunks_exact(mem::size_of::<T>())
        .map(|raw| unsafe { ptr::read_unaligned(raw.as_ptr().cast::<T>()) })
}

/// Decode a single fixed-layout structure from the front of a kernel buffer.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(crate) fn decode_struct<T: Copy>(buf: &[u8], what: &'static str) -> Result<T, QueryError> {
    records::<T>(buf).next().ok_or(QueryError::ShortBuffer {
        what,
        expected: mem::size_of::<T>(),
        actual: buf.len(),
    })
}

/// Extract a string from a fixed-size, NUL-padded C character array.
///
/// Stops at the first NUL and never reads past the array; a fully-packed
/// field without a terminator yields the whole array.
pub(crate) fn fixed_cstr(field: &[libc::c_char]) -> String {
    let bytes = unsafe { std::slice::from_raw_parts(field.as_ptr().cast::<u8>(), field.len()) };
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Extract a string from a NUL-terminated C string pointer.
#[cfg(unix)]
pub(crate) fn ptr_cstr(ptr: *const libc::c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    let cstr = unsafe { std::ffi::CStr::from_ptr(ptr) };
    String::from_utf8_lossy(cstr.to_bytes()).into_owned()
}

/// Convert a kernel seconds/microseconds pair to a UTC instant.
///
/// Collectors expose kernel timestamps with millisecond precision.
pub(crate) fn timestamp(sec: i64, usec: i64) -> DateTime<Utc> {
    let millis = sec.saturating_mul(1000).saturating_add(usec / 1000);
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Probe-then-fetch for a sysctl identified by numeric mib.
#[cfg(target_os = "macos")]
pub(crate) fn sysctl_buffer(
    mib: &[libc::c_int],
    what: &'static str,
) -> Result<Vec<u8>, QueryError> {
    let mut len: libc::size_t = 0;
    let rc = unsafe {
        libc::sysctl(
            mib.as_ptr().cast_mut(),
            mib.len() as libc::c_uint,
            ptr::null_mut(),
            &mut len,
            ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return Err(QueryError::sysctl(what));
    }
    let mut buf = vec![0u8; len];
    let rc = unsafe {
        libc::sysctl(
            mib.as_ptr().cast_mut(),
            mib.len() as libc::c_uint,
            buf.as_mut_ptr().cast(),
            &mut len,
            ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return Err(QueryError::sysctl(what));
    }
    // the kernel may fill less than the probed length
    buf.truncate(len);
    Ok(buf)
}

/// Fetch a sysctl into a buffer of caller-chosen capacity.
///
/// Used for self-sizing queries where the size comes from a separate
/// maximum-size sysctl rather than a probe of the target itself.
#[cfg(target_os = "macos")]
pub(crate) fn sysctl_into(
    mib: &[libc::c_int],
    capacity: usize,
    what: &'static str,
) -> Result<Vec<u8>, QueryError> {
    let mut len = capacity as libc::size_t;
    let mut buf = vec![0u8; capacity];
    let rc = unsafe {
        libc::sysctl(
            mib.as_ptr().cast_mut(),
            mib.len() as libc::c_uint,
            buf.as_mut_ptr().cast(),
            &mut len,
            ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return Err(QueryError::sysctl(what));
    }
    buf.truncate(len);
    Ok(buf)
}

/// Fetch a single integer-valued sysctl.
#[cfg(target_os = "macos")]
pub(crate) fn sysctl_int(mib: &[libc::c_int], what: &'static str) -> Result<libc::c_int, QueryError> {
    let mut value: libc::c_int = 0;
    let mut len = mem::size_of::<libc::c_int>() as libc::size_t;
    let rc = unsafe {
        libc::sysctl(
            mib.as_ptr().cast_mut(),
            mib.len() as libc::c_uint,
            (&mut value as *mut libc::c_int).cast(),
            &mut len,
            ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return Err(QueryError::sysctl(what));
    }
    Ok(value)
}

/// Probe-then-fetch for a sysctl identified by name.
#[cfg(target_os = "macos")]
pub(crate) fn sysctl_by_name(
    name: &std::ffi::CStr,
    what: &'static str,
) -> Result<Vec<u8>, QueryError> {
    let mut len: libc::size_t = 0;
    let rc = unsafe {
        libc::sysctlbyname(name.as_ptr(), ptr::null_mut(), &mut len, ptr::null_mut(), 0)
    };
    if rc != 0 {
        return Err(QueryError::sysctl(what));
    }
    let mut buf = vec![0u8; len];
    let rc = unsafe {
        libc::sysctlbyname(
            name.as_ptr(),
            buf.as_mut_ptr().cast(),
            &mut len,
            ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return Err(QueryError::sysctl(what));
    }
    buf.truncate(len);
    Ok(buf)
}

/// Size-only probe, reporting the raw OS error on failure.
///
/// Lets callers distinguish "this OID does not exist on this system" from
/// a genuine fetch failure.
#[cfg(target_os = "macos")]
pub(crate) fn sysctl_probe(mib: &[libc::c_int]) -> Result<usize, std::io::Error> {
    let mut len: libc::size_t = 0;
    let rc = unsafe {
        libc::sysctl(
            mib.as_ptr().cast_mut(),
            mib.len() as libc::c_uint,
            ptr::null_mut(),
            &mut len,
            ptr::null_mut(),
            0,
        )
    };
    if rc != 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(len)
}
