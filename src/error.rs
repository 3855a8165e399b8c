use std::io;
use thiserror::Error;

/// A kernel data fetch failed.
///
/// Covers permission problems, invalid targets (e.g. a pid that no longer
/// exists), and transient kernel errors alike; the message names the queried
/// resource so callers can tell failure causes apart without extra codes.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A sysctl probe or fetch reported failure.
    #[error("sysctl failed: {what}: {source}")]
    Sysctl {
        what: &'static str,
        source: io::Error,
    },

    /// The kernel returned fewer bytes than the expected record layout.
    #[error("short {what} buffer: expected at least {expected} bytes, got {actual}")]
    ShortBuffer {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// The running platform does not expose this kernel interface.
    #[error("snapshot collection is not supported on this platform")]
    Unsupported,
}

impl QueryError {
    /// Capture the current errno for a failed sysctl against `what`.
    #[cfg(target_os = "macos")]
    pub(crate) fn sysctl(what: &'static str) -> Self {
        QueryError::Sysctl {
            what,
            source: io::Error::last_os_error(),
        }
    }
}

/// A list-based kernel enumeration failed to initialize.
#[derive(Debug, Error)]
pub enum EnumerationError {
    /// The interface address list could not be retrieved.
    #[error("getifaddrs failed: {0}")]
    Ifaddrs(io::Error),

    /// The running platform does not expose this kernel interface.
    #[error("snapshot collection is not supported on this platform")]
    Unsupported,
}
