//! Point-in-time snapshots of kernel state on Darwin.
//!
//! Each collector issues a single read-only kernel query and returns an
//! owned, immutable record set: the process table, per-process argument
//! vectors, device-backed mounts, login sessions, system accounts,
//! interface addresses, and aggregate traffic counters. Collectors share
//! no state and are independently safe to call from concurrent threads.
//!
//! Kernel buffers are sized with a probe-then-fetch protocol and decoded
//! with bounds-checked parsing; classification of raw numeric codes
//! (session types, address families) is total, with a defined fallback for
//! anything unrecognized.

pub mod collectors;
pub mod error;
mod kernel;
pub mod users;

pub use collectors::account::{accounts, AccountRecord};
pub use collectors::activity::{network_activity, TrafficStats};
pub use collectors::interface::{interfaces, AddressFamily, InterfaceRecord};
pub use collectors::mount::{mounts, MountRecord};
pub use collectors::process::{
    process_arguments, processes, processes_with_resolver, ProcessRecord,
};
pub use collectors::session::{active_usernames, sessions, SessionRecord, SessionType};
pub use error::{EnumerationError, QueryError};
