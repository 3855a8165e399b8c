use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the kernel process table.
///
/// `command` is the kernel's short command name, not the full argument
/// vector; fetch the latter per pid with `process_arguments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub pid: i32,
    pub parent_pid: i32,
    pub uid: u32,
    pub username: String,
    pub command: String,
    pub start_time: DateTime<Utc>,
}

impl fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (since {}) {}",
            self.pid,
            self.parent_pid,
            self.username,
            self.start_time.format("%Y-%m-%d %H:%M:%S"),
            self.command
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_survives_a_serde_round_trip() {
        let record = ProcessRecord {
            pid: 42,
            parent_pid: 1,
            uid: 501,
            username: "maya".to_string(),
            command: "cargo".to_string(),
            start_time: DateTime::from_timestamp_millis(1_700_000_000_123).unwrap(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: ProcessRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
