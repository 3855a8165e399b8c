use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a login-accounting entry.
///
/// Session records cover more than interactive logins: boot markers, clock
/// changes, and dead sessions all show up in the accounting database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Empty,
    RunLevel,
    BootTime,
    NewTime,
    OldTime,
    InitProcess,
    LoginProcess,
    UserProcess,
    DeadProcess,
    Accounting,
    /// Any numeric code outside the known table, including negatives.
    Other,
}

impl SessionType {
    /// Total mapping from the record's numeric type code.
    pub fn from_code(code: i16) -> Self {
        match code {
            0 => SessionType::Empty,
            1 => SessionType::RunLevel,
            2 => SessionType::BootTime,
            3 => SessionType::NewTime,
            4 => SessionType::OldTime,
            5 => SessionType::InitProcess,
            6 => SessionType::LoginProcess,
            7 => SessionType::UserProcess,
            8 => SessionType::DeadProcess,
            9 => SessionType::Accounting,
            _ => SessionType::Other,
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionType::Empty => "EMPTY",
            SessionType::RunLevel => "RUN_LEVEL",
            SessionType::BootTime => "BOOT_TIME",
            SessionType::NewTime => "NEW_TIME",
            SessionType::OldTime => "OLD_TIME",
            SessionType::InitProcess => "INIT_PROCESS",
            SessionType::LoginProcess => "LOGIN_PROCESS",
            SessionType::UserProcess => "USER_PROCESS",
            SessionType::DeadProcess => "DEAD_PROCESS",
            SessionType::Accounting => "ACCOUNTING",
            SessionType::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// One entry from the login-accounting database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub username: String,
    pub session_type: SessionType,
    pub host: String,
    pub line: String,
    pub start_time: DateTime<Utc>,
}

impl fmt::Display for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.username, self.line, self.host, self.session_type, self.start_time
        )
    }
}
