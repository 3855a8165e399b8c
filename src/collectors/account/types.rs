use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the system account database.
///
/// Accounts come back in system enumeration order with duplicates
/// preserved; callers wanting a uid-keyed map build it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub name: String,
    pub uid: u32,
    pub gid: u32,
    pub home_dir: String,
}

impl fmt::Display for AccountRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.name, self.uid, self.gid, self.home_dir)
    }
}
