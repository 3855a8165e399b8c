use crate::error::QueryError;

use super::types::{SessionRecord, SessionType};

/// The login-accounting database exposes a single process-global cursor
/// (`setutxent`/`getutxent`/`endutxent`). The guard serializes concurrent
/// callers and rewinds on open; `Drop` closes the cursor even if an
/// enumeration bails out early.
#[cfg(unix)]
struct SessionCursor<'a> {
    _guard: std::sync::MutexGuard<'a, ()>,
}

#[cfg(unix)]
static SESSION_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(unix)]
impl SessionCursor<'static> {
    fn open() -> Self {
        let guard = SESSION_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe { libc::setutxent() };
        SessionCursor { _guard: guard }
    }

    fn next(&mut self) -> Option<SessionRecord> {
        loop {
            let entry = unsafe { libc::getutxent() };
            if entry.is_null() {
                return None;
            }
            let entry = unsafe { &*entry };
            let record = session_record(
                crate::kernel::fixed_cstr(&entry.ut_user),
                entry.ut_type,
                crate::kernel::fixed_cstr(&entry.ut_host),
                crate::kernel::fixed_cstr(&entry.ut_line),
                entry.ut_tv.tv_sec as i64,
                entry.ut_tv.tv_usec as i64,
            );
            if let Some(record) = record {
                return Some(record);
            }
        }
    }
}

#[cfg(unix)]
impl Drop for SessionCursor<'_> {
    fn drop(&mut self) {
        unsafe { libc::endutxent() };
    }
}

/// Snapshot the login-accounting database.
///
/// Entries without a username are slot placeholders, not sessions, and are
/// dropped.
#[cfg(unix)]
pub fn sessions() -> Result<Vec<SessionRecord>, QueryError> {
    let mut cursor = SessionCursor::open();
    let mut records = Vec::new();
    while let Some(record) = cursor.next() {
        records.push(record);
    }
    log::debug!("collected {} session records", records.len());
    Ok(records)
}

#[cfg(not(unix))]
pub fn sessions() -> Result<Vec<SessionRecord>, QueryError> {
    Err(QueryError::Unsupported)
}

/// Distinct usernames with at least one session record, in first-seen order.
pub fn active_usernames() -> Result<Vec<String>, QueryError> {
    Ok(distinct_usernames(&sessions()?))
}

/// Build a record from one accounting entry, dropping placeholders.
fn session_record(
    username: String,
    type_code: i16,
    host: String,
    line: String,
    sec: i64,
    usec: i64,
) -> Option<SessionRecord> {
    if username.is_empty() {
        return None;
    }
    Some(SessionRecord {
        username,
        session_type: SessionType::from_code(type_code),
        host,
        line,
        start_time: crate::kernel::timestamp(sec, usec),
    })
}

fn distinct_usernames(records: &[SessionRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for record in records {
        if !names.iter().any(|name| name == &record.username) {
            names.push(record.username.clone());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(username: &str, code: i16) -> Option<SessionRecord> {
        session_record(
            username.to_string(),
            code,
            "remote.example".to_string(),
            "ttys001".to_string(),
            1_700_000_000,
            500_000,
        )
    }

    #[test]
    fn placeholder_entries_are_dropped() {
        assert!(record("", 7).is_none());
    }

    #[test]
    fn real_entries_keep_their_fields() {
        let session = record("mel", 7).expect("session");
        assert_eq!(session.username, "mel");
        assert_eq!(session.session_type, SessionType::UserProcess);
        assert_eq!(session.line, "ttys001");
        assert_eq!(session.start_time.timestamp_millis(), 1_700_000_000_500);
    }

    #[test]
    fn unmapped_type_code_becomes_other() {
        assert_eq!(record("mel", 99).expect("session").session_type, SessionType::Other);
    }

    #[test]
    fn usernames_deduplicate_in_first_seen_order() {
        let records: Vec<SessionRecord> = [("maya", 7), ("reboot", 2), ("maya", 8), ("root", 7)]
            .iter()
            .filter_map(|(name, code)| record(name, *code))
            .collect();
        assert_eq!(distinct_usernames(&records), vec!["maya", "reboot", "root"]);
    }

    #[cfg(unix)]
    #[test]
    fn live_sessions_never_include_empty_usernames() {
        let records = sessions().expect("session table");
        assert!(records.iter().all(|s| !s.username.is_empty()));
    }
}
