use crate::error::QueryError;

use super::types::AccountRecord;

/// Scoped cursor over the account database (`setpwent`/`getpwent`/
/// `endpwent`); same discipline as the session cursor: serialized across
/// callers, rewound on open, closed on drop.
#[cfg(unix)]
struct AccountCursor<'a> {
    _guard: std::sync::MutexGuard<'a, ()>,
}

#[cfg(unix)]
static ACCOUNT_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(unix)]
impl AccountCursor<'static> {
    fn open() -> Self {
        let guard = ACCOUNT_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        unsafe { libc::setpwent() };
        AccountCursor { _guard: guard }
    }

    fn next(&mut self) -> Option<AccountRecord> {
        let entry = unsafe { libc::getpwent() };
        if entry.is_null() {
            return None;
        }
        let entry = unsafe { &*entry };
        Some(AccountRecord {
            name: crate::kernel::ptr_cstr(entry.pw_name),
            uid: entry.pw_uid,
            gid: entry.pw_gid,
            home_dir: crate::kernel::ptr_cstr(entry.pw_dir),
        })
    }
}

#[cfg(unix)]
impl Drop for AccountCursor<'_> {
    fn drop(&mut self) {
        unsafe { libc::endpwent() };
    }
}

/// Snapshot the system account database in enumeration order.
#[cfg(unix)]
pub fn accounts() -> Result<Vec<AccountRecord>, QueryError> {
    let mut cursor = AccountCursor::open();
    let mut records = Vec::new();
    while let Some(record) = cursor.next() {
        records.push(record);
    }
    log::debug!("collected {} account records", records.len());
    Ok(records)
}

#[cfg(not(unix))]
pub fn accounts() -> Result<Vec<AccountRecord>, QueryError> {
    Err(QueryError::Unsupported)
}
