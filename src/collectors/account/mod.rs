mod collector;
mod types;

pub use collector::accounts;
pub use types::AccountRecord;
