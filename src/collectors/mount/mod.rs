mod collector;
mod types;

pub use collector::mounts;
pub use types::MountRecord;
