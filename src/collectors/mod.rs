pub mod account;
pub mod activity;
pub mod interface;
pub mod mount;
pub mod process;
pub mod session;

pub use account::AccountRecord;
pub use activity::TrafficStats;
pub use interface::{AddressFamily, InterfaceRecord};
pub use mount::MountRecord;
pub use process::ProcessRecord;
pub use session::{SessionRecord, SessionType};
