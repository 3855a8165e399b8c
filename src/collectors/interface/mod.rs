mod collector;
mod types;

pub use collector::interfaces;
pub use types::{AddressFamily, InterfaceRecord};
