mod collector;
mod types;

pub use collector::network_activity;
pub use types::TrafficStats;
