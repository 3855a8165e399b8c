mod collector;
mod types;

pub use collector::{process_arguments, processes, processes_with_resolver};
pub use types::ProcessRecord;
