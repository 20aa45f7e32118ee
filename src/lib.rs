pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{ProcessId, SimEvent};
pub use scheduler::{PolicyKind, Scheduler};
pub use sim::{Report, Sim, Workload, WorkloadError};
