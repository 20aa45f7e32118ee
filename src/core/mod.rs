pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SimEvent;
pub use state::{CpuCtx, MAX_PROCESSES, Process, ProcessId, ProcessState, ReadyQueue, Ticks};
