use std::fmt;

use crate::core::{ProcessId, Ticks};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Admitted {
        process: ProcessId,
    },
    Dispatched {
        process: ProcessId,
    },
    // Only produced by preemptive schedulers
    Preempted {
        process: ProcessId,
        by: ProcessId,
    },
    Terminated {
        process: ProcessId,
        completion_time: Ticks,
    },
    // CPU idle even after dispatch
    CpuIdle,
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::Admitted { process } => write!(f, "{process} admitted"),
            SimEvent::Dispatched { process } => write!(f, "{process} dispatched"),
            SimEvent::Preempted { process, by } => write!(f, "{process} preempted by {by}"),
            SimEvent::Terminated {
                process,
                completion_time,
            } => write!(f, "{process} terminated at {completion_time}"),
            SimEvent::CpuIdle => write!(f, "cpu idle"),
        }
    }
}
