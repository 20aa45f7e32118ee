use std::fmt;

use crate::core::{ProcessId, Ticks};

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub policy: &'static str,
    pub schedule: Vec<ProcessId>,
    pub waiting_times: Vec<(ProcessId, Ticks)>,
    pub average_waiting_time: f64,
    pub preemptions: u64,
    // Tick at which the last process finished, idle ticks included
    pub makespan: Ticks,
}

/// Collapse consecutive ticks of the same process, e.g. `AABBBBAAAAA` into
/// `[(A, 2), (B, 4), (A, 5)]`.
pub fn run_lengths(schedule: &[ProcessId]) -> Vec<(ProcessId, usize)> {
    let mut runs: Vec<(ProcessId, usize)> = Vec::new();
    for &id in schedule {
        match runs.last_mut() {
            Some((last, count)) if *last == id => *count += 1,
            _ => runs.push((id, 1)),
        }
    }
    runs
}

impl Report {
    pub fn run_lengths(&self) -> Vec<(ProcessId, usize)> {
        run_lengths(&self.schedule)
    }

    /// Schedule in run-length form, e.g. `A2 B4 A5`.
    pub fn schedule_line(&self) -> String {
        self.run_lengths()
            .iter()
            .map(|(id, count)| format!("{id}{count}"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn waits_line(&self) -> String {
        self.waiting_times
            .iter()
            .map(|(id, wait)| format!("{id}={wait}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", self.policy, self.schedule_line())?;
        write!(f, "Average Waiting Time: {:.2}", self.average_waiting_time)
    }
}
