use rustc_hash::FxHashMap;

use super::state::{CpuCtx, ProcessId, ProcessState};

#[derive(Debug)]
pub struct Observer {
    step: u64,
    preemptive: bool,
    // State of every process as of the previous observation
    last_states: FxHashMap<ProcessId, ProcessState>,
}

impl Observer {
    pub fn new(preemptive: bool) -> Self {
        Self {
            step: 0,
            preemptive,
            last_states: FxHashMap::default(),
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &CpuCtx) {
        self.step += 1;

        let running = ctx
            .processes
            .iter()
            .filter(|p| p.state == ProcessState::Running)
            .count();
        debug_assert!(running <= 1, "{running} processes Running on one CPU");

        if let Some(id) = ctx.current {
            debug_assert_eq!(
                ctx.process(id).state,
                ProcessState::Running,
                "cpu.current process {id} must be Running"
            );
        }

        for process in &ctx.processes {
            let id = process.id;
            debug_assert!(
                process.remaining_time <= process.burst_length,
                "Process {id} has more remaining time than its burst"
            );
            debug_assert_eq!(
                process.state == ProcessState::Ready,
                ctx.ready.contains(id),
                "Process {id} ready-queue membership disagrees with state {:?}",
                process.state
            );
            debug_assert!(
                process.state != ProcessState::Running || ctx.current == Some(id),
                "Running process {id} does not hold the CPU"
            );

            if let Some(&from) = self.last_states.get(&id) {
                debug_assert!(
                    self.is_legal(from, process.state),
                    "Illegal transition for {id}: {from:?} -> {:?}",
                    process.state
                );
            }
            self.last_states.insert(id, process.state);
        }
    }

    // Observations are one tick apart, so a single step may cover several
    // lifecycle transitions (e.g. New -> Terminated for a one-tick burst).
    fn is_legal(&self, from: ProcessState, to: ProcessState) -> bool {
        use ProcessState::*;
        match (from, to) {
            (New, _) => true,
            (_, New) => false,
            (Terminated, to) => to == Terminated,
            (Running, Ready) => self.preemptive,
            (Ready | Running, _) => true,
        }
    }
}
