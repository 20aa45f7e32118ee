use average::Estimate;
use log::{debug, trace};

use super::{report::Report, workload::Workload};
use crate::{
    core::{
        driver::SchedCore,
        event::SimEvent,
        state::{Process, ProcessId, ProcessState, Ticks},
    },
    scheduler::Scheduler,
};

pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    // Process ids sorted by arrival; admission walks it with a cursor
    arrival_order: Vec<ProcessId>,
    arrival_cursor: usize,
    trace: Vec<ProcessId>,
    total_execution_time: Ticks,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(workload: Workload) -> Self {
        let total_execution_time = workload.total_execution_time();
        let processes = workload.into_processes();

        let mut arrival_order: Vec<ProcessId> = processes.iter().map(|p| p.id).collect();
        arrival_order.sort_by_key(|&id| (processes[id.index()].arrival_time, id));

        Self {
            core: SchedCore::<S>::new(processes),
            arrival_order,
            arrival_cursor: 0,
            trace: Vec::with_capacity(total_execution_time as usize),
            total_execution_time,
        }
    }

    /// Admit arrivals, run one tick and return what happened during it.
    pub fn step(&mut self) -> Vec<SimEvent> {
        let now = self.core.now();
        let mut events = self.handle_arrivals();

        if let Some(ran) = self.core.tick(&mut events) {
            self.trace.push(ran);
        }

        for event in &events {
            trace!("{} t={} {}", S::NAME, now, event);
        }
        events
    }

    fn handle_arrivals(&mut self) -> Vec<SimEvent> {
        let now = self.core.now();
        let mut events = Vec::new();

        // Contiguous, since arrival_order is sorted
        while let Some(&id) = self.arrival_order.get(self.arrival_cursor) {
            let process = self.core.ctx.process(id);
            if process.arrival_time != now || process.state != ProcessState::New {
                break;
            }
            events.push(self.core.wake_process(id));
            self.arrival_cursor += 1;
        }

        events
    }

    /// Jump the clock to the next arrival when nothing can run before it.
    fn skip_idle(&mut self) {
        let ctx = &self.core.ctx;
        if !ctx.cpu_is_idle() || !ctx.ready.is_empty() {
            return;
        }
        let Some(&next) = self.arrival_order.get(self.arrival_cursor) else {
            return;
        };
        let arrival = ctx.process(next).arrival_time;
        if arrival > ctx.now {
            trace!("{} t={} idle until t={}", S::NAME, ctx.now, arrival);
            let gap = arrival - ctx.now;
            self.core.ctx.advance_time(gap);
        }
    }

    /// Run until every process has terminated. A finished simulation is left
    /// untouched.
    pub fn simulate(&mut self) {
        while !self.all_terminated() {
            self.skip_idle();
            self.step();
        }

        debug_assert_eq!(
            self.trace.len() as Ticks,
            self.total_execution_time,
            "Every busy tick must appear in the trace exactly once"
        );
        debug!(
            "{}: {} processes done at t={} ({} ticks observed, {} preemptions), avg wait {:.2}",
            S::NAME,
            self.processes().len(),
            self.now(),
            self.core.observer().steps(),
            self.core.preemptions(),
            self.average_waiting_time()
        );
    }

    /// Simulate and package the results.
    pub fn run(mut self) -> Report {
        self.simulate();
        self.report()
    }

    pub fn report(&self) -> Report {
        Report {
            policy: S::NAME,
            schedule: self.trace.clone(),
            waiting_times: self.waiting_times().collect(),
            average_waiting_time: self.average_waiting_time(),
            preemptions: self.core.preemptions(),
            makespan: self.now(),
        }
    }

    /// One id per busy tick; empty before `simulate()`.
    pub fn schedule(&self) -> &[ProcessId] {
        &self.trace
    }

    pub fn average_waiting_time(&self) -> f64 {
        let processes = self.processes();
        if processes.is_empty() {
            return 0.0;
        }
        processes
            .iter()
            .map(|p| p.waiting_time as f64)
            .collect::<average::Mean>()
            .estimate()
    }

    pub fn waiting_times(&self) -> impl Iterator<Item = (ProcessId, Ticks)> + '_ {
        self.processes().iter().map(|p| (p.id, p.waiting_time))
    }

    pub fn processes(&self) -> &[Process] {
        &self.core.ctx.processes
    }

    pub fn total_execution_time(&self) -> Ticks {
        self.total_execution_time
    }

    pub fn all_terminated(&self) -> bool {
        self.core.ctx.all_terminated()
    }

    pub fn now(&self) -> Ticks {
        self.core.now()
    }
}
