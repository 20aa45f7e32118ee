use super::{
    event::SimEvent,
    observer::Observer,
    state::{CpuCtx, Process, ProcessId, ProcessState, Ticks},
};
use crate::scheduler::{ENQ_ARRIVAL, ENQ_REENQ, Scheduler};

pub struct SchedCore<S: Scheduler> {
    pub ctx: CpuCtx,
    pub scheduler: S,
    observer: Observer,
    // Holder of the CPU during the previous busy tick
    last_ran: Option<ProcessId>,
    preemptions: u64,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(processes: Vec<Process>) -> Self {
        let mut ctx = CpuCtx::new(processes);
        let scheduler = S::init(&mut ctx);
        let observer = Observer::new(S::PREEMPTIVE);
        Self {
            ctx,
            scheduler,
            observer,
            last_ran: None,
            preemptions: 0,
        }
    }

    pub fn wake_process(&mut self, process: ProcessId) -> SimEvent {
        debug_assert_eq!(
            self.ctx.process(process).state,
            ProcessState::New,
            "Process {process} admitted twice"
        );
        self.scheduler.enqueue(&mut self.ctx, process, ENQ_ARRIVAL);
        SimEvent::Admitted { process }
    }

    /// Run the CPU for one tick and advance the clock. Returns the process
    /// that executed, if any.
    pub fn tick(&mut self, events: &mut Vec<SimEvent>) -> Option<ProcessId> {
        // A non-preemptive holder keeps the CPU across ticks; a preemptive
        // one was handed back to the ready queue at the end of the last tick
        if self.ctx.cpu_is_idle() {
            self.try_schedule_cpu(events);
        }

        let ran = self.ctx.current;
        match ran {
            Some(current) => self.run_current(current, events),
            None => events.push(SimEvent::CpuIdle),
        }

        self.observer.observe(&self.ctx);
        self.ctx.advance_time(1);
        ran
    }

    fn try_schedule_cpu(&mut self, events: &mut Vec<SimEvent>) {
        let Some(next) = self.scheduler.dispatch(&mut self.ctx) else {
            return;
        };

        self.ctx.set_running(next);

        if self.last_ran == Some(next) {
            return;
        }
        if let Some(prev) = self.last_ran
            && self.ctx.process(prev).state == ProcessState::Ready
        {
            self.preemptions += 1;
            events.push(SimEvent::Preempted {
                process: prev,
                by: next,
            });
        }
        events.push(SimEvent::Dispatched { process: next });
    }

    fn run_current(&mut self, current: ProcessId, events: &mut Vec<SimEvent>) {
        let advanced = self.ctx.process_mut(current).advance();
        assert!(advanced, "Process {current} scheduled with no remaining burst");
        self.last_ran = Some(current);

        // Everyone still in the ready queue waited through this tick
        let CpuCtx {
            ready, processes, ..
        } = &mut self.ctx;
        for id in ready.ids() {
            processes[id.index()].tick_waiting();
        }

        if self.ctx.process(current).is_exhausted() {
            self.ctx.clear_cpu();
            self.ctx.mark_terminated(current);
            events.push(SimEvent::Terminated {
                process: current,
                completion_time: self.ctx.now + 1,
            });
        } else if S::PREEMPTIVE {
            // Compete again with everyone else next tick
            self.ctx.clear_cpu();
            self.scheduler.enqueue(&mut self.ctx, current, ENQ_REENQ);
        }
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn preemptions(&self) -> u64 {
        self.preemptions
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
