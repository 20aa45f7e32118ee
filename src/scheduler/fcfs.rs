use super::{CpuCtx, ENQ_REENQ, EnqueueFlags, ProcessId, Scheduler};

pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    const NAME: &'static str = "FCFS";
    const PREEMPTIVE: bool = false;

    fn init(_ctx: &mut CpuCtx) -> Self {
        Self
    }

    fn enqueue(&mut self, ctx: &mut CpuCtx, process: ProcessId, flags: EnqueueFlags) {
        debug_assert!(
            flags & ENQ_REENQ == 0,
            "FCFS never takes {process} off the CPU early"
        );
        let arrival = ctx.process(process).arrival_time;
        ctx.enqueue(process, arrival);
    }
}
