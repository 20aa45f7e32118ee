use super::{CpuCtx, EnqueueFlags, ProcessId, Scheduler};

pub struct SrtfScheduler;

impl Scheduler for SrtfScheduler {
    const NAME: &'static str = "SRTF";
    const PREEMPTIVE: bool = true;

    fn init(_ctx: &mut CpuCtx) -> Self {
        Self
    }

    fn enqueue(&mut self, ctx: &mut CpuCtx, process: ProcessId, _flags: EnqueueFlags) {
        // Keyed on what is left, not the original burst
        let remaining = ctx.process(process).remaining_time;
        ctx.enqueue(process, remaining);
    }
}
