use super::{CpuCtx, ENQ_REENQ, EnqueueFlags, ProcessId, Scheduler};

/// Shortest job first. A dispatched process keeps the CPU until its burst
/// is done, however short the jobs arriving behind it.
pub struct SjfScheduler;

impl Scheduler for SjfScheduler {
    const NAME: &'static str = "SJF";
    const PREEMPTIVE: bool = false;

    fn init(_ctx: &mut CpuCtx) -> Self {
        Self
    }

    fn enqueue(&mut self, ctx: &mut CpuCtx, process: ProcessId, flags: EnqueueFlags) {
        debug_assert!(
            flags & ENQ_REENQ == 0,
            "SJF never takes {process} off the CPU early"
        );
        let remaining = ctx.process(process).remaining_time;
        ctx.enqueue(process, remaining);
    }
}
