pub mod fcfs;
pub mod sjf;
pub mod srtf;

use crate::{
    core::state::{CpuCtx, ProcessId},
    sim::{Report, Sim, Workload},
};
pub use fcfs::FcfsScheduler;
pub use sjf::SjfScheduler;
pub use srtf::SrtfScheduler;

pub type EnqueueFlags = u64;

// Process entered the ready queue for the first time
pub const ENQ_ARRIVAL: EnqueueFlags = 1 << 0;
// Process was taken off the CPU before finishing its burst
pub const ENQ_REENQ: EnqueueFlags = 1 << 1;

/// A ready-queue ordering plus the rule for when it is consulted.
///
/// Non-preemptive schedulers are asked for a process only when the CPU is
/// free; preemptive ones are asked every tick and get the previous holder
/// back through `enqueue` with `ENQ_REENQ`.
pub trait Scheduler {
    const NAME: &'static str;
    const PREEMPTIVE: bool;

    fn init(ctx: &mut CpuCtx) -> Self;

    fn enqueue(&mut self, ctx: &mut CpuCtx, process: ProcessId, flags: EnqueueFlags);

    fn dispatch(&mut self, ctx: &mut CpuCtx) -> Option<ProcessId> {
        ctx.ready.pop()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum PolicyKind {
    /// Shortest remaining time first (preemptive SJF)
    Srtf,
    /// Shortest job first, non-preemptive
    Sjf,
    /// First come, first served
    Fcfs,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Srtf, PolicyKind::Sjf, PolicyKind::Fcfs];

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Srtf => SrtfScheduler::NAME,
            PolicyKind::Sjf => SjfScheduler::NAME,
            PolicyKind::Fcfs => FcfsScheduler::NAME,
        }
    }

    pub fn is_preemptive(self) -> bool {
        match self {
            PolicyKind::Srtf => SrtfScheduler::PREEMPTIVE,
            PolicyKind::Sjf => SjfScheduler::PREEMPTIVE,
            PolicyKind::Fcfs => FcfsScheduler::PREEMPTIVE,
        }
    }

    pub fn run(self, workload: Workload) -> Report {
        match self {
            PolicyKind::Srtf => Sim::<SrtfScheduler>::new(workload).run(),
            PolicyKind::Sjf => Sim::<SjfScheduler>::new(workload).run(),
            PolicyKind::Fcfs => Sim::<FcfsScheduler>::new(workload).run(),
        }
    }
}
