use keyed_priority_queue::KeyedPriorityQueue;
use std::{cmp::Ordering, fmt};

pub type Ticks = u64;

/// Ids are letters, so a workload holds at most one process per letter.
pub const MAX_PROCESSES: usize = 26;

#[derive(PartialEq, Eq, Hash, Debug, Copy, Clone, PartialOrd, Ord)]
pub struct ProcessId(u8);

impl ProcessId {
    pub fn from_index(index: usize) -> Self {
        assert!(
            index < MAX_PROCESSES,
            "Process index {index} has no letter id"
        );
        Self(index as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Terminated,
}

#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcessId,
    pub arrival_time: Ticks,
    pub burst_length: Ticks,
    pub remaining_time: Ticks,
    pub waiting_time: Ticks,
    pub state: ProcessState,
}

impl Process {
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_length: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_length,
            remaining_time: burst_length,
            waiting_time: 0,
            state: ProcessState::New,
        }
    }

    /// Run for one tick. Returns false, leaving the process untouched, if it
    /// has nothing left to run.
    pub fn advance(&mut self) -> bool {
        if self.remaining_time == 0 {
            return false;
        }
        self.remaining_time -= 1;
        true
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_time == 0
    }

    pub fn tick_waiting(&mut self) {
        self.waiting_time += 1;
    }
}

/// Ready-queue ordering: smallest `key` first, then earliest arrival, then
/// input order.
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub struct Priority {
    pub key: Ticks,
    pub arrival_time: Ticks,
    pub id: ProcessId,
}

impl Priority {
    fn rank(&self) -> (Ticks, Ticks, ProcessId) {
        (self.key, self.arrival_time, self.id)
    }
}

// KeyedPriorityQueue is a max-heap, so we need to flip-flop Priority's Ord
impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        other.rank().cmp(&self.rank())
    }
}

#[derive(Debug)]
pub struct ReadyQueue {
    processes: KeyedPriorityQueue<ProcessId, Priority>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self {
            processes: KeyedPriorityQueue::new(),
        }
    }

    pub fn push(&mut self, id: ProcessId, priority: Priority) {
        let previous = self.processes.push(id, priority);
        assert!(previous.is_none(), "Process {id} already in ready queue");
    }

    pub fn pop(&mut self) -> Option<ProcessId> {
        self.processes.pop().map(|(id, _)| id)
    }

    pub fn contains(&self, id: ProcessId) -> bool {
        self.processes.get_priority(&id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = ProcessId> + '_ {
        self.processes.iter().map(|(id, _)| *id)
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

#[derive(Debug)]
pub struct CpuCtx {
    pub now: Ticks,
    pub processes: Vec<Process>,
    pub ready: ReadyQueue,
    // Single core: at most one process holds the CPU
    pub current: Option<ProcessId>,
}

impl CpuCtx {
    pub fn new(processes: Vec<Process>) -> Self {
        debug_assert!(
            processes
                .iter()
                .enumerate()
                .all(|(index, p)| p.id.index() == index),
            "ProcessId must match Vec index"
        );

        Self {
            now: 0,
            processes,
            ready: ReadyQueue::new(),
            current: None,
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn process(&self, id: ProcessId) -> &Process {
        &self.processes[id.index()]
    }

    pub fn process_mut(&mut self, id: ProcessId) -> &mut Process {
        &mut self.processes[id.index()]
    }

    pub fn cpu_is_idle(&self) -> bool {
        self.current.is_none()
    }

    pub fn enqueue(&mut self, id: ProcessId, key: Ticks) {
        let process = self.process_mut(id);
        debug_assert!(
            process.state != ProcessState::Terminated,
            "Terminated process {id} cannot be enqueued"
        );
        process.state = ProcessState::Ready;
        let priority = Priority {
            key,
            arrival_time: process.arrival_time,
            id,
        };
        self.ready.push(id, priority);
    }

    pub fn set_running(&mut self, id: ProcessId) {
        debug_assert!(
            !self.ready.contains(id),
            "Running process {id} must not be enqueued"
        );
        debug_assert!(self.current.is_none(), "CPU already running a process");

        self.current = Some(id);
        self.process_mut(id).state = ProcessState::Running;
    }

    pub fn mark_terminated(&mut self, id: ProcessId) {
        let process = self.process_mut(id);
        debug_assert!(
            process.state == ProcessState::Running && process.is_exhausted(),
            "Process {id} must have run to completion before termination"
        );
        process.state = ProcessState::Terminated;
    }

    pub fn clear_cpu(&mut self) -> Option<ProcessId> {
        self.current.take()
    }

    pub fn all_terminated(&self) -> bool {
        self.processes
            .iter()
            .all(|p| p.state == ProcessState::Terminated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(c: char) -> ProcessId {
        ProcessId::from_index((c as u8 - b'A') as usize)
    }

    #[test]
    fn advance_stops_at_zero() {
        let mut process = Process::new(pid('A'), 0, 2);
        assert!(process.advance());
        assert!(process.advance());
        assert!(process.is_exhausted());
        assert!(!process.advance());
        assert_eq!(process.remaining_time, 0);
    }

    #[test]
    fn tick_waiting_counts_up() {
        let mut process = Process::new(pid('A'), 0, 1);
        process.tick_waiting();
        process.tick_waiting();
        assert_eq!(process.waiting_time, 2);
    }

    #[test]
    fn ids_are_letters() {
        assert_eq!(ProcessId::from_index(0).to_string(), "A");
        assert_eq!(ProcessId::from_index(25).as_char(), 'Z');
    }

    #[test]
    fn ready_queue_pops_smallest_key_then_arrival() {
        let mut queue = ReadyQueue::new();
        queue.push(
            pid('A'),
            Priority {
                key: 5,
                arrival_time: 0,
                id: pid('A'),
            },
        );
        queue.push(
            pid('C'),
            Priority {
                key: 3,
                arrival_time: 4,
                id: pid('C'),
            },
        );
        queue.push(
            pid('B'),
            Priority {
                key: 3,
                arrival_time: 2,
                id: pid('B'),
            },
        );

        assert_eq!(queue.pop(), Some(pid('B')));
        assert_eq!(queue.pop(), Some(pid('C')));
        assert_eq!(queue.pop(), Some(pid('A')));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn equal_keys_and_arrivals_fall_back_to_input_order() {
        let mut queue = ReadyQueue::new();
        for c in ['C', 'A', 'B'] {
            queue.push(
                pid(c),
                Priority {
                    key: 1,
                    arrival_time: 0,
                    id: pid(c),
                },
            );
        }
        let order: Vec<_> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(order, vec![pid('A'), pid('B'), pid('C')]);
    }
}
