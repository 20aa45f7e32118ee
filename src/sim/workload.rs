//! Workload construction and validation.
//!
//! A workload is a flat list of integers read pairwise as
//! `(arrival_time, burst_length)`. Processes are named `A`, `B`, ... in input
//! order, whatever their arrival times.

use std::fmt;

use crate::core::{MAX_PROCESSES, Process, ProcessId, Ticks};

/// Upper bound on the summed bursts; the trace holds one entry per busy tick.
pub const MAX_EXECUTION_TIME: Ticks = 1 << 24;
/// Latest accepted arrival, leaving the clock room to finish every burst.
pub const MAX_ARRIVAL: Ticks = Ticks::MAX / 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkloadError {
    /// No tokens at all.
    Empty,
    /// A trailing arrival time without a burst length.
    OddTokenCount { count: usize },
    /// Token at `position` (0-based) is not an integer.
    NotANumber { position: usize, token: String },
    /// Token at `position` (0-based) is a negative integer.
    Negative { position: usize, value: i64 },
    /// A process asked for no CPU time.
    ZeroBurst { process: ProcessId },
    /// More processes than there are letters to name them.
    TooManyProcesses { count: usize },
    /// Bursts add up to more than `MAX_EXECUTION_TIME`.
    TooMuchWork,
    /// Arrival time past `MAX_ARRIVAL`.
    ArrivalTooLate { process: ProcessId, arrival_time: Ticks },
}

impl fmt::Display for WorkloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkloadError::Empty => write!(f, "No processes given. Try again!"),
            WorkloadError::OddTokenCount { count } => write!(
                f,
                "Every process needs an arrival time and a CPU burst length ({count} values given). Try again!"
            ),
            WorkloadError::NotANumber { position, token } => {
                write!(f, "Value {} (\"{token}\") is not an integer", position + 1)
            }
            WorkloadError::Negative { position, value } => {
                write!(f, "Value {} ({value}) must not be negative", position + 1)
            }
            WorkloadError::ZeroBurst { process } => {
                write!(f, "Process {process} needs a CPU burst of at least one unit")
            }
            WorkloadError::TooManyProcesses { count } => write!(
                f,
                "{count} processes given, at most {MAX_PROCESSES} are supported"
            ),
            WorkloadError::TooMuchWork => write!(
                f,
                "CPU bursts add up to more than {MAX_EXECUTION_TIME} units"
            ),
            WorkloadError::ArrivalTooLate {
                process,
                arrival_time,
            } => write!(
                f,
                "Process {process} arrives at {arrival_time}, after the latest supported time {MAX_ARRIVAL}"
            ),
        }
    }
}

impl std::error::Error for WorkloadError {}

#[derive(Debug, Clone)]
pub struct Workload {
    processes: Vec<Process>,
    total_execution_time: Ticks,
}

impl Workload {
    /// Parse a whitespace-separated line such as `"0 7 2 4"`.
    pub fn parse(line: &str) -> Result<Self, WorkloadError> {
        Self::from_tokens(line.split_ascii_whitespace())
    }

    pub fn from_tokens<'a, I>(tokens: I) -> Result<Self, WorkloadError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values = tokens
            .into_iter()
            .enumerate()
            .map(|(position, token)| parse_value(position, token))
            .collect::<Result<Vec<_>, _>>()?;

        if values.len() % 2 != 0 {
            return Err(WorkloadError::OddTokenCount {
                count: values.len(),
            });
        }

        let pairs: Vec<(Ticks, Ticks)> = values
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        Self::from_pairs(&pairs)
    }

    pub fn from_pairs(pairs: &[(Ticks, Ticks)]) -> Result<Self, WorkloadError> {
        if pairs.is_empty() {
            return Err(WorkloadError::Empty);
        }
        if pairs.len() > MAX_PROCESSES {
            return Err(WorkloadError::TooManyProcesses { count: pairs.len() });
        }

        let processes = pairs
            .iter()
            .enumerate()
            .map(|(index, &(arrival_time, burst_length))| {
                let id = ProcessId::from_index(index);
                if burst_length == 0 {
                    return Err(WorkloadError::ZeroBurst { process: id });
                }
                if arrival_time > MAX_ARRIVAL {
                    return Err(WorkloadError::ArrivalTooLate {
                        process: id,
                        arrival_time,
                    });
                }
                Ok(Process::new(id, arrival_time, burst_length))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total_execution_time = processes
            .iter()
            .try_fold(0, |total: Ticks, p| total.checked_add(p.burst_length))
            .filter(|&total| total <= MAX_EXECUTION_TIME)
            .ok_or(WorkloadError::TooMuchWork)?;

        Ok(Self {
            processes,
            total_execution_time,
        })
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn into_processes(self) -> Vec<Process> {
        self.processes
    }

    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Sum of all bursts; also the number of busy ticks in any schedule.
    pub fn total_execution_time(&self) -> Ticks {
        self.total_execution_time
    }
}

impl fmt::Display for Workload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for p in &self.processes {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            write!(f, "{} {}", p.arrival_time, p.burst_length)?;
        }
        Ok(())
    }
}

fn parse_value(position: usize, token: &str) -> Result<Ticks, WorkloadError> {
    if let Ok(value) = token.parse::<Ticks>() {
        return Ok(value);
    }
    match token.parse::<i64>() {
        Ok(value) if value < 0 => Err(WorkloadError::Negative { position, value }),
        _ => Err(WorkloadError::NotANumber {
            position,
            token: token.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_in_input_order() {
        let workload = Workload::parse("0 7  2 4").unwrap();
        assert_eq!(workload.process_count(), 2);
        assert_eq!(workload.total_execution_time(), 11);

        let b = &workload.processes()[1];
        assert_eq!(b.id.to_string(), "B");
        assert_eq!((b.arrival_time, b.burst_length), (2, 4));
        assert_eq!(b.remaining_time, 4);
    }

    #[test]
    fn ids_follow_input_order_not_arrival() {
        let workload = Workload::parse("5 1 0 2").unwrap();
        assert_eq!(workload.processes()[0].id.as_char(), 'A');
        assert_eq!(workload.processes()[0].arrival_time, 5);
    }

    #[test]
    fn odd_token_count_is_rejected() {
        assert_eq!(
            Workload::parse("0 3 1").unwrap_err(),
            WorkloadError::OddTokenCount { count: 3 }
        );
    }

    #[test]
    fn non_numeric_token_is_rejected() {
        assert_eq!(
            Workload::parse("0 x").unwrap_err(),
            WorkloadError::NotANumber {
                position: 1,
                token: "x".to_owned()
            }
        );
        assert!(matches!(
            Workload::parse("1.5 2"),
            Err(WorkloadError::NotANumber { position: 0, .. })
        ));
    }

    #[test]
    fn negative_values_are_rejected() {
        assert_eq!(
            Workload::parse("0 -3").unwrap_err(),
            WorkloadError::Negative {
                position: 1,
                value: -3
            }
        );
    }

    #[test]
    fn zero_burst_is_rejected() {
        let err = Workload::parse("0 2 3 0").unwrap_err();
        assert_eq!(
            err,
            WorkloadError::ZeroBurst {
                process: ProcessId::from_index(1)
            }
        );
        assert_eq!(
            err.to_string(),
            "Process B needs a CPU burst of at least one unit"
        );
    }

    #[test]
    fn empty_and_oversized_workloads_are_rejected() {
        assert_eq!(Workload::parse("   ").unwrap_err(), WorkloadError::Empty);

        let pairs = vec![(0, 1); MAX_PROCESSES + 1];
        assert_eq!(
            Workload::from_pairs(&pairs).unwrap_err(),
            WorkloadError::TooManyProcesses {
                count: MAX_PROCESSES + 1
            }
        );
    }

    #[test]
    fn summed_bursts_that_overflow_are_rejected() {
        assert_eq!(
            Workload::parse("0 18446744073709551615 0 1").unwrap_err(),
            WorkloadError::TooMuchWork
        );
    }

    #[test]
    fn oversized_single_burst_is_rejected() {
        assert_eq!(
            Workload::parse("0 18446744073709551615").unwrap_err(),
            WorkloadError::TooMuchWork
        );
        let pairs = [(0, MAX_EXECUTION_TIME / 2), (3, MAX_EXECUTION_TIME / 2 + 1)];
        assert_eq!(
            Workload::from_pairs(&pairs).unwrap_err(),
            WorkloadError::TooMuchWork
        );

        let at_limit = Workload::from_pairs(&[(0, MAX_EXECUTION_TIME)]).unwrap();
        assert_eq!(at_limit.total_execution_time(), MAX_EXECUTION_TIME);
    }

    #[test]
    fn arrival_past_clock_limit_is_rejected() {
        assert_eq!(
            Workload::from_pairs(&[(0, 1), (MAX_ARRIVAL + 1, 1)]).unwrap_err(),
            WorkloadError::ArrivalTooLate {
                process: ProcessId::from_index(1),
                arrival_time: MAX_ARRIVAL + 1
            }
        );
        assert!(Workload::from_pairs(&[(MAX_ARRIVAL, 1)]).is_ok());
    }

    #[test]
    fn display_round_trips_through_parse() {
        let workload = Workload::parse("0 7 2 4").unwrap();
        assert_eq!(workload.to_string(), "0 7 2 4");
    }
}
