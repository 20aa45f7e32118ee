use rand::prelude::*;

use super::workload::{Workload, WorkloadError};
use crate::core::{MAX_PROCESSES, Ticks};

/// Each tick a process arrives with probability `p_arrival`; it is a short
/// job with probability `p_short`, otherwise a long one.
#[derive(Debug, Clone)]
pub struct BernoulliParams {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
}

impl Default for BernoulliParams {
    fn default() -> Self {
        Self {
            ticks: 20,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
        }
    }
}

impl Workload {
    /// Random workload, reproducible for a given `seed`. Generation stops
    /// once every process letter is taken.
    pub fn bernoulli(params: &BernoulliParams, seed: u64) -> Result<Self, WorkloadError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut pairs = Vec::new();

        for t in 0..params.ticks {
            if pairs.len() == MAX_PROCESSES {
                break;
            }
            if rng.random::<f64>() < params.p_arrival {
                let burst = if rng.random::<f64>() < params.p_short {
                    params.short_burst
                } else {
                    params.long_burst
                };
                pairs.push((t, burst));
            }
        }

        Self::from_pairs(&pairs)
    }
}
