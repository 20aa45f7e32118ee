pub mod driver;
pub mod generate;
pub mod report;
pub mod workload;

pub use driver::Sim;
pub use generate::BernoulliParams;
pub use report::{Report, run_lengths};
pub use workload::{MAX_ARRIVAL, MAX_EXECUTION_TIME, Workload, WorkloadError};
