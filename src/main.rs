use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use burst_sim::{PolicyKind, Workload, sim::BernoulliParams};
use clap::Parser;
use log::{info, warn};

const SEPARATOR: &str = "---------------------------------------------------------------------";

/// Simulate FCFS, SJF and SRTF scheduling of single-burst processes on one
/// CPU and report each schedule with its average waiting time.
#[derive(Debug, Parser)]
struct Opts {
    /// Arrival time and burst length pairs, e.g. `0 7 2 4`. Without them an
    /// interactive prompt reads one workload per line.
    #[clap(allow_negative_numbers = true)]
    workload: Vec<String>,

    /// Policies to run, in order. Defaults to srtf, sjf, fcfs.
    #[clap(short = 'p', long = "policy", value_enum)]
    policies: Vec<PolicyKind>,

    /// Generate a random workload over this many ticks instead of reading one.
    #[clap(long, conflicts_with = "workload")]
    random: Option<u64>,

    /// Seed for --random.
    #[clap(long, default_value = "0")]
    seed: u64,

    /// Probability of an arrival at each tick for --random.
    #[clap(long, default_value = "0.3")]
    p_arrival: f64,

    /// Probability that a generated process is short for --random.
    #[clap(long, default_value = "0.3")]
    p_short: f64,

    /// Burst length of short generated processes.
    #[clap(long, default_value = "2")]
    short_burst: u64,

    /// Burst length of long generated processes.
    #[clap(long, default_value = "6")]
    long_burst: u64,

    /// Also print each process's waiting time.
    #[clap(long)]
    waits: bool,

    /// Enable verbose output. Specify multiple times to see every tick.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Opts {
    fn policies(&self) -> Vec<PolicyKind> {
        if self.policies.is_empty() {
            PolicyKind::ALL.to_vec()
        } else {
            self.policies.clone()
        }
    }

    fn bernoulli_params(&self, ticks: u64) -> Result<BernoulliParams> {
        for (name, p) in [("p-arrival", self.p_arrival), ("p-short", self.p_short)] {
            if !(0.0..=1.0).contains(&p) {
                bail!("--{name} must be between 0 and 1, got {p}");
            }
        }
        Ok(BernoulliParams {
            ticks,
            p_arrival: self.p_arrival,
            p_short: self.p_short,
            short_burst: self.short_burst,
            long_burst: self.long_burst,
        })
    }
}

fn evaluate(workload: &Workload, opts: &Opts, out: &mut impl Write) -> Result<()> {
    for policy in opts.policies() {
        let report = policy.run(workload.clone());
        writeln!(out)?;
        writeln!(out, "{report}")?;
        if opts.waits {
            writeln!(out, "Waiting Times: {}", report.waits_line())?;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn repl(opts: &Opts) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "\nEnter process arrival times and burst lengths: ")?;
        stdout.flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next() else {
            // EOF behaves like "q"
            writeln!(stdout)?;
            break;
        };
        let line = line.context("Failed to read workload line")?;
        if line.trim().eq_ignore_ascii_case("q") {
            break;
        }

        match Workload::parse(&line) {
            Ok(workload) => evaluate(&workload, opts, &mut stdout)?,
            Err(e) => {
                warn!("rejected workload {:?}: {:?}", line, e);
                writeln!(stdout, "ERROR! {e}")?;
            }
        }
        writeln!(stdout, "{SEPARATOR}")?;
    }

    writeln!(stdout, "Good-bye!")?;
    Ok(())
}

fn main() -> Result<()> {
    let opts = Opts::parse();

    let llv = match opts.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    let mut lcfg = simplelog::ConfigBuilder::new();
    lcfg.set_time_level(simplelog::LevelFilter::Error)
        .set_location_level(simplelog::LevelFilter::Off)
        .set_target_level(simplelog::LevelFilter::Off)
        .set_thread_level(simplelog::LevelFilter::Off);
    simplelog::TermLogger::init(
        llv,
        lcfg.build(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    if let Some(ticks) = opts.random {
        let params = opts.bernoulli_params(ticks)?;
        let workload = Workload::bernoulli(&params, opts.seed)
            .context("Failed to generate a random workload")?;
        info!(
            "Generated {} processes over {} ticks (seed {})",
            workload.process_count(),
            ticks,
            opts.seed
        );
        println!("Workload: {workload}");
        return evaluate(&workload, &opts, &mut io::stdout().lock());
    }

    if opts.workload.is_empty() {
        return repl(&opts);
    }

    let workload = Workload::from_tokens(opts.workload.iter().map(String::as_str))
        .context("Invalid workload")?;
    evaluate(&workload, &opts, &mut io::stdout().lock())
}
