use burst_sim::{PolicyKind, ProcessId, Report, Workload, WorkloadError};

fn run(policy: PolicyKind, line: &str) -> Report {
    policy.run(Workload::parse(line).unwrap())
}

fn trace(report: &Report) -> String {
    report.schedule.iter().map(|id| id.as_char()).collect()
}

fn wait_of(report: &Report, c: char) -> u64 {
    report
        .waiting_times
        .iter()
        .find(|(id, _)| id.as_char() == c)
        .map(|&(_, w)| w)
        .unwrap()
}

#[test]
fn single_process_under_every_policy() {
    for policy in PolicyKind::ALL {
        let report = run(policy, "0 3");
        assert_eq!(trace(&report), "AAA", "{}", policy.name());
        assert_eq!(report.average_waiting_time, 0.0);
    }
}

#[test]
fn fcfs_scenario() {
    let report = run(PolicyKind::Fcfs, "0 4 1 2");
    assert_eq!(trace(&report), "AAAABB");
    assert_eq!(wait_of(&report, 'A'), 0);
    assert_eq!(wait_of(&report, 'B'), 3);
    assert_eq!(report.average_waiting_time, 1.5);
}

#[test]
fn sjf_scenario_keeps_running_process() {
    let report = run(PolicyKind::Sjf, "0 7 2 4");
    assert_eq!(trace(&report), "AAAAAAABBBB");
    assert_eq!(wait_of(&report, 'B'), 5);
    assert_eq!(report.average_waiting_time, 2.5);
    assert_eq!(report.preemptions, 0);
}

#[test]
fn srtf_scenario_preempts() {
    let report = run(PolicyKind::Srtf, "0 7 2 4");
    assert_eq!(trace(&report), "AABBBBAAAAA");
    assert_eq!(wait_of(&report, 'A'), 4);
    assert_eq!(wait_of(&report, 'B'), 0);
    assert_eq!(report.average_waiting_time, 2.0);
    assert_eq!(report.preemptions, 1);
    assert_eq!(
        report.to_string(),
        "SRTF: A2 B4 A5\nAverage Waiting Time: 2.00"
    );
}

#[test]
fn textbook_workload() {
    // Four processes with overlapping arrivals
    let line = "0 8 1 4 2 9 3 5";

    let fcfs = run(PolicyKind::Fcfs, line);
    assert_eq!(fcfs.schedule_line(), "A8 B4 C9 D5");
    assert_eq!(fcfs.average_waiting_time, 8.75);

    let sjf = run(PolicyKind::Sjf, line);
    assert_eq!(sjf.schedule_line(), "A8 B4 D5 C9");
    assert_eq!(sjf.average_waiting_time, 7.75);

    let srtf = run(PolicyKind::Srtf, line);
    assert_eq!(srtf.schedule_line(), "A1 B4 D5 A7 C9");
    assert_eq!(srtf.average_waiting_time, 6.5);
}

#[test]
fn idle_gap_before_late_arrival() {
    for policy in PolicyKind::ALL {
        let report = run(policy, "0 1 5 2");
        assert_eq!(trace(&report), "ABB");
        assert_eq!(report.makespan, 7);
        assert_eq!(report.average_waiting_time, 0.0);
    }
}

#[test]
fn odd_input_builds_nothing() {
    assert_eq!(
        Workload::parse("0 3 1").unwrap_err(),
        WorkloadError::OddTokenCount { count: 3 }
    );
}

#[test]
fn error_messages_are_readable() {
    let err = Workload::parse("0 3 1").unwrap_err();
    assert!(err.to_string().starts_with("Every process needs an arrival time"));

    let err = Workload::parse("0 abc").unwrap_err();
    assert_eq!(err.to_string(), "Value 2 (\"abc\") is not an integer");
}

#[test]
fn huge_values_are_rejected_before_simulating() {
    assert_eq!(
        Workload::parse("0 18446744073709551615 0 1").unwrap_err(),
        WorkloadError::TooMuchWork
    );
    assert!(matches!(
        Workload::parse("18446744073709551615 1"),
        Err(WorkloadError::ArrivalTooLate { .. })
    ));
}

#[test]
fn far_off_arrival_under_every_policy() {
    for policy in PolicyKind::ALL {
        let report = run(policy, "0 2 1000000000000 3");
        assert_eq!(trace(&report), "AABBB");
        assert_eq!(report.average_waiting_time, 0.0);
        assert_eq!(report.makespan, 1_000_000_000_003);
    }
}

#[test]
fn policy_metadata() {
    assert!(PolicyKind::Srtf.is_preemptive());
    assert!(!PolicyKind::Sjf.is_preemptive());
    assert!(!PolicyKind::Fcfs.is_preemptive());
    let names: Vec<_> = PolicyKind::ALL.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["SRTF", "SJF", "FCFS"]);
    assert_eq!(ProcessId::from_index(2).to_string(), "C");
}
