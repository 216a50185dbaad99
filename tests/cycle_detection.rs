mod common;

use common::*;
use wattsplit::config::DetectionConfig;
use wattsplit::engines::detection::{merge_cycles, CycleDetector, ThresholdCycleDetector};
use wattsplit::types::{Cycle, Phase};

fn detector() -> ThresholdCycleDetector {
    ThresholdCycleDetector::new(DetectionConfig::default())
}

fn windows(cycles: &[Cycle]) -> Vec<(f64, f64)> {
    cycles.iter().map(|c| (c.on_time, c.off_time)).collect()
}

#[test]
fn test_single_pulse_is_one_cycle() {
    init_logging();
    let power = power_trace(&timeline(0.0, 300), 0.0, &[Pulse::new(100.0, 200.0, 1000.0)]);

    let cycles = detector().detect(&power, None).unwrap();
    assert_eq!(windows(&cycles), vec![(100.0, 200.0)]);
}

#[test]
fn test_flat_trace_has_no_cycles() {
    let power = power_trace(&timeline(0.0, 300), 75.0, &[]);
    assert!(detector().detect(&power, None).unwrap().is_empty());

    let empty = power_trace(&[], 0.0, &[]);
    assert!(detector().detect(&empty, None).unwrap().is_empty());
}

#[test]
fn test_cycles_are_sorted_and_disjoint() {
    let pulses = [
        Pulse::new(40.0, 70.0, 400.0),
        Pulse::new(120.0, 180.0, 1500.0),
        Pulse::new(220.0, 260.0, 250.0),
    ];
    let power = power_trace(&timeline(0.0, 300), 60.0, &pulses);

    let cycles = detector().detect(&power, None).unwrap();
    assert_eq!(
        windows(&cycles),
        vec![(40.0, 70.0), (120.0, 180.0), (220.0, 260.0)]
    );
    assert!(cycles.windows(2).all(|w| w[0].off_time <= w[1].on_time));
    assert!(cycles.iter().all(|c| c.on_time < c.off_time));
}

#[test]
fn test_base_load_below_threshold_is_ignored() {
    // 20 W step stays under the 30 W floor
    let power = power_trace(&timeline(0.0, 200), 100.0, &[Pulse::new(50.0, 150.0, 20.0)]);
    assert!(detector().detect(&power, None).unwrap().is_empty());
}

#[test]
fn test_small_noise_does_not_split_a_cycle() {
    let power = noisy_power_trace(
        &timeline(0.0, 300),
        50.0,
        &[Pulse::new(100.0, 200.0, 800.0)],
        5.0,
        7,
    );

    let cycles = detector().detect(&power, None).unwrap();
    assert_eq!(windows(&cycles), vec![(100.0, 200.0)]);
}

#[test]
fn test_hysteresis_bridges_a_shallow_dip() {
    let pulses = [
        Pulse::new(100.0, 150.0, 100.0),
        Pulse::new(150.0, 151.0, 20.0),
        Pulse::new(151.0, 200.0, 100.0),
    ];
    let power = power_trace(&timeline(0.0, 300), 0.0, &pulses);

    let held = detector().detect(&power, None).unwrap();
    assert_eq!(windows(&held), vec![(100.0, 200.0)]);

    let strict = ThresholdCycleDetector::new(DetectionConfig {
        hysteresis_ratio: 0.0,
        ..DetectionConfig::default()
    });
    let split = strict.detect(&power, None).unwrap();
    assert_eq!(windows(&split), vec![(100.0, 150.0), (151.0, 200.0)]);

    let merging = ThresholdCycleDetector::new(DetectionConfig {
        hysteresis_ratio: 0.0,
        merge_gap_secs: 2.0,
        ..DetectionConfig::default()
    });
    let merged = merging.detect(&power, None).unwrap();
    assert_eq!(windows(&merged), vec![(100.0, 200.0)]);
}

#[test]
fn test_short_spikes_are_filtered() {
    let pulses = [Pulse::new(50.0, 53.0, 500.0), Pulse::new(100.0, 160.0, 500.0)];
    let power = power_trace(&timeline(0.0, 200), 0.0, &pulses);

    let cycles = detector().detect(&power, None).unwrap();
    assert_eq!(windows(&cycles), vec![(100.0, 160.0)]);

    let permissive = ThresholdCycleDetector::new(DetectionConfig {
        min_cycle_duration_secs: 0.0,
        ..DetectionConfig::default()
    });
    assert_eq!(permissive.detect(&power, None).unwrap().len(), 2);
}

#[test]
fn test_cycle_running_at_end_closes_on_last_sample() {
    let power = power_trace(&timeline(0.0, 300), 0.0, &[Pulse::new(250.0, 400.0, 500.0)]);

    let cycles = detector().detect(&power, None).unwrap();
    assert_eq!(windows(&cycles), vec![(250.0, 300.0)]);
}

#[test]
fn test_load_on_at_trace_start_is_detected() {
    let power = power_trace(&timeline(0.0, 300), 0.0, &[Pulse::new(0.0, 200.0, 1000.0)]);
    let cycles = detector().detect(&power, None).unwrap();
    assert_eq!(windows(&cycles), vec![(0.0, 200.0)]);

    // The baseline restarts after the drop, so later cycles are still found
    let pulses = [Pulse::new(0.0, 50.0, 1000.0), Pulse::new(100.0, 150.0, 600.0)];
    let power = power_trace(&timeline(0.0, 300), 40.0, &pulses);
    let cycles = detector().detect(&power, None).unwrap();
    assert_eq!(windows(&cycles), vec![(0.0, 50.0), (100.0, 150.0)]);

    // No HF burst can precede the first sample
    let times = timeline(0.0, 300);
    let corroborating = ThresholdCycleDetector::new(DetectionConfig {
        require_noise_corroboration: true,
        ..DetectionConfig::default()
    });
    let noise = noise_trace(&times, &[], 1.0);
    let cycles = corroborating.detect(&power, Some(&noise)).unwrap();
    assert_eq!(windows(&cycles), vec![(0.0, 50.0)]);
}

#[test]
fn test_noise_corroboration_drops_quiet_edges() {
    let times = timeline(0.0, 400);
    let pulses = [Pulse::new(100.0, 150.0, 600.0), Pulse::new(300.0, 350.0, 600.0)];
    let power = power_trace(&times, 0.0, &pulses);
    let noise = noise_trace(&times, &[100.0], 10.0);

    let corroborating = ThresholdCycleDetector::new(DetectionConfig {
        require_noise_corroboration: true,
        ..DetectionConfig::default()
    });

    let cycles = corroborating.detect(&power, Some(&noise)).unwrap();
    assert_eq!(windows(&cycles), vec![(100.0, 150.0)]);

    // Without an HF channel the check is skipped
    assert_eq!(corroborating.detect(&power, None).unwrap().len(), 2);

    // And it is off by default
    assert_eq!(detector().detect(&power, Some(&noise)).unwrap().len(), 2);
}

#[test]
fn test_detect_phases_runs_each_phase() {
    let times = timeline(0.0, 300);
    let l1 = power_trace(&times, 0.0, &[Pulse::new(100.0, 200.0, 1000.0)]);
    let l2_pulses = [Pulse::new(20.0, 60.0, 300.0), Pulse::new(220.0, 280.0, 300.0)];
    let l2 = power_trace(&times, 0.0, &l2_pulses);
    let reading = reading(l1, l2, None);

    let detected = detector().detect_phases(&reading).unwrap();
    assert_eq!(detected.len(), 2);
    assert_eq!(detected[0].0, Phase::L1);
    assert_eq!(detected[0].1.len(), 1);
    assert_eq!(detected[1].0, Phase::L2);
    assert_eq!(windows(&detected[1].1), vec![(20.0, 60.0), (220.0, 280.0)]);
}

#[test]
fn test_merge_cycles_sorts_and_joins() {
    let cycles = vec![
        Cycle::new(50.0, 60.0).unwrap(),
        Cycle::new(10.0, 20.0).unwrap(),
        Cycle::new(15.0, 30.0).unwrap(),
        Cycle::new(33.0, 40.0).unwrap(),
    ];

    assert_eq!(
        windows(&merge_cycles(cycles.clone(), 0.0)),
        vec![(10.0, 30.0), (33.0, 40.0), (50.0, 60.0)]
    );
    assert_eq!(
        windows(&merge_cycles(cycles, 5.0)),
        vec![(10.0, 40.0), (50.0, 60.0)]
    );
}
