mod common;

use common::*;
use wattsplit::config::MatchingConfig;
use wattsplit::engines::matching::{overlap_score, TagMatcher};
use wattsplit::types::{Cycle, Phase};

fn cycle(on: f64, off: f64) -> Cycle {
    Cycle::new(on, off).unwrap()
}

#[test]
fn test_overlap_score_bounds() {
    assert_eq!(overlap_score((0.0, 10.0), (0.0, 10.0)), 1.0);
    assert_eq!(overlap_score((0.0, 10.0), (20.0, 30.0)), 0.0);
    assert_eq!(overlap_score((0.0, 10.0), (10.0, 20.0)), 0.0);

    let partial = overlap_score((0.0, 10.0), (2.0, 6.0));
    assert_close(partial, 0.4, 1e-12);
}

#[test]
fn test_overlap_score_is_symmetric() {
    let pairs = [
        ((0.0, 10.0), (5.0, 25.0)),
        ((3.0, 4.0), (0.0, 100.0)),
        ((-5.0, 5.0), (4.5, 6.0)),
    ];
    for (a, b) in pairs {
        let ab = overlap_score(a, b);
        assert_close(ab, overlap_score(b, a), 1e-15);
        assert!((0.0..=1.0).contains(&ab));
    }
}

#[test]
fn test_widened_window() {
    let matcher = TagMatcher::new(MatchingConfig::default());
    let heater = tag(1, "Heater", 100.0, 200.0);

    assert_eq!(matcher.widened_window(&heater), (120.0, 250.0));

    let exact = TagMatcher::new(MatchingConfig {
        on_shift_ratio: 0.0,
        off_extension_ratio: 0.0,
    });
    assert_eq!(exact.widened_window(&heater), (100.0, 200.0));
}

#[test]
fn test_best_cycle_prefers_largest_overlap() {
    let matcher = TagMatcher::new(MatchingConfig::default());
    let heater = tag(1, "Heater", 100.0, 200.0);
    let cycles = [cycle(10.0, 50.0), cycle(90.0, 130.0), cycle(118.0, 240.0), cycle(300.0, 320.0)];

    let (best, score) = matcher.best_cycle(&cycles, &heater).unwrap();
    assert_eq!(best, cycle(118.0, 240.0));
    // overlap 120..240 = 120, union 118..250 = 132
    assert_close(score, 120.0 / 132.0, 1e-12);
}

#[test]
fn test_best_cycle_ties_keep_the_earlier_cycle() {
    let matcher = TagMatcher::new(MatchingConfig {
        on_shift_ratio: 0.0,
        off_extension_ratio: 0.0,
    });
    let kettle = tag(2, "Kettle", 100.0, 200.0);
    let cycles = [cycle(50.0, 150.0), cycle(150.0, 250.0)];

    let (best, _) = matcher.best_cycle(&cycles, &kettle).unwrap();
    assert_eq!(best, cycle(50.0, 150.0));
}

#[test]
fn test_unmatched_tag_has_no_cycle() {
    let matcher = TagMatcher::new(MatchingConfig::default());
    let kettle = tag(2, "Kettle", 250.0, 280.0);

    assert!(matcher.best_cycle(&[cycle(100.0, 200.0)], &kettle).is_none());
    assert!(matcher.best_cycle(&[], &kettle).is_none());
}

#[test]
fn test_best_match_searches_both_phases() {
    let matcher = TagMatcher::new(MatchingConfig::default());
    let heater = tag(1, "Heater", 100.0, 200.0);

    let detected = vec![
        (Phase::L1, vec![cycle(10.0, 40.0)]),
        (Phase::L2, vec![cycle(100.0, 200.0)]),
    ];
    let found = matcher.best_match(&detected, &heater).unwrap();
    assert_eq!(found.phase, Phase::L2);
    assert_eq!(found.cycle, cycle(100.0, 200.0));

    let nothing = vec![(Phase::L1, vec![]), (Phase::L2, vec![cycle(500.0, 600.0)])];
    assert!(matcher.best_match(&nothing, &heater).is_none());
}

#[test]
fn test_best_match_tie_goes_to_l1() {
    let matcher = TagMatcher::new(MatchingConfig::default());
    let heater = tag(1, "Heater", 100.0, 200.0);

    let detected = vec![
        (Phase::L1, vec![cycle(100.0, 200.0)]),
        (Phase::L2, vec![cycle(100.0, 200.0)]),
    ];
    let found = matcher.best_match(&detected, &heater).unwrap();
    assert_eq!(found.phase, Phase::L1);
}
