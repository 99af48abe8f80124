//! `analyze` 진입점의 결과, 오류, 병렬/중단 동작 테스트.
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use replacement_analysis::case_file::demo_case;
use replacement_analysis::case_file::CaseOverrides;
use replacement_analysis::replacement::{
    analyze, analyze_into, analyze_with, present_worth, AnalysisError, BestTracker, Item,
    ItemRef, SearchOptions,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.9} got {actual:.9} (diff {diff:.3e}, tol {rel_tol})"
    );
}

/// 나열기와 독립적으로, 명시적 스택으로 최소 현가를 찾는다.
fn brute_force_minimum(defenders: &[Item], challengers: &[Item], life: u32, rate: f64) -> f64 {
    let mut best = f64::INFINITY;
    let mut prefixes: Vec<Vec<Item>> = vec![Vec::new()];
    prefixes.extend(defenders.iter().map(|d| vec![*d]));
    for prefix in prefixes {
        // (현재 경로, 다음 시작 인덱스)
        let mut stack = vec![(prefix, 0usize)];
        while let Some((path, start)) = stack.pop() {
            let years: u32 = path.iter().map(|i| i.period).sum();
            if years == life {
                best = best.min(present_worth(path.iter().copied(), rate));
                continue;
            }
            if years > life {
                continue;
            }
            for (i, c) in challengers.iter().enumerate().skip(start) {
                let mut next = path.clone();
                next.push(*c);
                stack.push((next, i));
            }
        }
    }
    best
}

fn spec_fixture() -> (Vec<Item>, Vec<Item>) {
    (
        vec![Item::new(2, 100.0)],
        vec![Item::new(1, 50.0), Item::new(3, 80.0)],
    )
}

#[test]
fn small_fixture_picks_cheapest_sequence() {
    let (defenders, challengers) = spec_fixture();
    let report = analyze(&defenders, &challengers, 3, 0.10).expect("analyze");
    assert_eq!(report.combinations_evaluated, 3);
    assert_eq!(
        report.best_selection(),
        Some(&[ItemRef::challenger(0); 3][..])
    );
    assert_close("pw", report.minimum_present_worth(), 124.342_599_549, 1e-9);
}

#[test]
fn analysis_is_deterministic() {
    let case = demo_case()
        .resolve(
            CaseOverrides {
                service_life: Some(9),
                rate_percent: Some(12.0),
            },
            10.0,
        )
        .expect("resolve");
    let first = case.analyze(&SearchOptions::default()).expect("first");
    for _ in 0..3 {
        let again = case.analyze(&SearchOptions::default()).expect("again");
        assert_eq!(again, first);
    }
}

#[test]
fn demo_minimum_matches_brute_force() {
    let demo = demo_case();
    for life in [1, 4, 6, 10, 13] {
        for rate_percent in [0.0, 5.0, 10.0, 20.0] {
            let case = demo
                .resolve(
                    CaseOverrides {
                        service_life: Some(life),
                        rate_percent: Some(rate_percent),
                    },
                    10.0,
                )
                .expect("resolve");
            let report = case.analyze(&SearchOptions::default()).expect("analyze");
            let expected =
                brute_force_minimum(&case.defenders, &case.challengers, life, case.rate);
            assert_close(
                &format!("life={life} rate={rate_percent}"),
                report.minimum_present_worth(),
                expected,
                1e-9,
            );
            let best = report.best.expect("demo always feasible");
            let ctx = case.context();
            assert_eq!(ctx.total_years(&best.selection), u64::from(life));
            assert_close("recomputed", ctx.present_worth(&best.selection), best.present_worth, 1e-12);
        }
    }
}

#[test]
fn zero_rate_sums_cost_times_period() {
    let defenders = vec![Item::new(2, 10.0)];
    let challengers = vec![Item::new(1, 7.0), Item::new(2, 9.0)];
    let report = analyze(&defenders, &challengers, 2, 0.0).expect("analyze");
    // 후보: D(2)=20, C0+C0=14, C1=18
    assert_eq!(report.minimum_present_worth(), 14.0);
    assert_eq!(
        report.best_selection(),
        Some(&[ItemRef::challenger(0), ItemRef::challenger(0)][..])
    );
}

#[test]
fn defender_can_win() {
    let defenders = vec![Item::new(1, 10.0)];
    let challengers = vec![Item::new(1, 30.0), Item::new(2, 25.0)];
    let report = analyze(&defenders, &challengers, 3, 0.08).expect("analyze");
    assert_eq!(
        report.best_selection(),
        Some(&[ItemRef::defender(0), ItemRef::challenger(1)][..])
    );
}

#[test]
fn ties_resolve_to_first_found() {
    // 이자율 0에서는 C0 두 번과 C1 한 번이 같은 현가다. C0 경로가 먼저 발견된다.
    let challengers = vec![Item::new(1, 5.0), Item::new(2, 5.0)];
    let report = analyze(&[], &challengers, 2, 0.0).expect("analyze");
    assert_eq!(
        report.best_selection(),
        Some(&[ItemRef::challenger(0), ItemRef::challenger(0)][..])
    );
}

#[test]
fn infeasible_service_life_is_not_an_error() {
    let defenders = vec![Item::new(2, 1.0)];
    let challengers = vec![Item::new(2, 1.0), Item::new(2, 3.0)];
    let report = analyze(&defenders, &challengers, 5, 0.1).expect("analyze");
    assert!(!report.is_feasible());
    assert!(report.best_selection().is_none());
    assert_eq!(report.minimum_present_worth(), f64::INFINITY);
    assert_eq!(report.combinations_evaluated, 0);
}

#[test]
fn empty_pools_are_infeasible() {
    let report = analyze(&[], &[], 3, 0.1).expect("analyze");
    assert!(!report.is_feasible());
}

#[test]
fn invalid_inputs_are_rejected_before_search() {
    let (defenders, challengers) = spec_fixture();
    assert_eq!(
        analyze(&defenders, &challengers, 3, -1.5),
        Err(AnalysisError::InvalidRate(-1.5))
    );
    assert_eq!(
        analyze(&defenders, &challengers, 3, -1.0),
        Err(AnalysisError::InvalidRate(-1.0))
    );
    assert!(matches!(
        analyze(&defenders, &challengers, 3, f64::NAN),
        Err(AnalysisError::InvalidRate(_))
    ));
    assert_eq!(
        analyze(&defenders, &challengers, 0, 0.1),
        Err(AnalysisError::InvalidPeriod { item: None })
    );

    let bad_period = vec![Item::new(1, 1.0), Item::new(0, 1.0)];
    assert_eq!(
        analyze(&defenders, &bad_period, 3, 0.1),
        Err(AnalysisError::InvalidPeriod {
            item: Some(ItemRef::challenger(1))
        })
    );
    let bad_cost = vec![Item::new(1, f64::INFINITY)];
    assert!(matches!(
        analyze(&bad_cost, &challengers, 3, 0.1),
        Err(AnalysisError::InvalidCost { item, .. }) if item == ItemRef::defender(0)
    ));
}

#[test]
fn rejection_leaves_callers_tracker_untouched() {
    let (defenders, challengers) = spec_fixture();
    let mut tracker = BestTracker::new();
    tracker.consider(&[ItemRef::challenger(0)], 1.0);
    let err = analyze_into(
        &defenders,
        &challengers,
        0,
        0.1,
        &SearchOptions::default(),
        &mut tracker,
    );
    assert!(err.is_err());
    assert_eq!(tracker.minimum(), 1.0);
}

#[test]
fn callers_tracker_is_reset_per_run() {
    let (defenders, challengers) = spec_fixture();
    let mut tracker = BestTracker::new();
    tracker.consider(&[ItemRef::defender(0)], -1_000.0);
    analyze_into(
        &defenders,
        &challengers,
        3,
        0.1,
        &SearchOptions::default(),
        &mut tracker,
    )
    .expect("analyze");
    assert_eq!(tracker.considered(), 3);
    assert_close("pw", tracker.minimum(), 124.342_599_549, 1e-9);
}

#[test]
fn parallel_matches_sequential() {
    let demo = demo_case();
    for life in [3, 7, 12] {
        let case = demo
            .resolve(
                CaseOverrides {
                    service_life: Some(life),
                    rate_percent: Some(8.0),
                },
                10.0,
            )
            .expect("resolve");
        let sequential = case.analyze(&SearchOptions::default()).expect("sequential");
        let parallel = case
            .analyze(&SearchOptions {
                parallel: true,
                ..SearchOptions::default()
            })
            .expect("parallel");
        assert_eq!(parallel, sequential, "life={life}");
    }
}

#[test]
fn parallel_keeps_first_seen_on_ties() {
    // 모든 조합의 현가가 0이므로 첫 샤드(방어안 0)의 첫 조합이 남아야 한다.
    let defenders = vec![Item::new(1, 0.0), Item::new(2, 0.0)];
    let challengers = vec![Item::new(1, 0.0), Item::new(3, 0.0)];
    let options = SearchOptions {
        parallel: true,
        ..SearchOptions::default()
    };
    let report = analyze_with(&defenders, &challengers, 3, 0.1, &options).expect("analyze");
    assert_eq!(
        report.best_selection(),
        Some(&[ItemRef::defender(0), ItemRef::challenger(0), ItemRef::challenger(0)][..])
    );
}

#[test]
fn raised_interrupt_flag_aborts_without_partial_result() {
    let (defenders, challengers) = spec_fixture();
    for parallel in [false, true] {
        let options = SearchOptions {
            parallel,
            deadline: None,
            interrupt: Some(Arc::new(AtomicBool::new(true))),
        };
        assert_eq!(
            analyze_with(&defenders, &challengers, 3, 0.1, &options),
            Err(AnalysisError::Interrupted)
        );
    }
}

#[test]
fn expired_deadline_aborts_large_search() {
    let challengers: Vec<Item> = (1..=8).map(|p| Item::new(p, 1.0)).collect();
    let options = SearchOptions {
        parallel: false,
        deadline: Some(Duration::ZERO),
        interrupt: None,
    };
    assert_eq!(
        analyze_with(&[], &challengers, 60, 0.1, &options),
        Err(AnalysisError::Interrupted)
    );
}

#[test]
fn generous_deadline_does_not_change_result() {
    let (defenders, challengers) = spec_fixture();
    let bounded = SearchOptions {
        parallel: false,
        deadline: Some(Duration::from_secs(60)),
        interrupt: Some(Arc::new(AtomicBool::new(false))),
    };
    assert_eq!(
        analyze_with(&defenders, &challengers, 3, 0.1, &bounded),
        analyze(&defenders, &challengers, 3, 0.1)
    );
}

#[test]
fn service_life_of_a_million_single_year_items() {
    let challengers = vec![Item::new(1, 1.0)];
    let report = analyze(&[], &challengers, 1_000_000, 0.0).expect("analyze");
    assert!(report.is_feasible());
    assert_eq!(report.combinations_evaluated, 1);
    assert_eq!(report.best_selection().map(<[ItemRef]>::len), Some(1_000_000));
    assert_eq!(report.minimum_present_worth(), 1_000_000.0);
}

#[test]
fn period_beyond_i32_range_is_discounted() {
    let life = 3_000_000_000u32;
    let challengers = vec![Item::new(life, 100.0)];
    let report = analyze(&[], &challengers, life, 1e-12).expect("analyze");
    assert!(report.is_feasible());
    // 100 * (1 - e^-0.003) / 1e-12. 1 + 1e-12의 반올림 오차만큼 느슨하게 본다.
    assert_close("pw", report.minimum_present_worth(), 2.995_504_5e11, 1e-3);
}
