//! Integration tests for the recommendation evaluator
//!
//! Covers:
//! - Threshold boundaries for every rule
//! - Fixed advisory order and the all-clear fallback
//! - Exactly-once audit writes and isolation from audit failures
//! - Properties over arbitrary snapshots

use chrono::NaiveDate;
use health_monitor_core::engine::rules::{
    sleep_advice, ALL_CLEAR_ADVICE, HIGH_HEART_RATE_ADVICE, LOW_HEART_RATE_ADVICE, STEPS_ADVICE,
    WATER_ADVICE,
};
use health_monitor_core::repository::RecommendationAuditWriter;
use health_monitor_core::{
    AdvisoryKind, HealthMetricsSnapshot, RecommendationEvaluator, RecordId, StoreError, StoreResult,
};
use mockall::mock;
use proptest::prelude::*;
use std::sync::Arc;

mock! {
    pub AuditSink {}

    impl RecommendationAuditWriter for AuditSink {
        fn record(&self, user_id: RecordId, text: &str, date: NaiveDate) -> StoreResult<()>;
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn snapshot(heart_rate: i32, steps: i32, water: f64, sleep: f64) -> HealthMetricsSnapshot {
    HealthMetricsSnapshot {
        user_id: 7,
        heart_rate,
        steps,
        water_intake_oz: water,
        hours_of_sleep: sleep,
        date: day(),
    }
}

/// Evaluator whose sink accepts any number of writes
fn evaluator() -> RecommendationEvaluator {
    let mut sink = MockAuditSink::new();
    sink.expect_record().returning(|_, _, _| Ok(()));
    RecommendationEvaluator::new(Arc::new(sink))
}

fn kinds(heart_rate: i32, steps: i32, water: f64, sleep: f64) -> Vec<AdvisoryKind> {
    evaluator()
        .evaluate(&snapshot(heart_rate, steps, water, sleep))
        .iter()
        .map(|a| a.kind)
        .collect()
}

#[test]
fn test_everything_fires_in_fixed_order() {
    let list = evaluator().evaluate(&snapshot(110, 5_000, 50.0, 5.0));

    assert_eq!(
        list.messages(),
        vec![
            HIGH_HEART_RATE_ADVICE,
            STEPS_ADVICE,
            WATER_ADVICE,
            sleep_advice().as_str(),
        ]
    );
}

#[test]
fn test_healthy_day_gets_single_fallback() {
    let list = evaluator().evaluate(&snapshot(70, 12_000, 70.0, 8.0));
    assert_eq!(list.messages(), vec![ALL_CLEAR_ADVICE]);
    assert_eq!(ALL_CLEAR_ADVICE, "No recommendations at this time. You're doing great!");
}

#[test]
fn test_heart_rate_boundaries() {
    assert_eq!(kinds(59, 12_000, 70.0, 8.0), vec![AdvisoryKind::LowHeartRate]);
    assert_eq!(kinds(60, 12_000, 70.0, 8.0), vec![AdvisoryKind::AllClear]);
    assert_eq!(kinds(100, 12_000, 70.0, 8.0), vec![AdvisoryKind::AllClear]);
    assert_eq!(kinds(101, 12_000, 70.0, 8.0), vec![AdvisoryKind::HighHeartRate]);
}

#[test]
fn test_steps_water_sleep_boundaries() {
    assert_eq!(kinds(70, 9_999, 70.0, 8.0), vec![AdvisoryKind::LowSteps]);
    assert_eq!(kinds(70, 10_000, 70.0, 8.0), vec![AdvisoryKind::AllClear]);

    assert_eq!(kinds(70, 12_000, 63.9, 8.0), vec![AdvisoryKind::LowWaterIntake]);
    assert_eq!(kinds(70, 12_000, 64.0, 8.0), vec![AdvisoryKind::AllClear]);

    assert_eq!(kinds(70, 12_000, 70.0, 6.9), vec![AdvisoryKind::LowSleep]);
    assert_eq!(kinds(70, 12_000, 70.0, 7.0), vec![AdvisoryKind::AllClear]);
}

#[test]
fn test_out_of_range_values_are_evaluated_as_is() {
    assert_eq!(
        kinds(-20, -100, -1.0, -3.0),
        vec![
            AdvisoryKind::LowHeartRate,
            AdvisoryKind::LowSteps,
            AdvisoryKind::LowWaterIntake,
            AdvisoryKind::LowSleep,
        ]
    );
}

#[test]
fn test_low_heart_rate_message() {
    let list = evaluator().evaluate(&snapshot(45, 12_000, 70.0, 8.0));
    assert_eq!(list.messages(), vec![LOW_HEART_RATE_ADVICE]);
}

#[test]
fn test_audit_written_once_with_joined_text() {
    let expected = format!("{}, {}", STEPS_ADVICE, WATER_ADVICE);

    let mut sink = MockAuditSink::new();
    sink.expect_record()
        .times(1)
        .withf(move |user_id, text, date| *user_id == 7 && text == expected && *date == day())
        .returning(|_, _, _| Ok(()));

    let evaluator = RecommendationEvaluator::new(Arc::new(sink));
    let list = evaluator.evaluate(&snapshot(75, 3_000, 20.0, 7.5));
    assert_eq!(list.len(), 2);
}

#[test]
fn test_audit_written_for_fallback() {
    let mut sink = MockAuditSink::new();
    sink.expect_record()
        .times(1)
        .withf(|_, text, _| text == ALL_CLEAR_ADVICE)
        .returning(|_, _, _| Ok(()));

    RecommendationEvaluator::new(Arc::new(sink)).evaluate(&snapshot(70, 12_000, 70.0, 8.0));
}

#[test]
fn test_audit_failure_is_swallowed() {
    let mut sink = MockAuditSink::new();
    sink.expect_record()
        .times(1)
        .returning(|_, _, _| Err(StoreError::unavailable("connection refused")));

    let evaluator = RecommendationEvaluator::new(Arc::new(sink));
    let list = evaluator.evaluate(&snapshot(110, 5_000, 50.0, 5.0));

    assert_eq!(list.len(), 4);
    assert_eq!(list.as_slice()[0].kind, AdvisoryKind::HighHeartRate);
}

#[test]
fn test_analyze_does_not_write_audit() {
    let mut sink = MockAuditSink::new();
    sink.expect_record().never();

    let evaluator = RecommendationEvaluator::new(Arc::new(sink));
    assert_eq!(evaluator.analyze(&snapshot(110, 5_000, 50.0, 5.0)).len(), 4);
}

fn canonical_rank(kind: AdvisoryKind) -> usize {
    match kind {
        AdvisoryKind::LowHeartRate | AdvisoryKind::HighHeartRate => 0,
        AdvisoryKind::LowSteps => 1,
        AdvisoryKind::LowWaterIntake => 2,
        AdvisoryKind::LowSleep => 3,
        AdvisoryKind::AllClear => 4,
    }
}

proptest! {
    #[test]
    fn prop_healthy_ranges_yield_fallback(
        heart_rate in 60i32..=100,
        steps in 10_000i32..100_000,
        water in 64.0f64..500.0,
        sleep in 7.0f64..24.0,
    ) {
        let list = evaluator().analyze(&snapshot(heart_rate, steps, water, sleep));
        prop_assert_eq!(list.messages(), vec![ALL_CLEAR_ADVICE]);
    }

    #[test]
    fn prop_order_is_fixed_and_list_never_empty(
        heart_rate in any::<i32>(),
        steps in any::<i32>(),
        water in -1_000.0f64..1_000.0,
        sleep in -24.0f64..48.0,
    ) {
        let list = evaluator().analyze(&snapshot(heart_rate, steps, water, sleep));
        prop_assert!(!list.is_empty());

        let ranks: Vec<usize> = list.iter().map(|a| canonical_rank(a.kind)).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] < w[1]));

        let heart_rate_advisories = list
            .iter()
            .filter(|a| matches!(a.kind, AdvisoryKind::LowHeartRate | AdvisoryKind::HighHeartRate))
            .count();
        prop_assert!(heart_rate_advisories <= 1);

        if list.is_all_clear() {
            prop_assert_eq!(list.len(), 1);
        } else {
            prop_assert!(list.iter().all(|a| a.kind != AdvisoryKind::AllClear));
        }
    }

    #[test]
    fn prop_audit_failure_never_changes_result(
        heart_rate in 0i32..200,
        steps in 0i32..20_000,
        water in 0.0f64..128.0,
        sleep in 0.0f64..12.0,
    ) {
        let mut broken = MockAuditSink::new();
        broken.expect_record().returning(|_, _, _| Err(StoreError::unavailable("down")));
        let failing = RecommendationEvaluator::new(Arc::new(broken));

        let input = snapshot(heart_rate, steps, water, sleep);
        prop_assert_eq!(failing.evaluate(&input), evaluator().evaluate(&input));
    }
}
