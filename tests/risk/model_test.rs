//! Single-account risk scoring.

use spinwheel::risk::model::{
    content_penalty, effective_usage, load_penalty, speed_penalty,
};
use spinwheel::risk::{evaluate_at, HealthLevel, RiskInput};

const NOW: i64 = 1_700_000_000;
const HOUR: i64 = 3600;

fn input(planned: u64, delay: f64, variations: u64, limit: u64) -> RiskInput {
    RiskInput {
        planned_messages: planned,
        average_delay_secs: delay,
        content_variation_score: variations,
        daily_limit: limit,
        messages_used_last_24h: 0.0,
        last_activity: None,
    }
}

#[test]
fn moderate_batch_scores_low() {
    let breakdown = evaluate_at(&input(10, 60.0, 5, 20), NOW);

    // (20 load + 0 speed + 4 content) * 0.9 = 21.6
    assert_eq!(breakdown.total_risk, 21);
    assert_eq!(breakdown.load_penalty, 18);
    assert_eq!(breakdown.speed_penalty, 0);
    assert_eq!(breakdown.content_penalty, 3);
    assert!((breakdown.bonus_factor - 0.9).abs() < f64::EPSILON);
    assert_eq!(breakdown.health(), 79);
    assert_eq!(breakdown.level(), HealthLevel::Caution);
}

#[test]
fn overload_at_bot_speed_clamps_to_ceiling() {
    let breakdown = evaluate_at(&input(50, 5.0, 0, 20), NOW);

    // (100 + 74 + 20) * 1.3 = 252.2
    assert_eq!(breakdown.total_risk, 100);
    assert_eq!(breakdown.load_penalty, 130);
    assert_eq!(breakdown.speed_penalty, 96);
    assert_eq!(breakdown.content_penalty, 26);
    assert!((breakdown.bonus_factor - 1.3).abs() < f64::EPSILON);
    assert_eq!(breakdown.health(), 0);
    assert_eq!(breakdown.level(), HealthLevel::Danger);
}

#[test]
fn unlimited_accounts_carry_no_load_penalty() {
    let mut heavy = input(10_000, 120.0, 10, 0);
    heavy.messages_used_last_24h = 50_000.0;

    let breakdown = evaluate_at(&heavy, NOW);

    assert_eq!(breakdown.load_penalty, 0);
    assert_eq!(breakdown.speed_penalty, 0);
    // 20 / 10 = 2, times 1.3
    assert_eq!(breakdown.total_risk, 2);
}

#[test]
fn load_penalty_is_quadratic_until_lethal_ratio() {
    assert!((load_penalty(10.0, 20) - 20.0).abs() < 1e-9);
    assert!((load_penalty(20.0, 20) - 80.0).abs() < 1e-9);

    let at_threshold = load_penalty(24.0, 20);
    assert!(at_threshold > 115.0 && at_threshold < 115.3);

    assert!((load_penalty(25.0, 20) - 100.0).abs() < f64::EPSILON);
    assert!(load_penalty(1_000.0, 0).abs() < f64::EPSILON);
}

#[test]
fn speed_penalties_are_additive() {
    assert!(speed_penalty(60.0).abs() < f64::EPSILON);
    assert!(speed_penalty(120.0).abs() < f64::EPSILON);
    assert!((speed_penalty(10.0) - 40.0).abs() < 1e-9);
    assert!((speed_penalty(5.0) - 74.0).abs() < 1e-9);
    assert!((speed_penalty(0.0) - 78.0).abs() < 1e-9);
}

#[test]
fn content_penalty_guards_zero_score() {
    assert!((content_penalty(0) - 20.0).abs() < f64::EPSILON);
    assert!((content_penalty(1) - 20.0).abs() < f64::EPSILON);
    assert!((content_penalty(4) - 5.0).abs() < f64::EPSILON);
}

#[test]
fn usage_decays_linearly_over_a_day() {
    assert!((effective_usage(10.0, None, NOW) - 10.0).abs() < f64::EPSILON);
    assert!((effective_usage(10.0, Some(NOW), NOW) - 10.0).abs() < f64::EPSILON);
    assert!((effective_usage(10.0, Some(NOW - 12 * HOUR), NOW) - 5.0).abs() < 1e-9);
    assert!((effective_usage(10.0, Some(NOW - 18 * HOUR), NOW) - 2.5).abs() < 1e-9);
    assert!(effective_usage(10.0, Some(NOW - 24 * HOUR), NOW).abs() < f64::EPSILON);
    assert!(effective_usage(10.0, Some(NOW - 72 * HOUR), NOW).abs() < f64::EPSILON);
}

#[test]
fn zero_usage_skips_decay() {
    assert!(effective_usage(0.0, Some(NOW - HOUR), NOW).abs() < f64::EPSILON);
}

#[test]
fn decay_lowers_risk_for_idle_accounts() {
    let mut busy = input(10, 60.0, 5, 20);
    busy.messages_used_last_24h = 10.0;
    busy.last_activity = Some(NOW - HOUR);

    let mut idle = busy.clone();
    idle.last_activity = Some(NOW - 30 * HOUR);

    let busy_risk = evaluate_at(&busy, NOW).total_risk;
    let idle_risk = evaluate_at(&idle, NOW).total_risk;

    assert!(busy_risk > idle_risk, "{busy_risk} should exceed {idle_risk}");
    assert_eq!(idle_risk, 21);
}

#[test]
fn small_batches_are_discounted() {
    let small = evaluate_at(&input(3, 30.0, 1, 100), NOW);
    let large = evaluate_at(&input(41, 30.0, 1, 100), NOW);
    assert!((small.bonus_factor - 0.4).abs() < f64::EPSILON);
    assert!((large.bonus_factor - 1.3).abs() < f64::EPSILON);
    assert!(small.total_risk < large.total_risk);
}

#[test]
fn breakdown_serializes_snake_case() {
    let json = serde_json::to_value(evaluate_at(&input(10, 60.0, 5, 20), NOW)).expect("serialize");
    assert_eq!(json["total_risk"], 21);
    assert_eq!(json["load_penalty"], 18);
}
