//! Launch gate across a set of sending accounts.
//!
//! Risky recipients are split evenly over the selected accounts, each
//! account is scored with its own limit and recent usage, and the worst
//! account decides the fleet's health.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::model::{evaluate_at, HealthLevel, RiskBreakdown, RiskInput, MAX_RISK};

/// Fleet health below which a launch needs explicit confirmation.
pub const DEFAULT_CONFIRM_BELOW_HEALTH: u32 = 50;

/// Delay used when the sending tool picks its own timing.
pub const DEFAULT_AUTO_DELAY_SECS: f64 = 45.0;

/// A sending account as the launch gate sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendingAccount {
    /// Account identifier, for reporting.
    pub id: String,
    /// Daily sending limit. Zero means unlimited.
    #[serde(default)]
    pub daily_limit: u64,
    /// Messages sent in the last 24 hours.
    #[serde(default)]
    pub used_last_24h: f64,
    /// Unix timestamp (seconds) of the last activity.
    #[serde(default)]
    pub last_activity: Option<i64>,
}

/// How the delay between messages is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum DelayMode {
    /// Random delay drawn from a configured range.
    Fixed {
        /// Shortest delay, in seconds.
        min_secs: f64,
        /// Longest delay, in seconds.
        max_secs: f64,
    },
    /// The sender picks timing automatically.
    Automatic {
        /// Average delay assumed for automatic timing.
        delay_secs: f64,
    },
}

impl DelayMode {
    /// Average delay the model should assume.
    pub fn average_delay(self) -> f64 {
        match self {
            Self::Fixed { min_secs, max_secs } => (min_secs + max_secs) / 2.0,
            Self::Automatic { delay_secs } => delay_secs,
        }
    }
}

/// The batch about to be launched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchPlan {
    /// Recipients not contacted before.
    pub risky_recipients: u64,
    /// Timing of the sends.
    pub delay: DelayMode,
    /// Content diversity of the message template.
    pub content_variation_score: u64,
    /// Fleet health below which the launch must be confirmed.
    pub confirm_below_health: u32,
}

/// One account's share of the plan and its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountAssessment {
    /// Account identifier.
    pub account_id: String,
    /// Messages assigned to this account.
    pub planned_messages: u64,
    /// Full score breakdown.
    pub breakdown: RiskBreakdown,
    /// `100 - total_risk`.
    pub health: u32,
}

/// Outcome of the launch gate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetAssessment {
    /// Per-account results in input order.
    pub accounts: Vec<AccountAssessment>,
    /// Worst health across accounts; full health when no account is selected.
    pub fleet_health: u32,
    /// Whether the launch must wait for explicit user confirmation.
    pub requires_confirmation: bool,
}

/// Messages each of `account_count` accounts sends for `risky_recipients`.
pub fn per_account_load(risky_recipients: u64, account_count: usize) -> u64 {
    match u64::try_from(account_count) {
        Ok(0) | Err(_) => 0,
        Ok(count) => risky_recipients.div_ceil(count),
    }
}

/// Worst health in `healths`, or `None` for an empty set.
pub fn fleet_health(healths: &[u32]) -> Option<u32> {
    healths.iter().copied().min()
}

/// Whether a fleet at `health` needs confirmation before launching.
pub fn requires_confirmation(health: u32, confirm_below: u32) -> bool {
    health < confirm_below
}

/// Score every account for `plan` as of `now` (Unix seconds).
pub fn assess_fleet(accounts: &[SendingAccount], plan: &LaunchPlan, now: i64) -> FleetAssessment {
    let planned_messages = per_account_load(plan.risky_recipients, accounts.len());
    let average_delay_secs = plan.delay.average_delay();

    let assessed: Vec<AccountAssessment> = accounts
        .iter()
        .map(|account| {
            let breakdown = evaluate_at(
                &RiskInput {
                    planned_messages,
                    average_delay_secs,
                    content_variation_score: plan.content_variation_score,
                    daily_limit: account.daily_limit,
                    messages_used_last_24h: account.used_last_24h,
                    last_activity: account.last_activity,
                },
                now,
            );
            let health = breakdown.health();
            debug!(
                account = %account.id,
                health,
                level = breakdown.level().label(),
                total_risk = breakdown.total_risk,
                "account scored"
            );
            AccountAssessment {
                account_id: account.id.clone(),
                planned_messages,
                breakdown,
                health,
            }
        })
        .collect();

    let healths: Vec<u32> = assessed.iter().map(|a| a.health).collect();
    let health = fleet_health(&healths).unwrap_or(MAX_RISK);
    let gated = requires_confirmation(health, plan.confirm_below_health);

    info!(
        accounts = assessed.len(),
        fleet_health = health,
        level = HealthLevel::from_health(health).label(),
        requires_confirmation = gated,
        "fleet assessed"
    );

    FleetAssessment {
        accounts: assessed,
        fleet_health: health,
        requires_confirmation: gated,
    }
}
