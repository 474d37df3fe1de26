//! Deterministic risk score for one sending account.
//!
//! Three penalties (projected load against the daily limit, sending speed,
//! and content diversity) are summed and scaled by a factor that depends on
//! the size of the newly planned batch. Recent usage decays linearly to
//! zero over the 24 hours after the account's last activity.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Ceiling of the risk scale.
pub const MAX_RISK: u32 = 100;

/// Load ratio above which the load penalty jumps to its ceiling.
const LETHAL_LOAD_RATIO: f64 = 1.2;
const LOAD_PENALTY_SCALE: f64 = 80.0;
const LETHAL_LOAD_PENALTY: f64 = 100.0;

/// Delays below this many seconds are penalised.
const SAFE_DELAY_SECS: f64 = 60.0;
const SPEED_PENALTY_PER_SEC: f64 = 0.8;
/// Delays below this many seconds look like a bot.
const BOT_DELAY_SECS: f64 = 10.0;
const BOT_SPEED_PENALTY: f64 = 30.0;

const CONTENT_PENALTY: f64 = 20.0;

const DECAY_WINDOW_HOURS: f64 = 24.0;
const SECS_PER_HOUR: f64 = 3600.0;

/// Everything the model needs to know about one account and one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInput {
    /// Messages about to be sent from this account.
    pub planned_messages: u64,
    /// Average delay between messages, in seconds.
    pub average_delay_secs: f64,
    /// How varied the message content is; usually the template's variation count.
    pub content_variation_score: u64,
    /// Daily sending limit. Zero means unlimited.
    pub daily_limit: u64,
    /// Messages sent in the last 24 hours.
    pub messages_used_last_24h: f64,
    /// Unix timestamp (seconds) of the account's last activity.
    pub last_activity: Option<i64>,
}

/// Score and the components it was built from.
///
/// Component penalties are reported after the bonus factor and floored, so
/// they do not necessarily sum to `total_risk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    /// Overall risk, 0 to 100.
    pub total_risk: u32,
    /// Penalty for projected load against the daily limit.
    pub load_penalty: u32,
    /// Penalty for short delays between messages.
    pub speed_penalty: u32,
    /// Penalty for low content diversity.
    pub content_penalty: u32,
    /// Multiplier applied for the planned batch size.
    pub bonus_factor: f64,
}

impl RiskBreakdown {
    /// Health score, `100 - total_risk`.
    pub fn health(&self) -> u32 {
        MAX_RISK.saturating_sub(self.total_risk)
    }

    /// Display band for [`health`](Self::health).
    pub fn level(&self) -> HealthLevel {
        HealthLevel::from_health(self.health())
    }
}

/// Coarse health band for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthLevel {
    /// Health of 80 or more.
    Good,
    /// Health from 50 up to 80.
    Caution,
    /// Health below 50.
    Danger,
}

impl HealthLevel {
    /// Band a health score.
    pub fn from_health(health: u32) -> Self {
        match health {
            80.. => Self::Good,
            50..=79 => Self::Caution,
            _ => Self::Danger,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Caution => "caution",
            Self::Danger => "danger",
        }
    }
}

/// Score `input` against the current wall-clock time.
pub fn evaluate(input: &RiskInput) -> RiskBreakdown {
    evaluate_at(input, Utc::now().timestamp())
}

/// Score `input` as of `now` (Unix seconds).
#[allow(clippy::cast_precision_loss)] // message counts are far below 2^52
pub fn evaluate_at(input: &RiskInput, now: i64) -> RiskBreakdown {
    let used = effective_usage(input.messages_used_last_24h, input.last_activity, now);
    let projected = used + input.planned_messages as f64;

    let load = load_penalty(projected, input.daily_limit);
    let speed = speed_penalty(input.average_delay_secs);
    let content = content_penalty(input.content_variation_score);
    let bonus = bonus_factor(input.planned_messages);

    let raw = (load + speed + content) * bonus;

    RiskBreakdown {
        total_risk: floor_u32(raw).min(MAX_RISK),
        load_penalty: floor_u32(load * bonus),
        speed_penalty: floor_u32(speed * bonus),
        content_penalty: floor_u32(content * bonus),
        bonus_factor: bonus,
    }
}

/// Recent usage after linear decay since the last activity.
#[allow(clippy::cast_precision_loss)] // elapsed seconds only need hour precision
pub fn effective_usage(used: f64, last_activity: Option<i64>, now: i64) -> f64 {
    let Some(last) = last_activity else {
        return used;
    };
    if used <= 0.0 {
        return used;
    }

    let elapsed_hours = now.saturating_sub(last) as f64 / SECS_PER_HOUR;
    if elapsed_hours >= DECAY_WINDOW_HOURS {
        return 0.0;
    }
    used * (1.0 - elapsed_hours / DECAY_WINDOW_HOURS).max(0.0)
}

/// Penalty for `projected` messages against `daily_limit` (0 = unlimited).
#[allow(clippy::cast_precision_loss)] // daily limits are small enough for f64
pub fn load_penalty(projected: f64, daily_limit: u64) -> f64 {
    if daily_limit == 0 {
        return 0.0;
    }
    let ratio = projected / daily_limit as f64;
    if ratio > LETHAL_LOAD_RATIO {
        LETHAL_LOAD_PENALTY
    } else {
        ratio * ratio * LOAD_PENALTY_SCALE
    }
}

/// Penalty for an average delay of `delay_secs` between messages.
pub fn speed_penalty(delay_secs: f64) -> f64 {
    let mut penalty = 0.0;
    if delay_secs < SAFE_DELAY_SECS {
        penalty += (SAFE_DELAY_SECS - delay_secs) * SPEED_PENALTY_PER_SEC;
    }
    if delay_secs < BOT_DELAY_SECS {
        penalty += BOT_SPEED_PENALTY;
    }
    penalty
}

/// Penalty for content diversity; a score of zero gets the full penalty.
#[allow(clippy::cast_precision_loss)] // large scores round toward a zero penalty anyway
pub fn content_penalty(variation_score: u64) -> f64 {
    if variation_score == 0 {
        CONTENT_PENALTY
    } else {
        CONTENT_PENALTY / variation_score as f64
    }
}

/// Multiplier for the size of the planned batch.
pub fn bonus_factor(planned_messages: u64) -> f64 {
    match planned_messages {
        0..=3 => 0.4,
        4..=7 => 0.7,
        8..=15 => 0.9,
        16..=40 => 1.0,
        _ => 1.3,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn floor_u32(value: f64) -> u32 {
    // `as` saturates: NaN maps to 0 and anything past u32::MAX to u32::MAX.
    value.floor() as u32
}
