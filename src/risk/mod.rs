//! Account risk scoring and the fleet launch gate.
//!
//! [`model`] scores one account; [`fleet`] spreads a batch over several
//! accounts and lets the worst one decide whether the launch may proceed.

pub mod fleet;
pub mod model;

pub use fleet::{
    assess_fleet, fleet_health, per_account_load, requires_confirmation, AccountAssessment,
    DelayMode, FleetAssessment, LaunchPlan, SendingAccount,
};
pub use model::{evaluate, evaluate_at, HealthLevel, RiskBreakdown, RiskInput};
