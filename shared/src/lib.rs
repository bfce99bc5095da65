//! Smart Vitals Shared Library
//!
//! This crate contains the energy engine (BMR/TDEE, calorie targets, MET
//! estimation, energy-balance aggregation) together with the models and API
//! types shared by the backend and WASM modules.

pub mod aggregation;
pub mod errors;
pub mod expenditure;
pub mod health_metrics;
pub mod models;
pub mod targets;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use aggregation::{
    aggregate_energy_balance, lookback_range, plan_buckets, AggregationBucket, EnergyBalance,
    EnergyBalanceSummary, Period,
};
pub use errors::*;
pub use expenditure::{backfill_missing_calories, estimate_calories, MetRule, MetTable};
pub use health_metrics::*;
pub use models::{ConsumptionEvent, ExpenditureEvent, Macros, StoredProfile, WorkoutStatus};
pub use targets::{compute_target, CalorieTarget, GoalKind, GoalSpec};
