//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod data_source;
pub mod meals;
pub mod profiles;
pub mod workouts;

pub use data_source::{EnergyDataSource, InMemoryEnergyDataSource, PgEnergyDataSource};
pub use meals::{CreateMealLog, MealLogRecord, MealLogRepository};
pub use profiles::{BodyProfileRecord, BodyProfileRepository, UpsertBodyProfile};
pub use workouts::{CreateWorkout, WorkoutRecord, WorkoutRepository};

use anyhow::Result;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Convert a request value to a NUMERIC(.., 2) column value
pub(crate) fn to_decimal(value: f64) -> Result<Decimal> {
    Decimal::try_from(value)
        .map(|d| d.round_dp(2))
        .map_err(|_| anyhow::anyhow!("{} cannot be stored as a decimal", value))
}

pub(crate) fn to_decimal_opt(value: Option<f64>) -> Result<Option<Decimal>> {
    value.map(to_decimal).transpose()
}

pub(crate) fn decimal_to_f64(value: &Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
