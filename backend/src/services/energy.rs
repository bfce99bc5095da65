//! Energy engine service
//!
//! Provides the three energy operations exposed over HTTP:
//! - Calorie target from a profile and goal
//! - Workout calorie estimate from a MET value or exercise name
//! - Energy balance (consumed vs burned) bucketed by day, week or month

use crate::error::ApiError;
use crate::repositories::EnergyDataSource;
use chrono::{DateTime, Utc};
use smart_vitals_shared::types::{
    CalorieTargetRequest, CalorieTargetResponse, EstimateCaloriesRequest,
    EstimateCaloriesResponse,
};
use smart_vitals_shared::validation::{validate_body_profile, validate_met_value, ValidationError};
use smart_vitals_shared::{
    aggregate_energy_balance, backfill_missing_calories, compute_energy_breakdown,
    compute_target, estimate_calories, lookback_range, BodyProfile, CalorieTarget, EnergyBalance,
    GoalSpec, MetTable, Period, WorkoutStatus,
};
use tracing::{debug, info};
use uuid::Uuid;
use validator::Validate;

/// Energy engine service
pub struct EnergyService;

impl EnergyService {
    /// Daily calorie target and macros for an explicit profile and goal
    pub fn get_calorie_target(
        request: &CalorieTargetRequest,
    ) -> Result<CalorieTargetResponse, ApiError> {
        validate_body_profile(&request.profile)?;
        metrics::counter!("calorie_target_requests_total").increment(1);

        Ok(Self::target_response(&request.profile, &request.goal))
    }

    /// Calorie target for the user's stored profile and goal
    pub async fn get_stored_calorie_target(
        data: &dyn EnergyDataSource,
        user_id: Uuid,
    ) -> Result<CalorieTargetResponse, ApiError> {
        let stored = data
            .fetch_body_profile(user_id)
            .await
            .map_err(ApiError::UpstreamFetch)?
            .ok_or_else(|| ApiError::NotFound("Body profile not found".to_string()))?;

        metrics::counter!("calorie_target_requests_total").increment(1);
        let goal = stored.goal.unwrap_or_default();
        Ok(Self::target_response(&stored.profile, &goal))
    }

    fn target_response(profile: &BodyProfile, goal: &GoalSpec) -> CalorieTargetResponse {
        let breakdown = compute_energy_breakdown(profile);
        let target = compute_target(profile, goal);
        let unclamped = (breakdown.tdee + goal.kind.calorie_delta()).round() as i32;

        CalorieTargetResponse {
            bmr: breakdown.bmr,
            tdee: breakdown.tdee,
            activity_multiplier: breakdown.activity_multiplier,
            floor_applied: target.daily_calories > unclamped,
            target,
        }
    }

    /// Estimate calories burned by one workout
    ///
    /// An explicit `met_value` wins; otherwise the exercise name (and category)
    /// is classified with `met_table`.
    pub fn estimate_workout_calories(
        met_table: &MetTable,
        request: &EstimateCaloriesRequest,
    ) -> Result<EstimateCaloriesResponse, ApiError> {
        request.validate()?;

        let met_value = match (request.met_value, request.exercise_name.as_deref()) {
            (Some(met), _) => {
                validate_met_value(met).map_err(|e| ValidationError::new("met_value", &e))?;
                met
            }
            (None, Some(name)) => met_table.met_for(name, request.met_category.as_deref()),
            (None, None) => {
                return Err(ValidationError::new(
                    "met_value",
                    "Either met_value or exercise_name is required",
                )
                .into())
            }
        };

        let calories = estimate_calories(met_value, request.mass_kg, request.duration_minutes);
        metrics::counter!("workout_calories_estimated_total").increment(1);

        Ok(EstimateCaloriesResponse {
            met_value,
            calories,
        })
    }

    /// Consumed vs burned calories for the lookback window of `period`
    ///
    /// Meal logs, completed workouts and the body profile are read
    /// concurrently over the whole range. Workouts missing a calorie figure
    /// are backfilled from the stored body mass before bucketing.
    pub async fn get_energy_balance(
        data: &dyn EnergyDataSource,
        met_table: &MetTable,
        user_id: Uuid,
        period: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<EnergyBalance, ApiError> {
        let period = match period {
            Some(raw) => raw.parse::<Period>()?,
            None => Period::default(),
        };
        metrics::counter!("energy_balance_requests_total", "period" => period.as_str())
            .increment(1);

        let (start, end) = lookback_range(period, now);
        debug!(%user_id, %period, %start, %end, "Fetching energy events");

        let (meals, mut workouts, stored) = tokio::try_join!(
            data.fetch_consumption_events(user_id, start, end),
            data.fetch_expenditure_events(user_id, start, end, Some(WorkoutStatus::Completed)),
            data.fetch_body_profile(user_id),
        )
        .map_err(ApiError::UpstreamFetch)?;

        let backfilled = match &stored {
            Some(stored) => {
                backfill_missing_calories(&mut workouts, met_table, stored.profile.mass_kg)
            }
            None => 0,
        };

        let mut balance = aggregate_energy_balance(period, now, &meals, &workouts);
        balance.daily_target = stored.map(|s| Self::daily_target(&s.profile, s.goal));

        info!(
            %user_id,
            %period,
            meals = meals.len(),
            workouts = workouts.len(),
            backfilled,
            "Energy balance computed"
        );

        Ok(balance)
    }

    fn daily_target(profile: &BodyProfile, goal: Option<GoalSpec>) -> CalorieTarget {
        compute_target(profile, &goal.unwrap_or_default())
    }
}
