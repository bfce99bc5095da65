//! Read seam for the energy balance engine
//!
//! The engine only needs three reads: meal logs and workouts in a time range,
//! and the user's stored profile. `PgEnergyDataSource` serves them from
//! PostgreSQL; `InMemoryEnergyDataSource` serves fixed data for tests and
//! local tooling.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use smart_vitals_shared::{ConsumptionEvent, ExpenditureEvent, StoredProfile, WorkoutStatus};
use sqlx::PgPool;
use uuid::Uuid;

use super::{BodyProfileRepository, MealLogRepository, WorkoutRepository};

/// Source of the events and profile the energy engine aggregates
#[async_trait]
pub trait EnergyDataSource: Send + Sync {
    /// Meal logs with `start <= timestamp <= end`
    async fn fetch_consumption_events(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ConsumptionEvent>>;

    /// Workouts with `start <= timestamp <= end`, optionally in one status
    async fn fetch_expenditure_events(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: Option<WorkoutStatus>,
    ) -> Result<Vec<ExpenditureEvent>>;

    async fn fetch_body_profile(&self, user_id: Uuid) -> Result<Option<StoredProfile>>;
}

/// PostgreSQL-backed data source
#[derive(Clone)]
pub struct PgEnergyDataSource {
    pool: PgPool,
}

impl PgEnergyDataSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnergyDataSource for PgEnergyDataSource {
    async fn fetch_consumption_events(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ConsumptionEvent>> {
        let records = MealLogRepository::get_by_date_range(&self.pool, user_id, start, end).await?;
        Ok(records.into_iter().map(ConsumptionEvent::from).collect())
    }

    async fn fetch_expenditure_events(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: Option<WorkoutStatus>,
    ) -> Result<Vec<ExpenditureEvent>> {
        let records =
            WorkoutRepository::get_by_date_range(&self.pool, user_id, start, end, status).await?;
        records.into_iter().map(ExpenditureEvent::try_from).collect()
    }

    async fn fetch_body_profile(&self, user_id: Uuid) -> Result<Option<StoredProfile>> {
        let record = BodyProfileRepository::get(&self.pool, user_id).await?;
        Ok(record.map(StoredProfile::from))
    }
}

/// Fixed, immutable data source
#[derive(Debug, Clone, Default)]
pub struct InMemoryEnergyDataSource {
    meals: Vec<ConsumptionEvent>,
    workouts: Vec<ExpenditureEvent>,
    profiles: Vec<StoredProfile>,
    unavailable: bool,
}

impl InMemoryEnergyDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meals(mut self, meals: Vec<ConsumptionEvent>) -> Self {
        self.meals.extend(meals);
        self
    }

    pub fn with_workouts(mut self, workouts: Vec<ExpenditureEvent>) -> Self {
        self.workouts.extend(workouts);
        self
    }

    pub fn with_profile(mut self, profile: StoredProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Every read fails, as if the store were unreachable
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable {
            anyhow::bail!("data source unavailable");
        }
        Ok(())
    }
}

#[async_trait]
impl EnergyDataSource for InMemoryEnergyDataSource {
    async fn fetch_consumption_events(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ConsumptionEvent>> {
        self.check_available()?;
        Ok(self
            .meals
            .iter()
            .filter(|m| m.user_id == user_id && start <= m.timestamp_utc && m.timestamp_utc <= end)
            .cloned()
            .collect())
    }

    async fn fetch_expenditure_events(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: Option<WorkoutStatus>,
    ) -> Result<Vec<ExpenditureEvent>> {
        self.check_available()?;
        Ok(self
            .workouts
            .iter()
            .filter(|w| w.user_id == user_id && start <= w.timestamp_utc && w.timestamp_utc <= end)
            .filter(|w| status.map_or(true, |s| w.status == s))
            .cloned()
            .collect())
    }

    async fn fetch_body_profile(&self, user_id: Uuid) -> Result<Option<StoredProfile>> {
        self.check_available()?;
        Ok(self.profiles.iter().find(|p| p.user_id == user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn workout(user_id: Uuid, at: DateTime<Utc>, status: WorkoutStatus) -> ExpenditureEvent {
        ExpenditureEvent {
            id: Uuid::new_v4(),
            user_id,
            timestamp_utc: at,
            exercise_name: "Swim".to_string(),
            met_category: None,
            status,
            duration_minutes: 45.0,
            calories_burned: None,
        }
    }

    #[tokio::test]
    async fn test_in_memory_filters_status_and_range() {
        let user_id = Uuid::new_v4();
        let start = Utc.with_ymd_and_hms(2026, 10, 13, 0, 0, 0).unwrap();
        let end = start + Duration::days(7) - Duration::nanoseconds(1);

        let source = InMemoryEnergyDataSource::new().with_workouts(vec![
            workout(user_id, start, WorkoutStatus::Completed),
            workout(user_id, end, WorkoutStatus::Planned),
            workout(user_id, end + Duration::nanoseconds(1), WorkoutStatus::Completed),
            workout(Uuid::new_v4(), start, WorkoutStatus::Completed),
        ]);

        let all = source
            .fetch_expenditure_events(user_id, start, end, None)
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let completed = source
            .fetch_expenditure_events(user_id, start, end, Some(WorkoutStatus::Completed))
            .await
            .unwrap();
        assert_eq!(completed.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_source_fails() {
        let source = InMemoryEnergyDataSource::unavailable();
        assert!(source.fetch_body_profile(Uuid::new_v4()).await.is_err());
    }
}
