//! Body profile repository
//!
//! One row per user holding the body measurements and the active goal.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use smart_vitals_shared::{ActivityLevel, BodyProfile, GoalKind, GoalSpec, Sex, StoredProfile};
use sqlx::PgPool;
use uuid::Uuid;

use super::{decimal_to_f64, to_decimal, to_decimal_opt};

/// Body profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BodyProfileRecord {
    pub user_id: Uuid,
    pub sex: String,
    pub mass_kg: Decimal,
    pub height_cm: Decimal,
    pub age_years: i32,
    pub activity_level: String,
    pub goal_kind: Option<String>,
    pub goal_target_mass_kg: Option<Decimal>,
    pub updated_at: DateTime<Utc>,
}

impl From<BodyProfileRecord> for StoredProfile {
    fn from(record: BodyProfileRecord) -> Self {
        let goal = record.goal_kind.map(|kind| GoalSpec {
            kind: GoalKind::from(kind),
            target_mass_kg: record.goal_target_mass_kg.as_ref().map(decimal_to_f64),
        });

        StoredProfile {
            user_id: record.user_id,
            profile: BodyProfile {
                sex: Sex::from(record.sex),
                mass_kg: decimal_to_f64(&record.mass_kg),
                height_cm: decimal_to_f64(&record.height_cm),
                age_years: record.age_years,
                activity_level: ActivityLevel::parse_lenient(&record.activity_level),
            },
            goal,
            updated_at: record.updated_at,
        }
    }
}

/// Input for upserting a body profile
#[derive(Debug, Clone)]
pub struct UpsertBodyProfile {
    pub user_id: Uuid,
    pub profile: BodyProfile,
    pub goal: Option<GoalSpec>,
}

/// Body profile repository for database operations
pub struct BodyProfileRepository;

impl BodyProfileRepository {
    /// Insert or replace the profile for a user
    pub async fn upsert(pool: &PgPool, input: UpsertBodyProfile) -> Result<BodyProfileRecord> {
        let goal_kind = input.goal.as_ref().map(|g| g.kind.as_str());
        let goal_target = to_decimal_opt(input.goal.as_ref().and_then(|g| g.target_mass_kg))?;

        let record = sqlx::query_as::<_, BodyProfileRecord>(
            r#"
            INSERT INTO body_profiles
                (user_id, sex, mass_kg, height_cm, age_years, activity_level, goal_kind, goal_target_mass_kg)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                sex = EXCLUDED.sex,
                mass_kg = EXCLUDED.mass_kg,
                height_cm = EXCLUDED.height_cm,
                age_years = EXCLUDED.age_years,
                activity_level = EXCLUDED.activity_level,
                goal_kind = EXCLUDED.goal_kind,
                goal_target_mass_kg = EXCLUDED.goal_target_mass_kg,
                updated_at = NOW()
            RETURNING user_id, sex, mass_kg, height_cm, age_years, activity_level,
                      goal_kind, goal_target_mass_kg, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.profile.sex.as_str())
        .bind(to_decimal(input.profile.mass_kg)?)
        .bind(to_decimal(input.profile.height_cm)?)
        .bind(input.profile.age_years)
        .bind(input.profile.activity_level.as_str())
        .bind(goal_kind)
        .bind(goal_target)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get the profile for a user
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<Option<BodyProfileRecord>> {
        let record = sqlx::query_as::<_, BodyProfileRecord>(
            r#"
            SELECT user_id, sex, mass_kg, height_cm, age_years, activity_level,
                   goal_kind, goal_target_mass_kg, updated_at
            FROM body_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}
