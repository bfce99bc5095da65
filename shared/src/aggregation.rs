//! Energy balance aggregation
//!
//! Buckets meal logs and completed workouts into daily, weekly or monthly
//! periods and reports consumed, burned and net calories per bucket plus a
//! summary over the whole range.
//!
//! All three periods go through [`plan_buckets`], so they share the same
//! boundary rules: buckets are contiguous, most recent last, and each covers
//! `[start_utc, end_utc]` inclusive where `end_utc` is the last instant
//! before the next bucket begins.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::VitalsError;
use crate::models::{ConsumptionEvent, ExpenditureEvent};
use crate::targets::CalorieTarget;

/// Aggregation period requested by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

/// Size of one bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSpan {
    /// A fixed number of calendar days
    Days(u32),
    /// One full calendar month
    CalendarMonth,
}

impl Period {
    /// Number of buckets in the lookback window
    pub fn bucket_count(&self) -> u32 {
        match self {
            Period::Daily => 7,
            Period::Weekly => 4,
            Period::Monthly => 6,
        }
    }

    pub fn span(&self) -> BucketSpan {
        match self {
            Period::Daily => BucketSpan::Days(1),
            Period::Weekly => BucketSpan::Days(7),
            Period::Monthly => BucketSpan::CalendarMonth,
        }
    }

    /// Whether buckets report per-day averages
    pub fn reports_daily_average(&self) -> bool {
        !matches!(self, Period::Daily)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Daily => "daily",
            Period::Weekly => "weekly",
            Period::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Period::Daily),
            "weekly" => Ok(Period::Weekly),
            "monthly" => Ok(Period::Monthly),
            other => Err(VitalsError::validation(format!(
                "Invalid period '{}'. Must be one of: daily, weekly, monthly",
                other
            ))),
        }
    }
}

/// Time window of one bucket, before any events are assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketWindow {
    pub label: String,
    pub start_utc: DateTime<Utc>,
    /// Inclusive end: one nanosecond before the next window starts
    pub end_utc: DateTime<Utc>,
    pub days: u32,
}

impl BucketWindow {
    fn new(period: Period, first_day: NaiveDate, next_first_day: NaiveDate) -> Self {
        let start_utc = start_of_day(first_day);
        let end_utc = start_of_day(next_first_day) - Duration::nanoseconds(1);
        let days = (next_first_day - first_day).num_days() as u32;

        let label = match period {
            Period::Daily => first_day.format("%Y-%m-%d").to_string(),
            Period::Weekly => format!(
                "{} to {}",
                first_day.format("%Y-%m-%d"),
                (next_first_day - Duration::days(1)).format("%Y-%m-%d")
            ),
            Period::Monthly => first_day.format("%b %Y").to_string(),
        };

        Self {
            label,
            start_utc,
            end_utc,
            days,
        }
    }

    /// Inclusive on both ends
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start_utc <= at && at <= self.end_utc
    }
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Plan the lookback windows for a period, oldest first
///
/// Day-sized spans end with the UTC calendar day containing `now`; calendar
/// months end with the month containing `now` (the whole month, including days
/// after `now`).
pub fn plan_buckets(period: Period, now: DateTime<Utc>) -> Vec<BucketWindow> {
    let today = now.date_naive();
    let tomorrow = today + Duration::days(1);
    let this_month = today - Duration::days(today.day0() as i64);

    (0..period.bucket_count())
        .rev()
        .map(|offset| {
            let (first_day, next_first_day) = match period.span() {
                BucketSpan::Days(size) => {
                    let next = tomorrow - Duration::days((offset * size) as i64);
                    (next - Duration::days(size as i64), next)
                }
                BucketSpan::CalendarMonth => {
                    let first = this_month - Months::new(offset);
                    (first, first + Months::new(1))
                }
            };
            BucketWindow::new(period, first_day, next_first_day)
        })
        .collect()
}

/// Consumed vs burned calories for one bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationBucket {
    pub period_label: String,
    pub start_utc: DateTime<Utc>,
    pub end_utc: DateTime<Utc>,
    pub consumed: f64,
    pub burned: f64,
    pub net: f64,
    pub consumption_event_count: usize,
    pub expenditure_event_count: usize,
    /// round(consumed / days); weekly and monthly only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_daily_consumed: Option<i64>,
    /// round(burned / days); weekly and monthly only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_daily_burned: Option<i64>,
}

/// Totals over the full fetched range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalanceSummary {
    pub range_start_utc: DateTime<Utc>,
    pub range_end_utc: DateTime<Utc>,
    pub total_consumed: f64,
    pub total_burned: f64,
    pub net: f64,
    pub total_protein_g: f64,
    pub total_carbs_g: f64,
    pub total_fat_g: f64,
    pub consumption_event_count: usize,
    pub expenditure_event_count: usize,
}

/// Full aggregation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyBalance {
    pub period: Period,
    pub buckets: Vec<AggregationBucket>,
    pub summary: EnergyBalanceSummary,
    /// Target from the user's stored profile and goal, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_target: Option<CalorieTarget>,
}

/// First and last instant covered by a period ending at `now`
pub fn lookback_range(period: Period, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let windows = plan_buckets(period, now);
    range_of(&windows)
}

fn range_of(windows: &[BucketWindow]) -> (DateTime<Utc>, DateTime<Utc>) {
    match (windows.first(), windows.last()) {
        (Some(first), Some(last)) => (first.start_utc, last.end_utc),
        // bucket_count() is never zero
        _ => unreachable!("period produced no buckets"),
    }
}

#[derive(Default)]
struct Tally {
    consumed: f64,
    burned: f64,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    meals: usize,
    workouts: usize,
}

impl Tally {
    fn collect<'a>(
        consumption: impl Iterator<Item = &'a ConsumptionEvent>,
        expenditure: impl Iterator<Item = &'a ExpenditureEvent>,
    ) -> Self {
        let mut tally = Tally::default();
        for meal in consumption {
            tally.consumed += meal.calories_or_zero();
            tally.protein_g += meal.macros.protein_g.unwrap_or(0.0);
            tally.carbs_g += meal.macros.carbs_g.unwrap_or(0.0);
            tally.fat_g += meal.macros.fat_g.unwrap_or(0.0);
            tally.meals += 1;
        }
        for workout in expenditure.filter(|w| w.is_completed()) {
            tally.burned += workout.calories_burned_or_zero();
            tally.workouts += 1;
        }
        tally
    }
}

/// Bucket and summarize already-fetched events
///
/// Events outside the lookback range and workouts that are not completed are
/// ignored. Empty input yields zeroed buckets, never an error.
pub fn aggregate_energy_balance(
    period: Period,
    now: DateTime<Utc>,
    consumption: &[ConsumptionEvent],
    expenditure: &[ExpenditureEvent],
) -> EnergyBalance {
    let windows = plan_buckets(period, now);

    let buckets = windows
        .iter()
        .map(|window| {
            let tally = Tally::collect(
                consumption.iter().filter(|e| window.contains(e.timestamp_utc)),
                expenditure.iter().filter(|e| window.contains(e.timestamp_utc)),
            );
            let average = |total: f64| {
                period
                    .reports_daily_average()
                    .then(|| (total / window.days as f64).round() as i64)
            };

            AggregationBucket {
                period_label: window.label.clone(),
                start_utc: window.start_utc,
                end_utc: window.end_utc,
                consumed: tally.consumed,
                burned: tally.burned,
                net: tally.consumed - tally.burned,
                consumption_event_count: tally.meals,
                expenditure_event_count: tally.workouts,
                avg_daily_consumed: average(tally.consumed),
                avg_daily_burned: average(tally.burned),
            }
        })
        .collect();

    let (range_start_utc, range_end_utc) = range_of(&windows);
    let in_range = |at: DateTime<Utc>| range_start_utc <= at && at <= range_end_utc;
    let totals = Tally::collect(
        consumption.iter().filter(|e| in_range(e.timestamp_utc)),
        expenditure.iter().filter(|e| in_range(e.timestamp_utc)),
    );

    EnergyBalance {
        period,
        buckets,
        summary: EnergyBalanceSummary {
            range_start_utc,
            range_end_utc,
            total_consumed: totals.consumed,
            total_burned: totals.burned,
            net: totals.consumed - totals.burned,
            total_protein_g: totals.protein_g,
            total_carbs_g: totals.carbs_g,
            total_fat_g: totals.fat_g,
            consumption_event_count: totals.meals,
            expenditure_event_count: totals.workouts,
        },
        daily_target: None,
    }
}
