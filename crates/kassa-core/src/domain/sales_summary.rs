use chrono::Duration;
use chrono_tz::Tz;
use serde::Serialize;

use super::{TimeWindow, TurnoverBucket};

/// Converts a backend amount (öre, cents) into major currency units.
pub fn minor_to_major(amount: i64) -> f64 {
    amount as f64 / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SalesSummary {
    pub total_turnover: i64,
    pub order_count: i64,
    pub average_order: i64,
    pub goal_attainment_percent: f64,
}

impl SalesSummary {
    /// `daily_goal` is expressed in major units, as configured by the user.
    pub fn from_buckets(buckets: &[TurnoverBucket], daily_goal: i64) -> Self {
        let total_turnover: i64 = buckets.iter().map(|bucket| bucket.turnover).sum();
        let order_count: i64 = buckets.iter().map(|bucket| bucket.order_count).sum();

        let average_order = if order_count > 0 {
            (total_turnover as f64 / order_count as f64).round() as i64
        } else {
            0
        };

        let goal_attainment_percent = if daily_goal > 0 {
            minor_to_major(total_turnover) / daily_goal as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_turnover,
            order_count,
            average_order,
            goal_attainment_percent,
        }
    }

    /// Attainment clamped to `[0, 1]` for progress bars.
    pub fn goal_progress(&self) -> f64 {
        (self.goal_attainment_percent / 100.0).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlySlot {
    pub label: String,
    pub turnover: i64,
    pub order_count: i64,
}

/// One slot per interval from the window start through the interval that
/// contains the window end. Intervals the backend did not report are zero.
pub fn hourly_series(
    window: &TimeWindow,
    buckets: &[TurnoverBucket],
    interval_grouping: u32,
    timezone: Tz,
) -> Vec<HourlySlot> {
    if interval_grouping == 0 {
        return Vec::new();
    }

    let grouping = i64::from(interval_grouping);
    let slot_count = window.duration().num_seconds() / grouping + 1;

    (0..slot_count)
        .map(|index| {
            let slot_start = window.start() + Duration::seconds(index * grouping);
            let (turnover, order_count) = buckets
                .iter()
                .filter(|bucket| bucket.interval_index == index)
                .fold((0, 0), |(turnover, orders), bucket| {
                    (turnover + bucket.turnover, orders + bucket.order_count)
                });

            HourlySlot {
                label: slot_start.with_timezone(&timezone).format("%H:%M").to_string(),
                turnover,
                order_count,
            }
        })
        .collect()
}
