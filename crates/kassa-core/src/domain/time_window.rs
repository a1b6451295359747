use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    #[error("window start {start} is after window end {end}")]
    StartAfterEnd {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("local midnight does not exist in time zone {timezone}")]
    AmbiguousMidnight { timezone: String },
}

/// Reporting window sent verbatim to the backend as Unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::StartAfterEnd { start, end });
        }

        Ok(Self { start, end })
    }

    /// From local midnight of `now`'s calendar day in `timezone` up to `now`.
    pub fn today_until(now: DateTime<Utc>, timezone: Tz) -> Result<Self, WindowError> {
        let local_now = now.with_timezone(&timezone);
        let midnight = local_now
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| WindowError::AmbiguousMidnight {
                timezone: timezone.name().to_string(),
            })?;

        // Some zones skip midnight on DST days; take the earliest valid instant.
        let start = timezone
            .from_local_datetime(&midnight)
            .earliest()
            .or_else(|| {
                timezone
                    .from_local_datetime(&(midnight + Duration::hours(1)))
                    .earliest()
            })
            .ok_or_else(|| WindowError::AmbiguousMidnight {
                timezone: timezone.name().to_string(),
            })?;

        Self::new(start.with_timezone(&Utc), now)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn start_timestamp(&self) -> i64 {
        self.start.timestamp()
    }

    pub fn end_timestamp(&self) -> i64 {
        self.end.timestamp()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn rejects_start_after_end() {
        let end = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();
        let start = end + Duration::minutes(1);

        let result = TimeWindow::new(start, end);

        assert!(matches!(result, Err(WindowError::StartAfterEnd { .. })));
    }

    #[test]
    fn accepts_empty_window() {
        let instant = Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap();

        let window = TimeWindow::new(instant, instant).unwrap();

        assert_eq!(window.duration(), Duration::zero());
    }

    #[test]
    fn exposes_unix_timestamps() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 1, 1, 1, 0, 0).unwrap();

        let window = TimeWindow::new(start, end).unwrap();

        assert_eq!(window.start_timestamp(), 1_735_689_600);
        assert_eq!(window.end_timestamp(), 1_735_693_200);
    }

    #[test]
    fn today_starts_at_local_midnight_in_winter() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 13, 0, 0).unwrap();

        let window = TimeWindow::today_until(now, chrono_tz::Europe::Stockholm).unwrap();

        assert_eq!(
            window.start(),
            Utc.with_ymd_and_hms(2025, 1, 14, 23, 0, 0).unwrap()
        );
        assert_eq!(window.end(), now);
    }

    #[test]
    fn today_follows_summer_time_offset() {
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 10, 30, 0).unwrap();

        let window = TimeWindow::today_until(now, chrono_tz::Europe::Stockholm).unwrap();

        let local_start = window.start().with_timezone(&chrono_tz::Europe::Stockholm);
        assert_eq!(local_start.hour(), 0);
        assert_eq!(
            window.start(),
            Utc.with_ymd_and_hms(2025, 6, 30, 22, 0, 0).unwrap()
        );
    }

    #[test]
    fn today_uses_local_calendar_day_just_after_midnight() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 23, 30, 0).unwrap();

        let window = TimeWindow::today_until(now, chrono_tz::Europe::Stockholm).unwrap();

        assert_eq!(
            window.start(),
            Utc.with_ymd_and_hms(2025, 1, 15, 23, 0, 0).unwrap()
        );
    }
}
