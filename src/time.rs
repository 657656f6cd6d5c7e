//! Wall-clock helpers for timed tasks: next daily occurrence and countdown text.

use chrono::{DateTime, NaiveTime, TimeDelta, TimeZone};

use crate::error::ScheduleError;

/// Days to look ahead before giving up on a local time that keeps falling in a DST gap.
const MAX_DAYS_AHEAD: usize = 4;

/// Next `hour:minute` strictly after `now`, in `now`'s time zone.
///
/// When `now` is exactly `hour:minute` the answer is the same time tomorrow.
/// Local times skipped by a DST transition move to the next day that has them;
/// ambiguous local times resolve to the earlier instant.
///
/// # Errors
/// [`ScheduleError::InvalidTime`] for hour ≥ 24 or minute ≥ 60.
///
/// # Example
/// ```
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use lightvisor::time::future_time;
///
/// let now = Utc.with_ymd_and_hms(2014, 11, 7, 16, 43, 0).unwrap();
/// assert_eq!(future_time(&now, 17, 0).unwrap() - now, TimeDelta::minutes(17));
/// ```
pub fn future_time<Tz: TimeZone>(
    now: &DateTime<Tz>,
    hour: u32,
    minute: u32,
) -> Result<DateTime<Tz>, ScheduleError> {
    let at = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or(ScheduleError::InvalidTime { hour, minute })?;
    let tz = now.timezone();
    let mut day = now.date_naive();

    for _ in 0..MAX_DAYS_AHEAD {
        if let Some(candidate) = tz.from_local_datetime(&day.and_time(at)).earliest() {
            if candidate > *now {
                return Ok(candidate);
            }
        }
        day = day
            .succ_opt()
            .ok_or(ScheduleError::OutOfRange { hour, minute })?;
    }
    Err(ScheduleError::OutOfRange { hour, minute })
}

/// Countdown text for a delay: `H:MM:SS` from one hour up, else `M:SS`.
///
/// One second is added so the display reads `0:01` at the trigger instant
/// and `0:00` only afterwards; negative results clamp to `0:00`.
pub fn format_time_left(left: TimeDelta) -> String {
    let secs = (left + TimeDelta::seconds(1)).num_seconds().max(0);
    if secs >= 3600 {
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{}:{:02}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn next_occurrence() {
        let now = FixedOffset::west_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2014, 11, 7, 16, 43, 0)
            .unwrap();

        assert_eq!(future_time(&now, 16, 44).unwrap() - now, TimeDelta::minutes(1));
        assert_eq!(future_time(&now, 17, 0).unwrap() - now, TimeDelta::minutes(17));
        assert_eq!(future_time(&now, 16, 43).unwrap() - now, TimeDelta::hours(24));
        assert_eq!(future_time(&now, 16, 44).unwrap().offset(), now.offset());
    }

    #[test]
    fn rejects_bad_times() {
        let now = Utc::now();
        assert_eq!(
            future_time(&now, 24, 0),
            Err(ScheduleError::InvalidTime { hour: 24, minute: 0 })
        );
        assert!(future_time(&now, 7, 60).is_err());
    }

    #[test]
    fn countdown_text() {
        let left = TimeDelta::hours(1) + TimeDelta::minutes(5) + TimeDelta::seconds(53);
        let after = |secs: i64| format_time_left(left - TimeDelta::seconds(secs));

        assert_eq!(after(0), "1:05:54");
        assert_eq!(after(5 * 60 + 54), "1:00:00");
        assert_eq!(after(5 * 60 + 55), "59:59");
        assert_eq!(after(3600), "5:54");
        assert_eq!(after(3600 + 4 * 60 + 54), "1:00");
        assert_eq!(after(3600 + 4 * 60 + 55), "0:59");
        assert_eq!(after(3600 + 5 * 60 + 53), "0:01");
        assert_eq!(after(3600 + 5 * 60 + 54), "0:00");
        assert_eq!(after(3600 + 5 * 60 + 55), "0:00");
    }
}
