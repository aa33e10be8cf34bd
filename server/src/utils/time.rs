//! Business-timezone time helpers
//!
//! All date/window → timestamp conversion happens at the handler and sweep
//! layer; repositories and domain functions only ever see `i64` Unix millis
//! or minutes-of-day. Daylight-saving gaps fall back to `.latest()` / UTC the
//! same way everywhere.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use shared::error::{AppError, AppResult};
use shared::models::ReportPeriod;

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse an `"HH:MM"` wall-clock string.
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

/// Parse the archive sweep cutoff (`HH:MM`), falling back to 00:00.
pub fn parse_cutoff(cutoff: &str) -> NaiveTime {
    NaiveTime::parse_from_str(cutoff, "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse archive sweep time '{}': {}, falling back to 00:00",
            cutoff,
            e
        );
        NaiveTime::MIN
    })
}

/// Minutes past local midnight for a Unix-millis instant in the business
/// timezone. Happy-hours window containment works on this value.
pub fn minutes_of_day(at_millis: i64, tz: Tz) -> u32 {
    let utc = DateTime::from_timestamp_millis(at_millis).unwrap_or_else(Utc::now);
    let local = utc.with_timezone(&tz).time();
    local.hour() * 60 + local.minute()
}

/// Date + hms → Unix millis (business timezone)
///
/// DST gap fallback: if the local time does not exist, fall back to UTC.
pub fn date_hms_to_millis(date: NaiveDate, hour: u32, min: u32, sec: u32, tz: Tz) -> i64 {
    let naive = date
        .and_hms_opt(hour, min, sec)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN));
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// Start of day (00:00:00) → Unix millis (business timezone)
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    date_hms_to_millis(date, 0, 0, 0, tz)
}

/// End of day → next day 00:00:00 Unix millis; callers use `< end` semantics.
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    date_hms_to_millis(next_day, 0, 0, 0, tz)
}

/// Local date in the business timezone for a Unix-millis instant.
pub fn local_date(at_millis: i64, tz: Tz) -> NaiveDate {
    let utc = DateTime::from_timestamp_millis(at_millis).unwrap_or_else(Utc::now);
    utc.with_timezone(&tz).date_naive()
}

/// Reporting window bounds for a period containing `at_millis`.
///
/// Daily covers the local day; weekly starts on Sunday; monthly on the 1st.
/// Returns half-open `[start, end)` millis.
pub fn period_bounds(period: ReportPeriod, at_millis: i64, tz: Tz) -> (i64, i64) {
    let today = local_date(at_millis, tz);
    match period {
        ReportPeriod::Daily => (day_start_millis(today, tz), day_end_millis(today, tz)),
        ReportPeriod::Weekly => {
            let back = today.weekday().num_days_from_sunday() as i64;
            let week_start = today - chrono::Duration::days(back);
            let week_end = week_start + chrono::Duration::days(7);
            (
                day_start_millis(week_start, tz),
                day_start_millis(week_end, tz),
            )
        }
        ReportPeriod::Monthly => {
            let month_start = today.with_day(1).unwrap_or(today);
            let next_month = if month_start.month() == 12 {
                NaiveDate::from_ymd_opt(month_start.year() + 1, 1, 1)
            } else {
                NaiveDate::from_ymd_opt(month_start.year(), month_start.month() + 1, 1)
            }
            .unwrap_or(month_start);
            (
                day_start_millis(month_start, tz),
                day_start_millis(next_month, tz),
            )
        }
    }
}

/// Duration until the next local occurrence of `target` wall-clock time.
///
/// Used by the daily archive sweep. DST gaps fall back to one minute past
/// the target, then to "an hour from now"; never returns less than 60s.
pub fn duration_until_next(target: NaiveTime, tz: Tz) -> std::time::Duration {
    let now = chrono::Utc::now().with_timezone(&tz);
    let today = now.date_naive();

    let target_date = if now.time() >= target {
        today + chrono::Duration::days(1)
    } else {
        today
    };

    let target_datetime = target_date
        .and_time(target)
        .and_local_timezone(tz)
        .single()
        .unwrap_or_else(|| {
            // DST edge case: fallback to +1 min
            (target_date.and_time(target) + chrono::Duration::minutes(1))
                .and_local_timezone(tz)
                .latest()
                .unwrap_or_else(|| {
                    tracing::error!("Cannot resolve local sweep time, using fallback");
                    now + chrono::Duration::hours(1)
                })
        });

    let duration = target_datetime.signed_duration_since(now);
    if duration.num_seconds() <= 0 {
        std::time::Duration::from_secs(60)
    } else {
        duration
            .to_std()
            .unwrap_or(std::time::Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const TZ: Tz = chrono_tz::Asia::Kolkata;

    fn millis_at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
        TZ.with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .expect("valid local time")
            .timestamp_millis()
    }

    #[test]
    fn minutes_of_day_uses_business_timezone() {
        let at = millis_at(2025, 6, 10, 15, 30);
        assert_eq!(minutes_of_day(at, TZ), 15 * 60 + 30);
        assert_eq!(minutes_of_day(millis_at(2025, 6, 10, 0, 0), TZ), 0);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2025-06-10").is_ok());
        assert!(parse_date("10/06/2025").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn parse_hhmm_handles_window_bounds() {
        assert_eq!(
            parse_hhmm("14:00"),
            NaiveTime::from_hms_opt(14, 0, 0)
        );
        assert!(parse_hhmm("25:00").is_none());
        assert!(parse_hhmm("2pm").is_none());
    }

    #[test]
    fn daily_bounds_cover_the_local_day() {
        let noon = millis_at(2025, 6, 10, 12, 0);
        let (start, end) = period_bounds(ReportPeriod::Daily, noon, TZ);
        assert_eq!(start, millis_at(2025, 6, 10, 0, 0));
        assert_eq!(end, millis_at(2025, 6, 11, 0, 0));
        assert!(start <= noon && noon < end);
    }

    #[test]
    fn weekly_bounds_start_on_sunday() {
        // 2025-06-10 is a Tuesday; the week starts Sunday 2025-06-08.
        let at = millis_at(2025, 6, 10, 12, 0);
        let (start, end) = period_bounds(ReportPeriod::Weekly, at, TZ);
        assert_eq!(start, millis_at(2025, 6, 8, 0, 0));
        assert_eq!(end, millis_at(2025, 6, 15, 0, 0));
    }

    #[test]
    fn monthly_bounds_roll_over_december() {
        let at = millis_at(2025, 12, 15, 10, 0);
        let (start, end) = period_bounds(ReportPeriod::Monthly, at, TZ);
        assert_eq!(start, millis_at(2025, 12, 1, 0, 0));
        assert_eq!(end, millis_at(2026, 1, 1, 0, 0));
    }
}
