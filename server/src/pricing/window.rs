//! Happy-hours window containment
//!
//! Windows are wall-clock HH:MM bounds at minute granularity, inclusive on
//! both ends. A window whose start is later than its end wraps past
//! midnight ("22:00".."02:00" covers late evening and the small hours).

use chrono::{NaiveTime, Timelike};

/// Minutes past midnight for an HH:MM wall-clock bound.
pub fn bound_minutes(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Whether `at` (minutes past local midnight) falls inside the window.
pub fn window_contains(start: u32, end: u32, at: u32) -> bool {
    if start <= end {
        start <= at && at <= end
    } else {
        at >= start || at <= end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AFTERNOON_START: u32 = 14 * 60;
    const AFTERNOON_END: u32 = 18 * 60;

    #[test]
    fn bounds_are_inclusive() {
        assert!(window_contains(AFTERNOON_START, AFTERNOON_END, AFTERNOON_START));
        assert!(window_contains(AFTERNOON_START, AFTERNOON_END, AFTERNOON_END));
        assert!(window_contains(AFTERNOON_START, AFTERNOON_END, 16 * 60 + 30));
        assert!(!window_contains(AFTERNOON_START, AFTERNOON_END, AFTERNOON_START - 1));
        assert!(!window_contains(AFTERNOON_START, AFTERNOON_END, AFTERNOON_END + 1));
    }

    #[test]
    fn overnight_window_wraps_past_midnight() {
        let start = 22 * 60;
        let end = 2 * 60;
        assert!(window_contains(start, end, 23 * 60));
        assert!(window_contains(start, end, 0));
        assert!(window_contains(start, end, 60));
        assert!(window_contains(start, end, start));
        assert!(window_contains(start, end, end));
        assert!(!window_contains(start, end, 12 * 60));
        assert!(!window_contains(start, end, 21 * 60 + 59));
        assert!(!window_contains(start, end, 2 * 60 + 1));
    }

    #[test]
    fn degenerate_window_covers_one_minute() {
        assert!(window_contains(600, 600, 600));
        assert!(!window_contains(600, 600, 601));
        assert!(!window_contains(600, 600, 599));
    }

    #[test]
    fn bound_minutes_ignores_seconds() {
        let t = NaiveTime::from_hms_opt(14, 30, 45).unwrap();
        assert_eq!(bound_minutes(t), 14 * 60 + 30);
    }
}
