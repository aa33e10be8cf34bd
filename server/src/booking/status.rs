//! Status derivation
//!
//! The stored status can lag the clock between sweep passes. Everything
//! that needs the truthful state runs the stored value through
//! [`compute_status`] with an explicit `now`.

use shared::models::BookingStatus;

/// Effective lifecycle status at `now`.
///
/// Time only moves a booking forward: upcoming becomes running at
/// start_time, running becomes expired at end_time. Paused and terminal
/// states hold until an explicit action.
pub fn compute_status(stored: BookingStatus, start_time: i64, end_time: i64, now: i64) -> BookingStatus {
    match stored {
        BookingStatus::Upcoming => {
            if now >= end_time {
                BookingStatus::Expired
            } else if now >= start_time {
                BookingStatus::Running
            } else {
                BookingStatus::Upcoming
            }
        }
        BookingStatus::Running => {
            if now >= end_time {
                BookingStatus::Expired
            } else {
                BookingStatus::Running
            }
        }
        BookingStatus::Paused | BookingStatus::Expired | BookingStatus::Completed => stored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: i64 = 1_000_000;
    const END: i64 = 1_060_000;

    #[test]
    fn upcoming_becomes_running_at_start() {
        assert_eq!(
            compute_status(BookingStatus::Upcoming, START, END, START - 1),
            BookingStatus::Upcoming
        );
        assert_eq!(
            compute_status(BookingStatus::Upcoming, START, END, START),
            BookingStatus::Running
        );
    }

    #[test]
    fn running_expires_at_end() {
        assert_eq!(
            compute_status(BookingStatus::Running, START, END, END - 1),
            BookingStatus::Running
        );
        assert_eq!(
            compute_status(BookingStatus::Running, START, END, END),
            BookingStatus::Expired
        );
    }

    #[test]
    fn stale_upcoming_rows_jump_straight_to_expired() {
        assert_eq!(
            compute_status(BookingStatus::Upcoming, START, END, END + 1),
            BookingStatus::Expired
        );
    }

    #[test]
    fn paused_ignores_the_clock() {
        assert_eq!(
            compute_status(BookingStatus::Paused, START, END, END + 100_000),
            BookingStatus::Paused
        );
    }

    #[test]
    fn terminal_states_hold() {
        assert_eq!(
            compute_status(BookingStatus::Completed, START, END, END + 1),
            BookingStatus::Completed
        );
        assert_eq!(
            compute_status(BookingStatus::Expired, START, END, END + 1),
            BookingStatus::Expired
        );
    }

    #[test]
    fn recomputing_is_idempotent() {
        let now = END + 5_000;
        let once = compute_status(BookingStatus::Running, START, END, now);
        let twice = compute_status(once, START, END, now);
        assert_eq!(once, twice);
    }
}
