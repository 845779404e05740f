//! Date bookkeeping for reading-status changes.
//!
//! Moving a book between statuses fills in or clears its start and
//! completion dates:
//!
//! | old -> new                | date started | date completed |
//! |---------------------------|--------------|----------------|
//! | unchanged                 | kept         | kept           |
//! | any -> on shelf           | cleared      | cleared        |
//! | completed -> in progress  | kept         | cleared        |
//! | on shelf -> in progress   | now          | kept           |
//! | on shelf -> completed     | date added   | now            |
//! | in progress -> completed  | kept         | now            |

use chrono::{DateTime, Utc};

use crate::db::models::{distant_past, BookStatus, DatePair};

pub fn next_dates(
    old: BookStatus,
    new: BookStatus,
    date_added: DateTime<Utc>,
    date_started: DateTime<Utc>,
    date_completed: DateTime<Utc>,
    now: DateTime<Utc>,
) -> DatePair {
    use BookStatus::*;

    let (date_started, date_completed) = match (old, new) {
        (OnShelf, OnShelf) | (InProgress, InProgress) | (Completed, Completed) => {
            (date_started, date_completed)
        }
        (_, OnShelf) => (distant_past(), distant_past()),
        (Completed, InProgress) => (date_started, distant_past()),
        (OnShelf, InProgress) => (now, date_completed),
        // Finished without ever being marked as started.
        (OnShelf, Completed) => (date_added, now),
        (InProgress, Completed) => (date_started, now),
    };

    DatePair {
        date_started,
        date_completed,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::db::models::is_unset;

    struct Dates {
        added: DateTime<Utc>,
        started: DateTime<Utc>,
        completed: DateTime<Utc>,
        now: DateTime<Utc>,
    }

    fn dates() -> Dates {
        Dates {
            added: Utc.with_ymd_and_hms(2024, 1, 5, 10, 0, 0).unwrap(),
            started: Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap(),
            completed: Utc.with_ymd_and_hms(2024, 3, 9, 22, 15, 0).unwrap(),
            now: Utc.with_ymd_and_hms(2024, 7, 12, 12, 0, 0).unwrap(),
        }
    }

    fn apply(old: BookStatus, new: BookStatus, d: &Dates) -> DatePair {
        next_dates(old, new, d.added, d.started, d.completed, d.now)
    }

    #[test]
    fn any_to_on_shelf_clears_both_dates() {
        let d = dates();
        for old in [BookStatus::InProgress, BookStatus::Completed] {
            let pair = apply(old, BookStatus::OnShelf, &d);
            assert!(is_unset(&pair.date_started), "from {old:?}");
            assert!(is_unset(&pair.date_completed), "from {old:?}");
        }
    }

    #[test]
    fn completed_to_in_progress_clears_completion() {
        let d = dates();
        let pair = apply(BookStatus::Completed, BookStatus::InProgress, &d);

        assert_eq!(pair.date_started, d.started);
        assert_eq!(pair.date_completed, distant_past());
    }

    #[test]
    fn on_shelf_to_in_progress_starts_now() {
        let d = Dates {
            started: distant_past(),
            completed: distant_past(),
            ..dates()
        };
        let pair = apply(BookStatus::OnShelf, BookStatus::InProgress, &d);

        assert_eq!(pair.date_started, d.now);
        assert_eq!(pair.date_completed, distant_past());
    }

    #[test]
    fn on_shelf_to_completed_backfills_start() {
        let d = Dates {
            started: distant_past(),
            completed: distant_past(),
            ..dates()
        };
        let pair = apply(BookStatus::OnShelf, BookStatus::Completed, &d);

        assert_eq!(pair.date_started, d.added);
        assert_eq!(pair.date_completed, d.now);
    }

    #[test]
    fn in_progress_to_completed_finishes_now() {
        let d = dates();
        let pair = apply(BookStatus::InProgress, BookStatus::Completed, &d);

        assert_eq!(pair.date_started, d.started);
        assert_eq!(pair.date_completed, d.now);
    }

    #[test]
    fn unchanged_status_keeps_dates() {
        let d = dates();
        for status in BookStatus::ALL {
            let pair = apply(status, status, &d);
            assert_eq!(pair.date_started, d.started, "{status:?}");
            assert_eq!(pair.date_completed, d.completed, "{status:?}");
        }
    }

    #[test]
    fn reapplying_without_a_status_change_is_stable() {
        let d = dates();
        let first = apply(BookStatus::InProgress, BookStatus::Completed, &d);
        let later = Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap();

        let second = next_dates(
            BookStatus::Completed,
            BookStatus::Completed,
            d.added,
            first.date_started,
            first.date_completed,
            later,
        );

        assert_eq!(second, first);
    }
}
