//! Publish-window evaluation.
//!
//! The decision at the heart of the scheduler: given an item's optional
//! `publish_from`/`publish_until` bounds and the current instant, decide
//! whether the item's published status has to change, and in which
//! direction. The function is pure; callers apply and persist the result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of evaluating an item's window at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAction {
    /// Status already matches the window (or scheduling is disabled).
    NoChange,
    /// The item must be published.
    Publish,
    /// The item must be unpublished.
    Unpublish,
}

impl WindowAction {
    /// Past-tense label used in audit records and log lines.
    pub fn audit_label(&self) -> &'static str {
        match self {
            WindowAction::NoChange => "unchanged",
            WindowAction::Publish => "published",
            WindowAction::Unpublish => "unpublished",
        }
    }
}

/// Evaluate a publish window.
///
/// Items with neither bound set are never touched; scheduling is considered
/// disabled for them. Bounds are inclusive: an item is inside its window at
/// exactly `publish_from` and at exactly `publish_until`.
///
/// An inverted pair (`publish_from >= publish_until`) is not detected here;
/// it falls through the same comparisons deterministically. Form validation
/// keeps such pairs out of the store under normal operation.
pub fn evaluate(
    now: DateTime<Utc>,
    publish_from: Option<DateTime<Utc>>,
    publish_until: Option<DateTime<Utc>>,
    is_unpublished: bool,
) -> WindowAction {
    if publish_from.is_none() && publish_until.is_none() {
        return WindowAction::NoChange;
    }

    let before_from = publish_from.is_some_and(|from| now < from);
    let after_until = publish_until.is_some_and(|until| now > until);
    let after_from = publish_from.map_or(true, |from| now >= from);
    let before_until = publish_until.map_or(true, |until| now <= until);

    if before_from || after_until {
        if is_unpublished {
            WindowAction::NoChange
        } else {
            WindowAction::Unpublish
        }
    } else if after_from && before_until {
        if is_unpublished {
            WindowAction::Publish
        } else {
            WindowAction::NoChange
        }
    } else {
        WindowAction::NoChange
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn no_bounds_never_changes_status() {
        let now = utc(2024, 1, 15, 12, 0);
        assert_eq!(evaluate(now, None, None, false), WindowAction::NoChange);
        assert_eq!(evaluate(now, None, None, true), WindowAction::NoChange);
    }

    #[test]
    fn inside_window_publishes_unpublished_item() {
        let from = utc(2024, 1, 1, 0, 0);
        let until = utc(2024, 1, 31, 23, 59);
        let now = utc(2024, 1, 15, 0, 0);

        assert_eq!(
            evaluate(now, Some(from), Some(until), true),
            WindowAction::Publish
        );
        assert_eq!(
            evaluate(now, Some(from), Some(until), false),
            WindowAction::NoChange
        );
    }

    #[test]
    fn before_window_unpublishes_published_item() {
        let from = utc(2024, 6, 1, 0, 0);
        let now = utc(2024, 5, 1, 0, 0);

        assert_eq!(evaluate(now, Some(from), None, false), WindowAction::Unpublish);
        assert_eq!(evaluate(now, Some(from), None, true), WindowAction::NoChange);
    }

    #[test]
    fn after_window_unpublishes_published_item() {
        let until = utc(2024, 1, 1, 0, 0);
        let now = utc(2024, 2, 1, 0, 0);

        assert_eq!(evaluate(now, None, Some(until), false), WindowAction::Unpublish);
        assert_eq!(evaluate(now, None, Some(until), true), WindowAction::NoChange);
    }

    #[test]
    fn open_ended_lower_bound_publishes_once_reached() {
        let from = utc(2024, 6, 1, 0, 0);
        let now = utc(2024, 7, 1, 0, 0);

        assert_eq!(evaluate(now, Some(from), None, true), WindowAction::Publish);
        assert_eq!(evaluate(now, Some(from), None, false), WindowAction::NoChange);
    }

    #[test]
    fn bounds_are_inclusive() {
        let from = utc(2024, 1, 1, 0, 0);
        let until = utc(2024, 1, 31, 0, 0);

        // Exactly at the lower bound the item belongs inside the window.
        assert_eq!(
            evaluate(from, Some(from), Some(until), true),
            WindowAction::Publish
        );
        // Exactly at the upper bound it is still inside.
        assert_eq!(
            evaluate(until, Some(from), Some(until), true),
            WindowAction::Publish
        );
        // One second past the upper bound it is out.
        let past = until + chrono::Duration::seconds(1);
        assert_eq!(
            evaluate(past, Some(from), Some(until), false),
            WindowAction::Unpublish
        );
    }

    #[test]
    fn applying_the_result_is_idempotent() {
        let from = utc(2024, 1, 1, 0, 0);
        let until = utc(2024, 1, 31, 0, 0);
        let samples = [
            utc(2023, 12, 1, 0, 0),
            utc(2024, 1, 1, 0, 0),
            utc(2024, 1, 15, 12, 30),
            utc(2024, 1, 31, 0, 0),
            utc(2024, 3, 1, 0, 0),
        ];

        for now in samples {
            for unpublished in [true, false] {
                let mut state = unpublished;
                match evaluate(now, Some(from), Some(until), state) {
                    WindowAction::Publish => state = false,
                    WindowAction::Unpublish => state = true,
                    WindowAction::NoChange => {}
                }
                assert_eq!(
                    evaluate(now, Some(from), Some(until), state),
                    WindowAction::NoChange,
                    "second evaluation at {} must be a no-op",
                    now
                );
            }
        }
    }

    #[test]
    fn inverted_window_does_not_panic() {
        let from = utc(2024, 6, 10, 0, 0);
        let until = utc(2024, 6, 1, 0, 0);
        let now = utc(2024, 6, 5, 0, 0);

        // Deterministic fall-through; the result is not meaningful but
        // evaluation must stay total.
        let _ = evaluate(now, Some(from), Some(until), false);
        let _ = evaluate(now, Some(from), Some(until), true);

        // Degenerate single-instant window: publishable exactly at the bound.
        assert_eq!(
            evaluate(from, Some(from), Some(from), true),
            WindowAction::Publish
        );
    }
}
