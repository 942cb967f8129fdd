//! Business Rule Tests: Publish Window Evaluation
//!
//! These tests verify that:
//! - Items are published only between their bounds (inclusive)
//! - Items without any bound are never touched
//! - Applying an evaluation result makes the next evaluation a no-op

mod common;

use common::fixtures::*;
use scheduler::window::{evaluate, WindowAction};
use test_case::test_case;

// Window used throughout: January 2024, closed on both ends.
fn window_from() -> chrono::DateTime<chrono::Utc> {
    utc(2024, 1, 1, 0, 0)
}

fn window_until() -> chrono::DateTime<chrono::Utc> {
    utc(2024, 1, 31, 23, 59)
}

#[test_case(utc(2023, 12, 15, 0, 0), false, WindowAction::Unpublish; "before window, published")]
#[test_case(utc(2023, 12, 15, 0, 0), true, WindowAction::NoChange; "before window, unpublished")]
#[test_case(utc(2024, 1, 15, 0, 0), true, WindowAction::Publish; "inside window, unpublished")]
#[test_case(utc(2024, 1, 15, 0, 0), false, WindowAction::NoChange; "inside window, published")]
#[test_case(utc(2024, 2, 15, 0, 0), false, WindowAction::Unpublish; "after window, published")]
#[test_case(utc(2024, 2, 15, 0, 0), true, WindowAction::NoChange; "after window, unpublished")]
fn closed_window_matrix(
    now: chrono::DateTime<chrono::Utc>,
    unpublished: bool,
    expected: WindowAction,
) {
    assert_eq!(
        evaluate(now, Some(window_from()), Some(window_until()), unpublished),
        expected
    );
}

#[test]
fn missing_lower_bound_expires_only() {
    let until = utc(2024, 1, 1, 0, 0);

    // Long before the deadline nothing happens to a published item.
    assert_eq!(
        evaluate(utc(2023, 6, 1, 0, 0), None, Some(until), false),
        WindowAction::NoChange
    );
    // After the deadline a published item must come down.
    assert_eq!(
        evaluate(utc(2024, 2, 1, 0, 0), None, Some(until), false),
        WindowAction::Unpublish
    );
}

#[test]
fn missing_upper_bound_embargoes_only() {
    let from = utc(2024, 6, 1, 0, 0);

    // Before the embargo lifts a published item must come down.
    assert_eq!(
        evaluate(utc(2024, 5, 1, 0, 0), Some(from), None, false),
        WindowAction::Unpublish
    );
    // Once the embargo lifts an unpublished item goes live and stays live.
    assert_eq!(
        evaluate(utc(2024, 7, 1, 0, 0), Some(from), None, true),
        WindowAction::Publish
    );
    assert_eq!(
        evaluate(utc(2030, 1, 1, 0, 0), Some(from), None, false),
        WindowAction::NoChange
    );
}

#[test]
fn no_bounds_means_scheduling_disabled() {
    for now in [utc(2000, 1, 1, 0, 0), utc(2024, 1, 15, 0, 0), utc(2099, 12, 31, 0, 0)] {
        assert_eq!(evaluate(now, None, None, false), WindowAction::NoChange);
        assert_eq!(evaluate(now, None, None, true), WindowAction::NoChange);
    }
}

#[test]
fn evaluation_is_idempotent_across_the_whole_timeline() {
    let from = window_from();
    let until = window_until();
    let samples = [
        utc(2023, 12, 31, 23, 59),
        from,
        utc(2024, 1, 10, 12, 0),
        until,
        utc(2024, 2, 1, 0, 0),
    ];

    for now in samples {
        for initially_unpublished in [true, false] {
            let mut unpublished = initially_unpublished;
            match evaluate(now, Some(from), Some(until), unpublished) {
                WindowAction::Publish => unpublished = false,
                WindowAction::Unpublish => unpublished = true,
                WindowAction::NoChange => {}
            }
            assert_eq!(
                evaluate(now, Some(from), Some(until), unpublished),
                WindowAction::NoChange
            );
        }
    }
}
