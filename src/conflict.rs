//! Time-conflict detection.
//!
//! Expands a section's weekly meeting pattern into per-day half-open minute
//! intervals and tests interval sets for overlap.
//!
//! # Overlap semantics
//!
//! Intervals are half-open `[start, end)` in minutes since midnight. Two
//! intervals conflict iff `!(a.end <= b.start || b.end <= a.start)` — a class
//! ending at 10:00 never conflicts with one starting at 10:00.
//!
//! # Data tolerance
//!
//! A section with missing or unparsable days/start/end expands to an empty
//! slot map, which conflicts with nothing. Bad data weakens constraints
//! instead of failing the run; `validation` surfaces it as a warning.

use std::collections::HashMap;

use crate::models::{Course, CourseId};
use crate::store::EntityStore;

/// Day letters the ranker and grid render, Monday through Friday. Conflict
/// detection itself accepts any day letter.
pub const DAY_CODES: [char; 5] = ['M', 'T', 'W', 'R', 'F'];

/// A half-open interval in minutes since midnight.
pub type MinuteSpan = (u16, u16);

/// Per-day meeting intervals: day letter → spans.
pub type DaySlots = HashMap<char, Vec<MinuteSpan>>;

/// Parses an "HHMM" (or "HMM") time string to minutes since midnight.
///
/// Returns `None` for empty or non-numeric input, or an out-of-range time.
pub fn parse_time(raw: &str) -> Option<u16> {
    let value: u32 = raw.trim().parse().ok()?;
    let (hours, minutes) = (value / 100, value % 100);
    if hours >= 24 || minutes >= 60 {
        return None;
    }
    Some((hours * 60 + minutes) as u16)
}

/// Parses a days string into uppercased day letters, preserving order.
///
/// Every non-whitespace character counts as a day: letters outside Mon–Fri
/// (weekend imports, typos) still constrain conflict detection — only the
/// quality ranker and the weekly grid are restricted to [`DAY_CODES`], via
/// [`day_index`]. `validation` flags the unrecognized letters.
pub fn parse_days(raw: &str) -> Vec<char> {
    raw.trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// The [`DAY_CODES`] index (Mon=0 … Fri=4) for a day letter.
pub fn day_index(day: char) -> Option<usize> {
    DAY_CODES.iter().position(|&d| d == day)
}

/// Expands a section into its per-day meeting intervals.
///
/// Returns an empty map when days/start/end are missing or unparsable.
pub fn expand_course(course: &Course) -> DaySlots {
    let (Some(days), Some(start_raw), Some(end_raw)) =
        (&course.days, &course.start_time, &course.end_time)
    else {
        return DaySlots::new();
    };
    let (Some(start), Some(end)) = (parse_time(start_raw), parse_time(end_raw)) else {
        return DaySlots::new();
    };

    let mut slots = DaySlots::new();
    for day in parse_days(days) {
        slots.entry(day).or_default().push((start, end));
    }
    slots
}

/// Whether two half-open intervals overlap. Touching endpoints do not count.
#[inline]
pub fn intervals_overlap(a: MinuteSpan, b: MinuteSpan) -> bool {
    !(a.1 <= b.0 || b.1 <= a.0)
}

/// Whether two slot maps share a day with an overlapping interval pair.
pub fn slots_conflict(a: &DaySlots, b: &DaySlots) -> bool {
    for (day, spans_a) in a {
        let Some(spans_b) = b.get(day) else { continue };
        for &sa in spans_a {
            for &sb in spans_b {
                if intervals_overlap(sa, sb) {
                    return true;
                }
            }
        }
    }
    false
}

/// Whether a candidate bundle conflicts with any group already placed in a term.
///
/// `placed` is the term's current placement state as (code, sections) groups;
/// every section of every group is tested against every bundle section.
pub fn bundle_conflicts_with_groups(
    store: &EntityStore,
    bundle: &[CourseId],
    placed: &[(String, Vec<CourseId>)],
) -> bool {
    let bundle_slots: Vec<DaySlots> = bundle
        .iter()
        .filter_map(|&id| store.course(id))
        .map(expand_course)
        .collect();

    for (_, sections) in placed {
        for &existing_id in sections {
            let Some(existing) = store.course(existing_id) else {
                continue;
            };
            let existing_slots = expand_course(existing);
            if bundle_slots.iter().any(|s| slots_conflict(s, &existing_slots)) {
                return true;
            }
        }
    }
    false
}
