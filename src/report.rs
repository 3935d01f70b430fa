//! Text report rendering.
//!
//! Pure presentation over stored state: every report can be regenerated at
//! any time from the current assignments, courses, and ranking scores, and
//! none of them recompute scheduling or scoring logic.
//!
//! Three artifacts:
//! - [`schedule_report`] — per program → block → term course tables with
//!   missing-course warning lines;
//! - [`timetable_grid`] — an ASCII weekly grid (Mon–Fri columns, 30-minute
//!   rows from 08:00 to 22:00, box-drawn class spans) for one term;
//! - [`ranking_report`] — per-block score breakdown rendered from the
//!   structured deductions the quality ranker produced.

use std::fmt::Write;

use crate::conflict::{day_index, expand_course};
use crate::models::{Requirement, TermId};
use crate::ranking::{BlockScore, DeductionDetail};
use crate::store::EntityStore;

/// Weekday display names, Mon=0 … Fri=4.
pub const DAY_NAMES: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];

const GRID_START_MIN: u16 = 8 * 60;
const GRID_END_MIN: u16 = 22 * 60;
const GRID_ROW_MIN: u16 = 30;
const GRID_CELL_WIDTH: usize = 14;

/// Formats an "HHMM" time string as "HH:MM". Malformed input renders empty.
pub fn format_time(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() < 3 || trimmed.len() > 4 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return String::new();
    }
    let padded = format!("{trimmed:0>4}");
    format!("{}:{}", &padded[..2], &padded[2..])
}

/// Renders the full schedule as text: one table per program → block → term,
/// with a warning line for every required course the term is missing.
pub fn schedule_report(store: &EntityStore) -> String {
    let mut out = String::new();

    for (program_id, program) in store.programs() {
        let _ = writeln!(out, "{}", "=".repeat(72));
        let _ = writeln!(
            out,
            "PROGRAM: {}  ({} enrolled)",
            program.name, program.enrolled
        );
        let _ = writeln!(out, "{}", "=".repeat(72));

        for block_id in store.blocks_of(program_id) {
            let Some(block) = store.block(block_id) else { continue };
            for term_id in store.terms_of(block_id) {
                let Some(term) = store.term(term_id) else { continue };
                let _ = writeln!(
                    out,
                    "\n{} ({} students) — {}",
                    block.name, block.size, term.name
                );
                let _ = writeln!(
                    out,
                    "  {:<12} {:<8} {:<5} {:<6} {:<13} {:>9}",
                    "CODE", "SECTION", "TYPE", "DAYS", "TIME", "ENROLLED"
                );

                let mut scheduled: Vec<&str> = Vec::new();
                for assignment in store.assignments_in(term_id) {
                    let Some(course) = store.course(assignment.section) else {
                        continue;
                    };
                    scheduled.push(&course.code);
                    let time_range = match (&course.start_time, &course.end_time) {
                        (Some(start), Some(end)) => {
                            format!("{}-{}", format_time(start), format_time(end))
                        }
                        _ => String::new(),
                    };
                    let capacity = course
                        .capacity
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "?".to_string());
                    let _ = writeln!(
                        out,
                        "  {:<12} {:<8} {:<5} {:<6} {:<13} {:>5}/{}",
                        course.code,
                        course.section,
                        course.instr_type.code(),
                        course.days.as_deref().unwrap_or("N/A"),
                        time_range,
                        course.enrolled,
                        capacity
                    );
                }

                let mut missing: Vec<&str> = store
                    .requirements_for(program_id, &term.name)
                    .iter()
                    .map(|r| r.code.as_str())
                    .filter(|code| !Requirement::is_elective_placeholder(code))
                    .filter(|code| !scheduled.contains(code))
                    .collect();
                missing.sort_unstable();
                if !missing.is_empty() {
                    let _ = writeln!(out, "  !! missing: {}", missing.join(", "));
                }
            }
        }
        out.push('\n');
    }
    out
}

/// A class span's render state within one grid cell row.
#[derive(Clone, PartialEq)]
enum Cell {
    Empty,
    /// First row of a span; the label rides in the top border.
    Top(String),
    Middle,
    Bottom,
}

/// Renders one term as an ASCII weekly grid.
///
/// Classes outside 08:00–22:00 are clamped to the visible window; a class
/// spanning a single 30-minute row renders as just its labeled top border.
pub fn timetable_grid(store: &EntityStore, term: TermId) -> String {
    let rows = ((GRID_END_MIN - GRID_START_MIN) / GRID_ROW_MIN) as usize;
    let mut grid: Vec<[Cell; 5]> =
        vec![[Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty]; rows];

    for assignment in store.assignments_in(term) {
        let Some(course) = store.course(assignment.section) else {
            continue;
        };
        let label = format!("{} {}", course.code, course.section);
        for (day, spans) in expand_course(course) {
            let Some(col) = day_index(day) else { continue };
            for (start, end) in spans {
                if end <= GRID_START_MIN || start >= GRID_END_MIN {
                    continue;
                }
                let start = start.max(GRID_START_MIN);
                let end = end.min(GRID_END_MIN);
                let first = ((start - GRID_START_MIN) / GRID_ROW_MIN) as usize;
                let last = ((end - GRID_START_MIN).div_ceil(GRID_ROW_MIN)) as usize - 1;
                grid[first][col] = Cell::Top(label.clone());
                for row in &mut grid[first + 1..last] {
                    row[col] = Cell::Middle;
                }
                if last > first {
                    grid[last][col] = Cell::Bottom;
                }
            }
        }
    }

    let mut out = String::new();
    let _ = write!(out, "{:<7}", "");
    for name in DAY_NAMES {
        let _ = write!(out, "{name:^GRID_CELL_WIDTH$}");
    }
    out.push('\n');

    let inner = GRID_CELL_WIDTH - 2;
    for (row, cells) in grid.iter().enumerate() {
        let minute = GRID_START_MIN + row as u16 * GRID_ROW_MIN;
        let _ = write!(out, "{:02}:{:02}  ", minute / 60, minute % 60);
        for cell in cells {
            match cell {
                Cell::Empty => {
                    let _ = write!(out, "{:GRID_CELL_WIDTH$}", "");
                }
                Cell::Top(label) => {
                    // Truncate by chars, not bytes: codes may be non-ASCII.
                    let text: String = label.chars().take(inner - 2).collect();
                    let _ = write!(out, "┌{:─^inner$}┐", format!(" {text} "));
                }
                Cell::Middle => {
                    let _ = write!(out, "│{:inner$}│", "");
                }
                Cell::Bottom => {
                    let _ = write!(out, "└{:─<inner$}┘", "");
                }
            }
        }
        out.push('\n');
    }
    out
}

/// Renders the ranking report from precomputed block scores.
pub fn ranking_report(scores: &[BlockScore]) -> String {
    let mut out = String::new();

    for block_score in scores {
        let _ = writeln!(out, "{}", "=".repeat(60));
        let _ = writeln!(
            out,
            "BLOCK: {}  |  PROGRAM: {}",
            block_score.block_name, block_score.program_name
        );
        let _ = writeln!(out, "FINAL SCORE: {} / 100", block_score.score);
        let _ = writeln!(out, "{}", "=".repeat(60));

        let penalized = block_score
            .terms
            .iter()
            .any(|term| !term.deductions.is_empty());
        if !penalized {
            let _ = writeln!(out, "  Perfect Score! No penalties detected.");
        } else {
            for term in &block_score.terms {
                if term.deductions.is_empty() {
                    continue;
                }
                let _ = writeln!(
                    out,
                    "  --- {} TERM (Score: {}) ---",
                    term.name.to_uppercase(),
                    term.score
                );
                for deduction in &term.deductions {
                    match deduction.detail {
                        DeductionDetail::Gap { day, gap_min } => {
                            let _ = writeln!(
                                out,
                                "  [-{}] {}: Large gap of {:.1} hrs (Allowed: 1 hr)",
                                deduction.points,
                                DAY_NAMES[day],
                                gap_min as f64 / 60.0
                            );
                        }
                        DeductionDetail::Rest { from_day, rest_min } => {
                            let _ = writeln!(
                                out,
                                "  [-{}] {}->{}: Only {:.1} hrs rest (Req: 12 hrs)",
                                deduction.points,
                                DAY_NAMES[from_day],
                                DAY_NAMES[from_day + 1],
                                rest_min as f64 / 60.0
                            );
                        }
                    }
                }
                out.push('\n');
            }
        }
        out.push('\n');
    }
    out
}
