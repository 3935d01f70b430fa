//! Schedule quality scoring.
//!
//! Scores each block's timetable for student-friendliness, starting from a
//! base of 100 and deducting points for long midday gaps and short overnight
//! rest. A block's score is the floor average of its term scores; scores are
//! not clamped, so a pathological term can go negative.
//!
//! Scoring is pure: it reads placed assignments and course times, produces
//! structured [`Deduction`]s that the report layer renders without
//! recomputation, and only [`rank_blocks`] writes anything back (the
//! `Block::ranking` field).

use log::{info, warn};

use crate::conflict::{day_index, expand_course};
use crate::error::ScheduleError;
use crate::models::{BlockId, TermId};
use crate::store::EntityStore;

/// Score every term starts from.
pub const BASE_SCORE: i32 = 100;
/// Points deducted per 30 minutes of gap beyond the allowance.
pub const PENALTY_PER_30MIN_GAP: i32 = 2;
/// Points deducted per 30 minutes of overnight rest below the requirement.
pub const PENALTY_PER_30MIN_SLEEP_LOSS: i32 = 5;
/// Gap between classes tolerated without penalty (minutes).
pub const GAP_ALLOWANCE_MIN: i32 = 60;
/// Overnight rest required to avoid penalty (minutes).
pub const MIN_REST_MIN: i32 = 720;

/// What a deduction was charged for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeductionDetail {
    /// A gap between two classes on one day (Mon=0 … Fri=4).
    Gap {
        /// Weekday index.
        day: usize,
        /// Gap length in minutes.
        gap_min: i32,
    },
    /// Short rest between the last class of one day and the first of the next.
    Rest {
        /// Weekday index of the earlier day (the pair is `from_day`, `from_day + 1`).
        from_day: usize,
        /// Overnight rest in minutes.
        rest_min: i32,
    },
}

/// One scoring deduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deduction {
    /// Points deducted (positive).
    pub points: i32,
    /// What the deduction was for.
    pub detail: DeductionDetail,
}

/// Score of one term.
#[derive(Debug, Clone)]
pub struct TermScore {
    /// Scored term.
    pub term: TermId,
    /// Term name snapshot.
    pub name: String,
    /// `BASE_SCORE` minus deductions; not clamped.
    pub score: i32,
    /// Every deduction charged, in scan order.
    pub deductions: Vec<Deduction>,
}

/// Score of one block: floor average of its term scores.
#[derive(Debug, Clone)]
pub struct BlockScore {
    /// Scored block.
    pub block: BlockId,
    /// Block name snapshot.
    pub block_name: String,
    /// Owning program name snapshot.
    pub program_name: String,
    /// Averaged score. Zero when the block has no terms.
    pub score: i32,
    /// Per-term breakdowns.
    pub terms: Vec<TermScore>,
}

/// Scores every block without touching stored state.
pub fn score_blocks(store: &EntityStore) -> Vec<BlockScore> {
    store
        .blocks()
        .map(|(block_id, block)| {
            let program_name = store
                .program(block.program)
                .map(|p| p.name.clone())
                .unwrap_or_default();
            let terms: Vec<TermScore> = store
                .terms_of(block_id)
                .into_iter()
                .filter_map(|term_id| {
                    let term = store.term(term_id)?;
                    Some(score_term(store, term_id, &term.name))
                })
                .collect();

            let score = if terms.is_empty() {
                warn!("block {} has no terms to score", block.name);
                0
            } else {
                // Truncating division: (94 + 100) / 2 scores 97, not 97.5.
                terms.iter().map(|t| t.score).sum::<i32>() / terms.len() as i32
            };

            BlockScore {
                block: block_id,
                block_name: block.name.clone(),
                program_name,
                score,
                terms,
            }
        })
        .collect()
}

/// Scores every block and writes the results into `Block::ranking`.
pub fn rank_blocks(store: &mut EntityStore) -> Result<Vec<BlockScore>, ScheduleError> {
    let scores = score_blocks(store);
    info!("ranking {} blocks", scores.len());
    for block_score in &scores {
        store.set_block_ranking(block_score.block, block_score.score)?;
        info!(
            "  {} ({}): {}/100",
            block_score.block_name, block_score.program_name, block_score.score
        );
    }
    Ok(scores)
}

/// Scores one term: builds a per-weekday interval grid from its placed
/// sections (skipping sections with missing/unparsable times) and charges
/// gap and rest deductions.
fn score_term(store: &EntityStore, term: TermId, name: &str) -> TermScore {
    let mut grid: [Vec<(u16, u16)>; 5] = Default::default();
    for assignment in store.assignments_in(term) {
        let Some(course) = store.course(assignment.section) else {
            continue;
        };
        for (day, spans) in expand_course(course) {
            if let Some(idx) = day_index(day) {
                grid[idx].extend(spans);
            }
        }
    }
    for day in &mut grid {
        day.sort_by_key(|&(start, _)| start);
    }

    let mut deductions = Vec::new();
    charge_gap_penalties(&grid, &mut deductions);
    charge_rest_penalties(&grid, &mut deductions);

    let total: i32 = deductions.iter().map(|d| d.points).sum();
    TermScore {
        term,
        name: name.to_string(),
        score: BASE_SCORE - total,
        deductions,
    }
}

/// Gap penalty: for each day, each adjacent class pair with a gap beyond the
/// allowance costs `PENALTY_PER_30MIN_GAP` per started-and-completed 30
/// minutes of excess.
fn charge_gap_penalties(grid: &[Vec<(u16, u16)>; 5], deductions: &mut Vec<Deduction>) {
    for (day, classes) in grid.iter().enumerate() {
        for pair in classes.windows(2) {
            let gap = pair[1].0 as i32 - pair[0].1 as i32;
            if gap > GAP_ALLOWANCE_MIN {
                let points = (gap - GAP_ALLOWANCE_MIN) / 30 * PENALTY_PER_30MIN_GAP;
                if points > 0 {
                    deductions.push(Deduction {
                        points,
                        detail: DeductionDetail::Gap { day, gap_min: gap },
                    });
                }
            }
        }
    }
}

/// Rest penalty: for each consecutive weekday pair with classes on both
/// days, overnight rest below `MIN_REST_MIN` costs
/// `PENALTY_PER_30MIN_SLEEP_LOSS` per full 30 minutes lost.
fn charge_rest_penalties(grid: &[Vec<(u16, u16)>; 5], deductions: &mut Vec<Deduction>) {
    for from_day in 0..4 {
        let (today, tomorrow) = (&grid[from_day], &grid[from_day + 1]);
        let (Some(&(_, last_end)), Some(&(first_start, _))) = (today.last(), tomorrow.first())
        else {
            continue;
        };
        let rest = (1440 - last_end as i32) + first_start as i32;
        if rest < MIN_REST_MIN {
            let points = (MIN_REST_MIN - rest) / 30 * PENALTY_PER_30MIN_SLEEP_LOSS;
            if points > 0 {
                deductions.push(Deduction {
                    points,
                    detail: DeductionDetail::Rest {
                        from_day,
                        rest_min: rest,
                    },
                });
            }
        }
    }
}
