//! Priority ordering of required course codes.
//!
//! Orders codes hardest-first for the scheduler's outer loop:
//! - **demand** (how many distinct programs require the code) descending —
//!   widely shared courses claim seats and time slots first;
//! - **flexibility** (how many bundles exist for the code) ascending — a
//!   course with one section must be placed before one with twenty;
//! - a per-invocation random tiebreak, so repeated runs on identical data
//!   explore different orders among otherwise-equal codes.
//!
//! Elective placeholders are excluded: they name a category, not a section.

use std::collections::HashSet;

use rand::Rng;

use crate::bundles::bundle_count;
use crate::models::Requirement;
use crate::store::EntityStore;

/// Priority ranking entry for one required course code.
#[derive(Debug, Clone)]
pub struct CoursePriority {
    /// The course code.
    pub code: String,
    /// Number of distinct programs requiring this code.
    pub demand: usize,
    /// Number of bundles available for this code.
    pub flexibility: usize,
    /// Random tiebreak drawn fresh per invocation.
    pub tiebreak: f64,
}

/// Ranks every distinct required course code, hardest first.
pub fn rank_courses<R: Rng>(store: &EntityStore, rng: &mut R) -> Vec<CoursePriority> {
    let mut ranked: Vec<CoursePriority> = store
        .required_codes()
        .into_iter()
        .filter(|code| !Requirement::is_elective_placeholder(code))
        .map(|code| {
            let demand = store
                .requirements_for_code(code)
                .iter()
                .map(|r| r.program)
                .collect::<HashSet<_>>()
                .len();
            CoursePriority {
                code: code.to_string(),
                demand,
                flexibility: bundle_count(store, code),
                tiebreak: rng.random(),
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.demand
            .cmp(&a.demand)
            .then(a.flexibility.cmp(&b.flexibility))
            .then(b.tiebreak.total_cmp(&a.tiebreak))
    });
    ranked
}
