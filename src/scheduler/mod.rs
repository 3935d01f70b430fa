//! The global scheduling engine.
//!
//! Builds student blocks from program enrollment, orders required courses
//! hardest-first, and places course bundles into terms with a greedy loop
//! backed by bounded kick-and-repair backtracking: when a course cannot be
//! placed, an easier-to-reschedule course already in the term is evicted to
//! make room, then re-placed recursively.
//!
//! The engine is a heuristic, not an exact solver — it aims for few missing
//! placements per run, and the run can be retried with fresh shuffles.

mod config;
mod engine;

pub use config::SchedulerConfig;
pub use engine::{GenerationReport, GlobalScheduler, MissingCourse};
