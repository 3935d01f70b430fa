//! Course timetabling engine for cohort-based programs.
//!
//! Builds per-program cohort blocks, assigns every required course a
//! conflict-free combination of sections, and scores the resulting weekly
//! timetables for student-experience quality.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Program`, `Block`, `Term`, `Course`,
//!   `Requirement`, `Assignment`
//! - **`store`**: Arena-backed entity store with code/hierarchy indexes
//! - **`conflict`**: Meeting-time parsing and overlap detection
//! - **`bundles`**: Lecture/lab/tutorial section combinations per course
//! - **`priority`**: Demand-then-flexibility course ordering
//! - **`scheduler`**: Greedy placement with kick-and-repair eviction
//! - **`ranking`**: Gap and overnight-rest quality scoring
//! - **`report`**: Schedule tables, weekly grids, and score breakdowns
//! - **`validation`**: Input integrity checks (days/times, duplicates, refs)
//!
//! # Pipeline
//!
//! A typical run loads data into an [`store::EntityStore`], validates it,
//! generates a schedule, and ranks the blocks:
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use termtable::models::{Course, InstrType, Program, Requirement};
//! use termtable::ranking::rank_blocks;
//! use termtable::scheduler::{GlobalScheduler, SchedulerConfig};
//! use termtable::store::EntityStore;
//!
//! # fn main() -> Result<(), termtable::error::ScheduleError> {
//! let mut store = EntityStore::new();
//! let program = store.add_program(Program::new("Engineering", 35));
//! store.add_requirement(Requirement::new(program, "MATH100", "fall"))?;
//! store.add_course(
//!     Course::new("MATH100", "A", InstrType::Lecture)
//!         .with_times("MWF", "0900", "1000")
//!         .with_capacity(60),
//! )?;
//!
//! let scheduler = GlobalScheduler::new(SchedulerConfig::default());
//! let mut rng = SmallRng::seed_from_u64(7);
//! let report = scheduler.generate(&mut store, &mut rng)?;
//! assert!(report.is_complete());
//!
//! let scores = rank_blocks(&mut store)?;
//! assert_eq!(scores[0].score, 100);
//! # Ok(())
//! # }
//! ```

pub mod bundles;
pub mod conflict;
pub mod error;
pub mod models;
pub mod priority;
pub mod ranking;
pub mod report;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::ScheduleError;
pub use scheduler::{GenerationReport, GlobalScheduler, SchedulerConfig};
pub use store::EntityStore;
