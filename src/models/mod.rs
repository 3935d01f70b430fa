//! Timetabling domain models.
//!
//! Core data types for representing a cohort-based timetabling problem:
//! academic programs split into student blocks, terms within blocks, course
//! sections with a lecture/lab/tutorial hierarchy, program requirements, and
//! the assignments a generation run produces.
//!
//! Entities live in arenas inside [`crate::store::EntityStore`] and reference
//! each other through index-based ids (`ProgramId`, `CourseId`, …) rather
//! than an owned object graph.

mod assignment;
mod course;
mod program;
mod requirement;

pub use assignment::Assignment;
pub use course::{Course, CourseId, InstrType};
pub use program::{Block, BlockId, Program, ProgramId, Term, TermId};
pub use requirement::Requirement;
