//! Error types for store integrity violations.
//!
//! Only structural problems are `Err`s: dangling ids, a child section whose
//! parent breaks the lecture-parent invariant, a duplicate requirement.
//! Scheduling failures (no feasible bundle, conflict, exhausted repair depth)
//! are reported outcomes, not errors — see [`crate::scheduler::GenerationReport`].

use thiserror::Error;

use crate::models::{BlockId, CourseId, ProgramId};

/// Entity-store integrity error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A program id does not exist in the store.
    #[error("unknown program id {0:?}")]
    UnknownProgram(ProgramId),

    /// A block id does not exist in the store.
    #[error("unknown block id {0:?}")]
    UnknownBlock(BlockId),

    /// A course id does not exist in the store.
    #[error("unknown course id {0:?}")]
    UnknownCourse(CourseId),

    /// A non-lecture section must reference a lecture parent with the same code.
    #[error("section {section} of {code} has an invalid parent: {reason}")]
    InvalidParent {
        /// Course code of the offending section.
        code: String,
        /// Section identifier of the offending section.
        section: String,
        /// Why the parent reference is rejected.
        reason: String,
    },

    /// A program may require a course code at most once.
    #[error("duplicate requirement: program already requires {code}")]
    DuplicateRequirement {
        /// The course code required twice.
        code: String,
    },
}
