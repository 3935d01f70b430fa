//! Assignment model — the scheduler's output.

use serde::{Deserialize, Serialize};

use super::{CourseId, TermId};

/// A placed section: links one course section into a term's timetable.
///
/// A bundle placement creates one assignment per section in the bundle, all
/// sharing the same `code`. Assignments are cleared wholesale at the start of
/// each generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Term the section is placed in.
    pub term: TermId,
    /// Course code (denormalized for by-code queries and eviction).
    pub code: String,
    /// The placed section.
    pub section: CourseId,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(term: TermId, code: impl Into<String>, section: CourseId) -> Self {
        Self {
            term,
            code: code.into(),
            section,
        }
    }
}
