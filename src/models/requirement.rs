//! Program course requirements.

use serde::{Deserialize, Serialize};

use super::ProgramId;

/// A program's need for a course code in a given term.
///
/// Unique per (program, code) — a program cannot require the same course
/// twice, even in different terms. Enforced by the store on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirement {
    /// Requiring program.
    pub program: ProgramId,
    /// Required course code.
    pub code: String,
    /// Term name the course must land in ("fall", "winter", …).
    pub term_name: String,
}

impl Requirement {
    /// Creates a requirement.
    pub fn new(program: ProgramId, code: impl Into<String>, term_name: impl Into<String>) -> Self {
        Self {
            program,
            code: code.into(),
            term_name: term_name.into(),
        }
    }

    /// Whether this code is an elective placeholder rather than a real course.
    ///
    /// Import data marks free-choice slots with codes like "Elective 1";
    /// these are excluded from priority ranking and missing-course counts.
    pub fn is_elective_placeholder(code: &str) -> bool {
        code.to_ascii_lowercase().contains("elective")
    }
}
