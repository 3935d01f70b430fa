//! Program, block, and term models.
//!
//! A `Program` is an academic program with a total enrollment. Before each
//! generation run the scheduler splits it into `Block`s (cohorts of students
//! that attend every class together) and gives each block one `Term` per
//! configured term name.
//!
//! Blocks and terms are transient: they are deleted and rebuilt at the start
//! of every run. Only `Block::ranking` carries output state, written by the
//! quality ranker after scheduling completes.

use serde::{Deserialize, Serialize};

/// Arena index of a [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProgramId(pub(crate) usize);

/// Arena index of a [`Block`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(pub(crate) usize);

/// Arena index of a [`Term`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TermId(pub(crate) usize);

/// An academic program with a total enrollment count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Program name (e.g. "Computer Science").
    pub name: String,
    /// Total enrolled students. Zero means the program produces no blocks.
    pub enrolled: u32,
}

impl Program {
    /// Creates a program.
    pub fn new(name: impl Into<String>, enrolled: u32) -> Self {
        Self {
            name: name.into(),
            enrolled,
        }
    }
}

/// A cohort of students within a program.
///
/// All students in a block share one timetable; `size` is the headcount that
/// every placed section's enrollment is incremented by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    /// Owning program.
    pub program: ProgramId,
    /// Display name ("Block A", "Block B", …).
    pub name: String,
    /// Student count.
    pub size: u32,
    /// Quality score (0–100 nominal; not clamped). Written by the ranker.
    pub ranking: i32,
}

impl Block {
    /// Creates a block with a zeroed ranking.
    pub fn new(program: ProgramId, name: impl Into<String>, size: u32) -> Self {
        Self {
            program,
            name: name.into(),
            size,
            ranking: 0,
        }
    }

    /// Display name for the i-th block of a program: "Block A", "Block B", …
    pub fn name_for_index(index: usize) -> String {
        // Wraps past 26 blocks as "Block A1", "Block B1", … in practice
        // programs stay well under 26 blocks.
        let letter = (b'A' + (index % 26) as u8) as char;
        let suffix = index / 26;
        if suffix == 0 {
            format!("Block {letter}")
        } else {
            format!("Block {letter}{suffix}")
        }
    }
}

/// One academic term inside a block (e.g. "fall", "winter").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Term {
    /// Owning block.
    pub block: BlockId,
    /// Term name, compared case-insensitively against requirement terms.
    pub name: String,
}

impl Term {
    /// Creates a term.
    pub fn new(block: BlockId, name: impl Into<String>) -> Self {
        Self {
            block,
            name: name.into(),
        }
    }

    /// Whether this term matches a requirement's term name.
    pub fn matches(&self, term_name: &str) -> bool {
        self.name.eq_ignore_ascii_case(term_name)
    }
}
