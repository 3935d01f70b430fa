//! Course section model.
//!
//! A `Course` row is one weekly section: a lecture, or a lab/tutorial child
//! of a lecture. The hierarchy is flat — children carry a `parent` id and the
//! store maintains a by-parent index, rather than sections owning each other.
//!
//! Meeting times are kept as the raw strings they were imported with
//! (`days = "MWF"`, `start_time = "0900"`); parsing into minute intervals is
//! the conflict detector's job, so malformed data degrades to a warning
//! instead of failing the import.

use serde::{Deserialize, Serialize};

/// Arena index of a [`Course`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CourseId(pub(crate) usize);

/// Instructional type of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrType {
    /// Lecture — the root of a section hierarchy.
    Lecture,
    /// Lab child section.
    Lab,
    /// Tutorial child section.
    Tutorial,
    /// Any other type found in import data (e.g. "PA"). Ignored by bundling.
    Other(String),
}

impl InstrType {
    /// Parses an import-data type code ("LEC", "LAB", "TUT", …).
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "LEC" => Self::Lecture,
            "LAB" => Self::Lab,
            "TUT" => Self::Tutorial,
            other => Self::Other(other.to_string()),
        }
    }

    /// Short display code.
    pub fn code(&self) -> &str {
        match self {
            Self::Lecture => "LEC",
            Self::Lab => "LAB",
            Self::Tutorial => "TUT",
            Self::Other(s) => s,
        }
    }
}

/// One weekly course section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Course code (e.g. "MATH 1004").
    pub code: String,
    /// Section identifier (e.g. "A", "L1").
    pub section: String,
    /// Instructional type.
    pub instr_type: InstrType,
    /// Owning lecture for lab/tutorial sections; `None` for lectures.
    pub parent: Option<CourseId>,
    /// Weekly day letters ("MWF", "TR"); `None`/empty means unscheduled.
    pub days: Option<String>,
    /// Start time as "HHMM".
    pub start_time: Option<String>,
    /// End time as "HHMM".
    pub end_time: Option<String>,
    /// Seat capacity; `None` means unlimited.
    pub capacity: Option<u32>,
    /// Students currently assigned. Reset to zero before each run.
    pub enrolled: u32,
}

impl Course {
    /// Creates a section with no meeting times and unlimited capacity.
    pub fn new(code: impl Into<String>, section: impl Into<String>, instr_type: InstrType) -> Self {
        Self {
            code: code.into(),
            section: section.into(),
            instr_type,
            parent: None,
            days: None,
            start_time: None,
            end_time: None,
            capacity: None,
            enrolled: 0,
        }
    }

    /// Sets the parent lecture id.
    pub fn with_parent(mut self, parent: CourseId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the weekly meeting pattern.
    pub fn with_times(
        mut self,
        days: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.days = Some(days.into());
        self.start_time = Some(start.into());
        self.end_time = Some(end.into());
        self
    }

    /// Sets the seat capacity.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Whether this is a root (lecture) section.
    #[inline]
    pub fn is_lecture(&self) -> bool {
        self.instr_type == InstrType::Lecture
    }

    /// Whether `extra` more students fit. Missing capacity means unlimited.
    #[inline]
    pub fn has_seats_for(&self, extra: u32) -> bool {
        match self.capacity {
            Some(cap) => self.enrolled + extra <= cap,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instr_type_from_code() {
        assert_eq!(InstrType::from_code("LEC"), InstrType::Lecture);
        assert_eq!(InstrType::from_code("lab "), InstrType::Lab);
        assert_eq!(InstrType::from_code("TUT"), InstrType::Tutorial);
        assert_eq!(InstrType::from_code("PA"), InstrType::Other("PA".into()));
    }

    #[test]
    fn test_has_seats_for() {
        let mut c = Course::new("TEST", "A", InstrType::Lecture).with_capacity(30);
        c.enrolled = 10;
        assert!(c.has_seats_for(15)); // 10 + 15 <= 30
        assert!(c.has_seats_for(20)); // exactly full is allowed
        assert!(!c.has_seats_for(21));
    }

    #[test]
    fn test_missing_capacity_is_unlimited() {
        let mut c = Course::new("TEST", "A", InstrType::Lecture);
        c.enrolled = 10_000;
        assert!(c.has_seats_for(u32::MAX / 2));
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = Course::new("MATH 1004", "A", InstrType::Lecture)
            .with_times("MWF", "0900", "1000")
            .with_capacity(120);
        let json = serde_json::to_string(&c).unwrap();
        let back: Course = serde_json::from_str(&json).unwrap();
        assert_eq!(back.code, "MATH 1004");
        assert_eq!(back.capacity, Some(120));
        assert_eq!(back.days.as_deref(), Some("MWF"));
    }
}
