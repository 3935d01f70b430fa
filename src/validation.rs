//! Input data validation.
//!
//! Checks the structural integrity of loaded programs, courses, and
//! requirements before a scheduling run. Detects:
//! - Courses with missing or unparsable meeting days/times
//! - Duplicate (code, section) pairs
//! - Child sections with unexpected instruction types
//! - Requirements no lecture section can satisfy
//! - Programs with no requirements or no enrollment
//!
//! Findings are warnings, not errors: the scheduler runs on imperfect data
//! and simply cannot place what it cannot parse. Callers decide whether any
//! finding is fatal for their use case.

use std::collections::HashSet;

use crate::conflict::{parse_days, parse_time, DAY_CODES};
use crate::models::Requirement;
use crate::store::EntityStore;

/// A data quality finding.
#[derive(Debug, Clone, PartialEq)]
pub struct DataWarning {
    /// Finding category.
    pub kind: DataWarningKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of data quality findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataWarningKind {
    /// A course has no usable meeting days.
    MissingDays,
    /// A course meets on a day letter outside Mon–Fri. Such days still
    /// constrain conflict detection but are never scored or rendered.
    UnknownDays,
    /// A course's start/end times are absent or unparsable.
    MissingTimes,
    /// A course's end time is not after its start time.
    InvertedTimes,
    /// Two courses share the same (code, section) pair.
    DuplicateSection,
    /// A child section's instruction type is neither lab nor tutorial.
    UnexpectedChildType,
    /// A required code has no lecture section to schedule.
    UnsatisfiableRequirement,
    /// A program has no requirements at all.
    NoRequirements,
    /// A program has zero enrolled students.
    NoEnrollment,
}

impl DataWarning {
    fn new(kind: DataWarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the store's input data.
///
/// Checks:
/// 1. Every course has parsable meeting days and times
/// 2. End times follow start times
/// 3. No duplicate (code, section) pairs
/// 4. Child sections are labs or tutorials
/// 5. Every required code (electives aside) has at least one lecture section
/// 6. Every program has requirements and enrollment
///
/// Returns all findings; an empty vector means the data is clean.
pub fn validate_store(store: &EntityStore) -> Vec<DataWarning> {
    let mut warnings = Vec::new();

    let mut seen_sections = HashSet::new();
    for (_, course) in store.courses() {
        let label = format!("{} {}", course.code, course.section);

        if !seen_sections.insert((course.code.as_str(), course.section.as_str())) {
            warnings.push(DataWarning::new(
                DataWarningKind::DuplicateSection,
                format!("Duplicate section: {label}"),
            ));
        }

        match &course.days {
            None => warnings.push(DataWarning::new(
                DataWarningKind::MissingDays,
                format!("{label} has no meeting days"),
            )),
            Some(days) => {
                let letters = parse_days(days);
                if letters.is_empty() {
                    warnings.push(DataWarning::new(
                        DataWarningKind::MissingDays,
                        format!("{label} has no meeting days"),
                    ));
                } else if letters.iter().any(|c| !DAY_CODES.contains(c)) {
                    warnings.push(DataWarning::new(
                        DataWarningKind::UnknownDays,
                        format!("{label} meets on days outside Mon-Fri: '{days}'"),
                    ));
                }
            }
        }

        let start = course.start_time.as_deref().and_then(parse_time);
        let end = course.end_time.as_deref().and_then(parse_time);
        match (start, end) {
            (Some(s), Some(e)) if e <= s => warnings.push(DataWarning::new(
                DataWarningKind::InvertedTimes,
                format!("{label} ends at or before it starts"),
            )),
            (Some(_), Some(_)) => {}
            _ => warnings.push(DataWarning::new(
                DataWarningKind::MissingTimes,
                format!("{label} has missing or unparsable times"),
            )),
        }

        if course.parent.is_some() && !matches!(course.instr_type.code(), "LAB" | "TUT") {
            warnings.push(DataWarning::new(
                DataWarningKind::UnexpectedChildType,
                format!(
                    "{label} is attached to a lecture but typed {}",
                    course.instr_type.code()
                ),
            ));
        }
    }

    let mut checked_codes = HashSet::new();
    for req in store.requirements() {
        if Requirement::is_elective_placeholder(&req.code) {
            continue;
        }
        if !checked_codes.insert(req.code.as_str()) {
            continue;
        }
        if store.roots_for_code(&req.code).is_empty() {
            warnings.push(DataWarning::new(
                DataWarningKind::UnsatisfiableRequirement,
                format!("Required course {} has no lecture sections", req.code),
            ));
        }
    }

    for (id, program) in store.programs() {
        if store
            .requirements()
            .iter()
            .all(|req| req.program != id)
        {
            warnings.push(DataWarning::new(
                DataWarningKind::NoRequirements,
                format!("Program '{}' has no requirements", program.name),
            ));
        }
        if program.enrolled == 0 {
            warnings.push(DataWarning::new(
                DataWarningKind::NoEnrollment,
                format!("Program '{}' has no enrolled students", program.name),
            ));
        }
    }

    warnings
}
