//! Bundle enumeration.
//!
//! A bundle is the unit of placement: one lecture plus at most one lab and
//! one tutorial, all children of that lecture. The scheduler commits or
//! evicts whole bundles, never individual child sections.

use crate::models::{CourseId, InstrType};
use crate::store::EntityStore;

/// An ordered set of 1–3 sections sharing one lecture root, lecture first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    sections: Vec<CourseId>,
}

impl Bundle {
    fn new(sections: Vec<CourseId>) -> Self {
        Self { sections }
    }

    /// The sections of this bundle, lecture first.
    pub fn sections(&self) -> &[CourseId] {
        &self.sections
    }

    /// The lecture root.
    pub fn lecture(&self) -> CourseId {
        self.sections[0]
    }

    /// Number of sections (1–3).
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Always false: a bundle holds at least its lecture.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Enumerates every valid bundle for a course code.
///
/// For each lecture root with the code, children are partitioned into labs
/// and tutorials and one bundle is produced per (lab, tutorial) pair of the
/// cross product. An empty category contributes a single absent placeholder,
/// so a lecture with three labs and no tutorials yields three 2-section
/// bundles, and a bare lecture yields one 1-section bundle. Children of
/// different roots are never mixed. Child sections of other types ("PA", …)
/// do not participate.
pub fn course_bundles(store: &EntityStore, code: &str) -> Vec<Bundle> {
    let mut bundles = Vec::new();

    for root in store.roots_for_code(code) {
        let mut labs: Vec<CourseId> = Vec::new();
        let mut tutorials: Vec<CourseId> = Vec::new();
        for &child in store.children_of(root) {
            let Some(course) = store.course(child) else {
                continue;
            };
            match course.instr_type {
                InstrType::Lab => labs.push(child),
                InstrType::Tutorial => tutorials.push(child),
                _ => {}
            }
        }

        if labs.is_empty() && tutorials.is_empty() {
            bundles.push(Bundle::new(vec![root]));
            continue;
        }

        let lab_choices: Vec<Option<CourseId>> = if labs.is_empty() {
            vec![None]
        } else {
            labs.into_iter().map(Some).collect()
        };
        let tut_choices: Vec<Option<CourseId>> = if tutorials.is_empty() {
            vec![None]
        } else {
            tutorials.into_iter().map(Some).collect()
        };

        for &lab in &lab_choices {
            for &tut in &tut_choices {
                let mut sections = vec![root];
                sections.extend(lab);
                sections.extend(tut);
                bundles.push(Bundle::new(sections));
            }
        }
    }

    bundles
}

/// Number of bundles available for a code — the "flexibility" measure used
/// by priority ordering and victim ranking. Lower means harder to place.
pub fn bundle_count(store: &EntityStore, code: &str) -> usize {
    store
        .roots_for_code(code)
        .into_iter()
        .map(|root| {
            let (mut labs, mut tutorials) = (0usize, 0usize);
            for &child in store.children_of(root) {
                match store.course(child).map(|c| &c.instr_type) {
                    Some(InstrType::Lab) => labs += 1,
                    Some(InstrType::Tutorial) => tutorials += 1,
                    _ => {}
                }
            }
            labs.max(1) * tutorials.max(1)
        })
        .sum()
}
