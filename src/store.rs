//! In-memory entity store.
//!
//! Holds every entity the engine reads or writes, behind synchronous calls.
//! Programs, courses, and requirements are loaded once and append-only;
//! blocks, terms, and assignments are churned by generation runs.
//!
//! # Id stability
//!
//! Programs and courses live in append-only arenas, so their ids are stable
//! for the store's lifetime. Blocks and terms are keyed by monotonically
//! increasing ids in ordered maps: deleting a program's blocks never shifts
//! another program's ids, and iteration follows creation order, which keeps
//! runs deterministic under a seeded RNG.
//!
//! The course hierarchy is flat: children carry a parent id and the store
//! maintains a by-parent index (no recursive object graph).

use std::collections::{BTreeMap, HashMap};

use crate::error::ScheduleError;
use crate::models::{
    Assignment, Block, BlockId, Course, CourseId, Program, ProgramId, Requirement, Term, TermId,
};

/// The entity store backing a scheduling run.
#[derive(Debug, Default)]
pub struct EntityStore {
    programs: Vec<Program>,
    courses: Vec<Course>,
    by_code: HashMap<String, Vec<CourseId>>,
    children: HashMap<CourseId, Vec<CourseId>>,
    blocks: BTreeMap<BlockId, Block>,
    next_block: usize,
    terms: BTreeMap<TermId, Term>,
    next_term: usize,
    requirements: Vec<Requirement>,
    assignments: Vec<Assignment>,
}

impl EntityStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------- programs ----------------

    /// Adds a program.
    pub fn add_program(&mut self, program: Program) -> ProgramId {
        self.programs.push(program);
        ProgramId(self.programs.len() - 1)
    }

    /// Looks up a program.
    pub fn program(&self, id: ProgramId) -> Option<&Program> {
        self.programs.get(id.0)
    }

    /// All programs in creation order.
    pub fn programs(&self) -> impl Iterator<Item = (ProgramId, &Program)> {
        self.programs.iter().enumerate().map(|(i, p)| (ProgramId(i), p))
    }

    // ---------------- blocks ----------------

    /// Creates a block. Fails if the owning program does not exist.
    pub fn create_block(&mut self, block: Block) -> Result<BlockId, ScheduleError> {
        if self.program(block.program).is_none() {
            return Err(ScheduleError::UnknownProgram(block.program));
        }
        let id = BlockId(self.next_block);
        self.next_block += 1;
        self.blocks.insert(id, block);
        Ok(id)
    }

    /// Deletes a program's blocks, cascading to their terms and assignments.
    pub fn delete_blocks(&mut self, program: ProgramId) {
        let doomed_blocks: Vec<BlockId> = self
            .blocks
            .iter()
            .filter(|(_, b)| b.program == program)
            .map(|(&id, _)| id)
            .collect();
        let doomed_terms: Vec<TermId> = self
            .terms
            .iter()
            .filter(|(_, t)| doomed_blocks.contains(&t.block))
            .map(|(&id, _)| id)
            .collect();
        self.assignments.retain(|a| !doomed_terms.contains(&a.term));
        for id in &doomed_terms {
            self.terms.remove(id);
        }
        for id in &doomed_blocks {
            self.blocks.remove(id);
        }
    }

    /// Looks up a block.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.get(&id)
    }

    /// Block ids of a program in creation order.
    pub fn blocks_of(&self, program: ProgramId) -> Vec<BlockId> {
        self.blocks
            .iter()
            .filter(|(_, b)| b.program == program)
            .map(|(&id, _)| id)
            .collect()
    }

    /// All blocks in creation order.
    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks.iter().map(|(&id, b)| (id, b))
    }

    /// Overwrites a block's ranking score.
    pub fn set_block_ranking(&mut self, id: BlockId, score: i32) -> Result<(), ScheduleError> {
        let block = self
            .blocks
            .get_mut(&id)
            .ok_or(ScheduleError::UnknownBlock(id))?;
        block.ranking = score;
        Ok(())
    }

    // ---------------- terms ----------------

    /// Creates a term. Fails if the owning block does not exist.
    pub fn create_term(&mut self, term: Term) -> Result<TermId, ScheduleError> {
        if self.block(term.block).is_none() {
            return Err(ScheduleError::UnknownBlock(term.block));
        }
        let id = TermId(self.next_term);
        self.next_term += 1;
        self.terms.insert(id, term);
        Ok(id)
    }

    /// Looks up a term.
    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.terms.get(&id)
    }

    /// Term ids of a block in creation order.
    pub fn terms_of(&self, block: BlockId) -> Vec<TermId> {
        self.terms
            .iter()
            .filter(|(_, t)| t.block == block)
            .map(|(&id, _)| id)
            .collect()
    }

    // ---------------- courses ----------------

    /// Adds a course section, maintaining the by-code and by-parent indexes.
    ///
    /// A section with a parent must reference an existing lecture with the
    /// same course code.
    pub fn add_course(&mut self, course: Course) -> Result<CourseId, ScheduleError> {
        if let Some(parent_id) = course.parent {
            let parent = self
                .course(parent_id)
                .ok_or(ScheduleError::UnknownCourse(parent_id))?;
            if !parent.is_lecture() {
                return Err(ScheduleError::InvalidParent {
                    code: course.code.clone(),
                    section: course.section.clone(),
                    reason: format!("parent {} is not a lecture", parent.section),
                });
            }
            if parent.code != course.code {
                return Err(ScheduleError::InvalidParent {
                    code: course.code.clone(),
                    section: course.section.clone(),
                    reason: format!("parent has different code {}", parent.code),
                });
            }
        }
        let id = CourseId(self.courses.len());
        self.by_code
            .entry(course.code.clone())
            .or_default()
            .push(id);
        if let Some(parent_id) = course.parent {
            self.children.entry(parent_id).or_default().push(id);
        }
        self.courses.push(course);
        Ok(id)
    }

    /// Looks up a course.
    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(id.0)
    }

    /// All courses with their ids, in insertion order.
    pub fn courses(&self) -> impl Iterator<Item = (CourseId, &Course)> {
        self.courses.iter().enumerate().map(|(i, c)| (CourseId(i), c))
    }

    /// All section ids with the given code, in insertion order.
    pub fn courses_by_code(&self, code: &str) -> &[CourseId] {
        self.by_code.get(code).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds a section by (code, section id).
    pub fn course_by_section(&self, code: &str, section: &str) -> Option<CourseId> {
        self.courses_by_code(code)
            .iter()
            .copied()
            .find(|&id| self.courses[id.0].section == section)
    }

    /// Child section ids of a lecture, in insertion order.
    pub fn children_of(&self, parent: CourseId) -> &[CourseId] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Root (lecture) section ids for a code.
    pub fn roots_for_code(&self, code: &str) -> Vec<CourseId> {
        self.courses_by_code(code)
            .iter()
            .copied()
            .filter(|&id| self.courses[id.0].parent.is_none())
            .collect()
    }

    /// Sets every section's enrolled count to zero.
    pub fn reset_enrollment(&mut self) {
        for course in &mut self.courses {
            course.enrolled = 0;
        }
    }

    /// Increments a section's enrolled count.
    pub fn add_enrolled(&mut self, id: CourseId, delta: u32) -> Result<(), ScheduleError> {
        let course = self
            .courses
            .get_mut(id.0)
            .ok_or(ScheduleError::UnknownCourse(id))?;
        course.enrolled += delta;
        Ok(())
    }

    /// Decrements a section's enrolled count (saturating at zero).
    pub fn remove_enrolled(&mut self, id: CourseId, delta: u32) -> Result<(), ScheduleError> {
        let course = self
            .courses
            .get_mut(id.0)
            .ok_or(ScheduleError::UnknownCourse(id))?;
        debug_assert!(course.enrolled >= delta, "enrollment underflow");
        course.enrolled = course.enrolled.saturating_sub(delta);
        Ok(())
    }

    // ---------------- requirements ----------------

    /// Adds a requirement, enforcing uniqueness per (program, code).
    pub fn add_requirement(&mut self, req: Requirement) -> Result<(), ScheduleError> {
        if self.program(req.program).is_none() {
            return Err(ScheduleError::UnknownProgram(req.program));
        }
        if self
            .requirements
            .iter()
            .any(|r| r.program == req.program && r.code == req.code)
        {
            return Err(ScheduleError::DuplicateRequirement { code: req.code });
        }
        self.requirements.push(req);
        Ok(())
    }

    /// All requirements.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Requirements for a course code.
    pub fn requirements_for_code(&self, code: &str) -> Vec<&Requirement> {
        self.requirements.iter().filter(|r| r.code == code).collect()
    }

    /// Requirements of a program for a term name (case-insensitive).
    pub fn requirements_for(&self, program: ProgramId, term_name: &str) -> Vec<&Requirement> {
        self.requirements
            .iter()
            .filter(|r| r.program == program && r.term_name.eq_ignore_ascii_case(term_name))
            .collect()
    }

    /// Distinct required course codes in first-seen order.
    pub fn required_codes(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for req in &self.requirements {
            if !seen.contains(&req.code.as_str()) {
                seen.push(&req.code);
            }
        }
        seen
    }

    // ---------------- assignments ----------------

    /// Records a placed section.
    pub fn add_assignment(&mut self, assignment: Assignment) {
        self.assignments.push(assignment);
    }

    /// Clears every assignment.
    pub fn clear_assignments(&mut self) {
        self.assignments.clear();
    }

    /// All assignments in placement order.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Assignments in a term.
    pub fn assignments_in(&self, term: TermId) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.term == term).collect()
    }

    /// Assignments in a term for a course code.
    pub fn assignments_for(&self, term: TermId, code: &str) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.term == term && a.code == code)
            .collect()
    }

    /// Deletes a term's assignments for a course code.
    pub fn delete_assignments(&mut self, term: TermId, code: &str) {
        self.assignments
            .retain(|a| !(a.term == term && a.code == code));
    }

    /// Whether a code is already placed in a term.
    pub fn is_assigned(&self, term: TermId, code: &str) -> bool {
        self.assignments
            .iter()
            .any(|a| a.term == term && a.code == code)
    }

    /// Placed course groups in a term: (code, sections), one entry per code,
    /// in placement order.
    pub fn placed_groups(&self, term: TermId) -> Vec<(String, Vec<CourseId>)> {
        let mut groups: Vec<(String, Vec<CourseId>)> = Vec::new();
        for a in self.assignments.iter().filter(|a| a.term == term) {
            match groups.iter_mut().find(|(code, _)| *code == a.code) {
                Some((_, sections)) => sections.push(a.section),
                None => groups.push((a.code.clone(), vec![a.section])),
            }
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InstrType;

    fn store_with_hierarchy() -> (EntityStore, CourseId, CourseId) {
        let mut store = EntityStore::new();
        let lec = store
            .add_course(Course::new("CS101", "A", InstrType::Lecture))
            .unwrap();
        let lab = store
            .add_course(Course::new("CS101", "L1", InstrType::Lab).with_parent(lec))
            .unwrap();
        (store, lec, lab)
    }

    #[test]
    fn test_by_code_and_by_parent_indexes() {
        let (store, lec, lab) = store_with_hierarchy();
        assert_eq!(store.courses_by_code("CS101"), &[lec, lab]);
        assert_eq!(store.children_of(lec), &[lab]);
        assert_eq!(store.roots_for_code("CS101"), vec![lec]);
        assert_eq!(store.course_by_section("CS101", "L1"), Some(lab));
        assert!(store.courses_by_code("NOPE").is_empty());
    }

    #[test]
    fn test_parent_must_be_lecture_with_same_code() {
        let (mut store, _, lab) = store_with_hierarchy();
        // Parent is a lab
        let err = store
            .add_course(Course::new("CS101", "T1", InstrType::Tutorial).with_parent(lab))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidParent { .. }));

        // Parent has a different code
        let other = store
            .add_course(Course::new("CS200", "A", InstrType::Lecture))
            .unwrap();
        let err = store
            .add_course(Course::new("CS101", "T1", InstrType::Tutorial).with_parent(other))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidParent { .. }));
    }

    #[test]
    fn test_requirement_uniqueness() {
        let mut store = EntityStore::new();
        let prog = store.add_program(Program::new("Eng", 20));
        store
            .add_requirement(Requirement::new(prog, "MATH100", "fall"))
            .unwrap();
        let err = store
            .add_requirement(Requirement::new(prog, "MATH100", "winter"))
            .unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateRequirement { .. }));
        assert_eq!(store.required_codes(), vec!["MATH100"]);
    }

    #[test]
    fn test_delete_blocks_cascades() {
        let mut store = EntityStore::new();
        let p1 = store.add_program(Program::new("Eng", 20));
        let p2 = store.add_program(Program::new("Sci", 20));
        let b1 = store.create_block(Block::new(p1, "Block A", 20)).unwrap();
        let b2 = store.create_block(Block::new(p2, "Block A", 20)).unwrap();
        let t1 = store.create_term(Term::new(b1, "fall")).unwrap();
        let t2 = store.create_term(Term::new(b2, "fall")).unwrap();
        let c = store
            .add_course(Course::new("CS101", "A", InstrType::Lecture))
            .unwrap();
        store.add_assignment(Assignment::new(t1, "CS101", c));
        store.add_assignment(Assignment::new(t2, "CS101", c));

        store.delete_blocks(p1);

        assert!(store.block(b1).is_none());
        assert!(store.term(t1).is_none());
        assert!(store.assignments_in(t1).is_empty());
        // p2's entities untouched, ids stable
        assert!(store.block(b2).is_some());
        assert_eq!(store.assignments_in(t2).len(), 1);
    }

    #[test]
    fn test_enrollment_adjustments() {
        let (mut store, lec, _) = store_with_hierarchy();
        store.add_enrolled(lec, 20).unwrap();
        assert_eq!(store.course(lec).unwrap().enrolled, 20);
        store.remove_enrolled(lec, 5).unwrap();
        assert_eq!(store.course(lec).unwrap().enrolled, 15);
        store.reset_enrollment();
        assert_eq!(store.course(lec).unwrap().enrolled, 0);
    }

    #[test]
    fn test_placed_groups_order_and_grouping() {
        let mut store = EntityStore::new();
        let p = store.add_program(Program::new("Eng", 20));
        let b = store.create_block(Block::new(p, "Block A", 20)).unwrap();
        let t = store.create_term(Term::new(b, "fall")).unwrap();
        let a1 = store
            .add_course(Course::new("CS101", "A", InstrType::Lecture))
            .unwrap();
        let a2 = store
            .add_course(Course::new("CS101", "L1", InstrType::Lab).with_parent(a1))
            .unwrap();
        let m = store
            .add_course(Course::new("MATH100", "A", InstrType::Lecture))
            .unwrap();
        store.add_assignment(Assignment::new(t, "CS101", a1));
        store.add_assignment(Assignment::new(t, "CS101", a2));
        store.add_assignment(Assignment::new(t, "MATH100", m));

        let groups = store.placed_groups(t);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], ("CS101".to_string(), vec![a1, a2]));
        assert_eq!(groups[1], ("MATH100".to_string(), vec![m]));
        assert!(store.is_assigned(t, "CS101"));

        let cs_assignments = store.assignments_for(t, "CS101");
        assert_eq!(cs_assignments.len(), 2);
        assert!(cs_assignments.iter().all(|a| a.code == "CS101"));
        assert_eq!(store.assignments_for(t, "MATH100").len(), 1);

        store.delete_assignments(t, "CS101");
        assert!(!store.is_assigned(t, "CS101"));
        assert!(store.assignments_for(t, "CS101").is_empty());
        assert_eq!(store.placed_groups(t).len(), 1);
    }
}
