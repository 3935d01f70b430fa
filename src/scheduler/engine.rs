//! Greedy placement engine with kick-and-repair backtracking.
//!
//! # Run structure
//!
//! 1. Rebuild every program's blocks and terms from its enrollment; clear all
//!    assignments and zero all enrollment counters.
//! 2. Order required course codes hardest-first (`priority`).
//! 3. For each code, shuffle its target terms and try standard placement:
//!    the first shuffled bundle with seats for the block and no time conflict
//!    against the term is committed atomically.
//! 4. On failure, kick-and-repair: evict an already-placed course group
//!    (easiest-to-reschedule first) whose removal clears the conflict, commit
//!    the new bundle, then re-place the victim recursively. Recursion depth
//!    is hard-bounded.
//! 5. Count missing required placements; retry the whole run (fresh shuffles)
//!    up to the attempt limit, stopping early on a zero-missing result.
//!
//! Placement failures are reported, never raised: an `Err` from this module
//! means store corruption (dangling id), not an unschedulable course.

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::bundles::{bundle_count, course_bundles, Bundle};
use crate::conflict::bundle_conflicts_with_groups;
use crate::error::ScheduleError;
use crate::models::{
    Assignment, Block, BlockId, CourseId, ProgramId, Requirement, Term, TermId,
};
use crate::priority::rank_courses;
use crate::store::EntityStore;

use super::SchedulerConfig;

/// A required course that no run attempt could place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCourse {
    /// Program whose requirement went unmet.
    pub program: ProgramId,
    /// Block the term belongs to.
    pub block: BlockId,
    /// Term the course should have landed in.
    pub term: TermId,
    /// The unplaced course code.
    pub code: String,
}

/// Outcome of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Attempts consumed (≤ the configured limit).
    pub attempts: u32,
    /// Total assignments committed by the final attempt.
    pub placements: usize,
    /// Required (non-elective) placements the final attempt could not make.
    pub missing: Vec<MissingCourse>,
    /// Data-quality and placement warnings gathered during the run.
    pub warnings: Vec<String>,
}

impl GenerationReport {
    /// Whether every required course was placed.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Placement-check budget. Each capacity/conflict probe spends one unit;
/// an exhausted budget abandons the run instead of looping further.
struct Budget {
    used: u64,
    cap: u64,
}

impl Budget {
    fn new(cap: u64) -> Self {
        Self { used: 0, cap }
    }

    fn spend(&mut self) {
        self.used += 1;
    }

    fn exhausted(&self) -> bool {
        self.used >= self.cap
    }
}

/// The greedy kick-and-repair scheduler.
#[derive(Debug, Clone, Default)]
pub struct GlobalScheduler {
    config: SchedulerConfig,
}

impl GlobalScheduler {
    /// Creates a scheduler with the given configuration.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Runs schedule generation against the store.
    ///
    /// The RNG drives every shuffle and tiebreak; pass a seeded generator
    /// for reproducible output. Returns `Err` only on store integrity
    /// failures — unplaceable courses land in the report's `missing` list.
    pub fn generate<R: Rng>(
        &self,
        store: &mut EntityStore,
        rng: &mut R,
    ) -> Result<GenerationReport, ScheduleError> {
        let mut budget = Budget::new(self.config.max_iterations);
        let mut last = GenerationReport::default();
        let attempts = self.config.max_attempts.max(1);

        for attempt in 1..=attempts {
            let mut warnings = Vec::new();
            self.rebuild_blocks(store, &mut warnings)?;
            store.clear_assignments();
            store.reset_enrollment();

            let ranked = rank_courses(store, rng);
            info!("attempt {attempt}: scheduling {} course codes", ranked.len());

            for entry in &ranked {
                if budget.exhausted() {
                    let msg = format!(
                        "placement budget exhausted after {} checks; abandoning run",
                        budget.used
                    );
                    warn!("{msg}");
                    warnings.push(msg);
                    break;
                }
                self.schedule_code(store, rng, &entry.code, &mut budget, &mut warnings)?;
            }

            let missing = self.missing_required(store);
            info!(
                "attempt {attempt}: {} assignments committed, {} required placements missing",
                store.assignments().len(),
                missing.len()
            );
            // The report always describes the store's current (latest
            // attempt's) state; nothing from discarded attempts survives.
            last = GenerationReport {
                attempts: attempt,
                placements: store.assignments().len(),
                missing,
                warnings,
            };
            if last.is_complete() || budget.exhausted() {
                break;
            }
        }

        Ok(last)
    }

    /// Rebuilds a program's blocks and terms from its enrollment:
    /// `ceil(enrolled / block_size)` blocks, all but the last at full block
    /// size, the last taking the remainder.
    fn rebuild_blocks(
        &self,
        store: &mut EntityStore,
        warnings: &mut Vec<String>,
    ) -> Result<(), ScheduleError> {
        let programs: Vec<(ProgramId, String, u32)> = store
            .programs()
            .map(|(id, p)| (id, p.name.clone(), p.enrolled))
            .collect();

        // Like max_attempts in generate: the builder clamps, the field is
        // still public.
        let block_size = self.config.block_size.max(1);
        for (id, name, enrolled) in programs {
            store.delete_blocks(id);
            if enrolled == 0 {
                let msg = format!("program {name} has no enrolled students; skipping");
                warn!("{msg}");
                warnings.push(msg);
                continue;
            }

            let count = enrolled.div_ceil(block_size) as usize;
            for i in 0..count {
                let size = if i + 1 == count {
                    enrolled - block_size * (count as u32 - 1)
                } else {
                    block_size
                };
                let block = store.create_block(Block::new(id, Block::name_for_index(i), size))?;
                for term_name in &self.config.term_names {
                    store.create_term(Term::new(block, term_name.clone()))?;
                }
            }
            debug!("created {count} blocks for program {name}");
        }
        Ok(())
    }

    /// Places one course code into every term that requires it.
    fn schedule_code<R: Rng>(
        &self,
        store: &mut EntityStore,
        rng: &mut R,
        code: &str,
        budget: &mut Budget,
        warnings: &mut Vec<String>,
    ) -> Result<(), ScheduleError> {
        if course_bundles(store, code).is_empty() {
            let msg = format!("no sections found for required course {code}");
            warn!("{msg}");
            warnings.push(msg);
            return Ok(());
        }

        let requirement_terms: Vec<(ProgramId, String)> = store
            .requirements_for_code(code)
            .iter()
            .map(|r| (r.program, r.term_name.clone()))
            .collect();

        let mut targets: Vec<(TermId, u32)> = Vec::new();
        for (program, term_name) in requirement_terms {
            for block_id in store.blocks_of(program) {
                let Some(size) = store.block(block_id).map(|b| b.size) else {
                    continue;
                };
                for term_id in store.terms_of(block_id) {
                    let Some(term) = store.term(term_id) else { continue };
                    if term.matches(&term_name) && !store.is_assigned(term_id, code) {
                        targets.push((term_id, size));
                    }
                }
            }
        }
        targets.shuffle(rng);

        for (term, size) in targets {
            if budget.exhausted() {
                break;
            }
            if !self.place(store, rng, code, term, size, 0, budget)? {
                debug!("failed to place {code} in term {term:?}");
            }
        }
        Ok(())
    }

    /// Tries to place `code` in `term` for a block of `block_size` students:
    /// standard placement first, then kick-and-repair below the depth bound.
    ///
    /// Returns whether a bundle was committed. A committed eviction whose
    /// victim cannot be re-placed still counts as success for `code`; the
    /// victim shows up in the missing list instead.
    fn place<R: Rng>(
        &self,
        store: &mut EntityStore,
        rng: &mut R,
        code: &str,
        term: TermId,
        block_size: u32,
        depth: u32,
        budget: &mut Budget,
    ) -> Result<bool, ScheduleError> {
        let mut bundles = course_bundles(store, code);
        bundles.shuffle(rng);
        let placed = store.placed_groups(term);

        for bundle in &bundles {
            budget.spend();
            if self.bundle_fits(store, bundle, block_size)
                && !bundle_conflicts_with_groups(store, bundle.sections(), &placed)
            {
                self.commit(store, term, code, bundle, block_size)?;
                return Ok(true);
            }
        }

        if depth >= self.config.max_repair_depth {
            debug!("repair depth {depth} exhausted for {code} in term {term:?}");
            return Ok(false);
        }

        // Victims ranked easiest-to-reschedule first; the sort is stable, so
        // equally flexible victims keep placement order.
        let mut victims: Vec<(String, Vec<CourseId>)> = placed
            .iter()
            .filter(|(placed_code, _)| placed_code != code)
            .cloned()
            .collect();
        victims.sort_by_key(|(victim_code, _)| std::cmp::Reverse(bundle_count(store, victim_code)));

        for bundle in &bundles {
            // Eviction frees time slots, not seats in other courses'
            // sections, so capacity is settled here once per bundle.
            if !self.bundle_fits(store, bundle, block_size) {
                continue;
            }
            for (victim_code, victim_sections) in &victims {
                budget.spend();
                if budget.exhausted() {
                    return Ok(false);
                }
                let without_victim: Vec<(String, Vec<CourseId>)> = placed
                    .iter()
                    .filter(|(placed_code, _)| placed_code != victim_code)
                    .cloned()
                    .collect();
                if bundle_conflicts_with_groups(store, bundle.sections(), &without_victim) {
                    continue;
                }

                info!("evicting {victim_code} from term {term:?} to place {code} (depth {depth})");
                self.evict(store, term, victim_code, victim_sections, block_size)?;
                self.commit(store, term, code, bundle, block_size)?;

                if !self.place(store, rng, victim_code, term, block_size, depth + 1, budget)? {
                    warn!("evicted {victim_code} could not be re-placed in term {term:?}");
                }
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether every section of a bundle has seats for a block.
    fn bundle_fits(&self, store: &EntityStore, bundle: &Bundle, block_size: u32) -> bool {
        bundle
            .sections()
            .iter()
            .all(|&id| store.course(id).is_some_and(|c| c.has_seats_for(block_size)))
    }

    /// Commits a bundle: one assignment plus one enrollment increment per
    /// section. Single atomic unit — all checks happened before the first
    /// write, and store writes cannot fail for ids a bundle carries.
    fn commit(
        &self,
        store: &mut EntityStore,
        term: TermId,
        code: &str,
        bundle: &Bundle,
        block_size: u32,
    ) -> Result<(), ScheduleError> {
        for &section in bundle.sections() {
            store.add_assignment(Assignment::new(term, code, section));
            store.add_enrolled(section, block_size)?;
        }
        Ok(())
    }

    /// Evicts a placed group: deletes its assignments in the term and gives
    /// back the block's seats in every section.
    fn evict(
        &self,
        store: &mut EntityStore,
        term: TermId,
        code: &str,
        sections: &[CourseId],
        block_size: u32,
    ) -> Result<(), ScheduleError> {
        store.delete_assignments(term, code);
        for &section in sections {
            store.remove_enrolled(section, block_size)?;
        }
        Ok(())
    }

    /// Collects every required (non-elective) course code not assigned to a
    /// term that needs it.
    fn missing_required(&self, store: &EntityStore) -> Vec<MissingCourse> {
        let mut missing = Vec::new();
        for (program_id, _) in store.programs() {
            for block_id in store.blocks_of(program_id) {
                for term_id in store.terms_of(block_id) {
                    let Some(term) = store.term(term_id) else { continue };
                    for req in store.requirements_for(program_id, &term.name) {
                        if Requirement::is_elective_placeholder(&req.code) {
                            continue;
                        }
                        if !store.is_assigned(term_id, &req.code) {
                            missing.push(MissingCourse {
                                program: program_id,
                                block: block_id,
                                term: term_id,
                                code: req.code.clone(),
                            });
                        }
                    }
                }
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::{expand_course, slots_conflict};
    use crate::models::{Course, InstrType, Program};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn scheduler() -> GlobalScheduler {
        GlobalScheduler::new(SchedulerConfig::default())
    }

    fn add_lecture(
        store: &mut EntityStore,
        code: &str,
        section: &str,
        days: &str,
        start: &str,
        end: &str,
        capacity: Option<u32>,
    ) -> CourseId {
        let mut course = Course::new(code, section, InstrType::Lecture).with_times(days, start, end);
        if let Some(cap) = capacity {
            course = course.with_capacity(cap);
        }
        store.add_course(course).unwrap()
    }

    fn single_program_store(enrolled: u32) -> (EntityStore, ProgramId) {
        let mut store = EntityStore::new();
        let program = store.add_program(Program::new("Engineering", enrolled));
        (store, program)
    }

    #[test]
    fn test_block_rebuild_sizes() {
        let (mut store, program) = single_program_store(45);
        let report = scheduler()
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(report.attempts, 1);

        let blocks = store.blocks_of(program);
        assert_eq!(blocks.len(), 3);
        let sizes: Vec<u32> = blocks
            .iter()
            .map(|&b| store.block(b).unwrap().size)
            .collect();
        assert_eq!(sizes, vec![20, 20, 5]);
        let names: Vec<&str> = blocks
            .iter()
            .map(|&b| store.block(b).unwrap().name.as_str())
            .collect();
        assert_eq!(names, vec!["Block A", "Block B", "Block C"]);
        // Two terms per block
        for &b in &blocks {
            assert_eq!(store.terms_of(b).len(), 2);
        }
    }

    #[test]
    fn test_blocks_rebuilt_each_run() {
        let (mut store, program) = single_program_store(45);
        let engine = scheduler();
        engine
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();
        engine
            .generate(&mut store, &mut SmallRng::seed_from_u64(2))
            .unwrap();
        // No accumulation across runs
        assert_eq!(store.blocks_of(program).len(), 3);
    }

    #[test]
    fn test_zero_block_size_field_builds_singleton_blocks() {
        let (mut store, program) = single_program_store(5);
        let mut config = SchedulerConfig::default();
        config.block_size = 0; // bypasses the builder clamp
        GlobalScheduler::new(config)
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(store.blocks_of(program).len(), 5);
    }

    #[test]
    fn test_successful_placement_updates_enrollment() {
        let (mut store, program) = single_program_store(20);
        store
            .add_requirement(Requirement::new(program, "MATH100", "fall"))
            .unwrap();
        let course = add_lecture(&mut store, "MATH100", "A", "MWF", "0900", "1000", Some(30));

        let report = scheduler()
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();

        assert!(report.is_complete());
        assert_eq!(store.course(course).unwrap().enrolled, 20);
        let fall = store
            .terms_of(store.blocks_of(program)[0])
            .into_iter()
            .find(|&t| store.term(t).unwrap().matches("fall"))
            .unwrap();
        assert!(store.is_assigned(fall, "MATH100"));
    }

    #[test]
    fn test_capacity_too_small_is_never_placed() {
        let (mut store, program) = single_program_store(20);
        store
            .add_requirement(Requirement::new(program, "MATH100", "fall"))
            .unwrap();
        let course = add_lecture(&mut store, "MATH100", "A", "MWF", "0900", "1000", Some(10));

        let report = scheduler()
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(store.course(course).unwrap().enrolled, 0);
        assert!(store.assignments().is_empty());
        assert_eq!(report.missing.len(), 1);
        assert_eq!(report.missing[0].code, "MATH100");
    }

    #[test]
    fn test_falls_back_to_section_with_seats() {
        let (mut store, program) = single_program_store(20);
        store
            .add_requirement(Requirement::new(program, "MATH100", "fall"))
            .unwrap();
        add_lecture(&mut store, "MATH100", "A", "MWF", "0900", "1000", Some(5));
        let section_b = add_lecture(&mut store, "MATH100", "B", "TR", "1400", "1530", Some(50));

        let report = scheduler()
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();

        assert!(report.is_complete());
        assert_eq!(store.assignments().len(), 1);
        assert_eq!(store.assignments()[0].section, section_b);
    }

    #[test]
    fn test_overlapping_courses_not_both_placed() {
        let (mut store, program) = single_program_store(20);
        for code in ["MATH100", "PHYS100"] {
            store
                .add_requirement(Requirement::new(program, code, "fall"))
                .unwrap();
        }
        add_lecture(&mut store, "MATH100", "A", "MWF", "0900", "1000", Some(100));
        add_lecture(&mut store, "PHYS100", "A", "MWF", "0930", "1030", Some(100));

        let report = scheduler()
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();

        // One placed, the other reported missing
        assert_eq!(store.assignments().len(), 1);
        assert_eq!(report.missing.len(), 1);
    }

    #[test]
    fn test_weekend_sections_not_both_placed() {
        // Saturday is outside the ranker's Mon–Fri window but still a real
        // meeting day: two courses at the same Saturday time cannot share a
        // term.
        let (mut store, program) = single_program_store(20);
        for code in ["SAT100", "SAT200"] {
            store
                .add_requirement(Requirement::new(program, code, "fall"))
                .unwrap();
        }
        add_lecture(&mut store, "SAT100", "A", "S", "0900", "1000", Some(100));
        add_lecture(&mut store, "SAT200", "A", "S", "0900", "1000", Some(100));

        let report = scheduler()
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(store.assignments().len(), 1);
        assert_eq!(report.missing.len(), 1);
    }

    #[test]
    fn test_kick_and_repair_reschedules_flexible_victim() {
        // HARD has one section at Mon 9–10. FLEX has two sections, one of
        // which collides with HARD. FLEX is also required by a second
        // program, so it is placed first; whenever it lands on Mon 9–10,
        // placing HARD requires evicting FLEX and re-placing it at its
        // Tue section. Both must always end up placed.
        let mut store = EntityStore::new();
        let main = store.add_program(Program::new("Main", 20));
        let other = store.add_program(Program::new("Other", 20));
        for program in [main, other] {
            store
                .add_requirement(Requirement::new(program, "FLEX", "fall"))
                .unwrap();
        }
        store
            .add_requirement(Requirement::new(main, "HARD", "fall"))
            .unwrap();
        add_lecture(&mut store, "FLEX", "A", "M", "0900", "1000", None);
        add_lecture(&mut store, "FLEX", "B", "T", "0900", "1000", None);
        add_lecture(&mut store, "HARD", "A", "M", "0900", "1000", None);

        for seed in 0..20 {
            let report = scheduler()
                .generate(&mut store, &mut SmallRng::seed_from_u64(seed))
                .unwrap();
            assert!(report.is_complete(), "seed {seed}: {:?}", report.missing);
            let fall = store
                .terms_of(store.blocks_of(main)[0])
                .into_iter()
                .find(|&t| store.term(t).unwrap().matches("fall"))
                .unwrap();
            assert!(store.is_assigned(fall, "FLEX"));
            assert!(store.is_assigned(fall, "HARD"));
        }
    }

    #[test]
    fn test_repair_disabled_leaves_conflict_unresolved() {
        let mut store = EntityStore::new();
        let main = store.add_program(Program::new("Main", 20));
        let other = store.add_program(Program::new("Other", 20));
        for program in [main, other] {
            store
                .add_requirement(Requirement::new(program, "FLEX", "fall"))
                .unwrap();
        }
        store
            .add_requirement(Requirement::new(main, "HARD", "fall"))
            .unwrap();
        // FLEX's only section collides with HARD's only section.
        add_lecture(&mut store, "FLEX", "A", "M", "0900", "1000", None);
        add_lecture(&mut store, "HARD", "A", "M", "0900", "1000", None);

        let engine = GlobalScheduler::new(SchedulerConfig::default().with_max_repair_depth(0));
        let report = engine
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();

        // FLEX wins on demand; HARD stays missing in Main's fall term.
        assert!(!report.is_complete());
        assert!(report.missing.iter().any(|m| m.code == "HARD"));
    }

    #[test]
    fn test_missing_sections_warned_not_fatal() {
        let (mut store, program) = single_program_store(20);
        store
            .add_requirement(Requirement::new(program, "GHOST100", "fall"))
            .unwrap();

        let report = scheduler()
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();

        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("GHOST100")));
        assert_eq!(report.missing.len(), 1);
    }

    #[test]
    fn test_retry_loop_consumes_attempts_when_incomplete() {
        let (mut store, program) = single_program_store(20);
        store
            .add_requirement(Requirement::new(program, "MATH100", "fall"))
            .unwrap();
        add_lecture(&mut store, "MATH100", "A", "MWF", "0900", "1000", Some(10));

        let engine = GlobalScheduler::new(SchedulerConfig::default().with_max_attempts(3));
        let report = engine
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(report.attempts, 3);
        assert!(!report.is_complete());
    }

    #[test]
    fn test_retry_loop_stops_early_when_complete() {
        let (mut store, program) = single_program_store(20);
        store
            .add_requirement(Requirement::new(program, "MATH100", "fall"))
            .unwrap();
        add_lecture(&mut store, "MATH100", "A", "MWF", "0900", "1000", Some(30));

        let engine = GlobalScheduler::new(SchedulerConfig::default().with_max_attempts(5));
        let report = engine
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();

        assert_eq!(report.attempts, 1);
        assert!(report.is_complete());
    }

    fn busy_store() -> EntityStore {
        let mut store = EntityStore::new();
        let programs: Vec<ProgramId> = (0..3)
            .map(|i| store.add_program(Program::new(format!("Program {i}"), 40)))
            .collect();

        let slots = [
            ("MWF", "0830", "0930"),
            ("MWF", "1000", "1100"),
            ("TR", "0900", "1030"),
            ("TR", "1100", "1230"),
            ("MW", "1300", "1430"),
        ];
        for (i, &(days, start, end)) in slots.iter().enumerate() {
            let code = format!("CRS{i}");
            let lec = add_lecture(&mut store, &code, "A", days, start, end, Some(80));
            store
                .add_course(
                    Course::new(&code, "L1", InstrType::Lab)
                        .with_parent(lec)
                        .with_times("F", "1400", "1530")
                        .with_capacity(80),
                )
                .unwrap();
            for (p, &program) in programs.iter().enumerate() {
                if (i + p) % 2 == 0 {
                    store
                        .add_requirement(Requirement::new(
                            program,
                            &code,
                            if i % 2 == 0 { "fall" } else { "winter" },
                        ))
                        .unwrap();
                }
            }
        }
        store
    }

    #[test]
    fn test_capacity_invariant_after_full_run() {
        let mut store = busy_store();
        scheduler()
            .generate(&mut store, &mut SmallRng::seed_from_u64(11))
            .unwrap();

        for assignment in store.assignments() {
            let course = store.course(assignment.section).unwrap();
            if let Some(cap) = course.capacity {
                assert!(
                    course.enrolled <= cap,
                    "{} {} over capacity: {}/{}",
                    course.code,
                    course.section,
                    course.enrolled,
                    cap
                );
            }
        }
    }

    #[test]
    fn test_no_cross_code_overlap_in_any_term() {
        let mut store = busy_store();
        scheduler()
            .generate(&mut store, &mut SmallRng::seed_from_u64(13))
            .unwrap();

        let term_ids: Vec<TermId> = store
            .blocks()
            .flat_map(|(id, _)| store.terms_of(id))
            .collect();
        for term in term_ids {
            let groups = store.placed_groups(term);
            for (i, (code_a, sections_a)) in groups.iter().enumerate() {
                for (code_b, sections_b) in groups.iter().skip(i + 1) {
                    for &a in sections_a {
                        for &b in sections_b {
                            let slots_a = expand_course(store.course(a).unwrap());
                            let slots_b = expand_course(store.course(b).unwrap());
                            assert!(
                                !slots_conflict(&slots_a, &slots_b),
                                "{code_a} overlaps {code_b} in term {term:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let mut store_a = busy_store();
        let mut store_b = busy_store();
        let report_a = scheduler()
            .generate(&mut store_a, &mut SmallRng::seed_from_u64(42))
            .unwrap();
        let report_b = scheduler()
            .generate(&mut store_b, &mut SmallRng::seed_from_u64(42))
            .unwrap();

        assert_eq!(store_a.assignments(), store_b.assignments());
        assert_eq!(report_a.missing, report_b.missing);
    }

    #[test]
    fn test_iteration_budget_abandons_run() {
        let mut store = busy_store();
        let engine = GlobalScheduler::new(SchedulerConfig::default().with_max_iterations(1));
        let report = engine
            .generate(&mut store, &mut SmallRng::seed_from_u64(1))
            .unwrap();
        assert!(report
            .warnings
            .iter()
            .any(|w| w.contains("budget exhausted")));
    }
}
