//! Fact compilation.
//!
//! Renders a roster and its policy into facts and appends them to the
//! policy modules. The generated sections are, in order: enumerations
//! (skills, dates, regions), configuration (quotas, follow-up, distances),
//! and one block of attribute facts per participant.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::policy::PolicyModules;
use super::{AspSolver, SolutionDecoder};
use crate::history::history_size;
use crate::models::{Participant, PolicyParameters, Range, Solution, SolverStatus};
use crate::sanitize::{
    sanitize_name, sanitize_opt, sanitized_availabilities, sanitized_locations, sanitized_skills,
};

/// Reviewers of an evaluated participant who must attend its meeting.
const REVIEWERS_PRESENT: i64 = 2;

/// Shortest review cycle the reciprocity module tolerates.
const MIN_CYCLE_LENGTH: i64 = 2;

/// Builds an ASP program from a roster and its policy.
///
/// The roster and parameters are borrowed for the duration of the build
/// and never modified; shuffling permutes a private index vector.
///
/// # Example
/// ```
/// use u_committee::asp::ProgramBuilder;
/// use u_committee::models::{Participant, PolicyParameters};
///
/// let roster = vec![
///     Participant::professional("Ana").needing_evaluation(),
///     Participant::professional("Bob"),
/// ];
/// let params = PolicyParameters::default();
/// let program = ProgramBuilder::new(&roster, &params).build();
/// assert!(program.contains("attribute(core, ana, needsEvaluation, true)."));
/// ```
pub struct ProgramBuilder<'a> {
    roster: &'a [Participant],
    params: &'a PolicyParameters,
    policy: PolicyModules,
}

impl<'a> ProgramBuilder<'a> {
    /// Creates a builder using the bundled policy modules.
    pub fn new(roster: &'a [Participant], params: &'a PolicyParameters) -> Self {
        Self {
            roster,
            params,
            policy: PolicyModules::bundled(),
        }
    }

    /// Replaces the policy modules.
    pub fn with_policy(mut self, policy: PolicyModules) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the program, shuffling with the thread RNG if configured.
    pub fn build(&self) -> String {
        self.build_with_rng(&mut rand::rng())
    }

    /// Builds the program, shuffling with `rng` if configured.
    ///
    /// Without shuffling the output is byte-identical across calls and
    /// participants appear in roster order.
    pub fn build_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut order: Vec<usize> = (0..self.roster.len()).collect();
        if self.params.shuffle_participants {
            order.shuffle(rng);
        }

        let mut out = FactWriter::new();
        for module in self.policy.in_order() {
            out.raw(module);
        }
        self.write_enumerations(&mut out);
        self.write_configuration(&mut out);
        self.write_participants(&mut out, &order);

        tracing::debug!(
            participants = self.roster.len(),
            facts = out.count,
            shuffled = self.params.shuffle_participants,
            "compiled ASP program"
        );
        out.finish()
    }

    /// Builds the program, runs it, and decodes the result.
    ///
    /// A solver that fails to run yields an `ERROR` solution carrying the
    /// failure message.
    pub fn solve<S: AspSolver + ?Sized>(&self, solver: &S) -> Solution {
        let program = self.build();
        match solver.solve(&program) {
            Ok(result) => SolutionDecoder::new(self.roster).decode(&result),
            Err(e) => {
                tracing::warn!(error = %e, "solver did not run");
                Solution::failed(SolverStatus::Error, e.to_string())
            }
        }
    }

    fn write_enumerations(&self, out: &mut FactWriter) {
        out.section("SPECIFIC/enum.lp");
        for skill in sanitized_skills(self.roster) {
            out.fact("model", &["enum", "skills", "individual", &skill]);
            let requirement = format!("individualRequires({skill})");
            out.fact("specify", &["parameter", "skills", &requirement, "atLeast(1)"]);
        }
        for timeslot in sanitized_availabilities(self.roster) {
            out.fact("model", &["enum", "committeeMeeting", "existingDate", &timeslot]);
        }
        for location in sanitized_locations(self.roster) {
            out.fact("model", &["enum", "location", "region", &location]);
        }
    }

    fn write_configuration(&self, out: &mut FactWriter) {
        let p = self.params;
        out.section("SPECIFIC/config.lp");

        let target = history_size(self.roster);
        let last_year = target.saturating_sub(1);
        out.raw(&format!("#const target = {target}.\n"));
        out.raw(&format!("year(0..{last_year}).\n"));

        let second_count = Range::new(
            p.non_professional_count.min + p.external_count.min,
            p.non_professional_count.max + p.external_count.max,
        );
        out.specify("core", "reviewsReceivedFrom(first)", &between(p.professional_count));
        out.specify("core", "reviewsPerformed(first)", &between(p.assignments_per_professional));
        out.specify("core", "reviewsReceivedFrom(second)", &between(second_count));
        out.specify(
            "core",
            "reviewsPerformed(second)",
            &between(p.assignments_per_non_professional),
        );

        out.specify("reciprocity", "minLength", &MIN_CYCLE_LENGTH.to_string());

        out.specify("committeeMeeting", "subjectPresent", "true");
        out.specify("committeeMeeting", "reviewersPresent(first)", "any");
        out.specify("committeeMeeting", "reviewersPresent(second)", "any");
        out.specify(
            "committeeMeeting",
            "reviewersPresent(anyType)",
            &format!("atLeast({REVIEWERS_PRESENT})"),
        );
        out.specify("committeeMeeting", "attendance(first)", "between(1, 2)");
        out.specify("committeeMeeting", "attendance(second)", "atMost(1)");
        out.specify("committeeMeeting", "size", &between(p.committee_meeting_size));

        let follow_ups = i64::from(p.inspectors_following_up);
        out.specify("followUp", "required", &between(Range::exactly(follow_ups)));
        out.specify("followUp", "provided", "atMost(1)");
        out.specify("followUp", "maxConsecutive", &p.rotations_to_reinspect.to_string());

        let matrix = &p.distance_matrix;
        let locations: Vec<String> = matrix.locations.iter().map(|l| sanitize_name(l)).collect();
        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                out.specify(
                    "location",
                    &format!("distance({from}, {to})"),
                    &matrix.distance_at(i, j).to_string(),
                );
            }
        }
        out.specify("location", "acceptableCost(first)", &between(p.travelling_distance));
        out.specify("location", "acceptableCost(second)", &between(p.travelling_distance));

        for module in ["core", "committeeMeeting", "followUp", "skills"] {
            out.fact("show", &[module]);
        }
        if p.use_availability {
            out.raw("%relax(location).\n");
        } else {
            out.fact("relax", &["location"]);
        }
    }

    fn write_participants(&self, out: &mut FactWriter, order: &[usize]) {
        out.section("SPECIFIC/participants.lp");

        let known: HashSet<String> = self
            .roster
            .iter()
            .map(|p| sanitize_name(&p.name))
            .filter(|n| !n.is_empty())
            .collect();

        for &index in order {
            let person = &self.roster[index];
            let name = sanitize_name(&person.name);
            if name.is_empty() {
                tracing::debug!(
                    participant = %person.name,
                    "skipping participant without identifier"
                );
                continue;
            }

            out.fact("joined", &[&name, "0"]);
            out.fact("attribute", &["core", &name, "party", person.class.party()]);
            if person.needs_evaluation {
                out.fact("attribute", &["core", &name, "needsEvaluation", "true"]);
            }
            for veto in labels(&person.vetoes) {
                out.fact("attribute", &["core", &name, "veto", &veto]);
            }
            for timeslot in labels(&person.availability) {
                out.fact("attribute", &["committeeMeeting", &name, "availableOn", &timeslot]);
            }
            for skill in labels(&person.skills) {
                out.fact("attribute", &["skills", &name, "provides", &skill]);
            }
            for skill in labels(&person.required_skills) {
                out.fact("attribute", &["skills", &name, "requires", &skill]);
            }
            let location = sanitize_opt(person.location.as_deref());
            if !location.is_empty() {
                out.fact("attribute", &["location", &name, "basedIn", &location]);
            }

            let rotations = person.already_inspected.len();
            for (i, evaluated) in person.already_inspected.iter().enumerate() {
                let certified = format!("certified({})", rotations - 1 - i);
                for evaluated in labels(evaluated) {
                    // Participants who left the roster would be reported as bad data.
                    if known.contains(&evaluated) {
                        out.fact("attribute", &["followUp", &name, &certified, &evaluated]);
                    }
                }
            }
        }
    }
}

/// Non-empty sanitized labels, in input order.
fn labels(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .map(|v| sanitize_name(v))
        .filter(|v| !v.is_empty())
}

fn between(range: Range) -> String {
    format!("between({}, {})", range.min, range.max)
}

/// Accumulates program text, one fact per line.
struct FactWriter {
    text: String,
    count: usize,
}

impl FactWriter {
    fn new() -> Self {
        Self {
            text: String::new(),
            count: 0,
        }
    }

    fn raw(&mut self, text: &str) {
        self.text.push_str(text);
        if !text.ends_with('\n') {
            self.text.push('\n');
        }
    }

    fn section(&mut self, title: &str) {
        let banner = "%".repeat(title.len() + 10);
        self.text
            .push_str(&format!("\n{banner}\n%%%% {title} %%%%\n{banner}\n\n"));
    }

    fn fact(&mut self, relation: &str, args: &[&str]) {
        self.text.push_str(relation);
        self.text.push('(');
        self.text.push_str(&args.join(", "));
        self.text.push_str(").\n");
        self.count += 1;
    }

    fn specify(&mut self, module: &str, parameter: &str, value: &str) {
        self.fact("specify", &["parameter", module, parameter, value]);
    }

    fn finish(self) -> String {
        self.text
    }
}
