//! Solution decoding.
//!
//! Maps the atoms of a solver model back onto the roster. Names in atoms
//! are sanitized identifiers, so the roster is indexed by
//! [`sanitize_name`](crate::sanitize_name) first.

use std::collections::HashMap;

use super::{Atom, SolverResult};
use crate::models::{
    Assignee, Assignment, CommitteeRef, CommitteeSet, DecodeWarning, Participant, Solution,
};
use crate::sanitize_name;

/// Decodes solver results against a roster.
pub struct SolutionDecoder<'a> {
    participants: HashMap<String, &'a Participant>,
}

impl<'a> SolutionDecoder<'a> {
    /// Indexes the roster by sanitized name.
    ///
    /// When two names sanitize alike, the later participant wins. The roster
    /// may carry folded ledgers; decoded participants never do.
    pub fn new(roster: &'a [Participant]) -> Self {
        let participants = roster.iter().map(|p| (sanitize_name(&p.name), p)).collect();
        Self { participants }
    }

    /// Builds a solution from a solver result.
    ///
    /// `UNSATISFIABLE` and `ERROR` yield an empty solution carrying the
    /// solver's error text. Otherwise each `certify` atom becomes one
    /// assignment in a committee keyed by the evaluated person's
    /// identifier, dated by that person's `schedule` atom. Malformed atoms
    /// and unknown names are reported as warnings and never abort decoding.
    pub fn decode(&self, result: &SolverResult) -> Solution {
        if result.status.is_failure() {
            tracing::debug!(status = %result.status, "solver returned no model");
            return Solution::failed(result.status, result.error.clone().unwrap_or_default());
        }

        let atoms: Vec<Atom<'_>> = result.atoms.iter().map(|a| Atom::parse(a)).collect();
        let mut warnings = Vec::new();

        let mut schedules: HashMap<&str, &str> = HashMap::new();
        for atom in &atoms {
            match *atom {
                Atom::Schedule {
                    evaluated,
                    timeslot,
                } => {
                    schedules.insert(evaluated, timeslot);
                }
                Atom::Unrecognized(text) => {
                    tracing::warn!(atom = text, "unrecognized solver atom");
                    warnings.push(DecodeWarning::MalformedAtom {
                        atom: text.to_string(),
                    });
                }
                Atom::Certify { .. } => {}
            }
        }

        let mut assignments = Vec::new();
        for (atom, text) in atoms.iter().zip(&result.atoms) {
            let Atom::Certify {
                reviewer,
                evaluated,
            } = *atom
            else {
                continue;
            };

            let assignee = match self.resolve(reviewer, text, &mut warnings) {
                Some(p) => Assignee::from_participant(p),
                None => Assignee::Unresolved(reviewer.to_string()),
            };
            let evaluated_person = self.resolve(evaluated, text, &mut warnings);
            let committee = CommitteeRef {
                id: evaluated.to_string(),
                evaluated_person,
                timeslot: schedules.get(evaluated).copied().unwrap_or_default().to_string(),
            };
            assignments.push(Assignment::new(assignee, committee));
        }

        let committees = CommitteeSet::from_assignments(&assignments);
        tracing::debug!(
            assignments = assignments.len(),
            committees = committees.len(),
            warnings = warnings.len(),
            "decoded solver model"
        );

        Solution {
            assignments,
            committees,
            explanation: result.diagnostic_payload(),
            warnings,
            ..Solution::with_status(result.status)
        }
    }

    /// The roster record for a solver name, without its inspection ledger.
    fn resolve(
        &self,
        name: &str,
        atom: &str,
        warnings: &mut Vec<DecodeWarning>,
    ) -> Option<Participant> {
        let found = self.participants.get(name).map(|p| Participant {
            already_inspected: Vec::new(),
            ..(*p).clone()
        });
        if found.is_none() {
            tracing::warn!(name, atom, "solver named an unknown participant");
            warnings.push(DecodeWarning::UnresolvedParticipant {
                name: name.to_string(),
                atom: atom.trim().to_string(),
            });
        }
        found
    }
}
