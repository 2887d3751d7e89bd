//! Committees and committee sets.
//!
//! A committee gathers the reviewers assigned to one evaluated
//! participant. A [`CommitteeSet`] is the full schedule of one rotation and
//! is the sole owner of its committees: assignments refer to their
//! committee by id, never by pointer.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Participant;
use crate::error::Error;

/// Display name used by older exports for "no reviewer found".
pub const UNASSIGNED_NAME: &str = "INTERNAL_NULL_PERSON";

/// Who fills an assignment slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Assignee {
    /// A roster participant.
    Assigned(Participant),
    /// No candidate satisfied the slot.
    Unassigned,
    /// The solver named a participant that is not on the roster.
    ///
    /// Holds the sanitized name as returned by the solver.
    Unresolved(String),
}

impl Assignee {
    /// Wraps a participant, mapping the legacy sentinel name to `Unassigned`.
    pub fn from_participant(participant: Participant) -> Self {
        if participant.name == UNASSIGNED_NAME {
            Self::Unassigned
        } else {
            Self::Assigned(participant)
        }
    }

    /// The assigned participant, if any.
    pub fn participant(&self) -> Option<&Participant> {
        match self {
            Self::Assigned(p) => Some(p),
            _ => None,
        }
    }

    /// Whether the slot is explicitly unfilled.
    pub fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }
}

/// The committee an assignment belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeRef {
    /// Committee id (sanitized name of the evaluated participant).
    pub id: String,
    /// Evaluated participant, `None` when the solver's name did not resolve.
    pub evaluated_person: Option<Participant>,
    /// Chosen meeting timeslot (sanitized), empty when unscheduled.
    pub timeslot: String,
}

/// A reviewer-to-committee assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub assignee: Assignee,
    pub committee: CommitteeRef,
}

impl Assignment {
    /// Creates an assignment.
    pub fn new(assignee: Assignee, committee: CommitteeRef) -> Self {
        Self {
            assignee,
            committee,
        }
    }

    /// Display name of the assigned participant, if any.
    pub fn reviewer_name(&self) -> Option<&str> {
        self.assignee.participant().map(|p| p.name.as_str())
    }
}

/// Reviewers assigned to evaluate one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Committee {
    pub id: String,
    pub evaluated_person: Option<Participant>,
    pub timeslot: String,
    pub assignments: Vec<Assignment>,
}

impl Committee {
    /// Creates an empty committee.
    pub fn new(
        id: impl Into<String>,
        evaluated_person: Option<Participant>,
        timeslot: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            evaluated_person,
            timeslot: timeslot.into(),
            assignments: Vec::new(),
        }
    }

    fn from_ref(committee: &CommitteeRef) -> Self {
        Self::new(
            committee.id.clone(),
            committee.evaluated_person.clone(),
            committee.timeslot.clone(),
        )
    }

    /// Assigned reviewers, in assignment order.
    pub fn reviewers(&self) -> impl Iterator<Item = &Participant> {
        self.assignments.iter().filter_map(|a| a.assignee.participant())
    }

    /// First timeslot of the evaluated person also listed by at least one reviewer.
    ///
    /// Follows the evaluated person's availability order. Returns an empty
    /// string when there is none.
    pub fn first_common_timeslot(&self) -> String {
        self.evaluated_availability()
            .iter()
            .find(|t| !t.is_empty() && self.count_available(t) > 0)
            .cloned()
            .unwrap_or_default()
    }

    /// Chosen timeslot followed by the evaluated person's timeslots shared
    /// by at least `n` reviewers, e.g. `"monday (monday, friday)"`.
    ///
    /// The parenthetical is empty (`"monday ()"`) when no timeslot qualifies.
    pub fn common_timeslots(&self, n: usize) -> String {
        let shared: Vec<&str> = self
            .evaluated_availability()
            .iter()
            .filter(|t| !t.is_empty() && self.count_available(t) >= n)
            .map(String::as_str)
            .collect();
        format!("{} ({})", self.timeslot, shared.join(", "))
    }

    /// Number of reviewers listing the timeslot.
    pub fn count_available(&self, timeslot: &str) -> usize {
        self.reviewers().filter(|r| r.is_available_on(timeslot)).count()
    }

    /// Whether every reviewer lists the timeslot.
    pub fn is_available_for_all(&self, timeslot: &str) -> bool {
        self.reviewers().all(|r| r.is_available_on(timeslot))
    }

    /// Number of assignments (including unresolved reviewers).
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    fn evaluated_availability(&self) -> &[String] {
        self.evaluated_person
            .as_ref()
            .map(|p| p.availability.as_slice())
            .unwrap_or(&[])
    }
}

/// One rotation's complete set of committees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitteeSet {
    pub id: String,
    pub date: DateTime<Utc>,
    pub size: usize,
    committees: Vec<Committee>,
}

impl Default for CommitteeSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CommitteeSet {
    /// Creates an empty set with a fresh id, dated now.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            size: 0,
            committees: Vec::new(),
        }
    }

    /// Groups assignments into committees.
    ///
    /// The first assignment seen for a committee id decides its evaluated
    /// person and timeslot. `Unassigned` assignments are dropped, but the
    /// committee they point at is still created.
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut set = Self::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for assignment in assignments {
            let slot = *index
                .entry(assignment.committee.id.clone())
                .or_insert_with(|| {
                    set.committees.push(Committee::from_ref(&assignment.committee));
                    set.committees.len() - 1
                });
            if !assignment.assignee.is_unassigned() {
                set.committees[slot].assignments.push(assignment.clone());
            }
        }

        set.size = set.committees.len();
        set
    }

    /// Adds a committee, replacing any committee with the same id.
    pub fn add(&mut self, committee: Committee) {
        match self.committees.iter_mut().find(|c| c.id == committee.id) {
            Some(existing) => *existing = committee,
            None => {
                self.committees.push(committee);
                self.size += 1;
            }
        }
    }

    /// Looks up a committee by id.
    pub fn committee(&self, id: &str) -> Option<&Committee> {
        self.committees.iter().find(|c| c.id == id)
    }

    /// Committees in insertion order.
    pub fn committees(&self) -> &[Committee] {
        &self.committees
    }

    /// Committees a reviewer (by display name) sits on.
    pub fn committees_for_reviewer(&self, name: &str) -> Vec<&Committee> {
        self.committees
            .iter()
            .filter(|c| c.reviewers().any(|r| r.name == name))
            .collect()
    }

    /// Assignments of a reviewer (by display name) across all committees.
    pub fn assignments_for_reviewer(&self, name: &str) -> Vec<&Assignment> {
        self.committees
            .iter()
            .flat_map(|c| c.assignments.iter())
            .filter(|a| a.reviewer_name() == Some(name))
            .collect()
    }

    /// Number of committees.
    pub fn len(&self) -> usize {
        self.committees.len()
    }

    /// Whether the set has no committees.
    pub fn is_empty(&self) -> bool {
        self.committees.is_empty()
    }

    /// Serializes the set to JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a set from JSON.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes a rotation history (most recent first).
    pub fn history_to_json(history: &[CommitteeSet]) -> Result<String, Error> {
        Ok(serde_json::to_string(history)?)
    }

    /// Parses a rotation history (most recent first).
    pub fn history_from_json(json: &str) -> Result<Vec<CommitteeSet>, Error> {
        Ok(serde_json::from_str(json)?)
    }
}
