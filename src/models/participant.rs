//! Participant model.
//!
//! A participant is both a potential reviewer and, when flagged, a subject
//! to be evaluated during a rotation. Labels (skills, timeslots, locations,
//! vetoes) are kept as display strings; they are sanitized only when
//! compiled into solver facts.

use serde::{Deserialize, Serialize};

/// A rotation participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// Display name, unique within a roster snapshot.
    pub name: String,
    /// Participant category.
    pub class: ParticipantClass,
    /// Home location label.
    #[serde(default)]
    pub location: Option<String>,
    /// Skills this participant provides as a reviewer.
    #[serde(default)]
    pub skills: Vec<String>,
    /// Skills a committee evaluating this participant must cover.
    #[serde(default)]
    pub required_skills: Vec<String>,
    /// Timeslot labels, in the participant's order of preference.
    #[serde(default)]
    pub availability: Vec<String>,
    /// Display names of participants this one must not be paired with.
    #[serde(default)]
    pub vetoes: Vec<String>,
    /// Whether a committee must be formed for this participant.
    #[serde(default)]
    pub needs_evaluation: bool,
    /// Upper bound on the number of committees this participant sits on.
    #[serde(default)]
    pub max_inspections: Option<u32>,
    /// Evaluated-person names inspected per past rotation (index 0 = most recent).
    ///
    /// Derived by [`crate::history::fold_history`]; never part of the
    /// persisted roster.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub already_inspected: Vec<Vec<String>>,
}

/// Participant category.
///
/// Quotas are scoped per class. In the solver vocabulary professionals are
/// the `first` party and everybody else the `second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParticipantClass {
    /// Professional reviewer.
    Professional,
    /// Non-professional (peer) reviewer.
    NonProfessional,
    /// Reviewer from outside the participant pool.
    External,
}

impl ParticipantClass {
    /// Solver party token.
    pub fn party(self) -> &'static str {
        match self {
            Self::Professional => "first",
            Self::NonProfessional | Self::External => "second",
        }
    }
}

impl Participant {
    /// Creates a participant with no skills, availability, or vetoes.
    pub fn new(name: impl Into<String>, class: ParticipantClass) -> Self {
        Self {
            name: name.into(),
            class,
            location: None,
            skills: Vec::new(),
            required_skills: Vec::new(),
            availability: Vec::new(),
            vetoes: Vec::new(),
            needs_evaluation: false,
            max_inspections: None,
            already_inspected: Vec::new(),
        }
    }

    /// Creates a professional participant.
    pub fn professional(name: impl Into<String>) -> Self {
        Self::new(name, ParticipantClass::Professional)
    }

    /// Creates a non-professional participant.
    pub fn non_professional(name: impl Into<String>) -> Self {
        Self::new(name, ParticipantClass::NonProfessional)
    }

    /// Creates an external participant.
    pub fn external(name: impl Into<String>) -> Self {
        Self::new(name, ParticipantClass::External)
    }

    /// Sets the home location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Adds a provided skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.push(skill.into());
        self
    }

    /// Adds a required skill.
    pub fn with_required_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.push(skill.into());
        self
    }

    /// Adds an available timeslot.
    pub fn with_availability(mut self, timeslot: impl Into<String>) -> Self {
        self.availability.push(timeslot.into());
        self
    }

    /// Adds a vetoed participant name.
    pub fn with_veto(mut self, name: impl Into<String>) -> Self {
        self.vetoes.push(name.into());
        self
    }

    /// Marks the participant as needing evaluation.
    pub fn needing_evaluation(mut self) -> Self {
        self.needs_evaluation = true;
        self
    }

    /// Sets the inspection cap.
    pub fn with_max_inspections(mut self, max: u32) -> Self {
        self.max_inspections = Some(max);
        self
    }

    /// Sets the history ledger directly.
    pub fn with_already_inspected(mut self, ledger: Vec<Vec<String>>) -> Self {
        self.already_inspected = ledger;
        self
    }

    /// Whether this participant lists the timeslot.
    pub fn is_available_on(&self, timeslot: &str) -> bool {
        self.availability.iter().any(|t| t == timeslot)
    }

    /// Whether this participant is a professional.
    pub fn is_professional(&self) -> bool {
        self.class == ParticipantClass::Professional
    }
}
