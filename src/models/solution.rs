//! Solver outcome.
//!
//! A [`Solution`] is created once per solve attempt. Terminal failures
//! carry only a status and an explanation; successful runs carry the raw
//! assignments, the grouped [`CommitteeSet`], and any non-fatal decode
//! warnings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Assignment, CommitteeSet};

/// Solution id before the solver assigned one.
pub const UNDEFINED_SOLUTION_ID: &str = "undefined";

/// Solver lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolverStatus {
    NotStarted,
    Launching,
    Initializing,
    SolvingActive,
    Satisfiable,
    Unsatisfiable,
    Error,
}

impl SolverStatus {
    /// Whether the solver is done (successfully or not).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Satisfiable | Self::Unsatisfiable | Self::Error)
    }

    /// Whether the run ended without a model.
    pub fn is_failure(self) -> bool {
        matches!(self, Self::Unsatisfiable | Self::Error)
    }

    /// Wire name, e.g. `SOLVING_ACTIVE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::Launching => "LAUNCHING",
            Self::Initializing => "INITIALIZING",
            Self::SolvingActive => "SOLVING_ACTIVE",
            Self::Satisfiable => "SATISFIABLE",
            Self::Unsatisfiable => "UNSATISFIABLE",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown solver status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for SolverStatus {
    type Err = UnknownStatus;

    /// Parses wire names and clingo result words.
    ///
    /// `OPTIMUM FOUND` counts as satisfiable; `UNKNOWN` (interrupted or
    /// timed out) counts as an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "NOT_STARTED" => Ok(Self::NotStarted),
            "LAUNCHING" | "LAUNCHING_CLINGO" => Ok(Self::Launching),
            "INITIALIZING" => Ok(Self::Initializing),
            "SOLVING_ACTIVE" => Ok(Self::SolvingActive),
            "SATISFIABLE" | "OPTIMUM FOUND" => Ok(Self::Satisfiable),
            "UNSATISFIABLE" => Ok(Self::Unsatisfiable),
            "ERROR" | "UNKNOWN" => Ok(Self::Error),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Non-fatal problem found while decoding solver output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DecodeWarning {
    /// An atom matched neither `schedule(x,y)` nor `certify(x,y)`.
    MalformedAtom { atom: String },
    /// A sanitized name in an atom is not on the roster.
    UnresolvedParticipant { name: String, atom: String },
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedAtom { atom } => write!(f, "unrecognized atom: {atom}"),
            Self::UnresolvedParticipant { name, atom } => {
                write!(f, "unknown participant '{name}' in {atom}")
            }
        }
    }
}

/// Outcome of one solve attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// External job id, or [`UNDEFINED_SOLUTION_ID`].
    pub id: String,
    /// Assignments in solver output order.
    pub assignments: Vec<Assignment>,
    /// Assignments grouped by committee.
    pub committees: CommitteeSet,
    pub status: SolverStatus,
    /// Opaque score payload; empty for the ASP path.
    pub score: String,
    /// Human-readable explanation or raw solver diagnostics.
    pub explanation: String,
    #[serde(default)]
    pub warnings: Vec<DecodeWarning>,
}

impl Default for Solution {
    fn default() -> Self {
        Self::with_status(SolverStatus::NotStarted)
    }
}

impl Solution {
    /// An empty solution in the given state.
    pub fn with_status(status: SolverStatus) -> Self {
        Self {
            id: UNDEFINED_SOLUTION_ID.to_string(),
            assignments: Vec::new(),
            committees: CommitteeSet::new(),
            status,
            score: String::new(),
            explanation: String::new(),
            warnings: Vec::new(),
        }
    }

    /// A terminal failure carrying the solver's explanation.
    pub fn failed(status: SolverStatus, explanation: impl Into<String>) -> Self {
        Self {
            explanation: explanation.into(),
            ..Self::with_status(status)
        }
    }

    /// Sets the external job id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether the solver assigned an id.
    pub fn is_defined(&self) -> bool {
        self.id != UNDEFINED_SOLUTION_ID
    }

    /// Whether decoding produced warnings.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
