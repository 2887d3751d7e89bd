//! Raw solver output.
//!
//! [`SolverResult`] is what an [`AspSolver`](super::AspSolver) hands back:
//! a status, the atoms of the chosen model, and an optional error text.
//! [`SolverResult::from_clingo_json`] reads clingo's `--outf=2` report.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::SolverStatus;

/// Result of one solver run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverResult {
    pub status: SolverStatus,
    /// Atoms of the reported model, as printed by the solver.
    pub atoms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The solver's own report, when it produced one.
    #[serde(skip)]
    pub raw: Option<serde_json::Value>,
}

impl SolverResult {
    /// A model was found.
    pub fn satisfiable<I, S>(atoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            status: SolverStatus::Satisfiable,
            atoms: atoms.into_iter().map(Into::into).collect(),
            error: None,
            raw: None,
        }
    }

    /// The program has no model.
    pub fn unsatisfiable() -> Self {
        Self {
            status: SolverStatus::Unsatisfiable,
            atoms: Vec::new(),
            error: None,
            raw: None,
        }
    }

    /// The solver failed.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: SolverStatus::Error,
            atoms: Vec::new(),
            error: Some(message.into()),
            raw: None,
        }
    }

    /// Parses clingo's JSON report (`clingo --outf=2`).
    ///
    /// The atoms are taken from the last witness of the last call, which is
    /// the best model found when optimizing. An unknown `Result` word
    /// becomes an `ERROR` status naming it.
    pub fn from_clingo_json(json: &str) -> Result<Self, Error> {
        let raw: serde_json::Value = serde_json::from_str(json)?;
        let report: ClingoReport = serde_json::from_value(raw.clone())?;

        let (status, mut error) = match report.result.parse::<SolverStatus>() {
            Ok(status) => (status, report.error),
            Err(e) => (SolverStatus::Error, Some(e.to_string())),
        };
        if status == SolverStatus::Error && error.is_none() {
            error = Some(format!("solver reported {}", report.result));
        }

        let atoms = if status.is_failure() {
            Vec::new()
        } else {
            report
                .call
                .into_iter()
                .rev()
                .find_map(|call| call.witnesses.into_iter().last())
                .map(|w| w.value)
                .unwrap_or_default()
        };

        Ok(Self {
            status,
            atoms,
            error,
            raw: Some(raw),
        })
    }

    /// Pretty-printed diagnostics retained as a solution's explanation.
    ///
    /// The solver's own report when present, otherwise this result.
    pub fn diagnostic_payload(&self) -> String {
        let payload = match &self.raw {
            Some(raw) => serde_json::to_string_pretty(raw),
            None => serde_json::to_string_pretty(self),
        };
        payload.unwrap_or_default()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClingoReport {
    result: String,
    #[serde(default)]
    call: Vec<ClingoCall>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClingoCall {
    #[serde(default)]
    witnesses: Vec<ClingoWitness>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClingoWitness {
    #[serde(default)]
    value: Vec<String>,
}
