//! Planning request.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::{CommitteeSet, Participant, PolicyParameters, SettingsInput};

/// Everything needed to plan one rotation.
///
/// # Example
/// ```
/// use u_committee::models::{Participant, PolicyParameters};
/// use u_committee::planner::CommitteeRequest;
///
/// let request = CommitteeRequest::new(
///     vec![Participant::professional("Ana").needing_evaluation()],
///     PolicyParameters::default(),
/// );
/// assert!(request.history.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitteeRequest {
    /// Participants of the coming rotation.
    pub roster: Vec<Participant>,
    /// Resolved policy.
    pub params: PolicyParameters,
    /// Past rotations, most recent first.
    #[serde(default)]
    pub history: Vec<CommitteeSet>,
}

impl CommitteeRequest {
    /// Creates a request with no history.
    pub fn new(roster: Vec<Participant>, params: PolicyParameters) -> Self {
        Self {
            roster,
            params,
            history: Vec::new(),
        }
    }

    /// Sets the rotation history (most recent first).
    pub fn with_history(mut self, history: Vec<CommitteeSet>) -> Self {
        self.history = history;
        self
    }

    /// Adds one past rotation, older than those already present.
    pub fn with_rotation(mut self, rotation: CommitteeSet) -> Self {
        self.history.push(rotation);
        self
    }

    /// Builds a request from persisted JSON documents.
    ///
    /// `roster` is a participant array, `settings` a possibly partial
    /// settings object, `history` a rotation array (most recent first).
    pub fn from_json(roster: &str, settings: &str, history: &str) -> Result<Self, Error> {
        let roster: Vec<Participant> = serde_json::from_str(roster)?;
        let settings: SettingsInput = serde_json::from_str(settings)?;
        let history = CommitteeSet::history_from_json(history)?;
        Ok(Self::new(roster, settings.resolve()).with_history(history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let roster = r#"[
            {"name": "Ana", "class": "professional", "needsEvaluation": true},
            {"name": "Bob", "class": "nonProfessional", "availability": ["monday"]}
        ]"#;
        let settings = r#"{"nbRotationsToReinspect": 2}"#;

        let request = CommitteeRequest::from_json(roster, settings, "[]").unwrap();
        assert_eq!(request.roster.len(), 2);
        assert!(request.roster[0].needs_evaluation);
        assert_eq!(request.roster[1].availability, vec!["monday".to_string()]);
        assert_eq!(request.params.rotations_to_reinspect, 2);
        assert!(request.history.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            CommitteeRequest::from_json("{", "{}", "[]"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_with_rotation_appends_older() {
        let first = CommitteeSet::new();
        let second = CommitteeSet::new();
        let ids = (first.id.clone(), second.id.clone());

        let request = CommitteeRequest::new(Vec::new(), PolicyParameters::default())
            .with_rotation(first)
            .with_rotation(second);
        assert_eq!(request.history[0].id, ids.0);
        assert_eq!(request.history[1].id, ids.1);
    }
}
