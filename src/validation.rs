//! Input validation for committee planning.
//!
//! Checks structural integrity of the roster and policy before compiling.
//! Detects:
//! - Duplicate display names
//! - Display names that sanitize to nothing
//! - Distinct display names that sanitize to the same solver identifier
//! - Vetoes naming unknown participants
//! - Inverted ranges and ragged distance matrices
//!
//! Validation is advisory: the compiler accepts any roster and resolves
//! sanitized-name collisions by last write wins.

use std::collections::{HashMap, HashSet};

use crate::models::{Participant, PolicyParameters, Range};
use crate::sanitize_name;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two participants share the same display name.
    DuplicateName,
    /// A display name has no ASCII letter or digit.
    EmptyIdentifier,
    /// Two display names map to the same solver identifier.
    SanitizationCollision,
    /// A veto names a participant that is not on the roster.
    UnknownVeto,
    /// A range has `min > max`.
    InvertedRange,
    /// Distance matrix rows do not match its location list.
    MalformedDistanceMatrix,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster.
///
/// Checks:
/// 1. No duplicate display names
/// 2. Every name yields a non-empty identifier
/// 3. No two distinct names yield the same identifier
/// 4. Every veto names a roster member
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_roster(roster: &[Participant]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut names = HashSet::new();
    let mut identifiers: HashMap<String, &str> = HashMap::new();

    for p in roster {
        if !names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate participant name: {}", p.name),
            ));
            continue;
        }

        let id = sanitize_name(&p.name);
        if id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyIdentifier,
                format!("Participant name '{}' has no letters or digits", p.name),
            ));
            continue;
        }

        if let Some(previous) = identifiers.insert(id.clone(), p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SanitizationCollision,
                format!(
                    "Participants '{}' and '{}' share the identifier '{}'",
                    previous, p.name, id
                ),
            ));
        }
    }

    for p in roster {
        for veto in &p.vetoes {
            if !names.contains(veto.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownVeto,
                    format!("Participant '{}' vetoes unknown participant '{}'", p.name, veto),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates resolved policy parameters.
pub fn validate_policy(params: &PolicyParameters) -> ValidationResult {
    let mut errors = Vec::new();

    let ranges: [(&str, Range); 8] = [
        ("professional count", params.professional_count),
        ("non-professional count", params.non_professional_count),
        ("external count", params.external_count),
        ("assignments per professional", params.assignments_per_professional),
        ("assignments per non-professional", params.assignments_per_non_professional),
        ("assignments per external", params.assignments_per_external),
        ("travelling distance", params.travelling_distance),
        ("committee meeting size", params.committee_meeting_size),
    ];
    for (label, range) in ranges {
        if !range.is_well_formed() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedRange,
                format!("Range '{label}' has min {} > max {}", range.min, range.max),
            ));
        }
    }

    if !params.distance_matrix.is_square() {
        errors.push(ValidationError::new(
            ValidationErrorKind::MalformedDistanceMatrix,
            format!(
                "Distance matrix is not {n}x{n}",
                n = params.distance_matrix.len()
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates roster and policy together, collecting every issue.
pub fn validate_input(roster: &[Participant], params: &PolicyParameters) -> ValidationResult {
    let mut errors = Vec::new();
    if let Err(e) = validate_roster(roster) {
        errors.extend(e);
    }
    if let Err(e) = validate_policy(params) {
        errors.extend(e);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DistanceMatrix;

    fn sample_roster() -> Vec<Participant> {
        vec![
            Participant::professional("Ana").with_veto("Bob"),
            Participant::professional("Bob"),
            Participant::non_professional("Cleo"),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_roster(), &PolicyParameters::default()).is_ok());
    }

    #[test]
    fn test_duplicate_name() {
        let mut roster = sample_roster();
        roster.push(Participant::external("Bob"));

        let errors = validate_roster(&roster).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateName);
    }

    #[test]
    fn test_sanitization_collision() {
        let roster = vec![
            Participant::professional("Jo Ann"),
            Participant::professional("JoAnn"),
        ];

        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::SanitizationCollision
                && e.message.contains("joann")));
    }

    #[test]
    fn test_empty_identifier() {
        let roster = vec![Participant::professional("???")];

        let errors = validate_roster(&roster).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::EmptyIdentifier);
    }

    #[test]
    fn test_unknown_veto() {
        let roster = vec![Participant::professional("Ana").with_veto("Zoe")];

        let errors = validate_roster(&roster).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::UnknownVeto);
    }

    #[test]
    fn test_inverted_range_and_ragged_matrix() {
        let mut params = PolicyParameters::default().with_distance_matrix(DistanceMatrix::new(
            vec!["X".into(), "Y".into()],
            vec![vec![0, 5]],
        ));
        params.committee_meeting_size = Range::new(5, 1);

        let errors = validate_policy(&params).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvertedRange));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MalformedDistanceMatrix));
    }

    #[test]
    fn test_multiple_errors() {
        let roster = vec![
            Participant::professional("Ana").with_veto("Nobody"),
            Participant::professional("Ana"),
        ];
        let mut params = PolicyParameters::default();
        params.professional_count = Range::new(3, 2);

        let errors = validate_input(&roster, &params).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
