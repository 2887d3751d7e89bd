//! Solver-safe identifiers.
//!
//! Every label that reaches the solver (participant names, skills,
//! timeslots, locations) is rendered as a lowercase ASCII alphanumeric
//! token. Distinct labels may collapse to the same token; see
//! [`crate::validation::validate_roster`] for collision detection.

use std::collections::BTreeSet;

use crate::models::Participant;

/// Renders a label as a solver identifier.
///
/// Keeps ASCII letters and digits, lowercases them, and drops everything
/// else. Idempotent: `sanitize_name(&sanitize_name(x)) == sanitize_name(x)`.
///
/// # Example
/// ```
/// use u_committee::sanitize_name;
///
/// assert_eq!(sanitize_name("Jean-Pierre Dupont"), "jeanpierredupont");
/// assert_eq!(sanitize_name(""), "");
/// ```
pub fn sanitize_name(label: &str) -> String {
    label
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Sanitizes an optional label, mapping `None` to the empty identifier.
pub fn sanitize_opt(label: Option<&str>) -> String {
    label.map(sanitize_name).unwrap_or_default()
}

/// Distinct sanitized skill labels (provided and required), sorted.
pub fn sanitized_skills(roster: &[Participant]) -> Vec<String> {
    collect_sanitized(
        roster
            .iter()
            .flat_map(|p| p.skills.iter().chain(p.required_skills.iter())),
    )
}

/// Distinct sanitized timeslot labels, sorted.
pub fn sanitized_availabilities(roster: &[Participant]) -> Vec<String> {
    collect_sanitized(roster.iter().flat_map(|p| p.availability.iter()))
}

/// Distinct sanitized location labels, sorted.
pub fn sanitized_locations(roster: &[Participant]) -> Vec<String> {
    collect_sanitized(roster.iter().filter_map(|p| p.location.as_ref()))
}

fn collect_sanitized<'a>(labels: impl Iterator<Item = &'a String>) -> Vec<String> {
    labels
        .map(|l| sanitize_name(l))
        .filter(|l| !l.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParticipantClass;

    #[test]
    fn test_sanitize_strips_and_lowercases() {
        assert_eq!(sanitize_name("Marie Curie"), "mariecurie");
        assert_eq!(sanitize_name("  Lundi 14h-16h "), "lundi14h16h");
        assert_eq!(sanitize_name("Élodie"), "lodie");
        assert_eq!(sanitize_name("!!!"), "");
    }

    #[test]
    fn test_sanitize_idempotent() {
        for label in ["", "A b C", "x_y.z", "Ça va? 42", "already"] {
            let once = sanitize_name(label);
            assert_eq!(sanitize_name(&once), once);
        }
    }

    #[test]
    fn test_sanitize_opt() {
        assert_eq!(sanitize_opt(None), "");
        assert_eq!(sanitize_opt(Some("North Site")), "northsite");
    }

    #[test]
    fn test_sanitize_collision_not_prevented() {
        assert_eq!(sanitize_name("Jo Ann"), sanitize_name("JoAnn"));
    }

    #[test]
    fn test_sanitized_collections_sorted_and_deduped() {
        let roster = vec![
            Participant::new("A", ParticipantClass::Professional)
                .with_skill("Soil")
                .with_required_skill("Water")
                .with_availability("Tuesday")
                .with_availability("Monday")
                .with_location("South"),
            Participant::new("B", ParticipantClass::NonProfessional)
                .with_skill("soil")
                .with_skill("Bees")
                .with_availability("monday")
                .with_location("North")
                .with_location(""),
            Participant::new("C", ParticipantClass::External),
        ];

        assert_eq!(sanitized_skills(&roster), vec!["bees", "soil", "water"]);
        assert_eq!(sanitized_availabilities(&roster), vec!["monday", "tuesday"]);
        assert_eq!(sanitized_locations(&roster), vec!["south"]);
    }
}
