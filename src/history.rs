//! Rotation history folding.
//!
//! Turns the committee sets of past rotations into each participant's
//! `already_inspected` ledger, which the compiler emits as follow-up facts.
//!
//! Reviewers are matched by display name, not by sanitized identifier, so
//! history recorded under a slightly different spelling does not count.

use crate::models::{CommitteeSet, Participant};

/// Attaches the inspection ledger to a copy of the roster.
///
/// `history` is ordered most recent first. At least one rotation is always
/// consulted, even when `lookback` is zero, so that an immediate repeat can
/// be detected. For each participant the ledger has
/// `min(history.len(), max(lookback, 1))` entries; entry `i` lists the
/// evaluated persons the participant reviewed in `history[i]`.
pub fn fold_history(
    roster: &[Participant],
    history: &[CommitteeSet],
    lookback: u32,
) -> Vec<Participant> {
    let depth = lookback.max(1) as usize;
    let window = &history[..history.len().min(depth)];

    tracing::debug!(
        participants = roster.len(),
        rotations = window.len(),
        "folding rotation history"
    );

    roster
        .iter()
        .map(|participant| {
            let mut folded = participant.clone();
            folded.already_inspected = window
                .iter()
                .map(|set| inspected_in(set, &participant.name))
                .collect();
            folded
        })
        .collect()
}

/// Evaluated-person names whose committee in `set` included `reviewer`.
pub fn inspected_in(set: &CommitteeSet, reviewer: &str) -> Vec<String> {
    set.committees()
        .iter()
        .filter(|c| c.reviewers().any(|r| r.name == reviewer))
        .filter_map(|c| c.evaluated_person.as_ref().map(|p| p.name.clone()))
        .collect()
}

/// Length of the longest ledger in the roster.
pub fn history_size(roster: &[Participant]) -> usize {
    roster
        .iter()
        .map(|p| p.already_inspected.len())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignee, Assignment, CommitteeRef};

    fn roster() -> Vec<Participant> {
        vec![
            Participant::professional("Ana").needing_evaluation(),
            Participant::professional("Bob"),
            Participant::non_professional("Cleo").needing_evaluation(),
        ]
    }

    fn rotation(pairs: &[(&Participant, &Participant)]) -> CommitteeSet {
        let assignments: Vec<Assignment> = pairs
            .iter()
            .map(|(reviewer, evaluated)| {
                Assignment::new(
                    Assignee::Assigned((*reviewer).clone()),
                    CommitteeRef {
                        id: crate::sanitize_name(&evaluated.name),
                        evaluated_person: Some((*evaluated).clone()),
                        timeslot: "monday".into(),
                    },
                )
            })
            .collect();
        CommitteeSet::from_assignments(&assignments)
    }

    fn history() -> Vec<CommitteeSet> {
        let r = roster();
        vec![
            rotation(&[(&r[1], &r[0]), (&r[1], &r[2])]),
            rotation(&[(&r[0], &r[2]), (&r[2], &r[0])]),
            rotation(&[(&r[1], &r[0])]),
        ]
    }

    #[test]
    fn test_ledger_contents() {
        let folded = fold_history(&roster(), &history(), 3);
        let bob = &folded[1];
        assert_eq!(
            bob.already_inspected,
            vec![
                vec!["Ana".to_string(), "Cleo".to_string()],
                vec![],
                vec!["Ana".to_string()],
            ]
        );
        assert_eq!(folded[0].already_inspected[1], vec!["Cleo".to_string()]);

        // A committee whose evaluated person did not resolve adds nothing
        let r = roster();
        let orphan = CommitteeSet::from_assignments(&[Assignment::new(
            Assignee::Assigned(r[1].clone()),
            CommitteeRef {
                id: "ghost".into(),
                evaluated_person: None,
                timeslot: "monday".into(),
            },
        )]);
        let mut h = history();
        h.insert(0, orphan);
        let folded = fold_history(&r, &h, 2);
        assert_eq!(
            folded[1].already_inspected,
            vec![vec![], vec!["Ana".to_string(), "Cleo".to_string()]]
        );
    }

    #[test]
    fn test_depth_is_min_of_history_and_lookback() {
        let h = history();
        for (lookback, expected) in [(0, 1), (1, 1), (2, 2), (3, 3), (10, 3)] {
            let folded = fold_history(&roster(), &h, lookback);
            for p in &folded {
                assert_eq!(p.already_inspected.len(), expected, "lookback {lookback}");
            }
        }
        let folded = fold_history(&roster(), &[], 5);
        assert!(folded.iter().all(|p| p.already_inspected.is_empty()));
    }

    #[test]
    fn test_input_roster_untouched() {
        let r = roster();
        let _ = fold_history(&r, &history(), 3);
        assert!(r.iter().all(|p| p.already_inspected.is_empty()));
    }

    #[test]
    fn test_matches_display_name_only() {
        let h = history();
        // "bob" sanitizes like "Bob" but is a different display name
        let others = vec![Participant::professional("bob")];
        let folded = fold_history(&others, &h, 3);
        assert!(folded[0].already_inspected.iter().all(Vec::is_empty));
    }

    #[test]
    fn test_history_size() {
        let folded = fold_history(&roster(), &history(), 2);
        assert_eq!(history_size(&folded), 2);
        assert_eq!(history_size(&roster()), 0);
    }
}
