//! Rotation quality metrics (KPIs).
//!
//! Computes workload and coverage indicators from a solved committee set
//! and the roster it was planned for.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Committee count | Committees in the set |
//! | Assignment count | Reviewer seats filled |
//! | Max reviews | Largest number of committees one reviewer sits on |
//! | Avg reviewers | Mean filled seats per committee |
//! | Unfilled committees | Committees without any assigned reviewer |
//! | Unscheduled committees | Committees without a meeting timeslot |
//! | Over-cap reviewers | Reviewers above their `max_inspections` |
//! | Missing evaluations | Participants needing evaluation with no committee |

use std::collections::{HashMap, HashSet};

use crate::models::{CommitteeSet, Participant};

/// Rotation performance indicators.
#[derive(Debug, Clone)]
pub struct CommitteeKpi {
    /// Number of committees.
    pub committee_count: usize,
    /// Number of assigned reviewer seats.
    pub assignment_count: usize,
    /// Committees per reviewer (display name).
    pub reviews_by_reviewer: HashMap<String, usize>,
    /// Largest per-reviewer count.
    pub max_reviews: usize,
    /// Mean assigned reviewers per committee.
    pub avg_reviewers_per_committee: f64,
    /// Committee ids with no assigned reviewer.
    pub unfilled_committees: Vec<String>,
    /// Committee ids with no timeslot.
    pub unscheduled_committees: Vec<String>,
    /// Reviewers sitting on more committees than their cap, sorted.
    pub over_cap_reviewers: Vec<String>,
    /// Participants needing evaluation without a committee, in roster order.
    pub missing_evaluations: Vec<String>,
}

impl CommitteeKpi {
    /// Computes KPIs from a committee set and its roster.
    ///
    /// # Arguments
    /// * `set` - The solved committees.
    /// * `roster` - The participants (for caps and evaluation flags).
    pub fn calculate(set: &CommitteeSet, roster: &[Participant]) -> Self {
        let mut reviews_by_reviewer: HashMap<String, usize> = HashMap::new();
        let mut assignment_count = 0;
        let mut unfilled_committees = Vec::new();
        let mut unscheduled_committees = Vec::new();
        let mut evaluated: HashSet<&str> = HashSet::new();

        for committee in set.committees() {
            let mut seats = 0;
            for reviewer in committee.reviewers() {
                *reviews_by_reviewer.entry(reviewer.name.clone()).or_default() += 1;
                seats += 1;
            }
            assignment_count += seats;

            if seats == 0 {
                unfilled_committees.push(committee.id.clone());
            }
            if committee.timeslot.is_empty() {
                unscheduled_committees.push(committee.id.clone());
            }
            if let Some(person) = &committee.evaluated_person {
                evaluated.insert(person.name.as_str());
            }
        }

        let max_reviews = reviews_by_reviewer.values().copied().max().unwrap_or(0);
        let avg_reviewers_per_committee = if set.is_empty() {
            0.0
        } else {
            assignment_count as f64 / set.len() as f64
        };

        let mut over_cap_reviewers: Vec<String> = roster
            .iter()
            .filter(|p| match p.max_inspections {
                Some(cap) => reviews_by_reviewer.get(&p.name).copied().unwrap_or(0) > cap as usize,
                None => false,
            })
            .map(|p| p.name.clone())
            .collect();
        over_cap_reviewers.sort();

        let missing_evaluations = roster
            .iter()
            .filter(|p| p.needs_evaluation && !evaluated.contains(p.name.as_str()))
            .map(|p| p.name.clone())
            .collect();

        Self {
            committee_count: set.len(),
            assignment_count,
            reviews_by_reviewer,
            max_reviews,
            avg_reviewers_per_committee,
            unfilled_committees,
            unscheduled_committees,
            over_cap_reviewers,
            missing_evaluations,
        }
    }

    /// Whether every evaluation is covered, staffed and dated, and no
    /// reviewer exceeds a cap.
    pub fn is_complete(&self) -> bool {
        self.unfilled_committees.is_empty()
            && self.unscheduled_committees.is_empty()
            && self.over_cap_reviewers.is_empty()
            && self.missing_evaluations.is_empty()
    }

    /// Whether the rotation meets the given workload thresholds.
    pub fn meets_thresholds(&self, max_reviews: usize, min_avg_reviewers: f64) -> bool {
        self.max_reviews <= max_reviews && self.avg_reviewers_per_committee >= min_avg_reviewers
    }
}
