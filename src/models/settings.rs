//! Policy parameters and their default resolution.
//!
//! Settings reach the crate as a [`SettingsInput`] where any field may be
//! missing (older exports, partially filled forms). [`SettingsInput::resolve`]
//! fills every gap with one explicit default per field, so the compiler only
//! ever sees a complete [`PolicyParameters`].

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Inclusive integer range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    /// Creates a range.
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Creates a range containing exactly one value.
    pub const fn exactly(value: i64) -> Self {
        Self::new(value, value)
    }

    /// Whether `min <= max`.
    pub fn is_well_formed(&self) -> bool {
        self.min <= self.max
    }

    /// Whether the value lies inside the range.
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Pairwise travel distances between locations.
///
/// `distances[i][j]` is the distance from `locations[i]` to `locations[j]`.
/// Symmetric by convention; not enforced. Missing entries read as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceMatrix {
    pub locations: Vec<String>,
    pub distances: Vec<Vec<i64>>,
}

impl DistanceMatrix {
    /// Creates a matrix from locations and rows.
    pub fn new(locations: Vec<String>, distances: Vec<Vec<i64>>) -> Self {
        Self {
            locations,
            distances,
        }
    }

    /// Distance between two location indices, 0 when the entry is missing.
    pub fn distance_at(&self, from: usize, to: usize) -> i64 {
        self.distances
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Distance between two location labels.
    ///
    /// Returns `None` if either label is not in the matrix.
    pub fn distance(&self, from: &str, to: &str) -> Option<i64> {
        let i = self.locations.iter().position(|l| l == from)?;
        let j = self.locations.iter().position(|l| l == to)?;
        Some(self.distance_at(i, j))
    }

    /// Whether every row has one entry per location.
    pub fn is_square(&self) -> bool {
        self.distances.len() == self.locations.len()
            && self
                .distances
                .iter()
                .all(|row| row.len() == self.locations.len())
    }

    /// Number of locations.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether no location is defined.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Fully resolved committee policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyParameters {
    /// Professional reviewers per committee.
    pub professional_count: Range,
    /// Non-professional reviewers per committee.
    pub non_professional_count: Range,
    /// External reviewers per committee.
    pub external_count: Range,
    /// Committees a professional sits on.
    pub assignments_per_professional: Range,
    /// Committees a non-professional sits on.
    pub assignments_per_non_professional: Range,
    /// Committees an external sits on.
    pub assignments_per_external: Range,
    /// Acceptable total travelling cost per reviewer.
    pub travelling_distance: Range,
    /// Number of committees sharing one meeting date.
    pub committee_meeting_size: Range,
    /// Lookback depth in rotations; also the maximum consecutive follow-ups.
    pub rotations_to_reinspect: u32,
    /// Reviewers of the previous rotation required on each committee.
    pub inspectors_following_up: u32,
    /// Keep location rules hard instead of relaxing them.
    pub use_availability: bool,
    /// Randomize participant fact order before compiling.
    pub shuffle_participants: bool,
    /// Travel distances between locations.
    pub distance_matrix: DistanceMatrix,
}

impl Default for PolicyParameters {
    fn default() -> Self {
        SettingsInput::default().resolve()
    }
}

impl PolicyParameters {
    /// Parses a settings document and resolves missing fields.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let input: SettingsInput = serde_json::from_str(json)?;
        Ok(input.resolve())
    }

    /// Effective history lookback: never less than one rotation.
    pub fn effective_lookback(&self) -> usize {
        self.rotations_to_reinspect.max(1) as usize
    }

    /// Sets the distance matrix.
    pub fn with_distance_matrix(mut self, matrix: DistanceMatrix) -> Self {
        self.distance_matrix = matrix;
        self
    }

    /// Sets the shuffle flag.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle_participants = shuffle;
        self
    }

    /// Sets the lookback depth.
    pub fn with_rotations_to_reinspect(mut self, rotations: u32) -> Self {
        self.rotations_to_reinspect = rotations;
        self
    }
}

/// Settings as supplied by a caller, any field possibly absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsInput {
    pub nb_pro_participants: Option<Range>,
    pub nb_non_pro_participants: Option<Range>,
    pub nb_external_participants: Option<Range>,
    pub number_of_assignments_for_a_professional: Option<Range>,
    pub number_of_assignments_for_a_non_professional: Option<Range>,
    pub number_of_assignments_for_an_external: Option<Range>,
    pub nb_rotations_to_reinspect: Option<u32>,
    pub nb_inspectors_following_up: Option<u32>,
    pub travelling_distance_range: Option<Range>,
    pub committee_meeting_size: Option<Range>,
    pub use_availability: Option<bool>,
    pub shuffle_participants: Option<bool>,
    pub distance_matrix: Option<DistanceMatrix>,
}

impl SettingsInput {
    /// Resolves every field to a concrete value.
    pub fn resolve(self) -> PolicyParameters {
        PolicyParameters {
            professional_count: resolve_professional_count(self.nb_pro_participants),
            non_professional_count: resolve_non_professional_count(self.nb_non_pro_participants),
            external_count: resolve_external_count(self.nb_external_participants),
            assignments_per_professional: resolve_assignments(
                self.number_of_assignments_for_a_professional,
            ),
            assignments_per_non_professional: resolve_assignments(
                self.number_of_assignments_for_a_non_professional,
            ),
            assignments_per_external: resolve_assignments(
                self.number_of_assignments_for_an_external,
            ),
            travelling_distance: resolve_travelling_distance(self.travelling_distance_range),
            committee_meeting_size: resolve_meeting_size(self.committee_meeting_size),
            rotations_to_reinspect: resolve_rotations_to_reinspect(self.nb_rotations_to_reinspect),
            inspectors_following_up: resolve_inspectors_following_up(
                self.nb_inspectors_following_up,
            ),
            use_availability: resolve_use_availability(self.use_availability),
            shuffle_participants: resolve_shuffle(self.shuffle_participants),
            distance_matrix: resolve_distance_matrix(self.distance_matrix),
        }
    }
}

fn resolve_professional_count(value: Option<Range>) -> Range {
    value.unwrap_or(Range::exactly(2))
}

fn resolve_non_professional_count(value: Option<Range>) -> Range {
    value.unwrap_or(Range::exactly(1))
}

fn resolve_external_count(value: Option<Range>) -> Range {
    value.unwrap_or(Range::exactly(0))
}

fn resolve_assignments(value: Option<Range>) -> Range {
    value.unwrap_or(Range::new(0, 5))
}

fn resolve_travelling_distance(value: Option<Range>) -> Range {
    value.unwrap_or(Range::new(0, 100))
}

fn resolve_meeting_size(value: Option<Range>) -> Range {
    value.unwrap_or(Range::new(0, 10))
}

fn resolve_rotations_to_reinspect(value: Option<u32>) -> u32 {
    value.unwrap_or(3)
}

fn resolve_inspectors_following_up(value: Option<u32>) -> u32 {
    value.unwrap_or(0)
}

fn resolve_use_availability(value: Option<bool>) -> bool {
    value.unwrap_or(true)
}

fn resolve_shuffle(value: Option<bool>) -> bool {
    value.unwrap_or(false)
}

fn resolve_distance_matrix(value: Option<DistanceMatrix>) -> DistanceMatrix {
    value.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = PolicyParameters::default();
        assert_eq!(p.professional_count, Range::exactly(2));
        assert_eq!(p.non_professional_count, Range::exactly(1));
        assert_eq!(p.external_count, Range::exactly(0));
        assert_eq!(p.assignments_per_professional, Range::new(0, 5));
        assert_eq!(p.travelling_distance, Range::new(0, 100));
        assert_eq!(p.committee_meeting_size, Range::new(0, 10));
        assert_eq!(p.rotations_to_reinspect, 3);
        assert_eq!(p.inspectors_following_up, 0);
        assert!(p.use_availability);
        assert!(!p.shuffle_participants);
        assert!(p.distance_matrix.is_empty());
    }

    #[test]
    fn test_partial_json_resolves() {
        let json = r#"{
            "nbProParticipants": { "min": 1, "max": 3 },
            "nbRotationsToReinspect": 0,
            "shuffleParticipants": true
        }"#;
        let p = PolicyParameters::from_json(json).unwrap();
        assert_eq!(p.professional_count, Range::new(1, 3));
        assert_eq!(p.non_professional_count, Range::exactly(1));
        assert_eq!(p.rotations_to_reinspect, 0);
        assert_eq!(p.effective_lookback(), 1);
        assert!(p.shuffle_participants);
    }

    #[test]
    fn test_invalid_json() {
        let err = PolicyParameters::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_distance_lookup() {
        let m = DistanceMatrix::new(
            vec!["X".into(), "Y".into(), "Z".into()],
            vec![vec![0, 5, 7], vec![5, 0]],
        );
        assert_eq!(m.distance("X", "Y"), Some(5));
        assert_eq!(m.distance("Y", "Z"), Some(0)); // missing entry
        assert_eq!(m.distance("Z", "X"), Some(0)); // missing row
        assert_eq!(m.distance("X", "W"), None);
        assert!(!m.is_square());
    }

    #[test]
    fn test_range() {
        let r = Range::new(1, 3);
        assert!(r.contains(1));
        assert!(r.contains(3));
        assert!(!r.contains(4));
        assert!(r.is_well_formed());
        assert!(!Range::new(4, 2).is_well_formed());
    }
}
