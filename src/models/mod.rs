//! Committee planning domain models.
//!
//! Provides the data types that flow through the pipeline: the roster and
//! policy going in, the committees and solution coming out.
//!
//! # Domain Mappings
//!
//! | u-committee | Peer certification | Thesis review | Audit rotation |
//! |-------------|--------------------|---------------|----------------|
//! | Participant | Farm / Producer | Candidate / Jury member | Site / Auditor |
//! | Committee | Certification visit | Thesis jury | Audit team |
//! | CommitteeSet | Yearly campaign | Defense session | Audit cycle |

mod committee;
mod participant;
mod settings;
mod solution;

pub use committee::{
    Assignee, Assignment, Committee, CommitteeRef, CommitteeSet, UNASSIGNED_NAME,
};
pub use participant::{Participant, ParticipantClass};
pub use settings::{DistanceMatrix, PolicyParameters, Range, SettingsInput};
pub use solution::{DecodeWarning, Solution, SolverStatus, UnknownStatus, UNDEFINED_SOLUTION_ID};
