//! Reviewer committee planning for the U-Engine ecosystem.
//!
//! Assigns reviewers to the participants of a periodic evaluation process
//! ("rotations") under quota, skill, availability, location, veto and
//! anti-repetition rules. The combinatorial search itself is delegated to
//! an external answer set solver (clingo); this crate owns the domain
//! language on both sides of it.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Participant`, `PolicyParameters`,
//!   `Assignment`, `Committee`, `CommitteeSet`, `Solution`
//! - **`sanitize`**: Label to solver identifier mapping
//! - **`history`**: Past rotations folded into per-participant ledgers
//! - **`asp`**: Program compilation, solver seam, result decoding
//! - **`planner`**: End-to-end pipeline and KPIs
//! - **`validation`**: Input integrity checks (duplicate names, identifier
//!   collisions, unknown vetoes, malformed policy)
//!
//! # Architecture
//!
//! ```text
//! roster + history ──fold──▶ roster with ledgers ──compile──▶ ASP program
//!                                                                │
//!                                                           AspSolver
//!                                                                │
//! Solution ◀──group── assignments ◀──decode── result atoms ◀─────┘
//! ```
//!
//! # References
//!
//! - Gebser et al. (2012), "Answer Set Solving in Practice"
//! - Lifschitz (2019), "Answer Set Programming"

pub mod asp;
pub mod error;
pub mod history;
pub mod models;
pub mod planner;
pub mod sanitize;
pub mod validation;

pub use error::Error;
pub use sanitize::sanitize_name;
