//! ASP-based committee formulation.
//!
//! Bridges the committee domain models to an answer set solver such as
//! clingo. [`ProgramBuilder`] renders a roster and its policy into a
//! program; an [`AspSolver`] runs it; [`SolutionDecoder`] maps the
//! resulting atoms back onto the roster.
//!
//! # Reference
//! - Gebser et al. (2012), "Answer Set Solving in Practice"
//! - Potassco clingo guide, JSON output format (`--outf=2`)

mod atom;
mod compile;
mod decode;
mod policy;
mod result;

pub use atom::Atom;
pub use compile::ProgramBuilder;
pub use decode::SolutionDecoder;
pub use policy::PolicyModules;
pub use result::SolverResult;

use crate::error::Error;

/// Runs an ASP program.
///
/// Implementations own process spawning, remote calls, timeouts and
/// cancellation. Returning `Err` means the solver could not be run at all;
/// a run that ends in `UNSATISFIABLE` or `ERROR` is an `Ok` result.
pub trait AspSolver {
    /// Solves the program text.
    fn solve(&self, program: &str) -> Result<SolverResult, Error>;
}

impl<F> AspSolver for F
where
    F: Fn(&str) -> Result<SolverResult, Error>,
{
    fn solve(&self, program: &str) -> Result<SolverResult, Error> {
        self(program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Participant, PolicyParameters, SolverStatus};

    #[test]
    fn test_closure_solver() {
        let roster = vec![
            Participant::professional("A").needing_evaluation(),
            Participant::professional("B"),
        ];
        let params = PolicyParameters::default();
        let solver = |program: &str| -> Result<SolverResult, Error> {
            assert!(program.contains("joined(a, 0)."));
            Ok(SolverResult::satisfiable(["schedule(a,monday)", "certify(b,a)"]))
        };

        let solution = ProgramBuilder::new(&roster, &params).solve(&solver);
        assert_eq!(solution.status, SolverStatus::Satisfiable);
        assert_eq!(solution.committees.len(), 1);
    }

    #[test]
    fn test_solver_failure_becomes_error_solution() {
        let roster = vec![Participant::professional("A")];
        let params = PolicyParameters::default();
        let solver = |_: &str| -> Result<SolverResult, Error> {
            Err(Error::Solver("clingo not found".into()))
        };

        let solution = ProgramBuilder::new(&roster, &params).solve(&solver);
        assert_eq!(solution.status, SolverStatus::Error);
        assert!(solution.explanation.contains("clingo not found"));
    }
}
