//! End-to-end rotation planning and KPI evaluation.
//!
//! # Pipeline
//!
//! `CommitteePlanner` validates a [`CommitteeRequest`], folds its history
//! into the roster, compiles the ASP program, hands it to an
//! [`AspSolver`], and decodes the answer into a [`Solution`].
//!
//! # KPI
//!
//! `CommitteeKpi` computes workload and coverage metrics over the
//! resulting committees.

mod kpi;
mod request;

pub use kpi::CommitteeKpi;
pub use request::CommitteeRequest;

use rand::Rng;

use crate::asp::{AspSolver, PolicyModules, ProgramBuilder};
use crate::error::Error;
use crate::history::fold_history;
use crate::models::{Participant, Solution};
use crate::validation::validate_input;

/// Plans committees for one rotation.
///
/// # Example
///
/// ```
/// use u_committee::asp::SolverResult;
/// use u_committee::models::{Participant, PolicyParameters, SolverStatus};
/// use u_committee::planner::{CommitteePlanner, CommitteeRequest};
/// use u_committee::Error;
///
/// let request = CommitteeRequest::new(
///     vec![
///         Participant::professional("Ana").needing_evaluation(),
///         Participant::professional("Bob"),
///     ],
///     PolicyParameters::default(),
/// );
/// let solver = |_: &str| -> Result<SolverResult, Error> {
///     Ok(SolverResult::satisfiable(["schedule(ana,monday)", "certify(bob,ana)"]))
/// };
///
/// let solution = CommitteePlanner::new().plan(&request, &solver).unwrap();
/// assert_eq!(solution.status, SolverStatus::Satisfiable);
/// assert_eq!(solution.committees.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CommitteePlanner {
    policy: PolicyModules,
    strict: bool,
}

impl CommitteePlanner {
    /// Creates a planner with the bundled policy, reporting invalid input
    /// as warnings only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the policy modules.
    pub fn with_policy(mut self, policy: PolicyModules) -> Self {
        self.policy = policy;
        self
    }

    /// Rejects invalid input instead of logging it.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// The roster with its inspection ledger attached.
    pub fn prepare(&self, request: &CommitteeRequest) -> Vec<Participant> {
        tracing::debug!(
            lookback = request.params.effective_lookback(),
            available = request.history.len(),
            "preparing roster"
        );
        fold_history(
            &request.roster,
            &request.history,
            request.params.rotations_to_reinspect,
        )
    }

    /// Compiles the program for a request.
    pub fn compile(&self, request: &CommitteeRequest) -> String {
        self.compile_with_rng(request, &mut rand::rng())
    }

    /// Compiles the program for a request, shuffling with `rng` if configured.
    pub fn compile_with_rng<R: Rng + ?Sized>(
        &self,
        request: &CommitteeRequest,
        rng: &mut R,
    ) -> String {
        let roster = self.prepare(request);
        ProgramBuilder::new(&roster, &request.params)
            .with_policy(self.policy.clone())
            .build_with_rng(rng)
    }

    /// Runs the whole pipeline.
    ///
    /// Fails only when the planner is strict and the input is invalid.
    /// Solver problems are reported through the solution's status.
    pub fn plan<S: AspSolver + ?Sized>(
        &self,
        request: &CommitteeRequest,
        solver: &S,
    ) -> Result<Solution, Error> {
        let span = tracing::info_span!(
            "u_committee.plan",
            participants = request.roster.len(),
            rotations = request.history.len(),
            status = tracing::field::Empty,
        );
        let _entered = span.enter();

        if let Err(errors) = validate_input(&request.roster, &request.params) {
            if self.strict {
                return Err(Error::Validation(errors));
            }
            for e in &errors {
                tracing::warn!(kind = ?e.kind, "{}", e.message);
            }
        }

        let roster = self.prepare(request);
        let solution = ProgramBuilder::new(&roster, &request.params)
            .with_policy(self.policy.clone())
            .solve(solver);

        span.record("status", solution.status.as_str());
        tracing::debug!(
            status = %solution.status,
            committees = solution.committees.len(),
            warnings = solution.warnings.len(),
            "planning finished"
        );
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asp::SolverResult;
    use crate::models::{
        Assignee, Assignment, CommitteeRef, CommitteeSet, PolicyParameters, SolverStatus,
    };
    use crate::validation::ValidationErrorKind;
    use std::cell::RefCell;

    fn roster() -> Vec<Participant> {
        vec![
            Participant::professional("A").needing_evaluation(),
            Participant::professional("B"),
            Participant::non_professional("C"),
        ]
    }

    fn past_rotation(r: &[Participant]) -> CommitteeSet {
        CommitteeSet::from_assignments(&[Assignment::new(
            Assignee::Assigned(r[1].clone()),
            CommitteeRef {
                id: "a".into(),
                evaluated_person: Some(r[0].clone()),
                timeslot: "monday".into(),
            },
        )])
    }

    #[test]
    fn test_plan_end_to_end() {
        let r = roster();
        let request = CommitteeRequest::new(r.clone(), PolicyParameters::default())
            .with_history(vec![past_rotation(&r)]);
        let seen = RefCell::new(String::new());
        let solver = |program: &str| -> Result<SolverResult, Error> {
            *seen.borrow_mut() = program.to_string();
            Ok(SolverResult::satisfiable(["schedule(a,monday)", "certify(c,a)"]))
        };

        let solution = CommitteePlanner::new().plan(&request, &solver).unwrap();
        assert_eq!(solution.status, SolverStatus::Satisfiable);
        let committee = solution.committees.committee("a").unwrap();
        assert_eq!(committee.assignments[0].reviewer_name(), Some("C"));

        let program = seen.borrow();
        assert!(program.contains("attribute(followUp, b, certified(0), a)."));
        assert!(program.contains("#const target = 1."));
        // Request roster untouched
        assert!(request.roster.iter().all(|p| p.already_inspected.is_empty()));
    }

    #[test]
    fn test_plan_output_has_no_ledgers() {
        let r = roster();
        let request = CommitteeRequest::new(r.clone(), PolicyParameters::default())
            .with_history(vec![past_rotation(&r)]);
        let solver = |_: &str| -> Result<SolverResult, Error> {
            Ok(SolverResult::satisfiable(["schedule(a,monday)", "certify(b,a)"]))
        };

        let solution = CommitteePlanner::new().plan(&request, &solver).unwrap();
        let committee = solution.committees.committee("a").unwrap();
        let reviewer = committee.assignments[0].assignee.participant().unwrap();
        assert_eq!(reviewer.name, "B");
        assert!(reviewer.already_inspected.is_empty());
        assert!(committee.evaluated_person.as_ref().unwrap().already_inspected.is_empty());

        let archived = CommitteeSet::history_to_json(&[solution.committees]).unwrap();
        assert!(!archived.contains("alreadyInspected"));
    }

    #[test]
    fn test_plan_unsatisfiable() {
        let request = CommitteeRequest::new(roster(), PolicyParameters::default());
        let solver = |_: &str| -> Result<SolverResult, Error> { Ok(SolverResult::unsatisfiable()) };

        let solution = CommitteePlanner::new().plan(&request, &solver).unwrap();
        assert_eq!(solution.status, SolverStatus::Unsatisfiable);
        assert!(solution.committees.is_empty());
    }

    #[test]
    fn test_plan_strict_rejects_invalid() {
        let mut r = roster();
        r.push(Participant::professional("B"));
        let request = CommitteeRequest::new(r, PolicyParameters::default());
        let solver = |_: &str| -> Result<SolverResult, Error> {
            panic!("solver must not run on rejected input")
        };

        let err = CommitteePlanner::new()
            .strict(true)
            .plan(&request, &solver)
            .unwrap_err();
        match err {
            Error::Validation(errors) => {
                assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateName)
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_plan_lenient_proceeds() {
        let mut r = roster();
        r.push(Participant::professional("B"));
        let request = CommitteeRequest::new(r, PolicyParameters::default());
        let solver = |_: &str| -> Result<SolverResult, Error> {
            Ok(SolverResult::satisfiable(Vec::<String>::new()))
        };

        let solution = CommitteePlanner::new().plan(&request, &solver).unwrap();
        assert_eq!(solution.status, SolverStatus::Satisfiable);
    }

    #[test]
    fn test_compile_uses_lookback() {
        let r = roster();
        let history = vec![past_rotation(&r), past_rotation(&r), past_rotation(&r)];
        let params = PolicyParameters::default().with_rotations_to_reinspect(2);
        let request = CommitteeRequest::new(r, params).with_history(history);

        let planner = CommitteePlanner::new();
        assert_eq!(planner.prepare(&request)[1].already_inspected.len(), 2);
        let program = planner.compile(&request);
        assert!(program.contains("#const target = 2."));
        assert!(program.contains("year(0..1)."));
        assert!(program.contains("specify(parameter, followUp, maxConsecutive, 2)."));
    }

    #[test]
    fn test_custom_policy() {
        let request = CommitteeRequest::new(roster(), PolicyParameters::default());
        let planner = CommitteePlanner::new()
            .with_policy(PolicyModules::bundled().with_activation("active(core).\n"));
        let program = planner.compile(&request);
        assert!(!program.contains("active(skills)."));
    }
}
