//! Built-in dispatching rules.
//!
//! | Rule | Order | Optimal for |
//! |------|-------|-------------|
//! | SPT | ascending p | mean completion time, 1 machine |
//! | WSPT | ascending p/w | weighted mean completion time, 1 machine |
//! | LPT | descending p | makespan heuristic, parallel machines |
//! | EDD | ascending d | maximum lateness, 1 machine |
//!
//! # Score Convention
//! All rules return lower scores for jobs dispatched first.

use super::{DispatchingRule, RuleScore};
use crate::models::Job;

/// Shortest Processing Time.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.processing_time as f64
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Weighted Shortest Processing Time: ascending `p / w`.
///
/// # Reference
/// Smith (1956), optimal for minimizing weighted mean flow time.
#[derive(Debug, Clone, Copy)]
pub struct Wspt;

impl DispatchingRule for Wspt {
    fn name(&self) -> &'static str {
        "WSPT"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        if job.weight <= 0 {
            return f64::MAX;
        }
        job.processing_time as f64 / job.weight as f64
    }

    fn description(&self) -> &'static str {
        "Weighted Shortest Processing Time"
    }
}

/// Longest Processing Time.
///
/// Graham's list-scheduling heuristic for parallel-machine makespan.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        -(job.processing_time as f64)
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

/// Earliest Due Date. Jobs without a due date go last.
///
/// # Reference
/// Jackson (1955), optimal for minimizing maximum lateness on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Edd;

impl DispatchingRule for Edd {
    fn name(&self) -> &'static str {
        "EDD"
    }

    fn evaluate(&self, job: &Job) -> RuleScore {
        job.due_date.map(|d| d as f64).unwrap_or(f64::MAX)
    }

    fn description(&self) -> &'static str {
        "Earliest Due Date"
    }
}
