//! Dispatching rules and rule engine.
//!
//! A dispatching rule scores each job; sorting by score (ties broken by job
//! id) gives the total order in which jobs are dispatched to machines.
//!
//! # Usage
//!
//! ```
//! use u_dispatch::dispatching::{rules, RuleEngine};
//! use u_dispatch::models::Job;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Edd)
//!     .with_rule(rules::Spt);
//!
//! let jobs = vec![
//!     Job::new(1, 5).with_due_date(10),
//!     Job::new(2, 2).with_due_date(10),
//! ];
//! let order = engine.sort(&jobs);
//! assert_eq!(order[0].id, 2);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-5
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod engine;
pub mod rules;

pub use engine::{EvaluationMode, RuleEngine};

use crate::models::Job;
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = dispatched first.
pub type RuleScore = f64;

/// A dispatching rule that scores a job.
///
/// # Score Convention
/// **Lower score = higher priority.**
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "EDD").
    fn name(&self) -> &'static str;

    /// Scores a job. Lower = dispatched earlier.
    fn evaluate(&self, job: &Job) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
