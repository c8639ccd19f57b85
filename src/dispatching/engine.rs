//! Rule engine for multi-criteria dispatching.
//!
//! Composes dispatching rules either sequentially (each later rule only
//! breaks ties left by the earlier ones) or as a weighted sum. Any tie that
//! survives all rules is broken by ascending job id, so the resulting order
//! is always total and deterministic.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Ordering;
use std::sync::Arc;

use super::{DispatchingRule, RuleScore};
use crate::models::Job;

/// How multiple rules are combined.
#[derive(Debug, Clone, Default)]
pub enum EvaluationMode {
    /// Apply rules in sequence; use next rule only on ties.
    #[default]
    Sequential,
    /// Compute weighted sum of all rule scores.
    Weighted,
}

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn DispatchingRule>,
    weight: f64,
}

/// A composable rule engine for job sequencing.
///
/// # Example
/// ```
/// use u_dispatch::dispatching::{rules, RuleEngine};
/// use u_dispatch::models::Job;
///
/// let engine = RuleEngine::new().with_rule(rules::Lpt);
/// let order = engine.sort(&[Job::new(1, 2), Job::new(2, 7)]);
/// assert_eq!(order[0].id, 2);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<WeightedRule>,
    mode: EvaluationMode,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine (orders by job id only).
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            mode: EvaluationMode::Sequential,
            epsilon: 1e-9,
        }
    }

    /// Creates an engine with a single rule.
    pub fn single<R: DispatchingRule + 'static>(rule: R) -> Self {
        Self::new().with_rule(rule)
    }

    /// Adds a rule (weight 1.0).
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight: 1.0,
        });
        self
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: DispatchingRule + 'static>(
        mut self,
        rule: R,
        weight: f64,
    ) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Sets the evaluation mode.
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Names of the configured rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|wr| wr.rule.name()).collect()
    }

    /// Returns indices into `jobs` in dispatch order.
    pub fn sort_indices(&self, jobs: &[Job]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..jobs.len()).collect();

        match &self.mode {
            EvaluationMode::Sequential => {
                indices.sort_by(|&a, &b| self.compare_sequential(&jobs[a], &jobs[b]));
            }
            EvaluationMode::Weighted => {
                let scores: Vec<f64> = jobs.iter().map(|j| self.weighted_score(j)).collect();
                indices.sort_by(|&a, &b| {
                    scores[a]
                        .partial_cmp(&scores[b])
                        .unwrap_or(Ordering::Equal)
                        .then_with(|| jobs[a].id.cmp(&jobs[b].id))
                });
            }
        }

        indices
    }

    /// Returns a copy of `jobs` in dispatch order.
    pub fn sort(&self, jobs: &[Job]) -> Vec<Job> {
        self.sort_indices(jobs)
            .into_iter()
            .map(|i| jobs[i].clone())
            .collect()
    }

    /// Evaluates a single job and returns the weighted score of each rule.
    pub fn evaluate(&self, job: &Job) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(job) * wr.weight)
            .collect()
    }

    fn compare_sequential(&self, a: &Job, b: &Job) -> Ordering {
        for wr in &self.rules {
            let score_a = wr.rule.evaluate(a);
            let score_b = wr.rule.evaluate(b);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }
        a.id.cmp(&b.id)
    }

    fn weighted_score(&self, job: &Job) -> f64 {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(job) * wr.weight)
            .sum()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .field("mode", &self.mode)
            .finish()
    }
}
