//! Tabu search over adjacent swaps.
//!
//! # Algorithm
//! Each iteration scans adjacent pairs `(ids[k], ids[k+1])` of the current
//! sequence, starting from a cursor that persists across iterations and
//! wraps around. Pairs in the tabu list are skipped. The first non-tabu
//! swap that either beats the best known cost or degrades the current cost
//! by at most `threshold` is accepted. Every pair the scan reaches, tabu or
//! not, is pushed onto a bounded FIFO tabu list, so a pair the search keeps
//! running into stays forbidden longer.
//!
//! A scan covers at most one full cycle. If no non-tabu swap qualifies,
//! the cheapest swap evaluated in that cycle is taken, tabu pairs included.
//!
//! # Reference
//! Glover (1989), "Tabu Search - Part I", ORSA Journal on Computing 1(3)

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Neighbourhood, Objective};
use crate::error::{DispatchError, DispatchResult};
use crate::models::JobId;

/// Tabu search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabuConfig {
    /// Maximum number of remembered moves.
    pub tabu_list_size: usize,
    /// Largest cost increase an accepted move may cause (> 0).
    pub threshold: i64,
    /// Number of iterations.
    pub iterations: usize,
}

impl TabuConfig {
    /// Creates a configuration.
    pub fn new(tabu_list_size: usize, threshold: i64, iterations: usize) -> Self {
        Self {
            tabu_list_size,
            threshold,
            iterations,
        }
    }

    /// Sets the tabu list size.
    pub fn with_tabu_list_size(mut self, size: usize) -> Self {
        self.tabu_list_size = size;
        self
    }

    /// Sets the degradation threshold.
    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Checks the parameter contract.
    pub fn validate(&self) -> DispatchResult<()> {
        if self.threshold <= 0 {
            return Err(DispatchError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self::new(10, 1, 100)
    }
}

/// Outcome of a tabu search run.
#[derive(Debug, Clone)]
pub struct TabuResult<S> {
    /// Best solution seen.
    pub best: S,
    /// Cost of `best`.
    pub best_cost: i64,
    /// Iterations performed.
    pub iterations: usize,
    /// Accepted moves, in order, as unordered job id pairs.
    pub moves: Vec<(JobId, JobId)>,
    /// How many accepted moves were in the tabu list at the time.
    pub tabu_moves: usize,
}

/// A move is the same regardless of which job comes first.
fn move_key(a: JobId, b: JobId) -> (JobId, JobId) {
    (a.min(b), a.max(b))
}

struct Candidate<S> {
    pair: (JobId, JobId),
    solution: S,
    cost: i64,
    tabu: bool,
}

fn cheaper<S>(kept: Option<Candidate<S>>, other: Candidate<S>) -> Option<Candidate<S>> {
    match kept {
        Some(kept) if kept.cost <= other.cost => Some(kept),
        _ => Some(other),
    }
}

/// Runs tabu search from `initial`.
///
/// Stops early if the candidate has fewer than two jobs. Fails before
/// doing any work if the configuration violates its contract.
pub fn tabu_search<S, O>(
    initial: S,
    config: &TabuConfig,
    objective: &O,
) -> DispatchResult<TabuResult<S>>
where
    S: Neighbourhood,
    O: Objective<S> + ?Sized,
{
    config.validate()?;

    let mut current_cost = objective.cost(&initial);
    let mut best = initial.clone();
    let mut best_cost = current_cost;
    let mut current = initial;

    let mut tabu_list: VecDeque<(JobId, JobId)> = VecDeque::new();
    let mut cursor = 0usize;
    let mut moves = Vec::new();
    let mut tabu_moves = 0;
    let mut iterations = 0;

    for _ in 0..config.iterations {
        let ids = current.job_ids();
        if ids.len() < 2 {
            break;
        }
        let pairs = ids.len() - 1;
        cursor %= pairs;

        let mut chosen: Option<Candidate<S>> = None;
        let mut cheapest: Option<Candidate<S>> = None;
        let mut skipped: Vec<usize> = Vec::new();

        for _ in 0..pairs {
            let position = cursor;
            cursor = (cursor + 1) % pairs;

            let (a, b) = (ids[position], ids[position + 1]);
            let pair = move_key(a, b);
            let is_tabu = tabu_list.contains(&pair);

            tabu_list.push_back(pair);
            while tabu_list.len() > config.tabu_list_size {
                tabu_list.pop_front();
            }

            if is_tabu {
                skipped.push(position);
                continue;
            }

            let solution = current.swap_jobs(a, b);
            let cost = objective.cost(&solution);
            let candidate = Candidate {
                pair,
                solution,
                cost,
                tabu: false,
            };

            if cost < best_cost || current_cost - cost >= -config.threshold {
                chosen = Some(candidate);
                break;
            }
            cheapest = cheaper(cheapest, candidate);
        }

        let chosen = match chosen {
            Some(candidate) => candidate,
            None => {
                for position in skipped {
                    let (a, b) = (ids[position], ids[position + 1]);
                    let solution = current.swap_jobs(a, b);
                    let cost = objective.cost(&solution);
                    let candidate = Candidate {
                        pair: move_key(a, b),
                        solution,
                        cost,
                        tabu: true,
                    };
                    cheapest = cheaper(cheapest, candidate);
                }
                match cheapest {
                    Some(candidate) => candidate,
                    None => break,
                }
            }
        };

        iterations += 1;
        if chosen.tabu {
            tabu_moves += 1;
        }
        trace!(pair = ?chosen.pair, cost = chosen.cost, tabu = chosen.tabu, "move accepted");

        if chosen.cost < best_cost {
            best = chosen.solution.clone();
            best_cost = chosen.cost;
        }
        moves.push(chosen.pair);
        current = chosen.solution;
        current_cost = chosen.cost;
    }

    debug!(
        iterations,
        moves = moves.len(),
        tabu_moves,
        best_cost,
        "tabu search complete"
    );

    Ok(TabuResult {
        best,
        best_cost,
        iterations,
        moves,
        tabu_moves,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Machine};
    use crate::search::{TotalTardiness, WeightedCompletion};

    fn tardy_machine() -> Machine {
        Machine::from_jobs(
            0,
            vec![
                Job::new(1, 6).with_due_date(20),
                Job::new(2, 5).with_due_date(15),
                Job::new(3, 4).with_due_date(8),
                Job::new(4, 2).with_due_date(2),
            ],
        )
    }

    #[test]
    fn test_rejects_non_positive_threshold() {
        for threshold in [0, -3] {
            let config = TabuConfig::default().with_threshold(threshold);
            let err = tabu_search(tardy_machine(), &config, &TotalTardiness).unwrap_err();
            assert_eq!(err, DispatchError::InvalidThreshold(threshold));
        }
    }

    #[test]
    fn test_improves_tardiness() {
        let initial = tardy_machine();
        let initial_cost = TotalTardiness.cost(&initial);
        let config = TabuConfig::new(3, 2, 50);

        let result = tabu_search(initial, &config, &TotalTardiness).unwrap();
        assert!(result.best_cost < initial_cost);
        assert_eq!(TotalTardiness.cost(&result.best), result.best_cost);
    }

    #[test]
    fn test_first_move_is_first_improving_pair() {
        // WSPT-optimal order is 4, 3, 2, 1; the first adjacent pair (1, 2)
        // already improves weighted completion.
        let config = TabuConfig::new(5, 1, 1);
        let result = tabu_search(tardy_machine(), &config, &WeightedCompletion).unwrap();
        assert_eq!(result.moves, vec![(1, 2)]);
        assert_eq!(result.best.job_ids(), vec![2, 1, 3, 4]);
    }

    fn cost_table(table: &'static [(&'static [JobId], i64)]) -> impl Fn(&Machine) -> i64 {
        move |m: &Machine| {
            let ids = m.job_ids();
            table
                .iter()
                .find(|(order, _)| *order == ids.as_slice())
                .map_or(100, |&(_, cost)| cost)
        }
    }

    #[test]
    fn test_skips_tabu_pair_for_next_qualifying_pair() {
        let machine = Machine::from_jobs(0, (1..=4).map(|i| Job::new(i, 1)));
        // Undoing the first swap would be cheapest, but (1, 2) is tabu and
        // the next pair (1, 4) is within the threshold.
        let objective = cost_table(&[
            (&[1, 2, 3, 4], 10),
            (&[2, 1, 3, 4], 9),
            (&[2, 3, 1, 4], 100),
            (&[2, 1, 4, 3], 9),
            (&[2, 4, 1, 3], 8),
            (&[1, 2, 4, 3], 0),
        ]);
        let config = TabuConfig::new(5, 1, 3);

        let result = tabu_search(machine, &config, &objective).unwrap();
        assert_eq!(result.moves, vec![(1, 2), (3, 4), (1, 4)]);
        assert_eq!(result.tabu_moves, 0);
        assert_eq!(result.best.job_ids(), vec![2, 4, 1, 3]);
        assert_eq!(result.best_cost, 8);
    }

    #[test]
    fn test_skipped_tabu_pair_is_appended_again() {
        // ids [1, 2, 3], list size 2. The second scan skips (1, 2) as tabu
        // and re-appends it behind (1, 3). The third scan's first push then
        // evicts (1, 3), so (1, 2) is still tabu and only the fallback can
        // take it.
        let machine = Machine::from_jobs(0, (1..=3).map(|i| Job::new(i, 1)));
        let objective = cost_table(&[(&[1, 2, 3], 10), (&[2, 1, 3], 9)]);
        let config = TabuConfig::new(2, 1, 3);

        let result = tabu_search(machine, &config, &objective).unwrap();
        assert_eq!(result.moves, vec![(1, 2), (1, 2), (1, 2)]);
        assert_eq!(result.tabu_moves, 2);
        assert_eq!(result.best_cost, 9);
    }

    #[test]
    fn test_never_accepts_tabu_move_while_alternatives_qualify() {
        // Large threshold: every non-tabu swap qualifies, so no tabu pair is
        // ever needed while fresh pairs remain.
        let jobs: Vec<Job> = (1..=6).map(|i| Job::new(i, i as i64)).collect();
        let machine = Machine::from_jobs(0, jobs);
        let config = TabuConfig::new(3, 1_000, 30);
        let result = tabu_search(machine, &config, &WeightedCompletion).unwrap();
        assert_eq!(result.tabu_moves, 0);
        assert_eq!(result.iterations, 30);
    }

    #[test]
    fn test_all_pairs_tabu_falls_back_to_cheapest() {
        // Two jobs: one adjacent pair. After the first move it is tabu, so
        // every later iteration must take it from the tabu list.
        let machine = Machine::from_jobs(0, vec![Job::new(1, 1), Job::new(2, 1)]);
        let config = TabuConfig::new(5, 1, 3);
        let result = tabu_search(machine, &config, &WeightedCompletion).unwrap();
        assert_eq!(result.iterations, 3);
        assert_eq!(result.tabu_moves, 2);
    }

    #[test]
    fn test_zero_size_tabu_list() {
        let config = TabuConfig::new(0, 1, 10);
        let result = tabu_search(tardy_machine(), &config, &TotalTardiness).unwrap();
        assert_eq!(result.tabu_moves, 0);
        assert!(result.best_cost <= TotalTardiness.cost(&tardy_machine()));
    }

    #[test]
    fn test_single_job_stops_immediately() {
        let machine = Machine::from_jobs(0, vec![Job::new(1, 3)]);
        let result = tabu_search(machine.clone(), &TabuConfig::default(), &TotalTardiness)
            .unwrap();
        assert_eq!(result.iterations, 0);
        assert_eq!(result.best, machine);
    }

    #[test]
    fn test_deterministic() {
        let config = TabuConfig::new(4, 3, 40);
        let a = tabu_search(tardy_machine(), &config, &TotalTardiness).unwrap();
        let b = tabu_search(tardy_machine(), &config, &TotalTardiness).unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = TabuConfig::new(7, 2, 25);
        let json = serde_json::to_string(&config).unwrap();
        let back: TabuConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
