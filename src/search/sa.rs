//! Simulated annealing.
//!
//! # Algorithm
//! Each iteration draws one random neighbour of the current solution and
//! computes `delta = cost(current) - cost(neighbour)`. The neighbour
//! becomes current if `delta >= 0`, or otherwise with probability
//! `exp(delta / T)`. The best solution seen is tracked independently of
//! acceptance. `T` is multiplied by the cooling rate after every iteration.
//!
//! # Reference
//! Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{Neighbourhood, Objective};
use crate::error::{DispatchError, DispatchResult};

/// Simulated annealing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaConfig {
    /// Starting temperature (> 0).
    pub initial_temperature: f64,
    /// Geometric cooling factor, strictly between 0 and 1.
    pub cooling_rate: f64,
    /// Number of iterations.
    pub iterations: usize,
}

impl SaConfig {
    /// Creates a configuration.
    pub fn new(initial_temperature: f64, cooling_rate: f64, iterations: usize) -> Self {
        Self {
            initial_temperature,
            cooling_rate,
            iterations,
        }
    }

    /// Sets the starting temperature.
    pub fn with_initial_temperature(mut self, temperature: f64) -> Self {
        self.initial_temperature = temperature;
        self
    }

    /// Sets the cooling rate.
    pub fn with_cooling_rate(mut self, cooling_rate: f64) -> Self {
        self.cooling_rate = cooling_rate;
        self
    }

    /// Sets the iteration budget.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Checks the parameter contract.
    pub fn validate(&self) -> DispatchResult<()> {
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(DispatchError::InvalidCoolingRate(self.cooling_rate));
        }
        if !(self.initial_temperature.is_finite() && self.initial_temperature > 0.0) {
            return Err(DispatchError::InvalidTemperature(self.initial_temperature));
        }
        Ok(())
    }
}

impl Default for SaConfig {
    fn default() -> Self {
        Self::new(100.0, 0.95, 1000)
    }
}

/// Outcome of a simulated annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S> {
    /// Best solution seen.
    pub best: S,
    /// Cost of `best`.
    pub best_cost: i64,
    /// Iterations performed.
    pub iterations: usize,
    /// Neighbours accepted as the current solution.
    pub accepted: usize,
    /// Best cost after each improvement, starting with the initial cost.
    pub best_cost_trace: Vec<i64>,
}

/// Runs simulated annealing from `initial`.
///
/// Returns the best solution ever seen, which need not be the final
/// current solution. Fails before doing any work if the configuration
/// violates its contract.
pub fn simulated_annealing<S, O, R>(
    initial: S,
    config: &SaConfig,
    objective: &O,
    rng: &mut R,
) -> DispatchResult<SaResult<S>>
where
    S: Neighbourhood,
    O: Objective<S> + ?Sized,
    R: Rng,
{
    config.validate()?;

    let mut temperature = config.initial_temperature;
    let mut current_cost = objective.cost(&initial);
    let mut best = initial.clone();
    let mut best_cost = current_cost;
    let mut current = initial;
    let mut accepted = 0;
    let mut best_cost_trace = vec![best_cost];

    for iteration in 0..config.iterations {
        let neighbour = current.random_neighbour(rng);
        let neighbour_cost = objective.cost(&neighbour);
        let delta = current_cost - neighbour_cost;

        if neighbour_cost < best_cost {
            best = neighbour.clone();
            best_cost = neighbour_cost;
            best_cost_trace.push(best_cost);
            trace!(iteration, best_cost, "new best");
        }

        if delta >= 0 || rng.random::<f64>() < (delta as f64 / temperature).exp() {
            current = neighbour;
            current_cost = neighbour_cost;
            accepted += 1;
        }

        temperature *= config.cooling_rate;
    }

    debug!(
        iterations = config.iterations,
        accepted,
        best_cost,
        final_temperature = temperature,
        "simulated annealing complete"
    );

    Ok(SaResult {
        best,
        best_cost,
        iterations: config.iterations,
        accepted,
        best_cost_trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Job, Machine, Schedule};
    use crate::scheduler::Scheduler;
    use crate::search::{Makespan, TotalTardiness, WeightedCompletion};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

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
    fn test_rejects_bad_cooling_rate() {
        let mut rng = SmallRng::seed_from_u64(42);
        for rate in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let config = SaConfig::default().with_cooling_rate(rate);
            let err = simulated_annealing(tardy_machine(), &config, &Makespan, &mut rng);
            assert!(matches!(err, Err(DispatchError::InvalidCoolingRate(_))));
        }
    }

    #[test]
    fn test_rejects_bad_temperature() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = SaConfig::default().with_initial_temperature(0.0);
        let err = simulated_annealing(tardy_machine(), &config, &Makespan, &mut rng);
        assert_eq!(err.unwrap_err(), DispatchError::InvalidTemperature(0.0));
    }

    #[test]
    fn test_zero_iterations_returns_initial() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = SaConfig::default().with_iterations(0);
        let result = simulated_annealing(tardy_machine(), &config, &TotalTardiness, &mut rng)
            .unwrap();
        assert_eq!(result.best, tardy_machine());
        assert_eq!(result.best_cost, TotalTardiness.cost(&tardy_machine()));
        assert_eq!(result.accepted, 0);
    }

    #[test]
    fn test_improves_tardiness() {
        let initial = tardy_machine();
        let initial_cost = TotalTardiness.cost(&initial);
        let mut rng = SmallRng::seed_from_u64(42);
        let config = SaConfig::new(20.0, 0.95, 500);

        let result = simulated_annealing(initial, &config, &TotalTardiness, &mut rng).unwrap();
        assert!(result.best_cost < initial_cost);
        assert_eq!(TotalTardiness.cost(&result.best), result.best_cost);
    }

    #[test]
    fn test_best_cost_never_regresses() {
        let mut rng = SmallRng::seed_from_u64(42);
        let config = SaConfig::new(50.0, 0.99, 300);
        let result =
            simulated_annealing(tardy_machine(), &config, &WeightedCompletion, &mut rng).unwrap();

        assert!(result.best_cost_trace.windows(2).all(|w| w[1] < w[0]));
        assert_eq!(result.best_cost_trace.last(), Some(&result.best_cost));
    }

    #[test]
    fn test_reproducible_with_seed() {
        let config = SaConfig::new(30.0, 0.9, 100);
        let objective = |m: &Machine| m.total_tardiness() + m.makespan();
        let a = simulated_annealing(
            tardy_machine(),
            &config,
            &objective,
            &mut SmallRng::seed_from_u64(11),
        )
        .unwrap();
        let b = simulated_annealing(
            tardy_machine(),
            &config,
            &objective,
            &mut SmallRng::seed_from_u64(11),
        )
        .unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_cost_trace, b.best_cost_trace);
        assert_eq!(a.accepted, b.accepted);
    }

    #[test]
    fn test_whole_schedule_candidate() {
        let jobs: Vec<Job> = (1..=6)
            .map(|i| Job::new(i, i as i64).with_due_date(4))
            .collect();
        let initial: Schedule = Scheduler::with_machines(2).longest_processing_time(&jobs);
        let initial_cost = TotalTardiness.cost(&initial);

        let mut rng = SmallRng::seed_from_u64(42);
        let config = SaConfig::new(10.0, 0.95, 300);
        let result = simulated_annealing(initial, &config, &TotalTardiness, &mut rng).unwrap();
        assert!(result.best_cost <= initial_cost);
        assert_eq!(result.best.job_count(), 6);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = SaConfig::new(12.5, 0.8, 40);
        let json = serde_json::to_string(&config).unwrap();
        let back: SaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
