//! Local-search refinement of candidate schedules.
//!
//! Both algorithms work on any candidate type implementing
//! [`Neighbourhood`] (a single [`Machine`] or a whole [`Schedule`]) and
//! minimize a caller-supplied [`Objective`]. Every neighbour is a freshly
//! rebuilt value; the incumbent is never mutated in place.
//!
//! # Usage
//!
//! ```
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//! use u_dispatch::models::{Job, Machine};
//! use u_dispatch::search::{simulated_annealing, SaConfig, TotalTardiness};
//!
//! let machine = Machine::from_jobs(0, vec![
//!     Job::new(1, 5).with_due_date(12),
//!     Job::new(2, 4).with_due_date(4),
//!     Job::new(3, 2).with_due_date(2),
//! ]);
//! let mut rng = SmallRng::seed_from_u64(42);
//! let config = SaConfig::new(10.0, 0.9, 200);
//! let result = simulated_annealing(machine, &config, &TotalTardiness, &mut rng).unwrap();
//! assert!(result.best_cost <= 14);
//! ```
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Glover (1989), "Tabu Search - Part I"

mod sa;
mod tabu;

pub use sa::{simulated_annealing, SaConfig, SaResult};
pub use tabu::{tabu_search, TabuConfig, TabuResult};

use rand::Rng;

use crate::models::{JobId, Machine, Schedule};

/// A candidate solution that can generate neighbours by swapping jobs.
pub trait Neighbourhood: Clone {
    /// A neighbour obtained by one random swap (possibly a no-op).
    fn random_neighbour<R: Rng>(&self, rng: &mut R) -> Self;

    /// A neighbour with jobs `a` and `b` swapped. Unknown ids leave the
    /// order unchanged.
    fn swap_jobs(&self, a: JobId, b: JobId) -> Self;

    /// Job ids of the work fragments in sequence order.
    fn job_ids(&self) -> Vec<JobId>;
}

impl Neighbourhood for Machine {
    fn random_neighbour<R: Rng>(&self, rng: &mut R) -> Self {
        Machine::random_neighbour(self, rng)
    }

    fn swap_jobs(&self, a: JobId, b: JobId) -> Self {
        Machine::swap_jobs(self, a, b)
    }

    fn job_ids(&self) -> Vec<JobId> {
        Machine::job_ids(self)
    }
}

impl Neighbourhood for Schedule {
    fn random_neighbour<R: Rng>(&self, rng: &mut R) -> Self {
        Schedule::random_neighbour(self, rng)
    }

    fn swap_jobs(&self, a: JobId, b: JobId) -> Self {
        Schedule::swap_jobs(self, a, b)
    }

    fn job_ids(&self) -> Vec<JobId> {
        Schedule::job_ids(self)
    }
}

/// Cost of a candidate solution. Lower is better.
///
/// Implemented for any `Fn(&S) -> i64`, so plain closures work.
pub trait Objective<S> {
    /// Evaluates a candidate.
    fn cost(&self, solution: &S) -> i64;
}

impl<S, F> Objective<S> for F
where
    F: Fn(&S) -> i64,
{
    fn cost(&self, solution: &S) -> i64 {
        self(solution)
    }
}

/// Makespan objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct Makespan;

/// Total tardiness objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalTardiness;

/// Total weighted completion time objective.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedCompletion;

impl Objective<Machine> for Makespan {
    fn cost(&self, solution: &Machine) -> i64 {
        solution.makespan()
    }
}

impl Objective<Schedule> for Makespan {
    fn cost(&self, solution: &Schedule) -> i64 {
        solution.makespan()
    }
}

impl Objective<Machine> for TotalTardiness {
    fn cost(&self, solution: &Machine) -> i64 {
        solution.total_tardiness()
    }
}

impl Objective<Schedule> for TotalTardiness {
    fn cost(&self, solution: &Schedule) -> i64 {
        solution.total_tardiness()
    }
}

impl Objective<Machine> for WeightedCompletion {
    fn cost(&self, solution: &Machine) -> i64 {
        solution.total_weighted_completion()
    }
}

impl Objective<Schedule> for WeightedCompletion {
    fn cost(&self, solution: &Schedule) -> i64 {
        solution.total_weighted_completion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    #[test]
    fn test_closure_objective() {
        let machine = Machine::from_jobs(0, vec![Job::new(1, 3), Job::new(2, 4)]);
        let objective = |m: &Machine| m.makespan() * 2;
        assert_eq!(objective.cost(&machine), 14);
    }

    #[test]
    fn test_builtin_objectives() {
        let machine = Machine::from_jobs(
            0,
            vec![Job::new(1, 3).with_due_date(1).with_weight(2), Job::new(2, 4)],
        );
        assert_eq!(Makespan.cost(&machine), 7);
        assert_eq!(TotalTardiness.cost(&machine), 2);
        assert_eq!(WeightedCompletion.cost(&machine), 2 * 3 + 7);

        let mut schedule = Schedule::new(2);
        schedule.place(Job::new(1, 3).with_due_date(1), 0).unwrap();
        schedule.place(Job::new(2, 4), 1).unwrap();
        assert_eq!(Makespan.cost(&schedule), 4);
        assert_eq!(TotalTardiness.cost(&schedule), 2);
        assert_eq!(WeightedCompletion.cost(&schedule), 7);
    }

    #[test]
    fn test_schedule_neighbourhood_job_ids() {
        let mut schedule = Schedule::new(2);
        schedule.place(Job::new(4, 1), 1).unwrap();
        schedule.place(Job::new(2, 1), 0).unwrap();
        assert_eq!(Neighbourhood::job_ids(&schedule), vec![2, 4]);
    }
}
