//! Identical parallel machine scheduling.
//!
//! Computes schedules for a set of jobs on one or more identical machines
//! using classic dispatching rules, preemptive rules, and local-search
//! refinement against a caller-supplied objective.
//!
//! # Modules
//!
//! - **`models`**: `Job`, `Fragment`, `Machine`, `Schedule`
//! - **`dispatching`**: Sequencing rules (SPT, WSPT, LPT, EDD) and a composable rule engine
//! - **`scheduler`**: The `Scheduler` dispatcher (list, preemptive, SRPT, Moore-Hodgson) and KPIs
//! - **`search`**: Simulated annealing and tabu search over candidate solutions
//! - **`validation`**: Input integrity checks for job lists
//!
//! # Example
//!
//! ```
//! use u_dispatch::models::Job;
//! use u_dispatch::scheduler::{Scheduler, SchedulerConfig};
//!
//! let jobs: Vec<Job> = [6, 4, 2, 1, 3, 2]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, &p)| Job::new(i as u32 + 1, p))
//!     .collect();
//!
//! let scheduler = Scheduler::new(SchedulerConfig::new(2));
//! let schedule = scheduler.wrap_around_rule(&jobs);
//! assert_eq!(schedule.makespan(), 9);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Brucker (2007), "Scheduling Algorithms"
//! - McNaughton (1959), "Scheduling with Deadlines and Loss Functions"
//! - Moore (1968), "An n Job, One Machine Sequencing Algorithm"

pub mod dispatching;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod search;
pub mod validation;

pub use error::{DispatchError, DispatchResult};
