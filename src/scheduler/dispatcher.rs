//! Identical parallel machine dispatcher.
//!
//! # Rules
//!
//! | Entry point | Kind |
//! |-------------|------|
//! | `shortest_processing_time` | list dispatch, SPT order |
//! | `weighted_shortest_processing_time` | list dispatch, WSPT order |
//! | `longest_processing_time` | list dispatch, LPT order |
//! | `earliest_due_date` | list dispatch, EDD order |
//! | `moore_hodgson` | list dispatch, Moore-Hodgson order |
//! | `shortest_remaining_processing_time` | unit-time preemptive simulation |
//! | `wrap_around_rule` | McNaughton preemptive wrap-around |
//!
//! List dispatch pops jobs from the head of the ordered list and places each
//! on the machine chosen by the configured [`SelectionMode`].
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 5: Parallel Machine Models

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::config::{SchedulerConfig, SelectionMode};
use super::sequencing::{mcnaughton_bound, moore_hodgson_sequence};
use crate::dispatching::{rules, RuleEngine};
use crate::models::{Job, Schedule};

/// Dispatcher for identical parallel machines.
///
/// Every entry point builds a fresh [`Schedule`], so runs never share
/// mutable state.
///
/// # Example
///
/// ```
/// use u_dispatch::models::Job;
/// use u_dispatch::scheduler::{Scheduler, SchedulerConfig, SelectionMode};
///
/// let jobs = vec![Job::new(1, 4), Job::new(2, 3), Job::new(3, 3)];
/// let scheduler = Scheduler::new(SchedulerConfig::new(2).with_selection(SelectionMode::List));
/// let schedule = scheduler.longest_processing_time(&jobs);
/// assert_eq!(schedule.makespan(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

/// State of one list-dispatch run.
struct Dispatch {
    selection: SelectionMode,
    schedule: Schedule,
    cursor: usize,
}

impl Dispatch {
    fn new(config: &SchedulerConfig) -> Self {
        Self {
            selection: config.selection,
            schedule: Schedule::new(config.machines),
            cursor: 0,
        }
    }

    fn next_machine(&mut self) -> Option<usize> {
        let machines = self.schedule.machine_count();
        if machines == 0 {
            return None;
        }
        match self.selection {
            SelectionMode::RoundRobin => {
                let machine = self.cursor;
                self.cursor = (self.cursor + 1) % machines;
                Some(machine)
            }
            SelectionMode::List => self.schedule.first_available_machine(),
        }
    }

    fn run(mut self, order: impl IntoIterator<Item = Job>) -> Schedule {
        for job in order {
            match self.next_machine() {
                Some(machine) => {
                    self.schedule.assign(job, machine);
                }
                None => break,
            }
        }
        self.schedule
    }
}

impl Scheduler {
    /// Creates a dispatcher.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Creates a round-robin dispatcher for `machines` machines.
    pub fn with_machines(machines: usize) -> Self {
        Self::new(SchedulerConfig::new(machines))
    }

    /// The active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Dispatches jobs in exactly the given order.
    pub fn schedule_jobs(&self, order: impl IntoIterator<Item = Job>) -> Schedule {
        Dispatch::new(&self.config).run(order)
    }

    /// Dispatches jobs in the order produced by a rule engine.
    pub fn dispatch(&self, jobs: &[Job], engine: &RuleEngine) -> Schedule {
        let schedule = self.schedule_jobs(engine.sort(jobs));
        debug!(
            rules = ?engine.rule_names(),
            machines = self.config.machines,
            jobs = jobs.len(),
            makespan = schedule.makespan(),
            "dispatch complete"
        );
        schedule
    }

    /// SPT: ascending processing time, ties by id.
    pub fn shortest_processing_time(&self, jobs: &[Job]) -> Schedule {
        self.dispatch(jobs, &RuleEngine::single(rules::Spt))
    }

    /// WSPT: ascending processing time / weight, ties by id.
    pub fn weighted_shortest_processing_time(&self, jobs: &[Job]) -> Schedule {
        self.dispatch(jobs, &RuleEngine::single(rules::Wspt))
    }

    /// LPT: descending processing time, ties by id.
    pub fn longest_processing_time(&self, jobs: &[Job]) -> Schedule {
        self.dispatch(jobs, &RuleEngine::single(rules::Lpt))
    }

    /// EDD: ascending due date, ties by id.
    pub fn earliest_due_date(&self, jobs: &[Job]) -> Schedule {
        self.dispatch(jobs, &RuleEngine::single(rules::Edd))
    }

    /// Moore-Hodgson: on-time jobs in due-date order, then late jobs by id.
    pub fn moore_hodgson(&self, jobs: &[Job]) -> Schedule {
        let schedule = self.schedule_jobs(moore_hodgson_sequence(jobs));
        debug!(
            machines = self.config.machines,
            jobs = jobs.len(),
            late = schedule.late_jobs().len(),
            "moore-hodgson complete"
        );
        schedule
    }

    /// Shortest Remaining Processing Time with release dates.
    ///
    /// # Algorithm
    /// Unit-time simulation. At each tick t:
    /// 1. Admit jobs released by t into the pending pool.
    /// 2. Sort the pool by remaining processing time (ties by id).
    /// 3. Machine i runs one unit of the i-th pool job, or idles one unit
    ///    if the pool has fewer than i+1 jobs.
    /// 4. Drop finished jobs and advance t.
    ///
    /// Every machine advances exactly one unit per tick. Zero-length jobs
    /// complete at their admission tick on machine 0; if nothing else is
    /// left to run, the simulation stops there without idling.
    pub fn shortest_remaining_processing_time(&self, jobs: &[Job]) -> Schedule {
        let machines = self.config.machines;
        let mut schedule = Schedule::new(machines);
        if machines == 0 {
            return schedule;
        }

        let mut arrivals: Vec<Job> = jobs.to_vec();
        arrivals.sort_by_key(|j| (j.release_time, j.id));
        let mut arrivals: VecDeque<Job> = arrivals.into();
        let mut pool: Vec<Job> = Vec::new();
        let mut t: i64 = 0;

        while !arrivals.is_empty() || !pool.is_empty() {
            while arrivals.front().is_some_and(|j| j.release_time <= t) {
                if let Some(job) = arrivals.pop_front() {
                    if job.processing_time <= 0 {
                        schedule.assign(job, 0);
                    } else {
                        pool.push(job);
                    }
                }
            }

            if pool.is_empty() && arrivals.is_empty() {
                break;
            }

            pool.sort_by_key(|j| (j.processing_time, j.id));

            for machine in 0..machines {
                match pool.get_mut(machine) {
                    Some(job) => {
                        schedule.assign(job.get_slice(1), machine);
                        job.processing_time -= 1;
                    }
                    None => schedule.rest(machine, 1),
                }
            }

            pool.retain(|j| j.processing_time > 0);
            trace!(t, pending = pool.len(), "srpt tick");
            t += 1;
        }

        debug!(
            machines,
            jobs = jobs.len(),
            makespan = schedule.makespan(),
            "srpt complete"
        );
        schedule
    }

    /// McNaughton's wrap-around rule.
    ///
    /// Fills machines in order up to the optimal preemptive makespan
    /// `max(max p_j, ceil(sum p_j / m))`, wrapping the job that crosses the
    /// bound onto the next machine. Release times are not considered.
    pub fn wrap_around_rule(&self, jobs: &[Job]) -> Schedule {
        let machines = self.config.machines;
        let mut schedule = Schedule::new(machines);
        if machines == 0 || jobs.is_empty() {
            return schedule;
        }

        let bound = mcnaughton_bound(jobs, machines);
        let leftover = schedule.schedule_preemptively(jobs.iter().cloned(), bound);
        debug!(
            machines,
            jobs = jobs.len(),
            bound,
            leftover = leftover.len(),
            "wrap-around complete"
        );
        schedule
    }
}
