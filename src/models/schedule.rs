//! Schedule (solution) model.
//!
//! A schedule owns a fixed set of identical machines and a registry of every
//! job placed on them. The registry holds each job's consolidated state:
//! total processing time across its fragments and the completion time of
//! its last fragment. Global metrics are computed from the registry.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5

use std::collections::{BTreeMap, VecDeque};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::{Fragment, Job, JobId, Machine};
use crate::error::{DispatchError, DispatchResult};

/// A schedule over identical parallel machines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    machines: Vec<Machine>,
    registry: BTreeMap<JobId, Job>,
}

impl Schedule {
    /// Creates a schedule with `machine_count` empty machines.
    pub fn new(machine_count: usize) -> Self {
        Self {
            machines: (0..machine_count).map(Machine::new).collect(),
            registry: BTreeMap::new(),
        }
    }

    /// Number of machines.
    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// All machines in index order.
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    /// Machine by index.
    pub fn machine(&self, index: usize) -> Option<&Machine> {
        self.machines.get(index)
    }

    /// Places a job on the given machine.
    ///
    /// This is the only way a schedule is mutated. Returns the completion
    /// time of the placed fragment.
    pub fn place(&mut self, job: Job, machine_index: usize) -> DispatchResult<i64> {
        if machine_index >= self.machines.len() {
            return Err(DispatchError::MachineOutOfRange {
                index: machine_index,
                machines: self.machines.len(),
            });
        }
        Ok(self.assign(job, machine_index))
    }

    /// Places a job on a machine known to exist.
    pub(crate) fn assign(&mut self, job: Job, machine_index: usize) -> i64 {
        let end = self.machines[machine_index].place(job.clone());
        trace!(job = job.id, machine = machine_index, end, "placed");

        self.registry
            .entry(job.id)
            .and_modify(|known| {
                known.processing_time += job.processing_time;
                known.record_completion(end);
            })
            .or_insert_with(|| {
                let mut first = job;
                first.record_completion(end);
                first
            });
        end
    }

    /// Appends idle time on the given machine.
    pub fn idle(&mut self, duration: i64, machine_index: usize) -> DispatchResult<()> {
        let machines = self.machines.len();
        let machine = self
            .machines
            .get_mut(machine_index)
            .ok_or(DispatchError::MachineOutOfRange {
                index: machine_index,
                machines,
            })?;
        machine.idle(duration);
        Ok(())
    }

    /// Appends idle time on a machine known to exist.
    pub(crate) fn rest(&mut self, machine_index: usize, duration: i64) {
        self.machines[machine_index].idle(duration);
    }

    /// Makespan (C_max): latest finish time across machines.
    pub fn makespan(&self) -> i64 {
        self.machines.iter().map(Machine::makespan).max().unwrap_or(0)
    }

    /// Index of the least-loaded machine (lowest index on ties).
    ///
    /// Returns `None` if the schedule has no machines.
    pub fn first_available_machine(&self) -> Option<usize> {
        self.machines
            .iter()
            .min_by_key(|m| m.makespan())
            .map(|m| m.index)
    }

    /// Consolidated state of a placed job.
    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.registry.get(&id)
    }

    /// Consolidated state of every placed job, ordered by id.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> {
        self.registry.values()
    }

    /// Number of distinct jobs placed.
    pub fn job_count(&self) -> usize {
        self.registry.len()
    }

    /// Completion time of a job's last fragment.
    pub fn completion_time(&self, id: JobId) -> Option<i64> {
        self.registry.get(&id).and_then(|j| j.completion_time)
    }

    /// Sum of tardiness over all placed jobs.
    pub fn total_tardiness(&self) -> i64 {
        self.registry.values().map(Job::tardiness).sum()
    }

    /// Sum of signed lateness over placed jobs that have a due date.
    pub fn total_lateness(&self) -> i64 {
        self.registry.values().filter_map(Job::lateness).sum()
    }

    /// Sum of weight × completion time over all placed jobs.
    pub fn total_weighted_completion(&self) -> i64 {
        self.registry
            .values()
            .map(|j| j.weight * j.completion_time.unwrap_or(0))
            .sum()
    }

    /// Ids of jobs finishing after their due date.
    pub fn late_jobs(&self) -> Vec<JobId> {
        self.registry
            .values()
            .filter(|j| j.is_late())
            .map(|j| j.id)
            .collect()
    }

    /// Per-machine fragment sequences, for reporting and rendering.
    pub fn fragments_by_machine(&self) -> Vec<&[Fragment]> {
        self.machines.iter().map(Machine::fragments).collect()
    }

    /// Job ids of all work fragments, machine by machine.
    pub fn job_ids(&self) -> Vec<JobId> {
        self.machines.iter().flat_map(Machine::job_ids).collect()
    }

    /// Preemptively fills machines in index order up to `max_makespan`.
    ///
    /// Each machine takes jobs from the head of the queue. A job that does
    /// not fit in the remaining capacity is sliced: the part that fits is
    /// placed and the remainder goes back to the head of the queue for the
    /// next machine. Jobs left over once machines run out are returned.
    pub fn schedule_preemptively(
        &mut self,
        jobs: impl IntoIterator<Item = Job>,
        max_makespan: i64,
    ) -> Vec<Job> {
        let mut pending: VecDeque<Job> = jobs.into_iter().collect();

        for index in 0..self.machines.len() {
            while let Some(job) = pending.pop_front() {
                let remaining = max_makespan - self.machines[index].makespan();
                if remaining <= 0 && job.processing_time > 0 {
                    pending.push_front(job);
                    break;
                }

                if job.processing_time <= remaining.max(0) {
                    self.assign(job, index);
                } else {
                    let rest = job.get_slice(job.processing_time - remaining);
                    self.assign(job.get_slice(remaining), index);
                    pending.push_front(rest);
                }
            }
        }

        pending.into()
    }

    /// Whether any job is split into more than one work fragment.
    pub fn is_preemptive(&self) -> bool {
        self.machines
            .iter()
            .map(|m| m.job_ids().len())
            .sum::<usize>()
            != self.registry.len()
    }

    /// Rebuilds a schedule by replaying per-machine job orders.
    fn replay(&self, orders: Vec<Vec<Job>>) -> Self {
        let mut schedule = Self::new(self.machines.len());
        for (index, order) in orders.into_iter().enumerate() {
            for job in order {
                schedule.assign(job, index);
            }
        }
        schedule
    }

    /// Returns a neighbour obtained by swapping two random jobs on one
    /// randomly chosen machine.
    ///
    /// Replaying reordered fragments of a split job could run two of them
    /// at overlapping times on different machines, so a preemptive schedule
    /// (see [`Schedule::is_preemptive`]) is returned unchanged.
    pub fn random_neighbour<R: Rng>(&self, rng: &mut R) -> Self {
        if self.is_preemptive() {
            return self.clone();
        }
        let mut orders: Vec<Vec<Job>> = self.machines.iter().map(Machine::work).collect();
        if !orders.is_empty() {
            let order = &mut orders[rng.random_range(0..self.machines.len())];
            if !order.is_empty() {
                let i = rng.random_range(0..order.len());
                let j = rng.random_range(0..order.len());
                order.swap(i, j);
            }
        }
        self.replay(orders)
    }

    /// Returns a rebuild with the first fragments of jobs `a` and `b`
    /// swapped, possibly across machines.
    ///
    /// If either id is absent, or the schedule is preemptive, the current
    /// order is kept.
    pub fn swap_jobs(&self, a: JobId, b: JobId) -> Self {
        if self.is_preemptive() {
            return self.clone();
        }
        let mut orders: Vec<Vec<Job>> = self.machines.iter().map(Machine::work).collect();
        let locate = |orders: &[Vec<Job>], id: JobId| {
            orders.iter().enumerate().find_map(|(m, order)| {
                order.iter().position(|j| j.id == id).map(|p| (m, p))
            })
        };

        if let (Some((ma, pa)), Some((mb, pb))) = (locate(&orders, a), locate(&orders, b)) {
            if ma == mb {
                orders[ma].swap(pa, pb);
            } else {
                let job_a = orders[ma][pa].clone();
                let job_b = std::mem::replace(&mut orders[mb][pb], job_a);
                orders[ma][pa] = job_b;
            }
        }
        self.replay(orders)
    }
}
