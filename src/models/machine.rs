//! Machine model.
//!
//! A machine is an ordered timeline of fragments starting at t=0. It grows
//! only through [`Machine::place`], which inserts forced idleness up to the
//! job's release time and coalesces back-to-back fragments of one job.
//!
//! # Invariants
//! - `makespan` equals the sum of all fragment durations.
//! - No two adjacent fragments belong to the same job.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Fragment, Job, JobId};

/// One machine's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// Machine index within its schedule.
    pub index: usize,
    fragments: Vec<Fragment>,
    makespan: i64,
}

impl Machine {
    /// Creates an empty machine.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            fragments: Vec::new(),
            makespan: 0,
        }
    }

    /// Builds a machine by placing `jobs` in order.
    pub fn from_jobs(index: usize, jobs: impl IntoIterator<Item = Job>) -> Self {
        let mut machine = Self::new(index);
        for job in jobs {
            machine.place(job);
        }
        machine
    }

    /// Time at which the last fragment finishes.
    #[inline]
    pub fn makespan(&self) -> i64 {
        self.makespan
    }

    /// Fragments in time order, idle time included.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }

    /// Places a job (or fragment) at the end of the timeline.
    ///
    /// # Algorithm
    /// 1. Idle until the job's release time if the machine is ahead of it.
    /// 2. Merge into the last fragment if it belongs to the same job,
    ///    otherwise append.
    /// 3. Advance the makespan and record the job's completion time.
    ///
    /// Returns the completion time of the placed fragment.
    pub fn place(&mut self, mut job: Job) -> i64 {
        self.idle(job.release_time - self.makespan);

        let duration = job.processing_time;
        let end = self.makespan + duration;

        let continues_last =
            matches!(self.fragments.last(), Some(Fragment::Work(last)) if last.id == job.id);

        if continues_last {
            if let Some(Fragment::Work(last)) = self.fragments.last_mut() {
                let mut merged = last.merge_slice(duration);
                merged.record_completion(end);
                *last = merged;
            }
        } else {
            job.record_completion(end);
            self.fragments.push(Fragment::Work(job));
        }

        self.makespan = end;
        end
    }

    /// Appends idle time. Non-positive durations are ignored.
    pub fn idle(&mut self, duration: i64) {
        if duration <= 0 {
            return;
        }
        match self.fragments.last_mut() {
            Some(Fragment::Idle { duration: last }) => *last += duration,
            _ => self.fragments.push(Fragment::Idle { duration }),
        }
        self.makespan += duration;
    }

    /// Work fragments in order, reset to unscheduled.
    ///
    /// Replaying these through [`Machine::place`] rebuilds the timeline.
    pub fn work(&self) -> Vec<Job> {
        self.fragments
            .iter()
            .filter_map(Fragment::job)
            .map(|job| Job {
                completion_time: None,
                ..job.clone()
            })
            .collect()
    }

    /// Job ids of the work fragments, in order.
    pub fn job_ids(&self) -> Vec<JobId> {
        self.fragments.iter().filter_map(Fragment::job_id).collect()
    }

    /// Total busy (non-idle) time.
    pub fn busy_time(&self) -> i64 {
        self.fragments
            .iter()
            .filter(|f| !f.is_idle())
            .map(Fragment::duration)
            .sum()
    }

    /// Latest state of every job on this machine, keyed by id.
    ///
    /// A job split into several fragments reports the completion time of
    /// its last fragment.
    pub fn jobs(&self) -> BTreeMap<JobId, Job> {
        let mut jobs: BTreeMap<JobId, Job> = BTreeMap::new();
        for job in self.fragments.iter().filter_map(Fragment::job) {
            jobs.entry(job.id)
                .and_modify(|known| {
                    if let Some(c) = job.completion_time {
                        known.record_completion(c);
                    }
                })
                .or_insert_with(|| job.clone());
        }
        jobs
    }

    /// Sum of tardiness over the jobs on this machine.
    pub fn total_tardiness(&self) -> i64 {
        self.jobs().values().map(Job::tardiness).sum()
    }

    /// Sum of weight × completion time over the jobs on this machine.
    pub fn total_weighted_completion(&self) -> i64 {
        self.jobs()
            .values()
            .map(|j| j.weight * j.completion_time.unwrap_or(0))
            .sum()
    }

    /// Returns a neighbour obtained by swapping two random work fragments.
    ///
    /// Indices are drawn with replacement, so the swap may be a no-op.
    /// The neighbour is rebuilt from scratch: idle gaps and merges are
    /// recomputed for the new order.
    pub fn random_neighbour<R: Rng>(&self, rng: &mut R) -> Self {
        let mut work = self.work();
        if !work.is_empty() {
            let i = rng.random_range(0..work.len());
            let j = rng.random_range(0..work.len());
            work.swap(i, j);
        }
        Self::from_jobs(self.index, work)
    }

    /// Returns a rebuild with the first fragments of jobs `a` and `b` swapped.
    ///
    /// If either id is absent the rebuild keeps the current order.
    pub fn swap_jobs(&self, a: JobId, b: JobId) -> Self {
        let mut work = self.work();
        let i = work.iter().position(|j| j.id == a);
        let k = work.iter().position(|j| j.id == b);
        if let (Some(i), Some(k)) = (i, k) {
            work.swap(i, k);
        }
        Self::from_jobs(self.index, work)
    }
}
