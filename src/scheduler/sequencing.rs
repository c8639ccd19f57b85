//! Sequencing helpers that do not place anything.
//!
//! # References
//! - McNaughton (1959), "Scheduling with Deadlines and Loss Functions"
//! - Moore (1968), "An n Job, One Machine Sequencing Algorithm for
//!   Minimizing the Number of Late Jobs"

use std::collections::BinaryHeap;

use crate::models::Job;

/// Optimal preemptive makespan on `machines` identical machines:
/// `max(max p_j, ceil(sum p_j / m))`.
///
/// Zero machines is treated as one.
pub fn mcnaughton_bound(jobs: &[Job], machines: usize) -> i64 {
    let m = machines.max(1) as i64;
    let longest = jobs.iter().map(|j| j.processing_time).max().unwrap_or(0);
    let total: i64 = jobs.iter().map(|j| j.processing_time).sum();
    longest.max((total + m - 1) / m)
}

/// Moore-Hodgson order: on-time jobs in due-date order, then late jobs by id.
///
/// # Algorithm
/// 1. Sort by due date (ties by id; jobs without a due date last).
/// 2. Add jobs one at a time to the on-time set, tracking total processing.
/// 3. Whenever the total exceeds the current job's due date, evict the
///    longest on-time job into the late set.
///
/// Minimizes the number of late jobs on a single machine. Among equally
/// long candidates the one later in due-date order is evicted.
pub fn moore_hodgson_sequence(jobs: &[Job]) -> Vec<Job> {
    let mut by_due = jobs.to_vec();
    by_due.sort_by_key(|j| (j.due_date.unwrap_or(i64::MAX), j.id));

    let mut on_time = vec![true; by_due.len()];
    let mut longest: BinaryHeap<(i64, usize)> = BinaryHeap::new();
    let mut total = 0;

    for (pos, job) in by_due.iter().enumerate() {
        longest.push((job.processing_time, pos));
        total += job.processing_time;

        if job.due_date.is_some_and(|due| total > due) {
            if let Some((p, evicted)) = longest.pop() {
                total -= p;
                on_time[evicted] = false;
            }
        }
    }

    let mut late: Vec<Job> = Vec::new();
    let mut order: Vec<Job> = Vec::with_capacity(by_due.len());
    for (job, kept) in by_due.into_iter().zip(on_time) {
        if kept {
            order.push(job);
        } else {
            late.push(job);
        }
    }
    late.sort_by_key(|j| j.id);
    order.extend(late);
    order
}
