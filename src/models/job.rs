//! Job and fragment model.
//!
//! A job is a unit of work with timing attributes. Preemptive rules split a
//! job into fragments: every fragment carries the identity and attributes of
//! the job it came from, with its own processing time.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2.1

use serde::{Deserialize, Serialize};

/// Job identifier. Shared by every fragment sliced from the same job.
pub type JobId = u32;

/// A job (or a fragment of one) to be scheduled.
///
/// # Time Representation
/// All times are integer units relative to the scheduling epoch (t=0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Job identifier.
    pub id: JobId,
    /// Processing time of this job or fragment.
    pub processing_time: i64,
    /// Importance weight (default: 1).
    pub weight: i64,
    /// Earliest start time (default: 0).
    pub release_time: i64,
    /// Due date. `None` = no deadline.
    pub due_date: Option<i64>,
    /// Latest known completion time. `None` = not yet scheduled.
    pub completion_time: Option<i64>,
}

impl Job {
    /// Creates a job released at t=0 with weight 1 and no due date.
    pub fn new(id: JobId, processing_time: i64) -> Self {
        Self {
            id,
            processing_time,
            weight: 1,
            release_time: 0,
            due_date: None,
            completion_time: None,
        }
    }

    /// Sets the weight.
    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the release time.
    pub fn with_release_time(mut self, release_time: i64) -> Self {
        self.release_time = release_time;
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due_date: i64) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns a fragment of this job with the given processing time.
    ///
    /// The fragment is unscheduled: its completion time starts over.
    pub fn get_slice(&self, processing_time: i64) -> Self {
        Self {
            processing_time,
            completion_time: None,
            ..self.clone()
        }
    }

    /// Returns this job extended by `processing_time` units.
    ///
    /// Used to coalesce two fragments that run back-to-back.
    pub fn merge_slice(&self, processing_time: i64) -> Self {
        Self {
            processing_time: self.processing_time + processing_time,
            ..self.clone()
        }
    }

    /// Records a completion time, keeping the latest one seen.
    pub fn record_completion(&mut self, time: i64) {
        self.completion_time = Some(self.completion_time.map_or(time, |c| c.max(time)));
    }

    /// Signed lateness (completion - due date).
    ///
    /// `None` if the job has no due date or has not been scheduled.
    pub fn lateness(&self) -> Option<i64> {
        Some(self.completion_time? - self.due_date?)
    }

    /// Tardiness: max(0, lateness). Zero for jobs without a due date.
    pub fn tardiness(&self) -> i64 {
        self.lateness().map_or(0, |l| l.max(0))
    }

    /// Whether the job finished after its due date.
    pub fn is_late(&self) -> bool {
        self.tardiness() > 0
    }
}

/// One contiguous block of machine time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Fragment {
    /// Productive time spent on (a slice of) a job.
    Work(Job),
    /// Unproductive machine time.
    Idle {
        /// Idle duration.
        duration: i64,
    },
}

impl Fragment {
    /// Duration of this fragment.
    pub fn duration(&self) -> i64 {
        match self {
            Fragment::Work(job) => job.processing_time,
            Fragment::Idle { duration } => *duration,
        }
    }

    /// The job behind a work fragment.
    pub fn job(&self) -> Option<&Job> {
        match self {
            Fragment::Work(job) => Some(job),
            Fragment::Idle { .. } => None,
        }
    }

    /// The job id behind a work fragment.
    pub fn job_id(&self) -> Option<JobId> {
        self.job().map(|j| j.id)
    }

    /// Whether this is idle time.
    pub fn is_idle(&self) -> bool {
        matches!(self, Fragment::Idle { .. })
    }
}
