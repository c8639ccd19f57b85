//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan (C_max) | Latest completion time |
//! | Total Tardiness | Sum of max(0, C_j - d_j) |
//! | Maximum Tardiness | Largest single delay |
//! | Total Lateness | Sum of C_j - d_j over jobs with a due date |
//! | Late Jobs | Number of jobs with C_j > d_j |
//! | On-Time Rate | Fraction of jobs that are not late |
//! | Weighted Completion | Sum of w_j * C_j |
//! | Avg Flow Time | Mean of C_j - r_j |
//! | Utilization | Busy time / makespan, per machine |
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 2.3: Objectives

use serde::{Deserialize, Serialize};

use crate::models::Schedule;

/// Schedule performance indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Makespan: latest completion time.
    pub makespan: i64,
    /// Sum of tardiness across all jobs.
    pub total_tardiness: i64,
    /// Maximum tardiness of any single job.
    pub max_tardiness: i64,
    /// Sum of signed lateness across jobs with a due date.
    pub total_lateness: i64,
    /// Number of late jobs.
    pub late_jobs: usize,
    /// Fraction of jobs completing on time (0.0..1.0).
    pub on_time_rate: f64,
    /// Sum of weight × completion time.
    pub total_weighted_completion: i64,
    /// Mean flow time: mean(completion - release).
    pub avg_flow_time: f64,
    /// Per-machine utilization, by machine index.
    pub utilization_by_machine: Vec<f64>,
    /// Average machine utilization (0.0..1.0).
    pub avg_utilization: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a completed schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let makespan = schedule.makespan();
        let job_count = schedule.job_count();

        let max_tardiness = schedule.jobs().map(|j| j.tardiness()).max().unwrap_or(0);
        let late_jobs = schedule.late_jobs().len();

        let total_flow_time: i64 = schedule
            .jobs()
            .filter_map(|j| j.completion_time.map(|c| c - j.release_time))
            .sum();

        let utilization_by_machine: Vec<f64> = schedule
            .machines()
            .iter()
            .map(|m| {
                if makespan <= 0 {
                    0.0
                } else {
                    m.busy_time() as f64 / makespan as f64
                }
            })
            .collect();

        let avg_utilization = if utilization_by_machine.is_empty() {
            0.0
        } else {
            utilization_by_machine.iter().sum::<f64>() / utilization_by_machine.len() as f64
        };

        let (on_time_rate, avg_flow_time) = if job_count == 0 {
            (1.0, 0.0)
        } else {
            (
                (job_count - late_jobs) as f64 / job_count as f64,
                total_flow_time as f64 / job_count as f64,
            )
        };

        Self {
            makespan,
            total_tardiness: schedule.total_tardiness(),
            max_tardiness,
            total_lateness: schedule.total_lateness(),
            late_jobs,
            on_time_rate,
            total_weighted_completion: schedule.total_weighted_completion(),
            avg_flow_time,
            utilization_by_machine,
            avg_utilization,
        }
    }

    /// Whether the schedule meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_tardiness: i64, min_utilization: f64) -> bool {
        self.max_tardiness <= max_tardiness && self.avg_utilization >= min_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    #[test]
    fn test_kpi_basic() {
        let mut s = Schedule::new(1);
        s.place(Job::new(1, 1).with_due_date(5), 0).unwrap();
        s.place(Job::new(2, 2).with_due_date(5), 0).unwrap();

        let kpi = ScheduleKpi::calculate(&s);
        assert_eq!(kpi.makespan, 3);
        assert_eq!(kpi.total_tardiness, 0);
        assert_eq!(kpi.max_tardiness, 0);
        assert_eq!(kpi.total_lateness, -6);
        assert!((kpi.on_time_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_flow_time - 2.0).abs() < 1e-10); // (1 + 3) / 2
    }

    #[test]
    fn test_kpi_tardiness() {
        let mut s = Schedule::new(1);
        s.place(Job::new(1, 4).with_due_date(2), 0).unwrap();
        s.place(Job::new(2, 1).with_due_date(20), 0).unwrap();

        let kpi = ScheduleKpi::calculate(&s);
        assert_eq!(kpi.total_tardiness, 2);
        assert_eq!(kpi.max_tardiness, 2);
        assert_eq!(kpi.late_jobs, 1);
        assert!((kpi.on_time_rate - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_utilization() {
        let mut s = Schedule::new(2);
        s.place(Job::new(1, 4), 0).unwrap();
        s.place(Job::new(2, 2), 1).unwrap();

        let kpi = ScheduleKpi::calculate(&s);
        assert!((kpi.utilization_by_machine[0] - 1.0).abs() < 1e-10);
        assert!((kpi.utilization_by_machine[1] - 0.5).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_flow_time_with_release() {
        let mut s = Schedule::new(1);
        s.place(Job::new(1, 2).with_release_time(3), 0).unwrap();
        let kpi = ScheduleKpi::calculate(&s);
        // completes at 5, released at 3
        assert!((kpi.avg_flow_time - 2.0).abs() < 1e-10);
        assert!((kpi.utilization_by_machine[0] - 0.4).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_weighted_completion() {
        let mut s = Schedule::new(1);
        s.place(Job::new(1, 2).with_weight(5), 0).unwrap();
        s.place(Job::new(2, 3).with_weight(2), 0).unwrap();
        let kpi = ScheduleKpi::calculate(&s);
        assert_eq!(kpi.total_weighted_completion, 5 * 2 + 2 * 5);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = ScheduleKpi::calculate(&Schedule::new(2));
        assert_eq!(kpi.makespan, 0);
        assert_eq!(kpi.total_tardiness, 0);
        assert!((kpi.on_time_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_utilization - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_meets_thresholds() {
        let mut s = Schedule::new(1);
        s.place(Job::new(1, 4).with_due_date(2), 0).unwrap();
        let kpi = ScheduleKpi::calculate(&s);
        assert!(kpi.meets_thresholds(2, 0.0));
        assert!(!kpi.meets_thresholds(1, 0.0));
        assert!(!kpi.meets_thresholds(5, 1.5));
    }
}
