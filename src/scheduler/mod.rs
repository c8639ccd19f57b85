//! Dispatcher and KPI evaluation.
//!
//! `Scheduler` turns a job list into a populated `Schedule` using one of
//! the list-dispatch rules or one of the preemptive rules. `ScheduleKpi`
//! summarizes the result.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-5
//! - Baker & Trietsch (2019), "Principles of Sequencing and Scheduling"

mod config;
mod dispatcher;
mod kpi;
mod sequencing;

pub use config::{SchedulerConfig, SelectionMode};
pub use dispatcher::Scheduler;
pub use kpi::ScheduleKpi;
pub use sequencing::{mcnaughton_bound, moore_hodgson_sequence};
