//! Scheduling domain models.
//!
//! | Type | Role |
//! |------|------|
//! | `Job` | Unit of work with processing, weight, release and due-date attributes |
//! | `Fragment` | A block of machine time: work on a job slice, or idle |
//! | `Machine` | One resource's ordered fragment timeline |
//! | `Schedule` | Fixed machine set plus a registry of placed jobs |

mod job;
mod machine;
mod schedule;

pub use job::{Fragment, Job, JobId};
pub use machine::Machine;
pub use schedule::Schedule;
