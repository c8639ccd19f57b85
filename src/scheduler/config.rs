//! Scheduler configuration.

use serde::{Deserialize, Serialize};

/// How the dispatcher picks a machine for the next job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// Cycle through machine indices 0, 1, ..., m-1, 0, ... unconditionally.
    #[default]
    RoundRobin,
    /// Always the least-loaded machine (Graham's list scheduling).
    List,
}

/// Dispatcher configuration.
///
/// # Example
/// ```
/// use u_dispatch::scheduler::{SchedulerConfig, SelectionMode};
///
/// let config = SchedulerConfig::new(3).with_selection(SelectionMode::List);
/// assert_eq!(config.machines, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Number of identical machines.
    pub machines: usize,
    /// Machine selection policy for list dispatching.
    pub selection: SelectionMode,
}

impl SchedulerConfig {
    /// Creates a round-robin configuration with `machines` machines.
    pub fn new(machines: usize) -> Self {
        Self {
            machines,
            selection: SelectionMode::RoundRobin,
        }
    }

    /// Sets the machine selection policy.
    pub fn with_selection(mut self, selection: SelectionMode) -> Self {
        self.selection = selection;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
