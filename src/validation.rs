//! Input validation for job lists.
//!
//! Checks structural integrity of jobs before dispatching. Detects:
//! - Duplicate IDs
//! - Negative processing times
//! - Non-positive weights
//! - Negative release times
//!
//! Dispatching never fails on bad input; this is a separate pass the
//! caller runs when the data comes from outside.

use crate::models::Job;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two jobs share the same ID.
    DuplicateId,
    /// A job has a processing time below zero.
    NegativeProcessingTime,
    /// A job has a weight of zero or less.
    NonPositiveWeight,
    /// A job is released before time zero.
    NegativeReleaseTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a job list.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Job]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for job in jobs {
        if !ids.insert(job.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate job ID: {}", job.id),
            ));
        }
        if job.processing_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeProcessingTime,
                format!(
                    "Job {} has negative processing time {}",
                    job.id, job.processing_time
                ),
            ));
        }
        if job.weight <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveWeight,
                format!("Job {} has non-positive weight {}", job.id, job.weight),
            ));
        }
        if job.release_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeReleaseTime,
                format!("Job {} is released at {}", job.id, job.release_time),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
