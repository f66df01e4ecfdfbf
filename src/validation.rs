//! Input validation for simulations.
//!
//! Checks the structural integrity of a workload and of policy parameters
//! before a run starts. Detects:
//! - Empty workloads
//! - Duplicate process ids
//! - Non-positive burst times and negative arrival times
//! - Degenerate MLFQ/Round Robin parameters
//!
//! Every check runs; the caller receives all problems at once.

use std::collections::HashSet;

use crate::models::Workload;
use crate::scheduler::{MlfqConfig, Policy};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The workload has no processes.
    EmptyWorkload,
    /// Two processes share the same pid.
    DuplicatePid,
    /// A process needs zero or negative CPU time.
    NonPositiveBurst,
    /// A process arrives before t=0.
    NegativeArrival,
    /// Last arrival plus total burst does not fit in the time type.
    HorizonOverflow,
    /// An MLFQ configuration has no queues.
    NoQueues,
    /// A quantum (MLFQ queue or Round Robin) is zero or negative.
    NonPositiveQuantum,
    /// The MLFQ boost interval is zero or negative.
    NonPositiveBoostInterval,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a workload.
///
/// Checks:
/// 1. At least one process
/// 2. No duplicate pids
/// 3. Every burst time is positive
/// 4. No arrival time is negative
/// 5. Last arrival + total burst is representable, so no simulated clock
///    can overflow
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(workload: &Workload) -> ValidationResult {
    let mut errors = Vec::new();

    if workload.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyWorkload,
            "Workload has no processes",
        ));
    }

    let mut pids = HashSet::new();
    for p in workload.processes() {
        if !pids.insert(p.pid) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicatePid,
                format!("Duplicate pid: {}", p.pid),
            ));
        }

        if p.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process {} has non-positive burst time {}", p.pid, p.burst_time),
            ));
        }

        if p.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process {} arrives at negative time {}", p.pid, p.arrival_time),
            ));
        }
    }

    if workload.horizon().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::HorizonOverflow,
            "Last arrival plus total burst time overflows the simulation clock",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates an MLFQ configuration.
///
/// Checks:
/// 1. At least one queue
/// 2. Every queue quantum is positive
/// 3. The boost interval, when enabled, is positive
pub fn validate_mlfq_config(config: &MlfqConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.quantums.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoQueues,
            "MLFQ configuration has no queues",
        ));
    }

    for (level, &quantum) in config.quantums.iter().enumerate() {
        if quantum <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!("MLFQ queue {level} has non-positive quantum {quantum}"),
            ));
        }
    }

    if let Some(interval) = config.boost_interval {
        if interval <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBoostInterval,
                format!("MLFQ boost interval {interval} is not positive"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the parameters carried by a policy.
pub fn validate_policy(policy: &Policy) -> ValidationResult {
    match policy {
        Policy::Fifo | Policy::Sjf | Policy::Stcf => Ok(()),
        Policy::RoundRobin { quantum } if *quantum <= 0 => Err(vec![ValidationError::new(
            ValidationErrorKind::NonPositiveQuantum,
            format!("Round Robin quantum {quantum} is not positive"),
        )]),
        Policy::RoundRobin { .. } => Ok(()),
        Policy::Mlfq(config) => validate_mlfq_config(config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn sample_workload() -> Workload {
        Workload::from_tuples(&[(1, 0, 5, 1), (2, 1, 3, 2), (3, 2, 8, 1)])
    }

    #[test]
    fn test_valid_workload() {
        assert!(validate_workload(&sample_workload()).is_ok());
    }

    #[test]
    fn test_empty_workload() {
        let errors = validate_workload(&Workload::default()).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyWorkload));
    }

    #[test]
    fn test_duplicate_pid() {
        let w = sample_workload().with_process(Process::new(2, 4));
        let errors = validate_workload(&w).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicatePid && e.message.contains('2')));
    }

    #[test]
    fn test_non_positive_burst() {
        let w = Workload::new(vec![Process::new(1, 0), Process::new(2, -3)]);
        let errors = validate_workload(&w).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveBurst)
                .count(),
            2
        );
    }

    #[test]
    fn test_negative_arrival() {
        let w = Workload::new(vec![Process::new(1, 4).with_arrival(-1)]);
        let errors = validate_workload(&w).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NegativeArrival));
    }

    #[test]
    fn test_horizon_overflow() {
        let half = i64::MAX / 2 + 1;
        let w = Workload::from_tuples(&[(1, 0, half, 0), (2, 0, half, 0)]);
        let errors = validate_workload(&w).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::HorizonOverflow);

        let late = Workload::from_tuples(&[(1, i64::MAX - 1, 2, 0)]);
        assert!(validate_workload(&late).is_err());

        let fits = Workload::from_tuples(&[(1, 0, i64::MAX / 2, 0), (2, 0, i64::MAX / 2, 0)]);
        assert!(validate_workload(&fits).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let w = Workload::new(vec![
            Process::new(1, 0).with_arrival(-2),
            Process::new(1, 3),
        ]);
        let errors = validate_workload(&w).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_mlfq_config_valid() {
        assert!(validate_mlfq_config(&MlfqConfig::default()).is_ok());
        assert!(validate_mlfq_config(&MlfqConfig::new(vec![1]).without_boost()).is_ok());
    }

    #[test]
    fn test_mlfq_config_no_queues() {
        let errors = validate_mlfq_config(&MlfqConfig::new(Vec::new())).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::NoQueues));
    }

    #[test]
    fn test_mlfq_config_bad_values() {
        let config = MlfqConfig::new(vec![2, 0, -1]).with_boost_interval(0);
        let errors = validate_mlfq_config(&config).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveQuantum)
                .count(),
            2
        );
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::NonPositiveBoostInterval));
    }

    #[test]
    fn test_round_robin_quantum() {
        assert!(validate_policy(&Policy::RoundRobin { quantum: 3 }).is_ok());
        let errors = validate_policy(&Policy::RoundRobin { quantum: 0 }).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NonPositiveQuantum);
        assert!(validate_policy(&Policy::Stcf).is_ok());
    }
}
