//! Simulation error taxonomy.
//!
//! Input problems are collected by [`validation`](crate::validation) and
//! surface as [`SimulationError::InvalidWorkload`] or
//! [`SimulationError::InvalidConfig`] before any state is built. Runtime
//! safety violations abort the run and carry the partial result.

use std::fmt;

use crate::models::Time;
use crate::scheduler::SimulationRun;
use crate::validation::ValidationError;

/// Errors returned by [`simulate`](crate::scheduler::simulate).
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The workload failed validation. Holds every detected problem.
    InvalidWorkload(Vec<ValidationError>),
    /// The policy parameters failed validation.
    InvalidConfig(Vec<ValidationError>),
    /// A preemptive policy reached its simulated-time bound with work left.
    NonTermination {
        /// Policy name.
        policy: String,
        /// Simulated-time bound that was reached.
        limit: Time,
        /// State reached when the run was aborted.
        partial: Box<SimulationRun>,
    },
    /// A bounded container would have grown past its configured capacity.
    CapacityExceeded {
        /// What overflowed (e.g. "timeline events", "processes").
        resource: &'static str,
        /// Configured capacity.
        capacity: usize,
    },
}

impl SimulationError {
    /// Validation errors carried by `InvalidWorkload`/`InvalidConfig`.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::InvalidWorkload(errors) | Self::InvalidConfig(errors) => errors,
            _ => &[],
        }
    }

    /// Partial run carried by `NonTermination`.
    pub fn partial_run(&self) -> Option<&SimulationRun> {
        match self {
            Self::NonTermination { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorkload(errors) => {
                write!(f, "invalid workload: {}", join_messages(errors))
            }
            Self::InvalidConfig(errors) => {
                write!(f, "invalid configuration: {}", join_messages(errors))
            }
            Self::NonTermination { policy, limit, partial } => write!(
                f,
                "{policy} did not terminate within {limit} time units ({} of {} processes completed)",
                partial.completed_count(),
                partial.processes.len()
            ),
            Self::CapacityExceeded { resource, capacity } => {
                write!(f, "capacity exceeded: more than {capacity} {resource}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
