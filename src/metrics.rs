//! Scheduling performance metrics.
//!
//! Computes the standard CPU scheduling indicators from the final process
//! state of a run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Turnaround | Mean of completion - arrival |
//! | Avg Waiting | Mean of turnaround - burst |
//! | Avg Response | Mean of first dispatch - arrival |
//! | CPU Utilization | Completed burst / total time, in percent |
//! | Throughput | Completed processes per time unit |
//! | Fairness | Jain's index over turnaround times |
//!
//! Only completed processes contribute. Every metric is 0 for an empty run,
//! a zero total time, or a run in which nothing completed.
//!
//! # Reference
//! Jain, Chiu & Hawe (1984), "A Quantitative Measure of Fairness and
//! Discrimination for Resource Allocation in Shared Computer Systems"

use serde::{Deserialize, Serialize};

use crate::models::{Pid, ProcessState, Time};

/// Aggregate performance indicators of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// CPU utilization in percent (0..=100).
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    /// Jain's fairness index over turnaround times (0..=1).
    pub fairness_index: f64,
}

impl Metrics {
    /// Computes metrics from final process state and the run's total time.
    pub fn calculate(processes: &[ProcessState], total_time: Time) -> Self {
        if processes.is_empty() || total_time <= 0 {
            return Self::default();
        }

        let mut completed: usize = 0;
        let mut total_turnaround: f64 = 0.0;
        let mut total_waiting: f64 = 0.0;
        let mut total_response: f64 = 0.0;
        let mut sum_sq_turnaround: f64 = 0.0;
        let mut completed_burst: Time = 0;

        for p in processes {
            let (Some(turnaround), Some(waiting), Some(response)) =
                (p.turnaround_time(), p.waiting_time(), p.response_time())
            else {
                continue;
            };
            completed += 1;
            total_turnaround += turnaround as f64;
            total_waiting += waiting as f64;
            total_response += response as f64;
            sum_sq_turnaround += (turnaround as f64).powi(2);
            completed_burst += p.burst_time();
        }

        if completed == 0 {
            return Self::default();
        }

        let n = completed as f64;
        let fairness_index = if sum_sq_turnaround == 0.0 {
            0.0
        } else {
            total_turnaround.powi(2) / (n * sum_sq_turnaround)
        };

        Self {
            avg_turnaround_time: total_turnaround / n,
            avg_waiting_time: total_waiting / n,
            avg_response_time: total_response / n,
            cpu_utilization: completed_burst as f64 / total_time as f64 * 100.0,
            throughput: n / total_time as f64,
            fairness_index,
        }
    }

    /// Whether the run meets the given quality thresholds.
    pub fn meets_thresholds(&self, max_avg_turnaround: f64, min_utilization: f64) -> bool {
        self.avg_turnaround_time <= max_avg_turnaround && self.cpu_utilization >= min_utilization
    }
}

/// One row of a per-process result table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub pid: Pid,
    pub arrival_time: Time,
    pub burst_time: Time,
    pub priority: i32,
    pub start_time: Option<Time>,
    pub completion_time: Option<Time>,
    pub turnaround_time: Option<Time>,
    pub waiting_time: Option<Time>,
    pub response_time: Option<Time>,
}

impl From<&ProcessState> for ProcessOutcome {
    fn from(state: &ProcessState) -> Self {
        Self {
            pid: state.pid(),
            arrival_time: state.arrival_time(),
            burst_time: state.burst_time(),
            priority: state.process.priority,
            start_time: state.start_time,
            completion_time: state.completion_time,
            turnaround_time: state.turnaround_time(),
            waiting_time: state.waiting_time(),
            response_time: state.response_time(),
        }
    }
}
