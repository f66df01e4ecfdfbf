//! Workload model.
//!
//! A workload is the ordered set of processes a simulation runs over. The
//! input order is significant: FIFO breaks arrival ties by it, and
//! [`SimulationRun`](crate::scheduler::SimulationRun) reports processes in it.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::{Pid, Process, ProcessState, Time};

/// An ordered, immutable set of process descriptors.
///
/// Construction does not validate; [`validate_workload`](crate::validation::validate_workload)
/// runs at the [`simulate`](crate::scheduler::simulate) boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    /// Creates a workload from processes in input order.
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    /// Creates a workload from `(pid, arrival, burst, priority)` tuples.
    pub fn from_tuples(tuples: &[(Pid, Time, Time, i32)]) -> Self {
        let processes = tuples
            .iter()
            .map(|&(pid, arrival, burst, priority)| {
                Process::new(pid, burst)
                    .with_arrival(arrival)
                    .with_priority(priority)
            })
            .collect();
        Self { processes }
    }

    /// Appends a process.
    pub fn with_process(mut self, process: Process) -> Self {
        self.processes.push(process);
        self
    }

    /// Processes in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Finds a process by pid.
    pub fn get(&self, pid: Pid) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid == pid)
    }

    /// Sum of all burst times, saturating at `Time::MAX`.
    pub fn total_burst(&self) -> Time {
        self.processes
            .iter()
            .fold(0, |acc: Time, p| acc.saturating_add(p.burst_time))
    }

    /// Last arrival plus total burst: no run of this workload can complete
    /// later. `None` if it does not fit in [`Time`].
    pub fn horizon(&self) -> Option<Time> {
        self.processes
            .iter()
            .try_fold(self.last_arrival(), |acc, p| acc.checked_add(p.burst_time))
    }

    /// Latest arrival time (0 for an empty workload).
    pub fn last_arrival(&self) -> Time {
        self.processes
            .iter()
            .map(|p| p.arrival_time)
            .max()
            .unwrap_or(0)
    }

    /// Fresh simulation state for every process, in input order.
    pub fn reset(&self) -> Vec<ProcessState> {
        self.processes.iter().map(ProcessState::fresh).collect()
    }
}

/// Indices of `states` ordered by arrival time, ties by ascending pid.
///
/// This is the admission order used by the preemptive policies.
pub(crate) fn admission_order(states: &[ProcessState]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..states.len()).collect();
    order.sort_by_key(|&i| (states[i].arrival_time(), states[i].pid()));
    order
}

/// Seeded generator of valid random workloads.
///
/// Pids are assigned `1..=count`; arrivals are drawn from
/// `0..=arrival_spread`, bursts from `burst_range`.
///
/// # Example
/// ```
/// use cpu_sched_sim::models::WorkloadGenerator;
///
/// let workload = WorkloadGenerator::new(8).with_burst_range(1, 10).generate(42);
/// assert_eq!(workload.len(), 8);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadGenerator {
    /// Number of processes.
    pub count: usize,
    /// Upper bound (inclusive) for arrival times.
    pub arrival_spread: Time,
    /// Inclusive burst time range.
    pub min_burst: Time,
    pub max_burst: Time,
    /// Inclusive priority range.
    pub min_priority: i32,
    pub max_priority: i32,
}

impl WorkloadGenerator {
    /// Creates a generator for `count` processes with default ranges
    /// (arrivals in `0..=20`, bursts in `1..=10`, priorities in `0..=4`).
    pub fn new(count: usize) -> Self {
        Self {
            count,
            arrival_spread: 20,
            min_burst: 1,
            max_burst: 10,
            min_priority: 0,
            max_priority: 4,
        }
    }

    /// Sets the arrival spread.
    pub fn with_arrival_spread(mut self, spread: Time) -> Self {
        self.arrival_spread = spread.max(0);
        self
    }

    /// Sets the burst range. Bounds are clamped to at least 1.
    pub fn with_burst_range(mut self, min: Time, max: Time) -> Self {
        self.min_burst = min.max(1);
        self.max_burst = max.max(self.min_burst);
        self
    }

    /// Sets the priority range.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.min_priority = min;
        self.max_priority = max.max(min);
        self
    }

    /// Generates a workload. The same seed always yields the same workload.
    pub fn generate(&self, seed: u64) -> Workload {
        let mut rng = SmallRng::seed_from_u64(seed);
        let processes = (1..=self.count as Pid)
            .map(|pid| {
                let arrival = rng.random_range(0..=self.arrival_spread.max(0));
                let burst = rng.random_range(self.min_burst.max(1)..=self.max_burst.max(1));
                let priority = rng.random_range(self.min_priority..=self.max_priority);
                Process::new(pid, burst)
                    .with_arrival(arrival)
                    .with_priority(priority)
            })
            .collect();
        Workload::new(processes)
    }
}
