//! Scheduling policies and the simulation entry point.
//!
//! Five single-CPU disciplines share one entry point, [`simulate`], and are
//! selected through the [`Policy`] enum:
//!
//! | Policy | Preemptive | Selection |
//! |--------|-----------|-----------|
//! | FIFO | no | arrival order |
//! | SJF | no | shortest burst among arrived |
//! | STCF | yes | shortest remaining time among arrived |
//! | Round Robin | yes | FIFO ready queue, fixed quantum |
//! | MLFQ | yes | highest non-empty queue, per-level quantum, periodic boost |
//!
//! Every run validates its input, builds fresh per-process state from the
//! workload and owns it exclusively, so runs never interfere.
//!
//! # References
//!
//! - Arpaci-Dusseau & Arpaci-Dusseau (2018), "Operating Systems: Three Easy
//!   Pieces", Ch. 7-8
//! - Corbató et al. (1962), "An Experimental Time-Sharing System" (MLFQ)

mod fifo;
mod mlfq;
pub mod observer;
mod round_robin;
mod simulation;
mod sjf;
mod stcf;

pub use observer::{EventLog, NoopObserver, SimulationEvent, SimulationObserver};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::SimulationError;
use crate::metrics::{Metrics, ProcessOutcome};
use crate::models::{Pid, ProcessState, Timeline, Time, Workload};
use crate::validation::{validate_policy, validate_workload};
use simulation::Simulation;

/// Slack added to the derived simulated-time bound of preemptive policies.
pub const DEFAULT_HORIZON_SLACK: Time = 100;

/// Multi-Level Feedback Queue configuration.
///
/// Queue 0 is the highest priority. Processes that exhaust the quantum of
/// their level move one level down; the lowest level keeps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MlfqConfig {
    /// Quantum per queue level (index 0 = highest priority).
    pub quantums: Vec<Time>,
    /// Interval between priority boosts. `None` disables boosting.
    pub boost_interval: Option<Time>,
}

impl MlfqConfig {
    /// Creates a configuration with the given quantums and no boosting.
    pub fn new(quantums: Vec<Time>) -> Self {
        Self {
            quantums,
            boost_interval: None,
        }
    }

    /// Enables priority boosting every `interval` time units.
    pub fn with_boost_interval(mut self, interval: Time) -> Self {
        self.boost_interval = Some(interval);
        self
    }

    /// Disables priority boosting.
    pub fn without_boost(mut self) -> Self {
        self.boost_interval = None;
        self
    }

    /// Number of queue levels.
    pub fn num_queues(&self) -> usize {
        self.quantums.len()
    }

    /// Index of the lowest-priority queue.
    pub fn lowest_queue(&self) -> usize {
        self.quantums.len().saturating_sub(1)
    }

    /// Quantum of `level`, clamped to the lowest queue.
    pub fn quantum(&self, level: usize) -> Time {
        self.quantums
            .get(level.min(self.lowest_queue()))
            .copied()
            .unwrap_or(1)
    }
}

impl Default for MlfqConfig {
    /// Three queues with quantums 2, 4 and 8, boosted every 10 time units.
    fn default() -> Self {
        Self::new(vec![2, 4, 8]).with_boost_interval(10)
    }
}

/// A scheduling discipline together with its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Policy {
    /// First-Come-First-Served (non-preemptive).
    Fifo,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Shortest Time-to-Completion First (preemptive SJF).
    Stcf,
    /// Round Robin with a fixed quantum.
    RoundRobin { quantum: Time },
    /// Multi-Level Feedback Queue.
    Mlfq(MlfqConfig),
}

impl Policy {
    /// Short policy kind, without parameters.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fifo => "FIFO",
            Self::Sjf => "SJF",
            Self::Stcf => "STCF",
            Self::RoundRobin { .. } => "RR",
            Self::Mlfq(_) => "MLFQ",
        }
    }

    /// Display name, e.g. `RR (q=3)`.
    pub fn name(&self) -> String {
        match self {
            Self::RoundRobin { quantum } => format!("RR (q={quantum})"),
            other => other.kind().to_string(),
        }
    }

    /// Whether the policy may interrupt a running process.
    pub fn is_preemptive(&self) -> bool {
        !matches!(self, Self::Fifo | Self::Sjf)
    }

    /// All five policies in comparison order: FIFO, SJF, STCF, RR, MLFQ.
    pub fn standard_set(quantum: Time, mlfq: MlfqConfig) -> Vec<Policy> {
        vec![
            Self::Fifo,
            Self::Sjf,
            Self::Stcf,
            Self::RoundRobin { quantum },
            Self::Mlfq(mlfq),
        ]
    }
}

/// Resource limits applied to a run.
///
/// All limits are disabled by default except the derived time bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationLimits {
    /// Maximum number of processes in a workload.
    pub max_processes: Option<usize>,
    /// Maximum number of timeline events (end marker included).
    pub max_timeline_events: Option<usize>,
    /// Maximum number of MLFQ queue levels.
    pub max_queues: Option<usize>,
    /// Explicit simulated-time bound for preemptive policies. When `None`,
    /// the bound is `last arrival + total burst + horizon_slack`.
    pub max_time: Option<Time>,
    /// Slack added to the derived time bound.
    pub horizon_slack: Time,
}

impl Default for SimulationLimits {
    fn default() -> Self {
        Self {
            max_processes: None,
            max_timeline_events: None,
            max_queues: None,
            max_time: None,
            horizon_slack: DEFAULT_HORIZON_SLACK,
        }
    }
}

impl SimulationLimits {
    /// Unbounded containers, derived time bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixed-capacity preset: 100 processes, 1000 timeline events, 5 queues.
    pub fn bounded() -> Self {
        Self::default()
            .with_max_processes(100)
            .with_max_timeline_events(1000)
            .with_max_queues(5)
    }

    pub fn with_max_processes(mut self, max: usize) -> Self {
        self.max_processes = Some(max);
        self
    }

    pub fn with_max_timeline_events(mut self, max: usize) -> Self {
        self.max_timeline_events = Some(max);
        self
    }

    pub fn with_max_queues(mut self, max: usize) -> Self {
        self.max_queues = Some(max);
        self
    }

    /// Overrides the derived simulated-time bound.
    pub fn with_max_time(mut self, max_time: Time) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Simulated-time bound for `workload`, saturating at `Time::MAX`.
    pub fn time_bound(&self, workload: &Workload) -> Time {
        self.max_time.unwrap_or_else(|| {
            workload
                .last_arrival()
                .saturating_add(workload.total_burst())
                .saturating_add(self.horizon_slack)
        })
    }

    fn check_capacity(&self, workload: &Workload, policy: &Policy) -> Result<(), SimulationError> {
        if let Some(capacity) = self.max_processes {
            if workload.len() > capacity {
                warn!(processes = workload.len(), capacity, "workload exceeds process capacity");
                return Err(SimulationError::CapacityExceeded {
                    resource: "processes",
                    capacity,
                });
            }
        }
        if let (Some(capacity), Policy::Mlfq(config)) = (self.max_queues, policy) {
            if config.num_queues() > capacity {
                warn!(queues = config.num_queues(), capacity, "MLFQ config exceeds queue capacity");
                return Err(SimulationError::CapacityExceeded {
                    resource: "MLFQ queues",
                    capacity,
                });
            }
        }
        Ok(())
    }
}

/// Result of one simulation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRun {
    /// The policy that produced this run.
    pub policy: Policy,
    /// Final process state, in workload order.
    pub processes: Vec<ProcessState>,
    /// Execution timeline.
    pub timeline: Timeline,
}

impl SimulationRun {
    /// Makespan: latest completion time. Falls back to the timeline end when
    /// nothing completed.
    pub fn total_time(&self) -> Time {
        self.processes
            .iter()
            .filter_map(|p| p.completion_time)
            .max()
            .unwrap_or_else(|| self.timeline.end_time())
    }

    /// Aggregate metrics over this run.
    pub fn metrics(&self) -> Metrics {
        Metrics::calculate(&self.processes, self.total_time())
    }

    /// Per-process result rows, in workload order.
    pub fn outcomes(&self) -> Vec<ProcessOutcome> {
        self.processes.iter().map(ProcessOutcome::from).collect()
    }

    /// Final state of `pid`.
    pub fn process(&self, pid: Pid) -> Option<&ProcessState> {
        self.processes.iter().find(|p| p.pid() == pid)
    }

    /// Number of completed processes.
    pub fn completed_count(&self) -> usize {
        self.processes.iter().filter(|p| p.is_completed()).count()
    }

    /// Whether every process completed.
    pub fn is_complete(&self) -> bool {
        self.processes.iter().all(ProcessState::is_completed)
    }
}

/// Runs `policy` over `workload` with default limits and no observer.
///
/// # Example
///
/// ```
/// use cpu_sched_sim::models::Workload;
/// use cpu_sched_sim::scheduler::{simulate, Policy};
///
/// let workload = Workload::from_tuples(&[(1, 0, 5, 1), (2, 1, 3, 2), (3, 2, 8, 1)]);
/// let run = simulate(&Policy::RoundRobin { quantum: 3 }, &workload).unwrap();
/// assert_eq!(run.process(1).and_then(|p| p.completion_time), Some(11));
/// assert_eq!(run.total_time(), 16);
/// ```
pub fn simulate(policy: &Policy, workload: &Workload) -> Result<SimulationRun, SimulationError> {
    simulate_with(policy, workload, &SimulationLimits::default(), &mut NoopObserver)
}

/// Runs `policy` over `workload` under `limits`, reporting every event to
/// `observer`.
///
/// Input is validated before any state is built; the caller's workload is
/// never mutated.
pub fn simulate_with(
    policy: &Policy,
    workload: &Workload,
    limits: &SimulationLimits,
    observer: &mut dyn SimulationObserver,
) -> Result<SimulationRun, SimulationError> {
    validate_workload(workload).map_err(SimulationError::InvalidWorkload)?;
    validate_policy(policy).map_err(SimulationError::InvalidConfig)?;
    limits.check_capacity(workload, policy)?;

    let mut sim = Simulation::new(
        policy,
        workload.reset(),
        Timeline::with_capacity_limit(limits.max_timeline_events),
        limits.time_bound(workload),
        observer,
    );

    let outcome = match policy {
        Policy::Fifo => fifo::run(&mut sim),
        Policy::Sjf => sjf::run(&mut sim),
        Policy::Stcf => stcf::run(&mut sim),
        Policy::RoundRobin { quantum } => round_robin::run(&mut sim, *quantum),
        Policy::Mlfq(config) => mlfq::run(&mut sim, config),
    };
    let run = outcome.and_then(|()| sim.finish()).inspect_err(|err| {
        if let SimulationError::CapacityExceeded { .. } = err {
            warn!(policy = %policy.name(), %err, "simulation aborted");
        }
    })?;
    debug!(
        policy = %policy.name(),
        processes = run.processes.len(),
        total_time = run.total_time(),
        segments = run.timeline.len(),
        "simulation finished"
    );
    Ok(run)
}
