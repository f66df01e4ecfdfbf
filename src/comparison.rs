//! Side-by-side comparison of every scheduling policy.
//!
//! Each policy runs against its own freshly reset copy of the workload, so
//! runs share nothing and may execute on parallel threads. Results always
//! come back in the fixed order FIFO, SJF, STCF, RR, MLFQ.

use std::cmp::Ordering;
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SimulationError;
use crate::metrics::Metrics;
use crate::models::{Time, Workload};
use crate::scheduler::{
    simulate_with, MlfqConfig, NoopObserver, Policy, SimulationLimits, SimulationRun,
};

/// Comparison parameters.
///
/// # Example
/// ```
/// use cpu_sched_sim::comparison::ComparisonConfig;
/// use cpu_sched_sim::scheduler::MlfqConfig;
///
/// let config = ComparisonConfig::default()
///     .with_quantum(4)
///     .with_mlfq(MlfqConfig::new(vec![1, 2, 4]).with_boost_interval(20))
///     .sequential();
/// assert_eq!(config.policies().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// Round Robin quantum.
    pub quantum: Time,
    /// MLFQ configuration.
    pub mlfq: MlfqConfig,
    /// Run policies on parallel threads.
    pub parallel: bool,
    /// Limits applied to every run.
    pub limits: SimulationLimits,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            quantum: 3,
            mlfq: MlfqConfig::default(),
            parallel: true,
            limits: SimulationLimits::default(),
        }
    }
}

impl ComparisonConfig {
    pub fn with_quantum(mut self, quantum: Time) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_mlfq(mut self, mlfq: MlfqConfig) -> Self {
        self.mlfq = mlfq;
        self
    }

    pub fn with_limits(mut self, limits: SimulationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Runs policies one after another on the calling thread.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// The policies to compare, in result order.
    pub fn policies(&self) -> Vec<Policy> {
        Policy::standard_set(self.quantum, self.mlfq.clone())
    }
}

/// Outcome of one policy in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    /// Display name, e.g. `RR (q=3)`.
    pub name: String,
    pub policy: Policy,
    pub metrics: Metrics,
    /// Latest completion time of the run.
    pub total_time: Time,
    /// Full run, timeline included.
    pub run: SimulationRun,
}

impl From<SimulationRun> for AlgorithmResult {
    fn from(run: SimulationRun) -> Self {
        Self {
            name: run.policy.name(),
            policy: run.policy.clone(),
            metrics: run.metrics(),
            total_time: run.total_time(),
            run,
        }
    }
}

/// Ranking criterion over [`Metrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    /// Lowest average turnaround time.
    Turnaround,
    /// Lowest average waiting time.
    Waiting,
    /// Lowest average response time.
    Response,
    /// Highest throughput.
    Throughput,
    /// Highest CPU utilization.
    Utilization,
    /// Highest fairness index.
    Fairness,
}

impl Criterion {
    pub const ALL: [Criterion; 6] = [
        Self::Turnaround,
        Self::Waiting,
        Self::Response,
        Self::Throughput,
        Self::Utilization,
        Self::Fairness,
    ];

    /// The metric this criterion reads.
    pub fn value(&self, metrics: &Metrics) -> f64 {
        match self {
            Self::Turnaround => metrics.avg_turnaround_time,
            Self::Waiting => metrics.avg_waiting_time,
            Self::Response => metrics.avg_response_time,
            Self::Throughput => metrics.throughput,
            Self::Utilization => metrics.cpu_utilization,
            Self::Fairness => metrics.fairness_index,
        }
    }

    /// Whether a lower value is better.
    pub fn minimizes(&self) -> bool {
        matches!(self, Self::Turnaround | Self::Waiting | Self::Response)
    }

    /// Orders two metric sets: `Less` means `a` ranks higher.
    pub fn compare(&self, a: &Metrics, b: &Metrics) -> Ordering {
        let ord = self
            .value(a)
            .partial_cmp(&self.value(b))
            .unwrap_or(Ordering::Equal);
        if self.minimizes() {
            ord
        } else {
            ord.reverse()
        }
    }
}

/// Results of a comparison, in policy order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub results: Vec<AlgorithmResult>,
}

impl Comparison {
    /// Result for the policy with display name `name`.
    pub fn get(&self, name: &str) -> Option<&AlgorithmResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Best result under `criterion`; ties go to the earlier policy.
    pub fn best_by(&self, criterion: Criterion) -> Option<&AlgorithmResult> {
        self.results.iter().reduce(|best, r| {
            if criterion.compare(&r.metrics, &best.metrics) == Ordering::Less {
                r
            } else {
                best
            }
        })
    }

    /// All results, best first. Ties keep policy order.
    pub fn ranked_by(&self, criterion: Criterion) -> Vec<&AlgorithmResult> {
        let mut ranked: Vec<&AlgorithmResult> = self.results.iter().collect();
        ranked.sort_by(|a, b| criterion.compare(&a.metrics, &b.metrics));
        ranked
    }
}

/// Runs every policy of `config` against `workload`.
///
/// Fails with the first error in policy order.
pub fn compare(workload: &Workload, config: &ComparisonConfig) -> Result<Comparison, SimulationError> {
    let policies = config.policies();
    debug!(
        processes = workload.len(),
        policies = policies.len(),
        parallel = config.parallel,
        "comparing policies"
    );

    let runs: Vec<Result<SimulationRun, SimulationError>> = if config.parallel {
        thread::scope(|scope| {
            let handles: Vec<_> = policies
                .iter()
                .map(|policy| {
                    scope.spawn(move || {
                        simulate_with(policy, workload, &config.limits, &mut NoopObserver)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(result) => result,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    } else {
        policies
            .iter()
            .map(|policy| simulate_with(policy, workload, &config.limits, &mut NoopObserver))
            .collect()
    };

    let results = runs
        .into_iter()
        .map(|run| run.map(AlgorithmResult::from))
        .collect::<Result<Vec<_>, _>>()?;

    for r in &results {
        info!(
            algorithm = %r.name,
            avg_turnaround = r.metrics.avg_turnaround_time,
            avg_waiting = r.metrics.avg_waiting_time,
            avg_response = r.metrics.avg_response_time,
            utilization = r.metrics.cpu_utilization,
            total_time = r.total_time,
            "policy result"
        );
    }
    Ok(Comparison { results })
}
