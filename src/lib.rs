//! Single-CPU process scheduling simulator.
//!
//! Runs a workload of CPU-bound processes under classic scheduling
//! disciplines and reports per-process results, an execution timeline and
//! aggregate performance metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessState`, `Workload`,
//!   `Timeline`, plus a seeded `WorkloadGenerator`
//! - **`validation`**: Input integrity checks (duplicate pids, bursts, MLFQ config)
//! - **`dispatching`**: Rule-based process selection used by SJF and STCF
//! - **`scheduler`**: FIFO, SJF, STCF, Round Robin and MLFQ behind one
//!   `simulate` entry point, with observer hooks
//! - **`metrics`**: Turnaround, waiting, response, utilization, throughput
//!   and fairness
//! - **`comparison`**: Runs every policy on the same workload and ranks them
//!
//! # Example
//!
//! ```
//! use cpu_sched_sim::comparison::{compare, ComparisonConfig, Criterion};
//! use cpu_sched_sim::models::Workload;
//!
//! let workload = Workload::from_tuples(&[(1, 0, 5, 1), (2, 1, 3, 2), (3, 2, 8, 1)]);
//! let comparison = compare(&workload, &ComparisonConfig::default()).unwrap();
//!
//! let fifo = comparison.get("FIFO").unwrap();
//! assert_eq!(fifo.total_time, 16);
//! assert!(comparison.best_by(Criterion::Waiting).is_some());
//! ```
//!
//! # References
//!
//! - Arpaci-Dusseau & Arpaci-Dusseau (2018), "Operating Systems: Three Easy Pieces"
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5

pub mod comparison;
pub mod dispatching;
pub mod error;
pub mod metrics;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use comparison::{compare, Comparison, ComparisonConfig, Criterion};
pub use error::SimulationError;
pub use metrics::Metrics;
pub use scheduler::{simulate, simulate_with, Policy, SimulationRun};
