//! Process selection for the shortest-first policies.
//!
//! SJF and STCF both pick "the ready process with the least work", differing
//! only in whether work means the full burst or what is left of it. Each
//! criterion is a [`DispatchingRule`]; a [`RuleEngine`] chains them so that
//! arrival order and then pid settle exact ties, which keeps every run
//! reproducible.
//!
//! # Usage
//!
//! ```
//! use cpu_sched_sim::dispatching::{rules, RuleEngine, TieBreaker};
//! use cpu_sched_sim::models::{Process, ProcessState};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::ShortestBurst)
//!     .with_rule(rules::EarliestArrival)
//!     .with_final_tie_breaker(TieBreaker::ByPid);
//!
//! let states: Vec<ProcessState> = [Process::new(1, 9), Process::new(2, 4)]
//!     .iter()
//!     .map(ProcessState::fresh)
//!     .collect();
//! assert_eq!(engine.select_best(&states, 0..states.len()), Some(1));
//! ```
//!
//! # References
//!
//! - Smith (1956), "Various Optimizers for Single-Stage Production"
//! - Schrage (1968), "A Proof of the Optimality of the Shortest Remaining
//!   Processing Time Discipline"

mod engine;
pub mod rules;

pub use engine::{RuleEngine, TieBreaker};

use crate::models::{ProcessState, Time};
use std::fmt::Debug;

/// Key a rule assigns to a ready process. The smallest key runs first.
///
/// Keys are simulated times (burst, remaining time, arrival), so they are
/// compared exactly.
pub type RuleScore = Time;

/// One selection criterion over ready processes.
///
/// A rule only ranks; it never sees the ready set as a whole. Eligibility
/// (arrived, not yet finished) is decided by the policy before the engine
/// asks for scores.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Short tag used in logs, e.g. "SRPT".
    fn name(&self) -> &'static str;

    /// Selection key of `process`; smaller runs earlier.
    fn evaluate(&self, process: &ProcessState) -> RuleScore;

    fn description(&self) -> &'static str {
        self.name()
    }
}
