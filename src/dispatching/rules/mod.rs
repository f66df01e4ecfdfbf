//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Time-based**: SPT (shortest burst), SRPT (shortest remaining time)
//! - **Queue**: FIFO (earliest arrival)
//!
//! # Score Convention
//! All rules return the smaller key for the process that should run first.

use super::{DispatchingRule, RuleScore};
use crate::models::ProcessState;

/// Shortest Processing Time.
///
/// Prioritizes processes with a shorter total burst. Non-preemptive SJF
/// selects with this rule.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl DispatchingRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, process: &ProcessState) -> RuleScore {
        process.burst_time()
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Shortest Remaining Processing Time.
///
/// Prioritizes processes closest to completion. STCF selects with this rule.
///
/// # Reference
/// Schrage (1968), optimal for mean flow time with preemption.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl DispatchingRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRPT"
    }

    fn evaluate(&self, process: &ProcessState) -> RuleScore {
        process.remaining_time
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Processing Time"
    }
}

/// First In First Out.
///
/// Prioritizes processes by arrival time.
#[derive(Debug, Clone, Copy)]
pub struct EarliestArrival;

impl DispatchingRule for EarliestArrival {
    fn name(&self) -> &'static str {
        "FIFO"
    }

    fn evaluate(&self, process: &ProcessState) -> RuleScore {
        process.arrival_time()
    }

    fn description(&self) -> &'static str {
        "First In First Out"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Process;

    fn make_state(pid: u32, arrival: i64, burst: i64) -> ProcessState {
        ProcessState::fresh(&Process::new(pid, burst).with_arrival(arrival))
    }

    #[test]
    fn test_shortest_burst() {
        let short = make_state(1, 0, 2);
        let long = make_state(2, 0, 9);
        assert!(ShortestBurst.evaluate(&short) < ShortestBurst.evaluate(&long));
    }

    #[test]
    fn test_shortest_remaining_uses_progress() {
        let mut almost_done = make_state(1, 0, 10);
        almost_done.remaining_time = 1;
        let fresh = make_state(2, 3, 3);
        assert!(
            ShortestRemaining.evaluate(&almost_done) < ShortestRemaining.evaluate(&fresh)
        );
        // Burst-based rule ignores progress
        assert!(ShortestBurst.evaluate(&fresh) < ShortestBurst.evaluate(&almost_done));
    }

    #[test]
    fn test_earliest_arrival() {
        let first = make_state(1, 1, 5);
        let second = make_state(2, 3, 5);
        assert!(EarliestArrival.evaluate(&first) < EarliestArrival.evaluate(&second));
    }

    #[test]
    fn test_rule_names() {
        assert_eq!(ShortestBurst.name(), "SPT");
        assert_eq!(ShortestRemaining.description(), "Shortest Remaining Processing Time");
        assert_eq!(EarliestArrival.name(), "FIFO");
    }
}
