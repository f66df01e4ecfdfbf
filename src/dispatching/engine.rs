//! Rule engine for multi-criteria dispatching.
//!
//! Applies dispatching rules in sequence (the next rule is consulted only on
//! an exact tie) and finishes with a configurable tie-breaking strategy.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, DispatchingRule, RuleScore};
use crate::models::ProcessState;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Leave the tie unresolved; the first candidate in iteration order wins.
    #[default]
    FirstCandidate,
    /// Deterministic by ascending pid.
    ByPid,
}

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use cpu_sched_sim::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::ShortestRemaining)
///     .with_rule(rules::EarliestArrival);
/// assert_eq!(engine.rule_names(), vec!["SRPT", "FIFO"]);
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::FirstCandidate,
        }
    }

    /// Shortest burst first; ties by earliest arrival, then pid.
    pub fn shortest_job_first() -> Self {
        Self::new()
            .with_rule(rules::ShortestBurst)
            .with_rule(rules::EarliestArrival)
            .with_final_tie_breaker(TieBreaker::ByPid)
    }

    /// Shortest remaining time first; ties by earliest arrival, then pid.
    pub fn shortest_time_to_completion() -> Self {
        Self::new()
            .with_rule(rules::ShortestRemaining)
            .with_rule(rules::EarliestArrival)
            .with_final_tie_breaker(TieBreaker::ByPid)
    }

    /// Appends a rule. Later rules only decide ties left by earlier ones.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Returns the index of the highest-priority candidate.
    ///
    /// `candidates` are indices into `processes`.
    pub fn select_best<I>(&self, processes: &[ProcessState], candidates: I) -> Option<usize>
    where
        I: IntoIterator<Item = usize>,
    {
        candidates.into_iter().fold(None, |best, idx| match best {
            None => Some(idx),
            Some(b) => {
                if self.compare(&processes[idx], &processes[b]) == Ordering::Less {
                    Some(idx)
                } else {
                    Some(b)
                }
            }
        })
    }

    /// Evaluates a single process and returns the score of each rule.
    pub fn evaluate(&self, process: &ProcessState) -> Vec<RuleScore> {
        self.rules.iter().map(|rule| rule.evaluate(process)).collect()
    }

    /// Orders two processes: `Less` means `a` should run first.
    pub fn compare(&self, a: &ProcessState, b: &ProcessState) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a).cmp(&rule.evaluate(b)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }

        // All rules tied → use final tie-breaker
        match self.tie_breaker {
            TieBreaker::FirstCandidate => Ordering::Equal,
            TieBreaker::ByPid => a.pid().cmp(&b.pid()),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Process, ProcessState};

    fn make_state(pid: u32, arrival: i64, burst: i64, remaining: i64) -> ProcessState {
        let mut state = ProcessState::fresh(&Process::new(pid, burst).with_arrival(arrival));
        state.remaining_time = remaining;
        state
    }

    #[test]
    fn test_shortest_burst_selection() {
        let states = vec![
            make_state(1, 0, 5, 5),
            make_state(2, 0, 1, 1),
            make_state(3, 0, 3, 3),
        ];
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
        assert_eq!(engine.select_best(&states, 0..3), Some(1));
    }

    #[test]
    fn test_sequential_tie_breaker() {
        let states = vec![make_state(1, 3, 4, 4), make_state(2, 1, 4, 4)];
        let engine = RuleEngine::shortest_job_first();
        // Burst ties → earlier arrival wins
        assert_eq!(engine.select_best(&states, 0..2), Some(1));
    }

    #[test]
    fn test_by_pid_tie_breaker() {
        let states = vec![make_state(9, 0, 4, 4), make_state(4, 0, 4, 4)];
        let engine = RuleEngine::shortest_time_to_completion();
        assert_eq!(engine.select_best(&states, 0..2), Some(1));
    }

    #[test]
    fn test_first_candidate_on_unresolved_tie() {
        let states = vec![make_state(9, 0, 4, 4), make_state(4, 0, 4, 4)];
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
        assert_eq!(engine.select_best(&states, 0..2), Some(0));
    }

    #[test]
    fn test_remaining_time_drives_stcf() {
        let states = vec![make_state(1, 0, 8, 7), make_state(2, 1, 4, 4)];
        let engine = RuleEngine::shortest_time_to_completion();
        assert_eq!(engine.select_best(&states, 0..2), Some(1));
    }

    #[test]
    fn test_candidate_subset() {
        let states = vec![
            make_state(1, 0, 1, 1),
            make_state(2, 0, 5, 5),
            make_state(3, 0, 3, 3),
        ];
        let engine = RuleEngine::shortest_job_first();
        assert_eq!(engine.select_best(&states, [1, 2]), Some(2));
        assert_eq!(engine.select_best(&states, Vec::new()), None);
    }

    #[test]
    fn test_evaluate_scores() {
        let state = make_state(1, 2, 6, 4);
        let engine = RuleEngine::shortest_time_to_completion();
        let scores = engine.evaluate(&state);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores, vec![4, 2]); // remaining, arrival
    }

    #[test]
    fn test_exact_comparison_of_large_keys() {
        // 2^53 + 1 and 2^53 collapse to the same f64
        let big: i64 = 1 << 53;
        let states = vec![make_state(1, 0, big + 1, big + 1), make_state(2, 0, big, big)];
        assert_eq!(RuleEngine::shortest_job_first().select_best(&states, 0..2), Some(1));
        assert_eq!(
            RuleEngine::shortest_time_to_completion().select_best(&states, 0..2),
            Some(1)
        );
    }

    #[test]
    fn test_debug_lists_rules() {
        let engine = RuleEngine::shortest_job_first();
        let debug = format!("{engine:?}");
        assert!(debug.contains("SPT"));
        assert!(debug.contains("ByPid"));
    }
}
