//! Shortest Job First.
//!
//! Non-preemptive: at every decision point the arrived process with the
//! shortest burst runs to completion.

use super::simulation::Simulation;
use crate::dispatching::RuleEngine;
use crate::error::SimulationError;

pub(super) fn run(sim: &mut Simulation<'_>) -> Result<(), SimulationError> {
    let engine = RuleEngine::shortest_job_first();
    let mut clock = 0;

    loop {
        let ready = (0..sim.len())
            .filter(|&i| !sim.processes[i].is_completed() && sim.processes[i].has_arrived(clock));

        match engine.select_best(&sim.processes, ready) {
            Some(idx) => {
                let burst = sim.processes[idx].remaining_time;
                sim.dispatch(idx, clock);
                sim.execute(idx, clock, burst)?;
                clock += burst;
            }
            None => match sim.next_arrival_after(clock) {
                Some(next) => {
                    sim.idle(clock, next)?;
                    clock = next;
                }
                None => break,
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::models::Workload;
    use crate::scheduler::{simulate, Policy};

    #[test]
    fn test_sjf_workload_1() {
        let w = Workload::from_tuples(&[(1, 0, 5, 1), (2, 1, 3, 2), (3, 2, 8, 1)]);
        let run = simulate(&Policy::Sjf, &w).unwrap();

        let starts: Vec<_> = run.processes.iter().map(|p| p.start_time).collect();
        let completions: Vec<_> = run.processes.iter().map(|p| p.completion_time).collect();
        assert_eq!(starts, vec![Some(0), Some(5), Some(8)]);
        assert_eq!(completions, vec![Some(5), Some(8), Some(16)]);
    }

    #[test]
    fn test_sjf_picks_shortest_among_arrived() {
        let w = Workload::from_tuples(&[(1, 0, 4, 0), (2, 1, 6, 0), (3, 2, 1, 0), (4, 3, 2, 0)]);
        let run = simulate(&Policy::Sjf, &w).unwrap();
        // At t=4 P2, P3 and P4 are ready; P3 then P4 then P2
        assert_eq!(run.process(3).and_then(|p| p.start_time), Some(4));
        assert_eq!(run.process(4).and_then(|p| p.start_time), Some(5));
        assert_eq!(run.process(2).and_then(|p| p.start_time), Some(7));
        assert_eq!(run.total_time(), 13);
    }

    #[test]
    fn test_sjf_tie_breaks_by_arrival_then_pid() {
        let w = Workload::from_tuples(&[(1, 0, 3, 0), (5, 2, 2, 0), (4, 2, 2, 0), (2, 1, 2, 0)]);
        let run = simulate(&Policy::Sjf, &w).unwrap();
        assert_eq!(run.process(2).and_then(|p| p.start_time), Some(3));
        assert_eq!(run.process(4).and_then(|p| p.start_time), Some(5));
        assert_eq!(run.process(5).and_then(|p| p.start_time), Some(7));
    }

    #[test]
    fn test_sjf_idles_until_next_arrival() {
        let w = Workload::from_tuples(&[(1, 3, 2, 0), (2, 10, 1, 0)]);
        let run = simulate(&Policy::Sjf, &w).unwrap();
        assert_eq!(run.timeline.idle_time(), 3 + 5);
        assert_eq!(run.total_time(), 11);
        assert!(run.timeline.is_well_formed());
    }

    #[test]
    fn test_sjf_large_bursts_compare_exactly() {
        let big: i64 = 1 << 53;
        let w = Workload::from_tuples(&[(1, 0, big + 1, 0), (2, 0, big, 0)]);
        let run = simulate(&Policy::Sjf, &w).unwrap();
        assert_eq!(run.process(2).and_then(|p| p.start_time), Some(0));
        assert_eq!(run.process(1).and_then(|p| p.start_time), Some(big));
        assert_eq!(run.total_time(), 2 * big + 1);
    }
}
