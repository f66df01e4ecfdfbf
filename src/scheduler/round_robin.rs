//! Round Robin.
//!
//! A single FIFO ready queue with a fixed quantum. A process that does not
//! finish within its quantum goes back to the tail, behind every process that
//! arrived during its slice (including at the slice's end instant).

use std::collections::VecDeque;

use super::simulation::Simulation;
use crate::error::SimulationError;
use crate::models::{admission_order, Time};

pub(super) fn run(sim: &mut Simulation<'_>, quantum: Time) -> Result<(), SimulationError> {
    let order = admission_order(&sim.processes);
    let mut admitted = 0;
    let mut ready: VecDeque<usize> = VecDeque::new();
    let mut clock = 0;
    let mut previous: Option<usize> = None;

    loop {
        while admitted < order.len() && sim.processes[order[admitted]].has_arrived(clock) {
            ready.push_back(order[admitted]);
            admitted += 1;
        }

        let Some(idx) = ready.pop_front() else {
            if admitted == order.len() {
                break;
            }
            sim.check_bound(clock)?;
            let next = sim.processes[order[admitted]]
                .arrival_time()
                .min(sim.max_time());
            sim.idle(clock, next)?;
            clock = next;
            continue;
        };

        sim.check_bound(clock)?;
        if previous != Some(idx) {
            sim.dispatch(idx, clock);
        }

        let slice = sim.clamp_slice(clock, quantum.min(sim.processes[idx].remaining_time));
        let finished = sim.execute(idx, clock, slice)?;
        clock += slice;

        if finished {
            previous = None;
            continue;
        }

        while admitted < order.len() && sim.processes[order[admitted]].has_arrived(clock) {
            ready.push_back(order[admitted]);
            admitted += 1;
        }
        if ready.is_empty() {
            // Sole ready process keeps the CPU for another quantum
            ready.push_back(idx);
            previous = Some(idx);
        } else {
            sim.preempt(idx, clock);
            ready.push_back(idx);
            previous = None;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::models::{Occupant, Workload};
    use crate::scheduler::{simulate, simulate_with, EventLog, Policy, SimulationLimits};

    fn rr(quantum: i64) -> Policy {
        Policy::RoundRobin { quantum }
    }

    #[test]
    fn test_rr_workload_1() {
        let w = Workload::from_tuples(&[(1, 0, 5, 1), (2, 1, 3, 2), (3, 2, 8, 1)]);
        let run = simulate(&rr(3), &w).unwrap();

        let starts: Vec<_> = run.processes.iter().map(|p| p.start_time).collect();
        let completions: Vec<_> = run.processes.iter().map(|p| p.completion_time).collect();
        assert_eq!(starts, vec![Some(0), Some(3), Some(6)]);
        assert_eq!(completions, vec![Some(11), Some(6), Some(16)]);

        let order: Vec<_> = run.timeline.segments().map(|e| e.occupant).collect();
        assert_eq!(
            order,
            vec![
                Occupant::Process(1),
                Occupant::Process(2),
                Occupant::Process(3),
                Occupant::Process(1),
                Occupant::Process(3),
            ]
        );
    }

    #[test]
    fn test_rr_arrival_at_slice_end_goes_first() {
        // P2 arrives exactly when P1's quantum expires and is queued ahead of it
        let w = Workload::from_tuples(&[(1, 0, 4, 0), (2, 2, 2, 0)]);
        let run = simulate(&rr(2), &w).unwrap();
        assert_eq!(run.process(2).and_then(|p| p.start_time), Some(2));
        assert_eq!(run.process(2).and_then(|p| p.completion_time), Some(4));
        assert_eq!(run.process(1).and_then(|p| p.completion_time), Some(6));
    }

    #[test]
    fn test_rr_simultaneous_arrivals_by_pid() {
        let w = Workload::from_tuples(&[(3, 0, 2, 0), (1, 0, 2, 0), (2, 0, 2, 0)]);
        let run = simulate(&rr(2), &w).unwrap();
        assert_eq!(run.process(1).and_then(|p| p.start_time), Some(0));
        assert_eq!(run.process(2).and_then(|p| p.start_time), Some(2));
        assert_eq!(run.process(3).and_then(|p| p.start_time), Some(4));
    }

    #[test]
    fn test_rr_lone_process_is_not_preempted() {
        let w = Workload::from_tuples(&[(1, 0, 7, 0)]);
        let mut log = EventLog::new();
        let run = simulate_with(&rr(2), &w, &SimulationLimits::default(), &mut log).unwrap();
        assert_eq!(log.preemptions_of(1), 0);
        // Consecutive quanta coalesce into one segment
        assert_eq!(run.timeline.len(), 2);
        assert_eq!(run.total_time(), 7);
    }

    #[test]
    fn test_rr_idle_gap() {
        let w = Workload::from_tuples(&[(1, 0, 1, 0), (2, 4, 2, 0)]);
        let run = simulate(&rr(3), &w).unwrap();
        assert_eq!(run.timeline.idle_time(), 3);
        assert_eq!(run.process(2).and_then(|p| p.completion_time), Some(6));
        assert!(run.timeline.is_well_formed());
    }
}
