//! First-Come-First-Served.
//!
//! Non-preemptive: processes run to completion in arrival order. Ties keep
//! workload order.

use super::simulation::Simulation;
use crate::error::SimulationError;

pub(super) fn run(sim: &mut Simulation<'_>) -> Result<(), SimulationError> {
    let mut order: Vec<usize> = (0..sim.len()).collect();
    order.sort_by_key(|&i| sim.processes[i].arrival_time());

    let mut clock = 0;
    for idx in order {
        let arrival = sim.processes[idx].arrival_time();
        if clock < arrival {
            sim.idle(clock, arrival)?;
            clock = arrival;
        }
        let burst = sim.processes[idx].remaining_time;
        sim.dispatch(idx, clock);
        sim.execute(idx, clock, burst)?;
        clock += burst;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::models::{Occupant, Workload};
    use crate::scheduler::{simulate, Policy};

    #[test]
    fn test_fifo_workload_1() {
        let w = Workload::from_tuples(&[(1, 0, 5, 1), (2, 1, 3, 2), (3, 2, 8, 1)]);
        let run = simulate(&Policy::Fifo, &w).unwrap();

        let starts: Vec<_> = run.processes.iter().map(|p| p.start_time).collect();
        let completions: Vec<_> = run.processes.iter().map(|p| p.completion_time).collect();
        assert_eq!(starts, vec![Some(0), Some(5), Some(8)]);
        assert_eq!(completions, vec![Some(5), Some(8), Some(16)]);
        assert_eq!(run.total_time(), 16);

        let occupants: Vec<_> = run.timeline.events().iter().map(|e| e.occupant).collect();
        assert_eq!(
            occupants,
            vec![
                Occupant::Process(1),
                Occupant::Process(2),
                Occupant::Process(3),
                Occupant::End
            ]
        );
    }

    #[test]
    fn test_fifo_idle_gap() {
        let w = Workload::from_tuples(&[(1, 0, 2, 0), (2, 5, 3, 0)]);
        let run = simulate(&Policy::Fifo, &w).unwrap();

        let events = run.timeline.events();
        assert_eq!(events[1].occupant, Occupant::Idle);
        assert_eq!((events[1].start, events[1].duration), (2, 3));
        assert_eq!(run.process(2).and_then(|p| p.start_time), Some(5));
        assert_eq!(run.total_time(), 8);
        assert_eq!(run.timeline.idle_time(), 3);
    }

    #[test]
    fn test_fifo_ties_keep_workload_order() {
        let w = Workload::from_tuples(&[(7, 0, 2, 0), (3, 0, 1, 0)]);
        let run = simulate(&Policy::Fifo, &w).unwrap();
        assert_eq!(run.process(7).and_then(|p| p.completion_time), Some(2));
        assert_eq!(run.process(3).and_then(|p| p.completion_time), Some(3));
    }

    #[test]
    fn test_fifo_unsorted_input() {
        let w = Workload::from_tuples(&[(1, 4, 2, 0), (2, 0, 3, 0)]);
        let run = simulate(&Policy::Fifo, &w).unwrap();
        assert_eq!(run.process(2).and_then(|p| p.completion_time), Some(3));
        assert_eq!(run.process(1).and_then(|p| p.start_time), Some(4));
        assert!(run.timeline.is_well_formed());
    }
}
