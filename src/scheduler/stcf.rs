//! Shortest Time-to-Completion First (preemptive SJF).
//!
//! The choice is re-evaluated at every arrival and completion, which yields
//! the same schedule as re-evaluating every time unit.

use super::simulation::Simulation;
use crate::dispatching::RuleEngine;
use crate::error::SimulationError;

pub(super) fn run(sim: &mut Simulation<'_>) -> Result<(), SimulationError> {
    let engine = RuleEngine::shortest_time_to_completion();
    let mut clock = 0;
    let mut running: Option<usize> = None;

    while sim.processes.iter().any(|p| !p.is_completed()) {
        sim.check_bound(clock)?;

        let ready = (0..sim.len())
            .filter(|&i| !sim.processes[i].is_completed() && sim.processes[i].has_arrived(clock));
        let Some(idx) = engine.select_best(&sim.processes, ready) else {
            // Nothing ready: every unfinished process arrives later
            let next = sim
                .next_arrival_after(clock)
                .map_or(sim.max_time(), |t| t.min(sim.max_time()));
            sim.idle(clock, next)?;
            clock = next;
            continue;
        };

        if running != Some(idx) {
            if let Some(prev) = running {
                sim.preempt(prev, clock);
            }
            sim.dispatch(idx, clock);
            running = Some(idx);
        }

        let mut slice = sim.processes[idx].remaining_time;
        if let Some(next) = sim.next_arrival_after(clock) {
            slice = slice.min(next - clock);
        }
        let slice = sim.clamp_slice(clock, slice);

        if sim.execute(idx, clock, slice)? {
            running = None;
        }
        clock += slice;
    }
    Ok(())
}
