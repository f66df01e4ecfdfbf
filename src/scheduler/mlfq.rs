//! Multi-Level Feedback Queue.
//!
//! New processes enter queue 0. A process that uses up the quantum of its
//! level moves one level down (the lowest level keeps it). Every
//! `boost_interval` time units all unfinished processes return to queue 0.
//!
//! Execution advances in runs bounded by the next event (completion, quantum
//! exhaustion, boost instant, arrival). At an event instant transitions apply
//! in a fixed order: completion, boost, quantum exhaustion, arrivals. Boost
//! wins over quantum exhaustion, so a process whose quantum expires exactly
//! at a boost instant is not demoted.

use std::collections::VecDeque;

use super::observer::SimulationEvent;
use super::simulation::Simulation;
use super::MlfqConfig;
use crate::error::SimulationError;
use crate::models::{admission_order, Time};

struct Queues {
    levels: Vec<VecDeque<usize>>,
}

impl Queues {
    fn new(count: usize) -> Self {
        Self {
            levels: vec![VecDeque::new(); count],
        }
    }

    /// Pops the head of the highest-priority non-empty queue.
    fn pop_highest(&mut self) -> Option<usize> {
        self.levels.iter_mut().find_map(VecDeque::pop_front)
    }

    /// Whether any queue above `level` holds a process.
    fn has_work_above(&self, level: usize) -> bool {
        self.levels[..level].iter().any(|q| !q.is_empty())
    }

    /// Empties every queue, highest first, preserving FIFO order.
    fn drain_all(&mut self) -> Vec<usize> {
        self.levels.iter_mut().flat_map(|q| q.drain(..)).collect()
    }
}

pub(super) fn run(sim: &mut Simulation<'_>, config: &MlfqConfig) -> Result<(), SimulationError> {
    let lowest = config.lowest_queue();
    let order = admission_order(&sim.processes);
    let mut admitted = 0;
    let mut queues = Queues::new(config.num_queues());
    let mut running: Option<usize> = None;
    let mut clock: Time = 0;

    loop {
        while admitted < order.len() && sim.processes[order[admitted]].has_arrived(clock) {
            queues.levels[0].push_back(order[admitted]);
            admitted += 1;
        }

        let idx = match running.or_else(|| queues.pop_highest()) {
            Some(idx) => idx,
            None if admitted == order.len() => break,
            None => {
                sim.check_bound(clock)?;
                let next = sim.processes[order[admitted]]
                    .arrival_time()
                    .min(sim.max_time());
                sim.idle(clock, next)?;
                clock = next;
                continue;
            }
        };
        sim.check_bound(clock)?;
        if running != Some(idx) {
            sim.dispatch(idx, clock);
            running = Some(idx);
        }

        let level = sim.processes[idx].current_queue;
        let state = &sim.processes[idx];
        let mut slice = state
            .remaining_time
            .min(config.quantum(level) - state.time_in_current_quantum);
        if let Some(&next) = order.get(admitted) {
            slice = slice.min(sim.processes[next].arrival_time() - clock);
        }
        // A boost instant past Time::MAX is never reached
        if let Some(next_boost) = config
            .boost_interval
            .and_then(|interval| (clock / interval + 1).checked_mul(interval))
        {
            slice = slice.min(next_boost - clock);
        }
        let slice = sim.clamp_slice(clock, slice);

        let finished = sim.execute(idx, clock, slice)?;
        sim.processes[idx].time_in_current_quantum += slice;
        clock += slice;

        if finished {
            running = None;
        }

        let boosted = match config.boost_interval {
            Some(interval) if clock % interval == 0 => {
                let mut merged = queues.drain_all();
                if let Some(idx) = running.take() {
                    sim.preempt(idx, clock);
                    merged.push(idx);
                }
                for &i in &merged {
                    sim.processes[i].current_queue = 0;
                    sim.processes[i].time_in_current_quantum = 0;
                }
                queues.levels[0].extend(merged);
                sim.emit(SimulationEvent::Boost { time: clock });
                true
            }
            _ => false,
        };

        if let (false, Some(idx)) = (boosted, running) {
            let level = sim.processes[idx].current_queue;
            if sim.processes[idx].time_in_current_quantum >= config.quantum(level) {
                let to = (level + 1).min(lowest);
                let state = &mut sim.processes[idx];
                state.current_queue = to;
                state.time_in_current_quantum = 0;
                queues.levels[to].push_back(idx);
                running = None;
                let pid = sim.processes[idx].pid();
                sim.emit(SimulationEvent::QuantumExpired {
                    time: clock,
                    pid,
                    from: level,
                    to,
                });
            }
        }

        while admitted < order.len() && sim.processes[order[admitted]].has_arrived(clock) {
            queues.levels[0].push_back(order[admitted]);
            admitted += 1;
        }
        if let Some(idx) = running {
            let level = sim.processes[idx].current_queue;
            if queues.has_work_above(level) {
                // Keeps its quantum counter and resumes first within its level
                sim.preempt(idx, clock);
                queues.levels[level].push_front(idx);
                running = None;
            }
        }
    }
    Ok(())
}
