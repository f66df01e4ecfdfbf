//! Per-run simulation context.
//!
//! Owns the process state and timeline of one run. Policies drive it through
//! a small set of transitions (idle, dispatch, execute, preempt) so that
//! timeline recording, observer notification and the time bound are handled
//! in one place.

use tracing::{trace, warn};

use super::observer::{SimulationEvent, SimulationObserver};
use super::{Policy, SimulationRun};
use crate::error::SimulationError;
use crate::models::{ProcessState, Time, Timeline};

pub(super) struct Simulation<'a> {
    policy: &'a Policy,
    pub(super) processes: Vec<ProcessState>,
    timeline: Timeline,
    max_time: Time,
    observer: &'a mut dyn SimulationObserver,
}

impl<'a> Simulation<'a> {
    pub(super) fn new(
        policy: &'a Policy,
        processes: Vec<ProcessState>,
        timeline: Timeline,
        max_time: Time,
        observer: &'a mut dyn SimulationObserver,
    ) -> Self {
        Self {
            policy,
            processes,
            timeline,
            max_time,
            observer,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.processes.len()
    }

    pub(super) fn max_time(&self) -> Time {
        self.max_time
    }

    /// Forwards `event` to the observer.
    pub(super) fn emit(&mut self, event: SimulationEvent) {
        trace!(policy = self.policy.kind(), ?event, "simulation event");
        self.observer.on_event(&event, &self.processes);
    }

    /// Earliest arrival strictly after `now` among unfinished processes.
    pub(super) fn next_arrival_after(&self, now: Time) -> Option<Time> {
        self.processes
            .iter()
            .filter(|p| !p.is_completed() && p.arrival_time() > now)
            .map(ProcessState::arrival_time)
            .min()
    }

    /// Records an idle gap `[from, until)`.
    pub(super) fn idle(&mut self, from: Time, until: Time) -> Result<(), SimulationError> {
        if until <= from {
            return Ok(());
        }
        self.timeline.idle(from, until - from)?;
        self.emit(SimulationEvent::Idle {
            start: from,
            end: until,
        });
        Ok(())
    }

    /// Gives the CPU to process `idx` at `now`.
    pub(super) fn dispatch(&mut self, idx: usize, now: Time) {
        self.processes[idx].mark_dispatched(now);
        let pid = self.processes[idx].pid();
        self.emit(SimulationEvent::Dispatch { time: now, pid });
    }

    /// Takes the CPU away from unfinished process `idx` at `now`.
    pub(super) fn preempt(&mut self, idx: usize, now: Time) {
        let pid = self.processes[idx].pid();
        self.emit(SimulationEvent::Preempt { time: now, pid });
    }

    /// Runs process `idx` for `amount` units starting at `now`.
    ///
    /// Returns `true` if the process completed.
    pub(super) fn execute(
        &mut self,
        idx: usize,
        now: Time,
        amount: Time,
    ) -> Result<bool, SimulationError> {
        let pid = self.processes[idx].pid();
        self.timeline.run(now, pid, amount)?;
        let finished = self.processes[idx].execute(now, amount);
        if finished {
            self.emit(SimulationEvent::Complete {
                time: now + amount,
                pid,
            });
        }
        Ok(finished)
    }

    /// Fails with `NonTermination` once the clock reaches the time bound.
    pub(super) fn check_bound(&self, now: Time) -> Result<(), SimulationError> {
        if now < self.max_time {
            return Ok(());
        }
        let partial = self.snapshot();
        warn!(
            policy = %self.policy.name(),
            limit = self.max_time,
            completed = partial.completed_count(),
            total = partial.processes.len(),
            "simulation exceeded its time bound"
        );
        Err(SimulationError::NonTermination {
            policy: self.policy.name(),
            limit: self.max_time,
            partial: Box::new(partial),
        })
    }

    /// Shortens a slice starting at `now` so it ends at the time bound.
    #[inline]
    pub(super) fn clamp_slice(&self, now: Time, len: Time) -> Time {
        len.min(self.max_time - now)
    }

    fn snapshot(&self) -> SimulationRun {
        SimulationRun {
            policy: self.policy.clone(),
            processes: self.processes.clone(),
            timeline: self.timeline.clone(),
        }
    }

    /// Closes the timeline at its current end and produces the run.
    pub(super) fn finish(mut self) -> Result<SimulationRun, SimulationError> {
        let end = self.timeline.end_time();
        self.timeline.finish(end)?;
        Ok(SimulationRun {
            policy: self.policy.clone(),
            processes: self.processes,
            timeline: self.timeline,
        })
    }
}
