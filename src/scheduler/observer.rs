//! Simulation event hooks.
//!
//! Policies report every scheduling decision as a [`SimulationEvent`]. An
//! observer receives the event together with the process state right after
//! the transition, which is enough to animate a run or to check invariants
//! while it unfolds.

use serde::{Deserialize, Serialize};

use crate::models::{Pid, ProcessState, Time};

/// A scheduling decision or state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// The CPU stays idle over `[start, end)`.
    Idle { start: Time, end: Time },
    /// `pid` takes the CPU.
    Dispatch { time: Time, pid: Pid },
    /// `pid` loses the CPU before finishing.
    Preempt { time: Time, pid: Pid },
    /// `pid` finished its burst.
    Complete { time: Time, pid: Pid },
    /// `pid` used its full MLFQ quantum and moved from queue `from` to `to`
    /// (`from == to` on the lowest queue).
    QuantumExpired {
        time: Time,
        pid: Pid,
        from: usize,
        to: usize,
    },
    /// Every unfinished process was moved to MLFQ queue 0.
    Boost { time: Time },
}

impl SimulationEvent {
    /// Instant at which the event happened.
    pub fn time(&self) -> Time {
        match *self {
            Self::Idle { start, .. } => start,
            Self::Dispatch { time, .. }
            | Self::Preempt { time, .. }
            | Self::Complete { time, .. }
            | Self::QuantumExpired { time, .. }
            | Self::Boost { time } => time,
        }
    }
}

/// Receives simulation events.
pub trait SimulationObserver {
    /// Called after each transition with the current process state.
    fn on_event(&mut self, event: &SimulationEvent, processes: &[ProcessState]);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SimulationObserver for NoopObserver {
    fn on_event(&mut self, _event: &SimulationEvent, _processes: &[ProcessState]) {}
}

/// Observer that records every event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    pub events: Vec<SimulationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded boost instants.
    pub fn boosts(&self) -> Vec<Time> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SimulationEvent::Boost { time } => Some(*time),
                _ => None,
            })
            .collect()
    }

    /// Number of times `pid` was preempted.
    pub fn preemptions_of(&self, pid: Pid) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::Preempt { pid: p, .. } if *p == pid))
            .count()
    }
}

impl SimulationObserver for EventLog {
    fn on_event(&mut self, event: &SimulationEvent, _processes: &[ProcessState]) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_time() {
        assert_eq!(SimulationEvent::Idle { start: 3, end: 5 }.time(), 3);
        assert_eq!(SimulationEvent::Boost { time: 10 }.time(), 10);
        assert_eq!(
            SimulationEvent::QuantumExpired { time: 4, pid: 1, from: 0, to: 1 }.time(),
            4
        );
    }

    #[test]
    fn test_event_log_queries() {
        let mut log = EventLog::new();
        for event in [
            SimulationEvent::Dispatch { time: 0, pid: 1 },
            SimulationEvent::Preempt { time: 1, pid: 1 },
            SimulationEvent::Boost { time: 10 },
            SimulationEvent::Preempt { time: 12, pid: 1 },
            SimulationEvent::Boost { time: 20 },
        ] {
            log.on_event(&event, &[]);
        }
        assert_eq!(log.boosts(), vec![10, 20]);
        assert_eq!(log.preemptions_of(1), 2);
        assert_eq!(log.preemptions_of(2), 0);
    }
}
