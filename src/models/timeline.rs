//! Execution timeline (Gantt) model.
//!
//! A timeline is the ordered list of CPU occupancy segments produced by a
//! run. Segments are contiguous from t=0, never overlap, and the sequence is
//! closed by a single [`Occupant::End`] marker at the makespan.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};

use super::{Pid, Time};
use crate::error::SimulationError;

/// What occupies the CPU during a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    /// A process is executing.
    Process(Pid),
    /// No process is ready.
    Idle,
    /// Terminal marker; always the last event, with zero duration.
    End,
}

/// One contiguous CPU occupancy segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Segment start.
    pub start: Time,
    /// Segment occupant.
    pub occupant: Occupant,
    /// Segment length (0 only for the end marker).
    pub duration: Time,
}

impl TimelineEvent {
    #[inline]
    pub fn end(&self) -> Time {
        self.start + self.duration
    }

    #[inline]
    pub fn is_end_marker(&self) -> bool {
        self.occupant == Occupant::End
    }
}

/// Timeline recorder.
///
/// Consecutive recordings for the same occupant coalesce into one segment.
/// An optional capacity bounds the number of stored events (end marker
/// included); exceeding it fails with [`SimulationError::CapacityExceeded`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    events: Vec<TimelineEvent>,
    #[serde(skip)]
    capacity: Option<usize>,
}

impl Timeline {
    /// Creates an unbounded, empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty timeline holding at most `capacity` events.
    pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
        Self {
            events: Vec::new(),
            capacity,
        }
    }

    /// Records `duration` units of `occupant` starting at `start`.
    ///
    /// Zero-length recordings are ignored. `start` must equal the current
    /// end of the timeline.
    pub fn record(
        &mut self,
        start: Time,
        occupant: Occupant,
        duration: Time,
    ) -> Result<(), SimulationError> {
        if duration <= 0 {
            return Ok(());
        }
        debug_assert!(!self.is_finished(), "recording after the end marker");
        debug_assert_eq!(start, self.end_time(), "timeline segments must be contiguous");

        if let Some(last) = self.events.last_mut() {
            if last.occupant == occupant && last.end() == start {
                last.duration += duration;
                return Ok(());
            }
        }
        self.push(TimelineEvent {
            start,
            occupant,
            duration,
        })
    }

    /// Records a process execution segment.
    #[inline]
    pub fn run(&mut self, start: Time, pid: Pid, duration: Time) -> Result<(), SimulationError> {
        self.record(start, Occupant::Process(pid), duration)
    }

    /// Records an idle segment.
    #[inline]
    pub fn idle(&mut self, start: Time, duration: Time) -> Result<(), SimulationError> {
        self.record(start, Occupant::Idle, duration)
    }

    /// Closes the timeline with the end marker at `end`.
    pub fn finish(&mut self, end: Time) -> Result<(), SimulationError> {
        if self.is_finished() {
            return Ok(());
        }
        self.push(TimelineEvent {
            start: end,
            occupant: Occupant::End,
            duration: 0,
        })
    }

    fn push(&mut self, event: TimelineEvent) -> Result<(), SimulationError> {
        if let Some(capacity) = self.capacity {
            if self.events.len() >= capacity {
                return Err(SimulationError::CapacityExceeded {
                    resource: "timeline events",
                    capacity,
                });
            }
        }
        self.events.push(event);
        Ok(())
    }

    /// All events, end marker included.
    pub fn events(&self) -> &[TimelineEvent] {
        &self.events
    }

    /// Occupancy segments (process and idle), end marker excluded.
    pub fn segments(&self) -> impl Iterator<Item = &TimelineEvent> {
        self.events.iter().filter(|e| !e.is_end_marker())
    }

    /// Segments executed by `pid`.
    pub fn segments_for(&self, pid: Pid) -> impl Iterator<Item = &TimelineEvent> {
        self.events
            .iter()
            .filter(move |e| e.occupant == Occupant::Process(pid))
    }

    /// Whether the end marker has been recorded.
    pub fn is_finished(&self) -> bool {
        self.events.last().is_some_and(TimelineEvent::is_end_marker)
    }

    /// End of the last recorded segment (0 when empty).
    pub fn end_time(&self) -> Time {
        self.events.last().map(TimelineEvent::end).unwrap_or(0)
    }

    /// Total CPU time spent by `pid`.
    pub fn time_for(&self, pid: Pid) -> Time {
        self.segments_for(pid).map(|e| e.duration).sum()
    }

    /// Total time the CPU executed any process.
    pub fn busy_time(&self) -> Time {
        self.segments()
            .filter(|e| matches!(e.occupant, Occupant::Process(_)))
            .map(|e| e.duration)
            .sum()
    }

    /// Total idle time.
    pub fn idle_time(&self) -> Time {
        self.segments()
            .filter(|e| e.occupant == Occupant::Idle)
            .map(|e| e.duration)
            .sum()
    }

    /// Number of stored events (end marker included).
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Checks the structural invariants: segments start at 0, are contiguous
    /// and positive, adjacent segments differ in occupant, and only the last
    /// event may be the end marker.
    pub fn is_well_formed(&self) -> bool {
        let mut cursor = 0;
        let mut previous: Option<Occupant> = None;
        for (i, event) in self.events.iter().enumerate() {
            if event.start != cursor {
                return false;
            }
            if event.is_end_marker() {
                return i + 1 == self.events.len() && event.duration == 0;
            }
            if event.duration <= 0 || previous == Some(event.occupant) {
                return false;
            }
            previous = Some(event.occupant);
            cursor = event.end();
        }
        true
    }
}
