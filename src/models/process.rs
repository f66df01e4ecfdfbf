//! Process model.
//!
//! A process is a single CPU-bound job: it arrives at a known instant and
//! needs a fixed amount of CPU time. The descriptor ([`Process`]) never
//! changes; everything a policy mutates lives in [`ProcessState`].
//!
//! # Reference
//! Arpaci-Dusseau & Arpaci-Dusseau (2018), "Operating Systems: Three Easy
//! Pieces", Ch. 7 (Scheduling: Introduction)

use serde::{Deserialize, Serialize};

/// Simulated time, in abstract time units.
pub type Time = i64;

/// Process identifier. Unique within a workload.
pub type Pid = u32;

/// An immutable process descriptor.
///
/// # Time Representation
/// All times are integer units relative to the simulation epoch (t=0).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub pid: Pid,
    /// Instant at which the process becomes ready.
    pub arrival_time: Time,
    /// Total CPU time required.
    pub burst_time: Time,
    /// Static priority (lower value = more important).
    pub priority: i32,
}

impl Process {
    /// Creates a process arriving at t=0 with priority 0.
    pub fn new(pid: Pid, burst_time: Time) -> Self {
        Self {
            pid,
            arrival_time: 0,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the arrival time.
    pub fn with_arrival(mut self, arrival_time: Time) -> Self {
        self.arrival_time = arrival_time;
        self
    }

    /// Sets the static priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Earliest possible completion (arrival + burst).
    #[inline]
    pub fn earliest_completion(&self) -> Time {
        self.arrival_time + self.burst_time
    }
}

/// Per-run simulation state of one process.
///
/// Built fresh for every run by [`ProcessState::fresh`] (or
/// [`Workload::reset`](super::Workload::reset)); never shared between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    /// The descriptor this state belongs to.
    pub process: Process,
    /// CPU time still needed.
    pub remaining_time: Time,
    /// First dispatch instant. `None` until the process has run.
    pub start_time: Option<Time>,
    /// Completion instant. `None` until `remaining_time` reaches zero.
    pub completion_time: Option<Time>,
    /// MLFQ queue index (0 = highest priority).
    pub current_queue: usize,
    /// Time consumed from the quantum of `current_queue`.
    pub time_in_current_quantum: Time,
}

impl ProcessState {
    /// Pristine state: nothing executed, queue 0, empty quantum.
    pub fn fresh(process: &Process) -> Self {
        Self {
            process: process.clone(),
            remaining_time: process.burst_time,
            start_time: None,
            completion_time: None,
            current_queue: 0,
            time_in_current_quantum: 0,
        }
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.process.pid
    }

    #[inline]
    pub fn arrival_time(&self) -> Time {
        self.process.arrival_time
    }

    #[inline]
    pub fn burst_time(&self) -> Time {
        self.process.burst_time
    }

    /// Whether the process has arrived by `now`.
    #[inline]
    pub fn has_arrived(&self, now: Time) -> bool {
        self.process.arrival_time <= now
    }

    /// Whether the process ran to completion.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Records the first dispatch. Later calls are ignored.
    pub fn mark_dispatched(&mut self, now: Time) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Consumes `amount` units of CPU. Returns `true` if the process finished,
    /// in which case `completion_time` is set to `now + amount`.
    pub fn execute(&mut self, now: Time, amount: Time) -> bool {
        debug_assert!(amount > 0 && amount <= self.remaining_time);
        self.remaining_time -= amount;
        if self.remaining_time == 0 {
            self.completion_time = Some(now + amount);
            true
        } else {
            false
        }
    }

    /// Turnaround time: completion - arrival.
    pub fn turnaround_time(&self) -> Option<Time> {
        self.completion_time.map(|c| c - self.process.arrival_time)
    }

    /// Waiting time: turnaround - burst.
    pub fn waiting_time(&self) -> Option<Time> {
        self.turnaround_time().map(|t| t - self.process.burst_time)
    }

    /// Response time: first dispatch - arrival.
    pub fn response_time(&self) -> Option<Time> {
        self.start_time.map(|s| s - self.process.arrival_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_builder() {
        let p = Process::new(7, 12).with_arrival(3).with_priority(2);
        assert_eq!(p.pid, 7);
        assert_eq!(p.arrival_time, 3);
        assert_eq!(p.burst_time, 12);
        assert_eq!(p.priority, 2);
        assert_eq!(p.earliest_completion(), 15);
    }

    #[test]
    fn test_fresh_state() {
        let s = ProcessState::fresh(&Process::new(1, 5).with_arrival(2));
        assert_eq!(s.remaining_time, 5);
        assert_eq!(s.start_time, None);
        assert_eq!(s.completion_time, None);
        assert_eq!(s.current_queue, 0);
        assert_eq!(s.time_in_current_quantum, 0);
        assert!(!s.has_arrived(1));
        assert!(s.has_arrived(2));
    }

    #[test]
    fn test_start_time_set_once() {
        let mut s = ProcessState::fresh(&Process::new(1, 5));
        s.mark_dispatched(4);
        s.mark_dispatched(9);
        assert_eq!(s.start_time, Some(4));
    }

    #[test]
    fn test_execute_and_derived_times() {
        let mut s = ProcessState::fresh(&Process::new(1, 5).with_arrival(1));
        s.mark_dispatched(2);
        assert!(!s.execute(2, 3));
        assert_eq!(s.remaining_time, 2);
        assert_eq!(s.turnaround_time(), None);

        assert!(s.execute(8, 2));
        assert_eq!(s.completion_time, Some(10));
        assert_eq!(s.turnaround_time(), Some(9));
        assert_eq!(s.waiting_time(), Some(4));
        assert_eq!(s.response_time(), Some(1));
    }
}
