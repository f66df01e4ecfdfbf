//! Simulation domain models.
//!
//! Provides the data types a simulation consumes and produces: the immutable
//! workload, the per-run process state and the execution timeline.
//!
//! # Domain Mappings
//!
//! | cpu-sched-sim | Scheduling theory | Operating system |
//! |---------------|-------------------|------------------|
//! | Process | Job | Task / thread |
//! | Workload | Job set | Run queue arrivals |
//! | Timeline | Gantt chart | CPU trace |

mod process;
mod timeline;
mod workload;

pub use process::{Pid, Process, ProcessState, Time};
pub use timeline::{Occupant, Timeline, TimelineEvent};
pub(crate) use workload::admission_order;
pub use workload::{Workload, WorkloadGenerator};
