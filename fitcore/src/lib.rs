//! Welcome to `fitsim`!

mod memory;
mod registry;

pub mod algo;
pub mod catalog;
pub mod report;
pub mod sim;
pub mod helpe;

pub use crate::helpe::*;

/// One named entry of the workload catalog. A [`Process`] is a complete
/// description of a recurring memory customer:
///
/// 1. It asks for [`size`](Process::size) contiguous slots whenever a
///     workload event picks it while it is not memory-resident.
/// 2. It gives the exact same range back on the next event that picks it.
///
/// > ***ATTENTION:*** a process is immutable once admitted to the
/// > [`Catalog`]. Residency is *not* recorded here — the
/// > [`ProcessRegistry`] is the single source of truth for who currently
/// > sits where. Two catalog entries must never share a name, since the
/// > registry is keyed by it; the [`catalog::init`] gatekeeper enforces
/// > this.
#[derive(Debug, Clone)]
pub struct Process {
    pub name:   String,
    pub size:   SlotSteps,
}

/// The fixed-capacity memory being fought over. Nothing but an ordered
/// run of binary slots: a slot is either free or occupied, and every
/// occupied slot belongs to exactly one live allocation.
///
/// The store knows nothing about processes or strategies. It answers
/// range queries and flips ranges; everyone above it is responsible for
/// only committing ranges that a [`Strategy`](crate::algo::Strategy)
/// scan approved.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    slots: Vec<bool>,
}

/// The residency table: which processes currently own memory, and where
/// their allocations start. Absence means the process is not resident.
///
/// Also the (recomputed) source of the high-water mark that next-fit
/// resumes its scan from.
#[derive(Debug, Clone, Default)]
pub struct ProcessRegistry {
    resident: IndexMap<String, SlotSteps>,
}
