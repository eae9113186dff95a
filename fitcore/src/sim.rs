use crate::{algo::Strategy, helpe::*};
use log::debug;

/// The action a single workload event resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// The process was granted `[offset, offset + size)`.
    Allocated(SlotSteps),
    /// No sufficient contiguous run existed; state is untouched.
    Rejected,
    /// The process gave back `[offset, offset + size)`.
    Freed(SlotSteps),
}

/// Per-trial tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub events:     usize,
    pub allocated:  usize,
    pub rejected:   usize,
    pub freed:      usize,
}

/// Consumes one `(process, outcome, slot map)` triple per event. The
/// core treats it as a black box; stock implementations live in
/// [`report`](crate::report).
pub trait Reporter {
    fn on_event(&mut self, process: &Process, outcome: EventOutcome, snapshot: &[bool]);
}

/// Drives workload events against one [MemoryStore]/[ProcessRegistry]
/// pair. One simulator per trial — trials share nothing mutable, which
/// is what lets the CLI fan them out across threads.
pub struct Simulator {
    mem:        MemoryStore,
    registry:   ProcessRegistry,
    catalog:    Catalog,
}

impl Simulator {
    pub fn new(capacity: SlotSteps, catalog: Catalog) -> Self {
        debug_assert!(!catalog.is_empty(), "Empty catalog given");
        Self {
            mem:        MemoryStore::new(capacity),
            registry:   ProcessRegistry::new(),
            catalog,
        }
    }

    #[inline(always)]
    pub fn snapshot(&self) -> &[bool] {
        self.mem.snapshot()
    }

    #[inline(always)]
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// Replays `events` workload picks from a freshly reset state.
    ///
    /// Per event: the picked process is freed if resident, otherwise the
    /// strategy scans for a home. Rejections leave state untouched and
    /// the trial running; registry contract violations abort it, since
    /// they mean the driver itself is broken.
    pub fn run(
        &mut self,
        strategy:   Strategy,
        events:     usize,
        workload:   &mut dyn WorkloadSource,
        reporter:   &mut dyn Reporter,
    ) -> Result<RunStats, RegistryError> {
        self.mem.reset();
        self.registry.reset();
        let mut stats = RunStats::default();

        for _ in 0..events {
            let pick = workload.next_pick(self.catalog.len());
            let process = self.catalog[pick].clone();
            let outcome = if self.registry.is_resident(&process.name) {
                self.free(&process)?
            } else {
                self.allocate(strategy, &process)?
            };
            match outcome {
                EventOutcome::Allocated(_)  => { stats.allocated += 1; },
                EventOutcome::Rejected      => { stats.rejected += 1; },
                EventOutcome::Freed(_)      => { stats.freed += 1; },
            }
            stats.events += 1;
            reporter.on_event(&process, outcome, self.mem.snapshot());
        }

        Ok(stats)
    }

    /// Commits an allocation atomically: the registry entry goes in
    /// first (it is the only step that can fail), the slot flips follow.
    /// Either all of them land together, or nothing changes.
    fn allocate(&mut self, strategy: Strategy, process: &Process) -> Result<EventOutcome, RegistryError> {
        if process.size == 0 || process.size > self.mem.capacity() {
            debug!(
                "{} asks for {} of {} slots, rejecting before any scan",
                process.name,
                process.size,
                self.mem.capacity()
            );
            return Ok(EventOutcome::Rejected);
        }
        match strategy.pick(&self.mem, process.size, self.registry.high_water_mark()) {
            Some(offset)    => {
                debug_assert!(self.mem.is_free(offset, process.size), "Bad offset picked");
                self.registry.record(&process.name, offset)?;
                self.mem.mark(offset, process.size, true);

                Ok(EventOutcome::Allocated(offset))
            },
            None            => {
                debug!("no run of {} free slots for {}", process.size, process.name);

                Ok(EventOutcome::Rejected)
            },
        }
    }

    /// Frees exactly the range the process was granted and drops its
    /// registry entry. Frees always succeed while the invariants hold.
    fn free(&mut self, process: &Process) -> Result<EventOutcome, RegistryError> {
        let offset = self.registry.remove(&process.name)?;
        self.mem.mark(offset, process.size, false);

        Ok(EventOutcome::Freed(offset))
    }
}
