use crate::helpe::*;

impl MemoryStore {
    /// Creates an all-free store with `capacity` slots.
    #[inline(always)]
    pub fn new(capacity: SlotSteps) -> Self {
        Self {
            slots: vec![false; capacity],
        }
    }

    #[inline(always)]
    pub fn capacity(&self) -> SlotSteps {
        self.slots.len()
    }

    /// Returns `true` iff every slot in `[start, start + length)` is
    /// free. A range that runs past the last slot is never free — the
    /// query answers `false` instead of panicking, so scans may probe
    /// the tail blindly.
    #[inline(always)]
    pub fn is_free(&self, start: SlotSteps, length: SlotSteps) -> bool {
        match start.checked_add(length) {
            Some(end) if end <= self.slots.len() => {
                self.slots[start..end]
                    .iter()
                    .all(|&occupied| !occupied)
            },
            _ => false,
        }
    }

    /// Flips every slot in `[start, start + length)` to `occupied`.
    ///
    /// The caller must have validated the range: in-bounds, and entirely
    /// free when marking occupied. The commit protocol in
    /// [`sim`](crate::sim) guarantees both.
    #[inline(always)]
    pub fn mark(&mut self, start: SlotSteps, length: SlotSteps, occupied: bool) {
        for slot in &mut self.slots[start..start + length] {
            *slot = occupied;
        }
    }

    /// Counts consecutive free slots beginning at `start`. Answers 0 if
    /// `start` itself is occupied or out of range. Best/worst-fit score
    /// their candidate offsets with this.
    #[inline(always)]
    pub fn free_run_length(&self, start: SlotSteps) -> SlotSteps {
        match self.slots.get(start..) {
            Some(tail)  => {
                tail.iter()
                    .take_while(|&&occupied| !occupied)
                    .count()
            },
            None        => 0,
        }
    }

    /// The full slot map, in order. `false` is free, `true` is occupied.
    #[inline(always)]
    pub fn snapshot(&self) -> &[bool] {
        &self.slots
    }

    /// Returns the store to all-free, keeping its capacity.
    pub fn reset(&mut self) {
        self.slots.fill(false);
    }
}
