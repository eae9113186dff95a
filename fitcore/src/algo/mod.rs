pub mod fit;

use crate::helpe::*;

/// The four classic placement flavors. A closed set: call sites match
/// exhaustively, so adding a fifth flavor is a compile-time event, not a
/// runtime surprise.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Strategy {
    /// Earliest sufficient gap
    First,
    /// First fit, but resuming from the high-water mark and wrapping
    Next,
    /// Smallest sufficient gap
    Best,
    /// Largest sufficient gap
    Worst,
}

impl Strategy {
    /// Maps the current store state and a requested size to a start
    /// offset, or `None` if no sufficient contiguous free run exists
    /// anywhere. A pure query: nothing is committed here.
    ///
    /// `high_water` is consulted only by [`Strategy::Next`] — pass
    /// [`ProcessRegistry::high_water_mark`](crate::ProcessRegistry::high_water_mark).
    /// The caller screens zero-sized requests before getting here.
    #[inline(always)]
    pub fn pick(
        &self,
        mem:        &MemoryStore,
        size:       SlotSteps,
        high_water: SlotSteps,
    ) -> Option<SlotSteps> {
        match self {
            Strategy::First => { fit::first_fit(mem, size) },
            Strategy::Next  => { fit::next_fit(mem, size, high_water) },
            Strategy::Best  => { fit::best_fit(mem, size) },
            Strategy::Worst => { fit::worst_fit(mem, size) },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Strategy; 4] = [
        Strategy::First,
        Strategy::Next,
        Strategy::Best,
        Strategy::Worst,
    ];

    /// Capacity 10 with `[4, 7)` occupied: a recovered low gap of 4
    /// slots and a tail gap of 3.
    fn two_gap_store() -> MemoryStore {
        let mut mem = MemoryStore::new(10);
        mem.mark(4, 3, true);
        mem
    }

    #[test]
    fn test_empty_store_yields_offset_zero() {
        let mem = MemoryStore::new(10);
        for s in ALL {
            assert_eq!(s.pick(&mem, 4, 0), Some(0), "{s:?}");
        }
    }

    #[test]
    fn test_oversized_request_yields_none() {
        let mem = MemoryStore::new(5);
        for s in ALL {
            assert_eq!(s.pick(&mem, 6, 0), None, "{s:?}");
        }
    }

    #[test]
    fn test_full_store_yields_none() {
        let mut mem = MemoryStore::new(4);
        mem.mark(0, 4, true);
        for s in ALL {
            assert_eq!(s.pick(&mem, 1, 0), None, "{s:?}");
        }
    }

    #[test]
    fn test_first_fit_is_deterministic_and_lowest() {
        let mem = two_gap_store();
        let probe = Strategy::First.pick(&mem, 3, 0);
        assert_eq!(probe, Some(0));
        for _ in 0..5 {
            assert_eq!(Strategy::First.pick(&mem, 3, 0), probe);
        }
    }

    #[test]
    fn test_first_fit_skips_undersized_gap() {
        // [0, 2) free, [2, 5) occupied, [5, 10) free.
        let mut mem = MemoryStore::new(10);
        mem.mark(2, 3, true);
        assert_eq!(Strategy::First.pick(&mem, 4, 0), Some(5));
    }

    #[test]
    fn test_best_fit_lands_in_recovered_gap() {
        // First-fit fills 4@0 and 3@4, then the first allocation is
        // freed again; best-fit for 2 slots must settle inside the
        // recovered [0, 4) gap rather than the tail.
        let mut mem = MemoryStore::new(10);
        let a = Strategy::First.pick(&mem, 4, 0).unwrap();
        assert_eq!(a, 0);
        mem.mark(a, 4, true);
        let b = Strategy::First.pick(&mem, 3, 0).unwrap();
        assert_eq!(b, 4);
        mem.mark(b, 3, true);
        mem.mark(a, 4, false);

        let picked = Strategy::Best.pick(&mem, 2, 0).unwrap();
        assert!(picked < 4, "landed in the tail at {picked}");
        // Candidate-run scoring settles at the tail end of the gap.
        assert_eq!(picked, 2);
        assert_eq!(mem.free_run_length(picked), 2);
    }

    #[test]
    fn test_worst_fit_lands_in_largest_gap() {
        let mem = two_gap_store();
        assert_eq!(Strategy::Worst.pick(&mem, 2, 0), Some(0));
    }

    #[test]
    fn test_best_and_worst_runs_bracket_all_candidates() {
        let mem = two_gap_store();
        let size = 2;
        let feasible: Vec<SlotSteps> = (0..mem.capacity())
            .filter(|&off| mem.is_free(off, size))
            .collect();
        assert!(feasible.len() > 1);

        let best_run = mem.free_run_length(Strategy::Best.pick(&mem, size, 0).unwrap());
        let worst_run = mem.free_run_length(Strategy::Worst.pick(&mem, size, 0).unwrap());
        for off in feasible {
            let run = mem.free_run_length(off);
            assert!(best_run <= run);
            assert!(worst_run >= run);
        }
    }

    #[test]
    fn test_exact_fill_leaves_no_slot_outside_range() {
        // Free run [4, 7) between two occupied blocks.
        let mut mem = MemoryStore::new(10);
        mem.mark(0, 4, true);
        mem.mark(7, 3, true);

        assert!(mem.is_free(4, 3));
        let picked = Strategy::Best.pick(&mem, 3, 0).unwrap();
        assert_eq!(picked, 4);
        mem.mark(picked, 3, true);
        assert_eq!(mem.free_run_length(0), 0);
        assert!(mem.snapshot().iter().all(|&occupied| occupied));
    }

    #[test]
    fn test_next_fit_starts_at_high_water_mark() {
        let mem = MemoryStore::new(10);
        // An empty tail exists past the mark, so no wrap happens.
        assert_eq!(Strategy::Next.pick(&mem, 2, 6), Some(6));
    }

    #[test]
    fn test_next_fit_wraps_to_low_memory() {
        // Free gap only at [0, 3), high-water mark at 6: the tail scan
        // fails and the wrap must find offset 0 instead of giving up.
        let mut mem = MemoryStore::new(10);
        mem.mark(3, 7, true);
        assert_eq!(Strategy::Next.pick(&mem, 2, 6), Some(0));
        assert_eq!(Strategy::First.pick(&mem, 2, 0), Some(0));
    }

    #[test]
    fn test_next_fit_tail_too_short_without_wrap() {
        // [8, 10) free but the request needs 3 slots; the only
        // sufficient run sits below the mark.
        let mut mem = MemoryStore::new(10);
        mem.mark(4, 4, true);
        assert_eq!(Strategy::Next.pick(&mem, 3, 4), Some(0));
    }
}
