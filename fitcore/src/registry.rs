use crate::helpe::*;

impl ProcessRegistry {
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            resident: IndexMap::new(),
        }
    }

    /// Returns `true` if the process currently owns memory.
    #[inline(always)]
    pub fn is_resident(&self, name: &str) -> bool {
        self.resident.contains_key(name)
    }

    /// Returns the start offset of a resident process.
    pub fn resident_offset(&self, name: &str) -> Result<SlotSteps, RegistryError> {
        self.resident
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::NotResident(name.to_string()))
    }

    /// Registers a fresh allocation. A resident process cannot be
    /// recorded again without first being removed.
    pub fn record(&mut self, name: &str, offset: SlotSteps) -> Result<(), RegistryError> {
        if self.resident.contains_key(name) {
            return Err(RegistryError::AlreadyResident(name.to_string()));
        }
        self.resident.insert(name.to_string(), offset);

        Ok(())
    }

    /// Drops a resident process, returning the offset its allocation
    /// started at.
    pub fn remove(&mut self, name: &str) -> Result<SlotSteps, RegistryError> {
        self.resident
            .shift_remove(name)
            .ok_or_else(|| RegistryError::NotResident(name.to_string()))
    }

    /// The highest start offset among currently resident processes, or 0
    /// when none are. Recomputed from scratch on every call: freeing the
    /// highest-offset process moves the mark backward.
    #[inline(always)]
    pub fn high_water_mark(&self) -> SlotSteps {
        self.resident
            .values()
            .copied()
            .max()
            .unwrap_or(0)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.resident.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }

    /// Resident entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SlotSteps)> {
        self.resident.iter()
    }

    /// Empties the table for a fresh trial.
    pub fn reset(&mut self) {
        self.resident.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_then_lookup() {
        let mut reg = ProcessRegistry::new();
        reg.record("P1", 4).unwrap();
        assert!(reg.is_resident("P1"));
        assert_eq!(reg.resident_offset("P1").unwrap(), 4);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_double_record_fails_loudly() {
        let mut reg = ProcessRegistry::new();
        reg.record("P1", 0).unwrap();
        assert_eq!(
            reg.record("P1", 8),
            Err(RegistryError::AlreadyResident(String::from("P1")))
        );
        // The original entry survives the rejected attempt.
        assert_eq!(reg.resident_offset("P1").unwrap(), 0);
    }

    #[test]
    fn test_remove_non_resident_fails_loudly() {
        let mut reg = ProcessRegistry::new();
        assert_eq!(
            reg.remove("P9"),
            Err(RegistryError::NotResident(String::from("P9")))
        );
        assert_eq!(
            reg.resident_offset("P9"),
            Err(RegistryError::NotResident(String::from("P9")))
        );
    }

    #[test]
    fn test_remove_returns_recorded_offset() {
        let mut reg = ProcessRegistry::new();
        reg.record("P2", 11).unwrap();
        assert_eq!(reg.remove("P2").unwrap(), 11);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_high_water_mark_moves_backward_after_free() {
        let mut reg = ProcessRegistry::new();
        assert_eq!(reg.high_water_mark(), 0);

        reg.record("P1", 2).unwrap();
        reg.record("P2", 9).unwrap();
        assert_eq!(reg.high_water_mark(), 9);

        reg.remove("P2").unwrap();
        assert_eq!(reg.high_water_mark(), 2);

        reg.remove("P1").unwrap();
        assert_eq!(reg.high_water_mark(), 0);
    }
}
