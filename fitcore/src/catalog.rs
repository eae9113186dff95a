use crate::helpe::*;

impl Process {
    pub fn new(name: &str, size: SlotSteps) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

/// Initializes a [Catalog] with a given set of processes.
/// A successfully returned [Catalog] is guaranteed to be
/// compliant with all of `fitsim`'s assumptions. These are:
/// - no process has zero size
/// - no process has an empty name
/// - no two processes share a name
///
/// This function is the gatekeeper to the rest of the library.
pub fn init(mut in_elts: Vec<Process>) -> Result<Catalog, CatalogError> {
    let mut seen: HashSet<String> = HashSet::new();
    for idx in 0..in_elts.len() {
        if in_elts[idx].size == 0 {
            return Err(CatalogError {
                message: String::from("Process with 0 size found!"),
                culprit: in_elts.remove(idx),
            });
        } else if in_elts[idx].name.is_empty() {
            return Err(CatalogError {
                message: String::from("Process with empty name found!"),
                culprit: in_elts.remove(idx),
            });
        } else if !seen.insert(in_elts[idx].name.clone()) {
            return Err(CatalogError {
                message: String::from("Duplicate process name found!"),
                culprit: in_elts.remove(idx),
            });
        }
    }

    Ok(in_elts
        .into_iter()
        .map(|x| Arc::new(x))
        .collect())
}

/// The bundled reference workload: ten processes with mixed demands,
/// sized for a 32-slot store.
pub fn demo() -> Vec<Process> {
    [
        ("P1", 5), ("P2", 4), ("P3", 2), ("P4", 5), ("P5", 8),
        ("P6", 3), ("P7", 5), ("P8", 8), ("P9", 2), ("P10", 6),
    ]
        .into_iter()
        .map(|(name, size)| Process::new(name, size))
        .collect()
}

#[inline(always)]
pub fn get_max_size(catalog: &Catalog) -> SlotSteps {
    catalog.iter()
        .map(|p| p.size)
        .max()
        .unwrap()
}

/// Sum of all catalog demands. Exceeding capacity is fine — processes
/// take turns — but it is worth surfacing to the observer.
#[inline(always)]
pub fn get_total_demand(catalog: &Catalog) -> SlotSteps {
    catalog.iter()
        .map(|p| p.size)
        .sum()
}
