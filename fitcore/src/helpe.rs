pub use std::{
    sync::Arc,
    io::{BufRead, BufReader},
    collections::HashSet,
    path::PathBuf,
    time::Instant,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use rayon::prelude::*;
pub use indexmap::IndexMap;
pub use clap::{Parser, ValueEnum};
pub use rand::{rngs::StdRng, Rng, SeedableRng};

pub use crate::{MemoryStore, Process, ProcessRegistry,
    catalog::*,
};

/// The unit for counting slots. The simulation does not care what a slot
/// physically is — a byte, a frame, a page — as long as allocations are
/// contiguous runs of them.
///
/// Offsets, sizes and capacities all share this type, which keeps the
/// scan arithmetic free of casts.
pub type SlotSteps = usize;

/// The workload catalog: an ordered lookup table of processes, admitted
/// through [`catalog::init`](crate::catalog::init).
///
/// This is arguably the most commonly shared value in `fitsim`.
pub type Catalog = Vec<Arc<Process>>;
// `Arc` keeps trials cheap to fan out across threads.

#[derive(Error, Debug)]
#[error("{message}\n{:?}", culprit)]
/// Appears while constructing the [`Catalog`] of workload
/// processes to be dealt with.
pub struct CatalogError {
    pub message: String,
    pub culprit: Process,
}

/// A driver defect: the event loop tried to allocate an already-resident
/// process, or free one that is not resident. Either would break the
/// no-overlap invariant, so these are never swallowed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("process {0} is already resident")]
    AlreadyResident(String),
    #[error("process {0} is not resident")]
    NotResident(String),
}

//---START EXTERNAL INTERFACES
// The types listed below implement interfaces to the
// simulation's collaborators: where workload picks come
// from, and where process catalogs are read from.
//
// To write your own source, simply make sure that it
// satisfies the corresponding trait.

/// Hands out catalog indices, one per workload event. The simulator
/// treats it as a black box: whatever index comes back (below `bound`)
/// is the process poked by the event.
pub trait WorkloadSource {
    fn next_pick(&mut self, bound: usize) -> usize;
}

/// The stock workload: uniform picks from a seedable generator.
///
/// Equal seeds replay equal pick sequences — that is what makes strategy
/// trials comparable, since each trial gets its own generator built from
/// the same seed.
pub struct SeededWorkload {
    rng: StdRng,
}

impl SeededWorkload {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl WorkloadSource for SeededWorkload {
    #[inline(always)]
    fn next_pick(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Defines the interface for reading process catalogs.
///
/// For example: we ship a type that reads a two-column CSV. The user can
/// implement their own types as needed — the gatekeeper
/// [`catalog::init`](crate::catalog::init) validates whatever was read.
pub trait CatalogGen<T> {
    fn new(path: PathBuf) -> Self;
    /// Either a set of processes is successfully returned, or some
    /// arbitrary type that implements [std::error::Error].
    fn read_processes(&self) -> Result<Vec<Process>, Box<dyn std::error::Error>>;
    /// Uses some available data to spawn one [Process]. We do not put
    /// any limitations on what that data may look like.
    fn gen_single(&self, d: T) -> Process;
}

/// A two-column CSV: process id, slot demand.
pub struct CatalogCSVParser {
    pub path: PathBuf,
}

impl CatalogGen<(String, SlotSteps)> for CatalogCSVParser {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
        }
    }

    fn read_processes(&self) -> Result<Vec<Process>, Box<dyn std::error::Error>> {
        let mut res = vec![];

        let path = self.path
            .as_path();

        match std::fs::metadata(path) {
            Ok(_)   => {
                let fd = std::fs::File::open(path)?;
                let reader = BufReader::new(fd);
                for line in reader.lines()
                    // First line is the header!
                    .skip(1) {
                    let line = line?;
                    if line.trim().is_empty() { continue; }
                    match line.split(',').collect_tuple() {
                        Some((name, raw))   => {
                            let size = usize::from_str_radix(raw.trim(), 10)?;
                            res.push(self.gen_single((name.trim().to_string(), size)));
                        },
                        None    => {
                            return Err(format!("Malformed catalog line: {line}").into());
                        }
                    }
                }
            },
            Err(e)  => { return Err(Box::new(e)); }
        };

        Ok(res)
    }

    fn gen_single(&self, (name, size): (String, SlotSteps)) -> Process {
        Process {
            name,
            size,
        }
    }
}
//---END EXTERNAL INTERFACES

pub fn read_catalog<T, B>(file_path: PathBuf) -> Result<Catalog, Box<dyn std::error::Error>>
where T: CatalogGen<B> {
    let parser = T::new(file_path);
    let processes = parser.read_processes()?;
    assert!(processes.len() > 0);
    let set = crate::catalog::init(processes)?;

    Ok(set)
}
