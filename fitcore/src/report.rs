use crate::{
    algo::Strategy,
    helpe::*,
    sim::{EventOutcome, Reporter, RunStats},
};

/// Echoes every event to stdout, followed by the rendered slot map.
/// This is the observer-facing side of the simulation.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn on_event(&mut self, process: &Process, outcome: EventOutcome, snapshot: &[bool]) {
        match outcome {
            EventOutcome::Allocated(offset) => {
                println!("Process {} allocated at slot {offset}", process.name);
            },
            EventOutcome::Rejected          => {
                println!("Failed to allocate process {}", process.name);
            },
            EventOutcome::Freed(offset)     => {
                println!("Process {} freed from slot {offset}", process.name);
            },
        }
        println!("{}", render_slots(snapshot));
    }
}

/// Swallows events. For parallel trials, `--quiet` runs and tests,
/// where only the end-of-trial summary matters.
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn on_event(&mut self, _: &Process, _: EventOutcome, _: &[bool]) {}
}

/// Renders the slot map the way the observer reads it: 0 free,
/// 1 occupied, in slot order.
#[inline(always)]
pub fn render_slots(snapshot: &[bool]) -> String {
    format!(
        "[{}]",
        snapshot.iter()
            .map(|&occupied| u8::from(occupied))
            .join(", ")
    )
}

/// Free-gap census over a slot map, taken after a trial ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GapSurvey {
    pub free_slots:     SlotSteps,
    pub gap_count:      usize,
    pub largest_gap:    SlotSteps,
}

impl GapSurvey {
    /// Share of free memory stranded outside the largest gap. 0% means
    /// all free slots are one contiguous run; higher is worse.
    #[inline(always)]
    pub fn fragmentation(&self) -> f64 {
        if self.free_slots == 0 {
            return 0.0;
        }
        (self.free_slots - self.largest_gap) as f64 / self.free_slots as f64 * 100.0
    }
}

/// Walks the slot map once, tallying maximal free runs.
pub fn survey_gaps(snapshot: &[bool]) -> GapSurvey {
    let mut res = GapSurvey::default();
    for (occupied, run) in &snapshot.iter().chunk_by(|&&slot| slot) {
        if occupied {
            continue;
        }
        let len = run.count();
        res.free_slots += len;
        res.gap_count += 1;
        if len > res.largest_gap {
            res.largest_gap = len;
        }
    }

    res
}

/// One summary block per trial.
pub fn print_trial_summary(
    stats:  &RunStats,
    survey: &GapSurvey,
    micros: u128,
) {
    println!(
        "Events:\t\t{}\nAllocated:\t{}\nRejected:\t{}\nFreed:\t\t{}",
        stats.events,
        stats.allocated,
        stats.rejected,
        stats.freed
    );
    println!(
        "Free slots:\t{} in {} gaps (largest {})\nFragmentation:\t{:.2}%\nTrial time:\t{} μs",
        survey.free_slots,
        survey.gap_count,
        survey.largest_gap,
        survey.fragmentation(),
        micros
    );
}

/// The banner printed above each trial's output.
pub fn print_trial_banner(strategy: Strategy) {
    println!("--- {strategy:?} fit simulation ---");
}
