use fitcore::*;
use fitcore::{
    algo::Strategy,
    report::{print_trial_banner, print_trial_summary, survey_gaps, ConsoleReporter, GapSurvey, SilentReporter},
    sim::{RunStats, Simulator},
};
use log::*;

/// A placement-strategy comparison bench for fixed-slot memory
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to a process catalog CSV (id,size); bundled workload if omitted
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    catalog:    Option<PathBuf>,

    /// Memory capacity, in slots
    #[arg(short = 'm', long, default_value_t = 32)]
    #[arg(value_parser = clap::value_parser!(SlotSteps))]
    capacity:   SlotSteps,

    /// Workload events per trial
    #[arg(short, long, default_value_t = 30)]
    #[arg(value_parser = clap::value_parser!(usize))]
    events:     usize,

    /// Workload seed; trials with equal seeds replay equal event sequences
    #[arg(short, long, default_value_t = 62)]
    #[arg(value_parser = clap::value_parser!(u64))]
    seed:       u64,

    /// Strategy to exercise; all four when omitted
    #[arg(value_enum)]
    strategy:   Option<Strategy>,

    /// Run trials on worker threads (suppresses per-event echo)
    #[arg(short, long, default_value_t = false)]
    #[arg(value_parser = clap::value_parser!(bool))]
    parallel:   bool,

    /// Skip per-event echo, keep the summaries
    #[arg(short, long, default_value_t = false)]
    #[arg(value_parser = clap::value_parser!(bool))]
    quiet:      bool,
}

fn main() {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    let cli = Args::parse();
    assert!(cli.capacity > 0, "Capacity must be at least one slot");
    assert!(cli.events > 0, "A trial needs at least one event");

    let catalog = match cli.catalog {
        Some(ref path)  => {
            assert!(path.exists() && path.is_file(), "Invalid catalog path");
            read_catalog::<CatalogCSVParser, (String, SlotSteps)>(path.clone()).unwrap()
        },
        None            => catalog::init(catalog::demo()).unwrap(),
    };
    if catalog::get_max_size(&catalog) > cli.capacity {
        warn!("some processes outsize memory; their allocation events can never succeed");
    }
    info!(
        "{} catalog entries, total demand {} over {} slots",
        catalog.len(),
        catalog::get_total_demand(&catalog),
        cli.capacity
    );

    let strategies = match cli.strategy {
        Some(s) => vec![s],
        None    => vec![Strategy::First, Strategy::Next, Strategy::Best, Strategy::Worst],
    };

    if cli.parallel {
        // Trials are independent over disjoint state, so worker threads
        // are safe. Echo stays off to keep stdout whole.
        let results: Vec<(Strategy, (RunStats, GapSurvey, u128))> = strategies
            .par_iter()
            .map(|&strategy| (strategy, run_trial(strategy, &catalog, &cli, false)))
            .collect();
        for (strategy, (stats, survey, micros)) in results {
            print_trial_banner(strategy);
            print_trial_summary(&stats, &survey, micros);
        }
    } else {
        for &strategy in &strategies {
            print_trial_banner(strategy);
            let (stats, survey, micros) = run_trial(strategy, &catalog, &cli, !cli.quiet);
            print_trial_summary(&stats, &survey, micros);
        }
    }
}

/// One strategy trial over a fresh simulator and a freshly seeded
/// workload, so every trial replays the same event sequence.
fn run_trial(
    strategy:   Strategy,
    catalog:    &Catalog,
    cli:        &Args,
    echo:       bool,
) -> (RunStats, GapSurvey, u128) {
    let mut sim = Simulator::new(cli.capacity, catalog.clone());
    let mut workload = SeededWorkload::new(cli.seed);

    let start = Instant::now();
    let stats = if echo {
        sim.run(strategy, cli.events, &mut workload, &mut ConsoleReporter)
    } else {
        sim.run(strategy, cli.events, &mut workload, &mut SilentReporter)
    }.unwrap();
    let micros = start.elapsed().as_micros();

    (stats, survey_gaps(sim.snapshot()), micros)
}
