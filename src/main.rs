use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use tcg_sim::core::{SimConfig, Target};
use tcg_sim::logging::init_logging;
use tcg_sim::report::{collected_summary, write_compiled_stats};
use tcg_sim::sim::TrialRunner;

/// Pack-opening simulator for a trading card game shop.
#[derive(Debug, Parser)]
#[command(
    name = "tcg-sim",
    author,
    version,
    about = "Open packs until expansions are complete"
)]
struct Cli {
    /// Path to the JSON simulation config.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the definitions directory.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Override the statistics output directory.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Add a target as EXPANSION:PACK (repeatable, appended to the config's).
    #[arg(short, long, value_name = "EXPANSION:PACK")]
    target: Vec<String>,

    /// Override the number of trials.
    #[arg(long, value_name = "N")]
    trials: Option<u64>,

    /// Override the index of the first trial.
    #[arg(long, value_name = "N")]
    first_trial: Option<u64>,

    /// Override the run seed.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Snapshot statistics every N packs (0 disables; needs --save-stat).
    #[arg(long, value_name = "N")]
    save_every: Option<u64>,

    /// Write statistics snapshots to the output directory.
    #[arg(long)]
    save_stat: bool,

    /// Override the log filter (RUST_LOG still wins).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print the reachability audit of every target and exit.
    #[arg(long)]
    audit: bool,

    /// Collect the final packs-opened count of every trial file in the
    /// output directory into statistics/stats.txt and exit.
    #[arg(long, conflicts_with = "audit")]
    compile: bool,
}

fn parse_target(spec: &str) -> anyhow::Result<Target> {
    match spec.split_once(':') {
        Some((expansion, pack)) if !expansion.is_empty() && !pack.is_empty() => {
            Ok(Target::new(expansion, pack))
        }
        _ => bail!("invalid target '{spec}', expected EXPANSION:PACK"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => SimConfig::from_path(path)?,
        None => SimConfig::default(),
    };

    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.output {
        config.output_dir = Some(dir);
    }
    for spec in &cli.target {
        config.targets.push(parse_target(spec)?);
    }
    if let Some(trials) = cli.trials {
        config.trials = trials;
    }
    if let Some(first) = cli.first_trial {
        config.first_trial = first;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(n) = cli.save_every {
        config.save_every_n_pack = n;
    }
    if cli.save_stat {
        config.save_stat = true;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    init_logging(&config.log_level);

    if cli.compile {
        let Some(dir) = &config.output_dir else {
            bail!("--compile needs an output directory");
        };
        let path = write_compiled_stats(dir).context("compiling statistics")?;
        println!("Compiled statistics written to {}", path.display());
        return Ok(());
    }

    let runner = TrialRunner::new(config).context("preparing trials")?;

    if cli.audit {
        for report in runner.audit()? {
            let status = if report.is_completable() { "ok" } else { "UNREACHABLE" };
            println!("{} from {}: {status}", report.expansion, report.pack);
            if !report.unreachable.is_empty() {
                println!("  never produced: {}", report.unreachable.join(", "));
            }
            if !report.undefined.is_empty() {
                println!("  not in expansion: {}", report.undefined.join(", "));
            }
        }
        return Ok(());
    }

    let outcomes = runner.run()?;
    println!(
        "Ran {} trial{} with seed {}",
        outcomes.len(),
        if outcomes.len() == 1 { "" } else { "s" },
        runner.seed()
    );
    for outcome in &outcomes {
        let summary = collected_summary(&outcome.player, runner.definitions())?;
        println!(
            "trial {}: {} packs opened; {summary}",
            outcome.trial,
            outcome.packs_opened()
        );
    }

    let total: u64 = outcomes.iter().map(|o| o.packs_opened()).sum();
    if !outcomes.is_empty() {
        println!(
            "mean packs opened: {:.2}",
            total as f64 / outcomes.len() as f64
        );
    }
    if let Some(dir) = &runner.config().output_dir {
        println!("Statistics written to {}", dir.display());
    }

    Ok(())
}
