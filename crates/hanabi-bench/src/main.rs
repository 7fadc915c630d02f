use std::path::PathBuf;

use clap::Parser;

use hanabi_bench::config::BenchmarkConfig;
use hanabi_bench::logging::init_telemetry;
use hanabi_bench::runner::BenchRunner;

/// Benchmark harness for Hanabi bots.
#[derive(Debug, Parser)]
#[command(
    name = "hanabi-bench",
    author,
    version,
    about = "Deterministic Hanabi self-play harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (and so the output directory).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games each agent plays.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deck generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the number of players at the table (2-5).
    #[arg(long, value_name = "COUNT")]
    players: Option<usize>,

    /// Override the hint-token cap.
    #[arg(long, value_name = "TOKENS")]
    hint_tokens: Option<u8>,

    /// Write telemetry.jsonl for this run.
    #[arg(long)]
    telemetry: bool,

    /// Also log every heuristic decision with the seat's labels.
    #[arg(long)]
    decision_details: bool,

    /// Exit after validating the configuration.
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }
    if let Some(games) = cli.games {
        config.games.count = games;
    }
    if let Some(seed) = cli.seed {
        config.games.seed = seed;
    }
    if let Some(players) = cli.players {
        config.games.players = players;
    }
    if let Some(hint_tokens) = cli.hint_tokens {
        config.games.hint_tokens = hint_tokens;
    }
    config.telemetry.enabled |= cli.telemetry || cli.decision_details;
    config.telemetry.decision_details |= cli.decision_details;

    let runner = BenchRunner::new(config.clone())?;
    let rules = runner.rules();
    println!(
        "Loaded '{}': {} agents, {} games, {} players, {} hint tokens",
        config.run_id,
        runner.agents().len(),
        config.games.count,
        rules.players(),
        rules.hint_tokens()
    );
    if cli.validate_only {
        println!("Validation-only mode: no games played.");
        return Ok(());
    }

    let telemetry = init_telemetry(&config)?;
    let summary = runner.run(telemetry)?;

    println!(
        "Played {} games per agent; {} rows at {}",
        summary.games_played,
        summary.rows_written,
        summary.paths.games.display()
    );
    for report in &summary.analytics.agents {
        println!(
            "  {} ({}): {:.2} avg, {} perfect, {} lost to fails",
            report.name, report.kind, report.avg_score, report.perfect_games, report.fail_losses
        );
    }
    println!("Summary: {}", summary.paths.summary.display());
    if summary.plot_written {
        println!("Plot: {}", summary.paths.plot.display());
    }
    if let Some(telemetry) = &summary.telemetry {
        println!(
            "Telemetry: {} turns, {} games at {}",
            telemetry.turns,
            telemetry.games,
            summary.paths.telemetry.display()
        );
    }

    Ok(())
}
