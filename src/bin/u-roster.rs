use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{bail, Context};
use tracing::Level;
use u_roster::ga::GaConfig;
use u_roster::io::{self, SlotLabels};
use u_roster::roster::RosterProblem;

const USAGE: &str = "usage: u-roster <input.csv> [log-dir] [result-dir] [seed]";

// Reads a roster CSV, evolves a schedule, and writes the generation log
// plus a numbered result table.
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input_path) = args.next().map(PathBuf::from) else {
        bail!(USAGE);
    };
    let log_dir = args.next().map_or_else(|| PathBuf::from("logs"), PathBuf::from);
    let result_dir = args.next().map_or_else(|| PathBuf::from("results"), PathBuf::from);
    let mut config = GaConfig::default();
    if let Some(seed) = args.next() {
        config = config.with_seed(seed.parse().with_context(|| format!("invalid seed {seed:?}"))?);
    }

    let input = io::load_roster_csv(&input_path)
        .with_context(|| format!("reading {}", input_path.display()))?;
    let problem = RosterProblem::new(input.required, input.preferences)?;
    let labels = SlotLabels::default();

    let outcome = problem.solve(&config)?;

    for stats in &outcome.history {
        println!(
            "Generation {}, Best Fitness: {}, Avg: {:.2}, Mutation Rate: {}, MutCount: {}",
            stats.generation,
            stats.best_fitness,
            stats.average_fitness,
            stats.mutation_rate,
            stats.mutation_count
        );
    }

    println!("\nPreference score per employee:");
    for (e, score) in outcome.summary.employee_scores.iter().enumerate() {
        println!("P{}: {score}", e + 1);
    }
    println!("\nInitial Schedule:");
    print!("{}", io::render_schedule(&outcome.initial_schedule, labels));
    println!("\nFinal Schedule:");
    print!("{}", io::render_schedule(&outcome.schedule, labels));

    let log_path = io::log_path(&log_dir)?;
    io::write_generation_log(
        BufWriter::new(File::create(&log_path)?),
        &config,
        &problem,
        &outcome,
        labels,
    )?;
    let result_path = io::next_result_path(&result_dir)?;
    io::write_result_csv(BufWriter::new(File::create(&result_path)?), &problem, &outcome, labels)?;

    tracing::info!(
        log = %log_path.display(),
        result = %result_path.display(),
        "reports written"
    );
    Ok(())
}
