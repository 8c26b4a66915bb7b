use clap::{Parser, ValueEnum};
use perftab::PerfError;
use perftab::aggregate::{self, Mode};
use perftab::best_known;
use perftab::features::FeatureCatalog;
use perftab::report;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "perftab")]
#[command(about = "Aggregate graph-coloring results into a performance report", long_about = None)]
struct Cli {
    /// Results root: one directory per algorithm (single mode) or per run (multi mode)
    #[arg(long)]
    results: PathBuf,

    /// Instance feature catalog (CSV with feature_source and feature_num_vertices)
    #[arg(long)]
    features: PathBuf,

    /// Best-known solutions catalog (markdown table or CSV)
    #[arg(long)]
    best: PathBuf,

    /// Report path; read first to seed the incremental merge, rewritten at the end
    #[arg(long)]
    output: PathBuf,

    /// Results-root layout
    #[arg(long, value_enum, default_value = "single")]
    mode: CliMode,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliMode {
    Single,
    Multi,
}

impl From<CliMode> for Mode {
    fn from(mode: CliMode) -> Self {
        match mode {
            CliMode::Single => Mode::SingleRun,
            CliMode::Multi => Mode::MultiRun,
        }
    }
}

fn main() -> Result<(), PerfError> {
    let cli = Cli::parse();
    let start = Instant::now();

    println!("[perftab] Loading feature catalog: {}", cli.features.display());
    let features = FeatureCatalog::load(&cli.features)?;
    println!("[perftab] {} instance(s)", features.len());

    println!("[perftab] Loading best-known catalog: {}", cli.best.display());
    let best = best_known::load_best_known(&cli.best)?;
    println!("[perftab] {} best-known entry(ies)", best.len());

    let prior = report::read_prior(&cli.output)?;
    match &prior {
        Some(p) => println!(
            "[perftab] Seeding from previous report: {} row(s), {} result column(s)",
            p.rows.len(),
            p.columns.len()
        ),
        None => println!("[perftab] No previous report; starting fresh"),
    }

    println!("[perftab] Processing algorithm results...");
    let merged = aggregate::aggregate(
        &features,
        &best,
        prior.as_ref(),
        &cli.results,
        cli.mode.into(),
    )?;

    report::write_report(&merged, &cli.output)?;
    println!("[perftab] Results saved to {}", cli.output.display());
    println!("[perftab] Done in {:.2?}", start.elapsed());

    Ok(())
}
