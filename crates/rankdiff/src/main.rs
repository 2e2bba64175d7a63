// rankdiff entry point.
//
// Startup sequence:
// 1. Parse command line
// 2. Initialize tracing (stderr, or logs/rankdiff.log with --log-file)
// 3. Load config (explicit file or config/ seeded from defaults/)
// 4. Build and write the selected reports

use rankdiff::config;
use rankdiff::run;

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_FILTER: &str = "rankdiff=info,rankdiff_core=info,warn";

#[derive(Parser)]
#[command(name = "rankdiff")]
#[command(about = "Compare fantasy football rankings from two sources and flag disagreements")]
#[command(version)]
struct Cli {
    /// Config file to load instead of config/rankdiff.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report to build (repeatable); all configured reports when omitted
    #[arg(short, long = "report", value_name = "NAME")]
    reports: Vec<String>,

    /// Directory to write reports into, overriding `output_dir`
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Log to logs/rankdiff.log instead of stderr
    #[arg(long)]
    log_file: bool,
}

fn main() -> anyhow::Result<()> {
    // 1. Parse command line
    let cli = Cli::parse();

    // 2. Initialize tracing
    init_tracing(cli.log_file)?;
    info!("rankdiff starting up");

    // 3. Load config
    let config = match &cli.config {
        Some(path) => config::load_config_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => config::load_config().context("failed to load configuration")?,
    };
    info!(
        "Config loaded: {} sources, {} reports, max_rows={}",
        config.sources.len(),
        config.reports.len(),
        config.max_rows
    );

    // 4. Build reports
    let output_dir = cli.output_dir.unwrap_or_else(|| config.output_dir.clone());
    let outcomes = run::run(&config, &cli.reports, &output_dir)?;

    for outcome in &outcomes {
        println!(
            "{}: {} players -> {}, {}",
            outcome.name,
            outcome.rows,
            outcome.paths.csv.display(),
            outcome.paths.xlsx.display()
        );
    }
    info!("Finished {} report(s)", outcomes.len());
    Ok(())
}

/// Initialize tracing to stderr, or to `logs/rankdiff.log` when requested.
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if to_file {
        let log_dir = std::env::current_dir()?.join("logs");
        std::fs::create_dir_all(&log_dir)?;
        let log_file = std::fs::File::create(log_dir.join("rankdiff.log"))?;

        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("failed to set tracing subscriber")?;
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .context("failed to set tracing subscriber")?;
    }

    Ok(())
}
