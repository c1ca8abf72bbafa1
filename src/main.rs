use clap::{Parser, Subcommand};
use colored::Colorize;
use miette::Result;
use std::path::PathBuf;
use tracing::info;

mod analysis;
mod audit;
mod cleanup;
mod collect;
mod config;
mod discovery;
mod error;
mod report;

use cleanup::{CleanupRunner, CleanupTarget};
use config::Config;
use report::{ReportFormat, Reporter};

/// apkaudit - Android app size audit (APK composition, unused resources, unused dependencies)
#[derive(Parser, Debug)]
#[command(name = "apkaudit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit app size: resources, native libraries, built artifact, catalog
    Inspect {
        /// Path to the project directory to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (for json format)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete unused image resources (dry run unless --confirm is given)
    Cleanup {
        /// Path to the project directory to clean
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Resource type to remove
        #[arg(short = 't', long = "type", value_enum)]
        target: CleanupTarget,

        /// Actually delete files; without this flag nothing is removed
        #[arg(long)]
        confirm: bool,

        /// Confirm each deletion interactively
        #[arg(long)]
        interactive: bool,
    },
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);
    info!("apkaudit v{}", env!("CARGO_PKG_VERSION"));

    // Contract with the invoking build system: always finish and report.
    // Failures are printed, never escalated as a process failure.
    let outcome = match cli.command {
        Command::Inspect {
            path,
            config,
            format,
            output,
        } => run_inspect(&path, config, format, output, cli.quiet),
        Command::Cleanup {
            path,
            config,
            target,
            confirm,
            interactive,
        } => run_cleanup(&path, config, target, confirm, interactive),
    };

    if let Err(e) = outcome {
        eprintln!("{} {:?}", "Audit failed:".red().bold(), e);
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(explicit: Option<PathBuf>, project_root: &std::path::Path) -> Result<Config> {
    match explicit {
        Some(path) => Config::from_file(&path),
        None => Config::from_default_locations(project_root),
    }
}

fn run_inspect(
    path: &std::path::Path,
    config_path: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let start = std::time::Instant::now();
    let config = load_config(config_path, path)?;

    let report = audit::run(path, &config, !quiet)?;

    let reporter = Reporter::new(format.into(), output, config.report.clone());
    reporter.report(&report)?;

    if !quiet {
        println!(
            "{}",
            format!("Audited in {:.2}s", start.elapsed().as_secs_f64()).dimmed()
        );
    }
    Ok(())
}

fn run_cleanup(
    path: &std::path::Path,
    config_path: Option<PathBuf>,
    target: CleanupTarget,
    confirm: bool,
    interactive: bool,
) -> Result<()> {
    let config = load_config(config_path, path)?;
    let runner = CleanupRunner::new(target, confirm, interactive);
    runner.run(path, &config)?;
    Ok(())
}
