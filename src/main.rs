use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use status_sync::config::{load_from_path, SyncConfig};
use status_sync::registry::HttpFetcher;
use status_sync::sync::{run, RegionOutcome, SyncOptions, SyncReport};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "status-sync")]
#[command(
    about = "Regenerate HTTP status code blocks from the IANA registry",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Regenerate the marker regions in the target file (default)
    Sync {
        #[command(flatten)]
        target: TargetArgs,

        /// Dry run - show what would change without writing the target
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,

        /// Fail when a marker region is missing instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Exit with failure if the target file is out of date
    Check {
        #[command(flatten)]
        target: TargetArgs,
    },
}

#[derive(Args, Default)]
struct TargetArgs {
    /// Path to a TOML config file (built-in defaults otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory relative paths are resolved against (defaults to the current directory)
    #[arg(short, long)]
    root: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Some(Commands::Sync {
            target,
            dry_run,
            diff,
            strict,
        }) => cmd_sync(target, dry_run, diff, strict),

        Some(Commands::Check { target }) => cmd_check(target),

        None => cmd_sync(TargetArgs::default(), false, false, false),
    }
}

fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("status_sync={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    debug!("Logging initialized at level: {}", level);
}

/// Load the config file if one was given, and resolve the run root.
fn load_context(target: TargetArgs) -> Result<(SyncConfig, PathBuf)> {
    let config = match &target.config {
        Some(path) => load_from_path(path)?,
        None => SyncConfig::default(),
    };
    let root = match target.root {
        Some(root) => root,
        None => env::current_dir()?,
    };
    Ok((config, root))
}

/// Helper: Show unified diff between original and patched content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (generated)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for hunk in diff.unified_diff().context_radius(3).iter_hunks() {
        println!("{}", hunk.header().to_string().cyan());
        for change in hunk.iter_changes() {
            let line = match change.tag() {
                ChangeTag::Delete => format!("-{}", change).red(),
                ChangeTag::Insert => format!("+{}", change).green(),
                ChangeTag::Equal => format!(" {}", change).normal(),
            };
            print!("{}", line);
            if change.missing_newline() {
                println!();
            }
        }
    }
}

fn print_regions(report: &SyncReport) {
    for region in &report.regions {
        match region.outcome {
            RegionOutcome::Patched => println!(
                "{} {}: {} lines generated",
                "✓".green(),
                region.id,
                region.lines
            ),
            RegionOutcome::Unchanged => {
                println!("{} {}: Already up to date", "⊙".yellow(), region.id)
            }
            RegionOutcome::Missing => println!(
                "{} {}: Skipped (marker region not found)",
                "⊘".cyan(),
                region.id
            ),
        }
    }
}

fn cmd_sync(target: TargetArgs, dry_run: bool, show_diff: bool, strict: bool) -> Result<()> {
    let (config, root) = load_context(target)?;
    let options = SyncOptions {
        root,
        dry_run,
        strict,
    };

    let report = run(&config, &options, &HttpFetcher)?;

    println!("Target: {}", report.target.display());
    if report.fetched {
        println!("Registry: fetched from {}", config.registry.url);
    }
    println!("Records: {}", report.records);
    println!();

    if dry_run {
        println!("{}", "  [DRY RUN - target file not written]".cyan());
    }
    print_regions(&report);

    if show_diff && report.changed() {
        display_diff(&report.target, &report.original, &report.patched);
    }

    println!();
    println!("{}", "Summary:".bold());
    if report.written {
        println!("  {}", "target updated".green());
    } else if report.changed() {
        println!("  {}", "target would change".yellow());
    } else {
        println!("  {}", "target unchanged".normal());
    }

    let missing = report.missing_regions().count();
    if missing > 0 {
        println!("  {} regions skipped", format!("{}", missing).cyan());
    }

    Ok(())
}

fn cmd_check(target: TargetArgs) -> Result<()> {
    let (config, root) = load_context(target)?;
    let options = SyncOptions {
        root,
        dry_run: true,
        strict: true,
    };

    let report = run(&config, &options, &HttpFetcher)?;

    println!("{}", "Checking generated regions...".bold());
    println!("Target: {}", report.target.display());
    println!();
    print_regions(&report);

    if report.changed() {
        eprintln!();
        eprintln!(
            "{} {} is out of date; run `status-sync sync`",
            "✗".red(),
            report.target.display()
        );
        std::process::exit(1);
    }

    println!();
    println!("{} generated regions are up to date", "✓".green());
    Ok(())
}
