//! Command-line interface for generating, authoring and inspecting collections

use crate::batch::driver::{BatchConfig, FailurePolicy, run_batch};
use crate::catalog::manifest::{CanvasSpec, load_catalog};
use crate::catalog::scan::scan_directory;
use crate::catalog::store::Catalog;
use crate::compose::rules::RuleBook;
use crate::io::configuration::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_JOBS, DEFAULT_MANIFEST,
    DEFAULT_OUTPUT_DIR, DEFAULT_SEED, DEFAULT_START_TOKEN, DEFAULT_TOKEN_COUNT, PER_MILLE,
};
use crate::io::error::Result;
use crate::io::progress::BatchProgress;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::fmt::Write;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "traitmint")]
#[command(
    author,
    version,
    about = "Generate layered token images from weighted trait catalogs"
)]
/// Command-line arguments for the token generator
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors and hide progress
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Maximum level of log events to emit
    pub const fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Render a range of tokens to PNG and JSON files
    Generate(GenerateArgs),
    /// Write a manifest describing a directory of layer images
    Scan(ScanArgs),
    /// Print the variant percentages of every category
    Inspect(InspectArgs),
}

/// Arguments of `generate`
#[derive(Args)]
pub struct GenerateArgs {
    /// Collection manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,

    /// Output directory for token images and metadata
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub out: PathBuf,

    /// Number of tokens to render
    #[arg(short, long, default_value_t = DEFAULT_TOKEN_COUNT)]
    pub count: u64,

    /// First token id
    #[arg(long, default_value_t = DEFAULT_START_TOKEN)]
    pub start: u64,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of tokens rendered concurrently
    #[arg(short, long, default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,

    /// Keep rendering after a token fails and report every failure at the end
    #[arg(short, long)]
    pub keep_going: bool,

    /// Skip writing `<id>.json` metadata files
    #[arg(long)]
    pub no_metadata: bool,
}

impl GenerateArgs {
    /// Batch configuration described by the arguments
    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            start: self.start,
            count: self.count,
            seed: self.seed,
            jobs: self.jobs,
            output_dir: self.out.clone(),
            policy: if self.keep_going {
                FailurePolicy::KeepGoing
            } else {
                FailurePolicy::FailFast
            },
            write_metadata: !self.no_metadata,
        }
    }
}

/// Arguments of `scan`
#[derive(Args)]
pub struct ScanArgs {
    /// Directory holding one sub-directory of PNG layers per category
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Manifest file to write
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    pub output: PathBuf,

    /// Canvas width in pixels
    #[arg(short = 'W', long, default_value_t = DEFAULT_CANVAS_WIDTH)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(short = 'H', long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
    pub height: u32,
}

/// Arguments of `inspect`
#[derive(Args)]
pub struct InspectArgs {
    /// Collection manifest
    #[arg(short, long, default_value = DEFAULT_MANIFEST)]
    pub manifest: PathBuf,
}

/// Runs the parsed command
pub struct Processor {
    cli: Cli,
}

impl Processor {
    /// Create a processor for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if the subcommand fails; for `generate` this includes
    /// a keep-going batch that finished with failed tokens
    pub fn process(&self) -> Result<()> {
        match &self.cli.command {
            Command::Generate(args) => self.generate(args),
            Command::Scan(args) => Self::scan(args),
            Command::Inspect(args) => Self::inspect(args),
        }
    }

    fn generate(&self, args: &GenerateArgs) -> Result<()> {
        let catalog = load_catalog(&args.manifest)?;
        let rules = RuleBook::collection();
        let config = args.batch_config();

        let progress = self
            .cli
            .should_show_progress()
            .then(|| BatchProgress::new(config.count));

        let report = run_batch(&catalog, &rules, &config, progress.as_ref());
        if let (Some(progress), Ok(report)) = (&progress, &report) {
            progress.finish(report.rendered.len(), report.failures.len());
        }

        report?.into_result().map(|_| ())
    }

    fn scan(args: &ScanArgs) -> Result<()> {
        let canvas = CanvasSpec {
            width: args.width,
            height: args.height,
        };
        let manifest = scan_directory(&args.dir, canvas)?;
        manifest.save(&args.output)?;
        tracing::info!(
            categories = manifest.traits.len(),
            specials = manifest.specials.len(),
            output = %args.output.display(),
            "manifest written"
        );
        Ok(())
    }

    // Allow print for the inspection report, which is the command's output
    #[allow(clippy::print_stdout)]
    fn inspect(args: &InspectArgs) -> Result<()> {
        let catalog = load_catalog(&args.manifest)?;
        print!("{}", inspection_report(&catalog));
        Ok(())
    }
}

/// Per-category table of variant percentages
///
/// Each line is `<category>  <variant>  <percent>%`; every category ends with
/// its total, which is always 100% because the no-layer variant takes up the
/// shortfall.
pub fn inspection_report(catalog: &Catalog) -> String {
    let mut report = String::new();
    for table in catalog.tables() {
        let width = table
            .variants()
            .iter()
            .map(|variant| variant.name().len())
            .max()
            .unwrap_or(0);
        for variant in table.variants() {
            let _ = writeln!(
                report,
                "{:<10} {:<width$} {:>5.1}%",
                table.category().name(),
                variant.name(),
                percent(variant.weight()),
            );
        }
        let _ = writeln!(
            report,
            "{:<10} {:<width$} {:>5.1}%\n",
            table.category().name(),
            "Total",
            percent(table.weights().total()),
        );
    }
    report
}

fn percent(weight: u32) -> f64 {
    f64::from(weight) * 100.0 / f64::from(PER_MILLE)
}
