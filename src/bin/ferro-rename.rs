// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-rename CLI
//!
//! Command-line interface for renaming chromosomes in bedGraph and
//! chrom.sizes files and computing RPM scale factors.

use clap::{Parser, Subcommand};
use ferro_rename::cli::{output_error, output_rpm_scale, output_stats, OutputFormat};
use ferro_rename::commands::{rpm_alpha, RenameJob};
use ferro_rename::config::RenameConfig;
use ferro_rename::{AliasSource, FileKind, RenameError};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use tracing::debug;

#[derive(Parser)]
#[command(name = "ferro-rename")]
#[command(author, version, about = "Chromosome alias renaming for bedGraph and chrom.sizes files")]
#[command(
    long_about = "Rename chromosome/contig names in genomic interval files.

Examples:
  ferro-rename bedgraph sample.bedGraph alias.tsv renamed.bedGraph
  ferro-rename bedgraph sample.bedGraph registry.json - > renamed.bedGraph
  ferro-rename sizes sacCer3.chrom.sizes refseq.chrom.sizes
  ferro-rename rpm-alpha reads.bed"
)]
struct Cli {
    /// Log filter (e.g. warn, info, ferro_rename=debug)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename chromosomes in a bedGraph/BED file using an alias file
    #[command(name = "bedgraph")]
    BedGraph {
        /// Input bedGraph file (use - for stdin)
        input: PathBuf,

        /// Alias file: TSV of old<TAB>new, or JSON registry of canonical -> alias (inverted)
        alias: PathBuf,

        /// Output file (use - for stdout)
        output: PathBuf,

        /// Alias file format (auto picks json for .json files)
        #[arg(long, value_parser = ["auto", "tsv", "json"])]
        alias_format: Option<String>,

        /// What to do with malformed alias records
        #[arg(long, value_parser = ["skip", "abort"])]
        on_malformed: Option<String>,

        /// Print a line-count summary to stderr
        #[arg(long)]
        summary: bool,

        /// Summary format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Rename chromosomes in a chrom.sizes file (built-in table by default)
    Sizes {
        /// Input chrom.sizes file (use - for stdin)
        input: PathBuf,

        /// Output file (use - for stdout)
        output: PathBuf,

        /// Built-in table to use when no --alias is given
        #[arg(long)]
        table: Option<String>,

        /// Alias file to use instead of a built-in table
        #[arg(long)]
        alias: Option<PathBuf>,

        /// Alias file format (auto picks json for .json files)
        #[arg(long, value_parser = ["auto", "tsv", "json"])]
        alias_format: Option<String>,

        /// What to do with malformed alias records
        #[arg(long, value_parser = ["skip", "abort"])]
        on_malformed: Option<String>,

        /// Print a line-count summary to stderr
        #[arg(long)]
        summary: bool,

        /// Summary format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Compute the RPM scale factor (1,000,000 / reads) of a BED file
    RpmAlpha {
        /// BED file with one read per line
        bed: PathBuf,

        /// Output format
        #[arg(short = 'f', long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("ERROR: {}", e);
        return ExitCode::FAILURE;
    }

    let config = RenameConfig::load().unwrap_or_default();
    let format = output_format(&cli.command);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = output_error(&mut io::stderr(), &e, format);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, config: &RenameConfig) -> Result<(), RenameError> {
    match command {
        Commands::BedGraph {
            input,
            alias,
            output,
            alias_format,
            on_malformed,
            summary,
            format,
        } => {
            let alias_format = config.alias_format(alias_format.as_deref(), &alias)?;
            let job = RenameJob {
                kind: FileKind::BedGraph,
                input,
                output,
                alias: AliasSource::from_path(alias, alias_format),
                policy: config.malformed_policy(on_malformed.as_deref())?,
            };
            run_rename(&job, summary, &format)
        }
        Commands::Sizes {
            input,
            output,
            table,
            alias,
            alias_format,
            on_malformed,
            summary,
            format,
        } => {
            let source = match alias {
                Some(path) => {
                    let alias_format = config.alias_format(alias_format.as_deref(), &path)?;
                    AliasSource::from_path(path, alias_format)
                }
                None => AliasSource::Builtin(config.builtin_table(table.as_deref())?),
            };
            let job = RenameJob {
                kind: FileKind::Sizes,
                input,
                output,
                alias: source,
                policy: config.malformed_policy(on_malformed.as_deref())?,
            };
            run_rename(&job, summary, &format)
        }
        Commands::RpmAlpha { bed, format } => {
            let scale = rpm_alpha(&bed)?;
            let mut stdout = io::stdout().lock();
            output_rpm_scale(&mut stdout, &scale, parse_format(&format))?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn run_rename(job: &RenameJob, summary: bool, format: &str) -> Result<(), RenameError> {
    debug!(
        "Renaming {} {} -> {} using {}",
        job.kind,
        job.input.display(),
        job.output.display(),
        job.alias
    );
    let stats = job.run()?;
    if summary {
        output_stats(&mut io::stderr(), &stats, parse_format(format))?;
    }
    Ok(())
}

fn output_format(command: &Commands) -> OutputFormat {
    match command {
        Commands::BedGraph { format, .. }
        | Commands::Sizes { format, .. }
        | Commands::RpmAlpha { format, .. } => parse_format(format),
    }
}

fn parse_format(format: &str) -> OutputFormat {
    OutputFormat::from_str(format).unwrap_or_default()
}

fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    // Library code logs through `log`; try_init also installs the log bridge
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .try_init()?;

    debug!("Tracing initialized with level: {}", level);
    Ok(())
}
