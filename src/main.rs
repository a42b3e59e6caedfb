// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use podtagger::app_config;
use podtagger::file_utils::FileManager;
use podtagger::status::{self, OutputStyle, StatusLogger};
use podtagger::{ConfigError, Controller, RunOptions};

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for podtagger
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// PodTagger - Automated podcast ID3 tagger
///
/// Reads shownotes.raw (Markdown with YAML headers) next to the target MP3,
/// applies the header information using configured templates to the MP3's ID3
/// tags, and writes the rendered shownotes.md.
#[derive(Parser, Debug)]
#[command(name = "podtagger")]
#[command(version)]
#[command(about = "Automated podcast ID3 tagger")]
#[command(override_usage = "podtagger [options] TARGET.mp3")]
#[command(long_about = "PodTagger reads a shownotes.raw[.md] file (Markdown with YAML headers) and applies
the information in the headers using configured templates to a target MP3 file.

EXAMPLES:
    podtagger episode.mp3                       # Tag using ~/.config/podtagger/podtagger.yaml
    podtagger -v episode.mp3                    # Show resolved metadata and tag frames
    podtagger -c other.yaml episode.mp3         # Use an alternate configuration file
    podtagger --html episode.mp3                # Status messages as HTML
    podtagger completions bash > podtagger.bash # Generate bash completions

REQUIREMENTS:
    mid3v2 from the Python mutagen package must be installed (pip install mutagen).")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// MP3 file to tag
    #[arg(value_name = "TARGET.mp3")]
    target: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Use alternate configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Disable colorized output
    #[arg(long)]
    no_color: bool,

    /// Output HTML status messages
    #[arg(long)]
    html: bool,
}

fn main() -> ExitCode {
    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "podtagger", &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let style = OutputStyle::from_flags(cli.no_color, cli.html);
    let level = status::level_for_flags(cli.debug, cli.verbose);
    if let Err(e) = StatusLogger::init(level, style) {
        eprintln!("Failed to initialize logger: {}", e);
        return ExitCode::FAILURE;
    }

    if cli.verbose {
        info!("Verbose output");
    }

    let options = match build_options(&cli) {
        Some(options) => options,
        None => return usage_failure(),
    };
    let Some(target) = validate_target(cli.target.as_deref()) else {
        return usage_failure();
    };
    if !FileManager::has_extension(&target, "mp3") {
        error!("Target file must have mp3 extension");
        return ExitCode::FAILURE;
    }

    if let Some(preamble) = style.preamble() {
        eprintln!("{}", preamble);
    }
    let result = run(options, &target);
    if let Some(postamble) = style.postamble() {
        eprintln!("{}", postamble);
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(options: RunOptions, target: &Path) -> Result<()> {
    Controller::with_options(options).run(target)?;
    Ok(())
}

/// Resolve run options; `None` when an explicit config file is missing
fn build_options(cli: &CommandLineOptions) -> Option<RunOptions> {
    let config_path = match &cli.config {
        Some(path) => {
            let path = FileManager::expand_path(&path.to_string_lossy());
            if !FileManager::file_exists(&path) {
                error!("Configuration file {} does not exist", path.display());
                return None;
            }
            if cli.verbose {
                info!("Using config file {}", path.display());
            }
            path
        }
        None => app_config::default_config_path(),
    };

    Some(RunOptions {
        config_path,
        ..RunOptions::default()
    })
}

/// The target path if it was given and exists
fn validate_target(target: Option<&Path>) -> Option<PathBuf> {
    match target {
        Some(path) if path.exists() => Some(path.to_path_buf()),
        Some(path) => {
            error!("File {} doesn't exist", path.display());
            None
        }
        None => {
            error!("No mp3 filename provided");
            None
        }
    }
}

fn usage_failure() -> ExitCode {
    let _ = CommandLineOptions::command().print_help();
    ExitCode::FAILURE
}

fn report_error(e: &anyhow::Error) {
    if let Some(ConfigError::SkeletonWritten { .. }) = e.downcast_ref::<ConfigError>() {
        info!("{}", e);
        return;
    }

    error!("{:#}", e);
}
