use crate::config::ConverterConfig;
use crate::document::Document;
use crate::errors::{AppError, AppResult};
use crate::progress::{ProgressSink, TracingProgress};
use crate::writer::{group_by_name, write_grouped_files, write_single_file};
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

// CLI metadata constants
const APP_NAME: &str = env!("CARGO_PKG_NAME");
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const APP_ABOUT: &str = env!("CARGO_PKG_DESCRIPTION");

/// Where the records end up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One JSON file holding every record
    Combined,
    /// One JSON file per timezone name inside an output directory
    Grouped,
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: OutputMode,
    pub config: Option<PathBuf>,
}

/// Counts reported once a conversion finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub records: usize,
    pub timezones: usize,
    pub files_written: usize,
}

pub fn build_command() -> Command {
    Command::new(APP_NAME)
        .version(APP_VERSION)
        .about(APP_ABOUT)
        .arg(
            Arg::new("out")
                .long("out")
                .value_name("PATH")
                .help("Output directory (one file per timezone) or output file (with -1)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("in")
                .long("in")
                .value_name("PATH")
                .help("Timezone KML document to read")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("one_file")
                .short('1')
                .long("one-file")
                .help("Write every timezone into a single file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Optional TOML settings file")
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
}

/// Parses command-line arguments.
///
/// `--help` and `--version` print and exit the process, as clap does.
///
/// # Errors
///
/// Returns `AppError::Usage` when `--in` or `--out` is missing or any
/// argument is unknown. Nothing is read or written before this check.
pub fn parse_args<I, T>(args: I) -> AppResult<CliOptions>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match build_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => return Err(e.into()),
    };

    let required_path = |id: &str| {
        matches
            .get_one::<PathBuf>(id)
            .cloned()
            .ok_or_else(|| AppError::Usage(format!("Missing --{id} path")))
    };

    Ok(CliOptions {
        output: required_path("out")?,
        input: required_path("in")?,
        mode: if matches.get_flag("one_file") {
            OutputMode::Combined
        } else {
            OutputMode::Grouped
        },
        config: matches.get_one::<PathBuf>("config").cloned(),
    })
}

/// Entry point of the binary: parse arguments, load settings, convert.
pub fn run<I, T>(args: I) -> AppResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let options = parse_args(args)?;
    let config = match &options.config {
        Some(path) => ConverterConfig::from_toml_file(path)?,
        None => ConverterConfig::default(),
    };
    init_tracing(&config)?;

    convert(&options, &config, &mut TracingProgress)?;
    Ok(())
}

/// Installs the stderr `tracing` subscriber.
///
/// A subscriber that is already installed (tests, embedding programs) is kept.
pub fn init_tracing(config: &ConverterConfig) -> AppResult<()> {
    let filter = config.log_filter()?;
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        debug!("Global tracing subscriber already installed");
    }
    Ok(())
}

/// Reads the input document, extracts every record and writes the output.
///
/// The whole document is scanned before anything is written, so malformed
/// input never produces a combined output file. In grouped mode a write
/// failure leaves earlier files in place.
pub fn convert(
    options: &CliOptions,
    config: &ConverterConfig,
    progress: &mut dyn ProgressSink,
) -> AppResult<ConversionSummary> {
    let started = Instant::now();

    let document = Document::read(&options.input, progress)?;
    let records = document.extractor().extract_all(progress)?;
    let timezones = group_by_name(&records).len();

    let files_written = match options.mode {
        OutputMode::Combined => {
            write_single_file(&records, &options.output, config, progress)?;
            1
        }
        OutputMode::Grouped => write_grouped_files(&records, &options.output, config, progress)?.len(),
    };

    info!(
        input = %options.input.display(),
        output = %options.output.display(),
        records = records.len(),
        timezones = timezones,
        files = files_written,
        elapsed_ms = started.elapsed().as_millis(),
        "Conversion completed"
    );

    Ok(ConversionSummary {
        records: records.len(),
        timezones,
        files_written,
    })
}
