//! The command line front end of the calculation
mod configuration;
mod telemetry;

pub use configuration::{Configuration, OutputConfiguration};

use crate::dyson::{compute_spectrum, Spectrum};
use clap::{ArgEnum, Parser};
use color_eyre::eyre::WrapErr;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// An optional configuration file, layered over the defaults in `.config`
    config_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    /// Write the spectrum here instead of the configured output file
    #[clap(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

/// Parse the command line, compute the spectrum and write it to disk
pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = App::parse();

    let config = Configuration::build(cli.config_path.as_deref())?;
    let output_path = cli
        .output
        .unwrap_or_else(|| config.output.directory.join(&config.output.file_name));
    let log_directory = output_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    std::fs::create_dir_all(&log_directory).wrap_err_with(|| {
        format!("Failed to create the output directory {}", log_directory.display())
    })?;

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &log_directory);
    telemetry::init_subscriber(subscriber)?;

    let spectrum = compute_spectrum(&config.spectrum)?;
    if let Some((frequency, height)) = spectrum.absorption_peak() {
        tracing::info!("Peak absorption of {height:.4} at frequency {frequency:.4}");
    }

    write_spectrum(&spectrum, &output_path)?;
    tracing::info!("Spectrum written to {}", output_path.display());
    Ok(())
}

/// Writes the spectrum as comma separated columns under a header row
fn write_spectrum(spectrum: &Spectrum, path: &Path) -> color_eyre::Result<()> {
    let file = std::fs::File::create(path)
        .wrap_err_with(|| format!("Failed to create {}", path.display()))?;
    let mut writer = std::io::BufWriter::new(file);
    writeln!(writer, "frequency, absorption, density_of_states")?;
    for (frequency, absorption, density) in itertools::izip!(
        spectrum.frequencies.iter(),
        spectrum.absorption.iter(),
        spectrum.density_of_states.iter()
    ) {
        writeln!(writer, "{frequency}, {absorption}, {density}")?;
    }
    writer.flush()?;
    Ok(())
}
