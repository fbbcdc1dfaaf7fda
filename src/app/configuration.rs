use crate::dyson::SpectrumParameters;
use color_eyre::eyre::eyre;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// The full configuration of a run
#[derive(Debug)]
pub struct Configuration {
    /// Physical and numerical parameters of the calculation
    pub spectrum: SpectrumParameters,
    /// Where the results are written
    pub output: OutputConfiguration,
}

/// Location of the results
#[derive(Debug, Deserialize)]
pub struct OutputConfiguration {
    /// Directory holding the spectrum and the log file
    pub directory: PathBuf,
    /// Name of the spectrum file within `directory`
    pub file_name: String,
}

impl Configuration {
    /// Layer the defaults, the run mode overrides, an optional user file and the environment
    pub fn build(user_file: Option<&Path>) -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // The default settings which we use in the general case
            .add_source(File::with_name(".config/default"))
            // The run mode overrides, optional
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false));
        if let Some(path) = user_file {
            builder = builder.add_source(File::from(path));
        }
        let s = builder
            // e.g. `CT_SPECTRUM__SPECTRUM__RANGE=20`
            .add_source(
                Environment::with_prefix("CT_SPECTRUM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let spectrum = SpectrumParameters::from_config(&s, "spectrum")?;
        let output: OutputConfiguration = s
            .get("output")
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))?;
        Ok(Self { spectrum, output })
    }
}
