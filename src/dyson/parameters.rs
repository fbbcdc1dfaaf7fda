use crate::{
    constants::{CHAIN_REGULARISER, DEFAULT_BROADENING, SINGULARITY_THRESHOLD},
    error::GreensFunctionError,
    spectral::{FrequencyScan, FrequencyScanBuilder},
};
use config::{Config, ConfigError, File, FileFormat, Value, ValueKind};
use serde::Deserialize;

/// Physical parameters of the charge transfer chain and the frequency scan
///
/// The defaults describe a chain of bandwidth 2 with a Coulomb well of depth 3, scanned over `-4..6`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SpectrumParameters {
    /// On-site energy of the unperturbed chain, `E`
    pub energy: f64,
    /// Bandwidth of the chain, `B`
    pub bandwidth: f64,
    /// Detuning of the central charge transfer site, `delta`
    pub detuning: f64,
    /// Depth of the Coulomb well, `A`
    pub well_depth: f64,
    /// Linewidth added to every frequency, `gamma`
    pub broadening: f64,
    /// Truncation distance `R`, the chain has `2R + 1` sites
    pub range: i64,
    /// First frequency of the scan
    pub minimum_frequency: f64,
    /// Last frequency of the scan
    pub maximum_frequency: f64,
    /// Number of frequencies in the scan
    pub number_of_points: i64,
    /// Numerical settings
    #[serde(default)]
    pub numerics: Numerics,
}

const FLOAT_FIELDS: [&str; 9] = [
    "energy",
    "bandwidth",
    "detuning",
    "well_depth",
    "broadening",
    "minimum_frequency",
    "maximum_frequency",
    "numerics.chain_regulariser",
    "numerics.singularity_threshold",
];
const INTEGER_FIELDS: [&str; 2] = ["range", "number_of_points"];

/// Numerical settings which do not change the physics
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Numerics {
    /// Imaginary shift applied inside the chain Green's function
    pub chain_regulariser: f64,
    /// Divisors with a smaller reciprocal condition number are treated as singular
    pub singularity_threshold: f64,
    /// Evaluate the frequency scan on the rayon thread pool
    pub parallel: bool,
}

impl Default for Numerics {
    fn default() -> Self {
        Self {
            chain_regulariser: CHAIN_REGULARISER,
            singularity_threshold: SINGULARITY_THRESHOLD,
            parallel: true,
        }
    }
}

impl Default for SpectrumParameters {
    fn default() -> Self {
        Self {
            energy: 0.,
            bandwidth: 2.,
            detuning: 0.5,
            well_depth: 3.,
            broadening: DEFAULT_BROADENING,
            range: 15,
            minimum_frequency: -4.,
            maximum_frequency: 6.,
            number_of_points: 200,
            numerics: Numerics::default(),
        }
    }
}

impl SpectrumParameters {
    /// Parse parameters from a TOML table
    ///
    /// Missing or non-numeric values are reported as `InvalidParameter`
    pub fn from_toml(contents: &str) -> Result<Self, GreensFunctionError> {
        let config = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()
            .map_err(|e| {
                GreensFunctionError::invalid_parameter(format!("failed to read parameters: {e}"))
            })?;
        Self::from_config(&config, "")
    }

    /// Read the parameters stored under `key`, or at the root of `config` when `key` is empty
    ///
    /// `config` converts freely between booleans, strings and numbers, so the kind of every numeric field is checked
    /// before deserializing. Floats accept integers, integers accept nothing else.
    pub fn from_config(config: &Config, key: &str) -> Result<Self, GreensFunctionError> {
        let path = |field: &str| {
            if key.is_empty() {
                field.to_string()
            } else {
                format!("{key}.{field}")
            }
        };
        for field in FLOAT_FIELDS {
            check_kind(config, &path(field), false)?;
        }
        for field in INTEGER_FIELDS {
            check_kind(config, &path(field), true)?;
        }

        let parameters = if key.is_empty() {
            config.clone().try_deserialize()
        } else {
            config.get(key)
        };
        parameters.map_err(|e| {
            GreensFunctionError::invalid_parameter(format!("failed to read parameters: {e}"))
        })
    }

    /// The frequency scan described by these parameters
    pub fn frequency_scan(&self) -> Result<FrequencyScan, GreensFunctionError> {
        let number_of_points = usize::try_from(self.number_of_points).map_err(|_| {
            GreensFunctionError::invalid_parameter(format!(
                "the number of points must be positive, got {}",
                self.number_of_points
            ))
        })?;
        FrequencyScanBuilder::new()
            .with_number_of_points(number_of_points)
            .with_broadening(self.broadening)
            .with_frequency_range(std::ops::Range {
                start: self.minimum_frequency,
                end: self.maximum_frequency,
            })
            .build()
    }
}

/// Fails unless the value at `key` is an integer, or a float when `integer` is unset. Absent keys pass.
fn check_kind(config: &Config, key: &str, integer: bool) -> Result<(), GreensFunctionError> {
    let value = match config.get::<Value>(key) {
        Ok(value) => value,
        Err(ConfigError::NotFound(_)) => return Ok(()),
        Err(e) => {
            return Err(GreensFunctionError::invalid_parameter(format!(
                "failed to read {key}: {e}"
            )))
        }
    };
    let accepted = match &value.kind {
        ValueKind::I64(_) | ValueKind::I128(_) | ValueKind::U64(_) | ValueKind::U128(_) => true,
        ValueKind::Float(_) => !integer,
        _ => false,
    };
    if accepted {
        Ok(())
    } else {
        let expected = if integer { "an integer" } else { "a number" };
        Err(GreensFunctionError::invalid_parameter(format!(
            "{key} must be {expected}, got {value}"
        )))
    }
}
