use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::curve::CurveError;
use crate::core::models::parameters::ParameterError;
use crate::core::physics::regimes::Regime;

/// Which curve boundary the segmenter was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    ApproachEnd,
    ContactStart,
}

impl std::fmt::Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Boundary::ApproachEnd => f.write_str("approach end"),
            Boundary::ContactStart => f.write_str("contact start"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid parameter: {source}")]
    Parameter {
        #[from]
        source: ParameterError,
    },

    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Malformed curve: {source}")]
    Curve {
        #[from]
        source: CurveError,
    },

    #[error(
        "No ideal curve could be created with the given parameters: the {regime} regime did not terminate before the maximum piezo position {maximum_piezo:e} m"
    )]
    RegimeExhausted { regime: Regime, maximum_piezo: f64 },

    #[error("Could not locate the {boundary} boundary: {reason}")]
    BoundaryNotFound {
        boundary: Boundary,
        reason: &'static str,
    },

    #[error("Failed to create the noise distribution: {0}")]
    NoiseDistribution(String),
}
