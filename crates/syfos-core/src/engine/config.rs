use crate::core::models::parameters::{
    ForceVolumeConfig, MaterialParameters, MeasurementSetup, ParameterError,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error(transparent)]
    InvalidParameter(#[from] ParameterError),
}

/// Everything needed to synthesize one force volume.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    pub material: MaterialParameters,
    pub measurement: MeasurementSetup,
    pub force_volume: ForceVolumeConfig,
    /// Seed of the replica noise streams. A random seed is drawn when absent.
    pub seed: Option<u64>,
}

#[derive(Default)]
pub struct SynthesisConfigBuilder {
    material: Option<MaterialParameters>,
    start_distance: Option<f64>,
    step_size: Option<f64>,
    maximum_piezo: Option<f64>,
    replica_count: Option<usize>,
    noise_std_dev: Option<f64>,
    virtual_deflection_offset: Option<f64>,
    topography_offset: Option<f64>,
    seed: Option<u64>,
}

impl SynthesisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn material(mut self, material: MaterialParameters) -> Self {
        self.material = Some(material);
        self
    }
    pub fn start_distance(mut self, distance: f64) -> Self {
        self.start_distance = Some(distance);
        self
    }
    pub fn step_size(mut self, step: f64) -> Self {
        self.step_size = Some(step);
        self
    }
    pub fn maximum_piezo(mut self, piezo: f64) -> Self {
        self.maximum_piezo = Some(piezo);
        self
    }
    pub fn replica_count(mut self, count: usize) -> Self {
        self.replica_count = Some(count);
        self
    }
    pub fn noise_std_dev(mut self, std_dev: f64) -> Self {
        self.noise_std_dev = Some(std_dev);
        self
    }
    pub fn virtual_deflection_offset(mut self, offset: f64) -> Self {
        self.virtual_deflection_offset = Some(offset);
        self
    }
    pub fn topography_offset(mut self, offset: f64) -> Self {
        self.topography_offset = Some(offset);
        self
    }
    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Assembles the configuration. Offsets default to zero; everything else is
    /// required.
    pub fn build(self) -> Result<SynthesisConfig, ConfigError> {
        let measurement = MeasurementSetup {
            start_distance: self
                .start_distance
                .ok_or(ConfigError::MissingParameter("start_distance"))?,
            step_size: self
                .step_size
                .ok_or(ConfigError::MissingParameter("step_size"))?,
            maximum_piezo: self
                .maximum_piezo
                .ok_or(ConfigError::MissingParameter("maximum_piezo"))?,
        };
        measurement.validate()?;

        let force_volume = ForceVolumeConfig {
            replica_count: self
                .replica_count
                .ok_or(ConfigError::MissingParameter("replica_count"))?,
            noise_std_dev: self
                .noise_std_dev
                .ok_or(ConfigError::MissingParameter("noise_std_dev"))?,
            virtual_deflection_offset: self.virtual_deflection_offset.unwrap_or(0.0),
            topography_offset: self.topography_offset.unwrap_or(0.0),
        };
        force_volume.validate()?;

        Ok(SynthesisConfig {
            material: self
                .material
                .ok_or(ConfigError::MissingParameter("material"))?,
            measurement,
            force_volume,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_builder() -> SynthesisConfigBuilder {
        SynthesisConfigBuilder::new()
            .material(MaterialParameters::new(1.0, 25e-9, 8.25e10, 7.707e-20).unwrap())
            .start_distance(-10e-9)
            .step_size(0.2e-9)
            .maximum_piezo(30e-9)
            .replica_count(4)
            .noise_std_dev(1e-10)
    }

    #[test]
    fn build_applies_zero_offsets_by_default() {
        let config = complete_builder().build().unwrap();
        assert_eq!(config.force_volume.virtual_deflection_offset, 0.0);
        assert_eq!(config.force_volume.topography_offset, 0.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn build_reports_first_missing_parameter() {
        let result = SynthesisConfigBuilder::new()
            .start_distance(-10e-9)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("step_size")));
    }

    #[test]
    fn build_reports_missing_material() {
        let result = SynthesisConfigBuilder::new()
            .start_distance(-10e-9)
            .step_size(0.2e-9)
            .maximum_piezo(30e-9)
            .replica_count(1)
            .noise_std_dev(0.0)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("material")));
    }

    #[test]
    fn build_rejects_negative_noise() {
        let result = complete_builder().noise_std_dev(-1.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter(ParameterError::Negative {
                name: "noise_std_dev",
                ..
            }))
        ));
    }

    #[test]
    fn build_keeps_explicit_seed_and_offsets() {
        let config = complete_builder()
            .seed(Some(7))
            .virtual_deflection_offset(3e-9)
            .topography_offset(10e-9)
            .build()
            .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.force_volume.virtual_deflection_offset, 3e-9);
        assert_eq!(config.force_volume.topography_offset, 10e-9);
    }
}
