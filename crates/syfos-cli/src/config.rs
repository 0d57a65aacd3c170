pub mod defaults;

use crate::cli::{AnalyzeArgs, GenerateArgs, MaterialArgs};
use crate::error::{CliError, Result};
use crate::utils::parser;
use defaults::{DefaultsConfig, RECOMMENDED_RANGES};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use syfos::core::models::parameters::{MaterialParameters, MaterialProperties};
use syfos::engine::config::{SynthesisConfig, SynthesisConfigBuilder};
use tracing::{debug, warn};

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialProbeConfig {
    material: Option<String>,
    #[serde(rename = "youngs-modulus")]
    youngs_modulus: Option<f64>,
    #[serde(rename = "poisson-ratio")]
    poisson_ratio: Option<f64>,
    hamaker: Option<f64>,
    #[serde(rename = "spring-constant")]
    spring_constant: Option<f64>,
    #[serde(rename = "tip-radius")]
    tip_radius: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSampleConfig {
    material: Option<String>,
    #[serde(rename = "youngs-modulus")]
    youngs_modulus: Option<f64>,
    #[serde(rename = "poisson-ratio")]
    poisson_ratio: Option<f64>,
    hamaker: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialMeasurementConfig {
    #[serde(rename = "start-distance")]
    start_distance: Option<f64>,
    #[serde(rename = "step-size")]
    step_size: Option<f64>,
    #[serde(rename = "maximum-piezo")]
    maximum_piezo: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialForceVolumeConfig {
    replicas: Option<usize>,
    noise: Option<f64>,
    #[serde(rename = "virtual-deflection-offset")]
    virtual_deflection_offset: Option<f64>,
    #[serde(rename = "topography-offset")]
    topography_offset: Option<f64>,
    seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSyfosConfig {
    probe: Option<PartialProbeConfig>,
    sample: Option<PartialSampleConfig>,
    measurement: Option<PartialMeasurementConfig>,
    #[serde(rename = "force-volume")]
    force_volume: Option<PartialForceVolumeConfig>,
}

impl PartialSyfosConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `path` if given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_with_generate_args(mut self, args: &GenerateArgs) -> Result<SynthesisConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let material = self.merge_material(&args.material, &defaults)?;

        let measurement = self.measurement.take().unwrap_or_default();
        let force_volume = self.force_volume.take().unwrap_or_default();

        let start_distance = args
            .start_distance
            .or(measurement.start_distance)
            .unwrap_or(defaults.start_distance);
        let step_size = args
            .step_size
            .or(measurement.step_size)
            .unwrap_or(defaults.step_size);
        let maximum_piezo = args
            .maximum_piezo
            .or(measurement.maximum_piezo)
            .unwrap_or(defaults.maximum_piezo);
        let replicas = args
            .replicas
            .or(force_volume.replicas)
            .unwrap_or(defaults.replicas);
        let noise = args.noise.or(force_volume.noise).unwrap_or(defaults.noise);
        let virtual_deflection_offset = args
            .virtual_deflection
            .or(force_volume.virtual_deflection_offset)
            .unwrap_or(defaults.virtual_deflection_offset);
        let topography_offset = args
            .topography
            .or(force_volume.topography_offset)
            .unwrap_or(defaults.topography_offset);

        warn_outside_recommended_ranges(&[
            ("start-distance", start_distance),
            ("step-size", step_size),
            ("maximum-piezo", maximum_piezo),
            ("replicas", replicas as f64),
            ("noise", noise),
            ("virtual-deflection-offset", virtual_deflection_offset),
            ("topography-offset", topography_offset),
        ]);

        SynthesisConfigBuilder::new()
            .material(material)
            .start_distance(start_distance)
            .step_size(step_size)
            .maximum_piezo(maximum_piezo)
            .replica_count(replicas)
            .noise_std_dev(noise)
            .virtual_deflection_offset(virtual_deflection_offset)
            .topography_offset(topography_offset)
            .seed(args.seed.or(force_volume.seed))
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Only the `[probe]` and `[sample]` sections take part in an analysis.
    pub fn merge_with_analyze_args(mut self, args: &AnalyzeArgs) -> Result<MaterialParameters> {
        self.apply_set_values(&args.set_values)?;
        self.merge_material(&args.material, &DefaultsConfig::default())
    }

    /// Resolves probe and sample presets, applies per-property overrides on top of them
    /// and combines everything into the composite material constants.
    fn merge_material(
        &mut self,
        args: &MaterialArgs,
        defaults: &DefaultsConfig,
    ) -> Result<MaterialParameters> {
        let probe = self.probe.take().unwrap_or_default();
        let sample = self.sample.take().unwrap_or_default();

        let probe_properties = resolve_properties(
            args.probe.as_deref().or(probe.material.as_deref()),
            defaults.probe,
            (probe.youngs_modulus, probe.poisson_ratio, probe.hamaker),
        )?;
        let sample_properties = resolve_properties(
            args.sample.as_deref().or(sample.material.as_deref()),
            defaults.sample,
            (sample.youngs_modulus, sample.poisson_ratio, sample.hamaker),
        )?;

        let spring_constant = args
            .spring_constant
            .or(probe.spring_constant)
            .unwrap_or(defaults.spring_constant);
        let tip_radius = args
            .tip_radius
            .or(probe.tip_radius)
            .unwrap_or(defaults.tip_radius);

        warn_outside_recommended_ranges(&[
            ("youngs-modulus", probe_properties.youngs_modulus),
            ("poisson-ratio", probe_properties.poisson_ratio),
            ("hamaker", probe_properties.hamaker),
            ("youngs-modulus", sample_properties.youngs_modulus),
            ("poisson-ratio", sample_properties.poisson_ratio),
            ("hamaker", sample_properties.hamaker),
            ("spring-constant", spring_constant),
            ("tip-radius", tip_radius),
        ]);

        MaterialParameters::from_probe_and_sample(
            spring_constant,
            tip_radius,
            &probe_properties,
            &sample_properties,
        )
        .map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) =
                parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

            match key {
                "probe.material" => {
                    self.probe.get_or_insert_with(Default::default).material =
                        Some(value_str.to_string());
                }
                "probe.youngs-modulus" => {
                    self.probe.get_or_insert_with(Default::default).youngs_modulus =
                        Some(parse_value(key, value_str, "float")?);
                }
                "probe.poisson-ratio" => {
                    self.probe.get_or_insert_with(Default::default).poisson_ratio =
                        Some(parse_value(key, value_str, "float")?);
                }
                "probe.hamaker" => {
                    self.probe.get_or_insert_with(Default::default).hamaker =
                        Some(parse_value(key, value_str, "float")?);
                }
                "probe.spring-constant" => {
                    self.probe
                        .get_or_insert_with(Default::default)
                        .spring_constant = Some(parse_value(key, value_str, "float")?);
                }
                "probe.tip-radius" => {
                    self.probe.get_or_insert_with(Default::default).tip_radius =
                        Some(parse_value(key, value_str, "float")?);
                }
                "sample.material" => {
                    self.sample.get_or_insert_with(Default::default).material =
                        Some(value_str.to_string());
                }
                "sample.youngs-modulus" => {
                    self.sample
                        .get_or_insert_with(Default::default)
                        .youngs_modulus = Some(parse_value(key, value_str, "float")?);
                }
                "sample.poisson-ratio" => {
                    self.sample.get_or_insert_with(Default::default).poisson_ratio =
                        Some(parse_value(key, value_str, "float")?);
                }
                "sample.hamaker" => {
                    self.sample.get_or_insert_with(Default::default).hamaker =
                        Some(parse_value(key, value_str, "float")?);
                }
                "measurement.start-distance" => {
                    self.measurement
                        .get_or_insert_with(Default::default)
                        .start_distance = Some(parse_value(key, value_str, "float")?);
                }
                "measurement.step-size" => {
                    self.measurement.get_or_insert_with(Default::default).step_size =
                        Some(parse_value(key, value_str, "float")?);
                }
                "measurement.maximum-piezo" => {
                    self.measurement
                        .get_or_insert_with(Default::default)
                        .maximum_piezo = Some(parse_value(key, value_str, "float")?);
                }
                "force-volume.replicas" => {
                    self.force_volume
                        .get_or_insert_with(Default::default)
                        .replicas = Some(parse_value(key, value_str, "integer")?);
                }
                "force-volume.noise" => {
                    self.force_volume.get_or_insert_with(Default::default).noise =
                        Some(parse_value(key, value_str, "float")?);
                }
                "force-volume.virtual-deflection-offset" => {
                    self.force_volume
                        .get_or_insert_with(Default::default)
                        .virtual_deflection_offset = Some(parse_value(key, value_str, "float")?);
                }
                "force-volume.topography-offset" => {
                    self.force_volume
                        .get_or_insert_with(Default::default)
                        .topography_offset = Some(parse_value(key, value_str, "float")?);
                }
                "force-volume.seed" => {
                    self.force_volume.get_or_insert_with(Default::default).seed =
                        Some(parse_value(key, value_str, "integer")?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

/// Starts from the named preset (or `fallback`) and replaces every property that was
/// given explicitly.
fn resolve_properties(
    preset: Option<&str>,
    fallback: &str,
    (youngs_modulus, poisson_ratio, hamaker): (Option<f64>, Option<f64>, Option<f64>),
) -> Result<MaterialProperties> {
    let name = preset.unwrap_or(fallback);
    let base = parser::parse_material(name).map_err(|e| CliError::Argument(e.to_string()))?;
    debug!(material = name, "Resolved material preset.");

    Ok(MaterialProperties {
        youngs_modulus: youngs_modulus.unwrap_or(base.youngs_modulus),
        poisson_ratio: poisson_ratio.unwrap_or(base.poisson_ratio),
        hamaker: hamaker.unwrap_or(base.hamaker),
    })
}

fn warn_outside_recommended_ranges(values: &[(&'static str, f64)]) {
    for &(key, value) in values {
        let Some(&(min, max)) = RECOMMENDED_RANGES.get(key) else {
            continue;
        };
        if !(min..=max).contains(&value) {
            warn!(
                parameter = key,
                value,
                min,
                max,
                "Value lies outside the recommended range; the resulting curve may be unphysical."
            );
        }
    }
}
