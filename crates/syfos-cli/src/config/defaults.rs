use phf::{Map, phf_map};
use syfos::core::models::parameters::MaterialProperties;

/// Built-in probe and sample presets, keyed by normalized name.
pub static MATERIALS: Map<&'static str, MaterialProperties> = phf_map! {
    "silicon" => MaterialProperties {
        youngs_modulus: 170e9,
        poisson_ratio: 0.22,
        hamaker: 66e-21,
    },
    "silicon-dioxide" => MaterialProperties {
        youngs_modulus: 72e9,
        poisson_ratio: 0.3,
        hamaker: 66e-21,
    },
    "gold" => MaterialProperties {
        youngs_modulus: 78e9,
        poisson_ratio: 0.42,
        hamaker: 90e-21,
    },
    "pmma" => MaterialProperties {
        youngs_modulus: 2.2e9,
        poisson_ratio: 0.35,
        hamaker: 1.47e-21,
    },
    "ps" => MaterialProperties {
        youngs_modulus: 3.4e9,
        poisson_ratio: 0.35,
        hamaker: 13e-21,
    },
    "epoxy" => MaterialProperties {
        youngs_modulus: 3.5e9,
        poisson_ratio: 0.3,
        hamaker: 25e-21,
    },
};

/// Ranges the inputs are expected to fall into for a physically sensible curve.
/// Values outside are accepted but reported with a warning.
pub static RECOMMENDED_RANGES: Map<&'static str, (f64, f64)> = phf_map! {
    "youngs-modulus" => (1e6, 300e9),
    "poisson-ratio" => (0.0, 0.5),
    "hamaker" => (1e-21, 450e-21),
    "spring-constant" => (0.001, 100.0),
    "tip-radius" => (1e-9, 10e-6),
    "start-distance" => (-10e-6, 0.0),
    "step-size" => (0.01e-9, 1e-9),
    "maximum-piezo" => (0.0, 1e-6),
    "replicas" => (1.0, 1000.0),
    "noise" => (0.0, 1e-9),
    "virtual-deflection-offset" => (0.0, 3e-6),
    "topography-offset" => (0.0, 10e-6),
};

pub struct DefaultsConfig {
    pub probe: &'static str,
    pub sample: &'static str,
    pub spring_constant: f64,
    pub tip_radius: f64,
    pub start_distance: f64,
    pub step_size: f64,
    pub maximum_piezo: f64,
    pub replicas: usize,
    pub noise: f64,
    pub virtual_deflection_offset: f64,
    pub topography_offset: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            probe: "silicon",
            sample: "gold",
            spring_constant: 1.0,
            tip_radius: 25e-9,
            start_distance: -10e-9,
            step_size: 0.2e-9,
            maximum_piezo: 30e-9,
            replicas: 1,
            noise: 1e-10,
            virtual_deflection_offset: 3e-9,
            topography_offset: 10e-9,
        }
    }
}
