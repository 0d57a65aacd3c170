use crate::core::physics::composite::{
    compute_hamaker, compute_jump_to_contact, compute_reduced_modulus,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Parameter '{name}' must be strictly positive, got {value:e}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("Parameter '{name}' must not be negative, got {value:e}")]
    Negative { name: &'static str, value: f64 },
    #[error("Parameter '{name}' must be a finite number, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("Parameter '{name}' must lie within [{min}, {max}], got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("At least one replica curve is required")]
    NoReplicas,
    #[error(
        "Step size {step_size:e} is below the floating-point resolution of piezo positions around {magnitude:e}"
    )]
    StepBelowResolution { step_size: f64, magnitude: f64 },
    #[error("The piezo axis would hold about {samples} samples, more than the limit of {limit}")]
    TooManySamples { samples: u64, limit: u64 },
}

/// Upper bound on the number of piezo positions of one simulated curve.
pub const MAX_CURVE_SAMPLES: u64 = 10_000_000;

/// Smallest step, in units of `f64::EPSILON` times the largest piezo magnitude, for
/// which `start + step * i` is strictly increasing in `i`.
const MIN_STEP_IN_ULPS: f64 = 16.0;

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NotFinite { name, value })
    }
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ParameterError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::NotPositive { name, value })
    }
}

pub(crate) fn require_non_negative(
    name: &'static str,
    value: f64,
) -> Result<f64, ParameterError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::Negative { name, value })
    }
}

/// Elastic and van der Waals properties of a single body (probe or sample).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Young's modulus in Pa.
    pub youngs_modulus: f64,
    pub poisson_ratio: f64,
    /// Hamaker constant in J.
    pub hamaker: f64,
}

impl MaterialProperties {
    pub fn new(youngs_modulus: f64, poisson_ratio: f64, hamaker: f64) -> Self {
        Self {
            youngs_modulus,
            poisson_ratio,
            hamaker,
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        require_positive("youngs_modulus", self.youngs_modulus)?;
        require_positive("hamaker", self.hamaker)?;
        let nu = require_finite("poisson_ratio", self.poisson_ratio)?;
        if !(0.0..=0.5).contains(&nu) {
            return Err(ParameterError::OutOfRange {
                name: "poisson_ratio",
                value: nu,
                min: 0.0,
                max: 0.5,
            });
        }
        Ok(())
    }
}

/// Material and geometry of the virtual probe/sample system.
///
/// The jump-to-contact deflection is derived once on construction and the value is
/// immutable afterwards; all fields are only readable through accessors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParameters {
    spring_constant: f64,
    tip_radius: f64,
    reduced_modulus: f64,
    hamaker_constant: f64,
    jump_to_contact: f64,
}

impl MaterialParameters {
    /// Builds the parameter set from the composite constants.
    ///
    /// # Errors
    ///
    /// Returns [`ParameterError`] if any of the four constants is not a strictly
    /// positive finite number.
    pub fn new(
        spring_constant: f64,
        tip_radius: f64,
        reduced_modulus: f64,
        hamaker_constant: f64,
    ) -> Result<Self, ParameterError> {
        let spring_constant = require_positive("spring_constant", spring_constant)?;
        let tip_radius = require_positive("tip_radius", tip_radius)?;
        let reduced_modulus = require_positive("reduced_modulus", reduced_modulus)?;
        let hamaker_constant = require_positive("hamaker_constant", hamaker_constant)?;

        Ok(Self {
            spring_constant,
            tip_radius,
            reduced_modulus,
            hamaker_constant,
            jump_to_contact: compute_jump_to_contact(hamaker_constant, tip_radius, spring_constant),
        })
    }

    /// Builds the parameter set from raw probe and sample properties, combining them
    /// into the effective Hamaker constant and reduced modulus.
    pub fn from_probe_and_sample(
        spring_constant: f64,
        tip_radius: f64,
        probe: &MaterialProperties,
        sample: &MaterialProperties,
    ) -> Result<Self, ParameterError> {
        probe.validate()?;
        sample.validate()?;

        let hamaker = compute_hamaker(probe.hamaker, sample.hamaker);
        let reduced_modulus = compute_reduced_modulus(
            probe.poisson_ratio,
            probe.youngs_modulus,
            sample.poisson_ratio,
            sample.youngs_modulus,
        );
        Self::new(spring_constant, tip_radius, reduced_modulus, hamaker)
    }

    #[inline]
    pub fn spring_constant(&self) -> f64 {
        self.spring_constant
    }
    #[inline]
    pub fn tip_radius(&self) -> f64 {
        self.tip_radius
    }
    #[inline]
    pub fn reduced_modulus(&self) -> f64 {
        self.reduced_modulus
    }
    #[inline]
    pub fn hamaker_constant(&self) -> f64 {
        self.hamaker_constant
    }
    #[inline]
    pub fn jump_to_contact(&self) -> f64 {
        self.jump_to_contact
    }

    /// Substitution constant of the Hertzian cubic, `k_c / (sqrt(R) * E_tot)`.
    #[inline]
    pub fn contact_psi(&self) -> f64 {
        self.spring_constant / (self.tip_radius.sqrt() * self.reduced_modulus)
    }
}

/// Piezo axis of the virtual measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSetup {
    /// Piezo position of the first sample, typically negative (tip above the surface).
    pub start_distance: f64,
    pub step_size: f64,
    pub maximum_piezo: f64,
}

impl MeasurementSetup {
    pub fn new(start_distance: f64, step_size: f64, maximum_piezo: f64) -> Self {
        Self {
            start_distance,
            step_size,
            maximum_piezo,
        }
    }

    /// Checks that the piezo axis is well formed: every step must advance the piezo
    /// position and the axis up to `maximum_piezo` must stay within
    /// [`MAX_CURVE_SAMPLES`]. A `maximum_piezo` below `start_distance` is not an error
    /// here; the simulation reports the regime it cuts short.
    pub fn validate(&self) -> Result<(), ParameterError> {
        let start = require_finite("start_distance", self.start_distance)?;
        let step_size = require_positive("step_size", self.step_size)?;
        let maximum = require_finite("maximum_piezo", self.maximum_piezo)?;

        let magnitude = start.abs().max(maximum.abs());
        if step_size <= MIN_STEP_IN_ULPS * f64::EPSILON * magnitude {
            return Err(ParameterError::StepBelowResolution {
                step_size,
                magnitude,
            });
        }

        if maximum > start {
            // Float-to-int casts saturate, so a huge ratio still compares correctly.
            let samples = ((maximum - start) / step_size).ceil() as u64 + 2;
            if samples > MAX_CURVE_SAMPLES {
                return Err(ParameterError::TooManySamples {
                    samples,
                    limit: MAX_CURVE_SAMPLES,
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn piezo_at(&self, index: usize) -> f64 {
        self.start_distance + self.step_size * index as f64
    }
}

/// Replication and artifact settings of a synthetic force volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceVolumeConfig {
    pub replica_count: usize,
    /// Standard deviation of the Gaussian deflection noise, in m.
    pub noise_std_dev: f64,
    pub virtual_deflection_offset: f64,
    pub topography_offset: f64,
}

impl ForceVolumeConfig {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.replica_count == 0 {
            return Err(ParameterError::NoReplicas);
        }
        require_non_negative("noise_std_dev", self.noise_std_dev)?;
        require_finite("virtual_deflection_offset", self.virtual_deflection_offset)?;
        require_finite("topography_offset", self.topography_offset)?;
        Ok(())
    }
}
