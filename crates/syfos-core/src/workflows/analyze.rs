use crate::core::models::curve::Curve;
use crate::core::models::parameters::MaterialParameters;
use crate::core::models::series::{ApproachParameterSeries, ContactParameterSeries};
use crate::engine::error::EngineError;
use crate::engine::extraction::extract_parameters;
use tracing::{info, instrument, warn};

/// Mean of one extracted series compared against the value the curve was generated with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterEstimate {
    pub expected: f64,
    /// Mean over the finite samples; `None` if there are none.
    pub mean: Option<f64>,
    /// Number of finite samples the mean is taken over.
    pub samples: usize,
}

impl ParameterEstimate {
    fn from_series(series: &[f64], expected: f64) -> Self {
        let (sum, samples) = series
            .iter()
            .filter(|value| value.is_finite())
            .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
        Self {
            expected,
            mean: (samples > 0).then(|| sum / samples as f64),
            samples,
        }
    }

    /// `|mean - expected| / |expected|`.
    pub fn relative_deviation(&self) -> Option<f64> {
        self.mean
            .map(|mean| ((mean - self.expected) / self.expected).abs())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproachSummary {
    pub spring_constant: ParameterEstimate,
    pub radius: ParameterEstimate,
    pub hamaker: ParameterEstimate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSummary {
    pub spring_constant: ParameterEstimate,
    pub radius: ParameterEstimate,
    pub reduced_modulus: ParameterEstimate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub approach: ApproachParameterSeries,
    pub contact: ContactParameterSeries,
    pub approach_summary: ApproachSummary,
    pub contact_summary: ContactSummary,
}

impl AnalysisResult {
    /// Largest relative deviation over all six estimates, ignoring estimates without
    /// finite samples.
    pub fn worst_relative_deviation(&self) -> Option<f64> {
        [
            self.approach_summary.spring_constant,
            self.approach_summary.radius,
            self.approach_summary.hamaker,
            self.contact_summary.spring_constant,
            self.contact_summary.radius,
            self.contact_summary.reduced_modulus,
        ]
        .iter()
        .filter_map(ParameterEstimate::relative_deviation)
        .reduce(f64::max)
    }
}

/// Recovers per-sample parameter series from `curve` and summarizes them against the
/// known `material`.
#[instrument(skip_all, name = "analysis_workflow", fields(samples = curve.len()))]
pub fn run(curve: &Curve, material: &MaterialParameters) -> Result<AnalysisResult, EngineError> {
    let (approach, contact) = extract_parameters(curve, material)?;

    if approach.is_empty() {
        warn!("The approach segment is empty; approach parameters cannot be estimated.");
    }
    if contact.is_empty() {
        warn!("The contact segment is empty; contact parameters cannot be estimated.");
    }

    let approach_summary = ApproachSummary {
        spring_constant: ParameterEstimate::from_series(
            &approach.spring_constant,
            material.spring_constant(),
        ),
        radius: ParameterEstimate::from_series(&approach.radius, material.tip_radius()),
        hamaker: ParameterEstimate::from_series(&approach.hamaker, material.hamaker_constant()),
    };
    let contact_summary = ContactSummary {
        spring_constant: ParameterEstimate::from_series(
            &contact.spring_constant,
            material.spring_constant(),
        ),
        radius: ParameterEstimate::from_series(&contact.radius, material.tip_radius()),
        reduced_modulus: ParameterEstimate::from_series(
            &contact.reduced_modulus,
            material.reduced_modulus(),
        ),
    };

    let result = AnalysisResult {
        approach,
        contact,
        approach_summary,
        contact_summary,
    };
    info!(
        approach_samples = result.approach.len(),
        contact_samples = result.contact.len(),
        worst_deviation = ?result.worst_relative_deviation(),
        "Analysis complete."
    );
    Ok(result)
}
