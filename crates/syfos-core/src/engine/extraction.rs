use super::error::EngineError;
use super::segmentation::split_curve;
use crate::core::models::curve::{Curve, CurveSegment};
use crate::core::models::parameters::MaterialParameters;
use crate::core::models::series::{ApproachParameterSeries, ContactParameterSeries};
use tracing::{debug, instrument};

/// Inverts `d = -A R / (6 k_c D^2)` for each of `k_c`, `R` and `A` at every sample,
/// holding the other two at their known values. `D` is the true distance.
pub fn extract_approach_parameters(
    segment: CurveSegment<'_>,
    material: &MaterialParameters,
) -> ApproachParameterSeries {
    let k_c = material.spring_constant();
    let radius = material.tip_radius();
    let hamaker = material.hamaker_constant();

    let mut series = ApproachParameterSeries::with_capacity(segment.len());
    for (piezo, deflection) in segment.samples() {
        let distance = piezo - deflection;
        let distance_sq = distance * distance;
        // -6 k_c d D^2 equals A R for an exact sample.
        let product = -6.0 * k_c * deflection * distance_sq;

        series.true_distance.push(distance);
        series.force.push(deflection * k_c);
        series
            .spring_constant
            .push(-(hamaker * radius) / (6.0 * distance_sq * deflection));
        series.radius.push(product / hamaker);
        series.hamaker.push(product / radius);
    }
    series
}

/// Inverts `k_c d = E_tot sqrt(R) delta^(3/2)` for each of `k_c`, `R` and `E_tot` at
/// every sample. `delta` is the deformation.
pub fn extract_contact_parameters(
    segment: CurveSegment<'_>,
    material: &MaterialParameters,
) -> ContactParameterSeries {
    let k_c = material.spring_constant();
    let sqrt_radius = material.tip_radius().sqrt();
    let modulus = material.reduced_modulus();

    let mut series = ContactParameterSeries::with_capacity(segment.len());
    for (piezo, deflection) in segment.samples() {
        let deformation = piezo - deflection;
        let indentation_term = deformation.powf(1.5);
        let elastic_force = k_c * deflection;

        series.deformation.push(deformation);
        series.force.push(elastic_force);
        series
            .spring_constant
            .push(modulus * sqrt_radius * indentation_term / deflection);
        // Squared form of k_c d / (E_tot delta^(3/2)); stays NaN for negative deformation.
        let radius_root = elastic_force / (modulus * indentation_term);
        series.radius.push(radius_root * radius_root);
        series
            .reduced_modulus
            .push(elastic_force / (sqrt_radius * indentation_term));
    }
    series
}

/// Segments the curve and evaluates both parameter series. Samples where an inversion
/// is undefined (zero deflection, non-positive deformation) yield non-finite values;
/// they are kept so the series stay aligned with the segments.
///
/// # Errors
///
/// [`EngineError::BoundaryNotFound`] if the curve cannot be segmented.
#[instrument(skip_all, name = "parameter_extraction", fields(samples = curve.len()))]
pub fn extract_parameters(
    curve: &Curve,
    material: &MaterialParameters,
) -> Result<(ApproachParameterSeries, ContactParameterSeries), EngineError> {
    let segments = split_curve(curve)?;

    let approach = extract_approach_parameters(segments.approach, material);
    let contact = extract_contact_parameters(segments.contact, material);

    debug!(
        approach_samples = approach.len(),
        contact_samples = contact.len(),
        "Parameter series extracted."
    );
    Ok((approach, contact))
}
