use super::error::{Boundary, EngineError};
use crate::core::models::curve::{Curve, CurveSegment};
use tracing::{debug, instrument};

/// Approach and contact parts of a curve, as used by parameter extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSegments<'a> {
    pub approach: CurveSegment<'a>,
    pub contact: CurveSegment<'a>,
}

fn peak_index(deflection: &[f64]) -> Option<usize> {
    deflection
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, _)| index)
}

/// Index of the last sample before the steepest single-step drop in deflection,
/// searched only up to the deflection maximum.
fn jump_index(deflection: &[f64], peak: usize) -> Option<usize> {
    deflection[..=peak]
        .windows(2)
        .enumerate()
        .map(|(index, pair)| (index, pair[1] - pair[0]))
        .filter(|(_, step)| *step < 0.0)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, _)| index)
}

/// Locates the end of the zero line: the last sample at or before the jump-to-contact
/// discontinuity whose deflection is still non-negative.
///
/// # Errors
///
/// [`EngineError::BoundaryNotFound`] if the curve is empty, never drops before its
/// maximum, or has no non-negative sample before the drop.
pub fn locate_approach_end(curve: &Curve) -> Result<usize, EngineError> {
    let not_found = |reason: &'static str| EngineError::BoundaryNotFound {
        boundary: Boundary::ApproachEnd,
        reason,
    };
    let deflection = curve.deflection();

    let peak = peak_index(deflection).ok_or(not_found("the curve is empty"))?;
    let jump = jump_index(deflection, peak)
        .ok_or(not_found("deflection never decreases before its maximum"))?;

    deflection[..=jump]
        .iter()
        .rposition(|&d| d >= 0.0)
        .ok_or(not_found("no non-negative deflection precedes the jump to contact"))
}

/// Locates the onset of mechanical contact: the last sample before the deflection
/// maximum whose deflection is not positive.
///
/// # Errors
///
/// [`EngineError::BoundaryNotFound`] if the curve is empty or positive everywhere
/// before its maximum.
pub fn locate_contact_start(curve: &Curve) -> Result<usize, EngineError> {
    let not_found = |reason: &'static str| EngineError::BoundaryNotFound {
        boundary: Boundary::ContactStart,
        reason,
    };
    let deflection = curve.deflection();

    let peak = peak_index(deflection).ok_or(not_found("the curve is empty"))?;

    deflection[..peak]
        .iter()
        .rposition(|&d| d <= 0.0)
        .ok_or(not_found("no non-positive deflection precedes the maximum"))
}

/// Splits a curve into the approach segment (after the zero line up to the last
/// sample before the jump) and the contact segment (after the contact onset up to
/// the deflection maximum).
#[instrument(skip_all, name = "curve_segmentation", fields(samples = curve.len()))]
pub fn split_curve(curve: &Curve) -> Result<CurveSegments<'_>, EngineError> {
    let approach_end = locate_approach_end(curve)?;
    let contact_start = locate_contact_start(curve)?;

    let deflection = curve.deflection();
    let peak = peak_index(deflection).unwrap_or(0);
    let jump = jump_index(deflection, peak).unwrap_or(approach_end);

    debug!(approach_end, jump, contact_start, peak, "Curve boundaries located.");

    Ok(CurveSegments {
        approach: curve.segment(approach_end + 1..jump + 1)?,
        contact: curve.segment(contact_start + 1..peak + 1)?,
    })
}
