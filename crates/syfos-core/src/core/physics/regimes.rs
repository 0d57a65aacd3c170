use super::contact::solve_contact_deflection;
use crate::core::models::parameters::MaterialParameters;
use std::fmt;

/// The three physical regimes a simulated approach passes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    /// Long-range van der Waals attraction before the snap-in.
    Approach,
    /// Tip adhered to the surface, deflection tracks the piezo.
    Attraction,
    /// Elastic Hertzian indentation.
    Contact,
}

impl Regime {
    pub fn name(&self) -> &'static str {
        match self {
            Regime::Approach => "approach",
            Regime::Attraction => "attraction",
            Regime::Contact => "contact",
        }
    }

    pub fn next(&self) -> Option<Regime> {
        match self {
            Regime::Approach => Some(Regime::Attraction),
            Regime::Attraction => Some(Regime::Contact),
            Regime::Contact => None,
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deflection under the sphere-plane van der Waals force, evaluated at the tip-sample
/// distance left by the previous deflection.
#[inline]
pub fn approach_deflection(
    material: &MaterialParameters,
    piezo: f64,
    previous_deflection: f64,
) -> f64 {
    let distance = piezo - previous_deflection;
    -(material.hamaker_constant() * material.tip_radius())
        / (6.0 * material.spring_constant() * distance * distance)
}

#[inline]
pub fn attraction_deflection(piezo: f64) -> f64 {
    piezo
}

#[inline]
pub fn contact_deflection(psi: f64, piezo: f64) -> f64 {
    solve_contact_deflection(psi, piezo)
}

/// Approach keeps stepping while the tip has not snapped in and the piezo bound holds.
#[inline]
pub fn approach_continues(
    jump_to_contact: f64,
    deflection: f64,
    piezo: f64,
    maximum_piezo: f64,
) -> bool {
    deflection > jump_to_contact && piezo <= maximum_piezo
}

/// Attraction keeps stepping while the cantilever is still bent towards the sample.
#[inline]
pub fn attraction_continues(deflection: f64, piezo: f64, maximum_piezo: f64) -> bool {
    deflection < 0.0 && piezo <= maximum_piezo
}

/// Contact runs until the piezo bound is passed.
#[inline]
pub fn contact_continues(piezo: f64, maximum_piezo: f64) -> bool {
    piezo <= maximum_piezo
}
