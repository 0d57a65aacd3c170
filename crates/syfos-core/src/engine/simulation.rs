use super::error::EngineError;
use crate::core::models::curve::Curve;
use crate::core::models::parameters::{MaterialParameters, MeasurementSetup};
use crate::core::physics::regimes::{
    Regime, approach_continues, approach_deflection, attraction_continues,
    attraction_deflection, contact_continues, contact_deflection,
};
use std::ops::Range;
use tracing::{debug, instrument};

/// Index ranges of the three regimes within a simulated curve. The ranges are
/// contiguous and together cover the whole curve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegimeRanges {
    pub approach: Range<usize>,
    pub attraction: Range<usize>,
    pub contact: Range<usize>,
}

impl RegimeRanges {
    pub fn get(&self, regime: Regime) -> Range<usize> {
        match regime {
            Regime::Approach => self.approach.clone(),
            Regime::Attraction => self.attraction.clone(),
            Regime::Contact => self.contact.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedCurve {
    pub curve: Curve,
    pub regimes: RegimeRanges,
}

/// Outcome of evaluating one regime at one piezo index.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    /// The sample belongs to the current regime; move to the next index.
    Accept(f64),
    /// The current regime is finished; the same index is handed to the next regime.
    Handover,
    /// The sample is the last one of the curve.
    Finish(f64),
}

struct Simulation<'a> {
    material: &'a MaterialParameters,
    measurement: &'a MeasurementSetup,
    psi: f64,
    piezo: Vec<f64>,
    deflection: Vec<f64>,
}

impl<'a> Simulation<'a> {
    fn new(material: &'a MaterialParameters, measurement: &'a MeasurementSetup) -> Self {
        Self {
            material,
            measurement,
            psi: material.contact_psi(),
            piezo: vec![measurement.start_distance],
            deflection: vec![0.0],
        }
    }

    fn last_deflection(&self) -> f64 {
        self.deflection.last().copied().unwrap_or(0.0)
    }

    fn step(&self, regime: Regime, piezo: f64) -> Result<Step, EngineError> {
        let maximum_piezo = self.measurement.maximum_piezo;
        match regime {
            Regime::Approach => {
                let deflection = approach_deflection(self.material, piezo, self.last_deflection());
                if approach_continues(
                    self.material.jump_to_contact(),
                    deflection,
                    piezo,
                    maximum_piezo,
                ) {
                    Ok(Step::Accept(deflection))
                } else if piezo > maximum_piezo {
                    Err(EngineError::RegimeExhausted {
                        regime,
                        maximum_piezo,
                    })
                } else {
                    Ok(Step::Handover)
                }
            }
            Regime::Attraction => {
                let deflection = attraction_deflection(piezo);
                if attraction_continues(deflection, piezo, maximum_piezo) {
                    Ok(Step::Accept(deflection))
                } else if deflection < 0.0 {
                    Err(EngineError::RegimeExhausted {
                        regime,
                        maximum_piezo,
                    })
                } else {
                    Ok(Step::Handover)
                }
            }
            Regime::Contact => {
                let deflection = contact_deflection(self.psi, piezo);
                if contact_continues(piezo, maximum_piezo) {
                    Ok(Step::Accept(deflection))
                } else {
                    Ok(Step::Finish(deflection))
                }
            }
        }
    }

    fn push(&mut self, piezo: f64, deflection: f64) {
        self.piezo.push(piezo);
        self.deflection.push(deflection);
    }

    fn run(mut self) -> Result<SimulatedCurve, EngineError> {
        let mut regime = Regime::Approach;
        let mut regime_start = 0;
        let mut ranges = RegimeRanges::default();
        let mut index = 1;

        loop {
            let piezo = self.measurement.piezo_at(index);
            match self.step(regime, piezo)? {
                Step::Accept(deflection) => {
                    self.push(piezo, deflection);
                    index += 1;
                }
                Step::Handover => {
                    let end = self.piezo.len();
                    debug!(%regime, samples = end - regime_start, piezo, "Regime finished.");
                    assign_range(&mut ranges, regime, regime_start..end);
                    regime_start = end;
                    // Contact never hands over, so a successor always exists here.
                    regime = regime.next().unwrap_or(Regime::Contact);
                }
                Step::Finish(deflection) => {
                    self.push(piezo, deflection);
                    let end = self.piezo.len();
                    debug!(%regime, samples = end - regime_start, piezo, "Regime finished.");
                    assign_range(&mut ranges, regime, regime_start..end);
                    break;
                }
            }
        }

        Ok(SimulatedCurve {
            curve: Curve::from_samples(self.piezo, self.deflection),
            regimes: ranges,
        })
    }
}

fn assign_range(ranges: &mut RegimeRanges, regime: Regime, range: Range<usize>) {
    match regime {
        Regime::Approach => ranges.approach = range,
        Regime::Attraction => ranges.attraction = range,
        Regime::Contact => ranges.contact = range,
    }
}

/// Simulates the noiseless curve and reports where each regime lies within it.
///
/// The approach starts at `(start_distance, 0)`. The approach sample that falls below
/// the jump-to-contact deflection is discarded and its piezo index becomes the first
/// attraction sample; the first index whose attraction deflection is non-negative
/// becomes the first contact sample. Contact stops after the first sample beyond
/// `maximum_piezo`.
///
/// # Errors
///
/// Returns [`EngineError::RegimeExhausted`] if the approach or attraction regime
/// reaches `maximum_piezo` before its termination condition holds, and
/// [`EngineError::Parameter`] for a malformed piezo axis.
#[instrument(skip_all, name = "ideal_curve_simulation")]
pub fn simulate_ideal_curve(
    material: &MaterialParameters,
    measurement: &MeasurementSetup,
) -> Result<SimulatedCurve, EngineError> {
    measurement.validate()?;
    let simulated = Simulation::new(material, measurement).run()?;
    debug!(
        samples = simulated.curve.len(),
        approach = ?simulated.regimes.approach,
        attraction = ?simulated.regimes.attraction,
        contact = ?simulated.regimes.contact,
        "Ideal curve simulated."
    );
    Ok(simulated)
}

/// Generates the noiseless force-distance curve. See [`simulate_ideal_curve`].
pub fn generate_ideal_curve(
    material: &MaterialParameters,
    measurement: &MeasurementSetup,
) -> Result<Curve, EngineError> {
    simulate_ideal_curve(material, measurement).map(|simulated| simulated.curve)
}
