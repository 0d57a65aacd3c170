use crate::core::io::csv::ForceVolumeMetadata;
use crate::core::models::curve::ForceVolume;
use crate::engine::config::SynthesisConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::simulation::simulate_ideal_curve;
use crate::engine::synthesis::synthesize_with_reporter;
use rand::{Rng, thread_rng};
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    pub force_volume: ForceVolume,
    /// Reduced modulus, jump-to-contact and Hamaker constant of the generating material.
    pub metadata: ForceVolumeMetadata,
    /// Seed the replica noise was drawn with; pass it back to reproduce the volume.
    pub seed: u64,
}

#[instrument(skip_all, name = "synthesis_workflow")]
pub fn run(
    config: &SynthesisConfig,
    reporter: &ProgressReporter,
) -> Result<SynthesisResult, EngineError> {
    // === Phase 1: Ideal curve ===
    let simulated = reporter.phase("Ideal Curve", || {
        simulate_ideal_curve(&config.material, &config.measurement)
    })?;
    info!(
        samples = simulated.curve.len(),
        approach = simulated.regimes.approach.len(),
        attraction = simulated.regimes.attraction.len(),
        contact = simulated.regimes.contact.len(),
        "Ideal curve generated."
    );

    // === Phase 2: Force volume ===
    let seed = match config.seed {
        Some(seed) => seed,
        None => {
            let seed = thread_rng().r#gen::<u64>();
            info!(seed, "No seed configured, drew a random one.");
            reporter.report(Progress::Message(format!(
                "Drew random seed {seed}; pass it back to reproduce this volume."
            )));
            seed
        }
    };

    let force_volume = reporter.phase("Replicas", || {
        synthesize_with_reporter(simulated.curve, &config.force_volume, seed, reporter)
    })?;

    info!(
        curves = force_volume.len(),
        replicas = force_volume.replicas().len(),
        "Force volume synthesized."
    );

    Ok(SynthesisResult {
        force_volume,
        metadata: ForceVolumeMetadata::from(&config.material),
        seed,
    })
}
