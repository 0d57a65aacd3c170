use super::error::EngineError;
use super::progress::ProgressReporter;
use crate::core::models::curve::{Curve, ForceVolume};
use crate::core::models::parameters::ForceVolumeConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds a force volume from an ideal curve without progress reporting.
/// See [`synthesize_with_reporter`].
pub fn synthesize(
    ideal: Curve,
    config: &ForceVolumeConfig,
    seed: u64,
) -> Result<ForceVolume, EngineError> {
    synthesize_with_reporter(ideal, config, seed, &ProgressReporter::new())
}

/// Shifts the ideal curve by the artifact offsets and derives `replica_count` noisy
/// replicas from the shifted curve.
///
/// Replica `i` draws its noise from stream `i` of a ChaCha generator seeded with
/// `seed`, so the result depends only on the inputs and not on how replicas are
/// scheduled.
///
/// # Errors
///
/// Returns [`EngineError::Parameter`] for an invalid configuration (negative noise,
/// zero replicas, non-finite offsets) and [`EngineError::Curve`] when the topography
/// offset collapses neighbouring piezo positions. Validation happens before any noise
/// is drawn.
#[instrument(skip_all, name = "force_volume_synthesis", fields(replicas = config.replica_count))]
pub fn synthesize_with_reporter(
    ideal: Curve,
    config: &ForceVolumeConfig,
    seed: u64,
    reporter: &ProgressReporter,
) -> Result<ForceVolume, EngineError> {
    config.validate()?;
    let noise = Normal::new(0.0, config.noise_std_dev)
        .map_err(|e| EngineError::NoiseDistribution(e.to_string()))?;

    let shifted = ideal.shifted(config.topography_offset, config.virtual_deflection_offset)?;

    let task = reporter.start_task(config.replica_count as u64);

    let indices: Vec<usize> = (0..config.replica_count).collect();
    let iterator = indices.iter();

    #[cfg(feature = "parallel")]
    let iterator = indices.par_iter();

    let replicas: Vec<Curve> = iterator
        .map(|&index| {
            let replica = noisy_replica(&shifted, &noise, seed, index);
            task.increment();
            replica
        })
        .collect();
    drop(task);

    debug!(
        samples = shifted.len(),
        replicas = replicas.len(),
        "Force volume assembled."
    );

    Ok(ForceVolume::assemble(ideal, shifted, replicas))
}

fn noisy_replica(shifted: &Curve, noise: &Normal<f64>, seed: u64, index: usize) -> Curve {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(index as u64);

    let deflection = shifted
        .deflection()
        .iter()
        .map(|&d| d + noise.sample(&mut rng))
        .collect();
    shifted.with_deflection(deflection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::curve::CurveError;
    use crate::engine::progress::Progress;

    fn ideal_curve() -> Curve {
        Curve::new(
            vec![-2.0e-9, -1.0e-9, 0.0, 1.0e-9, 2.0e-9],
            vec![0.0, -0.1e-9, 0.0, 0.9e-9, 1.9e-9],
        )
        .unwrap()
    }

    fn config(replica_count: usize, noise_std_dev: f64) -> ForceVolumeConfig {
        ForceVolumeConfig {
            replica_count,
            noise_std_dev,
            virtual_deflection_offset: 3e-9,
            topography_offset: 10e-9,
        }
    }

    fn approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-21
    }

    #[test]
    fn force_volume_has_ideal_shifted_and_replicas_in_order() {
        let ideal = ideal_curve();
        let volume = synthesize(ideal.clone(), &config(4, 1e-10), 42).unwrap();

        assert_eq!(volume.len(), 6);
        assert_eq!(volume.ideal(), &ideal);
        assert_eq!(volume.replicas().len(), 4);
        for (shifted, original) in volume.shifted().samples().zip(ideal.samples()) {
            assert!(approx_equal(shifted.0, original.0 + 10e-9));
            assert!(approx_equal(shifted.1, original.1 + 3e-9));
        }
    }

    #[test]
    fn replicas_share_the_shifted_piezo_axis() {
        let volume = synthesize(ideal_curve(), &config(3, 1e-10), 7).unwrap();
        for replica in volume.replicas() {
            assert_eq!(replica.piezo(), volume.shifted().piezo());
            assert_ne!(replica.deflection(), volume.shifted().deflection());
        }
    }

    #[test]
    fn replica_noise_stays_within_a_few_standard_deviations() {
        let std_dev = 1e-10;
        let volume = synthesize(ideal_curve(), &config(8, std_dev), 3).unwrap();
        for replica in volume.replicas() {
            for (noisy, clean) in replica.deflection().iter().zip(volume.shifted().deflection()) {
                assert!((noisy - clean).abs() < 8.0 * std_dev);
            }
        }
    }

    #[test]
    fn replicas_are_mutually_independent() {
        let volume = synthesize(ideal_curve(), &config(2, 1e-10), 11).unwrap();
        assert_ne!(volume.replicas()[0], volume.replicas()[1]);
    }

    #[test]
    fn same_seed_reproduces_the_force_volume() {
        let first = synthesize(ideal_curve(), &config(5, 1e-10), 2024).unwrap();
        let second = synthesize(ideal_curve(), &config(5, 1e-10), 2024).unwrap();
        assert_eq!(first, second);

        let other = synthesize(ideal_curve(), &config(5, 1e-10), 2025).unwrap();
        assert_ne!(first.replicas(), other.replicas());
    }

    #[test]
    fn zero_noise_replicas_equal_the_shifted_curve() {
        let volume = synthesize(ideal_curve(), &config(2, 0.0), 1).unwrap();
        for replica in volume.replicas() {
            assert_eq!(replica, volume.shifted());
        }
    }

    #[test]
    fn negative_noise_is_rejected_before_any_draw() {
        let increments = std::sync::atomic::AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if matches!(event, Progress::TaskIncrement) {
                increments.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }));

        let err = synthesize_with_reporter(ideal_curve(), &config(4, -1.0), 0, &reporter)
            .unwrap_err();
        drop(reporter);

        assert!(matches!(err, EngineError::Parameter { .. }));
        assert_eq!(increments.into_inner(), 0);
    }

    #[test]
    fn topography_offset_that_collapses_the_piezo_axis_is_rejected() {
        let mut collapsing = config(2, 1e-10);
        collapsing.topography_offset = 1e8;

        let err = synthesize(ideal_curve(), &collapsing, 9).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Curve {
                source: CurveError::NonIncreasingPiezo { .. }
            }
        ));
    }

    #[test]
    fn reporter_receives_one_increment_per_replica() {
        let increments = std::sync::atomic::AtomicUsize::new(0);
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            if matches!(event, Progress::TaskIncrement) {
                increments.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }));

        synthesize_with_reporter(ideal_curve(), &config(6, 1e-10), 5, &reporter).unwrap();
        drop(reporter);

        assert_eq!(increments.into_inner(), 6);
    }
}
