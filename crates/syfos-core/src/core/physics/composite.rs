/// Effective Hamaker constant of a probe/sample pair (combining rule `sqrt(A1) * sqrt(A2)`).
#[inline]
pub fn compute_hamaker(hamaker_probe: f64, hamaker_sample: f64) -> f64 {
    hamaker_probe.sqrt() * hamaker_sample.sqrt()
}

/// Reduced (Hertzian) modulus `E_tot` of a probe/sample pair.
#[inline]
pub fn compute_reduced_modulus(
    poisson_ratio_probe: f64,
    e_probe: f64,
    poisson_ratio_sample: f64,
    e_sample: f64,
) -> f64 {
    let compliance_probe = (1.0 - poisson_ratio_probe.powi(2)) / e_probe;
    let compliance_sample = (1.0 - poisson_ratio_sample.powi(2)) / e_sample;
    4.0 / (3.0 * (compliance_probe + compliance_sample))
}

/// Deflection at which the attractive force gradient overcomes the cantilever
/// stiffness. Always `<= 0` for positive inputs.
#[inline]
pub fn compute_jump_to_contact(hamaker: f64, radius: f64, spring_constant: f64) -> f64 {
    -((hamaker * radius) / (3.0 * spring_constant)).cbrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn relative_close(actual: f64, expected: f64, tolerance: f64) -> bool {
        ((actual - expected) / expected).abs() < tolerance
    }

    #[test]
    fn hamaker_of_perfect_squares_is_their_geometric_mean() {
        assert!((compute_hamaker(9.0, 16.0) - 12.0).abs() < TOLERANCE);
    }

    #[test]
    fn hamaker_of_gold_and_silicon() {
        let hamaker = compute_hamaker(90e-21, 66e-21);
        assert!(relative_close(hamaker, 7.707e-20, 1e-3));
    }

    #[test]
    fn reduced_modulus_with_zero_poisson_ratios() {
        let e_tot = compute_reduced_modulus(0.0, 1.0, 0.0, 1.0);
        assert!((e_tot - 2.0 / 3.0).abs() < TOLERANCE);
    }

    #[test]
    fn reduced_modulus_of_gold_and_silicon() {
        let e_tot = compute_reduced_modulus(0.42, 78e9, 0.22, 170e9);
        assert!(relative_close(e_tot, 8.25e10, 1e-3));
    }

    #[test]
    fn jump_to_contact_simple_values() {
        assert!((compute_jump_to_contact(6.0, 4.0, 1.0) - (-2.0)).abs() < TOLERANCE);
    }

    #[test]
    fn jump_to_contact_is_never_positive() {
        for &(a, r, k) in &[
            (1e-21, 1e-9, 100.0),
            (7.7e-20, 25e-9, 1.0),
            (450e-21, 10e-6, 0.001),
        ] {
            assert!(compute_jump_to_contact(a, r, k) <= 0.0);
        }
    }
}
