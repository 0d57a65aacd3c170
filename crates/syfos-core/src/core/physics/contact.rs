use num_complex::Complex64;

/// Upper bound on safeguarded Newton iterations when polishing a root.
const MAX_POLISH_ITERATIONS: usize = 200;

/// Solves the Hertzian force balance for the cantilever deflection.
///
/// With `psi = k_c / (sqrt(R) * E_tot)` the balance `k_c * d = E_tot * sqrt(R) * (z - d)^(3/2)`
/// squares to the cubic `(z - d)^3 = psi^2 * d^2`. Writing `u = d / z` and
/// `lambda = psi^2 / z` gives the dimensionless form `(1 - u)^3 = lambda * u^2`, whose
/// left side falls and right side rises on `[0, 1]`, so exactly one root lies there.
///
/// A closed-form Cardano root of the scaled cubic seeds a bracketed Newton iteration on
/// `[0, 1]`. The Cardano root alone loses about half its digits when `lambda` is large
/// and the two small roots `±lambda^(-1/2)` nearly coincide; the polish restores full
/// relative precision. A non-positive piezo position gives zero deflection.
pub fn solve_contact_deflection(psi: f64, piezo: f64) -> f64 {
    if piezo <= 0.0 {
        return 0.0;
    }
    let lambda = psi * psi / piezo;
    if lambda.is_infinite() {
        return 0.0;
    }
    piezo * polish_scaled_root(lambda, cardano_scaled_root(lambda))
}

/// Cardano solution of `u^3 + (lambda - 3) u^2 + 3u - 1 = 0` in complex arithmetic.
///
/// Returns the root inside `[0, 1]` closest to the real axis, or `NaN` when rounding has
/// pushed every root out of the interval.
fn cardano_scaled_root(lambda: f64) -> f64 {
    let a = lambda - 3.0;
    let b = 3.0;
    let c = -1.0;

    // Depressed cubic t^3 + p t + q = 0 with u = t - a / 3.
    let p = b - a * a / 3.0;
    let q = 2.0 * a.powi(3) / 27.0 - a * b / 3.0 + c;
    let shift = -a / 3.0;

    let discriminant = Complex64::new(q * q / 4.0 + p.powi(3) / 27.0, 0.0).sqrt();
    let half_q = Complex64::new(q / 2.0, 0.0);
    let upper = -half_q + discriminant;
    let lower = -half_q - discriminant;
    let radicand = if upper.norm() >= lower.norm() {
        upper
    } else {
        lower
    };

    if radicand.norm() == 0.0 {
        // Triple root.
        return shift;
    }

    let principal = radicand.cbrt();
    cube_roots_of_unity()
        .into_iter()
        .map(|unit| {
            let cube_root = principal * unit;
            cube_root - p / (3.0 * cube_root) + shift
        })
        .filter(|root| (0.0..=1.0).contains(&root.re))
        .min_by(|x, y| x.im.abs().total_cmp(&y.im.abs()))
        .map_or(f64::NAN, |root| root.re)
}

/// Newton iteration on `g(u) = (1 - u)^3 - lambda * u^2`, falling back to bisection
/// whenever a step leaves the current bracket. `g(0) > 0 > g(1)` for any `lambda > 0`.
fn polish_scaled_root(lambda: f64, estimate: f64) -> f64 {
    let (mut lower, mut upper) = (0.0_f64, 1.0_f64);
    let mut u = if (lower..=upper).contains(&estimate) {
        estimate
    } else {
        0.5
    };

    for _ in 0..MAX_POLISH_ITERATIONS {
        let complement = 1.0 - u;
        let residual = complement.powi(3) - lambda * u * u;
        if residual == 0.0 {
            break;
        }
        if residual > 0.0 {
            lower = u;
        } else {
            upper = u;
        }

        let slope = -3.0 * complement * complement - 2.0 * lambda * u;
        let mut next = u - residual / slope;
        if !(next > lower && next < upper) {
            next = 0.5 * (lower + upper);
        }

        let converged = (next - u).abs() <= 4.0 * f64::EPSILON * u;
        u = next;
        if converged {
            break;
        }
    }
    u
}

fn cube_roots_of_unity() -> [Complex64; 3] {
    let half_sqrt3 = 3f64.sqrt() / 2.0;
    [
        Complex64::new(1.0, 0.0),
        Complex64::new(-0.5, half_sqrt3),
        Complex64::new(-0.5, -half_sqrt3),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// psi for k_c = 1 N/m, R = 25 nm, E_tot = 8.25e10 Pa.
    const PSI_GOLD_SILICON: f64 = 1.0 / (1.581_138_830_084_19e-4 * 8.25e10);

    fn hertz_residual(psi: f64, piezo: f64, deflection: f64) -> f64 {
        psi * deflection - (piezo - deflection).powf(1.5)
    }

    #[test]
    fn contact_onset_gives_zero_deflection() {
        assert!(solve_contact_deflection(PSI_GOLD_SILICON, 0.0).abs() < 1e-20);
        assert!(solve_contact_deflection(1.0, 0.0).abs() < 1e-12);
    }

    #[test]
    fn unit_psi_solves_simple_cubic() {
        // (z - d)^3 = d^2 with z = 2 has the single real root d = 1.
        let deflection = solve_contact_deflection(1.0, 2.0);
        assert!((deflection - 1.0).abs() < 1e-12);
    }

    #[test]
    fn deflection_lies_between_zero_and_piezo() {
        for step in 1..=150 {
            let piezo = step as f64 * 0.2e-9;
            let deflection = solve_contact_deflection(PSI_GOLD_SILICON, piezo);
            assert!(deflection.is_finite());
            assert!(deflection > 0.0, "deflection {deflection:e} at {piezo:e}");
            assert!(deflection < piezo, "deflection {deflection:e} at {piezo:e}");
        }
    }

    #[test]
    fn deflection_satisfies_hertzian_balance() {
        for &piezo in &[1e-9, 5e-9, 12.4e-9, 30e-9] {
            let deflection = solve_contact_deflection(PSI_GOLD_SILICON, piezo);
            let deformation = piezo - deflection;
            let residual = hertz_residual(PSI_GOLD_SILICON, piezo, deflection);
            assert!(
                residual.abs() < 1e-6 * PSI_GOLD_SILICON * deflection,
                "residual {residual:e} at {piezo:e} (deformation {deformation:e})"
            );
        }
    }

    #[test]
    fn deflection_increases_with_piezo() {
        let mut previous = 0.0;
        for step in 1..=50 {
            let deflection = solve_contact_deflection(PSI_GOLD_SILICON, step as f64 * 1e-9);
            assert!(deflection > previous);
            previous = deflection;
        }
    }

    #[test]
    fn soft_contact_with_three_real_roots_picks_physical_branch() {
        // psi^2 >> z puts the cubic into the three-real-root regime.
        let psi = 10.0;
        let piezo = 1.0;
        let deflection = solve_contact_deflection(psi, piezo);
        assert!(deflection > 0.0 && deflection < piezo);
        assert!(hertz_residual(psi, piezo, deflection).abs() < 1e-9);
    }

    #[test]
    fn stiff_cantilever_on_soft_sample_gives_small_positive_deflection() {
        // k_c = 100 N/m, R = 25 nm, E_tot = 1.78 MPa. d << z, so d is close to z^1.5 / psi.
        let psi = 0.356;
        let piezo = 10e-9;
        let deflection = solve_contact_deflection(psi, piezo);
        assert!(deflection > 0.0, "deflection {deflection:e}");
        let expected = piezo.powf(1.5) / psi;
        assert!((deflection - expected).abs() < 1e-3 * expected);
    }

    #[test]
    fn solution_is_accurate_across_recommended_material_corners() {
        for spring_constant in [0.001, 100.0] {
            for tip_radius in [1e-9_f64, 10e-6] {
                for reduced_modulus in [6.5e5, 3e11] {
                    let psi = spring_constant / (tip_radius.sqrt() * reduced_modulus);
                    let mut previous = 0.0;
                    for step in 0..=400 {
                        let piezo = 1e-12 * 10f64.powf(step as f64 * 6.0 / 400.0);
                        let deflection = solve_contact_deflection(psi, piezo);
                        let context = format!("psi {psi:e}, piezo {piezo:e}, d {deflection:e}");

                        assert!(deflection > 0.0 && deflection <= piezo, "{context}");
                        assert!(deflection > previous, "not increasing: {context}");

                        let elastic = psi * deflection;
                        let indentation = (piezo - deflection).powf(1.5);
                        let residual = (elastic - indentation).abs() / elastic.max(indentation);
                        assert!(residual < 1e-8, "residual {residual:e}: {context}");
                        previous = deflection;
                    }
                }
            }
        }
    }

    #[test]
    fn negative_piezo_gives_zero_deflection() {
        assert_eq!(solve_contact_deflection(PSI_GOLD_SILICON, -1e-9), 0.0);
    }

    #[test]
    fn rigid_limit_tracks_piezo() {
        let deflection = solve_contact_deflection(0.0, 3.0);
        assert!((deflection - 3.0).abs() < 1e-12);
    }
}
