use crate::system::NonbondedSite;
use crate::units::COULOMB_CONSTANT;
use glam::DVec3;

/// Isotropic harmonic restraint U = k/2 |r - c|². Returns (energy, force on the particle).
pub fn calculate_well(pos: DVec3, center: DVec3, k: f64) -> (f64, DVec3) {
    let disp = pos - center;
    let energy = 0.5 * k * disp.length_squared();
    let force = -k * disp;
    (energy, force)
}

/// Separable power-law restraint U = k Σ_d (x_d - c_d)^b, b even and positive.
pub fn calculate_power_well(pos: DVec3, center: DVec3, k: f64, b: i32) -> (f64, DVec3) {
    let disp = pos - center;
    let energy = k * (disp.x.powi(b) + disp.y.powi(b) + disp.z.powi(b));
    let force = DVec3::new(
        -k * b as f64 * disp.x.powi(b - 1),
        -k * b as f64 * disp.y.powi(b - 1),
        -k * b as f64 * disp.z.powi(b - 1),
    );
    (energy, force)
}

/// Harmonic bond U = k/2 (r - r0)² for the pair displacement `dist_vec`
/// (pointing from the second particle to the first). Returns (energy,
/// force on the first particle); the second gets the negation.
pub fn calculate_bond(dist_vec: DVec3, k: f64, r0: f64) -> Option<(f64, DVec3)> {
    let dist = dist_vec.length();
    if dist < 1e-6 { return None; }

    let dr = dist - r0;
    let energy = 0.5 * k * dr * dr;
    let force = dist_vec / dist * (-k * dr);
    Some((energy, force))
}

/// Combined Lennard-Jones + Coulomb pair interaction with Lorentz-Berthelot
/// mixing. `cutoff` of `None` evaluates every pair; `Some(r_c)` truncates with
/// a 5th-order switching function starting at 0.9 r_c so the energy goes to
/// zero smoothly at the cutoff. Returns (energy, force on the first particle).
pub fn calculate_nonbonded(
    dist_vec: DVec3,
    site_i: &NonbondedSite,
    site_j: &NonbondedSite,
    cutoff: Option<f64>,
) -> Option<(f64, DVec3)> {
    let dist_sq = dist_vec.length_squared();
    if dist_sq < 1e-12 { return None; }
    if let Some(r_off) = cutoff {
        if dist_sq >= r_off * r_off { return None; }
    }

    let dist = dist_sq.sqrt();
    let epsilon = (site_i.epsilon * site_j.epsilon).sqrt();
    let sigma = 0.5 * (site_i.sigma + site_j.sigma);

    let mut energy = 0.0;
    // dU/dr, accumulated over both terms
    let mut dudr = 0.0;

    if epsilon > 0.0 {
        let s_r6 = (sigma / dist).powi(6);
        let s_r12 = s_r6 * s_r6;
        energy += 4.0 * epsilon * (s_r12 - s_r6);
        dudr += 24.0 * epsilon / dist * (s_r6 - 2.0 * s_r12);
    }

    let qq = site_i.charge * site_j.charge;
    if qq != 0.0 {
        energy += COULOMB_CONSTANT * qq / dist;
        dudr += -COULOMB_CONSTANT * qq / dist_sq;
    }

    if let Some(r_off) = cutoff {
        let r_on = 0.9 * r_off;
        if dist > r_on {
            let x = (dist - r_on) / (r_off - r_on);
            let sw = 1.0 - 10.0 * x.powi(3) + 15.0 * x.powi(4) - 6.0 * x.powi(5);
            let dsw = (-30.0 * x.powi(2) + 60.0 * x.powi(3) - 30.0 * x.powi(4)) / (r_off - r_on);
            dudr = dudr * sw + energy * dsw;
            energy *= sw;
        }
    }

    let force = dist_vec / dist * (-dudr);
    Some((energy, force))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_well_at_center_is_zero() {
        let (e, f) = calculate_well(DVec3::ZERO, DVec3::ZERO, 100.0);
        assert_eq!(e, 0.0);
        assert_eq!(f, DVec3::ZERO);
    }

    #[test]
    fn test_well_restoring_force() {
        let (e, f) = calculate_well(DVec3::new(0.5, 0.0, 0.0), DVec3::ZERO, 100.0);
        assert_relative_eq!(e, 12.5, epsilon = 1e-12);
        assert_relative_eq!(f.x, -50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quartic_well() {
        let (e, f) = calculate_power_well(DVec3::new(0.5, 0.0, 0.0), DVec3::ZERO, 16.0, 4);
        assert_relative_eq!(e, 1.0, epsilon = 1e-12);
        // dU/dx = 4 k x³ = 8, restoring
        assert_relative_eq!(f.x, -8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bond_at_equilibrium() {
        let (e, f) = calculate_bond(DVec3::new(0.155, 0.0, 0.0), 1000.0, 0.155).unwrap();
        assert_relative_eq!(e, 0.0, epsilon = 1e-12);
        assert!(f.length() < 1e-9);
    }

    #[test]
    fn test_bond_stretched() {
        let (e, f) = calculate_bond(DVec3::new(0.2, 0.0, 0.0), 1000.0, 0.15).unwrap();
        // dr = 0.05: U = 0.5 * 1000 * 0.0025 = 1.25
        assert_relative_eq!(e, 1.25, epsilon = 1e-12);
        // Pulled back toward equilibrium
        assert_relative_eq!(f.x, -50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_lj_zero_crossing_and_minimum() {
        let site = NonbondedSite { epsilon: 0.996, sigma: 0.3405, charge: 0.0 };

        let (e, _) = calculate_nonbonded(DVec3::new(0.3405, 0.0, 0.0), &site, &site, None).unwrap();
        assert_relative_eq!(e, 0.0, epsilon = 1e-9);

        let r_min = 2.0f64.powf(1.0 / 6.0) * 0.3405;
        let (e, f) = calculate_nonbonded(DVec3::new(r_min, 0.0, 0.0), &site, &site, None).unwrap();
        assert_relative_eq!(e, -0.996, epsilon = 1e-9);
        assert!(f.length() < 1e-9);
    }

    #[test]
    fn test_coulomb_attraction() {
        let na = NonbondedSite { epsilon: 0.0, sigma: 0.0, charge: 1.0 };
        let cl = NonbondedSite { epsilon: 0.0, sigma: 0.0, charge: -1.0 };
        let (e, f) = calculate_nonbonded(DVec3::new(0.3, 0.0, 0.0), &na, &cl, None).unwrap();
        assert_relative_eq!(e, -COULOMB_CONSTANT / 0.3, epsilon = 1e-9);
        // Opposite charges attract: force on the first particle points toward the second
        assert!(f.x < 0.0);
    }

    #[test]
    fn test_switching_vanishes_at_cutoff() {
        let site = NonbondedSite { epsilon: 0.996, sigma: 0.3405, charge: 0.0 };
        let (e, f) = calculate_nonbonded(
            DVec3::new(0.999999, 0.0, 0.0),
            &site,
            &site,
            Some(1.0),
        )
        .unwrap();
        assert!(e.abs() < 1e-9);
        assert!(f.length() < 1e-6);
        assert!(calculate_nonbonded(DVec3::new(1.01, 0.0, 0.0), &site, &site, Some(1.0)).is_none());
    }
}
