use crate::cell::UnitCell;
use crate::system::{DistanceConstraint, HarmonicBondTerm, System};
use crate::testsystems::{AnalyticalProperty, TestSystem, ARGON_MASS};
use glam::DVec3;

// 290 kcal/(mol·Å²) in kJ/(mol·nm²)
const DEFAULT_BOND_K: f64 = 290.0 * 4.184 * 100.0;
// Equilibrium bond length (nm)
const DEFAULT_BOND_LENGTH: f64 = 0.155;

/// Two particles joined by a single harmonic bond, optionally replaced by a
/// rigid constraint.
///
/// For the unconstrained stiff bond the radial vibration is the only
/// potential-carrying degree of freedom, giving an expected potential energy
/// of kT/2. With the constraint in place no closed form is declared.
pub struct Diatom {
    pub k: f64,
    pub r0: f64,
    pub m1: f64,
    pub m2: f64,
    pub constraint: bool,
    system: System,
    positions: Vec<DVec3>,
}

impl Diatom {
    /// # Arguments
    /// * `k` - Bond spring constant (kJ/(mol·nm²)); unused when constrained.
    /// * `r0` - Equilibrium separation (nm).
    /// * `m1`, `m2` - Particle masses (amu).
    /// * `constraint` - Replace the bond with a rigid constraint.
    pub fn new(k: f64, r0: f64, m1: f64, m2: f64, constraint: bool) -> Self {
        let mut system = System::new(UnitCell::new_none());
        let a = system.add_particle(m1);
        let b = system.add_particle(m2);
        if constraint {
            system.constraints.push(DistanceConstraint { particles: (a, b), distance: r0 });
        } else {
            system.bonds.push(HarmonicBondTerm { particles: (a, b), k, r0 });
        }
        Self {
            k,
            r0,
            m1,
            m2,
            constraint,
            system,
            positions: vec![DVec3::ZERO, DVec3::new(r0, 0.0, 0.0)],
        }
    }
}

impl Default for Diatom {
    fn default() -> Self {
        Self::new(DEFAULT_BOND_K, DEFAULT_BOND_LENGTH, ARGON_MASS, ARGON_MASS, false)
    }
}

impl TestSystem for Diatom {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    fn analytical_properties(&self) -> Vec<AnalyticalProperty> {
        if self.constraint {
            return Vec::new();
        }
        vec![
            // Stiff-spring approximation: K r0² >> kT
            AnalyticalProperty::new("potential_expectation", |state| {
                state.thermal_energy() * 0.5
            }),
            AnalyticalProperty::new("kinetic_expectation", |state| {
                state.thermal_energy() * 3.0
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_equilibrium() {
        let diatom = Diatom::default();
        let energy = diatom.system().compute_energy(diatom.positions());
        assert!(energy.total.abs() < 1e-9);
    }

    #[test]
    fn test_constrained_variant_has_no_bond_terms() {
        let diatom = Diatom::new(DEFAULT_BOND_K, DEFAULT_BOND_LENGTH, ARGON_MASS, ARGON_MASS, true);
        assert!(diatom.system().bonds.is_empty());
        assert_eq!(diatom.system().constraints.len(), 1);
        assert!(diatom.analytical_properties().is_empty());
    }

    #[test]
    fn test_stretched_bond_stores_energy() {
        let diatom = Diatom::default();
        let stretched = vec![DVec3::ZERO, DVec3::new(DEFAULT_BOND_LENGTH + 0.01, 0.0, 0.0)];
        let energy = diatom.system().compute_energy(&stretched);
        // 0.5 * k * (0.01)²
        assert!((energy.bonded - 0.5 * DEFAULT_BOND_K * 1e-4).abs() < 1e-9);
    }
}
