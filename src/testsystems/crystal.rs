use crate::cell::UnitCell;
use crate::system::{Nonbonded, NonbondedSite, System};
use crate::testsystems::TestSystem;
use glam::DVec3;

const SODIUM_MASS: f64 = 22.989_769;
const CHLORINE_MASS: f64 = 35.453;
// Nearest-neighbor Na-Cl separation in rock salt (nm)
const LATTICE_SPACING: f64 = 0.282;

// Joung-Cheatham ion parameters (SPC/E water set), kJ/mol and nm
const SODIUM_EPSILON: f64 = 1.475_4;
const SODIUM_SIGMA: f64 = 0.215_9;
const CHLORIDE_EPSILON: f64 = 0.053_49;
const CHLORIDE_SIGMA: f64 = 0.483_0;

/// A finite rock-salt Na⁺/Cl⁻ crystallite in vacuum: alternating unit
/// charges on a simple cubic grid, full LJ + Coulomb over all pairs.
pub struct SodiumChlorideCrystal {
    pub n_side: usize,
    system: System,
    positions: Vec<DVec3>,
}

impl SodiumChlorideCrystal {
    pub fn new(n_side: usize) -> Self {
        let mut system = System::new(UnitCell::new_none());
        let mut sites = Vec::new();
        let mut positions = Vec::new();

        for ix in 0..n_side {
            for iy in 0..n_side {
                for iz in 0..n_side {
                    positions.push(DVec3::new(
                        ix as f64 * LATTICE_SPACING,
                        iy as f64 * LATTICE_SPACING,
                        iz as f64 * LATTICE_SPACING,
                    ));
                    if (ix + iy + iz) % 2 == 0 {
                        system.add_particle(SODIUM_MASS);
                        sites.push(NonbondedSite {
                            epsilon: SODIUM_EPSILON,
                            sigma: SODIUM_SIGMA,
                            charge: 1.0,
                        });
                    } else {
                        system.add_particle(CHLORINE_MASS);
                        sites.push(NonbondedSite {
                            epsilon: CHLORIDE_EPSILON,
                            sigma: CHLORIDE_SIGMA,
                            charge: -1.0,
                        });
                    }
                }
            }
        }
        system.nonbonded = Some(Nonbonded { sites, cutoff: None });

        Self { n_side, system, positions }
    }
}

impl Default for SodiumChlorideCrystal {
    fn default() -> Self {
        Self::new(4)
    }
}

impl TestSystem for SodiumChlorideCrystal {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crystal_is_charge_neutral() {
        let crystal = SodiumChlorideCrystal::default();
        let total_charge: f64 = crystal
            .system()
            .nonbonded
            .as_ref()
            .unwrap()
            .sites
            .iter()
            .map(|s| s.charge)
            .sum();
        assert_eq!(total_charge, 0.0);
    }

    #[test]
    fn test_lattice_is_cohesive() {
        let crystal = SodiumChlorideCrystal::default();
        let energy = crystal.system().compute_energy(crystal.positions());
        // Electrostatics dominate; the lattice binds
        assert!(energy.nonbonded < 0.0);
        assert!(energy.total.is_finite());
    }
}
