use crate::cell::UnitCell;
use crate::system::{HarmonicWell, Nonbonded, NonbondedSite, System};
use crate::testsystems::{AnalyticalProperty, TestSystem, ThermodynamicState, ARGON_MASS};
use crate::units::{Quantity, ATMOSPHERE, KELVIN, KILOJOULE_PER_MOLE, NANOMETER_CUBED};
use glam::DVec3;

/// Argon LJ diameter (nm).
const ARGON_SIGMA: f64 = 0.3405;
/// Argon LJ well depth (kJ/mol), ε/kB = 119.8 K.
const ARGON_EPSILON: f64 = 0.996;

fn argon_site() -> NonbondedSite {
    NonbondedSite { epsilon: ARGON_EPSILON, sigma: ARGON_SIGMA, charge: 0.0 }
}

/// A small cubic cluster of argon atoms held together by a weak harmonic
/// restraint toward the cluster centroid, keeping evaporating atoms bound.
pub struct LennardJonesCluster {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub k_restraint: f64,
    system: System,
    positions: Vec<DVec3>,
}

impl LennardJonesCluster {
    pub fn new(nx: usize, ny: usize, nz: usize, k_restraint: f64) -> Self {
        // Equilibrium pair separation 2^(1/6) σ
        let spacing = 2.0f64.powf(1.0 / 6.0) * ARGON_SIGMA;
        let mut positions = Vec::with_capacity(nx * ny * nz);
        for ix in 0..nx {
            for iy in 0..ny {
                for iz in 0..nz {
                    positions.push(DVec3::new(
                        ix as f64 * spacing,
                        iy as f64 * spacing,
                        iz as f64 * spacing,
                    ));
                }
            }
        }
        let centroid = positions.iter().copied().sum::<DVec3>() / positions.len() as f64;

        let mut system = System::new(UnitCell::new_none());
        let mut sites = Vec::with_capacity(positions.len());
        for _ in &positions {
            let i = system.add_particle(ARGON_MASS);
            system.wells.push(HarmonicWell { particle: i, center: centroid, k: k_restraint });
            sites.push(argon_site());
        }
        system.nonbonded = Some(Nonbonded { sites, cutoff: None });

        Self { nx, ny, nz, k_restraint, system, positions }
    }
}

impl Default for LennardJonesCluster {
    fn default() -> Self {
        Self::new(3, 3, 3, 1.0)
    }
}

impl TestSystem for LennardJonesCluster {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }
}

/// A periodic argon fluid on an initial cubic grid.
///
/// The box edge follows from the particle count and the reduced density
/// ρ* = ρσ³; the default 0.05 is a dilute gas-like state far from any
/// overlap singularities.
pub struct LennardJonesFluid {
    pub n_side: usize,
    pub reduced_density: f64,
    system: System,
    positions: Vec<DVec3>,
}

impl LennardJonesFluid {
    pub fn new(n_side: usize, reduced_density: f64) -> Self {
        let n = n_side * n_side * n_side;
        let volume = n as f64 * ARGON_SIGMA.powi(3) / reduced_density;
        let edge = volume.cbrt();
        let spacing = edge / n_side as f64;

        let mut positions = Vec::with_capacity(n);
        for ix in 0..n_side {
            for iy in 0..n_side {
                for iz in 0..n_side {
                    positions.push(DVec3::new(
                        (ix as f64 + 0.5) * spacing,
                        (iy as f64 + 0.5) * spacing,
                        (iz as f64 + 0.5) * spacing,
                    ));
                }
            }
        }

        let mut system = System::new(UnitCell::new_orthorhombic(DVec3::splat(edge)));
        let mut sites = Vec::with_capacity(n);
        for _ in 0..n {
            system.add_particle(ARGON_MASS);
            sites.push(argon_site());
        }
        let cutoff = (3.0 * ARGON_SIGMA).min(0.49 * edge);
        system.nonbonded = Some(Nonbonded { sites, cutoff: Some(cutoff) });

        Self { n_side, reduced_density, system, positions }
    }
}

impl Default for LennardJonesFluid {
    fn default() -> Self {
        Self::new(6, 0.05)
    }
}

impl TestSystem for LennardJonesFluid {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }
}

/// A large periodic fcc argon lattice at the equilibrium nearest-neighbor
/// distance. Large enough that a full energy evaluation is a real cost, so
/// the registry marks it slow.
pub struct LennardJonesCrystal {
    pub cells: usize,
    system: System,
    positions: Vec<DVec3>,
}

impl LennardJonesCrystal {
    pub fn new(cells: usize) -> Self {
        // fcc lattice constant with nearest neighbors at 2^(1/6) σ
        let a = 2.0f64.sqrt() * 2.0f64.powf(1.0 / 6.0) * ARGON_SIGMA;
        let offsets = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.5, 0.5, 0.0),
            DVec3::new(0.5, 0.0, 0.5),
            DVec3::new(0.0, 0.5, 0.5),
        ];

        let mut positions = Vec::with_capacity(4 * cells * cells * cells);
        for ix in 0..cells {
            for iy in 0..cells {
                for iz in 0..cells {
                    let base = DVec3::new(ix as f64, iy as f64, iz as f64);
                    for offset in &offsets {
                        positions.push((base + *offset) * a);
                    }
                }
            }
        }

        let edge = cells as f64 * a;
        let mut system = System::new(UnitCell::new_orthorhombic(DVec3::splat(edge)));
        let mut sites = Vec::with_capacity(positions.len());
        for _ in &positions {
            system.add_particle(ARGON_MASS);
            sites.push(argon_site());
        }
        let cutoff = (3.0 * ARGON_SIGMA).min(0.49 * edge);
        system.nonbonded = Some(Nonbonded { sites, cutoff: Some(cutoff) });

        Self { cells, system, positions }
    }
}

impl Default for LennardJonesCrystal {
    fn default() -> Self {
        Self::new(7)
    }
}

impl TestSystem for LennardJonesCrystal {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }
}

/// Non-interacting particles in a periodic box sized by the ideal gas law
/// at 300 K and 1 atm. The one variant where every analytical property is
/// exact rather than approximate.
pub struct IdealGas {
    pub n_side: usize,
    system: System,
    positions: Vec<DVec3>,
}

impl IdealGas {
    pub fn new(n_side: usize) -> Self {
        let n = n_side * n_side * n_side;

        // V = (N+1) kT / p at the reference state
        let reference = ThermodynamicState::new(300.0 * KELVIN, 1.0 * ATMOSPHERE);
        let volume = (n as f64 + 1.0) * (reference.thermal_energy() / reference.pressure);
        let edge = volume.cbrt();
        let spacing = edge / n_side as f64;

        let mut positions = Vec::with_capacity(n);
        for ix in 0..n_side {
            for iy in 0..n_side {
                for iz in 0..n_side {
                    positions.push(DVec3::new(
                        (ix as f64 + 0.5) * spacing,
                        (iy as f64 + 0.5) * spacing,
                        (iz as f64 + 0.5) * spacing,
                    ));
                }
            }
        }

        let mut system = System::new(UnitCell::new_orthorhombic(DVec3::splat(edge)));
        for _ in 0..n {
            system.add_particle(ARGON_MASS);
        }

        Self { n_side, system, positions }
    }

    fn nparticles(&self) -> usize {
        self.n_side.pow(3)
    }
}

impl Default for IdealGas {
    fn default() -> Self {
        Self::new(6)
    }
}

impl TestSystem for IdealGas {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    fn analytical_properties(&self) -> Vec<AnalyticalProperty> {
        let n = self.nparticles() as f64;
        vec![
            AnalyticalProperty::new("potential_expectation", |_state| {
                Quantity::new(0.0, KILOJOULE_PER_MOLE)
            }),
            AnalyticalProperty::new("potential_standard_deviation", |_state| {
                Quantity::new(0.0, KILOJOULE_PER_MOLE)
            }),
            AnalyticalProperty::new("kinetic_expectation", move |state| {
                state.thermal_energy() * 1.5 * n
            }),
            AnalyticalProperty::new("volume_expectation", move |state| {
                Quantity::new((n + 1.0) * (state.thermal_energy() / state.pressure), NANOMETER_CUBED)
            }),
            AnalyticalProperty::new("volume_standard_deviation", move |state| {
                Quantity::new(
                    (n + 1.0).sqrt() * (state.thermal_energy() / state.pressure),
                    NANOMETER_CUBED,
                )
            }),
        ]
    }
}
