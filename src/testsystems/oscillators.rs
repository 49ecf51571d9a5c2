use crate::cell::UnitCell;
use crate::system::{DistanceConstraint, HarmonicWell, PowerWell, System};
use crate::testsystems::{AnalyticalProperty, TestSystem, ARGON_MASS};
use glam::DVec3;

// 90 kcal/(mol·Å²) in kJ/(mol·nm²)
const DEFAULT_WELL_K: f64 = 90.0 * 4.184 * 100.0;

/// A single particle in an isotropic harmonic well, U = K/2 |r|².
///
/// The simplest system with fully known statistical mechanics: each of the
/// three quadratic degrees of freedom contributes kT/2 to the expected
/// potential energy.
pub struct HarmonicOscillator {
    pub k: f64,
    pub mass: f64,
    system: System,
    positions: Vec<DVec3>,
}

impl HarmonicOscillator {
    /// # Arguments
    /// * `k` - Spring constant (kJ/(mol·nm²)).
    /// * `mass` - Particle mass (amu).
    pub fn new(k: f64, mass: f64) -> Self {
        let mut system = System::new(UnitCell::new_none());
        let i = system.add_particle(mass);
        system.wells.push(HarmonicWell { particle: i, center: DVec3::ZERO, k });
        Self { k, mass, system, positions: vec![DVec3::ZERO] }
    }
}

impl Default for HarmonicOscillator {
    fn default() -> Self {
        Self::new(DEFAULT_WELL_K, ARGON_MASS)
    }
}

impl TestSystem for HarmonicOscillator {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    fn analytical_properties(&self) -> Vec<AnalyticalProperty> {
        vec![
            AnalyticalProperty::new("potential_expectation", |state| {
                state.thermal_energy() * 1.5
            }),
            AnalyticalProperty::new("potential_standard_deviation", |state| {
                state.thermal_energy() * 1.5f64.sqrt()
            }),
            AnalyticalProperty::new("kinetic_expectation", |state| {
                state.thermal_energy() * 1.5
            }),
        ]
    }
}

/// A single particle in a separable power-law well, U = K Σ_d x_d^b.
///
/// Generalized equipartition gives <x ∂U/∂x> = kT per degree of freedom,
/// so the expected potential energy is 3 kT / b.
pub struct PowerOscillator {
    pub k: f64,
    pub b: i32,
    pub mass: f64,
    system: System,
    positions: Vec<DVec3>,
}

impl PowerOscillator {
    /// # Arguments
    /// * `k` - Well strength (kJ/(mol·nm^b)).
    /// * `b` - Even positive exponent.
    /// * `mass` - Particle mass (amu).
    pub fn new(k: f64, b: i32, mass: f64) -> Self {
        let mut system = System::new(UnitCell::new_none());
        let i = system.add_particle(mass);
        system.power_wells.push(PowerWell { particle: i, center: DVec3::ZERO, k, b });
        Self { k, b, mass, system, positions: vec![DVec3::ZERO] }
    }
}

impl Default for PowerOscillator {
    fn default() -> Self {
        Self::new(100.0, 4, ARGON_MASS)
    }
}

impl TestSystem for PowerOscillator {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    fn analytical_properties(&self) -> Vec<AnalyticalProperty> {
        let b = self.b as f64;
        vec![
            AnalyticalProperty::new("potential_expectation", move |state| {
                state.thermal_energy() * (3.0 / b)
            }),
            AnalyticalProperty::new("kinetic_expectation", |state| {
                state.thermal_energy() * 1.5
            }),
        ]
    }
}

/// N independent harmonic oscillators spaced along the x axis.
pub struct HarmonicOscillatorArray {
    pub k: f64,
    pub mass: f64,
    pub n: usize,
    pub spacing: f64,
    system: System,
    positions: Vec<DVec3>,
}

impl HarmonicOscillatorArray {
    pub fn new(k: f64, mass: f64, n: usize, spacing: f64) -> Self {
        let mut system = System::new(UnitCell::new_none());
        let mut positions = Vec::with_capacity(n);
        for idx in 0..n {
            let center = DVec3::new(idx as f64 * spacing, 0.0, 0.0);
            let i = system.add_particle(mass);
            system.wells.push(HarmonicWell { particle: i, center, k });
            positions.push(center);
        }
        Self { k, mass, n, spacing, system, positions }
    }
}

impl Default for HarmonicOscillatorArray {
    fn default() -> Self {
        Self::new(DEFAULT_WELL_K, ARGON_MASS, 5, 1.0)
    }
}

impl TestSystem for HarmonicOscillatorArray {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }

    fn analytical_properties(&self) -> Vec<AnalyticalProperty> {
        let n = self.n as f64;
        vec![
            AnalyticalProperty::new("potential_expectation", move |state| {
                state.thermal_energy() * 1.5 * n
            }),
            AnalyticalProperty::new("kinetic_expectation", move |state| {
                state.thermal_energy() * 1.5 * n
            }),
        ]
    }
}

/// Two harmonically restrained particles joined by a rigid constraint.
///
/// The constraint removes one degree of freedom, leaving no simple closed
/// form, so this variant declares no analytical properties.
pub struct ConstraintCoupledHarmonicOscillator {
    pub k: f64,
    pub d: f64,
    pub mass: f64,
    system: System,
    positions: Vec<DVec3>,
}

impl ConstraintCoupledHarmonicOscillator {
    pub fn new(k: f64, d: f64, mass: f64) -> Self {
        let mut system = System::new(UnitCell::new_none());
        let a = system.add_particle(mass);
        let b = system.add_particle(mass);
        system.wells.push(HarmonicWell { particle: a, center: DVec3::ZERO, k });
        system.wells.push(HarmonicWell { particle: b, center: DVec3::new(d, 0.0, 0.0), k });
        system.constraints.push(DistanceConstraint { particles: (a, b), distance: d });
        Self {
            k,
            d,
            mass,
            system,
            positions: vec![DVec3::ZERO, DVec3::new(d, 0.0, 0.0)],
        }
    }
}

impl Default for ConstraintCoupledHarmonicOscillator {
    fn default() -> Self {
        Self::new(1.0, 1.0, ARGON_MASS)
    }
}

impl TestSystem for ConstraintCoupledHarmonicOscillator {
    fn system(&self) -> &System {
        &self.system
    }

    fn positions(&self) -> &[DVec3] {
        &self.positions
    }
}
