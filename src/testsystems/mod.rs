//! Predefined molecular test systems.
//!
//! Each variant is constructible without any input files and exposes an
//! engine-consumable [`System`] description, initial positions, and
//! (where a closed form exists) a list of named analytical properties that
//! can be evaluated at a [`ThermodynamicState`] without running a
//! simulation.

pub mod crystal;
pub mod diatom;
pub mod lennard_jones;
pub mod oscillators;

pub use crystal::SodiumChlorideCrystal;
pub use diatom::Diatom;
pub use lennard_jones::{IdealGas, LennardJonesCluster, LennardJonesCrystal, LennardJonesFluid};
pub use oscillators::{
    ConstraintCoupledHarmonicOscillator, HarmonicOscillator, HarmonicOscillatorArray,
    PowerOscillator,
};

use crate::system::System;
use crate::units::{Quantity, BOLTZMANN, KELVIN, KILOJOULE_PER_MOLE};
use glam::DVec3;

/// Argon mass (amu), the default particle in most variants.
pub(crate) const ARGON_MASS: f64 = 39.948;

/// Temperature and pressure at which analytical properties are evaluated.
#[derive(Debug, Clone, Copy)]
pub struct ThermodynamicState {
    pub temperature: Quantity,
    pub pressure: Quantity,
}

impl ThermodynamicState {
    pub fn new(temperature: Quantity, pressure: Quantity) -> Self {
        Self { temperature, pressure }
    }

    /// Thermal energy kT.
    pub fn thermal_energy(&self) -> Quantity {
        Quantity::new(BOLTZMANN * (self.temperature / KELVIN), KILOJOULE_PER_MOLE)
    }
}

/// A named closed-form property with its evaluator. The evaluator replaces
/// accessor-by-naming-convention lookup: the capability is enumerated, not
/// discovered through method names.
pub struct AnalyticalProperty {
    pub name: &'static str,
    evaluate: Box<dyn Fn(&ThermodynamicState) -> Quantity>,
}

impl AnalyticalProperty {
    pub fn new(
        name: &'static str,
        evaluate: impl Fn(&ThermodynamicState) -> Quantity + 'static,
    ) -> Self {
        Self { name, evaluate: Box::new(evaluate) }
    }

    pub fn evaluate(&self, state: &ThermodynamicState) -> Quantity {
        (self.evaluate)(state)
    }
}

/// One constructed test-system variant.
pub trait TestSystem {
    /// Engine-consumable description of the variant.
    fn system(&self) -> &System;

    /// Initial particle positions (nm), one per particle.
    fn positions(&self) -> &[DVec3];

    /// Closed-form properties this variant can report. Empty when no closed
    /// form is known.
    fn analytical_properties(&self) -> Vec<AnalyticalProperty> {
        Vec::new()
    }
}

/// Cost of a full potential-energy evaluation at the initial positions.
///
/// `Fast` means the evaluation completes in well under a second on a single
/// core, so the variant is eligible for per-run engine checks. Every new
/// registry entry has to declare its cost; there is no separate curated
/// name list to fall out of date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cost {
    Fast,
    Slow,
}

/// A registered variant: its name, its evaluation cost, and a factory
/// building a fresh instance with default parameters.
pub struct RegistryEntry {
    pub name: &'static str,
    pub cost: Cost,
    pub build: fn() -> Box<dyn TestSystem>,
}

/// Returns every registered variant, sorted by name.
///
/// The list is assembled on every call so callers always observe the
/// complete current set; nothing is cached between runs.
pub fn registry() -> Vec<RegistryEntry> {
    let mut entries = vec![
        RegistryEntry {
            name: "HarmonicOscillator",
            cost: Cost::Fast,
            build: || Box::new(HarmonicOscillator::default()),
        },
        RegistryEntry {
            name: "PowerOscillator",
            cost: Cost::Fast,
            build: || Box::new(PowerOscillator::default()),
        },
        RegistryEntry {
            name: "HarmonicOscillatorArray",
            cost: Cost::Fast,
            build: || Box::new(HarmonicOscillatorArray::default()),
        },
        RegistryEntry {
            name: "ConstraintCoupledHarmonicOscillator",
            cost: Cost::Fast,
            build: || Box::new(ConstraintCoupledHarmonicOscillator::default()),
        },
        RegistryEntry {
            name: "Diatom",
            cost: Cost::Fast,
            build: || Box::new(Diatom::default()),
        },
        RegistryEntry {
            name: "SodiumChlorideCrystal",
            cost: Cost::Fast,
            build: || Box::new(SodiumChlorideCrystal::default()),
        },
        RegistryEntry {
            name: "LennardJonesCluster",
            cost: Cost::Fast,
            build: || Box::new(LennardJonesCluster::default()),
        },
        RegistryEntry {
            name: "LennardJonesFluid",
            cost: Cost::Fast,
            build: || Box::new(LennardJonesFluid::default()),
        },
        RegistryEntry {
            name: "LennardJonesCrystal",
            cost: Cost::Slow,
            build: || Box::new(LennardJonesCrystal::default()),
        },
        RegistryEntry {
            name: "IdealGas",
            cost: Cost::Fast,
            build: || Box::new(IdealGas::default()),
        },
    ];
    entries.sort_by_key(|e| e.name);
    entries
}
