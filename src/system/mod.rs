pub mod interactions;
pub mod parallel;
pub mod sequential;

use crate::cell::UnitCell;
use glam::DVec3;
use serde::{Deserialize, Serialize};

const PARALLEL_THRESHOLD: usize = 1000;

/// Potential energy breakdown of one evaluation (kJ/mol).
#[derive(Debug, Default, Clone, Copy)]
pub struct EnergyTerms {
    pub external: f64,
    pub bonded: f64,
    pub nonbonded: f64,
    pub total: f64,
}

/// A point mass (amu).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub mass: f64,
}

/// Isotropic harmonic restraint tying one particle to a fixed point.
/// k is in kJ/(mol·nm²).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HarmonicWell {
    pub particle: usize,
    pub center: DVec3,
    pub k: f64,
}

/// Separable power-law restraint U = k Σ_d (x_d - c_d)^b with even exponent.
/// k is in kJ/(mol·nm^b).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerWell {
    pub particle: usize,
    pub center: DVec3,
    pub k: f64,
    pub b: i32,
}

/// Harmonic bond between two particles. k in kJ/(mol·nm²), r0 in nm.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HarmonicBondTerm {
    pub particles: (usize, usize),
    pub k: f64,
    pub r0: f64,
}

/// Per-particle non-bonded parameters: LJ well depth (kJ/mol), LJ diameter
/// (nm), and partial charge (e).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NonbondedSite {
    pub epsilon: f64,
    pub sigma: f64,
    pub charge: f64,
}

/// Non-bonded interaction description. One site per particle, in particle
/// order. `cutoff` of `None` evaluates all pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nonbonded {
    pub sites: Vec<NonbondedSite>,
    pub cutoff: Option<f64>,
}

/// Rigid distance constraint between two particles (nm).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DistanceConstraint {
    pub particles: (usize, usize),
    pub distance: f64,
}

/// Engine-consumable description of a molecular system: particles, the
/// potential terms acting on them, rigid constraints, and boundary
/// conditions. Positions are not part of the description; they are supplied
/// to every evaluation and owned by the execution context.
#[derive(Debug, Clone)]
pub struct System {
    pub particles: Vec<Particle>,
    pub wells: Vec<HarmonicWell>,
    pub power_wells: Vec<PowerWell>,
    pub bonds: Vec<HarmonicBondTerm>,
    pub nonbonded: Option<Nonbonded>,
    pub constraints: Vec<DistanceConstraint>,
    pub cell: UnitCell,
}

impl System {
    /// Creates an empty system with the given boundary conditions.
    pub fn new(cell: UnitCell) -> Self {
        Self {
            particles: Vec::new(),
            wells: Vec::new(),
            power_wells: Vec::new(),
            bonds: Vec::new(),
            nonbonded: None,
            constraints: Vec::new(),
            cell,
        }
    }

    /// Appends a particle and returns its index.
    pub fn add_particle(&mut self, mass: f64) -> usize {
        self.particles.push(Particle { mass });
        self.particles.len() - 1
    }

    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Computes the potential energy at the given positions.
    pub fn compute_energy(&self, positions: &[DVec3]) -> EnergyTerms {
        self.compute_energy_with_threads(positions, 0)
    }

    pub fn compute_energy_with_threads(&self, positions: &[DVec3], num_threads: usize) -> EnergyTerms {
        let mut scratch = vec![DVec3::ZERO; self.particles.len()];
        self.compute_forces_with_threads(positions, &mut scratch, num_threads)
    }

    /// Computes potential energy and accumulates forces into `forces`
    /// (overwritten). Thread count 0 picks the path automatically.
    pub fn compute_forces(&self, positions: &[DVec3], forces: &mut [DVec3]) -> EnergyTerms {
        self.compute_forces_with_threads(positions, forces, 0)
    }

    pub fn compute_forces_with_threads(
        &self,
        positions: &[DVec3],
        forces: &mut [DVec3],
        num_threads: usize,
    ) -> EnergyTerms {
        if num_threads == 1 {
            return self.compute_forces_serial(positions, forces);
        }

        let use_parallel = num_threads > 1 || self.particles.len() >= PARALLEL_THRESHOLD;

        if use_parallel {
            let threads = if num_threads > 0 { num_threads } else { 4 };
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap();
            pool.install(|| self.compute_forces_parallel(positions, forces))
        } else {
            self.compute_forces_serial(positions, forces)
        }
    }
}
