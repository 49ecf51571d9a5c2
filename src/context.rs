use crate::integrator::VerletIntegrator;
use crate::system::{EnergyTerms, System};
use crate::units::{Quantity, BOLTZMANN, KELVIN, KILOJOULE_PER_MOLE};
use glam::DVec3;
use rand::Rng;
use rand_distr::StandardNormal;
use thiserror::Error;

const CONSTRAINT_ITERATIONS: usize = 50;
const CONSTRAINT_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("system has {expected} particles but {found} positions were given")]
    PositionCountMismatch { expected: usize, found: usize },
    #[error("positions must be set before {operation}")]
    PositionsNotSet { operation: &'static str },
}

/// Which fields a [`State`] query should populate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateRequest {
    pub energy: bool,
    pub positions: bool,
}

impl StateRequest {
    pub fn energy() -> Self {
        Self { energy: true, positions: false }
    }

    pub fn all() -> Self {
        Self { energy: true, positions: true }
    }
}

/// Snapshot of a context, holding only what was requested.
pub struct State {
    potential: Option<EnergyTerms>,
    kinetic: Option<f64>,
    positions: Option<Vec<DVec3>>,
}

impl State {
    pub fn potential_energy(&self) -> Option<Quantity> {
        self.potential.map(|terms| Quantity::new(terms.total, KILOJOULE_PER_MOLE))
    }

    pub fn kinetic_energy(&self) -> Option<Quantity> {
        self.kinetic.map(|ke| Quantity::new(ke, KILOJOULE_PER_MOLE))
    }

    /// Per-category breakdown of the potential energy.
    pub fn energy_terms(&self) -> Option<EnergyTerms> {
        self.potential
    }

    pub fn positions(&self) -> Option<&[DVec3]> {
        self.positions.as_deref()
    }
}

/// Execution context: owns a system, an integrator, and the dynamical state
/// (positions, velocities, forces). Everything the context holds is released
/// when it goes out of scope, so per-iteration engine cleanup is scope exit.
pub struct Context {
    system: System,
    integrator: VerletIntegrator,
    positions: Option<Vec<DVec3>>,
    velocities: Vec<DVec3>,
    forces: Vec<DVec3>,
    potential: EnergyTerms,
}

impl Context {
    pub fn new(system: System, integrator: VerletIntegrator) -> Self {
        let n = system.num_particles();
        Self {
            system,
            integrator,
            positions: None,
            velocities: vec![DVec3::ZERO; n],
            forces: vec![DVec3::ZERO; n],
            potential: EnergyTerms::default(),
        }
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn integrator(&self) -> &VerletIntegrator {
        &self.integrator
    }

    /// Sets particle positions and evaluates forces and potential energy at
    /// the new configuration.
    pub fn set_positions(&mut self, positions: &[DVec3]) -> Result<(), ContextError> {
        let expected = self.system.num_particles();
        if positions.len() != expected {
            return Err(ContextError::PositionCountMismatch { expected, found: positions.len() });
        }
        self.positions = Some(positions.to_vec());
        self.refresh_forces();
        Ok(())
    }

    /// Draws velocities from the Maxwell-Boltzmann distribution at the given
    /// temperature and removes center-of-mass drift.
    pub fn set_velocities_to_temperature<R: Rng>(&mut self, temperature: Quantity, rng: &mut R) {
        let t = temperature / KELVIN;
        for (v, p) in self.velocities.iter_mut().zip(self.system.particles.iter()) {
            let sigma = (BOLTZMANN * t / p.mass).sqrt();
            for d in 0..3 {
                let z: f64 = rng.sample(StandardNormal);
                v[d] = sigma * z;
            }
        }
        self.remove_com_motion();
    }

    /// Advances the system by `steps` velocity Verlet steps.
    pub fn step(&mut self, steps: usize) -> Result<(), ContextError> {
        let mut positions = match self.positions.take() {
            Some(p) => p,
            None => return Err(ContextError::PositionsNotSet { operation: "stepping" }),
        };
        let dt = self.integrator.timestep_ps();

        for _ in 0..steps {
            // Half-kick and drift
            for i in 0..positions.len() {
                self.velocities[i] += self.forces[i] / self.system.particles[i].mass * (0.5 * dt);
                positions[i] += self.velocities[i] * dt;
            }
            apply_constraints(&self.system, &mut positions);
            if self.system.cell.is_periodic() {
                for p in positions.iter_mut() {
                    *p = self.system.cell.wrap_vector(*p);
                }
            }

            self.potential = self.system.compute_forces(&positions, &mut self.forces);

            // Second half-kick
            for i in 0..positions.len() {
                self.velocities[i] += self.forces[i] / self.system.particles[i].mass * (0.5 * dt);
            }
            project_constrained_velocities(&self.system, &positions, &mut self.velocities);
        }

        self.positions = Some(positions);
        Ok(())
    }

    /// Queries a snapshot of the context.
    pub fn state(&self, request: StateRequest) -> Result<State, ContextError> {
        let positions = self
            .positions
            .as_ref()
            .ok_or(ContextError::PositionsNotSet { operation: "a state query" })?;

        Ok(State {
            potential: request.energy.then_some(self.potential),
            kinetic: request.energy.then(|| self.kinetic_energy()),
            positions: request.positions.then(|| positions.clone()),
        })
    }

    fn refresh_forces(&mut self) {
        if let Some(positions) = &self.positions {
            self.potential = self.system.compute_forces(positions, &mut self.forces);
        }
    }

    fn kinetic_energy(&self) -> f64 {
        self.velocities
            .iter()
            .zip(self.system.particles.iter())
            .map(|(v, p)| 0.5 * p.mass * v.length_squared())
            .sum()
    }

    fn remove_com_motion(&mut self) {
        let mut momentum = DVec3::ZERO;
        let mut total_mass = 0.0;
        for (v, p) in self.velocities.iter().zip(self.system.particles.iter()) {
            momentum += *v * p.mass;
            total_mass += p.mass;
        }
        if total_mass == 0.0 {
            return;
        }
        let com_velocity = momentum / total_mass;
        for v in &mut self.velocities {
            *v -= com_velocity;
        }
    }
}

/// Iterative SHAKE-style position correction. Constrained pairs are bonded
/// neighbors, so no minimum imaging is applied to their separation.
fn apply_constraints(system: &System, positions: &mut [DVec3]) {
    if system.constraints.is_empty() {
        return;
    }
    for _ in 0..CONSTRAINT_ITERATIONS {
        let mut converged = true;
        for c in &system.constraints {
            let (i, j) = c.particles;
            let diff = positions[i] - positions[j];
            let dist = diff.length();
            if dist < 1e-12 {
                continue;
            }
            let error = dist - c.distance;
            if error.abs() > CONSTRAINT_TOLERANCE * c.distance {
                converged = false;
                let inv_mi = 1.0 / system.particles[i].mass;
                let inv_mj = 1.0 / system.particles[j].mass;
                let correction = diff / dist * (error / (inv_mi + inv_mj));
                positions[i] -= correction * inv_mi;
                positions[j] += correction * inv_mj;
            }
        }
        if converged {
            break;
        }
    }
}

/// Removes the relative velocity component along each constrained bond.
fn project_constrained_velocities(system: &System, positions: &[DVec3], velocities: &mut [DVec3]) {
    for c in &system.constraints {
        let (i, j) = c.particles;
        let diff = positions[i] - positions[j];
        let dist = diff.length();
        if dist < 1e-12 {
            continue;
        }
        let dir = diff / dist;
        let v_rel = (velocities[i] - velocities[j]).dot(dir);
        let inv_mi = 1.0 / system.particles[i].mass;
        let inv_mj = 1.0 / system.particles[j].mass;
        let impulse = v_rel / (inv_mi + inv_mj);
        velocities[i] -= dir * impulse * inv_mi;
        velocities[j] += dir * impulse * inv_mj;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::UnitCell;
    use crate::system::HarmonicWell;
    use crate::units::FEMTOSECOND;

    fn one_particle_system() -> System {
        let mut system = System::new(UnitCell::new_none());
        let i = system.add_particle(39.948);
        system.wells.push(HarmonicWell { particle: i, center: DVec3::ZERO, k: 100.0 });
        system
    }

    #[test]
    fn test_position_count_mismatch() {
        let mut context = Context::new(one_particle_system(), VerletIntegrator::new(1.0 * FEMTOSECOND));
        let err = context.set_positions(&[DVec3::ZERO, DVec3::ZERO]).unwrap_err();
        assert!(matches!(err, ContextError::PositionCountMismatch { expected: 1, found: 2 }));
    }

    #[test]
    fn test_state_requires_positions() {
        let context = Context::new(one_particle_system(), VerletIntegrator::new(1.0 * FEMTOSECOND));
        assert!(context.state(StateRequest::energy()).is_err());
    }

    #[test]
    fn test_energy_query() {
        let mut context = Context::new(one_particle_system(), VerletIntegrator::new(1.0 * FEMTOSECOND));
        context.set_positions(&[DVec3::new(0.1, 0.0, 0.0)]).unwrap();
        let state = context.state(StateRequest::energy()).unwrap();
        let pe = state.potential_energy().unwrap();
        // 0.5 * 100 * 0.01 = 0.5 kJ/mol
        assert!((pe / KILOJOULE_PER_MOLE - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unrequested_fields_absent() {
        let mut context = Context::new(one_particle_system(), VerletIntegrator::new(1.0 * FEMTOSECOND));
        context.set_positions(&[DVec3::ZERO]).unwrap();
        let state = context.state(StateRequest::energy()).unwrap();
        assert!(state.positions().is_none());
    }

    #[test]
    fn test_shake_restores_constraint_length() {
        let mut system = System::new(UnitCell::new_none());
        system.add_particle(10.0);
        system.add_particle(30.0);
        system.constraints.push(crate::system::DistanceConstraint {
            particles: (0, 1),
            distance: 0.2,
        });

        let mut positions = vec![DVec3::ZERO, DVec3::new(0.25, 0.0, 0.0)];
        apply_constraints(&system, &mut positions);
        let dist = (positions[0] - positions[1]).length();
        assert!((dist - 0.2).abs() < 1e-6);
    }
}
