use md_testsystems::testsystems::{LennardJonesFluid, TestSystem};
use md_testsystems::units::{FEMTOSECOND, KELVIN, KILOJOULE_PER_MOLE};
use md_testsystems::{Context, StateRequest, VerletIntegrator};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    md_testsystems::init_parallelism(None);

    // 1. Build a dilute periodic argon fluid (216 particles)
    let fluid = LennardJonesFluid::default();
    println!(
        "LennardJonesFluid: {} particles, reduced density {}",
        fluid.system().num_particles(),
        fluid.reduced_density
    );

    // 2. Create a context with a 1 fs velocity Verlet integrator
    let integrator = VerletIntegrator::new(1.0 * FEMTOSECOND);
    let mut context = Context::new(fluid.system().clone(), integrator);
    context.set_positions(fluid.positions()).unwrap();

    // 3. Query the initial energy breakdown
    let state = context.state(StateRequest::energy()).unwrap();
    let terms = state.energy_terms().unwrap();
    println!("Initial potential energy (kJ/mol):");
    println!("  external:  {:>12.4}", terms.external);
    println!("  bonded:    {:>12.4}", terms.bonded);
    println!("  nonbonded: {:>12.4}", terms.nonbonded);
    println!("  total:     {:>12.4}", terms.total);

    // 4. Seed thermal velocities and run a short trajectory
    let mut rng = StdRng::seed_from_u64(2026);
    context.set_velocities_to_temperature(300.0 * KELVIN, &mut rng);
    context.step(100).unwrap();

    let state = context.state(StateRequest::energy()).unwrap();
    let potential = state.potential_energy().unwrap() / KILOJOULE_PER_MOLE;
    let kinetic = state.kinetic_energy().unwrap() / KILOJOULE_PER_MOLE;
    println!("After 100 steps at 1 fs:");
    println!("  potential: {:>12.4} kJ/mol", potential);
    println!("  kinetic:   {:>12.4} kJ/mol", kinetic);
    println!("  total:     {:>12.4} kJ/mol", potential + kinetic);
}
