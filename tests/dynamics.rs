use md_testsystems::testsystems::{
    ConstraintCoupledHarmonicOscillator, HarmonicOscillator, LennardJonesFluid, TestSystem,
};
use md_testsystems::units::{BOLTZMANN, FEMTOSECOND, KELVIN, KILOJOULE_PER_MOLE};
use md_testsystems::{Context, StateRequest, VerletIntegrator};
use glam::DVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_nve_energy_conservation() {
    let oscillator = HarmonicOscillator::default();
    let integrator = VerletIntegrator::new(1.0 * FEMTOSECOND);
    let mut context = Context::new(oscillator.system().clone(), integrator);

    // Displace from the well minimum and seed thermal motion
    context.set_positions(&[DVec3::new(0.05, 0.0, 0.0)]).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    context.set_velocities_to_temperature(300.0 * KELVIN, &mut rng);

    let total = |context: &Context| {
        let state = context.state(StateRequest::energy()).unwrap();
        state.potential_energy().unwrap() / KILOJOULE_PER_MOLE
            + state.kinetic_energy().unwrap() / KILOJOULE_PER_MOLE
    };

    let e_initial = total(&context);
    context.step(1000).unwrap();
    let e_final = total(&context);

    let drift = (e_final - e_initial).abs() / e_initial.abs().max(1e-10);
    assert!(drift < 0.01, "Energy drift: {:.3}%", drift * 100.0);
}

#[test]
fn test_seeded_velocities_match_temperature() {
    let fluid = LennardJonesFluid::default();
    let n = fluid.system().num_particles();
    let integrator = VerletIntegrator::new(1.0 * FEMTOSECOND);
    let mut context = Context::new(fluid.system().clone(), integrator);
    context.set_positions(fluid.positions()).unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    let target = 300.0;
    context.set_velocities_to_temperature(target * KELVIN, &mut rng);

    let state = context.state(StateRequest::energy()).unwrap();
    let ke = state.kinetic_energy().unwrap() / KILOJOULE_PER_MOLE;
    let temperature = 2.0 * ke / (3.0 * n as f64 * BOLTZMANN);

    // Statistical fluctuations scale as sqrt(2/3N); 20% is generous for N=216
    assert!(
        (temperature - target).abs() / target < 0.2,
        "Temperature: {:.1} K (target: {:.1} K)",
        temperature,
        target
    );
}

#[test]
fn test_constraint_holds_during_dynamics() {
    let coupled = ConstraintCoupledHarmonicOscillator::default();
    let d = coupled.d;
    let integrator = VerletIntegrator::new(1.0 * FEMTOSECOND);
    let mut context = Context::new(coupled.system().clone(), integrator);
    context.set_positions(coupled.positions()).unwrap();

    let mut rng = StdRng::seed_from_u64(3);
    context.set_velocities_to_temperature(300.0 * KELVIN, &mut rng);

    for _ in 0..10 {
        context.step(10).unwrap();
        let state = context.state(StateRequest::all()).unwrap();
        let positions = state.positions().unwrap();
        let dist = (positions[0] - positions[1]).length();
        assert!(
            (dist - d).abs() < 1e-6,
            "constraint violated: |r| = {:.9} nm, expected {:.9} nm",
            dist,
            d
        );
    }
}

#[test]
fn test_stepping_requires_positions() {
    let oscillator = HarmonicOscillator::default();
    let integrator = VerletIntegrator::new(1.0 * FEMTOSECOND);
    let mut context = Context::new(oscillator.system().clone(), integrator);
    assert!(context.step(1).is_err());
}
