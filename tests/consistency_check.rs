use md_testsystems::testsystems::{LennardJonesFluid, TestSystem};
use glam::DVec3;

#[test]
fn test_sequential_parallel_consistency() {
    let fluid = LennardJonesFluid::default();
    let system = fluid.system();
    let positions = fluid.positions();
    let n = system.num_particles();

    // Calculate forces sequentially
    let mut forces_seq = vec![DVec3::ZERO; n];
    let energy_seq = system.compute_forces_with_threads(positions, &mut forces_seq, 1);

    // Calculate forces in parallel
    let mut forces_par = vec![DVec3::ZERO; n];
    let energy_par = system.compute_forces_with_threads(positions, &mut forces_par, 4);

    // Compare Energy
    let energy_diff = (energy_seq.total - energy_par.total).abs();
    println!("Energy Seq: {:.10}", energy_seq.total);
    println!("Energy Par: {:.10}", energy_par.total);
    println!("Energy Diff: {:.10e}", energy_diff);

    assert!(energy_diff < 1e-6, "Energy mismatch between sequential and parallel");

    // Compare Forces
    let mut max_force_diff = 0.0;
    for (f_s, f_p) in forces_seq.iter().zip(forces_par.iter()) {
        let diff = (*f_s - *f_p).length();
        if diff > max_force_diff {
            max_force_diff = diff;
        }
    }
    println!("Max Force Diff: {:.10e}", max_force_diff);
    assert!(max_force_diff < 1e-6, "Force mismatch between sequential and parallel");
}

#[test]
fn test_energy_only_matches_forces_path() {
    let fluid = LennardJonesFluid::default();
    let system = fluid.system();
    let positions = fluid.positions();

    let mut forces = vec![DVec3::ZERO; system.num_particles()];
    let with_forces = system.compute_forces_with_threads(positions, &mut forces, 1);
    let energy_only = system.compute_energy_with_threads(positions, 1);

    assert!((with_forces.total - energy_only.total).abs() < 1e-12);
}
