use md_testsystems::testsystems::{LennardJonesCrystal, TestSystem};
use std::time::Instant;

fn measure_avg_time(crystal: &LennardJonesCrystal, threads: usize, iters: usize) -> f64 {
    let start = Instant::now();
    for _ in 0..iters {
        crystal
            .system()
            .compute_energy_with_threads(crystal.positions(), threads);
    }
    start.elapsed().as_secs_f64() * 1000.0 / iters as f64
}

fn main() {
    let thread_counts = [1, 2, 4, 8];
    let cell_counts = [5, 7, 9];
    let iters = 5;

    println!("{:<10} | {:<10} | {:<12} | {:<10}", "Cells", "Particles", "Threads", "ms/eval");
    println!("{:-<52}", "");

    for &cells in &cell_counts {
        let crystal = LennardJonesCrystal::new(cells);
        let n = crystal.system().num_particles();
        // Warm-up
        crystal.system().compute_energy(crystal.positions());

        for &threads in &thread_counts {
            let avg = measure_avg_time(&crystal, threads, iters);
            println!("{:<10} | {:<10} | {:<12} | {:<10.3}", cells, n, threads, avg);
        }
    }
}
