//! # md-testsystems
//!
//! `md-testsystems` is a library of predefined molecular test systems
//! (oscillators, Lennard-Jones phases, ionic crystals) with closed-form
//! reference properties, plus a minimal engine to evaluate their energies
//! and integrate their dynamics.
//!
//! ## Features
//! - **Self-contained**: every variant is built from code, no input files.
//! - **Analytical references**: variants declare named closed-form
//!   properties evaluated at a thermodynamic state.
//! - **Deterministic registry**: variants are enumerated sorted by name,
//!   each annotated with its evaluation cost.
//! - **Parallel**: non-bonded energy evaluation uses Rayon and cell lists
//!   for large periodic systems.
//!
//! ## Quick Start
//!
//! ```rust
//! use md_testsystems::testsystems::{HarmonicOscillator, TestSystem};
//! use md_testsystems::units::{FEMTOSECOND, KILOCALORIE_PER_MOLE};
//! use md_testsystems::{Context, StateRequest, VerletIntegrator};
//!
//! let oscillator = HarmonicOscillator::default();
//! let integrator = VerletIntegrator::new(1.0 * FEMTOSECOND);
//! let mut context = Context::new(oscillator.system().clone(), integrator);
//! context.set_positions(oscillator.positions()).unwrap();
//!
//! let state = context.state(StateRequest::energy()).unwrap();
//! let energy = state.potential_energy().unwrap() / KILOCALORIE_PER_MOLE;
//! assert!(!energy.is_nan());
//! ```

pub mod cell;
pub mod context;
pub mod integrator;
pub mod spatial;
pub mod system;
pub mod testsystems;
pub mod units;

pub use cell::{CellType, UnitCell};
pub use context::{Context, ContextError, State, StateRequest};
pub use integrator::VerletIntegrator;
pub use system::{EnergyTerms, System};
pub use testsystems::{
    registry, AnalyticalProperty, Cost, RegistryEntry, TestSystem, ThermodynamicState,
};

use std::sync::Once;
static START: Once = Once::new();

/// Initializes the Rayon thread pool.
/// If `num_threads` is Some(n), it sets that specific number.
/// If `num_threads` is None, it checks `RAYON_NUM_THREADS` env var or defaults to 4.
pub fn init_parallelism(num_threads: Option<usize>) {
    let threads = match num_threads {
        Some(n) => n,
        None => std::env::var("RAYON_NUM_THREADS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4),
    };

    START.call_once(|| {
        let _ = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global();
    });
}
