use crate::spatial::CellList;
use crate::system::interactions::*;
use crate::system::{EnergyTerms, System};
use glam::DVec3;
use rayon::prelude::*;

impl System {
    pub(crate) fn compute_forces_parallel(&self, positions: &[DVec3], forces: &mut [DVec3]) -> EnergyTerms {
        for f in forces.iter_mut() {
            *f = DVec3::ZERO;
        }

        let mut energy = EnergyTerms::default();
        // O(N) terms stay serial
        energy.external = self.accumulate_wells(positions, forces);
        energy.bonded = self.accumulate_bonds(positions, forces);
        energy.nonbonded = self.accumulate_nonbonded_parallel(positions, forces);
        energy.total = energy.external + energy.bonded + energy.nonbonded;
        energy
    }

    fn accumulate_nonbonded_parallel(&self, positions: &[DVec3], forces: &mut [DVec3]) -> f64 {
        let Some(nb) = &self.nonbonded else { return 0.0 };
        let n = positions.len();

        let (wrapped, cl) = match nb.cutoff {
            Some(cutoff) => {
                let wrapped: Vec<DVec3> = positions.iter().map(|&p| self.cell.wrap_vector(p)).collect();
                let cl = CellList::build(&wrapped, &self.cell, cutoff);
                (Some(wrapped), Some(cl))
            }
            None => (None, None),
        };
        let points = wrapped.as_deref().unwrap_or(positions);

        let (total_energy, all_forces) = (0..n)
            .into_par_iter()
            .fold(|| (0.0, vec![DVec3::ZERO; n]), |(mut acc_e, mut acc_f), i| {
                let partners: Vec<usize> = match &cl {
                    Some(cl) => cl.neighbors(points[i]),
                    None => ((i + 1)..n).collect(),
                };
                for j in partners {
                    if i >= j { continue; }
                    let diff = self.cell.distance_vector(points[i], points[j]);
                    if let Some((e, f_vec)) =
                        calculate_nonbonded(diff, &nb.sites[i], &nb.sites[j], nb.cutoff)
                    {
                        acc_e += e;
                        acc_f[i] += f_vec;
                        acc_f[j] -= f_vec;
                    }
                }
                (acc_e, acc_f)
            })
            .reduce(|| (0.0, vec![DVec3::ZERO; n]), |(e1, f1), (e2, f2)| {
                let mut f_sum = f1;
                for (a, b) in f_sum.iter_mut().zip(f2.iter()) {
                    *a += *b;
                }
                (e1 + e2, f_sum)
            });

        for i in 0..n {
            forces[i] += all_forces[i];
        }
        total_energy
    }
}
