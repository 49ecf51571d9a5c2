use crate::spatial::CellList;
use crate::system::interactions::*;
use crate::system::{EnergyTerms, System};
use glam::DVec3;

// Below this count an all-pairs sweep beats building the cell list.
const CELL_LIST_THRESHOLD: usize = 100;

impl System {
    pub(crate) fn compute_forces_serial(&self, positions: &[DVec3], forces: &mut [DVec3]) -> EnergyTerms {
        for f in forces.iter_mut() {
            *f = DVec3::ZERO;
        }

        let mut energy = EnergyTerms::default();
        energy.external = self.accumulate_wells(positions, forces);
        energy.bonded = self.accumulate_bonds(positions, forces);
        energy.nonbonded = self.accumulate_nonbonded_serial(positions, forces);
        energy.total = energy.external + energy.bonded + energy.nonbonded;
        energy
    }

    pub(crate) fn accumulate_wells(&self, positions: &[DVec3], forces: &mut [DVec3]) -> f64 {
        let mut energy = 0.0;
        for well in &self.wells {
            let (e, f) = calculate_well(positions[well.particle], well.center, well.k);
            energy += e;
            forces[well.particle] += f;
        }
        for well in &self.power_wells {
            let (e, f) = calculate_power_well(positions[well.particle], well.center, well.k, well.b);
            energy += e;
            forces[well.particle] += f;
        }
        energy
    }

    pub(crate) fn accumulate_bonds(&self, positions: &[DVec3], forces: &mut [DVec3]) -> f64 {
        let mut energy = 0.0;
        for bond in &self.bonds {
            let (i, j) = bond.particles;
            let diff = self.cell.distance_vector(positions[i], positions[j]);
            if let Some((e, f_vec)) = calculate_bond(diff, bond.k, bond.r0) {
                energy += e;
                forces[i] += f_vec;
                forces[j] -= f_vec;
            }
        }
        energy
    }

    fn accumulate_nonbonded_serial(&self, positions: &[DVec3], forces: &mut [DVec3]) -> f64 {
        let Some(nb) = &self.nonbonded else { return 0.0 };
        let n = positions.len();
        let mut energy = 0.0;

        match nb.cutoff {
            Some(cutoff) if n >= CELL_LIST_THRESHOLD => {
                let wrapped: Vec<DVec3> = positions.iter().map(|&p| self.cell.wrap_vector(p)).collect();
                let cl = CellList::build(&wrapped, &self.cell, cutoff);
                for i in 0..n {
                    for j in cl.neighbors(wrapped[i]) {
                        if i >= j { continue; }
                        let diff = self.cell.distance_vector(wrapped[i], wrapped[j]);
                        if let Some((e, f_vec)) =
                            calculate_nonbonded(diff, &nb.sites[i], &nb.sites[j], nb.cutoff)
                        {
                            energy += e;
                            forces[i] += f_vec;
                            forces[j] -= f_vec;
                        }
                    }
                }
            }
            _ => {
                for i in 0..n {
                    for j in (i + 1)..n {
                        let diff = self.cell.distance_vector(positions[i], positions[j]);
                        if let Some((e, f_vec)) =
                            calculate_nonbonded(diff, &nb.sites[i], &nb.sites[j], nb.cutoff)
                        {
                            energy += e;
                            forces[i] += f_vec;
                            forces[j] -= f_vec;
                        }
                    }
                }
            }
        }
        energy
    }
}
