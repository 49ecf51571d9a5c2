use crate::cell::{CellType, UnitCell};
use glam::DVec3;

/// Spatial binning of particle positions for cutoff-limited pair searches.
pub struct CellList {
    bins: Vec<Vec<usize>>,
    dims: [usize; 3],
    bin_size: DVec3,
    min_p: DVec3,
    periodic: bool,
}

impl CellList {
    pub fn build(positions: &[DVec3], cell: &UnitCell, cutoff: f64) -> Self {
        let (min_p, max_p) = match cell.cell_type {
            CellType::None => {
                let mut min = positions[0];
                let mut max = positions[0];
                for &p in positions {
                    min = min.min(p);
                    max = max.max(p);
                }
                (min, max)
            }
            CellType::Orthorhombic { size } => (DVec3::ZERO, size),
            CellType::Triclinic { matrix } => {
                // Bounding box over the cell corners
                let mut min = DVec3::ZERO;
                let mut max = DVec3::ZERO;
                for ix in 0..2 {
                    for iy in 0..2 {
                        for iz in 0..2 {
                            let corner = matrix.col(0) * ix as f64
                                + matrix.col(1) * iy as f64
                                + matrix.col(2) * iz as f64;
                            min = min.min(corner);
                            max = max.max(corner);
                        }
                    }
                }
                (min, max)
            }
        };

        let span = max_p - min_p;
        let dims = [
            ((span.x / cutoff).floor() as usize).max(1),
            ((span.y / cutoff).floor() as usize).max(1),
            ((span.z / cutoff).floor() as usize).max(1),
        ];
        let bin_size = DVec3::new(
            span.x / dims[0] as f64,
            span.y / dims[1] as f64,
            span.z / dims[2] as f64,
        );

        let mut bins = vec![Vec::new(); dims[0] * dims[1] * dims[2]];
        for (i, &p) in positions.iter().enumerate() {
            let rel = p - min_p;
            let ix = ((rel.x / bin_size.x) as usize).min(dims[0] - 1);
            let iy = ((rel.y / bin_size.y) as usize).min(dims[1] - 1);
            let iz = ((rel.z / bin_size.z) as usize).min(dims[2] - 1);
            bins[(ix * dims[1] + iy) * dims[2] + iz].push(i);
        }

        Self {
            bins,
            dims,
            bin_size,
            min_p,
            periodic: cell.is_periodic(),
        }
    }

    /// Indices of all particles in the bin containing `pos` and its 26 neighbors.
    pub fn neighbors(&self, pos: DVec3) -> Vec<usize> {
        let rel = pos - self.min_p;
        let ix = (rel.x / self.bin_size.x) as i64;
        let iy = (rel.y / self.bin_size.y) as i64;
        let iz = (rel.z / self.bin_size.z) as i64;

        let mut result = Vec::new();
        for dx in -1..=1i64 {
            for dy in -1..=1i64 {
                for dz in -1..=1i64 {
                    let mut nx = ix + dx;
                    let mut ny = iy + dy;
                    let mut nz = iz + dz;

                    if self.periodic {
                        nx = nx.rem_euclid(self.dims[0] as i64);
                        ny = ny.rem_euclid(self.dims[1] as i64);
                        nz = nz.rem_euclid(self.dims[2] as i64);
                    }

                    if nx < 0 || nx >= self.dims[0] as i64
                        || ny < 0 || ny >= self.dims[1] as i64
                        || nz < 0 || nz >= self.dims[2] as i64
                    {
                        continue;
                    }
                    let idx = (nx as usize * self.dims[1] + ny as usize) * self.dims[2] + nz as usize;
                    result.extend(&self.bins[idx]);
                }
            }
        }

        // With few bins along an axis the same bin is visited more than once
        result.sort_unstable();
        result.dedup();
        result
    }
}
