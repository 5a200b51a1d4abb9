//! Uniform grid for radius neighbourhood queries over alpha-carbon traces.

use std::collections::HashMap;

/// Grid-based spatial index for 3D point queries.
///
/// Space is divided into cubic cells of the query radius, so every point
/// within the radius of a query lies in the query's cell or one of its 26
/// neighbours.
#[derive(Debug)]
pub struct SpatialGrid {
    inv_cell_size: f64,
    cells: HashMap<(i64, i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    /// # Panics
    ///
    /// Panics if `cell_size <= 0.0`.
    pub fn new(cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "Cell size must be positive");
        Self {
            inv_cell_size: 1.0 / cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn from_positions(positions: &[[f64; 3]], cell_size: f64) -> Self {
        let mut grid = Self::new(cell_size);
        for (idx, pos) in positions.iter().enumerate() {
            grid.insert(idx, *pos);
        }
        grid
    }

    fn cell_coords(&self, pos: [f64; 3]) -> (i64, i64, i64) {
        (
            (pos[0] * self.inv_cell_size).floor() as i64,
            (pos[1] * self.inv_cell_size).floor() as i64,
            (pos[2] * self.inv_cell_size).floor() as i64,
        )
    }

    pub fn insert(&mut self, idx: usize, pos: [f64; 3]) {
        let cell = self.cell_coords(pos);
        self.cells.entry(cell).or_default().push(idx);
    }

    /// Indices of all points within `cutoff` (inclusive) of `query`, ascending.
    ///
    /// `cutoff` must not exceed the cell size the grid was built with.
    pub fn query_radius(&self, query: [f64; 3], positions: &[[f64; 3]], cutoff: f64) -> Vec<usize> {
        let cutoff_sq = cutoff * cutoff;
        let (cx, cy, cz) = self.cell_coords(query);

        let mut results = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(indices) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) else {
                        continue;
                    };
                    for &idx in indices {
                        if squared_distance(positions[idx], query) <= cutoff_sq {
                            results.push(idx);
                        }
                    }
                }
            }
        }

        results.sort_unstable();
        results
    }
}

#[inline]
pub fn squared_distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}
