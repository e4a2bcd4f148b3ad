use glam::Vec3;

use crate::point::PointKey;

/// Spatial hash grid for nearest-neighbour queries over heat points.
///
/// Cells are cubes of `cell_size`. Uses a multiplicative hash into a fixed
/// bucket table, so distant cells may share a bucket; every candidate is
/// distance-checked so collisions only cost time.
pub struct SpatialHash {
    cell_size: f32,
    inv_cell_size: f32,
    table_size: usize,
    buckets: Vec<Vec<PointKey>>,
    len: usize,
}

impl SpatialHash {
    pub fn new(cell_size: f32, table_size: usize) -> Self {
        let mut buckets = Vec::with_capacity(table_size);
        for _ in 0..table_size {
            buckets.push(Vec::with_capacity(4));
        }
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            table_size,
            buckets,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Drop every point. Bucket allocations are kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Insert a point. The caller guarantees it is not already present.
    pub fn insert(&mut self, key: PointKey) {
        let hash = self.hash(key.to_vec3());
        self.buckets[hash].push(key);
        self.len += 1;
    }

    /// Remove a point. Returns false if it was not indexed.
    pub fn remove(&mut self, key: PointKey) -> bool {
        let hash = self.hash(key.to_vec3());
        let bucket = &mut self.buckets[hash];
        match bucket.iter().position(|&k| k == key) {
            Some(i) => {
                bucket.swap_remove(i);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    /// Closest indexed point to `query`, skipping `exclude`.
    ///
    /// Walks rings of cells outward from the query cell. After ring `k`,
    /// every unvisited point is at least `k * cell_size` away, so the search
    /// stops as soon as the best candidate is within that bound.
    ///
    /// Returns `None` when nothing was found, or when the walk would touch
    /// more than twice as many cells as there are points; a linear scan is
    /// cheaper then.
    pub fn nearest(&self, query: Vec3, exclude: Option<PointKey>) -> Option<(PointKey, f32)> {
        let (cx, cy, cz) = self.cell_coords(query);
        let budget = (self.len * 2).max(27);
        let mut visited = 0usize;
        let mut best: Option<(PointKey, f32)> = None;

        let mut ring = 0i32;
        loop {
            self.visit_ring(cx, cy, cz, ring, |hash| {
                for &key in &self.buckets[hash] {
                    if Some(key) == exclude {
                        continue;
                    }
                    let d = key.to_vec3().distance(query);
                    let d = if d.is_nan() { f32::INFINITY } else { d };
                    if best.map_or(true, |(_, best_d)| d < best_d) {
                        best = Some((key, d));
                    }
                }
            });

            if let Some((_, d)) = best {
                if d <= ring as f32 * self.cell_size {
                    return best;
                }
            }

            visited += ring_cell_count(ring);
            ring += 1;
            if visited + ring_cell_count(ring) > budget {
                return None;
            }
        }
    }

    /// Call `visit` with the bucket of every cell at Chebyshev distance
    /// exactly `ring` from (cx, cy, cz).
    fn visit_ring(&self, cx: i32, cy: i32, cz: i32, ring: i32, mut visit: impl FnMut(usize)) {
        if ring == 0 {
            visit(self.hash_cell(cx, cy, cz));
            return;
        }
        for dx in -ring..=ring {
            for dy in -ring..=ring {
                let nx = cx.wrapping_add(dx);
                let ny = cy.wrapping_add(dy);
                if dx.abs() == ring || dy.abs() == ring {
                    for dz in -ring..=ring {
                        visit(self.hash_cell(nx, ny, cz.wrapping_add(dz)));
                    }
                } else {
                    // Interior column: only the top and bottom caps are on the shell.
                    visit(self.hash_cell(nx, ny, cz.wrapping_sub(ring)));
                    visit(self.hash_cell(nx, ny, cz.wrapping_add(ring)));
                }
            }
        }
    }

    fn cell_coords(&self, pos: Vec3) -> (i32, i32, i32) {
        let cx = (pos.x * self.inv_cell_size).floor() as i32;
        let cy = (pos.y * self.inv_cell_size).floor() as i32;
        let cz = (pos.z * self.inv_cell_size).floor() as i32;
        (cx, cy, cz)
    }

    fn hash(&self, pos: Vec3) -> usize {
        let (cx, cy, cz) = self.cell_coords(pos);
        self.hash_cell(cx, cy, cz)
    }

    fn hash_cell(&self, cx: i32, cy: i32, cz: i32) -> usize {
        // Multiplicative spatial hash (Teschner et al. primes).
        let h = (cx as u32).wrapping_mul(73856093)
            ^ (cy as u32).wrapping_mul(19349663)
            ^ (cz as u32).wrapping_mul(83492791);
        (h as usize) % self.table_size
    }
}

/// Cells at Chebyshev distance exactly `ring` in 3D.
fn ring_cell_count(ring: i32) -> usize {
    if ring == 0 {
        return 1;
    }
    let outer = (2 * ring + 1) as usize;
    let inner = (2 * ring - 1) as usize;
    outer.pow(3) - inner.pow(3)
}
