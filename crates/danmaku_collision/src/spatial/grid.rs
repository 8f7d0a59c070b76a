//! Uniform hash-grid spatial index
//!
//! The playfield is carved into square cells; every entry is recorded in
//! each cell its AABB overlaps, so a query only has to visit the cells the
//! query bounds overlap. Suited to the shot population: flat, 2D, dense,
//! and repositioned every frame.
//!
//! Entries whose bounds would span an excessive number of cells (huge
//! spell circles, screen-length lasers at a diagonal) go into a flat
//! oversized bucket that every query checks. That caps the per-entry cell
//! count, so one giant shape degrades to a handful of extra narrow-phase
//! tests instead of thousands of bucket insertions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Aabb;
use crate::intersection::IntersectionKey;
use crate::spatial::SpatialIndex;

/// Tuning parameters for [`UniformGrid`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Cell edge length in playfield units
    ///
    /// Best set to a few typical shot diameters; the default assumes the
    /// usual 8-16 unit bullet hitboxes.
    pub cell_size: f32,

    /// Entries overlapping more cells than this go to the oversized bucket
    pub max_cells_per_entry: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 32.0,
            max_cells_per_entry: 64,
        }
    }
}

/// Integer cell coordinates covered by an AABB, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CellRange {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl CellRange {
    fn cell_count(&self) -> usize {
        // i64 math: a playfield-spanning AABB can cover the whole i32 range
        let nx = i64::from(self.x1) - i64::from(self.x0) + 1;
        let ny = i64::from(self.y1) - i64::from(self.y0) + 1;
        nx.saturating_mul(ny).min(i64::from(u32::MAX)) as usize
    }

    fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let ys = self.y0..=self.y1;
        (self.x0..=self.x1).flat_map(move |x| ys.clone().map(move |y| (x, y)))
    }
}

/// Uniform grid implementation of [`SpatialIndex`]
pub struct UniformGrid {
    cell_size: f32,
    max_cells_per_entry: usize,
    cells: HashMap<(i32, i32), Vec<IntersectionKey>>,
    oversized: Vec<IntersectionKey>,
    len: usize,
}

impl UniformGrid {
    /// Create a grid from its configuration
    pub fn new(config: GridConfig) -> Self {
        Self {
            cell_size: config.cell_size.max(f32::MIN_POSITIVE),
            max_cells_per_entry: config.max_cells_per_entry.max(1),
            cells: HashMap::new(),
            oversized: Vec::new(),
            len: 0,
        }
    }

    fn cell_range(&self, aabb: &Aabb) -> CellRange {
        let x0 = (aabb.min.x / self.cell_size).floor() as i32;
        let y0 = (aabb.min.y / self.cell_size).floor() as i32;
        let x1 = (aabb.max.x / self.cell_size).floor() as i32;
        let y1 = (aabb.max.y / self.cell_size).floor() as i32;
        CellRange {
            x0,
            y0,
            x1: x1.max(x0),
            y1: y1.max(y0),
        }
    }
}

impl Default for UniformGrid {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl SpatialIndex for UniformGrid {
    fn insert(&mut self, key: IntersectionKey, aabb: &Aabb) {
        let range = self.cell_range(aabb);
        if range.cell_count() > self.max_cells_per_entry {
            self.oversized.push(key);
        } else {
            for cell in range.cells() {
                self.cells.entry(cell).or_default().push(key);
            }
        }
        self.len += 1;
    }

    fn remove(&mut self, key: IntersectionKey, aabb: &Aabb) {
        let range = self.cell_range(aabb);
        let mut found = false;
        if range.cell_count() > self.max_cells_per_entry {
            if let Some(pos) = self.oversized.iter().position(|&k| k == key) {
                self.oversized.swap_remove(pos);
                found = true;
            }
        } else {
            for cell in range.cells() {
                if let Some(keys) = self.cells.get_mut(&cell) {
                    if let Some(pos) = keys.iter().position(|&k| k == key) {
                        keys.swap_remove(pos);
                        found = true;
                    }
                    if keys.is_empty() {
                        self.cells.remove(&cell);
                    }
                }
            }
        }
        if found {
            self.len -= 1;
        }
    }

    fn update(&mut self, key: IntersectionKey, old: &Aabb, new: &Aabb) {
        // Most shots move less than a cell per frame
        if self.cell_range(old) == self.cell_range(new) {
            return;
        }
        self.remove(key, old);
        self.insert(key, new);
    }

    fn query(&self, aabb: &Aabb, out: &mut Vec<IntersectionKey>) {
        out.clear();
        let range = self.cell_range(aabb);
        let count = range.cell_count();
        if count > self.max_cells_per_entry && count > self.cells.len() {
            // walking occupied cells beats walking the query range; the
            // extra keys are false positives the narrow phase discards
            for keys in self.cells.values() {
                out.extend_from_slice(keys);
            }
        } else {
            for cell in range.cells() {
                if let Some(keys) = self.cells.get(&cell) {
                    out.extend_from_slice(keys);
                }
            }
        }
        out.extend_from_slice(&self.oversized);
        out.sort_unstable();
        out.dedup();
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.oversized.clear();
        self.len = 0;
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point2;
    use slotmap::SlotMap;

    fn keys(n: usize) -> Vec<IntersectionKey> {
        let mut map: SlotMap<IntersectionKey, ()> = SlotMap::with_key();
        (0..n).map(|_| map.insert(())).collect()
    }

    fn aabb(x0: f32, y0: f32, x1: f32, y1: f32) -> Aabb {
        Aabb::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn query_finds_entries_in_overlapping_cells() {
        let k = keys(3);
        let mut grid = UniformGrid::default();
        grid.insert(k[0], &aabb(0.0, 0.0, 10.0, 10.0));
        grid.insert(k[1], &aabb(100.0, 100.0, 110.0, 110.0));
        grid.insert(k[2], &aabb(500.0, 500.0, 510.0, 510.0));

        let mut out = Vec::new();
        grid.query(&aabb(-5.0, -5.0, 120.0, 120.0), &mut out);
        assert_eq!(out, {
            let mut expect = vec![k[0], k[1]];
            expect.sort_unstable();
            expect
        });
    }

    #[test]
    fn entry_spanning_cells_is_reported_once() {
        let k = keys(1);
        let mut grid = UniformGrid::new(GridConfig {
            cell_size: 8.0,
            ..GridConfig::default()
        });
        grid.insert(k[0], &aabb(0.0, 0.0, 30.0, 30.0));

        let mut out = Vec::new();
        grid.query(&aabb(0.0, 0.0, 30.0, 30.0), &mut out);
        assert_eq!(out, vec![k[0]]);
    }

    #[test]
    fn remove_is_complete_and_len_tracks() {
        let k = keys(2);
        let mut grid = UniformGrid::default();
        let a = aabb(0.0, 0.0, 50.0, 50.0);
        let b = aabb(10.0, 10.0, 20.0, 20.0);
        grid.insert(k[0], &a);
        grid.insert(k[1], &b);
        assert_eq!(grid.len(), 2);

        grid.remove(k[0], &a);
        assert_eq!(grid.len(), 1);
        let mut out = Vec::new();
        grid.query(&a, &mut out);
        assert_eq!(out, vec![k[1]]);

        // removing again is a no-op
        grid.remove(k[0], &a);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn update_moves_entry_between_cells() {
        let k = keys(1);
        let mut grid = UniformGrid::default();
        let old = aabb(0.0, 0.0, 10.0, 10.0);
        let new = aabb(200.0, 200.0, 210.0, 210.0);
        grid.insert(k[0], &old);
        grid.update(k[0], &old, &new);

        let mut out = Vec::new();
        grid.query(&old, &mut out);
        assert!(out.is_empty());
        grid.query(&new, &mut out);
        assert_eq!(out, vec![k[0]]);
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn oversized_entries_show_up_in_every_query() {
        let k = keys(1);
        let mut grid = UniformGrid::new(GridConfig {
            cell_size: 8.0,
            max_cells_per_entry: 4,
        });
        let huge = aabb(-1000.0, -1000.0, 1000.0, 1000.0);
        grid.insert(k[0], &huge);

        let mut out = Vec::new();
        grid.query(&aabb(900.0, 900.0, 901.0, 901.0), &mut out);
        assert_eq!(out, vec![k[0]]);

        grid.remove(k[0], &huge);
        grid.query(&aabb(900.0, 900.0, 901.0, 901.0), &mut out);
        assert!(out.is_empty());
        assert_eq!(grid.len(), 0);
    }
}
