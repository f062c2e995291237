//! Uniform-grid spatial index for proximity queries
//!
//! Maps a bounding volume into fixed-size cells and answers "what is
//! near this point" by returning everything in the containing cell and
//! its 26 neighbors. This is a fixed local neighborhood, not an exact
//! radius search: the caller sizes the cells so that any item within
//! its query radius is guaranteed to land in the neighborhood (cell
//! edge >= query radius), and accepts the extra items it gets back.
//!
//! Author: Moroya Sakamoto

use crate::types::Aabb;
use glam::Vec3;

/// Uniform grid over a bounding volume
pub struct SpatialHash<T> {
    bounds: Aabb,
    cell_size: f32,
    dims: [usize; 3],
    cells: Vec<Vec<T>>,
    len: usize,
}

impl<T> SpatialHash<T> {
    /// Create a grid over `bounds` with `resolution` cells along the
    /// longest axis. A resolution of zero is treated as one.
    pub fn new(bounds: Aabb, resolution: u32) -> Self {
        let resolution = resolution.max(1);
        let longest = bounds.largest_extent();
        let cell_size = if longest > 0.0 {
            longest / resolution as f32
        } else {
            1.0
        };

        let size = bounds.size();
        let dims = [
            ((size.x / cell_size).ceil() as usize).max(1),
            ((size.y / cell_size).ceil() as usize).max(1),
            ((size.z / cell_size).ceil() as usize).max(1),
        ];

        let cell_count = dims[0] * dims[1] * dims[2];
        SpatialHash {
            bounds,
            cell_size,
            dims,
            cells: (0..cell_count).map(|_| Vec::new()).collect(),
            len: 0,
        }
    }

    /// Total number of stored items
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing is stored
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Edge length of one cell
    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell coordinates containing a position, clamped to the grid so
    /// positions on or past the boundary use the edge cells
    #[inline]
    fn cell_coords(&self, position: Vec3) -> [usize; 3] {
        let local = (position - self.bounds.min) / self.cell_size;
        [
            (local.x.floor().max(0.0) as usize).min(self.dims[0] - 1),
            (local.y.floor().max(0.0) as usize).min(self.dims[1] - 1),
            (local.z.floor().max(0.0) as usize).min(self.dims[2] - 1),
        ]
    }

    #[inline]
    fn cell_index(&self, coords: [usize; 3]) -> usize {
        (coords[2] * self.dims[1] + coords[1]) * self.dims[0] + coords[0]
    }

    /// Insert an item at a position
    pub fn insert(&mut self, item: T, position: Vec3) {
        let idx = self.cell_index(self.cell_coords(position));
        self.cells[idx].push(item);
        self.len += 1;
    }

    /// All items in the cell containing `position` and its immediate
    /// neighbors (up to 27 cells)
    pub fn neighbours(&self, position: Vec3) -> Vec<&T> {
        let center = self.cell_coords(position);
        let mut out = Vec::new();

        for dz in -1isize..=1 {
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let x = center[0] as isize + dx;
                    let y = center[1] as isize + dy;
                    let z = center[2] as isize + dz;
                    if x < 0
                        || y < 0
                        || z < 0
                        || x >= self.dims[0] as isize
                        || y >= self.dims[1] as isize
                        || z >= self.dims[2] as isize
                    {
                        continue;
                    }
                    let idx = self.cell_index([x as usize, y as usize, z as usize]);
                    out.extend(self.cells[idx].iter());
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid(resolution: u32) -> SpatialHash<u32> {
        SpatialHash::new(
            Aabb::new(Vec3::ZERO, Vec3::splat(10.0)),
            resolution,
        )
    }

    #[test]
    fn test_nearby_items_are_found() {
        let mut hash = unit_grid(10);
        hash.insert(1, Vec3::new(5.0, 5.0, 5.0));
        hash.insert(2, Vec3::new(5.5, 5.5, 5.5));
        hash.insert(3, Vec3::new(4.2, 5.0, 5.0));

        let found = hash.neighbours(Vec3::new(5.1, 5.1, 5.1));
        assert!(found.contains(&&1));
        assert!(found.contains(&&2));
        assert!(found.contains(&&3));
    }

    #[test]
    fn test_distant_items_are_skipped() {
        let mut hash = unit_grid(10);
        hash.insert(1, Vec3::new(1.0, 1.0, 1.0));
        hash.insert(2, Vec3::new(9.0, 9.0, 9.0));

        let found = hash.neighbours(Vec3::new(1.0, 1.0, 1.0));
        assert!(found.contains(&&1));
        assert!(!found.contains(&&2));
    }

    #[test]
    fn test_boundary_positions_clamp_to_edge_cells() {
        let mut hash = unit_grid(10);
        hash.insert(1, Vec3::splat(10.0));
        hash.insert(2, Vec3::splat(11.5));

        assert_eq!(hash.len(), 2);
        let found = hash.neighbours(Vec3::splat(9.9));
        assert!(found.contains(&&1));
        assert!(found.contains(&&2));
    }

    #[test]
    fn test_degenerate_bounds() {
        let mut hash: SpatialHash<u32> =
            SpatialHash::new(Aabb::new(Vec3::ZERO, Vec3::ZERO), 8);
        hash.insert(7, Vec3::ZERO);
        assert_eq!(hash.neighbours(Vec3::ZERO), vec![&7]);
    }

    #[test]
    fn test_resolution_one_sees_everything_in_one_cell_radius() {
        let mut hash = unit_grid(1);
        hash.insert(1, Vec3::new(0.5, 0.5, 0.5));
        hash.insert(2, Vec3::new(9.5, 9.5, 9.5));
        let found = hash.neighbours(Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(found.len(), 2);
    }
}
