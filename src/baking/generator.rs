//! Surfel generation over static scene geometry
//!
//! Precomputes a uniformly distributed surfel set over every static
//! mesh instance in a scene. Per sub-mesh, world-space triangles go
//! into a [`LogarithmicBin`] keyed by area; the engine repeatedly
//! draws a triangle with area-proportional probability, places a
//! random candidate point on it, and accepts the candidate when no
//! nearby surfel with a non-opposing normal is closer than the
//! configured minimum distance. After every draw the triangle is
//! either discarded (fully covered by an accepted surfel's sphere, or
//! too small to subdivide) or replaced by its four midpoint children,
//! so the loop always terminates.
//!
//! Accepted surfels are clustered and packed into GPU buffers; see
//! [`crate::baking::cluster`] and [`crate::baking::pack`].
//!
//! # Usage
//! ```rust,ignore
//! use surfel_gi::prelude::*;
//!
//! let config = SurfelGenConfig::default();
//! let data = SurfelGenerator::new(&scene, &resources, config).generate();
//! println!("{} surfels in {} clusters", data.surfel_count(), data.cluster_count());
//! ```
//!
//! Author: Moroya Sakamoto

use crate::baking::bin::{BinHandle, LogarithmicBin};
use crate::baking::cluster::build_clusters;
use crate::baking::rng::Rng64;
use crate::baking::spatial_hash::SpatialHash;
use crate::baking::surfel::{Surfel, SurfelData};
use crate::baking::SurfelGenConfig;
use crate::scene::{Material, MeshInstance, ResourcePool, Scene, SubMesh};
use crate::types::{Sphere, Triangle2, Triangle3};
use glam::Vec3;
use std::f32::consts::PI;

/// Degenerate triangles at or below this area are skipped outright
const DEGENERATE_TRIANGLE_AREA: f32 = 1e-6;

// ── Bin payload ──────────────────────────────────────────────

/// One world-space triangle carried through the sampling bin:
/// positions, normals, and texture coordinates after the owning
/// instance's model and normal transforms
#[derive(Debug, Clone, Copy)]
struct TriangleData {
    positions: Triangle3,
    normals: Triangle3,
    uvs: Triangle2,
}

impl TriangleData {
    /// Midpoint-subdivide into four children, splitting positions,
    /// normals, and UVs in lockstep
    fn split(&self) -> [TriangleData; 4] {
        let positions = self.positions.split();
        let normals = self.normals.split();
        let uvs = self.uvs.split();

        [0, 1, 2, 3].map(|i| TriangleData {
            positions: positions[i],
            normals: normals[i],
            uvs: uvs[i],
        })
    }
}

/// A tentative sample drawn on a bin triangle. Holds the handle of the
/// triangle it came from so the loop can subdivide or erase it after
/// the acceptance and coverage tests.
struct SurfelCandidate {
    position: Vec3,
    normal: Vec3,
    barycentric: Vec3,
    bin_handle: BinHandle,
}

// ── Generator ────────────────────────────────────────────────

/// Offline surfel generator for the static geometry of one scene
pub struct SurfelGenerator<'a> {
    scene: &'a Scene,
    resources: &'a ResourcePool,
    config: SurfelGenConfig,
    rng: Rng64,
}

impl<'a> SurfelGenerator<'a> {
    /// Create a generator over a scene and its resources
    pub fn new(scene: &'a Scene, resources: &'a ResourcePool, config: SurfelGenConfig) -> Self {
        let rng = Rng64::new(config.seed);
        SurfelGenerator {
            scene,
            resources,
            config,
            rng,
        }
    }

    /// Smallest triangle area still worth subdividing: a quarter of
    /// the disk area one surfel occupies
    fn optimal_minimum_subdivision_area(&self) -> f32 {
        PI * self.config.minimum_distance * self.config.minimum_distance / 4.0
    }

    /// Uniform random barycentric coordinates.
    ///
    /// Draws `(r, s)` on the unit square and reflects across the
    /// diagonal when the point falls outside the triangle, which
    /// preserves uniformity.
    fn random_barycentric(&mut self) -> Vec3 {
        let mut r = self.rng.next_f32();
        let mut s = self.rng.next_f32();

        if r + s >= 1.0 {
            r = 1.0 - r;
            s = 1.0 - s;
        }

        Vec3::new(r, s, 1.0 - r - s)
    }

    /// Transform a sub-mesh into world space and load its triangles
    /// into a weighted bin keyed by area.
    ///
    /// Degenerate triangles are dropped here. The bin's weight floor
    /// is truncated to the optimal minimum subdivision area, so
    /// triangles smaller than optimal enter at the floor weight
    /// rather than their true area.
    fn construct_sub_mesh_bin(
        &self,
        sub_mesh: &SubMesh,
        instance: &MeshInstance,
    ) -> LogarithmicBin<TriangleData> {
        let model = instance.transformation.model_matrix();
        let normal_matrix = instance.transformation.normal_matrix();

        let mut triangles = Vec::new();
        let mut maximum_area = f32::MIN;

        for corners in sub_mesh.vertices.chunks_exact(3) {
            let positions = Triangle3::new(
                model.transform_point3(corners[0].position),
                model.transform_point3(corners[1].position),
                model.transform_point3(corners[2].position),
            );

            let area = positions.area();
            if area <= DEGENERATE_TRIANGLE_AREA {
                continue;
            }

            let normals = Triangle3::new(
                normal_matrix * corners[0].normal,
                normal_matrix * corners[1].normal,
                normal_matrix * corners[2].normal,
            );
            let uvs = Triangle2::new(corners[0].uv, corners[1].uv, corners[2].uv);

            triangles.push(TriangleData {
                positions,
                normals,
                uvs,
            });
            maximum_area = maximum_area.max(area);
        }

        let optimal_area = self.optimal_minimum_subdivision_area();
        let maximum_area = maximum_area.max(optimal_area);

        let mut bin = LogarithmicBin::new(optimal_area, maximum_area);
        for triangle in triangles {
            // Insertion clamps sub-optimal areas up to the floor weight
            let area = triangle.positions.area();
            bin.insert(triangle, area);
        }
        bin
    }

    /// Draw a weighted-random triangle and place a candidate on it
    fn generate_candidate(
        &mut self,
        bin: &LogarithmicBin<TriangleData>,
    ) -> Option<(SurfelCandidate, TriangleData)> {
        let handle = bin.random(&mut self.rng)?;
        let data = *bin.get(handle)?;

        let ab = data.positions.b - data.positions.a;
        let ac = data.positions.c - data.positions.a;
        let nab = data.normals.b - data.normals.a;
        let nac = data.normals.c - data.normals.a;

        let barycentric = self.random_barycentric();
        let position = data.positions.a + ab * barycentric.x + ac * barycentric.y;
        let normal = (data.normals.a + nab * barycentric.x + nac * barycentric.y)
            .normalize_or_zero();

        Some((
            SurfelCandidate {
                position,
                normal,
                barycentric,
                bin_handle: handle,
            },
            data,
        ))
    }

    /// A candidate is acceptable when every nearby surfel with a
    /// non-opposing normal keeps the minimum distance. Surfels facing
    /// the other way are ignored so samples on the far side of a thin
    /// wall cannot suppress each other.
    fn meets_minimum_distance(
        &self,
        candidate: &SurfelCandidate,
        surfels: &SpatialHash<Surfel>,
    ) -> bool {
        let minimum_distance_sq =
            self.config.minimum_distance * self.config.minimum_distance;

        for surfel in surfels.neighbours(candidate.position) {
            if surfel.normal.dot(candidate.normal) < 0.0 {
                continue;
            }
            if surfel.position.distance_squared(candidate.position) < minimum_distance_sq {
                return false;
            }
        }
        true
    }

    /// True when some accepted surfel's minimum-distance sphere fully
    /// encloses the triangle
    fn triangle_completely_covered(
        &self,
        triangle: &Triangle3,
        surfels: &SpatialHash<Surfel>,
    ) -> bool {
        for surfel in surfels.neighbours(triangle.a) {
            let enclosing = Sphere::new(surfel.position, self.config.minimum_distance);
            if enclosing.contains_triangle(triangle) {
                return true;
            }
        }
        false
    }

    /// Compute the full surfel for an accepted candidate: interpolated
    /// lightmap UV, low-frequency albedo in YCoCg, and footprint area
    fn generate_surfel(
        &self,
        candidate: &SurfelCandidate,
        data: &TriangleData,
        material: &Material,
    ) -> Surfel {
        let uv = data.uvs.a
            + (data.uvs.b - data.uvs.a) * candidate.barycentric.x
            + (data.uvs.c - data.uvs.a) * candidate.barycentric.y;

        let color = material.albedo.sample(uv).to_ycocg();
        let area = PI * self.config.minimum_distance * self.config.minimum_distance;

        Surfel::new(candidate.position, candidate.normal, color, uv, area)
    }

    /// Run the sampling loop over one sub-mesh.
    ///
    /// Every iteration either erases the drawn triangle or replaces it
    /// with strictly smaller children bounded below by the bin's
    /// weight floor, so the bin shrinks monotonically to empty.
    fn generate_on_sub_mesh(
        &mut self,
        sub_mesh: &SubMesh,
        instance: &MeshInstance,
        material: &Material,
        surfel_hash: &mut SpatialHash<Surfel>,
        flat_surfels: &mut Vec<Surfel>,
    ) {
        let mut bin = self.construct_sub_mesh_bin(sub_mesh, instance);

        while let Some((candidate, data)) = self.generate_candidate(&bin) {
            let handle = candidate.bin_handle;

            // Candidates outside the baking volume are silently
            // discarded along with their triangle
            if !self.scene.baking_volume.contains(candidate.position) {
                bin.erase(handle);
                continue;
            }

            if self.meets_minimum_distance(&candidate, surfel_hash) {
                let surfel = self.generate_surfel(&candidate, &data, material);
                surfel_hash.insert(surfel, surfel.position);
                flat_surfels.push(surfel);
            }

            // Coverage test runs regardless of the acceptance outcome
            let child_area = data.positions.area() / 4.0;

            if self.triangle_completely_covered(&data.positions, surfel_hash) {
                bin.erase(handle);
            } else if child_area < bin.min_weight() {
                // Too small to subdivide further; this neighborhood is
                // already adequately dense
                bin.erase(handle);
            } else {
                bin.erase(handle);
                for child in data.split() {
                    if !self.triangle_completely_covered(&child.positions, surfel_hash) {
                        bin.insert(child, child_area);
                    }
                }
            }
        }
    }

    /// Generate surfels for all static geometry, cluster them, and
    /// pack the GPU buffers.
    ///
    /// Empty scenes and meshes produce an empty [`SurfelData`]; there
    /// is no error path.
    pub fn generate(mut self) -> SurfelData {
        let scene = self.scene;
        let resources = self.resources;

        // One expected sample per cell at the target density keeps the
        // cell edge at least one minimum distance, so every surfel
        // that could violate the distance test sits within the 27-cell
        // query neighborhood
        let surfels_per_unit_length = 1.0 / self.config.minimum_distance;
        let per_longest_dimension =
            scene.bounding_box.largest_extent() * surfels_per_unit_length;
        let resolution = (per_longest_dimension / self.config.samples_per_cell) as u32;

        let mut surfel_hash =
            SpatialHash::new(scene.bounding_box, resolution.max(1));
        let mut flat_surfels = Vec::new();

        for instance in scene.static_instances() {
            let mesh = resources.mesh(instance.mesh);
            for sub_mesh in &mesh.sub_meshes {
                let material = resources.material(sub_mesh.material);
                self.generate_on_sub_mesh(
                    sub_mesh,
                    instance,
                    material,
                    &mut surfel_hash,
                    &mut flat_surfels,
                );
            }
        }

        let (ordered, clusters) = build_clusters(
            flat_surfels,
            scene.baking_volume.largest_extent(),
            self.config.max_cluster_size,
        );
        SurfelData::build(ordered, clusters)
    }
}
