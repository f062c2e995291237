//! Common test helpers for surfel-gi integration tests
//!
//! Author: Moroya Sakamoto

use surfel_gi::prelude::*;

// ============================================================================
// Geometry builders
// ============================================================================

/// Two triangles forming a quad, normals along `normal`
pub fn quad_vertices(corners: [Vec3; 4], normal: Vec3) -> Vec<Vertex> {
    let uv = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    vec![
        Vertex::new(corners[0], normal, uv[0]),
        Vertex::new(corners[1], normal, uv[1]),
        Vertex::new(corners[2], normal, uv[2]),
        Vertex::new(corners[0], normal, uv[0]),
        Vertex::new(corners[2], normal, uv[2]),
        Vertex::new(corners[3], normal, uv[3]),
    ]
}

/// A 2x2 quad in the XZ plane, centered at the origin, facing +Y
pub fn ground_quad() -> Vec<Vertex> {
    quad_vertices(
        [
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(-1.0, 0.0, 1.0),
        ],
        Vec3::Y,
    )
}

/// Axis-aligned cube of the given half extent, 12 triangles with
/// outward normals
pub fn cube_vertices(half: f32) -> Vec<Vertex> {
    let h = half;
    let mut vertices = Vec::new();

    // +X face
    vertices.extend(quad_vertices(
        [
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(h, h, h),
            Vec3::new(h, -h, h),
        ],
        Vec3::X,
    ));
    // -X face
    vertices.extend(quad_vertices(
        [
            Vec3::new(-h, -h, h),
            Vec3::new(-h, h, h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, -h),
        ],
        Vec3::NEG_X,
    ));
    // +Y face
    vertices.extend(quad_vertices(
        [
            Vec3::new(-h, h, -h),
            Vec3::new(-h, h, h),
            Vec3::new(h, h, h),
            Vec3::new(h, h, -h),
        ],
        Vec3::Y,
    ));
    // -Y face
    vertices.extend(quad_vertices(
        [
            Vec3::new(-h, -h, h),
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, -h, h),
        ],
        Vec3::NEG_Y,
    ));
    // +Z face
    vertices.extend(quad_vertices(
        [
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ],
        Vec3::Z,
    ));
    // -Z face
    vertices.extend(quad_vertices(
        [
            Vec3::new(h, -h, -h),
            Vec3::new(-h, -h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(h, h, -h),
        ],
        Vec3::NEG_Z,
    ));

    vertices
}

// ============================================================================
// Standard test scenes
// ============================================================================

/// Scene with a single mesh instance built from `vertices`, a gray
/// solid material, and a generously sized bounding box
pub fn single_mesh_scene(vertices: Vec<Vertex>, extent: f32) -> (Scene, ResourcePool) {
    let mut resources = ResourcePool::default();
    let material = resources.add_material(Material::solid(Color::GRAY));
    let mesh = resources.add_mesh(Mesh::new(vec![SubMesh::new(vertices, material)]));

    let scene = Scene::new(
        vec![MeshInstance::new(mesh, Transformation::IDENTITY)],
        Aabb::new(Vec3::splat(-extent), Vec3::splat(extent)),
    );
    (scene, resources)
}

/// The reference quad scenario: a 2x2 quad in a wide baking volume so
/// that all of its surfels satisfy the cluster similarity predicate
pub fn quad_scene() -> (Scene, ResourcePool) {
    single_mesh_scene(ground_quad(), 20.0)
}

/// A unit cube sitting in a snug bounding box
pub fn cube_scene() -> (Scene, ResourcePool) {
    single_mesh_scene(cube_vertices(1.0), 1.5)
}

/// Fixed-seed config for reproducible integration tests
pub fn test_config(minimum_distance: f32) -> SurfelGenConfig {
    SurfelGenConfig {
        minimum_distance,
        seed: 42,
        ..Default::default()
    }
}
