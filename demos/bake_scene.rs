//! Example: bake surfels for a small static scene
//!
//! Builds a ground plane with a box sitting on it, runs the surfel
//! generator, prints bake statistics, and writes the result to a
//! .srfl file.
//!
//! Author: Moroya Sakamoto

use surfel_gi::prelude::*;

fn quad(corners: [Vec3; 4], normal: Vec3) -> Vec<Vertex> {
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

fn box_mesh(half: Vec3, material: usize) -> Mesh {
    let (hx, hy, hz) = (half.x, half.y, half.z);
    let mut vertices = Vec::new();

    vertices.extend(quad(
        [
            Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, hy, -hz),
            Vec3::new(hx, hy, hz),
            Vec3::new(hx, -hy, hz),
        ],
        Vec3::X,
    ));
    vertices.extend(quad(
        [
            Vec3::new(-hx, -hy, hz),
            Vec3::new(-hx, hy, hz),
            Vec3::new(-hx, hy, -hz),
            Vec3::new(-hx, -hy, -hz),
        ],
        Vec3::NEG_X,
    ));
    vertices.extend(quad(
        [
            Vec3::new(-hx, hy, -hz),
            Vec3::new(-hx, hy, hz),
            Vec3::new(hx, hy, hz),
            Vec3::new(hx, hy, -hz),
        ],
        Vec3::Y,
    ));
    vertices.extend(quad(
        [
            Vec3::new(-hx, -hy, hz),
            Vec3::new(-hx, -hy, -hz),
            Vec3::new(hx, -hy, -hz),
            Vec3::new(hx, -hy, hz),
        ],
        Vec3::NEG_Y,
    ));
    vertices.extend(quad(
        [
            Vec3::new(-hx, -hy, hz),
            Vec3::new(hx, -hy, hz),
            Vec3::new(hx, hy, hz),
            Vec3::new(-hx, hy, hz),
        ],
        Vec3::Z,
    ));
    vertices.extend(quad(
        [
            Vec3::new(hx, -hy, -hz),
            Vec3::new(-hx, -hy, -hz),
            Vec3::new(-hx, hy, -hz),
            Vec3::new(hx, hy, -hz),
        ],
        Vec3::NEG_Z,
    ));

    Mesh::new(vec![SubMesh::new(vertices, material)])
}

fn main() {
    println!("=== Surfel-GI Bake Demo ===\n");

    // 1. Resources: a dusty floor and a warm-painted box
    let mut resources = ResourcePool::default();
    let floor_material = resources.add_material(Material::solid(Color::new(0.45, 0.42, 0.38)));
    let box_material = resources.add_material(Material::solid(Color::new(0.7, 0.3, 0.2)));

    let floor = resources.add_mesh(Mesh::new(vec![SubMesh::new(
        quad(
            [
                Vec3::new(-6.0, 0.0, -6.0),
                Vec3::new(6.0, 0.0, -6.0),
                Vec3::new(6.0, 0.0, 6.0),
                Vec3::new(-6.0, 0.0, 6.0),
            ],
            Vec3::Y,
        ),
        floor_material,
    )]));
    let crate_mesh = resources.add_mesh(box_mesh(Vec3::new(1.0, 1.0, 1.0), box_material));

    // 2. Scene: the box rests on the floor, slightly off-center
    let scene = Scene::new(
        vec![
            MeshInstance::new(floor, Transformation::IDENTITY),
            MeshInstance::new(
                crate_mesh,
                Transformation::new(Mat4::from_translation(Vec3::new(1.5, 1.0, -0.5))),
            ),
        ],
        Aabb::new(Vec3::new(-6.0, -0.5, -6.0), Vec3::new(6.0, 3.0, 6.0)),
    );

    // 3. Bake
    let config = SurfelGenConfig {
        minimum_distance: 0.4,
        seed: 2024,
        ..Default::default()
    };
    println!("Baking with minimum distance {}...", config.minimum_distance);

    let data = SurfelGenerator::new(&scene, &resources, config).generate();

    println!("  surfels:  {}", data.surfel_count());
    println!("  clusters: {}", data.cluster_count());
    if let Some(largest) = data.clusters.iter().map(|c| c.surfel_count).max() {
        println!("  largest cluster: {} surfels", largest);
    }
    println!(
        "  packed records: {} bytes, centers: {} floats",
        data.cluster_records.len(),
        data.cluster_centers.len()
    );

    // 4. Persist
    let path = std::env::temp_dir().join("bake_demo.srfl");
    match save_surfels(&data, &path) {
        Ok(()) => println!("\nSaved bake to {}", path.display()),
        Err(e) => eprintln!("\nFailed to save bake: {}", e),
    }
}
