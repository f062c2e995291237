//! Scene and resource collaborator types
//!
//! The generator consumes static geometry through the minimal contracts
//! defined here: a scene of transformed mesh instances with a bounding
//! box and a light-baking volume, and a resource pool mapping mesh and
//! material ids to triangle geometry and low-frequency albedo data.
//!
//! Mesh loading, full material systems, and render resources live
//! outside this crate; these types carry exactly what sampling needs.
//!
//! Author: Moroya Sakamoto

use crate::color::Color;
use crate::types::Aabb;
use glam::{Mat3, Mat4, Vec2, Vec3};

// ── Geometry ─────────────────────────────────────────────────

/// Vertex with position, normal, and texture coordinates
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    /// Position in object space
    pub position: Vec3,
    /// Surface normal in object space
    pub normal: Vec3,
    /// Texture coordinates
    pub uv: Vec2,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Vertex { position, normal, uv }
    }
}

/// A triangle list with a single material
#[derive(Debug, Clone)]
pub struct SubMesh {
    /// Vertices, three per triangle
    pub vertices: Vec<Vertex>,
    /// Material id into the resource pool
    pub material: usize,
}

impl SubMesh {
    /// Create a new sub-mesh
    pub fn new(vertices: Vec<Vertex>, material: usize) -> Self {
        SubMesh { vertices, material }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// A mesh as a collection of sub-meshes
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Sub-meshes, one per material slot
    pub sub_meshes: Vec<SubMesh>,
}

impl Mesh {
    /// Create a mesh from its sub-meshes
    pub fn new(sub_meshes: Vec<SubMesh>) -> Self {
        Mesh { sub_meshes }
    }
}

// ── Transforms ───────────────────────────────────────────────

/// Rigid placement of a mesh in the scene
#[derive(Debug, Clone, Copy)]
pub struct Transformation {
    model: Mat4,
}

impl Transformation {
    /// Identity transformation
    pub const IDENTITY: Transformation = Transformation { model: Mat4::IDENTITY };

    /// Create from a model matrix
    pub fn new(model: Mat4) -> Self {
        Transformation { model }
    }

    /// Object-to-world matrix
    #[inline]
    pub fn model_matrix(&self) -> Mat4 {
        self.model
    }

    /// Matrix for transforming normals (inverse transpose of the
    /// upper-left 3x3), correct under non-uniform scale
    #[inline]
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.model).inverse().transpose()
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Transformation::IDENTITY
    }
}

/// A placed instance of a mesh
#[derive(Debug, Clone, Copy)]
pub struct MeshInstance {
    /// Mesh id into the resource pool
    pub mesh: usize,
    /// Placement of this instance
    pub transformation: Transformation,
}

impl MeshInstance {
    /// Create a new instance
    pub fn new(mesh: usize, transformation: Transformation) -> Self {
        MeshInstance { mesh, transformation }
    }
}

// ── Materials ────────────────────────────────────────────────

/// Low-frequency albedo map sampled by texture coordinate.
///
/// Baking only needs a heavily downsampled view of the surface color,
/// so this is a small texel grid with wrap-around nearest sampling.
#[derive(Debug, Clone)]
pub struct AlbedoMap {
    width: usize,
    height: usize,
    texels: Vec<Color>,
}

impl AlbedoMap {
    /// Create from a texel grid. Panics if `texels.len() != width * height`
    /// or either dimension is zero.
    pub fn new(width: usize, height: usize, texels: Vec<Color>) -> Self {
        assert!(width > 0 && height > 0, "albedo map must be non-empty");
        assert_eq!(texels.len(), width * height);
        AlbedoMap { width, height, texels }
    }

    /// A 1x1 map with a single color
    pub fn solid(color: Color) -> Self {
        AlbedoMap {
            width: 1,
            height: 1,
            texels: vec![color],
        }
    }

    /// Sample with wrap-around nearest-texel filtering
    pub fn sample(&self, uv: Vec2) -> Color {
        let u = uv.x.rem_euclid(1.0);
        let v = uv.y.rem_euclid(1.0);
        let x = ((u * self.width as f32) as usize).min(self.width - 1);
        let y = ((v * self.height as f32) as usize).min(self.height - 1);
        self.texels[y * self.width + x]
    }
}

/// Material as seen by the baker
#[derive(Debug, Clone)]
pub struct Material {
    /// Low-frequency surface color
    pub albedo: AlbedoMap,
}

impl Material {
    /// Create a material from its albedo map
    pub fn new(albedo: AlbedoMap) -> Self {
        Material { albedo }
    }

    /// Untextured material with a uniform color
    pub fn solid(color: Color) -> Self {
        Material {
            albedo: AlbedoMap::solid(color),
        }
    }
}

// ── Resource pool and scene ──────────────────────────────────

/// Owns meshes and materials, addressed by id
#[derive(Debug, Clone, Default)]
pub struct ResourcePool {
    /// Meshes by id
    pub meshes: Vec<Mesh>,
    /// Materials by id
    pub materials: Vec<Material>,
}

impl ResourcePool {
    /// Add a mesh, returning its id
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Add a material, returning its id
    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Look up a mesh by id
    pub fn mesh(&self, id: usize) -> &Mesh {
        &self.meshes[id]
    }

    /// Look up a material by id
    pub fn material(&self, id: usize) -> &Material {
        &self.materials[id]
    }
}

/// Static scene description consumed by the baker
#[derive(Debug, Clone)]
pub struct Scene {
    /// Placed static mesh instances
    pub instances: Vec<MeshInstance>,
    /// Bounds of all static geometry
    pub bounding_box: Aabb,
    /// Region in which lighting is baked; candidates outside are
    /// discarded. Usually equal to or smaller than the bounding box.
    pub baking_volume: Aabb,
}

impl Scene {
    /// Create a scene whose baking volume equals its bounding box
    pub fn new(instances: Vec<MeshInstance>, bounding_box: Aabb) -> Self {
        Scene {
            instances,
            bounding_box,
            baking_volume: bounding_box,
        }
    }

    /// Create a scene with a separate baking volume
    pub fn with_baking_volume(
        instances: Vec<MeshInstance>,
        bounding_box: Aabb,
        baking_volume: Aabb,
    ) -> Self {
        Scene {
            instances,
            bounding_box,
            baking_volume,
        }
    }

    /// Static instances to bake
    pub fn static_instances(&self) -> &[MeshInstance] {
        &self.instances
    }
}
