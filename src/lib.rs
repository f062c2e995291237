//! # Surfel-GI
//!
//! Offline surfel generation for baked global illumination.
//!
//! Precomputes a uniformly distributed set of surface samples
//! ("surfels") over static scene geometry, groups them into bounded
//! clusters, and packs everything into fixed-layout buffers ready for
//! GPU upload. Surfels act as storage sites for baked lighting data;
//! the renderer consuming the buffers lives outside this crate.
//!
//! ## Features
//!
//! - **Area-proportional sampling**: triangles are drawn from a
//!   logarithmic weighted bin, robust to areas spanning many orders
//!   of magnitude
//! - **Minimum-distance guarantee**: accepted surfels with
//!   non-opposing normals keep a configured minimum separation
//! - **Adaptive subdivision**: triangles subdivide until covered by
//!   an accepted surfel or too small to matter
//! - **Bounded clustering**: greedy grouping of mutually similar
//!   surfels into compact offset/count records
//! - **Deterministic bakes**: all randomness is seeded
//! - **Persistence**: binary (.srfl) and JSON formats with CRC checks
//!
//! ## Example
//!
//! ```rust,ignore
//! use surfel_gi::prelude::*;
//!
//! let config = SurfelGenConfig::default();
//! let data = SurfelGenerator::new(&scene, &resources, config).generate();
//!
//! save_surfels(&data, "scene.srfl")?;
//! upload(&data.attributes, &data.cluster_records, &data.cluster_centers);
//! ```
//!
//! ## Author
//!
//! Moroya Sakamoto

#![warn(missing_docs)]

pub mod baking;
pub mod color;
pub mod io;
pub mod scene;
pub mod types;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::baking::{
        build_clusters, decode_cluster_record, encode_cluster_record, pack_cluster_centers,
        pack_cluster_records, pack_surfel_attributes, BinHandle, LogarithmicBin, Rng64,
        SpatialHash, Surfel, SurfelAttributeBuffers, SurfelCluster, SurfelData,
        SurfelGenConfig, SurfelGenerator, MAX_CLUSTER_COUNT, MAX_CLUSTER_OFFSET,
    };
    pub use crate::color::Color;
    pub use crate::io::{
        load_surfels, load_surfels_json, save_surfels, save_surfels_json, IoError,
    };
    pub use crate::scene::{
        AlbedoMap, Material, Mesh, MeshInstance, ResourcePool, Scene, SubMesh,
        Transformation, Vertex,
    };
    pub use crate::types::{Aabb, Sphere, Triangle2, Triangle3};
    pub use glam::{Mat4, Vec2, Vec3};
}
