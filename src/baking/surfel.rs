//! Surfel and cluster output containers
//!
//! A surfel is one accepted surface sample: a storage site for baked
//! lighting data. The generator produces a flat surfel set, the
//! clustering pass reorders it into bounded groups, and [`SurfelData`]
//! owns the final ordered array together with the cluster index and
//! the packed GPU buffers derived from both.
//!
//! Author: Moroya Sakamoto

use crate::baking::pack::{
    pack_cluster_centers, pack_cluster_records, pack_surfel_attributes, SurfelAttributeBuffers,
};
use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// One accepted surface sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surfel {
    /// World-space position
    pub position: Vec3,
    /// World-space normal (unit length)
    pub normal: Vec3,
    /// Low-frequency albedo in YCoCg encoding
    pub color: Vec3,
    /// Lightmap texture coordinates
    pub lightmap_uv: Vec2,
    /// Surface area this sample represents
    pub area: f32,
}

impl Surfel {
    /// Create a new surfel
    pub fn new(position: Vec3, normal: Vec3, color: Vec3, lightmap_uv: Vec2, area: f32) -> Self {
        Surfel {
            position,
            normal,
            color,
            lightmap_uv,
            area,
        }
    }
}

/// A bounded group of mutually similar surfels.
///
/// References a contiguous `offset..offset + count` range of the final
/// surfel array; `center` is the mean position of the members.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfelCluster {
    /// Offset of the first member in the final surfel array
    pub surfel_offset: u32,
    /// Number of members
    pub surfel_count: u32,
    /// Mean member position
    pub center: Vec3,
}

/// Baked surfel output: the ordered surfel array, the cluster index,
/// and the packed GPU buffers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfelData {
    /// Surfels ordered by cluster membership
    pub surfels: Vec<Surfel>,
    /// One record per cluster, in emission order
    pub clusters: Vec<SurfelCluster>,
    /// Per-attribute flat arrays, ordered like `surfels`
    pub attributes: SurfelAttributeBuffers,
    /// 4-byte packed cluster records
    pub cluster_records: Vec<u8>,
    /// Packed cluster centers, xyz per cluster
    pub cluster_centers: Vec<f32>,
}

impl SurfelData {
    /// Build the output container from the clustered surfel array,
    /// deriving all packed buffers
    pub fn build(surfels: Vec<Surfel>, clusters: Vec<SurfelCluster>) -> Self {
        let attributes = pack_surfel_attributes(&surfels);
        let cluster_records = pack_cluster_records(&clusters);
        let cluster_centers = pack_cluster_centers(&clusters);

        SurfelData {
            surfels,
            clusters,
            attributes,
            cluster_records,
            cluster_centers,
        }
    }

    /// Empty output (produced by empty scenes)
    pub fn empty() -> Self {
        SurfelData::build(Vec::new(), Vec::new())
    }

    /// Number of surfels
    #[inline]
    pub fn surfel_count(&self) -> usize {
        self.surfels.len()
    }

    /// Number of clusters
    #[inline]
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }
}
