//! GPU buffer packing for baked surfel data
//!
//! Three pure transforms over the final containers, producing the
//! fixed-layout arrays the renderer uploads verbatim:
//!
//! - per-attribute surfel arrays (position, normal, color, UV, area)
//! - 4-byte cluster records: a 24-bit surfel offset in big-endian
//!   byte order followed by one count byte
//! - cluster center array, xyz per cluster
//!
//! The count byte stores `count - 1`, so a full 256-surfel cluster is
//! representable and a zero-count cluster is not; clusters always
//! contain at least their seed.
//!
//! Author: Moroya Sakamoto

use crate::baking::surfel::{Surfel, SurfelCluster};
use serde::{Deserialize, Serialize};

/// Largest surfel offset a cluster record can address
pub const MAX_CLUSTER_OFFSET: u32 = (1 << 24) - 1;

/// Largest member count a cluster record can carry
pub const MAX_CLUSTER_COUNT: u32 = 256;

/// Flat per-attribute surfel arrays, ordered identically to the final
/// surfel array
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfelAttributeBuffers {
    /// xyz per surfel
    pub positions: Vec<f32>,
    /// xyz per surfel
    pub normals: Vec<f32>,
    /// YCoCg per surfel
    pub colors: Vec<f32>,
    /// uv per surfel
    pub lightmap_uvs: Vec<f32>,
    /// one float per surfel
    pub areas: Vec<f32>,
}

/// Pack surfel attributes into flat arrays
pub fn pack_surfel_attributes(surfels: &[Surfel]) -> SurfelAttributeBuffers {
    let mut buffers = SurfelAttributeBuffers {
        positions: Vec::with_capacity(surfels.len() * 3),
        normals: Vec::with_capacity(surfels.len() * 3),
        colors: Vec::with_capacity(surfels.len() * 3),
        lightmap_uvs: Vec::with_capacity(surfels.len() * 2),
        areas: Vec::with_capacity(surfels.len()),
    };

    for surfel in surfels {
        buffers.positions.extend_from_slice(&surfel.position.to_array());
        buffers.normals.extend_from_slice(&surfel.normal.to_array());
        buffers.colors.extend_from_slice(&surfel.color.to_array());
        buffers
            .lightmap_uvs
            .extend_from_slice(&surfel.lightmap_uv.to_array());
        buffers.areas.push(surfel.area);
    }

    buffers
}

/// Encode one cluster as a 4-byte record.
///
/// Panics if the offset exceeds 24 bits or the count is outside
/// `1..=256`; both are construction-time contract violations, not
/// runtime conditions.
#[inline]
pub fn encode_cluster_record(cluster: &SurfelCluster) -> [u8; 4] {
    assert!(
        cluster.surfel_offset <= MAX_CLUSTER_OFFSET,
        "cluster offset {} exceeds 24-bit range",
        cluster.surfel_offset
    );
    assert!(
        cluster.surfel_count >= 1 && cluster.surfel_count <= MAX_CLUSTER_COUNT,
        "cluster count {} outside 1..=256",
        cluster.surfel_count
    );

    let offset = cluster.surfel_offset;
    [
        (offset >> 16) as u8,
        (offset >> 8) as u8,
        offset as u8,
        (cluster.surfel_count - 1) as u8,
    ]
}

/// Decode a 4-byte cluster record into `(offset, count)`
#[inline]
pub fn decode_cluster_record(record: [u8; 4]) -> (u32, u32) {
    let offset =
        ((record[0] as u32) << 16) | ((record[1] as u32) << 8) | record[2] as u32;
    let count = record[3] as u32 + 1;
    (offset, count)
}

/// Pack all cluster records into one contiguous byte array
pub fn pack_cluster_records(clusters: &[SurfelCluster]) -> Vec<u8> {
    let mut out = Vec::with_capacity(clusters.len() * 4);
    for cluster in clusters {
        out.extend_from_slice(&encode_cluster_record(cluster));
    }
    out
}

/// Pack cluster centers as xyz triples, same order as the records
pub fn pack_cluster_centers(clusters: &[SurfelCluster]) -> Vec<f32> {
    let mut out = Vec::with_capacity(clusters.len() * 3);
    for cluster in clusters {
        out.extend_from_slice(&cluster.center.to_array());
    }
    out
}
