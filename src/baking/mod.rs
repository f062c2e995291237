//! Offline surfel baking
//!
//! Everything needed to precompute a surfel set over static scene
//! geometry and turn it into GPU-ready buffers:
//!
//! - **Bin** ([`bin`]): weighted-random triangle selection with
//!   logarithmic weight buckets and stable handles
//! - **Spatial hash** ([`spatial_hash`]): uniform-grid proximity
//!   queries for the minimum-distance and coverage tests
//! - **Generator** ([`generator`]): the sampling/subdivision loop
//! - **Clustering** ([`cluster`]): greedy bounded grouping of the
//!   accepted set
//! - **Packing** ([`pack`]): fixed-layout attribute and cluster
//!   buffers for upload
//!
//! # Usage
//! ```rust,ignore
//! use surfel_gi::prelude::*;
//!
//! let data = SurfelGenerator::new(&scene, &resources, SurfelGenConfig::default())
//!     .generate();
//! ```
//!
//! Author: Moroya Sakamoto

pub mod bin;
pub mod cluster;
pub mod generator;
pub mod pack;
pub mod rng;
pub mod spatial_hash;
pub mod surfel;

pub use bin::{BinHandle, LogarithmicBin};
pub use cluster::{build_clusters, CLUSTER_DISTANCE_THRESHOLD, CLUSTER_NORMAL_THRESHOLD};
pub use generator::SurfelGenerator;
pub use pack::{
    decode_cluster_record, encode_cluster_record, pack_cluster_centers, pack_cluster_records,
    pack_surfel_attributes, SurfelAttributeBuffers, MAX_CLUSTER_COUNT, MAX_CLUSTER_OFFSET,
};
pub use rng::Rng64;
pub use spatial_hash::SpatialHash;
pub use surfel::{Surfel, SurfelCluster, SurfelData};

/// Configuration for surfel generation.
///
/// All parameters are fixed at construction; there is no runtime
/// reconfiguration.
#[derive(Debug, Clone, Copy)]
pub struct SurfelGenConfig {
    /// Minimum distance between accepted surfels with non-opposing
    /// normals, in world units
    pub minimum_distance: f32,
    /// Largest number of surfels per cluster (clamped to 256, the
    /// packed record maximum)
    pub max_cluster_size: usize,
    /// Target number of samples per spatial-hash cell; one keeps the
    /// cell edge at the minimum distance
    pub samples_per_cell: f32,
    /// Seed for the deterministic sampling RNG
    pub seed: u64,
}

impl Default for SurfelGenConfig {
    fn default() -> Self {
        SurfelGenConfig {
            minimum_distance: 0.5,
            max_cluster_size: 256,
            samples_per_cell: 1.0,
            seed: 0,
        }
    }
}

impl SurfelGenConfig {
    /// Coarse settings for fast preview bakes
    pub fn preview() -> Self {
        SurfelGenConfig {
            minimum_distance: 1.0,
            ..Default::default()
        }
    }

    /// Dense settings for final-quality bakes
    pub fn high_density() -> Self {
        SurfelGenConfig {
            minimum_distance: 0.25,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_order_density() {
        assert!(SurfelGenConfig::preview().minimum_distance
            > SurfelGenConfig::default().minimum_distance);
        assert!(SurfelGenConfig::high_density().minimum_distance
            < SurfelGenConfig::default().minimum_distance);
    }
}
