//! Greedy surfel clustering for compact GPU lookup
//!
//! Groups the flat accepted-surfel set into bounded-size clusters of
//! mutually similar surfels, producing the contiguous offset/count
//! ranges the renderer indexes at runtime. The pass is greedy and
//! seed-order dependent: the first unassigned surfel seeds a cluster,
//! and a candidate joins only when it is alike *every* member already
//! placed, not just the seed. Iteration order over the flat set is
//! fixed, so the result is deterministic for a given input.
//!
//! Author: Moroya Sakamoto

use crate::baking::pack::MAX_CLUSTER_COUNT;
use crate::baking::surfel::{Surfel, SurfelCluster};
use glam::Vec3;

/// Squared-distance similarity threshold, normalized by the squared
/// largest extent of the baking volume
pub const CLUSTER_DISTANCE_THRESHOLD: f32 = 0.01;

/// Minimum normal dot product for two surfels to be considered alike
pub const CLUSTER_NORMAL_THRESHOLD: f32 = 0.1;

/// True when two surfels are similar enough to share a cluster
#[inline]
fn alike(a: &Surfel, b: &Surfel, inv_extent_sq: f32) -> bool {
    let normalized_dist_sq = a.position.distance_squared(b.position) * inv_extent_sq;
    normalized_dist_sq <= CLUSTER_DISTANCE_THRESHOLD
        && a.normal.dot(b.normal) > CLUSTER_NORMAL_THRESHOLD
}

/// Group a flat surfel set into bounded clusters.
///
/// `volume_extent` is the largest dimension of the baking volume, used
/// to normalize the distance predicate. `max_cluster_size` is clamped
/// into `1..=256` to stay representable in the packed record format.
///
/// Returns the surfel array reordered by cluster membership and one
/// record per emitted cluster.
pub fn build_clusters(
    flat: Vec<Surfel>,
    volume_extent: f32,
    max_cluster_size: usize,
) -> (Vec<Surfel>, Vec<SurfelCluster>) {
    let max_cluster_size = max_cluster_size.clamp(1, MAX_CLUSTER_COUNT as usize);
    // A degenerate volume normalizes every distance to zero, which
    // collapses the distance predicate; the normal test still applies
    let inv_extent_sq = if volume_extent > 0.0 {
        1.0 / (volume_extent * volume_extent)
    } else {
        0.0
    };

    let n = flat.len();
    let mut used = vec![false; n];
    let mut ordered = Vec::with_capacity(n);
    let mut clusters = Vec::new();

    for seed in 0..n {
        if used[seed] {
            continue;
        }
        used[seed] = true;

        let offset = ordered.len() as u32;
        let mut members: Vec<usize> = Vec::with_capacity(8);
        members.push(seed);
        ordered.push(flat[seed]);

        for candidate in seed + 1..n {
            if members.len() >= max_cluster_size {
                break;
            }
            if used[candidate] {
                continue;
            }
            if members
                .iter()
                .all(|&m| alike(&flat[m], &flat[candidate], inv_extent_sq))
            {
                used[candidate] = true;
                members.push(candidate);
                ordered.push(flat[candidate]);
            }
        }

        let center = members
            .iter()
            .fold(Vec3::ZERO, |acc, &m| acc + flat[m].position)
            / members.len() as f32;

        debug_assert!(members.len() <= max_cluster_size);
        clusters.push(SurfelCluster {
            surfel_offset: offset,
            surfel_count: members.len() as u32,
            center,
        });
    }

    (ordered, clusters)
}
