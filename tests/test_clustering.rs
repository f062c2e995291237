//! Integration tests: clustering and GPU buffer packing
//!
//! Runs a full bake and validates the cluster index, the similarity
//! guarantees, and the packed buffer layouts against the structured
//! containers.
//!
//! Author: Moroya Sakamoto

mod common;

use common::*;
use surfel_gi::baking::{CLUSTER_DISTANCE_THRESHOLD, CLUSTER_NORMAL_THRESHOLD};
use surfel_gi::prelude::*;

fn baked_cube() -> (SurfelData, f32) {
    let (scene, resources) = cube_scene();
    let extent = scene.baking_volume.largest_extent();
    let data = SurfelGenerator::new(&scene, &resources, test_config(0.5)).generate();
    (data, extent)
}

// ============================================================================
// Cluster index structure
// ============================================================================

#[test]
fn clusters_partition_the_surfel_array() {
    let (data, _) = baked_cube();
    assert!(data.cluster_count() >= 1);

    let mut expected_offset = 0u32;
    for cluster in &data.clusters {
        assert_eq!(cluster.surfel_offset, expected_offset);
        assert!(cluster.surfel_count >= 1);
        assert!(cluster.surfel_count <= MAX_CLUSTER_COUNT);
        expected_offset += cluster.surfel_count;
    }
    assert_eq!(expected_offset as usize, data.surfel_count());
}

#[test]
fn cluster_members_are_pairwise_similar() {
    let (data, extent) = baked_cube();
    let inv_extent_sq = 1.0 / (extent * extent);

    for cluster in &data.clusters {
        let start = cluster.surfel_offset as usize;
        let end = start + cluster.surfel_count as usize;
        let members = &data.surfels[start..end];

        for i in 0..members.len() {
            for j in i + 1..members.len() {
                let dist_sq = members[i]
                    .position
                    .distance_squared(members[j].position)
                    * inv_extent_sq;
                assert!(dist_sq <= CLUSTER_DISTANCE_THRESHOLD);
                assert!(
                    members[i].normal.dot(members[j].normal) > CLUSTER_NORMAL_THRESHOLD
                );
            }
        }
    }
}

#[test]
fn cluster_centers_are_member_means() {
    let (data, _) = baked_cube();

    for cluster in &data.clusters {
        let start = cluster.surfel_offset as usize;
        let members = &data.surfels[start..start + cluster.surfel_count as usize];
        let mean = members
            .iter()
            .fold(Vec3::ZERO, |acc, s| acc + s.position)
            / members.len() as f32;
        assert!((cluster.center - mean).length() < 1e-4);
    }
}

// ============================================================================
// Packed buffers
// ============================================================================

#[test]
fn packed_records_decode_to_cluster_fields() {
    let (data, _) = baked_cube();
    assert_eq!(data.cluster_records.len(), data.cluster_count() * 4);

    for (i, cluster) in data.clusters.iter().enumerate() {
        let record: [u8; 4] = data.cluster_records[i * 4..i * 4 + 4]
            .try_into()
            .expect("record slice is 4 bytes");
        let (offset, count) = decode_cluster_record(record);
        assert_eq!(offset, cluster.surfel_offset);
        assert_eq!(count, cluster.surfel_count);
    }
}

#[test]
fn packed_centers_follow_record_order() {
    let (data, _) = baked_cube();
    assert_eq!(data.cluster_centers.len(), data.cluster_count() * 3);

    for (i, cluster) in data.clusters.iter().enumerate() {
        let xyz = &data.cluster_centers[i * 3..i * 3 + 3];
        assert_eq!(xyz, &cluster.center.to_array());
    }
}

#[test]
fn attribute_buffers_match_surfel_order() {
    let (data, _) = baked_cube();
    let n = data.surfel_count();

    assert_eq!(data.attributes.positions.len(), n * 3);
    assert_eq!(data.attributes.normals.len(), n * 3);
    assert_eq!(data.attributes.colors.len(), n * 3);
    assert_eq!(data.attributes.lightmap_uvs.len(), n * 2);
    assert_eq!(data.attributes.areas.len(), n);

    for (i, surfel) in data.surfels.iter().enumerate() {
        assert_eq!(
            &data.attributes.positions[i * 3..i * 3 + 3],
            &surfel.position.to_array()
        );
        assert_eq!(
            &data.attributes.normals[i * 3..i * 3 + 3],
            &surfel.normal.to_array()
        );
        assert_eq!(data.attributes.areas[i], surfel.area);
    }
}

// ============================================================================
// Persistence of a real bake
// ============================================================================

#[test]
fn baked_output_survives_binary_round_trip() {
    let (data, _) = baked_cube();
    let path = std::env::temp_dir().join("surfel_gi_cube_bake.srfl");

    save_surfels(&data, &path).expect("save should succeed");
    let loaded = load_surfels(&path).expect("load should succeed");

    assert_eq!(loaded.surfels, data.surfels);
    assert_eq!(loaded.clusters, data.clusters);
    assert_eq!(loaded.cluster_records, data.cluster_records);
    assert_eq!(loaded.cluster_centers, data.cluster_centers);
    std::fs::remove_file(&path).ok();
}
