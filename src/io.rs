//! File I/O for baked surfel data
//!
//! Supports two formats:
//! - .srfl: Binary format with CRC32 integrity check
//! - .srfl.json: Human-readable JSON format
//!
//! Header (16 bytes):
//!   - Magic: "SRFL" (4 bytes)
//!   - Version: u16 (2 bytes)
//!   - Flags: u16 (2 bytes)
//!   - Surfel count: u32 (4 bytes)
//!   - CRC32: u32 (4 bytes)
//!
//! Body: bincode-serialized [`SurfelData`]. The CRC is validated
//! before deserialization so corruption fails fast.
//!
//! Author: Moroya Sakamoto

use crate::baking::surfel::SurfelData;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

/// Magic bytes for the SRFL format
pub const SRFL_MAGIC: [u8; 4] = *b"SRFL";

/// Current format version
pub const SRFL_VERSION: u16 = 1;

/// File I/O errors
#[derive(Error, Debug)]
pub enum IoError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid file format
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// CRC checksum mismatch
    #[error("CRC mismatch: expected {expected}, got {actual}")]
    CrcMismatch {
        /// Expected CRC value
        expected: u32,
        /// Actual CRC value
        actual: u32,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Unsupported file version
    #[error("Unsupported version: {0}")]
    UnsupportedVersion(u16),
}

/// SRFL file header
#[derive(Debug, Clone, Copy)]
pub struct SurfelFileHeader {
    /// Magic bytes, always [`SRFL_MAGIC`]
    pub magic: [u8; 4],
    /// Format version
    pub version: u16,
    /// Reserved flags
    pub flags: u16,
    /// Number of surfels in the body
    pub surfel_count: u32,
    /// CRC32 of the body bytes
    pub crc32: u32,
}

impl SurfelFileHeader {
    /// Create a header for a surfel set
    pub fn new(data: &SurfelData, body_crc: u32) -> Self {
        SurfelFileHeader {
            magic: SRFL_MAGIC,
            version: SRFL_VERSION,
            flags: 0,
            surfel_count: data.surfel_count() as u32,
            crc32: body_crc,
        }
    }

    /// Serialize header to bytes
    #[inline]
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.flags.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.surfel_count.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.crc32.to_le_bytes());
        bytes
    }

    /// Parse header from bytes
    pub fn from_bytes(bytes: &[u8; 16]) -> Result<Self, IoError> {
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        if magic != SRFL_MAGIC {
            return Err(IoError::InvalidFormat(format!(
                "Invalid magic bytes: {:?}",
                magic
            )));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version > SRFL_VERSION {
            return Err(IoError::UnsupportedVersion(version));
        }

        let flags = u16::from_le_bytes([bytes[6], bytes[7]]);
        let surfel_count = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        let crc32 = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);

        Ok(SurfelFileHeader {
            magic,
            version,
            flags,
            surfel_count,
            crc32,
        })
    }
}

/// Save baked surfel data in the binary SRFL format
pub fn save_surfels(data: &SurfelData, path: impl AsRef<Path>) -> Result<(), IoError> {
    let body =
        bincode::serialize(data).map_err(|e| IoError::Serialization(e.to_string()))?;
    let crc = crc32fast::hash(&body);
    let header = SurfelFileHeader::new(data, crc);

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&header.to_bytes())?;
    writer.write_all(&body)?;
    writer.flush()?;
    Ok(())
}

/// Load baked surfel data from the binary SRFL format.
///
/// The body CRC is checked before deserialization.
pub fn load_surfels(path: impl AsRef<Path>) -> Result<SurfelData, IoError> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut header_bytes = [0u8; 16];
    reader.read_exact(&mut header_bytes)?;
    let header = SurfelFileHeader::from_bytes(&header_bytes)?;

    let mut body = Vec::new();
    reader.read_to_end(&mut body)?;

    let actual = crc32fast::hash(&body);
    if actual != header.crc32 {
        return Err(IoError::CrcMismatch {
            expected: header.crc32,
            actual,
        });
    }

    let data: SurfelData =
        bincode::deserialize(&body).map_err(|e| IoError::Serialization(e.to_string()))?;

    if data.surfel_count() as u32 != header.surfel_count {
        return Err(IoError::InvalidFormat(format!(
            "header promises {} surfels, body carries {}",
            header.surfel_count,
            data.surfel_count()
        )));
    }

    Ok(data)
}

/// Save baked surfel data as JSON
pub fn save_surfels_json(data: &SurfelData, path: impl AsRef<Path>) -> Result<(), IoError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, data).map_err(|e| IoError::Serialization(e.to_string()))
}

/// Load baked surfel data from JSON
pub fn load_surfels_json(path: impl AsRef<Path>) -> Result<SurfelData, IoError> {
    let reader = BufReader::new(File::open(path)?);
    serde_json::from_reader(reader).map_err(|e| IoError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baking::surfel::{Surfel, SurfelCluster};
    use glam::{Vec2, Vec3};
    use std::env;

    fn sample_data() -> SurfelData {
        let surfels = vec![
            Surfel::new(Vec3::X, Vec3::Y, Vec3::new(0.3, 0.0, 0.0), Vec2::ZERO, 0.8),
            Surfel::new(Vec3::Z, Vec3::Y, Vec3::new(0.7, 0.1, -0.1), Vec2::ONE, 0.8),
        ];
        let clusters = vec![SurfelCluster {
            surfel_offset: 0,
            surfel_count: 2,
            center: (Vec3::X + Vec3::Z) * 0.5,
        }];
        SurfelData::build(surfels, clusters)
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    #[test]
    fn test_binary_round_trip() {
        let data = sample_data();
        let path = temp_path("surfel_gi_round_trip.srfl");

        save_surfels(&data, &path).unwrap();
        let loaded = load_surfels(&path).unwrap();

        assert_eq!(loaded.surfels, data.surfels);
        assert_eq!(loaded.clusters, data.clusters);
        assert_eq!(loaded.cluster_records, data.cluster_records);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_json_round_trip() {
        let data = sample_data();
        let path = temp_path("surfel_gi_round_trip.srfl.json");

        save_surfels_json(&data, &path).unwrap();
        let loaded = load_surfels_json(&path).unwrap();

        assert_eq!(loaded.surfels, data.surfels);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_corrupted_body_is_rejected() {
        let data = sample_data();
        let path = temp_path("surfel_gi_corrupt.srfl");

        save_surfels(&data, &path).unwrap();
        let mut bytes = std::fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        std::fs::write(&path, &bytes).unwrap();

        match load_surfels(&path) {
            Err(IoError::CrcMismatch { .. }) => {}
            other => panic!("expected CRC mismatch, got {:?}", other.map(|_| ())),
        }
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let header = SurfelFileHeader::from_bytes(&[0u8; 16]);
        assert!(matches!(header, Err(IoError::InvalidFormat(_))));
    }

    #[test]
    fn test_future_version_is_rejected() {
        let data = sample_data();
        let mut bytes = SurfelFileHeader::new(&data, 0).to_bytes();
        bytes[4] = 0xFF;
        bytes[5] = 0xFF;
        assert!(matches!(
            SurfelFileHeader::from_bytes(&bytes),
            Err(IoError::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_header_round_trip() {
        let data = sample_data();
        let header = SurfelFileHeader::new(&data, 0xDEADBEEF);
        let parsed = SurfelFileHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(parsed.surfel_count, 2);
        assert_eq!(parsed.crc32, 0xDEADBEEF);
        assert_eq!(parsed.version, SRFL_VERSION);
    }
}
