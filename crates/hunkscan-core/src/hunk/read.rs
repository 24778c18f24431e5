use sha2::{Digest, Sha256};
use std::{fs, io, path::Path};

use crate::report::model::{ArtifactHash, ArtifactInfo};

/// Raw bytes of one input file plus its fingerprint.
#[derive(Debug, Clone)]
pub struct ArtifactContext {
    pub bytes: Vec<u8>,
    pub size_bytes: u64,
    pub hash_alg: String,
    pub hash_hex: String,
}

impl ArtifactContext {
    /// Fingerprints `bytes` that are already in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let digest = Sha256::digest(&bytes);

        Self {
            size_bytes: bytes.len() as u64,
            bytes,
            hash_alg: "sha256".to_string(),
            hash_hex: hex::encode(digest),
        }
    }

    /// Report-facing metadata; raw bytes are not carried over.
    pub fn artifact_info(&self) -> ArtifactInfo {
        ArtifactInfo {
            size_bytes: self.size_bytes,
            hash: ArtifactHash {
                algorithm: self.hash_alg.clone(),
                value: self.hash_hex.clone(),
            },
        }
    }
}

/// Reads a whole input file.
///
/// The fingerprint depends only on the file bytes, never on metadata.
pub fn read_artifact(path: &Path) -> io::Result<ArtifactContext> {
    fs::read(path).map(ArtifactContext::from_bytes)
}
