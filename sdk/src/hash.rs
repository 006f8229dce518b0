//! File digests

use crate::error::{Result, VerifixError};
use sha2::{Digest, Sha256};
use std::{fs::File, io::Read, path::Path};

const READ_CHUNK: usize = 1024;

/// SHA-256 of a file, read in fixed-size chunks
pub fn compute_file_hash(path: impl AsRef<Path>) -> Result<[u8; 32]> {
    let mut file = File::open(path.as_ref())?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; READ_CHUNK];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize().into())
}

pub fn hash_bytes(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

pub fn to_hex(hash: &[u8; 32]) -> String {
    hex::encode(hash)
}

pub fn from_hex(value: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(value.trim())
        .map_err(|e| VerifixError::Validation(format!("invalid hex digest: {e}")))?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        VerifixError::Validation(format!("digest must be 32 bytes, got {len}"))
    })
}
