use sha2::{Digest, Sha256};
use std::path::Path;

use payoffopt_types::Result;

/// Hex-encoded SHA-256 digest
pub type HashRef = String;

pub fn compute_hash(data: &[u8]) -> HashRef {
    hex::encode(Sha256::digest(data))
}

/// Hash of the compact JSON encoding of `data`
pub fn compute_json_hash<T: serde::Serialize>(data: &T) -> Result<HashRef> {
    let json = serde_json::to_vec(data)?;
    Ok(compute_hash(&json))
}

/// Hash of a file's raw bytes
pub fn hash_file(path: impl AsRef<Path>) -> Result<HashRef> {
    let bytes = std::fs::read(path)?;
    Ok(compute_hash(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            compute_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_json_hash_follows_content() {
        let a = compute_json_hash(&serde_json::json!({"(100, 110)": [4.0, 0.0, 0.0, 0.0]})).unwrap();
        let b = compute_json_hash(&serde_json::json!({"(100, 110)": [3.0, 0.0, 0.0, 0.0]})).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
    }
}
