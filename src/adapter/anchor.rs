use sha2::{Digest, Sha256};

pub const ANCHOR_PREFIX: &str = "diff-";

/// Stable element id for a file's diff section
pub fn anchor_for(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("{}{}", ANCHOR_PREFIX, &digest[..16])
}
