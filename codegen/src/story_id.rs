use sha2::{Digest, Sha256};
use std::path::Path;

const ID_LENGTH: usize = 10;

/// Identifies a story by its entry file, so saved games from different
/// stories don't collide. `path` should already be absolute.
pub fn story_id<P>(path: P) -> String
where
    P: AsRef<Path>,
{
    let digest = Sha256::digest(path.as_ref().to_string_lossy().as_bytes());
    let mut id: String = digest.iter().map(|byte| format!("{:02x}", byte)).collect();
    id.truncate(ID_LENGTH);
    id
}
