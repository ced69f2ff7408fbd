//! State Hashing for Verification
//!
//! SHA-256 digests of session snapshots, used to check that two replays of
//! the same seed and tap script end in the same place.

use serde::Serialize;
use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type StateHash = [u8; 32];

/// Domain separator for session snapshots.
pub const SESSION_DOMAIN: &[u8] = b"MOONSLIDE_SESSION_V1";

/// Compute hash with domain separator.
pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> StateHash {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash any serializable value through its bincode encoding.
pub fn hash_serialized<T: Serialize>(domain: &[u8], value: &T) -> Result<StateHash, bincode::Error> {
    let bytes = bincode::serialize(value)?;
    Ok(hash_with_domain(domain, &bytes))
}
