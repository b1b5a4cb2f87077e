//! Blake2b-256 over payloads and domain-separated inputs.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use crispy_types::Hash256;

type Blake2b256 = Blake2b<U32>;

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Digest of the concatenation of `parts`, without building it.
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    parts
        .iter()
        .fold(Blake2b256::new(), |hasher, part| hasher.chain_update(part))
        .finalize()
        .into()
}

/// Identifier of a governor action's call data.
pub fn hash_payload(payload: &[u8]) -> Hash256 {
    Hash256::new(blake2b_256(payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_input_same_digest() {
        assert_eq!(blake2b_256(b"crispy"), blake2b_256(b"crispy"));
        assert_ne!(blake2b_256(b"crispy"), blake2b_256(b"crisp"));
    }

    #[test]
    fn parts_hash_like_their_concatenation() {
        assert_eq!(
            blake2b_256_multi(&[b"call", b"", b"data"]),
            blake2b_256(b"calldata")
        );
    }

    #[test]
    fn empty_payload_has_a_real_hash() {
        assert!(!hash_payload(&[]).is_zero());
        assert_ne!(hash_payload(&[]), hash_payload(&[0]));
    }
}
