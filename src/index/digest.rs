//! Value digests
//!
//! FNV-1a in its 128-bit variant, applied to a value's canonical string form.
//! Fast, non-cryptographic, and stable across platforms — the digest bytes
//! are part of the on-disk index contract, so the function must never change.

use crate::record::Value;

/// Digest length in bytes
pub const DIGEST_LEN: usize = 16;

const FNV128_OFFSET: u128 = 0x6c62272e07bb014262b821756295c58d;
const FNV128_PRIME: u128 = 0x0000000001000000000000000000013b;

/// FNV-1a 128-bit hash, big-endian byte order
pub fn fnv128a(data: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hash = FNV128_OFFSET;
    for &byte in data {
        hash ^= byte as u128;
        hash = hash.wrapping_mul(FNV128_PRIME);
    }
    hash.to_be_bytes()
}

/// Digest a field value for indexing or lookup
///
/// Both sides must digest identically, so this is the single entry point:
/// canonical string form in, 16 digest bytes out.
pub fn digest_value(value: &Value) -> [u8; DIGEST_LEN] {
    fnv128a(value.canonical().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_offset_basis() {
        assert_eq!(fnv128a(b""), FNV128_OFFSET.to_be_bytes());
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(fnv128a(b"alice"), fnv128a(b"alice"));
        assert_ne!(fnv128a(b"alice"), fnv128a(b"bob"));
    }

    #[test]
    fn single_byte_step() {
        // One FNV-1a round by hand: (offset ^ byte) * prime
        let expected = (FNV128_OFFSET ^ b'a' as u128).wrapping_mul(FNV128_PRIME);
        assert_eq!(fnv128a(b"a"), expected.to_be_bytes());
    }

    #[test]
    fn values_digest_via_canonical_form() {
        // Int(30) and Str("30") share a canonical form, so they collide on
        // purpose; that equivalence is part of the lookup contract
        assert_eq!(
            digest_value(&Value::Int(30)),
            digest_value(&Value::Str("30".into()))
        );
    }
}
