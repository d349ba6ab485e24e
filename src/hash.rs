//! Key hashing: the polynomial accumulator used to pick a bucket.

/// Multiplier of the default polynomial hash.
pub const HASH_MULTIPLIER: u32 = 65599;

/// Maps a key to an accumulated 32-bit hash code. The table reduces the code
/// modulo its current bucket count, so implementations must be deterministic
/// and must not depend on the bucket count.
pub trait KeyHasher {
    fn accumulate(&self, key: &str) -> u32;
}

/// Default hasher: `h = h * 65599 + byte` over the key's bytes with 32-bit
/// wraparound, starting from zero. Bytes are taken as unsigned.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Poly65599;

impl KeyHasher for Poly65599 {
    #[inline]
    fn accumulate(&self, key: &str) -> u32 {
        key.bytes().fold(0u32, |h, b| {
            h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u32::from(b))
        })
    }
}

impl<H: KeyHasher + ?Sized> KeyHasher for &H {
    #[inline]
    fn accumulate(&self, key: &str) -> u32 {
        (**self).accumulate(key)
    }
}

/// Bucket index of `key` among `bucket_count` buckets. Recomputed from
/// scratch on every call; nothing is cached per binding.
#[inline]
pub(crate) fn bucket_index<H: KeyHasher + ?Sized>(
    hasher: &H,
    key: &str,
    bucket_count: usize,
) -> usize {
    debug_assert!(bucket_count > 0);
    hasher.accumulate(key) as usize % bucket_count
}
