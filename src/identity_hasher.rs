//! A hasher which hands back the integer it's given. With integer keys this
//! pins down exactly which bucket every key lands in (`key % bucket_count`),
//! which makes collisions easy to set up on purpose.

use std::hash::{BuildHasher, Hasher};

/// Proxies integers for themselves. The first write lands in the state as is,
/// so a lone integer key hashes to itself. Later writes scramble what's already
/// there before xoring in, so strings and tuples depend on every write and not
/// just the last one.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

/// Odd, so multiplying by it loses nothing.
const SCRAMBLE: u64 = 0x9e37_79b9_7f4a_7c15;

impl IdentityHasher {
    fn mix(&mut self, bits: u32, i: u64) {
        self.0 = self.0.wrapping_mul(SCRAMBLE).rotate_left(bits) ^ i;
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        // little end first, so an integer's bytes fold back into the integer
        for chunk in bytes.chunks(8) {
            let folded = chunk
                .iter()
                .rev()
                .fold(0u64, |acc, byte| (acc << 8) | *byte as u64);
            self.mix(8 * chunk.len() as u32, folded);
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.mix(8, i as u64);
    }

    fn write_u16(&mut self, i: u16) {
        self.mix(16, i as u64);
    }

    fn write_u32(&mut self, i: u32) {
        self.mix(32, i as u64);
    }

    fn write_u64(&mut self, i: u64) {
        self.mix(64, i);
    }

    fn write_usize(&mut self, i: usize) {
        self.mix(usize::BITS, i as u64);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Builds new IdentityHashers on demand.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildIdentityHasher;

impl BuildHasher for BuildIdentityHasher {
    type Hasher = IdentityHasher;

    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        hash::{BuildHasher, Hash, Hasher},
    };

    use super::{BuildIdentityHasher, IdentityHasher};
    use crate::HashTable;

    #[test]
    fn test_hasher() {
        let mut h0 = IdentityHasher(0);
        h0.write_u64(0xc8c8c8c8);
        assert_eq!(0xc8c8c8c8, h0.finish());

        let mut h1 = IdentityHasher(0);
        h1.write(&0xc8c8c8c8c8c8c8c8u64.to_le_bytes());
        assert_eq!(0xc8c8c8c8c8c8c8c8, h1.finish());
    }

    #[test]
    fn test_keys_hash_to_themselves() {
        let build = BuildIdentityHasher;

        for key in &[0u64, 1, 7, 12345] {
            let mut h = build.build_hasher();
            key.hash(&mut h);
            assert_eq!(*key, h.finish());
        }

        let mut h = build.build_hasher();
        42usize.hash(&mut h);
        assert_eq!(42, h.finish());

        let mut h = build.build_hasher();
        7u8.hash(&mut h);
        assert_eq!(7, h.finish());
    }

    fn hash_of<T: Hash + ?Sized>(t: &T) -> u64 {
        let mut h = BuildIdentityHasher.build_hasher();
        t.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_strings_and_tuples_use_every_write() {
        assert_ne!(hash_of("abc"), hash_of("xyz"));

        let hashes: Vec<u64> =
            ["a", "b", "c", "d", "e"].iter().map(|k| hash_of(*k)).collect();
        for (i, h) in hashes.iter().enumerate() {
            assert!(hashes[i + 1..].iter().all(|other| other != h));
        }

        // both fields count, not just the last one written
        assert_ne!(hash_of(&(1u64, 2u64)), hash_of(&(3u64, 2u64)));
    }

    #[test]
    fn test_string_keys_spread_over_buckets() {
        let mut table =
            HashTable::with_buckets_and_hash_builder(8, BuildIdentityHasher).unwrap();
        for k in &["a", "b", "c", "d", "e"] {
            table.set(k.to_string(), ());
        }

        // a String hashes exactly like its str
        let occupied: HashSet<u64> =
            table.iter().map(|(k, _)| hash_of(k.as_str()) % 8).collect();
        assert!(occupied.len() > 1);
        assert!(table.contains("c"));
    }
}
