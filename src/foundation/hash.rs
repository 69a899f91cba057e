//! FNV-1a 64 hashing shared by the scene fingerprint and seed folding.

pub const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
pub const FNV_PRIME: u64 = 0x100000001b3;

#[derive(Clone, Copy)]
pub struct Fnv1a64(u64);

impl Fnv1a64 {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= b as u64;
            h = h.wrapping_mul(FNV_PRIME);
        }
        self.0 = h;
    }

    pub fn finish(self) -> u64 {
        self.0
    }
}

/// One-shot FNV-1a 64 of a string, used to reduce stable string ids to numeric seeds.
pub fn fnv1a64(s: &str) -> u64 {
    let mut h = Fnv1a64::new(FNV_OFFSET_BASIS);
    h.write_bytes(s.as_bytes());
    h.finish()
}
