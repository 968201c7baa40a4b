//! Bit-packed validity bitmap (1 bit per element)
//!
//! Columns carry `Option<Bitmap>`:
//! - None = all valid (fast path, zero overhead)
//! - Some(Bitmap) = bit-packed mask (1 = valid, 0 = null)

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Each u64 holds 64 validity bits (LSB = bit 0)
    bits: Vec<u64>,
    /// Total number of elements (not bits)
    len: usize,
}

impl Bitmap {
    /// Create bitmap with all bits set to 1 (all valid)
    pub fn new_all_valid(len: usize) -> Self {
        let words = len.div_ceil(64);
        let mut bits = vec![!0u64; words];

        // Mask off unused bits in last word
        let rem = len % 64;
        if rem != 0 {
            bits[words - 1] = (1u64 << rem) - 1;
        }

        Self { bits, len }
    }

    /// Create bitmap with all bits set to 0 (all null)
    pub fn new_all_null(len: usize) -> Self {
        Self {
            bits: vec![0u64; len.div_ceil(64)],
            len,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get validity bit at index i (true = valid, false = null)
    #[inline]
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len);
        let w = i >> 6; // word index (i / 64)
        let b = i & 63; // bit index (i % 64)
        (self.bits[w] >> b) & 1 == 1
    }

    /// Set validity bit at index i
    #[inline]
    pub fn set(&mut self, i: usize, v: bool) {
        debug_assert!(i < self.len);
        let w = i >> 6;
        let b = i & 63;
        let mask = 1u64 << b;
        if v {
            self.bits[w] |= mask;
        } else {
            self.bits[w] &= !mask;
        }
    }

    /// Append one validity bit
    #[inline]
    pub fn push(&mut self, v: bool) {
        if self.len % 64 == 0 {
            self.bits.push(0);
        }
        self.len += 1;
        self.set(self.len - 1, v);
    }

    /// Append `n` copies of the same bit
    pub fn extend_constant(&mut self, n: usize, v: bool) {
        self.bits.reserve((self.len + n).div_ceil(64) - self.bits.len());
        for _ in 0..n {
            self.push(v);
        }
    }

    /// Append every bit of `other`
    pub fn extend_from_bitmap(&mut self, other: &Bitmap) {
        if self.len % 64 == 0 {
            // Word aligned: copy whole words
            self.bits.extend_from_slice(&other.bits);
            self.len += other.len;
            return;
        }
        for i in 0..other.len {
            self.push(other.get(i));
        }
    }

    /// Number of null (unset) bits
    pub fn null_count(&self) -> usize {
        let set: usize = self.bits.iter().map(|w| w.count_ones() as usize).sum();
        self.len - set
    }
}

impl FromIterator<bool> for Bitmap {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut bm = Bitmap {
            bits: Vec::with_capacity(iter.size_hint().0.div_ceil(64)),
            len: 0,
        };
        for v in iter {
            bm.push(v);
        }
        bm
    }
}
