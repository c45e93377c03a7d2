use std::ops::Range;

/// Seeded xorshift source for reproducible box and interval layouts.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform in `range`.
    pub fn uniform(&mut self, range: Range<f64>) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        range.start + (range.end - range.start) * unit
    }

    /// A `(lo, hi)` span starting in `origin` with a length drawn from `len`.
    pub fn span(&mut self, origin: Range<f64>, len: Range<f64>) -> (f64, f64) {
        let lo = self.uniform(origin);
        (lo, lo + self.uniform(len))
    }
}
