//! Random source for separating (near-)coincident vertices.
//!
//! The spring force only needs randomness when an edge is shorter than one unit, where the
//! direction between its endpoints is meaningless. Callers inject the source so layouts are
//! reproducible.

/// Uniform samples in `[0, 1)`.
pub trait Jitter {
    fn next_unit(&mut self) -> f64;
}

impl<J: Jitter + ?Sized> Jitter for &mut J {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// xorshift64* generator; the default jitter source, seeded from `LayoutOptions::random_seed`.
#[derive(Debug, Clone)]
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub fn new(seed: u64) -> Self {
        // A zero state is a fixed point of xorshift.
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }
}

impl Jitter for XorShift64Star {
    fn next_unit(&mut self) -> f64 {
        // 53 bits of precision, as `Math.random()`.
        let u = self.next_u64() >> 11;
        (u as f64) / ((1u64 << 53) as f64)
    }
}
