//! RNG module - seeded shuffling for card deals
//!
//! The same seed always produces the same deal, which keeps games
//! reproducible for tests, benches and bug reports.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales the full 32-bit output rather than taking a modulus, since the
    /// low bits of this LCG have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0);
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Pick up to `count` distinct values from `pool` in random order.
    /// Duplicates in the pool are collapsed first.
    pub fn sample_distinct<'a>(&mut self, pool: &'a [String], count: usize) -> Vec<&'a str> {
        let mut distinct: Vec<&str> = Vec::with_capacity(pool.len());
        for s in pool {
            if !distinct.contains(&s.as_str()) {
                distinct.push(s);
            }
        }
        self.shuffle(&mut distinct);
        distinct.truncate(count);
        distinct
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
