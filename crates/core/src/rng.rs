//! RNG module - small deterministic generator for gameplay randomness
//!
//! Scenes use it for spawn rolls and positions. A fixed seed replays the
//! same sequence, which keeps scene tests deterministic.

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

    /// Seed from the wall clock.
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
            .unwrap_or(1);
        Self::new(nanos)
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max). Returns 0 when `max` is 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // The high bits of an LCG are the well-mixed ones.
        (self.next_u32() >> 8) % max
    }

    /// True with probability `percent`/100.
    pub fn chance(&mut self, percent: u32) -> bool {
        self.next_range(100) < percent
    }

    /// Random value in `[lo, hi)`; `lo` when the range is empty.
    pub fn range_i32(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        let span = (hi as i64 - lo as i64) as u32;
        (lo as i64 + self.next_range(span) as i64) as i32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_range_i32_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..1000 {
            let v = rng.range_i32(-3, 75);
            assert!((-3..75).contains(&v));
        }
        assert_eq!(rng.range_i32(5, 5), 5);
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = SimpleRng::new(99);
        for _ in 0..200 {
            assert!(!rng.chance(0));
            assert!(rng.chance(100));
        }
    }

    #[test]
    fn test_chance_is_roughly_calibrated() {
        let mut rng = SimpleRng::new(2024);
        let hits = (0..10_000).filter(|_| rng.chance(5)).count();
        assert!((300..700).contains(&hits), "got {hits}");
    }
}
