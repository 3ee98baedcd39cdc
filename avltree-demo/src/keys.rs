//! Random distinct keys from a fixed range.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use rand::Rng;

/// Draws keys uniformly from a range, never handing out the same key twice
/// over the lifetime of the source.
pub struct DistinctKeys {
    range: RangeInclusive<i32>,
    seen: HashSet<i32>,
}

impl DistinctKeys {
    pub fn new(range: RangeInclusive<i32>) -> Self {
        Self {
            range,
            seen: HashSet::new(),
        }
    }

    fn remaining(&self) -> usize {
        let size = (*self.range.end() as i64 - *self.range.start() as i64 + 1).max(0) as usize;
        size - self.seen.len()
    }

    /// Draw up to `count` fresh keys, fewer if the range runs out.
    pub fn draw<R: Rng>(&mut self, rng: &mut R, count: usize) -> Vec<i32> {
        let count = count.min(self.remaining());
        let mut keys = Vec::with_capacity(count);
        while keys.len() < count {
            let key = rng.random_range(self.range.clone());
            if self.seen.insert(key) {
                keys.push(key);
            } else {
                tracing::trace!(key, "redrawing duplicate key");
            }
        }
        keys
    }
}
