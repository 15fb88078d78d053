//! Per-bucket stamp memoization.
//!
//! One slot per opacity bucket, filled on first use and kept until the next
//! radius or blur change clears the whole table. There is no other eviction.

use std::sync::Arc;

use metrics::counter;

use crate::stamp::{Stamp, StampSprite};
use crate::weight::BUCKET_COUNT;

/// Hit/miss counts since the cache was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StampCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub clears: u64,
}

impl StampCacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Write-once-per-bucket stamp table.
#[derive(Debug)]
pub struct StampCache {
    slots: Vec<Option<Arc<Stamp>>>,
    stats: StampCacheStats,
}

impl StampCache {
    pub fn new() -> Self {
        Self {
            slots: vec![None; BUCKET_COUNT],
            stats: StampCacheStats::default(),
        }
    }

    /// Return the stamp for `bucket`, baking it from `sprite` on a miss.
    pub fn get_or_create(&mut self, bucket: u8, sprite: &StampSprite) -> Arc<Stamp> {
        let slot = &mut self.slots[bucket as usize];
        if let Some(stamp) = slot {
            self.stats.hits += 1;
            counter!("heatmap_stamp_cache_hits_total").increment(1);
            return Arc::clone(stamp);
        }

        self.stats.misses += 1;
        counter!("heatmap_stamp_cache_misses_total").increment(1);
        let stamp = Arc::new(sprite.with_opacity(bucket));
        *slot = Some(Arc::clone(&stamp));
        stamp
    }

    /// Cached stamp for `bucket`, if any.
    pub fn get(&self, bucket: u8) -> Option<&Arc<Stamp>> {
        self.slots[bucket as usize].as_ref()
    }

    /// Drop every cached stamp, bucket 0 included.
    pub fn clear(&mut self) {
        let dropped = self.len();
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.stats.clears += 1;
        tracing::debug!(dropped, "Cleared stamp cache");
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> StampCacheStats {
        self.stats
    }
}

impl Default for StampCache {
    fn default() -> Self {
        Self::new()
    }
}
