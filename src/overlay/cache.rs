use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rayon::prelude::*;

use crate::overlay::buffer::PixelBuffer;
use crate::overlay::effects::apply_effects;

/// Opacity levels precomputed for every invert state.
///
/// Four levels times two invert states gives eight cached variations; user
/// opacities between levels are served by nearest-match lookup.
pub const OPACITY_LEVELS: [f32; 4] = [0.25, 0.5, 0.75, 1.0];

/// Upper bound on cached variations, regardless of enumeration size.
pub(crate) const CAPACITY: usize = 16;

/// Two requested opacities closer than this are considered the same level.
const OPACITY_EPSILON: f32 = 1e-3;

#[derive(Clone, Debug)]
struct VariationEntry {
    opacity: f32,
    invert: bool,
    pixels: Arc<PixelBuffer>,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: Vec<VariationEntry>,
    base_width: u32,
    base_height: u32,
    generation_complete: bool,
    // Bumped by every populate/clear; an async worker only publishes if the
    // epoch it was started under is still current, so a stale worker can
    // never overwrite a newer population.
    epoch: u64,
}

/// Bounded, thread-safe cache of precomputed opacity/invert variations.
///
/// A single mutex guards the whole entry set; writers publish a fully built
/// set in one guarded store, so a reader observes either an empty cache or a
/// complete, internally consistent one, never a partial state. Buffers are
/// handed out as `Arc` clones, which keeps a served frame valid even if the
/// cache is cleared or repopulated while the renderer is still using it.
#[derive(Debug, Default)]
pub struct VariationCache {
    state: Mutex<CacheState>,
}

impl VariationCache {
    /// Create an empty cache. Lookups on an unpopulated cache return `None`.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Generate and publish all variations of `base` on the calling thread.
    ///
    /// Blocks until every variation is built; immediately after return the
    /// cache is ready. A variation whose buffer cannot be allocated is
    /// skipped, so the entry count may fall short of the full enumeration.
    pub fn populate(&self, base: &PixelBuffer) {
        let (width, height) = base.dimensions();
        let entries = generate_variations(base);
        self.publish(entries, width, height, None);
    }

    /// Record base dimensions, then build the variation set on a detached
    /// background thread and publish it in one lock-guarded step.
    ///
    /// Returns as soon as the worker is spawned; until it publishes, lookups
    /// return `None` and callers fall back to uncached rendering. If the
    /// worker thread cannot be spawned (or the thread-owned base duplicate
    /// cannot be allocated), population happens synchronously on the calling
    /// thread instead; that fallback is the only path on which this call
    /// blocks.
    ///
    /// Takes an owned `Arc` handle because the worker keeps the cache alive
    /// past the caller; clone the handle at the call site.
    pub fn populate_async(self: Arc<Self>, base: &PixelBuffer) {
        let (width, height) = base.dimensions();
        let target_epoch = {
            let mut state = self.lock_state();
            state.entries.clear();
            state.generation_complete = false;
            state.base_width = width;
            state.base_height = height;
            state.epoch += 1;
            state.epoch
        };

        // The worker owns its own copy; the caller may drop or mutate `base`
        // the moment this returns.
        let owned = match base.try_duplicate() {
            Ok(dup) => dup,
            Err(e) => {
                tracing::warn!(error = %e, "cannot duplicate base image for background population");
                self.populate(base);
                return;
            }
        };

        let cache = Arc::clone(&self);
        let spawned = std::thread::Builder::new()
            .name("keyglass-variations".into())
            .spawn(move || {
                let entries = generate_variations(&owned);
                cache.publish(entries, width, height, Some(target_epoch));
            });

        if let Err(e) = spawned {
            tracing::warn!(error = %e, "background population unavailable, generating synchronously");
            self.populate(base);
        }
    }

    /// Store a fully built entry set in one lock-guarded step.
    ///
    /// `only_for_epoch` carries the epoch an async worker was started under;
    /// when the cache has been cleared or repopulated since, the stale set is
    /// discarded instead of overwriting the newer state.
    fn publish(
        &self,
        entries: Vec<VariationEntry>,
        width: u32,
        height: u32,
        only_for_epoch: Option<u64>,
    ) {
        let mut state = self.lock_state();
        if let Some(epoch) = only_for_epoch
            && state.epoch != epoch
        {
            tracing::debug!(epoch, current = state.epoch, "discarding stale variation set");
            return;
        }
        tracing::debug!(
            count = entries.len(),
            width,
            height,
            "publishing overlay variations"
        );
        state.entries = entries;
        state.base_width = width;
        state.base_height = height;
        state.generation_complete = true;
        if only_for_epoch.is_none() {
            state.epoch += 1;
        }
    }

    /// Look up the cached variation for `(opacity, invert)`.
    ///
    /// Prefers an exact opacity match (within a small epsilon), then the
    /// entry with the same invert state whose opacity is closest to the
    /// request (first entry wins ties). Returns `None` when the cache holds
    /// no entry for the requested invert state, in particular on a cache
    /// that has not been populated yet. Never blocks beyond the lock.
    pub fn variation(&self, opacity: f32, invert: bool) -> Option<Arc<PixelBuffer>> {
        let state = self.lock_state();
        if state.entries.is_empty() {
            return None;
        }

        if let Some(entry) = state
            .entries
            .iter()
            .find(|e| e.invert == invert && (e.opacity - opacity).abs() < OPACITY_EPSILON)
        {
            return Some(Arc::clone(&entry.pixels));
        }

        let nearest = state
            .entries
            .iter()
            .filter(|e| e.invert == invert)
            .min_by(|a, b| {
                (a.opacity - opacity)
                    .abs()
                    .total_cmp(&(b.opacity - opacity).abs())
            })?;
        let served = nearest.opacity;
        let pixels = Arc::clone(&nearest.pixels);
        drop(state);

        tracing::debug!(requested = opacity, served, invert, "nearest-match variation");
        Some(pixels)
    }

    /// Whether a population pass has published its full variation set.
    pub fn is_ready(&self) -> bool {
        self.lock_state().generation_complete
    }

    /// Number of cached variations.
    pub fn len(&self) -> usize {
        self.lock_state().entries.len()
    }

    /// Whether the cache currently holds no variations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dimensions shared by every cached buffer, if a population pass has
    /// recorded them.
    pub fn base_dimensions(&self) -> Option<(u32, u32)> {
        let state = self.lock_state();
        if state.base_width == 0 || state.base_height == 0 {
            return None;
        }
        Some((state.base_width, state.base_height))
    }

    /// Drop every cached variation and reset the cache to its empty state.
    ///
    /// Safe to call repeatedly; a second call is a no-op. Frames already
    /// served to readers stay alive through their own `Arc`s.
    pub fn clear(&self) {
        let mut state = self.lock_state();
        state.entries.clear();
        state.base_width = 0;
        state.base_height = 0;
        state.generation_complete = false;
        state.epoch += 1;
    }
}

/// Build the full variation set for `base` into a local vector.
///
/// Runs off the shared state entirely so the caller can publish the result
/// under the lock in one step. Generation order is opacity-major with
/// non-inverted before inverted at each level, bounded by [`CAPACITY`].
fn generate_variations(base: &PixelBuffer) -> Vec<VariationEntry> {
    let pairs: Vec<(f32, bool)> = OPACITY_LEVELS
        .iter()
        .flat_map(|&opacity| [(opacity, false), (opacity, true)])
        .take(CAPACITY)
        .collect();

    pairs
        .par_iter()
        .filter_map(|&(opacity, invert)| match base.try_duplicate() {
            Ok(mut dup) => {
                apply_effects(&mut dup, opacity, invert);
                Some(VariationEntry {
                    opacity,
                    invert,
                    pixels: Arc::new(dup),
                })
            }
            Err(e) => {
                tracing::warn!(opacity, invert, error = %e, "skipping variation");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/cache.rs"]
mod tests;
