use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::{decode_and_resize, read_source_bytes};
use crate::foundation::error::KeyglassResult;
use crate::overlay::buffer::PixelBuffer;
use crate::overlay::cache::VariationCache;
use crate::overlay::effects::apply_effects;

/// Target sizing for the decoded overlay image.
///
/// Either a scale factor applied to the active monitor's dimensions, or an
/// explicit pixel size. Mirrors what the tray menu exposes.
#[derive(Clone, Copy, Debug)]
pub struct SizeRequest {
    /// Active monitor width in pixels.
    pub monitor_width: u32,
    /// Active monitor height in pixels.
    pub monitor_height: u32,
    /// Scale factor applied to the monitor dimensions (0.5 = 50%).
    pub scale: f32,
    /// Explicit `(width, height)` bound; overrides `scale` when set.
    pub custom_size: Option<(u32, u32)>,
}

impl SizeRequest {
    /// The decode bound this request resolves to.
    pub fn max_dimensions(&self) -> (u32, u32) {
        match self.custom_size {
            Some(custom) => custom,
            None => (
                ((self.monitor_width as f32 * self.scale) as u32).max(1),
                ((self.monitor_height as f32 * self.scale) as u32).max(1),
            ),
        }
    }

    fn differs_from(&self, other: &Self) -> bool {
        (self.scale - other.scale).abs() >= 0.001
            || self.monitor_width != other.monitor_width
            || self.monitor_height != other.monitor_height
            || self.custom_size != other.custom_size
    }
}

/// Owns the overlay image end to end: the encoded source bytes, the decoded
/// base buffer, and the variation cache built from it.
///
/// The manager is an explicit value with no process-wide state behind it;
/// dropping it releases the image, the cache, and any worker-held copies.
#[derive(Debug)]
pub struct OverlayManager {
    encoded: Vec<u8>,
    base: PixelBuffer,
    cache: Arc<VariationCache>,
    last_size: SizeRequest,
}

impl OverlayManager {
    /// Load the overlay from `image_path` (falling back to a `keymap.png`
    /// beside the executable, then the embedded image), decode it to fit
    /// `size`, and start background cache population.
    pub fn load(image_path: Option<&Path>, size: SizeRequest) -> KeyglassResult<Self> {
        let encoded = read_source_bytes(image_path);
        Self::from_encoded(encoded, size)
    }

    /// Build a manager from already encoded image bytes.
    pub fn from_encoded(encoded: Vec<u8>, size: SizeRequest) -> KeyglassResult<Self> {
        let (max_w, max_h) = size.max_dimensions();
        let base = decode_and_resize(&encoded, max_w, max_h)?;
        tracing::debug!(width = base.width(), height = base.height(), "overlay loaded");

        let cache = Arc::new(VariationCache::new());
        Arc::clone(&cache).populate_async(&base);

        Ok(Self {
            encoded,
            base,
            cache,
            last_size: size,
        })
    }

    /// Re-decode the base image and repopulate the cache, but only when the
    /// sizing inputs actually changed. Returns whether a reload happened.
    pub fn reload_if_needed(&mut self, size: SizeRequest) -> KeyglassResult<bool> {
        if !size.differs_from(&self.last_size) {
            return Ok(false);
        }
        self.last_size = size;

        let (max_w, max_h) = size.max_dimensions();
        self.base = decode_and_resize(&self.encoded, max_w, max_h)?;
        tracing::debug!(
            width = self.base.width(),
            height = self.base.height(),
            "overlay reloaded"
        );

        self.cache.clear();
        Arc::clone(&self.cache).populate_async(&self.base);
        Ok(true)
    }

    /// The frame to composite for `(opacity, invert)`.
    ///
    /// Serves the cached variation when one exists; before the cache is
    /// populated (or after repeated allocation failures emptied it) the
    /// transform is applied on the fly to a duplicate of the base image so
    /// display never waits on the background worker. `opacity` is clamped to
    /// `[0, 1]` here.
    pub fn frame(&self, opacity: f32, invert: bool) -> KeyglassResult<Arc<PixelBuffer>> {
        let opacity = opacity.clamp(0.0, 1.0);
        if let Some(pixels) = self.cache.variation(opacity, invert) {
            return Ok(pixels);
        }

        let mut fresh = self.base.try_duplicate()?;
        apply_effects(&mut fresh, opacity, invert);
        Ok(Arc::new(fresh))
    }

    /// Dimensions of the decoded base image.
    pub fn dimensions(&self) -> (u32, u32) {
        self.base.dimensions()
    }

    /// The decoded base image, before any effect is applied.
    pub fn base(&self) -> &PixelBuffer {
        &self.base
    }

    /// The variation cache backing [`OverlayManager::frame`].
    pub fn cache(&self) -> &Arc<VariationCache> {
        &self.cache
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/manager.rs"]
mod tests;
