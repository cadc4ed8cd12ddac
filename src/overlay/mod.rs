//! Pixel buffers, effect transforms, and the precomputed variation cache.
//!
//! The rendering shell queries [`cache::VariationCache`] on every visibility
//! toggle or config change; everything here is platform-independent.

/// Owned RGBA pixel buffers.
pub mod buffer;
/// Bounded cache of precomputed opacity/invert variations.
pub mod cache;
/// Opacity and color-inversion transforms over RGBA pixels.
pub mod effects;
/// Source-image lifecycle: load, reload on size change, serve frames.
pub mod manager;
