//! Source-image access: decode, aspect-fit resize, and the embedded fallback.

/// Decode encoded image bytes into an RGBA [`crate::PixelBuffer`].
pub mod decode;
/// Built-in fallback keymap image.
pub mod embedded;
