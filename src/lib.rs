//! Keyglass is the image core of a keyboard-layout overlay utility.
//!
//! The overlay application shows a semi-transparent keyboard-layout image on
//! top of all other windows. This crate owns everything between the encoded
//! source image and the pixels handed to the compositor:
//!
//! - Decode and aspect-fit an image into an RGBA [`PixelBuffer`]
//! - Apply opacity/invert effect transforms
//! - Precompute a bounded set of effect variations in a thread-safe
//!   [`VariationCache`], populated synchronously or by a background worker
//! - Serve the closest precomputed variation to the rendering layer
//!
//! OS windowing, global hotkeys, and tray menus live in the platform shells
//! and are out of scope here.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Image decode/resize and the embedded fallback keymap.
pub mod assets;
/// Runtime configuration model and JSON persistence.
pub mod config;
/// Pixel buffers, effect transforms, and the variation cache.
pub mod overlay;

pub use crate::foundation::error::{KeyglassError, KeyglassResult};

pub use crate::assets::decode::{decode_and_resize, load_or_embedded, load_overlay_image};
pub use crate::assets::embedded::DEFAULT_KEYMAP;
pub use crate::config::{OverlayConfig, PositionMode};
pub use crate::overlay::buffer::PixelBuffer;
pub use crate::overlay::cache::{OPACITY_LEVELS, VariationCache};
pub use crate::overlay::effects::{apply_effects, apply_effects_copy};
pub use crate::overlay::manager::{OverlayManager, SizeRequest};
