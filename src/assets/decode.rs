use std::io::ErrorKind;
use std::path::Path;

use image::imageops::FilterType;

use crate::assets::embedded::DEFAULT_KEYMAP;
use crate::foundation::error::{KeyglassError, KeyglassResult};
use crate::foundation::math::fit_within;
use crate::overlay::buffer::PixelBuffer;

/// Decode encoded image bytes and downscale the result to fit within
/// `max_width x max_height`, preserving aspect ratio.
///
/// Images already inside the bound are left at their native size; the
/// overlay never upscales. Output is straight-alpha RGBA8.
pub fn decode_and_resize(
    bytes: &[u8],
    max_width: u32,
    max_height: u32,
) -> KeyglassResult<PixelBuffer> {
    if max_width == 0 || max_height == 0 {
        return Err(KeyglassError::validation(
            "decode bounds must be non-zero",
        ));
    }

    let dyn_img = image::load_from_memory(bytes).map_err(KeyglassError::image_decode)?;
    let rgba = dyn_img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (target_w, target_h) = fit_within(w, h, max_width, max_height);
    let rgba = if (target_w, target_h) == (w, h) {
        rgba
    } else {
        image::imageops::resize(&rgba, target_w, target_h, FilterType::Triangle)
    };

    PixelBuffer::from_rgba8(target_w, target_h, rgba.into_raw())
}

/// Read and decode an overlay image file, fitting it within the given bounds.
///
/// A missing file surfaces as [`KeyglassError::ImageNotFound`] so callers can
/// fall through to the embedded image; any other read or decode failure keeps
/// its own kind.
pub fn load_overlay_image(
    path: &Path,
    max_width: u32,
    max_height: u32,
) -> KeyglassResult<PixelBuffer> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(KeyglassError::ImageNotFound(path.display().to_string()));
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("read overlay image '{}'", path.display()))
                .into());
        }
    };
    decode_and_resize(&bytes, max_width, max_height)
}

/// Decode the overlay from `path` when given, otherwise from a `keymap.png`
/// beside the executable, otherwise from the embedded fallback.
pub fn load_or_embedded(
    path: Option<&Path>,
    max_width: u32,
    max_height: u32,
) -> KeyglassResult<PixelBuffer> {
    decode_and_resize(&read_source_bytes(path), max_width, max_height)
}

/// Resolve the encoded source bytes for the overlay image.
///
/// Search order: the explicit path, a `keymap.png` next to the executable,
/// then the embedded fallback. Unreadable candidates are logged and skipped
/// rather than treated as fatal; the embedded blob always resolves.
pub fn read_source_bytes(path: Option<&Path>) -> Vec<u8> {
    if let Some(path) = path {
        match std::fs::read(path) {
            Ok(bytes) => return bytes,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "configured overlay image unreadable");
            }
        }
    }

    if let Ok(mut exe) = std::env::current_exe() {
        exe.set_file_name("keymap.png");
        match std::fs::read(&exe) {
            Ok(bytes) => return bytes,
            Err(e) if e.kind() != ErrorKind::NotFound => {
                tracing::warn!(path = %exe.display(), error = %e, "sibling keymap.png unreadable");
            }
            Err(_) => {}
        }
    }

    tracing::debug!("falling back to embedded keymap image");
    DEFAULT_KEYMAP.to_vec()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
