use crate::foundation::error::{KeyglassError, KeyglassResult};
use crate::foundation::math::scale_alpha_trunc;
use crate::overlay::buffer::PixelBuffer;

/// Rewrite `buffer` in place: optionally invert R,G,B, then scale alpha by
/// `opacity` with truncation.
///
/// Inversion never touches alpha and the opacity scale only touches alpha, so
/// the two sub-steps are order-independent. `opacity` is not clamped here;
/// out-of-range values saturate at the byte cast. The cache population and
/// manager boundaries clamp before calling.
pub fn apply_effects(buffer: &mut PixelBuffer, opacity: f32, invert: bool) {
    for px in buffer.bytes_mut().chunks_exact_mut(4) {
        if invert {
            px[0] = 255 - px[0];
            px[1] = 255 - px[1];
            px[2] = 255 - px[2];
        }
        px[3] = scale_alpha_trunc(px[3], opacity);
    }
}

/// Same transform as [`apply_effects`], reading from `src` and writing into
/// `dst`, leaving `src` pristine.
///
/// Used wherever the source must survive to seed further variations. `dst`
/// must already have the same dimensions as `src`.
pub fn apply_effects_copy(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    opacity: f32,
    invert: bool,
) -> KeyglassResult<()> {
    if src.dimensions() != dst.dimensions() {
        return Err(KeyglassError::validation(
            "apply_effects_copy expects equal-dimension buffers",
        ));
    }
    for (d, s) in dst
        .bytes_mut()
        .chunks_exact_mut(4)
        .zip(src.as_bytes().chunks_exact(4))
    {
        if invert {
            d[0] = 255 - s[0];
            d[1] = 255 - s[1];
            d[2] = 255 - s[2];
        } else {
            d[0] = s[0];
            d[1] = s[1];
            d[2] = s[2];
        }
        d[3] = scale_alpha_trunc(s[3], opacity);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/effects.rs"]
mod tests;
