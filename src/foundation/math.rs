/// Scale an alpha byte by `opacity` with truncation.
///
/// Truncation (not rounding) matches the byte math the platform shells bake
/// into their layered-window paths. `opacity` outside `[0, 1]` saturates at
/// the cast; callers that care clamp first.
pub(crate) fn scale_alpha_trunc(a: u8, opacity: f32) -> u8 {
    (f32::from(a) * opacity) as u8
}

/// Largest `(w, h)` that fits within `(max_w, max_h)` while preserving the
/// aspect ratio of `(w, h)`. Never upscales and never returns a zero
/// dimension.
pub(crate) fn fit_within(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w == 0 || h == 0 {
        return (w, h);
    }

    let scale_w = max_w as f32 / w as f32;
    let scale_h = max_h as f32 / h as f32;
    let scale = scale_w.min(scale_h);
    if scale >= 1.0 {
        return (w, h);
    }

    let new_w = ((w as f32 * scale) as u32).max(1);
    let new_h = ((h as f32 * scale) as u32).max(1);
    (new_w, new_h)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
