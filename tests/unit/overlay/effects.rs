use super::*;

fn buffer_of_pixels(pixels: &[[u8; 4]]) -> PixelBuffer {
    let data: Vec<u8> = pixels.iter().flatten().copied().collect();
    PixelBuffer::from_rgba8(pixels.len() as u32, 1, data).unwrap()
}

#[test]
fn invert_and_half_opacity_per_pixel() {
    // 2x2 of (100,110,120,200): invert flips RGB, alpha truncates to 100.
    let data: Vec<u8> = std::iter::repeat_n([100u8, 110, 120, 200], 4)
        .flatten()
        .collect();
    let mut buf = PixelBuffer::from_rgba8(2, 2, data).unwrap();

    apply_effects(&mut buf, 0.5, true);

    for px in buf.as_bytes().chunks_exact(4) {
        assert_eq!(px, &[155, 145, 135, 100]);
    }
}

#[test]
fn identity_settings_leave_pixels_unchanged() {
    let mut buf = buffer_of_pixels(&[[10, 20, 30, 128], [50, 60, 70, 255]]);
    apply_effects(&mut buf, 1.0, false);
    assert_eq!(
        buf.as_bytes(),
        &[10, 20, 30, 128, 50, 60, 70, 255][..]
    );
}

#[test]
fn alpha_scale_truncates() {
    let mut buf = buffer_of_pixels(&[[0, 0, 0, 255]]);
    apply_effects(&mut buf, 0.999, false);
    // 255 * 0.999 = 254.745 -> 254, not 255
    assert_eq!(buf.as_bytes()[3], 254);
}

#[test]
fn copy_transform_leaves_source_untouched() {
    let src = buffer_of_pixels(&[[10, 20, 30, 128], [50, 60, 70, 255]]);
    let src_bytes = src.as_bytes().to_vec();
    let mut dst = src.try_duplicate().unwrap();

    apply_effects_copy(&src, &mut dst, 0.5, true).unwrap();

    assert_eq!(src.as_bytes(), &src_bytes[..]);
    assert_eq!(
        dst.as_bytes(),
        &[245, 235, 225, 64, 205, 195, 185, 127][..]
    );
}

#[test]
fn copy_transform_rejects_dimension_mismatch() {
    let src = buffer_of_pixels(&[[1, 2, 3, 4], [5, 6, 7, 8]]);
    let mut dst = buffer_of_pixels(&[[0, 0, 0, 0]]);
    assert!(apply_effects_copy(&src, &mut dst, 1.0, false).is_err());
}

#[test]
fn inversion_never_touches_alpha() {
    let mut buf = buffer_of_pixels(&[[0, 128, 255, 77]]);
    apply_effects(&mut buf, 1.0, true);
    assert_eq!(buf.as_bytes(), &[255, 127, 0, 77][..]);
}
