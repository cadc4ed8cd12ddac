use super::*;

fn filled(width: u32, height: u32, byte: u8) -> PixelBuffer {
    let data = vec![byte; (width * height) as usize * CHANNELS];
    PixelBuffer::from_rgba8(width, height, data).unwrap()
}

#[test]
fn from_rgba8_validates_shape() {
    assert!(PixelBuffer::from_rgba8(2, 2, vec![0u8; 16]).is_ok());
    assert!(PixelBuffer::from_rgba8(2, 2, vec![0u8; 15]).is_err());
    assert!(PixelBuffer::from_rgba8(0, 2, vec![]).is_err());
    assert!(PixelBuffer::from_rgba8(2, 0, vec![]).is_err());
}

#[test]
fn duplicate_is_a_deep_copy() {
    let src = filled(2, 2, 7);
    let mut dup = src.try_duplicate().unwrap();
    assert_eq!(dup.as_bytes(), src.as_bytes());
    assert_eq!(dup.dimensions(), src.dimensions());

    dup.bytes_mut()[0] = 99;
    assert_eq!(src.as_bytes()[0], 7);
}

#[test]
fn accessors_report_shape() {
    let buf = filled(3, 2, 0);
    assert_eq!(buf.width(), 3);
    assert_eq!(buf.height(), 2);
    assert_eq!(buf.dimensions(), (3, 2));
    assert_eq!(buf.as_bytes().len(), 3 * 2 * 4);
}
