/// Placeholder keymap image compiled into the binary, used when no
/// `keymap.png` can be found next to the executable or at the configured
/// path. Decoded through the same path as any external image.
pub static DEFAULT_KEYMAP: &[u8] = include_bytes!("../../assets/keymap.png");
