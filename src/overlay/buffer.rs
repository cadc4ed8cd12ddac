use crate::foundation::error::{KeyglassError, KeyglassResult};

/// Bytes per pixel; everything in this crate is RGBA8.
pub const CHANNELS: usize = 4;

/// An owned, tightly packed RGBA8 image.
///
/// The buffer is valid by construction: dimensions are non-zero and
/// `data.len() == width * height * 4`. There is no freed/empty state; the
/// buffer releases its memory when dropped.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes, validating the shape.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> KeyglassResult<Self> {
        if width == 0 || height == 0 {
            return Err(KeyglassError::validation(
                "pixel buffer dimensions must be non-zero",
            ));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(CHANNELS))
            .ok_or_else(|| KeyglassError::validation("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(KeyglassError::validation(format!(
                "pixel buffer length {} does not match {}x{}x4",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Deep-copy into a fully independent buffer.
    ///
    /// Allocation is fallible so a failed duplication can be skipped by the
    /// cache population loop instead of aborting the process.
    pub fn try_duplicate(&self) -> KeyglassResult<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())?;
        data.extend_from_slice(&self.data);
        Ok(Self {
            width: self.width,
            height: self.height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Row-major RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/buffer.rs"]
mod tests;
