use crate::foundation::error::{WhipcutError, WhipcutResult};

/// Zero-based index of a rendered step within a transition run.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output frame rate as an exact rational.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator, must be > 0.
    pub num: u32,
    /// Denominator, must be > 0.
    pub den: u32,
}

impl Fps {
    /// Validating constructor.
    pub fn new(num: u32, den: u32) -> WhipcutResult<Self> {
        if den == 0 {
            return Err(WhipcutError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(WhipcutError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate as a float, for display only.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

/// Axis a 1-D pixel operation (shift, motion blur) runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    /// Across columns.
    Horizontal,
    /// Across rows.
    Vertical,
}

/// Pixel dimensions of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Packed 8-bit RGB frame, row-major, three bytes per pixel.
///
/// Dimensions are fixed at construction and always non-zero, so pixel
/// operations only ever need to check that two frames agree with each other.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgb {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl FrameRgb {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 3;

    /// Allocate a black frame of the given size.
    pub fn new(width: u32, height: u32) -> WhipcutResult<Self> {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Allocate a frame filled with one color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> WhipcutResult<Self> {
        if width == 0 || height == 0 {
            return Err(WhipcutError::dimension_mismatch(format!(
                "frame dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let len = (width as usize) * (height as usize) * Self::CHANNELS;
        let mut data = vec![0u8; len];
        for px in data.chunks_exact_mut(Self::CHANNELS) {
            px.copy_from_slice(&rgb);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing packed RGB buffer.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> WhipcutResult<Self> {
        if width == 0 || height == 0 {
            return Err(WhipcutError::dimension_mismatch(format!(
                "frame dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = (width as usize) * (height as usize) * Self::CHANNELS;
        if data.len() != expected {
            return Err(WhipcutError::dimension_mismatch(format!(
                "buffer length {} does not match {width}x{height}x3 = {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
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

    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Packed pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable packed pixel bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the frame and return the packed buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Read one pixel. Panics if out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let o = self.offset(x, y);
        [self.data[o], self.data[o + 1], self.data[o + 2]]
    }

    /// Write one pixel. Panics if out of bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let o = self.offset(x, y);
        self.data[o..o + 3].copy_from_slice(&rgb);
    }

    /// Whether two frames have identical dimensions.
    pub fn same_dims(&self, other: &FrameRgb) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        ((y as usize) * (self.width as usize) + (x as usize)) * Self::CHANNELS
    }

    pub(crate) fn ensure_same_dims(&self, other: &FrameRgb, what: &str) -> WhipcutResult<()> {
        if !self.same_dims(other) {
            return Err(WhipcutError::dimension_mismatch(format!(
                "{what}: {}x{} vs {}x{}",
                self.width, self.height, other.width, other.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
