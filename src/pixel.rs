//! Pixel payload in wire byte order

use heapless::Vec;

use crate::color::Rgb;
use crate::error::Error;

/// Byte order of a pixel on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    /// Green, red, blue (WS2812, SK68XX).
    #[default]
    Grb,
    Rgb,
    Brg,
    Rbg,
    Gbr,
    Bgr,
}

impl ColorOrder {
    /// Channel bytes of `color` in this order.
    pub const fn arrange(self, color: Rgb) -> [u8; 3] {
        let Rgb { r, g, b } = color;
        match self {
            Self::Grb => [g, r, b],
            Self::Rgb => [r, g, b],
            Self::Brg => [b, r, g],
            Self::Rbg => [r, b, g],
            Self::Gbr => [g, b, r],
            Self::Bgr => [b, g, r],
        }
    }
}

/// Bytes of one frame, `BYTES` is three times the pixel count.
#[derive(Debug, Clone, Default)]
pub struct PixelBuffer<const BYTES: usize> {
    bytes: Vec<u8, BYTES>,
}

impl<const BYTES: usize> PixelBuffer<BYTES> {
    /// Pixels that fit into the buffer.
    pub const PIXELS: usize = BYTES / 3;

    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Append one pixel in `order`.
    pub fn push(&mut self, color: Rgb, order: ColorOrder) -> Result<(), Error> {
        if self.bytes.len() + 3 > BYTES {
            return Err(Error::TooManyPixels);
        }
        self.bytes
            .extend_from_slice(&order.arrange(color))
            .map_err(|()| Error::TooManyPixels)
    }

    /// Replace the contents with `colors`.
    ///
    /// On error the buffer keeps its previous contents.
    pub fn fill_from<I>(&mut self, colors: I, order: ColorOrder) -> Result<(), Error>
    where
        I: IntoIterator<Item = Rgb>,
    {
        let mut next = Self::new();
        for color in colors {
            next.push(color, order)?;
        }
        *self = next;
        Ok(())
    }

    /// Every pixel set to `color`.
    pub fn fill(&mut self, color: Rgb, order: ColorOrder) {
        self.clear();
        for _ in 0..Self::PIXELS {
            let _ = self.push(color, order);
        }
    }

    /// Remove every pixel.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Frame bytes in wire order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Pixels currently in the buffer.
    pub fn pixel_count(&self) -> usize {
        self.bytes.len() / 3
    }
}
