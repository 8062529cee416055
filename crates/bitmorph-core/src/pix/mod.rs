//! PIX - the packed bitmap container
//!
//! `Pix` is the image type every operator in this workspace works on. The
//! morphology engine only ever writes 1-bpp images, but the container keeps
//! the full set of power-of-two depths so that depth-dependent queries (such
//! as the border pixel color) stay expressible.

mod access;
mod border;
pub mod rop;

pub use rop::RopOp;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary image
    Bit1 = 1,
    /// 2-bit image (4 levels)
    Bit2 = 2,
    /// 4-bit image (16 levels)
    Bit4 = 4,
    /// 8-bit grayscale
    Bit8 = 8,
    /// 16-bit grayscale
    Bit16 = 16,
    /// 32-bit RGBA (red in MSB, alpha in LSB)
    Bit32 = 32,
}

impl PixelDepth {
    /// Create PixelDepth from a u32 value
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            2 => Ok(PixelDepth::Bit2),
            4 => Ok(PixelDepth::Bit4),
            8 => Ok(PixelDepth::Bit8),
            16 => Ok(PixelDepth::Bit16),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// Internal PIX data
#[derive(Debug)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// 32-bit words per line
    wpl: u32,
    /// The image data (packed 32-bit words)
    data: Vec<u32>,
}

/// PIX - packed bitmap
///
/// Uses reference counting via `Arc`, so `clone()` is a cheap second handle
/// onto the same buffer and `deep_clone()` is an independent copy.
///
/// # Pixel layout
///
/// - Image data is stored in 32-bit words
/// - Every row starts on a 32-bit boundary
/// - Pixels are packed MSB to LSB within each word
///
/// # Examples
///
/// ```
/// use bitmorph_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit1).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.wpl(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let wpl = Self::compute_wpl(width, depth);
        let data = vec![0u32; (wpl as usize) * (height as usize)];

        Ok(Pix {
            inner: Arc::new(PixData {
                width,
                height,
                depth,
                wpl,
                data,
            }),
        })
    }

    /// Create a blank PIX with this image's geometry and depth.
    pub fn template(&self) -> Pix {
        let wpl = self.inner.wpl;
        let data = vec![0u32; (wpl as usize) * (self.inner.height as usize)];
        Pix {
            inner: Arc::new(PixData {
                width: self.inner.width,
                height: self.inner.height,
                depth: self.inner.depth,
                wpl,
                data,
            }),
        }
    }

    /// Compute words per line for given width and depth
    #[inline]
    fn compute_wpl(width: u32, depth: PixelDepth) -> u32 {
        (width * depth.bits()).div_ceil(32)
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the words per line
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the number of strong references to this PIX
    #[inline]
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Check whether two handles share the same underlying buffer.
    #[inline]
    pub fn shares_data(&self, other: &Pix) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Check whether two images have the same width, height and depth.
    #[inline]
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.depth() == other.depth()
    }

    /// Get a slice covering a specific row
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        &self.inner.data[start..start + self.inner.wpl as usize]
    }

    /// Create a deep copy of this PIX
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Pix {
            inner: Arc::new(PixData {
                width: self.inner.width,
                height: self.inner.height,
                depth: self.inner.depth,
                wpl: self.inner.wpl,
                data: self.inner.data.clone(),
            }),
        }
    }

    /// Try to get mutable access to the image data
    ///
    /// This succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX
    ///
    /// This always creates a new copy that can be modified.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData {
                width: self.inner.width,
                height: self.inner.height,
                depth: self.inner.depth,
                wpl: self.inner.wpl,
                data: self.inner.data.clone(),
            },
        }
    }

    /// Check if two images are equal.
    ///
    /// Compares geometry, depth and pixel content. Padding bits in the last
    /// word of each row are ignored; operators that set whole words (such as
    /// erosion's set-all start) may leave them in either state.
    pub fn equals(&self, other: &Pix) -> bool {
        if !self.sizes_equal(other) {
            return false;
        }

        let used_bits = self.width() * self.depth().bits();
        let full_words = (used_bits / 32) as usize;
        let tail_bits = used_bits % 32;
        let tail_mask = if tail_bits == 0 {
            0
        } else {
            u32::MAX << (32 - tail_bits)
        };

        for y in 0..self.height() {
            let la = self.row_data(y);
            let lb = other.row_data(y);
            if la[..full_words] != lb[..full_words] {
                return false;
            }
            if tail_bits != 0 && (la[full_words] ^ lb[full_words]) & tail_mask != 0 {
                return false;
            }
        }
        true
    }

    /// Count the foreground (ON) pixels of a 1-bpp image.
    ///
    /// Row padding bits are masked out before counting.
    pub fn count_pixels(&self) -> u64 {
        let full_words = (self.width() / 32) as usize;
        let tail_bits = self.width() % 32;
        let tail_mask = if tail_bits == 0 {
            0
        } else {
            u32::MAX << (32 - tail_bits)
        };

        let mut count = 0u64;
        for y in 0..self.height() {
            let line = self.row_data(y);
            for &word in &line[..full_words] {
                count += word.count_ones() as u64;
            }
            if tail_bits != 0 {
                count += (line[full_words] & tail_mask).count_ones() as u64;
            }
        }
        count
    }
}

/// Mutable PIX
///
/// This type allows modification of image data. It can be converted
/// back to an immutable `Pix` using `into()`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get words per line
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.wpl
    }

    /// Get raw access to the image data
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the image data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Get a slice covering a specific row
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let start = (y * self.inner.wpl) as usize;
        &self.inner.data[start..start + self.inner.wpl as usize]
    }

    /// Get mutable access to a specific row
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let start = (y * self.inner.wpl) as usize;
        &mut self.inner.data[start..start + self.inner.wpl as usize]
    }

    /// Clear all pixels to zero
    pub fn clear(&mut self) {
        self.inner.data.fill(0);
    }

    /// Set all pixels to one (all bits set)
    pub fn set_all(&mut self) {
        self.inner.data.fill(0xFFFFFFFF);
    }
}

impl From<PixMut> for Pix {
    fn from(pix_mut: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix_mut.inner),
        }
    }
}
