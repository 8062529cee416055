//! Border operations
//!
//! Add or remove borders around images. The enlarged (or cropped) image is
//! built by blitting the source into place, so these work at any alignment
//! the rasterop engine handles.

use super::{Pix, RopOp};
use crate::error::{Error, Result};

impl Pix {
    /// Add a uniform border of `npix` pixels with the specified value.
    pub fn add_border(&self, npix: u32, val: u32) -> Result<Pix> {
        self.add_border_general(npix, npix, npix, npix, val)
    }

    /// Add a border with different sizes on each side.
    ///
    /// `val` is the border pixel value: 0 (OFF) or nonzero (ON) for 1 bpp.
    pub fn add_border_general(
        &self,
        left: u32,
        right: u32,
        top: u32,
        bot: u32,
        val: u32,
    ) -> Result<Pix> {
        let w = self.width() + left + right;
        let h = self.height() + top + bot;

        let mut pixd = Pix::new(w, h, self.depth())?.to_mut();
        if val != 0 {
            pixd.set_all();
        }
        pixd.rasterop(
            left as i32,
            top as i32,
            self.width() as i32,
            self.height() as i32,
            RopOp::Src,
            self,
            0,
            0,
        )?;
        Ok(pixd.into())
    }

    /// Remove a uniform border of `npix` pixels.
    pub fn remove_border(&self, npix: u32) -> Result<Pix> {
        self.remove_border_general(npix, npix, npix, npix)
    }

    /// Remove a border with different sizes on each side.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if the removal would consume the
    /// whole image in either direction.
    pub fn remove_border_general(&self, left: u32, right: u32, top: u32, bot: u32) -> Result<Pix> {
        let stripped_w = left + right;
        let stripped_h = top + bot;
        if stripped_w >= self.width() || stripped_h >= self.height() {
            return Err(Error::InvalidDimension {
                width: self.width().saturating_sub(stripped_w),
                height: self.height().saturating_sub(stripped_h),
            });
        }

        let w = self.width() - stripped_w;
        let h = self.height() - stripped_h;
        let mut pixd = Pix::new(w, h, self.depth())?.to_mut();
        pixd.rasterop(0, 0, w as i32, h as i32, RopOp::Src, self, left as i32, top as i32)?;
        Ok(pixd.into())
    }
}
