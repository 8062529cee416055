//! Raster operations
//!
//! The rasterop is the workhorse of the binary morphology engine: a boolean
//! bit-blit that combines a source rectangle with a destination rectangle
//! under a raster operation, at arbitrary sub-word bit alignment.
//!
//! Three entry points are provided on [`PixMut`]:
//!
//! - [`PixMut::rasterop`] - general blit from another image
//! - [`PixMut::rasterop_uni`] - destination-only ops (Clear, Set, NotDst)
//! - [`PixMut::rasterop_self`] - source and destination on the same image,
//!   safe for overlapping rectangles
//!
//! Whole-image combines (`and`, `or`, `xor`, `invert`) are the degenerate
//! full-frame case and are layered on top.

use super::{Pix, PixMut};
use crate::error::{Error, Result};

/// Raster operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RopOp {
    /// Clear: d = 0
    Clear,
    /// Set: d = 1 (all bits set)
    Set,
    /// Copy source: d = s
    Src,
    /// Invert destination: d = ~d
    NotDst,
    /// Invert source: d = ~s
    NotSrc,
    /// AND: d = s & d
    And,
    /// OR: d = s | d
    Or,
    /// XOR: d = s ^ d
    Xor,
    /// NAND: d = ~(s & d)
    Nand,
    /// NOR: d = ~(s | d)
    Nor,
    /// XNOR: d = ~(s ^ d)
    Xnor,
    /// AND with inverted source: d = ~s & d
    AndNotSrc,
    /// AND with inverted dest: d = s & ~d
    AndNotDst,
    /// OR with inverted source: d = ~s | d
    OrNotSrc,
    /// OR with inverted dest: d = s | ~d
    OrNotDst,
}

impl RopOp {
    /// Check if this operation requires a source image
    #[inline]
    pub fn requires_source(self) -> bool {
        !matches!(self, RopOp::Clear | RopOp::Set | RopOp::NotDst)
    }
}

/// Apply a raster operation to a 32-bit word
#[inline]
fn apply_rop_word(d: u32, s: u32, op: RopOp) -> u32 {
    match op {
        RopOp::Clear => 0,
        RopOp::Set => 0xFFFFFFFF,
        RopOp::Src => s,
        RopOp::NotDst => !d,
        RopOp::NotSrc => !s,
        RopOp::And => s & d,
        RopOp::Or => s | d,
        RopOp::Xor => s ^ d,
        RopOp::Nand => !(s & d),
        RopOp::Nor => !(s | d),
        RopOp::Xnor => !(s ^ d),
        RopOp::AndNotSrc => !s & d,
        RopOp::AndNotDst => s & !d,
        RopOp::OrNotSrc => !s | d,
        RopOp::OrNotDst => s | !d,
    }
}

/// Rectangle surviving clip, in pixel coordinates
#[derive(Debug, Clone, Copy)]
struct ClippedRect {
    dx: u32,
    dy: u32,
    sx: u32,
    sy: u32,
    w: u32,
    h: u32,
}

/// Clip a blit rectangle against the destination extent only.
fn clip_dest(mut dx: i32, mut dy: i32, mut dw: i32, mut dh: i32, dpw: u32, dph: u32) -> Option<ClippedRect> {
    if dx < 0 {
        dw += dx;
        dx = 0;
    }
    if dy < 0 {
        dh += dy;
        dy = 0;
    }
    dw = dw.min(dpw as i32 - dx);
    dh = dh.min(dph as i32 - dy);
    if dw <= 0 || dh <= 0 {
        return None;
    }
    Some(ClippedRect {
        dx: dx as u32,
        dy: dy as u32,
        sx: 0,
        sy: 0,
        w: dw as u32,
        h: dh as u32,
    })
}

/// Clip a blit rectangle against both the destination and source extents.
///
/// Negative destination coordinates push the source origin forward and
/// vice versa, so the surviving rectangle combines exactly the bit pairs
/// the unclipped request would have.
#[allow(clippy::too_many_arguments)]
fn clip_full(
    mut dx: i32,
    mut dy: i32,
    mut dw: i32,
    mut dh: i32,
    mut sx: i32,
    mut sy: i32,
    dpw: u32,
    dph: u32,
    spw: u32,
    sph: u32,
) -> Option<ClippedRect> {
    if dx < 0 {
        sx -= dx;
        dw += dx;
        dx = 0;
    }
    if dy < 0 {
        sy -= dy;
        dh += dy;
        dy = 0;
    }
    if sx < 0 {
        dx -= sx;
        dw += sx;
        sx = 0;
    }
    if sy < 0 {
        dy -= sy;
        dh += sy;
        sy = 0;
    }
    dw = dw.min(dpw as i32 - dx).min(spw as i32 - sx);
    dh = dh.min(dph as i32 - dy).min(sph as i32 - sy);
    if dw <= 0 || dh <= 0 {
        return None;
    }
    Some(ClippedRect {
        dx: dx as u32,
        dy: dy as u32,
        sx: sx as u32,
        sy: sy as u32,
        w: dw as u32,
        h: dh as u32,
    })
}

/// Mask with MSB-first bits [first, last) set, 0 <= first < last <= 32.
#[inline]
fn word_mask(first: u32, last: u32) -> u32 {
    let m = u32::MAX >> first;
    if last == 32 { m } else { m & !(u32::MAX >> last) }
}

#[inline]
fn word_at(line: &[u32], idx: i64) -> u32 {
    if idx < 0 || idx as usize >= line.len() {
        0
    } else {
        line[idx as usize]
    }
}

/// Fetch the 32 bits starting at an arbitrary bit offset, MSB-first.
///
/// Offsets reaching outside the line yield zero bits; callers mask them out.
#[inline]
fn fetch32(line: &[u32], bit: i64) -> u32 {
    let word = bit.div_euclid(32);
    let shift = bit.rem_euclid(32) as u32;
    let w0 = word_at(line, word);
    if shift == 0 {
        w0
    } else {
        (w0 << shift) | (word_at(line, word + 1) >> (32 - shift))
    }
}

/// Combine `nbits` bits of a source line into a destination line.
///
/// `dbit` and `sbit` are bit offsets from the start of each line. The
/// source is re-aligned to the destination word grid one destination word
/// at a time; the first and last words are written under mask. An empty
/// source line supplies constant zero bits, which is all the
/// destination-only ops need.
fn combine_row(dline: &mut [u32], dbit: u32, sline: &[u32], sbit: u32, nbits: u32, op: RopOp) {
    let last_bit = dbit + nbits;
    let first_word = (dbit >> 5) as usize;
    let last_word = ((last_bit - 1) >> 5) as usize;
    let align = sbit as i64 - dbit as i64;

    for wi in first_word..=last_word {
        let wstart = (wi as u32) << 5;
        let b0 = dbit.max(wstart) - wstart;
        let b1 = last_bit.min(wstart + 32) - wstart;
        let mask = word_mask(b0, b1);
        let s = fetch32(sline, wstart as i64 + align);
        let d = dline[wi];
        dline[wi] = (d & !mask) | (apply_rop_word(d, s, op) & mask);
    }
}

impl PixMut {
    /// General raster operation.
    ///
    /// Combines the `dw` x `dh` rectangle of this image at (`dx`, `dy`)
    /// with the rectangle of `src` starting at (`sx`, `sy`), under `op`.
    /// Coordinates may be negative or extend past either image; the
    /// operation is clipped so that only valid bit pairs are combined and
    /// no bits outside the destination rectangle are written. A fully
    /// clipped request is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns `Error::IncompatibleDepths` if the images differ in depth.
    #[allow(clippy::too_many_arguments)]
    pub fn rasterop(
        &mut self,
        dx: i32,
        dy: i32,
        dw: i32,
        dh: i32,
        op: RopOp,
        src: &Pix,
        sx: i32,
        sy: i32,
    ) -> Result<()> {
        if !op.requires_source() {
            return self.rasterop_uni(dx, dy, dw, dh, op);
        }
        if self.depth() != src.depth() {
            return Err(Error::IncompatibleDepths(
                self.depth().bits(),
                src.depth().bits(),
            ));
        }

        let Some(c) = clip_full(
            dx,
            dy,
            dw,
            dh,
            sx,
            sy,
            self.width(),
            self.height(),
            src.width(),
            src.height(),
        ) else {
            return Ok(());
        };

        let bits = self.depth().bits();
        for i in 0..c.h {
            let sline = src.row_data(c.sy + i);
            let dbit = c.dx * bits;
            let sbit = c.sx * bits;
            let nbits = c.w * bits;
            combine_row(self.row_data_mut(c.dy + i), dbit, sline, sbit, nbits, op);
        }
        Ok(())
    }

    /// Destination-only raster operation (Clear, Set, NotDst).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` for an op that reads a source.
    pub fn rasterop_uni(&mut self, dx: i32, dy: i32, dw: i32, dh: i32, op: RopOp) -> Result<()> {
        if op.requires_source() {
            return Err(Error::InvalidParameter(format!(
                "rasterop_uni: {op:?} requires a source"
            )));
        }

        let Some(c) = clip_dest(dx, dy, dw, dh, self.width(), self.height()) else {
            return Ok(());
        };

        let bits = self.depth().bits();
        for i in 0..c.h {
            let dbit = c.dx * bits;
            let nbits = c.w * bits;
            combine_row(self.row_data_mut(c.dy + i), dbit, &[], 0, nbits, op);
        }
        Ok(())
    }

    /// Raster operation with source and destination on this image.
    ///
    /// The rectangles may overlap: rows are processed in the scan
    /// direction given by the sign of `dy - sy`, and each source row is
    /// staged through a scratch buffer, so previously written destination
    /// bits are never re-read as source.
    #[allow(clippy::too_many_arguments)]
    pub fn rasterop_self(
        &mut self,
        dx: i32,
        dy: i32,
        dw: i32,
        dh: i32,
        op: RopOp,
        sx: i32,
        sy: i32,
    ) -> Result<()> {
        if !op.requires_source() {
            return self.rasterop_uni(dx, dy, dw, dh, op);
        }

        let (w, h) = (self.width(), self.height());
        let Some(c) = clip_full(dx, dy, dw, dh, sx, sy, w, h, w, h) else {
            return Ok(());
        };

        let bits = self.depth().bits();
        let mut scratch = vec![0u32; self.wpl() as usize];

        let mut blit_row = |this: &mut Self, i: u32| {
            scratch.copy_from_slice(this.row_data(c.sy + i));
            let dbit = c.dx * bits;
            let sbit = c.sx * bits;
            let nbits = c.w * bits;
            combine_row(this.row_data_mut(c.dy + i), dbit, &scratch, sbit, nbits, op);
        };

        if c.dy <= c.sy {
            for i in 0..c.h {
                blit_row(self, i);
            }
        } else {
            for i in (0..c.h).rev() {
                blit_row(self, i);
            }
        }
        Ok(())
    }
}

impl Pix {
    /// Apply a whole-image raster operation with another image.
    ///
    /// # Errors
    ///
    /// Returns an error if the images differ in dimensions or depth.
    pub fn rop(&self, other: &Pix, op: RopOp) -> Result<Pix> {
        if op.requires_source()
            && (self.width() != other.width() || self.height() != other.height())
        {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (other.width(), other.height()),
            });
        }

        let mut result = self.to_mut();
        let (w, h) = (self.width() as i32, self.height() as i32);
        if op.requires_source() {
            result.rasterop(0, 0, w, h, op, other, 0, 0)?;
        } else {
            result.rasterop_uni(0, 0, w, h, op)?;
        }
        Ok(result.into())
    }

    /// Bitwise AND with another image of equal geometry.
    pub fn and(&self, other: &Pix) -> Result<Pix> {
        self.rop(other, RopOp::And)
    }

    /// Bitwise OR with another image of equal geometry.
    pub fn or(&self, other: &Pix) -> Result<Pix> {
        self.rop(other, RopOp::Or)
    }

    /// Bitwise XOR with another image of equal geometry.
    pub fn xor(&self, other: &Pix) -> Result<Pix> {
        self.rop(other, RopOp::Xor)
    }

    /// Invert all pixels.
    ///
    /// For binary images, foreground becomes background and vice versa.
    pub fn invert(&self) -> Pix {
        let mut result = self.to_mut();
        let (w, h) = (self.width() as i32, self.height() as i32);
        // full-frame NotDst cannot fail
        let _ = result.rasterop_uni(0, 0, w, h, RopOp::NotDst);
        result.into()
    }
}
