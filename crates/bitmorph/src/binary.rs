//! Binary morphological operations
//!
//! Implements dilation, erosion, the hit-miss transform, opening, closing
//! and their safe/generalized variants for 1-bpp images.
//!
//! Each operator reduces to a sequence of translated rasterops: one blit
//! per non-DONT_CARE cell of the SEL, accumulated into the destination
//! with OR (dilation) or AND (erosion and the HMT). SEL cells are walked
//! in row-major order; the accumulation is order-independent, the fixed
//! order just keeps runs reproducible.

use crate::{BoundaryCondition, MorphError, MorphResult, Sel, SelElement};
use bitmorph_core::{Pix, PixMut, PixelDepth, RopOp};

/// Where an operator writes its result.
///
/// Every operator returns the result bitmap; `Dest` controls what else
/// happens to it:
///
/// - `New`: nothing - the caller owns the returned bitmap.
/// - `Buffer(b)`: the result is also stored into `*b`, which must have the
///   source's geometry. `b` may share the source's buffer (the in-place
///   arrangement): operators accumulate into a fresh bitmap and publish it
///   by assignment, so source reads are never corrupted by destination
///   writes, and on error the buffer is left bit-for-bit untouched.
#[derive(Debug)]
pub enum Dest<'a> {
    /// Return a freshly allocated result
    New,
    /// Also store the result into an existing bitmap of equal geometry
    Buffer(&'a mut Pix),
}

impl Dest<'_> {
    /// Enforce the geometry contract for a caller-supplied buffer.
    pub(crate) fn validate(&self, pixs: &Pix) -> MorphResult<()> {
        if let Dest::Buffer(b) = self
            && !b.sizes_equal(pixs)
        {
            return Err(MorphError::SizeMismatch {
                src: (pixs.width(), pixs.height()),
                dst: (b.width(), b.height()),
            });
        }
        Ok(())
    }

    /// Publish the finished result.
    pub(crate) fn commit(self, result: Pix) -> Pix {
        match self {
            Dest::New => result,
            Dest::Buffer(b) => {
                *b = result.clone();
                result
            }
        }
    }
}

/// Check that the image is binary (1-bpp)
pub(crate) fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1-bpp binary",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Clear the four edge strips a SEL's reach makes untrustworthy.
fn clear_edge_strips(pixd: &mut PixMut, sel: &Sel) -> MorphResult<()> {
    let (xp, yp, xn, yn) = sel.max_translations();
    let (xp, yp, xn, yn) = (xp as i32, yp as i32, xn as i32, yn as i32);
    let w = pixd.width() as i32;
    let h = pixd.height() as i32;

    if xp > 0 {
        pixd.rasterop_uni(0, 0, xp, h, RopOp::Clear)?;
    }
    if xn > 0 {
        pixd.rasterop_uni(w - xn, 0, xn, h, RopOp::Clear)?;
    }
    if yp > 0 {
        pixd.rasterop_uni(0, 0, w, yp, RopOp::Clear)?;
    }
    if yn > 0 {
        pixd.rasterop_uni(0, h - yn, w, yn, RopOp::Clear)?;
    }
    Ok(())
}

/// Dilate a binary image.
///
/// The result is ON at a pixel iff the source is ON under some HIT cell of
/// the SEL placed at that pixel. Foreground regions grow; off-image pixels
/// count as OFF under both boundary conditions, so translations clip
/// naturally and no edge handling is needed.
pub fn dilate(dst: Dest<'_>, pixs: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pixs)?;
    dst.validate(pixs)?;

    let w = pixs.width() as i32;
    let h = pixs.height() as i32;
    let cx = sel.origin_x() as i32;
    let cy = sel.origin_y() as i32;

    let mut pixd = pixs.template().try_into_mut().unwrap();
    pixd.clear();
    for (x, y, elem) in sel.cells() {
        if elem != SelElement::Hit {
            continue;
        }
        pixd.rasterop(x as i32 - cx, y as i32 - cy, w, h, RopOp::Or, pixs, 0, 0)?;
    }
    Ok(dst.commit(pixd.into()))
}

/// Erode a binary image.
///
/// The result is ON at a pixel iff the source is ON under every HIT cell
/// of the SEL placed at that pixel. Translation signs are reversed
/// relative to dilation. Under the asymmetric boundary condition the edge
/// strips within the SEL's reach are cleared afterwards; under the
/// symmetric condition the AND accumulation already treats off-image
/// pixels as ON and nothing is cleared.
pub fn erode(dst: Dest<'_>, pixs: &Pix, sel: &Sel, bc: BoundaryCondition) -> MorphResult<Pix> {
    check_binary(pixs)?;
    dst.validate(pixs)?;

    let w = pixs.width() as i32;
    let h = pixs.height() as i32;
    let cx = sel.origin_x() as i32;
    let cy = sel.origin_y() as i32;

    let mut pixd = pixs.template().try_into_mut().unwrap();
    pixd.set_all();
    for (x, y, elem) in sel.cells() {
        if elem != SelElement::Hit {
            continue;
        }
        pixd.rasterop(cx - x as i32, cy - y as i32, w, h, RopOp::And, pixs, 0, 0)?;
    }

    if bc == BoundaryCondition::Asymmetric {
        clear_edge_strips(&mut pixd, sel)?;
    }
    Ok(dst.commit(pixd.into()))
}

/// Hit-miss transform.
///
/// The result is ON at a pixel iff the source is ON under every HIT cell
/// AND OFF under every MISS cell. Both polarities must be definite, so the
/// edge strips within the SEL's reach are always cleared, whatever the
/// boundary condition.
pub fn hit_miss_transform(dst: Dest<'_>, pixs: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pixs)?;
    dst.validate(pixs)?;

    let w = pixs.width() as i32;
    let h = pixs.height() as i32;
    let cx = sel.origin_x() as i32;
    let cy = sel.origin_y() as i32;

    let mut pixd = pixs.template().try_into_mut().unwrap();
    let mut first = true;
    for (x, y, elem) in sel.cells() {
        let (dx, dy) = (cx - x as i32, cy - y as i32);
        match elem {
            SelElement::DontCare => {}
            SelElement::Hit => {
                if first {
                    pixd.clear();
                    pixd.rasterop(dx, dy, w, h, RopOp::Src, pixs, 0, 0)?;
                    first = false;
                } else {
                    pixd.rasterop(dx, dy, w, h, RopOp::And, pixs, 0, 0)?;
                }
            }
            SelElement::Miss => {
                if first {
                    pixd.set_all();
                    pixd.rasterop(dx, dy, w, h, RopOp::NotSrc, pixs, 0, 0)?;
                    first = false;
                } else {
                    pixd.rasterop(dx, dy, w, h, RopOp::AndNotSrc, pixs, 0, 0)?;
                }
            }
        }
    }

    clear_edge_strips(&mut pixd, sel)?;
    Ok(dst.commit(pixd.into()))
}

/// Open a binary image: erosion followed by dilation.
///
/// Removes foreground features the SEL's hits do not fit into. Idempotent.
pub fn open(dst: Dest<'_>, pixs: &Pix, sel: &Sel, bc: BoundaryCondition) -> MorphResult<Pix> {
    check_binary(pixs)?;
    dst.validate(pixs)?;

    let pixt = erode(Dest::New, pixs, sel, bc)?;
    let pixd = dilate(Dest::New, &pixt, sel)?;
    Ok(dst.commit(pixd))
}

/// Close a binary image: dilation followed by erosion.
///
/// Fills background features the SEL's hits do not fit into. Idempotent
/// under the symmetric boundary condition; near the edges under the
/// asymmetric condition it can lose foreground - see [`close_safe`].
pub fn close(dst: Dest<'_>, pixs: &Pix, sel: &Sel, bc: BoundaryCondition) -> MorphResult<Pix> {
    check_binary(pixs)?;
    dst.validate(pixs)?;

    let pixt = dilate(Dest::New, pixs, sel)?;
    let pixd = erode(Dest::New, &pixt, sel, bc)?;
    Ok(dst.commit(pixd))
}

/// Close a binary image without losing foreground near the edges.
///
/// Under the symmetric boundary condition this is plain [`close`]. Under
/// the asymmetric condition the source is padded with OFF pixels - by a
/// whole number of 32-pixel words on the left and right, so the padded
/// rows stay word-aligned, and by the SEL's exact vertical reach on the
/// top and bottom - closed, and cropped back.
///
/// A size-mismatched [`Dest::Buffer`] is reported as a warning rather
/// than an error, and the buffer receives the (source-sized) result.
pub fn close_safe(dst: Dest<'_>, pixs: &Pix, sel: &Sel, bc: BoundaryCondition) -> MorphResult<Pix> {
    if bc == BoundaryCondition::Symmetric {
        return close(dst, pixs, sel, bc);
    }
    check_binary(pixs)?;
    if let Dest::Buffer(b) = &dst
        && !b.sizes_equal(pixs)
    {
        log::warn!(
            "close_safe: destination size {}x{} differs from source {}x{}; result is source-sized",
            b.width(),
            b.height(),
            pixs.width(),
            pixs.height()
        );
    }

    let (xp, yp, xn, yn) = sel.max_translations();
    let xbord = 32 * xp.max(xn).div_ceil(32);

    let pixsb = pixs.add_border_general(xbord, xbord, yp, yn, 0)?;
    let pixdb = close(Dest::New, &pixsb, sel, bc)?;
    let pixd = pixdb.remove_border_general(xbord, xbord, yp, yn)?;
    Ok(dst.commit(pixd))
}

/// Generalized opening: hit-miss transform followed by dilation with the
/// SEL's hits. Idempotent.
pub fn open_generalized(dst: Dest<'_>, pixs: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pixs)?;
    dst.validate(pixs)?;

    let pixt = hit_miss_transform(Dest::New, pixs, sel)?;
    let pixd = dilate(Dest::New, &pixt, sel)?;
    Ok(dst.commit(pixd))
}

/// Generalized closing: dilation with the SEL's hits followed by the
/// hit-miss transform. Dual of [`open_generalized`]; idempotent.
pub fn close_generalized(dst: Dest<'_>, pixs: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pixs)?;
    dst.validate(pixs)?;

    let pixt = dilate(Dest::New, pixs, sel)?;
    let pixd = hit_miss_transform(Dest::New, &pixt, sel)?;
    Ok(dst.commit(pixd))
}
