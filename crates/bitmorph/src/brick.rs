//! Brick (separable) fast path
//!
//! A brick is a solid rectangle of hits. Dilation and erosion by an
//! hsize x vsize brick factor into a 1 x hsize pass followed by a
//! vsize x 1 pass, turning O(hsize * vsize) rasterops into
//! O(hsize + vsize). The line SEL origins ([`Sel::create_horizontal`] and
//! [`Sel::create_vertical`]) are chosen so the two-pass result is
//! bit-for-bit the one-pass result.

use crate::binary::{self, Dest, check_binary};
use crate::{BoundaryCondition, MorphError, MorphResult, Sel, SelElement};
use bitmorph_core::Pix;

fn check_brick_size(hsize: u32, vsize: u32) -> MorphResult<()> {
    if hsize == 0 || vsize == 0 {
        return Err(MorphError::InvalidParameters(format!(
            "brick size {hsize}x{vsize}; both dimensions must be >= 1"
        )));
    }
    Ok(())
}

fn centered_brick(hsize: u32, vsize: u32) -> MorphResult<Sel> {
    Sel::create_brick(hsize, vsize, hsize / 2, vsize / 2, SelElement::Hit)
}

/// Dilate with a brick structuring element.
///
/// Separable: a 1 x hsize pass then a vsize x 1 pass when both dimensions
/// exceed 1; a single generic pass when only one does; a plain copy for
/// the 1 x 1 brick.
pub fn dilate_brick(dst: Dest<'_>, pixs: &Pix, hsize: u32, vsize: u32) -> MorphResult<Pix> {
    check_binary(pixs)?;
    check_brick_size(hsize, vsize)?;

    if hsize == 1 && vsize == 1 {
        dst.validate(pixs)?;
        return Ok(dst.commit(pixs.deep_clone()));
    }
    if hsize == 1 || vsize == 1 {
        let sel = centered_brick(hsize, vsize)?;
        return binary::dilate(dst, pixs, &sel);
    }

    dst.validate(pixs)?;
    let selh = Sel::create_horizontal(hsize)?;
    let selv = Sel::create_vertical(vsize)?;
    let pixt = binary::dilate(Dest::New, pixs, &selh)?;
    let pixd = binary::dilate(Dest::New, &pixt, &selv)?;
    Ok(dst.commit(pixd))
}

/// Erode with a brick structuring element.
///
/// The asymmetric edge clearing distributes over the two passes: the
/// horizontal pass clears the left/right strips, the vertical pass the
/// top/bottom strips, which together equal the one-pass clearing.
pub fn erode_brick(
    dst: Dest<'_>,
    pixs: &Pix,
    hsize: u32,
    vsize: u32,
    bc: BoundaryCondition,
) -> MorphResult<Pix> {
    check_binary(pixs)?;
    check_brick_size(hsize, vsize)?;

    if hsize == 1 && vsize == 1 {
        dst.validate(pixs)?;
        return Ok(dst.commit(pixs.deep_clone()));
    }
    if hsize == 1 || vsize == 1 {
        let sel = centered_brick(hsize, vsize)?;
        return binary::erode(dst, pixs, &sel, bc);
    }

    dst.validate(pixs)?;
    let selh = Sel::create_horizontal(hsize)?;
    let selv = Sel::create_vertical(vsize)?;
    let pixt = binary::erode(Dest::New, pixs, &selh, bc)?;
    let pixd = binary::erode(Dest::New, &pixt, &selv, bc)?;
    Ok(dst.commit(pixd))
}

/// Open with a brick structuring element.
///
/// Expands to four separable passes: erode horizontally and vertically,
/// then dilate horizontally and vertically.
pub fn open_brick(
    dst: Dest<'_>,
    pixs: &Pix,
    hsize: u32,
    vsize: u32,
    bc: BoundaryCondition,
) -> MorphResult<Pix> {
    check_binary(pixs)?;
    check_brick_size(hsize, vsize)?;

    if hsize == 1 && vsize == 1 {
        dst.validate(pixs)?;
        return Ok(dst.commit(pixs.deep_clone()));
    }
    if hsize == 1 || vsize == 1 {
        let sel = centered_brick(hsize, vsize)?;
        return binary::open(dst, pixs, &sel, bc);
    }

    dst.validate(pixs)?;
    let selh = Sel::create_horizontal(hsize)?;
    let selv = Sel::create_vertical(vsize)?;
    let step1 = binary::erode(Dest::New, pixs, &selh, bc)?;
    let step2 = binary::erode(Dest::New, &step1, &selv, bc)?;
    let step3 = binary::dilate(Dest::New, &step2, &selh)?;
    let pixd = binary::dilate(Dest::New, &step3, &selv)?;
    Ok(dst.commit(pixd))
}

/// Close with a brick structuring element.
///
/// Expands to four separable passes: dilate horizontally and vertically,
/// then erode horizontally and vertically.
pub fn close_brick(
    dst: Dest<'_>,
    pixs: &Pix,
    hsize: u32,
    vsize: u32,
    bc: BoundaryCondition,
) -> MorphResult<Pix> {
    check_binary(pixs)?;
    check_brick_size(hsize, vsize)?;

    if hsize == 1 && vsize == 1 {
        dst.validate(pixs)?;
        return Ok(dst.commit(pixs.deep_clone()));
    }
    if hsize == 1 || vsize == 1 {
        let sel = centered_brick(hsize, vsize)?;
        return binary::close(dst, pixs, &sel, bc);
    }

    dst.validate(pixs)?;
    let selh = Sel::create_horizontal(hsize)?;
    let selv = Sel::create_vertical(vsize)?;
    let step1 = binary::dilate(Dest::New, pixs, &selh)?;
    let step2 = binary::dilate(Dest::New, &step1, &selv)?;
    let step3 = binary::erode(Dest::New, &step2, &selh, bc)?;
    let pixd = binary::erode(Dest::New, &step3, &selv, bc)?;
    Ok(dst.commit(pixd))
}

/// Close with a brick structuring element, safe against edge loss.
///
/// Under the symmetric boundary condition this is [`close_brick`]. Under
/// the asymmetric condition the source is padded on all four sides by a
/// whole number of 32-pixel words covering the brick's half-extent, the
/// closing pipeline runs on the padded bitmap, and the border is stripped.
pub fn close_safe_brick(
    dst: Dest<'_>,
    pixs: &Pix,
    hsize: u32,
    vsize: u32,
    bc: BoundaryCondition,
) -> MorphResult<Pix> {
    if bc == BoundaryCondition::Symmetric {
        return close_brick(dst, pixs, hsize, vsize, bc);
    }
    check_binary(pixs)?;
    check_brick_size(hsize, vsize)?;

    if hsize == 1 && vsize == 1 {
        dst.validate(pixs)?;
        return Ok(dst.commit(pixs.deep_clone()));
    }
    if let Dest::Buffer(b) = &dst
        && !b.sizes_equal(pixs)
    {
        log::warn!(
            "close_safe_brick: destination size {}x{} differs from source {}x{}; result is source-sized",
            b.width(),
            b.height(),
            pixs.width(),
            pixs.height()
        );
    }

    let maxtrans = (hsize / 2).max(vsize / 2);
    let bordsize = 32 * maxtrans.div_ceil(32);
    let pixsb = pixs.add_border(bordsize, 0)?;

    let pixdb = if hsize == 1 || vsize == 1 {
        let sel = centered_brick(hsize, vsize)?;
        binary::close(Dest::New, &pixsb, &sel, bc)?
    } else {
        let selh = Sel::create_horizontal(hsize)?;
        let selv = Sel::create_vertical(vsize)?;
        let step1 = binary::dilate(Dest::New, &pixsb, &selh)?;
        let step2 = binary::dilate(Dest::New, &step1, &selv)?;
        let step3 = binary::erode(Dest::New, &step2, &selh, bc)?;
        binary::erode(Dest::New, &step3, &selv, bc)?
    };

    let pixd = pixdb.remove_border(bordsize)?;
    Ok(dst.commit(pixd))
}
