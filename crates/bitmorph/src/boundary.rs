//! Boundary-condition handling
//!
//! Pixels outside the image rectangle have no stored value, so every
//! operator must decide what they count as. Two conventions are supported;
//! the choice is passed explicitly to the operators that consult it rather
//! than held in process-wide state, so independent callers can use
//! different policies.

use crate::MorphResult;
use bitmorph_core::PixelDepth;

/// How off-image pixels are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryCondition {
    /// Off-image pixels are OFF for both dilation and erosion. Erosion is
    /// then not anti-extensive near the edges on its own, so it clears a
    /// strip along each edge as wide as the SEL's reach in that direction.
    #[default]
    Asymmetric,
    /// Off-image pixels are OFF for dilation and ON for erosion. This
    /// keeps erosion and dilation strict duals, and no edge clearing is
    /// applied.
    Symmetric,
}

/// Operation selector for [`border_pixel_color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MorphOpType {
    /// Dilation
    Dilate,
    /// Erosion
    Erode,
}

/// The pixel value a hypothetical border takes for the given operation,
/// depth and boundary condition.
///
/// Dilation borders are always 0. Erosion borders are 0 under
/// [`BoundaryCondition::Asymmetric`] and all-ones under
/// [`BoundaryCondition::Symmetric`] - except at 32 bpp, where the low byte
/// of a pixel is the alpha channel by the container's convention and is
/// kept at zero, giving `0xffffff00`.
///
/// # Errors
///
/// Returns `Error::InvalidDepth` for a depth other than 1, 2, 4, 8, 16
/// or 32.
pub fn border_pixel_color(
    op: MorphOpType,
    depth: u32,
    bc: BoundaryCondition,
) -> MorphResult<u32> {
    let depth = PixelDepth::from_bits(depth)?;
    if op == MorphOpType::Dilate || bc == BoundaryCondition::Asymmetric {
        return Ok(0);
    }
    Ok(match depth {
        PixelDepth::Bit1 => 1,
        PixelDepth::Bit2 => 3,
        PixelDepth::Bit4 => 0xF,
        PixelDepth::Bit8 => 0xFF,
        PixelDepth::Bit16 => 0xFFFF,
        PixelDepth::Bit32 => 0xFFFF_FF00,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dilation_border_is_always_off() {
        for bc in [BoundaryCondition::Asymmetric, BoundaryCondition::Symmetric] {
            for depth in [1, 2, 4, 8, 16, 32] {
                assert_eq!(border_pixel_color(MorphOpType::Dilate, depth, bc).unwrap(), 0);
            }
        }
    }

    #[test]
    fn test_erosion_border_asymmetric_is_off() {
        for depth in [1, 8, 32] {
            assert_eq!(
                border_pixel_color(MorphOpType::Erode, depth, BoundaryCondition::Asymmetric)
                    .unwrap(),
                0
            );
        }
    }

    #[test]
    fn test_erosion_border_symmetric_is_on() {
        let bc = BoundaryCondition::Symmetric;
        assert_eq!(border_pixel_color(MorphOpType::Erode, 1, bc).unwrap(), 1);
        assert_eq!(border_pixel_color(MorphOpType::Erode, 2, bc).unwrap(), 3);
        assert_eq!(border_pixel_color(MorphOpType::Erode, 4, bc).unwrap(), 0xF);
        assert_eq!(border_pixel_color(MorphOpType::Erode, 8, bc).unwrap(), 0xFF);
        assert_eq!(border_pixel_color(MorphOpType::Erode, 16, bc).unwrap(), 0xFFFF);
        // 32 bpp keeps the alpha byte clear
        assert_eq!(
            border_pixel_color(MorphOpType::Erode, 32, bc).unwrap(),
            0xFFFF_FF00
        );
    }

    #[test]
    fn test_invalid_depth() {
        assert!(border_pixel_color(MorphOpType::Erode, 0, BoundaryCondition::Symmetric).is_err());
        assert!(border_pixel_color(MorphOpType::Erode, 3, BoundaryCondition::Symmetric).is_err());
        assert!(border_pixel_color(MorphOpType::Dilate, 64, BoundaryCondition::Asymmetric).is_err());
    }

    #[test]
    fn test_default_is_asymmetric() {
        assert_eq!(BoundaryCondition::default(), BoundaryCondition::Asymmetric);
    }
}
