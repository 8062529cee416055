//! bitmorph - binary morphological operators
//!
//! This crate applies the classical mathematical-morphology operators to
//! 1-bpp images:
//!
//! - Structuring elements ([`Sel`]) with per-cell HIT / MISS / DONT_CARE
//!   roles and an origin
//! - Dilation, erosion and the hit-miss transform, reduced to sequences of
//!   translated rasterops
//! - Opening, closing, safe closing and the generalized opening/closing
//! - A separable fast path for rectangular ("brick") structuring elements
//! - Explicit asymmetric/symmetric boundary-condition handling
//!
//! # Example
//!
//! ```
//! use bitmorph::{BoundaryCondition, Dest, Sel, SelElement, dilate, erode};
//! use bitmorph_core::{Pix, PixelDepth};
//!
//! let pix = Pix::new(64, 64, PixelDepth::Bit1).unwrap();
//! let sel = Sel::create_brick(3, 3, 1, 1, SelElement::Hit).unwrap();
//!
//! let grown = dilate(Dest::New, &pix, &sel).unwrap();
//! let shrunk = erode(Dest::New, &grown, &sel, BoundaryCondition::Asymmetric).unwrap();
//! ```

pub mod binary;
mod boundary;
pub mod brick;
mod error;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use sel::{Sel, SelElement};

pub use binary::{
    Dest, close, close_generalized, close_safe, dilate, erode, hit_miss_transform, open,
    open_generalized,
};

pub use boundary::{BoundaryCondition, MorphOpType, border_pixel_color};

pub use brick::{close_brick, close_safe_brick, dilate_brick, erode_brick, open_brick};
