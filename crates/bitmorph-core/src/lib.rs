//! bitmorph-core - packed bitmap container and rasterop engine
//!
//! This crate provides the two primitives everything else in the workspace
//! is built from:
//!
//! - [`Pix`]: a packed, word-aligned raster image with cheap shared handles
//!   and explicit deep copies
//! - the rasterop engine: boolean bit-blits of arbitrary rectangles at
//!   arbitrary sub-word alignment, including the overlapping in-place case
//!
//! Border padding, whole-image boolean combines and content comparison are
//! layered on top of the rasterop.
//!
//! # Example
//!
//! ```
//! use bitmorph_core::{Pix, PixelDepth, RopOp};
//!
//! let src = Pix::new(64, 64, PixelDepth::Bit1).unwrap();
//! let mut dst = Pix::new(64, 64, PixelDepth::Bit1).unwrap().to_mut();
//! dst.rasterop(10, 10, 40, 40, RopOp::Or, &src, 0, 0).unwrap();
//! ```

mod error;
mod pix;

pub use error::{Error, Result};
pub use pix::{Pix, PixMut, PixelDepth, RopOp};
