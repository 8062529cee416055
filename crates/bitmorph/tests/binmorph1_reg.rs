//! Binary morphology regression test 1
//!
//! Brick separability: for every operator, the separable two-pass brick
//! path must equal the generic one-pass path bit-for-bit, on a random
//! image, under both boundary conditions.
//!
//! Run with:
//! ```
//! cargo test -p bitmorph --test binmorph1_reg
//! ```

use bitmorph::{
    BoundaryCondition, Dest, Sel, SelElement, close, close_brick, dilate, dilate_brick, erode,
    erode_brick, open, open_brick,
};
use bitmorph_core::{Pix, PixelDepth};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

fn random_pix(w: u32, h: u32, fill: f64, seed: u64) -> Pix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
    for y in 0..h {
        for x in 0..w {
            if rng.random_bool(fill) {
                pm.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    pm.into()
}

fn centered_brick(h: u32, v: u32) -> Sel {
    Sel::create_brick(h, v, h / 2, v / 2, SelElement::Hit).unwrap()
}

const BRICKS: &[(u32, u32)] = &[(2, 2), (3, 3), (5, 7), (7, 5), (6, 4), (9, 3)];

#[test]
fn binmorph1_separability() {
    let pixs = random_pix(64, 64, 0.4, 42);
    let orig_count = pixs.count_pixels();
    eprintln!("image 64x64, {orig_count} foreground pixels");

    for bc in [BoundaryCondition::Asymmetric, BoundaryCondition::Symmetric] {
        for &(h, v) in BRICKS {
            let sel = centered_brick(h, v);

            let fast = dilate_brick(Dest::New, &pixs, h, v).unwrap();
            let generic = dilate(Dest::New, &pixs, &sel).unwrap();
            assert!(fast.equals(&generic), "dilate brick {h}x{v} {bc:?}");
            assert!(
                fast.count_pixels() >= orig_count,
                "dilation should not lose pixels"
            );

            let fast = erode_brick(Dest::New, &pixs, h, v, bc).unwrap();
            let generic = erode(Dest::New, &pixs, &sel, bc).unwrap();
            assert!(fast.equals(&generic), "erode brick {h}x{v} {bc:?}");
            assert!(
                fast.count_pixels() <= orig_count,
                "erosion should not add pixels"
            );

            let fast = open_brick(Dest::New, &pixs, h, v, bc).unwrap();
            let generic = open(Dest::New, &pixs, &sel, bc).unwrap();
            assert!(fast.equals(&generic), "open brick {h}x{v} {bc:?}");

            let fast = close_brick(Dest::New, &pixs, h, v, bc).unwrap();
            let generic = close(Dest::New, &pixs, &sel, bc).unwrap();
            assert!(fast.equals(&generic), "close brick {h}x{v} {bc:?}");
        }
    }
}

#[test]
fn binmorph1_buffer_modes_agree() {
    // the returned bitmap, a caller-supplied buffer and a buffer aliasing
    // the source must all end up identical
    let pixs = random_pix(50, 41, 0.3, 7);
    let sel = centered_brick(5, 3);
    let bc = BoundaryCondition::Asymmetric;

    fn dilate_bc(
        dst: Dest<'_>,
        pixs: &Pix,
        sel: &Sel,
        _bc: BoundaryCondition,
    ) -> bitmorph::MorphResult<Pix> {
        dilate(dst, pixs, sel)
    }

    type OpFn = fn(Dest<'_>, &Pix, &Sel, BoundaryCondition) -> bitmorph::MorphResult<Pix>;
    let named_ops: &[(&str, OpFn)] = &[
        ("dilate", dilate_bc),
        ("erode", erode),
        ("open", open),
        ("close", close),
        ("close_safe", bitmorph::close_safe),
    ];

    for (name, op) in named_ops {
        let fresh = op(Dest::New, &pixs, &sel, bc).unwrap();

        let mut buf = pixs.template();
        op(Dest::Buffer(&mut buf), &pixs, &sel, bc).unwrap();
        assert!(buf.equals(&fresh), "{name}: buffer mode differs");

        let mut aliased = pixs.clone();
        op(Dest::Buffer(&mut aliased), &pixs, &sel, bc).unwrap();
        assert!(aliased.equals(&fresh), "{name}: in-place mode differs");
    }
}
