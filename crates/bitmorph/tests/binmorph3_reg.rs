//! Binary morphology regression test 3
//!
//! Safe closing against a manually padded reference, and hit-miss
//! containment in erosion, on random images.

use bitmorph::{
    BoundaryCondition, Dest, Sel, SelElement, close, close_safe, erode, hit_miss_transform,
};
use bitmorph_core::{Pix, PixelDepth};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const ASYM: BoundaryCondition = BoundaryCondition::Asymmetric;

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

fn is_subset(a: &Pix, b: &Pix) -> bool {
    a.and(b).unwrap().equals(a)
}

#[test]
fn binmorph3_close_safe_border_round_trip() {
    // close_safe must equal: pad with OFF by any border at least the
    // SEL's reach, close, crop back
    let pixs = random_pix(45, 38, 0.5, 101);
    for &(h, v) in &[(3u32, 3u32), (5, 7), (7, 2)] {
        let sel = Sel::create_brick(h, v, h / 2, v / 2, SelElement::Hit).unwrap();

        let safe = close_safe(Dest::New, &pixs, &sel, ASYM).unwrap();

        let bordsize = 32;
        let padded = pixs.add_border(bordsize, 0).unwrap();
        let closed = close(Dest::New, &padded, &sel, ASYM).unwrap();
        let reference = closed.remove_border(bordsize).unwrap();

        assert!(safe.equals(&reference), "brick {h}x{v}");
    }
}

#[test]
fn binmorph3_close_safe_is_extensive_at_corners() {
    // seed the four corners explicitly; the safe closing must keep them
    let mut pm = random_pix(40, 33, 0.2, 113).to_mut();
    for (x, y) in [(0, 0), (39, 0), (0, 32), (39, 32)] {
        pm.set_pixel_unchecked(x, y, 1);
    }
    let pixs: Pix = pm.into();

    let sel = Sel::create_brick(5, 5, 2, 2, SelElement::Hit).unwrap();
    let safe = close_safe(Dest::New, &pixs, &sel, ASYM).unwrap();
    assert!(is_subset(&pixs, &safe));
    for (x, y) in [(0, 0), (39, 0), (0, 32), (39, 32)] {
        assert_eq!(safe.get_pixel(x, y), Some(1), "corner ({x}, {y}) lost");
    }
}

#[test]
fn binmorph3_hmt_within_erosion() {
    // the hit-miss transform adds constraints to an erosion by the same
    // hits, so its result can only be smaller
    let pixs = random_pix(66, 49, 0.55, 127);
    let sel = Sel::from_string(
        ".x.\n\
         xxo\n\
         .o.",
        1,
        1,
    )
    .unwrap();

    let hits_only = {
        let mut s = Sel::new(sel.width(), sel.height(), sel.origin_x(), sel.origin_y()).unwrap();
        for (x, y, elem) in sel.cells() {
            if elem == SelElement::Hit {
                s.set_element(x, y, SelElement::Hit);
            }
        }
        s
    };

    let hmt = hit_miss_transform(Dest::New, &pixs, &sel).unwrap();
    let eroded = erode(Dest::New, &pixs, &hits_only, ASYM).unwrap();
    assert!(is_subset(&hmt, &eroded));
}
