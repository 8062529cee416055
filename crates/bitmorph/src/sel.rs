//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. The origin (cx, cy) is the cell that anchors the SEL at a
//! pixel location.

use crate::{MorphError, MorphResult};

/// Element type in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[derive(Default)]
pub enum SelElement {
    /// Don't care - this position is ignored
    #[default]
    DontCare = 0,
    /// Hit - must match foreground (set pixels)
    Hit = 1,
    /// Miss - must match background (unset pixels)
    Miss = 2,
}

/// Structuring Element (SEL)
///
/// Operators borrow SELs immutably, so a SEL cannot change while an
/// operation that references it is running.
#[derive(Debug, Clone)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<SelElement>,
    name: Option<String>,
}

impl Sel {
    /// Create a new structuring element with every cell DONT_CARE.
    ///
    /// # Errors
    ///
    /// Returns `MorphError::InvalidSel` if a dimension is zero or the
    /// origin lies outside the grid.
    pub fn new(width: u32, height: u32, cx: u32, cy: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "empty sel: {width}x{height}"
            )));
        }
        if cx >= width || cy >= height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({cx}, {cy}) outside {width}x{height} sel"
            )));
        }
        Ok(Sel {
            width,
            height,
            cx,
            cy,
            data: vec![SelElement::DontCare; (width * height) as usize],
            name: None,
        })
    }

    /// Create a rectangular "brick" structuring element with every cell set
    /// to `fill` and the given origin.
    pub fn create_brick(
        width: u32,
        height: u32,
        cx: u32,
        cy: u32,
        fill: SelElement,
    ) -> MorphResult<Self> {
        let mut sel = Sel::new(width, height, cx, cy)?;
        sel.data.fill(fill);
        Ok(sel)
    }

    /// Create a horizontal line of hits: 1 x `length`, origin (length/2, 0).
    pub fn create_horizontal(length: u32) -> MorphResult<Self> {
        Sel::create_brick(length, 1, length / 2, 0, SelElement::Hit)
    }

    /// Create a vertical line of hits: `length` x 1, origin (0, length/2).
    pub fn create_vertical(length: u32) -> MorphResult<Self> {
        Sel::create_brick(1, length, 0, length / 2, SelElement::Hit)
    }

    /// Create a structuring element from a string pattern.
    ///
    /// Rows are separated by newlines; every row must have the same
    /// length. Characters: 'x' for hit, 'o' for miss, '.' for don't care.
    ///
    /// # Examples
    ///
    /// ```
    /// use bitmorph::Sel;
    ///
    /// // isolated-pixel detector
    /// let sel = Sel::from_string(
    ///     "ooo\n\
    ///      oxo\n\
    ///      ooo",
    ///     1,
    ///     1,
    /// )
    /// .unwrap();
    /// assert_eq!(sel.hit_count(), 1);
    /// assert_eq!(sel.miss_count(), 8);
    /// ```
    pub fn from_string(pattern: &str, cx: u32, cy: u32) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern.lines().map(str::trim).collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;

        let mut sel = Sel::new(width, height, cx, cy)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(MorphError::InvalidSel(format!(
                    "ragged pattern: row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let elem = match ch {
                    'x' => SelElement::Hit,
                    'o' => SelElement::Miss,
                    '.' => SelElement::DontCare,
                    _ => {
                        return Err(MorphError::InvalidSel(format!(
                            "unrecognized pattern character '{ch}'"
                        )));
                    }
                };
                sel.set_element(x as u32, y as u32, elem);
            }
        }
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({cx}, {cy}) outside {}x{} sel",
                self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Get an element at (x, y), or None if out of bounds
    #[inline]
    pub fn get_element(&self, x: u32, y: u32) -> Option<SelElement> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[(y * self.width + x) as usize])
    }

    /// Set an element at (x, y)
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_element(&mut self, x: u32, y: u32, elem: SelElement) {
        assert!(x < self.width && y < self.height);
        self.data[(y * self.width + x) as usize] = elem;
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Hit).count()
    }

    /// Count the number of miss elements
    pub fn miss_count(&self) -> usize {
        self.data.iter().filter(|&&e| e == SelElement::Miss).count()
    }

    /// Iterate over cells in row-major order as (x, y, element)
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, SelElement)> + '_ {
        let width = self.width;
        self.data.iter().enumerate().map(move |(idx, &elem)| {
            let idx = idx as u32;
            (idx % width, idx / width, elem)
        })
    }

    /// Maximal translations (xp, yp, xn, yn) of the hit cells.
    ///
    /// These are the maxima, over all HIT cells (x, y), of (cx - x),
    /// (cy - y), (x - cx) and (y - cy), each clamped at 0: how far the
    /// hits extend left, up, right and down of the origin. Erosion and the
    /// hit-miss transform clear edge strips of these widths, and the safe
    /// closing pads by them.
    pub fn max_translations(&self) -> (u32, u32, u32, u32) {
        let (cx, cy) = (self.cx as i64, self.cy as i64);
        let (mut xp, mut yp, mut xn, mut yn) = (0i64, 0i64, 0i64, 0i64);
        for (x, y, elem) in self.cells() {
            if elem != SelElement::Hit {
                continue;
            }
            xp = xp.max(cx - x as i64);
            yp = yp.max(cy - y as i64);
            xn = xn.max(x as i64 - cx);
            yn = yn.max(y as i64 - cy);
        }
        (xp as u32, yp as u32, xn as u32, yn as u32)
    }

    /// Create the reflected (180-degree rotated) SEL.
    ///
    /// The origin moves with the grid, so reflecting twice is the
    /// identity.
    pub fn reflect(&self) -> Self {
        let mut data = self.data.clone();
        data.reverse();
        Sel {
            width: self.width,
            height: self.height,
            cx: self.width - 1 - self.cx,
            cy: self.height - 1 - self.cy,
            data,
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sel_rejected() {
        assert!(Sel::new(0, 3, 0, 0).is_err());
        assert!(Sel::new(3, 0, 0, 0).is_err());
        assert!(Sel::create_brick(0, 1, 0, 0, SelElement::Hit).is_err());
    }

    #[test]
    fn test_origin_validation() {
        assert!(Sel::new(3, 3, 3, 0).is_err());
        assert!(Sel::new(3, 3, 0, 3).is_err());
        let mut sel = Sel::new(3, 3, 1, 1).unwrap();
        assert!(sel.set_origin(2, 2).is_ok());
        assert!(sel.set_origin(3, 0).is_err());
    }

    #[test]
    fn test_create_brick() {
        let mut sel = Sel::create_brick(5, 3, 2, 1, SelElement::Hit).unwrap();
        assert_eq!(sel.width(), 5);
        assert_eq!(sel.height(), 3);
        assert_eq!(sel.origin_x(), 2);
        assert_eq!(sel.origin_y(), 1);
        assert_eq!(sel.hit_count(), 15);
        assert_eq!(sel.miss_count(), 0);

        assert_eq!(sel.name(), None);
        sel.set_name("sel_5h3");
        assert_eq!(sel.name(), Some("sel_5h3"));
    }

    #[test]
    fn test_line_sels() {
        let selh = Sel::create_horizontal(7).unwrap();
        assert_eq!((selh.width(), selh.height()), (7, 1));
        assert_eq!((selh.origin_x(), selh.origin_y()), (3, 0));

        let selv = Sel::create_vertical(4).unwrap();
        assert_eq!((selv.width(), selv.height()), (1, 4));
        assert_eq!((selv.origin_x(), selv.origin_y()), (0, 2));
    }

    #[test]
    fn test_from_string() {
        let sel = Sel::from_string(
            "x.o\n\
             .x.",
            1,
            0,
        )
        .unwrap();
        assert_eq!(sel.get_element(0, 0), Some(SelElement::Hit));
        assert_eq!(sel.get_element(1, 0), Some(SelElement::DontCare));
        assert_eq!(sel.get_element(2, 0), Some(SelElement::Miss));
        assert_eq!(sel.get_element(1, 1), Some(SelElement::Hit));
        assert_eq!(sel.get_element(3, 0), None);

        assert!(Sel::from_string("xx\nx", 0, 0).is_err());
        assert!(Sel::from_string("xq", 0, 0).is_err());
    }

    #[test]
    fn test_max_translations() {
        // brick 5x3 with origin (2, 1): hits extend 2 left/right, 1 up/down
        let sel = Sel::create_brick(5, 3, 2, 1, SelElement::Hit).unwrap();
        assert_eq!(sel.max_translations(), (2, 1, 2, 1));

        // corner origin
        let sel = Sel::create_brick(4, 4, 0, 0, SelElement::Hit).unwrap();
        assert_eq!(sel.max_translations(), (0, 0, 3, 3));

        // misses do not count
        let sel = Sel::from_string(
            "o.x\n\
             oo.",
            2,
            0,
        )
        .unwrap();
        assert_eq!(sel.max_translations(), (0, 0, 0, 0));

        // no hits at all
        let sel = Sel::new(3, 3, 1, 1).unwrap();
        assert_eq!(sel.max_translations(), (0, 0, 0, 0));
    }

    #[test]
    fn test_reflect() {
        let sel = Sel::from_string(
            "x..\n\
             .o.",
            0,
            0,
        )
        .unwrap();
        let r = sel.reflect();
        assert_eq!((r.origin_x(), r.origin_y()), (2, 1));
        assert_eq!(r.get_element(2, 1), Some(SelElement::Hit));
        assert_eq!(r.get_element(1, 0), Some(SelElement::Miss));

        let rr = r.reflect();
        assert_eq!((rr.origin_x(), rr.origin_y()), (0, 0));
        for (x, y, elem) in sel.cells() {
            assert_eq!(rr.get_element(x, y), Some(elem));
        }
    }
}
