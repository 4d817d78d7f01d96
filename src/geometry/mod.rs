mod scene;
mod shape;

pub use scene::{plan, EyeStack, LabelLayout, Layer, LogoFrame, Paint, Scene};
pub use shape::{fmt_num, Shape};

use crate::common::{RenderError, RenderResult};
use crate::encoder::ModuleMatrix;

pub const FINDER_SIZE: usize = 7;
pub const LOGO_RATIO: f64 = 0.22;

// Inclusive range of cells along one axis
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: usize,
    pub end: usize,
}

impl CellRange {
    pub fn contains(&self, i: usize) -> bool {
        self.start <= i && i <= self.end
    }
}

// Geometry
//------------------------------------------------------------------------------

/// Maps matrix cells to pixel space and classifies cells as finder or logo covered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    n: usize,
    px: f64,
    logo: Option<CellRange>,
}

impl Geometry {
    /// Fails when the three finder patterns cannot fit side by side.
    pub fn new(module_count: usize, target_size: f64, has_logo: bool) -> RenderResult<Self> {
        if module_count < 2 * FINDER_SIZE {
            return Err(RenderError::InvalidMatrix(format!(
                "width {module_count} is too small for finder patterns"
            )));
        }

        let px = target_size / module_count as f64;
        let logo = has_logo.then(|| Self::logo_range(module_count));
        Ok(Self { n: module_count, px, logo })
    }

    // Both bounds are floored independently and the range is inclusive on both ends
    fn logo_range(n: usize) -> CellRange {
        let k = (n as f64 * LOGO_RATIO).floor();
        let center = n as f64 / 2.0;
        let start = (center - k / 2.0).floor() as usize;
        let end = (center + k / 2.0).floor() as usize;
        CellRange { start, end }
    }

    pub fn pixel_size(&self) -> f64 {
        self.px
    }

    pub fn logo_region(&self) -> Option<CellRange> {
        self.logo
    }

    pub fn is_finder_cell(&self, r: usize, c: usize) -> bool {
        let near = |i: usize| i < FINDER_SIZE;
        let far = |i: usize| i >= self.n - FINDER_SIZE;
        (near(r) && near(c)) || (near(r) && far(c)) || (far(r) && near(c))
    }

    pub fn is_logo_excluded(&self, r: usize, c: usize) -> bool {
        self.logo.is_some_and(|l| l.contains(r) && l.contains(c))
    }

    /// True if the cell is dark and will be drawn by the module pass.
    pub fn is_filled(&self, m: &ModuleMatrix, r: usize, c: usize) -> bool {
        r < self.n
            && c < self.n
            && !self.is_finder_cell(r, c)
            && !self.is_logo_excluded(r, c)
            && m.get(r, c)
    }

    /// Top-left cell of each finder, as (row, col): top-left, top-right, bottom-left.
    pub fn finder_anchors(&self) -> [(usize, usize); 3] {
        let far = self.n - FINDER_SIZE;
        [(0, 0), (0, far), (far, 0)]
    }

    /// Pixel position of a cell's top-left corner, as (x, y).
    pub fn cell_origin(&self, r: usize, c: usize) -> (f64, f64) {
        (c as f64 * self.px, r as f64 * self.px)
    }
}

#[cfg(test)]
mod geometry_tests {
    use test_case::test_case;

    use super::{CellRange, Geometry};
    use crate::common::RenderError;
use crate::encoder::ModuleMatrix;

    #[test]
    fn test_pixel_size() {
        let g = Geometry::new(25, 400.0, false).unwrap();
        assert_eq!(g.pixel_size(), 16.0);
        assert_eq!(g.cell_origin(2, 3), (48.0, 32.0));
    }

    #[test]
    fn test_finder_cells() {
        let g = Geometry::new(21, 210.0, false).unwrap();
        let finder_cells =
            (0..21).flat_map(|r| (0..21).map(move |c| (r, c))).filter(|&(r, c)| g.is_finder_cell(r, c));
        assert_eq!(finder_cells.count(), 3 * 49);
        assert!(g.is_finder_cell(6, 6));
        assert!(g.is_finder_cell(0, 20));
        assert!(g.is_finder_cell(20, 0));
        assert!(!g.is_finder_cell(7, 7));
        assert!(!g.is_finder_cell(20, 20));
        assert!(!g.is_finder_cell(14, 14));
    }

    #[test]
    fn test_finder_anchors() {
        let g = Geometry::new(29, 290.0, false).unwrap();
        assert_eq!(g.finder_anchors(), [(0, 0), (0, 22), (22, 0)]);
    }

    #[test_case(21, 8, 12)]
    #[test_case(25, 10, 15)]
    #[test_case(29, 11, 17)]
    #[test_case(33, 13, 20)]
    #[test_case(177, 69, 107)]
    fn test_logo_region(n: usize, start: usize, end: usize) {
        let g = Geometry::new(n, 400.0, true).unwrap();
        assert_eq!(g.logo_region(), Some(CellRange { start, end }));
        assert!(g.is_logo_excluded(start, end));
        assert!(!g.is_logo_excluded(start - 1, end));
        assert!(!g.is_logo_excluded(start, end + 1));
    }

    #[test_case(0)]
    #[test_case(5)]
    #[test_case(13)]
    fn test_too_small(n: usize) {
        assert!(matches!(Geometry::new(n, 100.0, false), Err(RenderError::InvalidMatrix(_))));
    }

    #[test]
    fn test_no_logo_region() {
        let g = Geometry::new(21, 400.0, false).unwrap();
        assert_eq!(g.logo_region(), None);
        assert!(!g.is_logo_excluded(10, 10));
    }

    #[test]
    fn test_is_filled() {
        let m = ModuleMatrix::new(21, vec![true; 21 * 21]).unwrap();
        let g = Geometry::new(21, 210.0, true).unwrap();
        assert!(g.is_filled(&m, 7, 7));
        assert!(!g.is_filled(&m, 0, 0));
        assert!(!g.is_filled(&m, 10, 10));
        assert!(!g.is_filled(&m, 21, 7));
        assert!(!g.is_filled(&m, 7, 21));
    }
}
