use tracing::debug;

use super::{Geometry, Shape, FINDER_SIZE, LOGO_RATIO};
use crate::common::{Background, Color, EyeShape, ModuleShape, RenderResult};
use crate::encoder::ModuleMatrix;
use crate::style::Style;

pub const LOGO_MARGIN: f64 = 2.0;
pub const LABEL_FONT_RATIO: f64 = 0.05;

const MODULE_ROUNDING: f64 = 0.35;
const LIQUID_OVERLAP: f64 = 0.5;
const EYE_OUTER_ROUNDING: f64 = 2.5;
const EYE_HOLE_ROUNDING: f64 = 0.7;

// Eye layers, painted outer to inner
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Foreground,
    // Cut out of the layer beneath and refilled with the background, if any
    Hole,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub shape: Shape,
    pub paint: Paint,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeStack {
    pub outer: Layer,
    pub hole: Layer,
    pub core: Layer,
}

impl EyeStack {
    pub fn layers(&self) -> [Layer; 3] {
        [self.outer, self.hole, self.core]
    }

    fn new(shape: EyeShape, x: f64, y: f64, px: f64) -> Self {
        let (outer, hole, core) = match shape {
            EyeShape::Square => (
                Shape::square(x, y, 7.0 * px),
                Shape::square(x + px, y + px, 5.0 * px),
                Shape::square(x + 2.0 * px, y + 2.0 * px, 3.0 * px),
            ),
            EyeShape::Circle => {
                let (cx, cy) = (x + 3.5 * px, y + 3.5 * px);
                (
                    Shape::circle(cx, cy, 3.5 * px),
                    Shape::circle(cx, cy, 2.5 * px),
                    Shape::circle(cx, cy, 1.5 * px),
                )
            }
            EyeShape::Rounded => {
                let r = EYE_OUTER_ROUNDING * px;
                (
                    Shape::rounded(x, y, 7.0 * px, r),
                    Shape::rounded(x + px, y + px, 5.0 * px, r * EYE_HOLE_ROUNDING),
                    Shape::rounded(x + 2.0 * px, y + 2.0 * px, 3.0 * px, px),
                )
            }
            EyeShape::Leaf => (
                Shape::leaf(x, y, 7.0 * px),
                Shape::leaf(x + px, y + px, 5.0 * px),
                Shape::leaf(x + 2.0 * px, y + 2.0 * px, 3.0 * px),
            ),
        };

        Self {
            outer: Layer { shape: outer, paint: Paint::Foreground },
            hole: Layer { shape: hole, paint: Paint::Hole },
            core: Layer { shape: core, paint: Paint::Foreground },
        }
    }
}

// Logo frame
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoFrame {
    pub backing: Shape,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl LogoFrame {
    fn new(target_size: f64) -> Self {
        let size = target_size * LOGO_RATIO;
        let x = (target_size - size) / 2.0;
        let y = x;
        let backing = Shape::Rect {
            x: x - LOGO_MARGIN,
            y: y - LOGO_MARGIN,
            w: size + 2.0 * LOGO_MARGIN,
            h: size + 2.0 * LOGO_MARGIN,
        };
        Self { backing, x, y, size }
    }

    /// Backing is always opaque: the background, or white when the background is transparent.
    pub fn backing_color(bg: Background) -> Color {
        bg.color().unwrap_or(Color::WHITE)
    }
}

// Label layout, raster only
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelLayout {
    pub font_size: f64,
    pub padding: f64,
    pub center_x: f64,
    pub center_y: f64,
}

impl LabelLayout {
    pub fn new(target_size: f64) -> Self {
        let font_size = target_size * LABEL_FONT_RATIO;
        let padding = 2.0 * font_size;
        Self { font_size, padding, center_x: target_size / 2.0, center_y: target_size + padding / 2.0 }
    }
}

// Scene
//------------------------------------------------------------------------------

/// Back-end agnostic description of one render.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: f64,
    pub foreground: Color,
    pub background: Background,
    pub modules: Vec<Shape>,
    pub eyes: [EyeStack; 3],
    pub logo: Option<LogoFrame>,
    pub geometry: Geometry,
}

pub fn plan(m: &ModuleMatrix, style: &Style, size: f64) -> RenderResult<Scene> {
    let n = m.width();
    let g = Geometry::new(n, size, style.has_logo())?;
    let px = g.pixel_size();

    debug!(modules = n, px, shape = ?style.module_shape, eye = ?style.eye_shape, "planning scene");

    let mut modules = Vec::with_capacity(m.count_dark_modules());
    for r in 0..n {
        for c in 0..n {
            if !g.is_filled(m, r, c) {
                continue;
            }
            let (x, y) = g.cell_origin(r, c);
            push_module(&mut modules, style.module_shape, &g, m, r, c, x, y);
        }
    }

    let eyes = g.finder_anchors().map(|(r, c)| {
        debug_assert!(g.is_finder_cell(r + FINDER_SIZE - 1, c + FINDER_SIZE - 1));
        let (x, y) = g.cell_origin(r, c);
        EyeStack::new(style.eye_shape, x, y, px)
    });

    let logo = style.has_logo().then(|| LogoFrame::new(size));

    Ok(Scene {
        size,
        foreground: style.foreground,
        background: style.background,
        modules,
        eyes,
        logo,
        geometry: g,
    })
}

#[allow(clippy::too_many_arguments)]
fn push_module(
    out: &mut Vec<Shape>,
    shape: ModuleShape,
    g: &Geometry,
    m: &ModuleMatrix,
    r: usize,
    c: usize,
    x: f64,
    y: f64,
) {
    let px = g.pixel_size();
    match shape {
        ModuleShape::Square => out.push(Shape::square(x, y, px)),
        ModuleShape::Circle => out.push(Shape::circle(x + px / 2.0, y + px / 2.0, px / 2.0)),
        ModuleShape::Rounded => out.push(Shape::rounded(x, y, px, MODULE_ROUNDING * px)),
        ModuleShape::Liquid => {
            let rad = px / 2.0;
            let (cx, cy) = (x + rad, y + rad);
            out.push(Shape::circle(cx, cy, rad));

            // Bridges only reach right and down
            if g.is_filled(m, r, c + 1) {
                out.push(Shape::Rect { x: cx, y, w: rad + LIQUID_OVERLAP, h: px });
            }
            if g.is_filled(m, r + 1, c) {
                out.push(Shape::Rect { x, y: cy, w: px, h: rad + LIQUID_OVERLAP });
            }
        }
    }
}
