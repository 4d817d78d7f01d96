use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::Write;

// Shape descriptors shared by the raster and svg back-ends
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    // Corner radii in clockwise order: top-left, top-right, bottom-right, bottom-left
    RoundRect { x: f64, y: f64, w: f64, h: f64, radii: [f64; 4] },
    Circle { cx: f64, cy: f64, r: f64 },
}

impl Shape {
    pub fn square(x: f64, y: f64, s: f64) -> Self {
        Self::Rect { x, y, w: s, h: s }
    }

    pub fn rounded(x: f64, y: f64, s: f64, r: f64) -> Self {
        let r = r.clamp(0.0, s / 2.0);
        Self::RoundRect { x, y, w: s, h: s, radii: [r; 4] }
    }

    /// Square with fully rounded top-left and bottom-right corners.
    pub fn leaf(x: f64, y: f64, s: f64) -> Self {
        let r = s / 2.0;
        Self::RoundRect { x, y, w: s, h: s, radii: [r, 0.0, r, 0.0] }
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Self {
        Self::Circle { cx, cy, r }
    }

    /// Bounding box as (x, y, w, h).
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match *self {
            Self::Rect { x, y, w, h } | Self::RoundRect { x, y, w, h, .. } => (x, y, w, h),
            Self::Circle { cx, cy, r } => (cx - r, cy - r, 2.0 * r, 2.0 * r),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        let (x, y, w, h) = self.bounds();
        (x + w / 2.0, y + h / 2.0)
    }

    /// Uniform corner radius, if every corner shares one.
    pub fn uniform_radius(&self) -> Option<f64> {
        match *self {
            Self::Rect { .. } => Some(0.0),
            Self::RoundRect { radii, .. } => radii.iter().all(|&r| r == radii[0]).then_some(radii[0]),
            Self::Circle { .. } => None,
        }
    }

    /// Closed svg path, traced clockwise from the top edge.
    pub fn path_data(&self) -> String {
        match *self {
            Self::Rect { x, y, w, h } => format!(
                "M {} {} H {} V {} H {} Z",
                fmt_num(x),
                fmt_num(y),
                fmt_num(x + w),
                fmt_num(y + h),
                fmt_num(x)
            ),
            Self::RoundRect { x, y, w, h, radii: [tl, tr, br, bl] } => {
                let mut d = String::new();
                let arc = |d: &mut String, r: f64, ex: f64, ey: f64| {
                    if r > 0.0 {
                        let r = fmt_num(r);
                        let _ = write!(d, " A {r} {r} 0 0 1 {} {}", fmt_num(ex), fmt_num(ey));
                    }
                };
                let _ = write!(d, "M {} {}", fmt_num(x + tl), fmt_num(y));
                let _ = write!(d, " L {} {}", fmt_num(x + w - tr), fmt_num(y));
                arc(&mut d, tr, x + w, y + tr);
                let _ = write!(d, " L {} {}", fmt_num(x + w), fmt_num(y + h - br));
                arc(&mut d, br, x + w - br, y + h);
                let _ = write!(d, " L {} {}", fmt_num(x + bl), fmt_num(y + h));
                arc(&mut d, bl, x, y + h - bl);
                let _ = write!(d, " L {} {}", fmt_num(x), fmt_num(y + tl));
                arc(&mut d, tl, x + tl, y);
                d.push_str(" Z");
                d
            }
            Self::Circle { cx, cy, r } => {
                let (l, rt, cy, r) = (fmt_num(cx - r), fmt_num(cx + r), fmt_num(cy), fmt_num(r));
                format!("M {l} {cy} A {r} {r} 0 1 0 {rt} {cy} A {r} {r} 0 1 0 {l} {cy} Z")
            }
        }
    }

    /// Polygon approximation of the outline, clockwise in screen space.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        match *self {
            Self::Rect { x, y, w, h } => vec![(x, y), (x + w, y), (x + w, y + h), (x, y + h)],
            Self::RoundRect { x, y, w, h, radii: [tl, tr, br, bl] } => {
                let mut pts = Vec::new();
                corner(&mut pts, (x + tl, y + tl), tl, PI, (x, y));
                corner(&mut pts, (x + w - tr, y + tr), tr, 1.5 * PI, (x + w, y));
                corner(&mut pts, (x + w - br, y + h - br), br, 0.0, (x + w, y + h));
                corner(&mut pts, (x + bl, y + h - bl), bl, FRAC_PI_2, (x, y + h));
                pts
            }
            Self::Circle { cx, cy, r } => {
                let n = 4 * arc_segments(r);
                (0..n)
                    .map(|i| {
                        let t = 2.0 * PI * i as f64 / n as f64;
                        (cx + r * t.cos(), cy + r * t.sin())
                    })
                    .collect()
            }
        }
    }
}

// Quarter arc from `start` angle sweeping clockwise, or the bare corner when r is zero
fn corner(pts: &mut Vec<(f64, f64)>, c: (f64, f64), r: f64, start: f64, sharp: (f64, f64)) {
    if r <= 0.0 {
        pts.push(sharp);
        return;
    }
    let n = arc_segments(r);
    for i in 0..=n {
        let t = start + FRAC_PI_2 * i as f64 / n as f64;
        pts.push((c.0 + r * t.cos(), c.1 + r * t.sin()));
    }
}

fn arc_segments(r: f64) -> usize {
    ((r / 2.0).ceil() as usize).clamp(3, 24)
}

/// Formats a coordinate the way it appears in svg attributes: no trailing zeros, no `-0`.
pub fn fmt_num(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}
