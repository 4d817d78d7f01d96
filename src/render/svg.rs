use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use crate::common::{Color, RenderError, RenderResult};
use crate::encoder::ModuleMatrix;
use crate::geometry::{fmt_num, plan, EyeStack, LogoFrame, Scene, Shape};
use crate::style::{LogoSource, Style};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

// Render
//------------------------------------------------------------------------------

pub fn render(m: &ModuleMatrix, style: &Style, size: u32) -> RenderResult<String> {
    if size == 0 {
        return Err(RenderError::InvalidSize(size));
    }

    let scene = plan(m, style, size as f64)?;
    let mut shapes = Vec::with_capacity(scene.modules.len() + 12);

    if let Some(bg) = scene.background.color() {
        shapes.push(element(&Shape::Rect { x: 0.0, y: 0.0, w: scene.size, h: scene.size }, bg));
    }

    shapes.extend(scene.modules.iter().map(|s| element(s, scene.foreground)));

    for eye in &scene.eyes {
        push_eye(&mut shapes, eye, &scene);
    }

    if let (Some(src), Some(frame)) = (&style.logo, &scene.logo) {
        push_logo(&mut shapes, src, frame, &scene);
    }

    debug!(elements = shapes.len(), "svg generated");
    let s = fmt_num(scene.size);
    Ok(format!(
        r#"<svg xmlns="{SVG_NS}" viewBox="0 0 {s} {s}" width="{s}" height="{s}">{}</svg>"#,
        shapes.join("")
    ))
}

// Layers are stacked opaque shapes. With no background to paint the hole in, the ring
// becomes one even-odd path so the hole stays unpainted
fn push_eye(out: &mut Vec<String>, eye: &EyeStack, scene: &Scene) {
    match scene.background.color() {
        Some(bg) => {
            out.push(element(&eye.outer.shape, scene.foreground));
            out.push(element(&eye.hole.shape, bg));
        }
        None => out.push(format!(
            r#"<path d="{} {}" fill-rule="evenodd" fill="{}" />"#,
            eye.outer.shape.path_data(),
            eye.hole.shape.path_data(),
            scene.foreground
        )),
    }
    out.push(element(&eye.core.shape, scene.foreground));
}

fn push_logo(out: &mut Vec<String>, src: &LogoSource, frame: &LogoFrame, scene: &Scene) {
    out.push(element(&frame.backing, LogoFrame::backing_color(scene.background)));
    out.push(format!(
        r#"<image href="{}" x="{}" y="{}" width="{}" height="{}" />"#,
        escape_attr(&logo_href(src)),
        fmt_num(frame.x),
        fmt_num(frame.y),
        fmt_num(frame.size),
        fmt_num(frame.size)
    ));
}

fn element(shape: &Shape, fill: Color) -> String {
    match *shape {
        Shape::Rect { x, y, w, h } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" />"#,
            fmt_num(x),
            fmt_num(y),
            fmt_num(w),
            fmt_num(h)
        ),
        Shape::RoundRect { x, y, w, h, .. } => match shape.uniform_radius() {
            Some(r) => format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{r}" ry="{r}" fill="{fill}" />"#,
                fmt_num(x),
                fmt_num(y),
                fmt_num(w),
                fmt_num(h),
                r = fmt_num(r)
            ),
            None => format!(r#"<path d="{}" fill="{fill}" />"#, shape.path_data()),
        },
        Shape::Circle { cx, cy, r } => format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}" />"#,
            fmt_num(cx),
            fmt_num(cy),
            fmt_num(r)
        ),
    }
}

// Logo reference
//------------------------------------------------------------------------------

fn logo_href(src: &LogoSource) -> String {
    match src {
        LogoSource::DataUri(u) => u.clone(),
        LogoSource::Path(p) => p.display().to_string(),
        LogoSource::Bytes(b) => {
            let mime = image::guess_format(b).map_or("application/octet-stream", |f| f.to_mime_type());
            format!("data:{mime};base64,{}", STANDARD.encode(b))
        }
    }
}

fn escape_attr(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            _ => res.push(ch),
        }
    }
    res
}
