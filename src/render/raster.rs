use std::path::Path;

use ab_glyph::PxScale;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_polygon_mut, draw_text_mut, text_size};
use imageproc::point::Point;
use imageproc::rect::Rect;
use tracing::{debug, warn};

use crate::common::{ceil_px, floor_px, round_px, Color, LogoError, RenderError, RenderResult};
use crate::encoder::ModuleMatrix;
use crate::geometry::{plan, LabelLayout, LogoFrame, Paint, Scene, Shape};
use crate::style::{LabelFont, LogoSource, Style};

// Output
//------------------------------------------------------------------------------

/// What happened to the logo layer. A failed decode never fails the render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoStatus {
    NotRequested,
    Drawn,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RasterOutput {
    pub image: RgbaImage,
    pub logo: LogoStatus,
}

impl RasterOutput {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> RenderResult<()> {
        self.image.save(path).map_err(|e| RenderError::Export(e.to_string()))
    }

    pub fn to_png_bytes(&self) -> RenderResult<Vec<u8>> {
        let mut buf = std::io::Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| RenderError::Export(e.to_string()))?;
        Ok(buf.into_inner())
    }
}

// Render
//------------------------------------------------------------------------------

pub async fn render(m: &ModuleMatrix, style: &Style, size: u32) -> RenderResult<RasterOutput> {
    let mut image = RgbaImage::new(0, 0);
    let logo = render_into(&mut image, m, style, size).await?;
    Ok(RasterOutput { image, logo })
}

/// Resizes `canvas` and paints the code onto it. Completes only after any logo decode has
/// finished, whether it succeeded or not.
pub async fn render_into(
    canvas: &mut RgbaImage,
    m: &ModuleMatrix,
    style: &Style,
    size: u32,
) -> RenderResult<LogoStatus> {
    if size == 0 {
        return Err(RenderError::InvalidSize(size));
    }
    let scene = plan(m, style, size as f64)?;

    let label = style.label_text().map(|t| (t, LabelLayout::new(size as f64)));
    let height = size + label.map_or(0, |(_, l)| floor_px::<u32>(l.padding));
    *canvas = RgbaImage::new(size, height);

    paint_scene(canvas, &scene);

    if let Some((text, layout)) = label {
        match style.label_font.clone().map_or_else(LabelFont::bundled, Ok) {
            Ok(font) => draw_label(canvas, text, &layout, scene.foreground, &font),
            Err(e) => warn!(label = text, error = %e, "no usable label font, leaving label area blank"),
        }
    }

    let (Some(src), Some(frame)) = (&style.logo, scene.logo) else {
        return Ok(LogoStatus::NotRequested);
    };

    debug!(source = ?src, "loading logo");
    match load_logo(src).await {
        Ok(logo) => {
            draw_logo(canvas, &frame, &scene, &logo);
            Ok(LogoStatus::Drawn)
        }
        Err(e) => {
            warn!(error = %e, "failed to load logo, rendering without it");
            Ok(LogoStatus::Failed(e.to_string()))
        }
    }
}

fn paint_scene(canvas: &mut RgbaImage, scene: &Scene) {
    let fg = scene.foreground.to_rgba();
    let bg = scene.background.color().map(Color::to_rgba);

    if let Some(bg) = bg {
        debug!("painting background");
        let (w, h) = canvas.dimensions();
        draw_filled_rect_mut(canvas, Rect::at(0, 0).of_size(w, h), bg);
    }

    debug!(count = scene.modules.len(), "painting modules");
    for s in &scene.modules {
        fill_shape(canvas, s, fg);
    }

    debug!("painting eyes");
    for eye in &scene.eyes {
        for layer in eye.layers() {
            match layer.paint {
                Paint::Foreground => fill_shape(canvas, &layer.shape, fg),
                Paint::Hole => {
                    fill_shape(canvas, &layer.shape, Color::CLEAR.to_rgba());
                    if let Some(bg) = bg {
                        fill_shape(canvas, &layer.shape, bg);
                    }
                }
            }
        }
    }
}

fn draw_label(canvas: &mut RgbaImage, text: &str, layout: &LabelLayout, fg: Color, font: &LabelFont) {
    debug!(text, "drawing label");
    let scale = PxScale::from(layout.font_size as f32);
    let (w, _) = text_size(scale, &font.0, text);
    // Vertically the em box is centered, not the ink
    let x = round_px::<i32>(layout.center_x - w as f64 / 2.0);
    let y = round_px::<i32>(layout.center_y - layout.font_size / 2.0);
    draw_text_mut(canvas, fg.to_rgba(), x, y, scale, &font.0, text);
}

fn draw_logo(canvas: &mut RgbaImage, frame: &LogoFrame, scene: &Scene, logo: &DynamicImage) {
    debug!(size = frame.size, "drawing logo");
    fill_shape(canvas, &frame.backing, LogoFrame::backing_color(scene.background).to_rgba());

    let side = round_px::<u32>(frame.size).max(1);
    let logo = imageops::resize(&logo.to_rgba8(), side, side, FilterType::Lanczos3);
    imageops::overlay(canvas, &logo, round_px::<i64>(frame.x), round_px::<i64>(frame.y));
}

// Logo loading. Decoding runs off the async thread
//------------------------------------------------------------------------------

async fn load_logo(src: &LogoSource) -> Result<DynamicImage, LogoError> {
    let bytes = match src {
        LogoSource::Bytes(b) => b.clone(),
        LogoSource::Path(p) => tokio::fs::read(p).await?,
        LogoSource::DataUri(u) => decode_data_uri(u)?,
    };
    let logo = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
    Ok(logo)
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, LogoError> {
    let rest = uri.strip_prefix("data:").ok_or(LogoError::MalformedUri)?;
    let (meta, data) = rest.split_once(',').ok_or(LogoError::MalformedUri)?;
    if meta.ends_with(";base64") {
        Ok(STANDARD.decode(data.trim())?)
    } else {
        percent_decode(data)
    }
}

fn percent_decode(s: &str) -> Result<Vec<u8>, LogoError> {
    let bytes = s.as_bytes();
    let mut res = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'%' {
            res.push(bytes[i]);
            i += 1;
            continue;
        }
        let hex = bytes.get(i + 1..i + 3).ok_or(LogoError::MalformedUri)?;
        let nibble = |b: u8| (b as char).to_digit(16).ok_or(LogoError::MalformedUri);
        res.push((nibble(hex[0])? * 16 + nibble(hex[1])?) as u8);
        i += 3;
    }
    Ok(res)
}

// Shape fills. A span [a, b) covers the pixels whose centers fall inside it
//------------------------------------------------------------------------------

fn span_start(a: f64) -> i32 {
    ceil_px::<i32>(a - 0.5)
}

fn fill_shape(canvas: &mut RgbaImage, shape: &Shape, color: Rgba<u8>) {
    match *shape {
        Shape::Rect { x, y, w, h } => fill_rect(canvas, x, y, w, h, color),
        _ => fill_polygon(canvas, shape, color),
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: f64, y: f64, w: f64, h: f64, color: Rgba<u8>) {
    let (x0, x1) = (span_start(x), span_start(x + w));
    let (y0, y1) = (span_start(y), span_start(y + h));
    if x1 <= x0 || y1 <= y0 {
        return;
    }
    let rect = Rect::at(x0, y0).of_size((x1 - x0) as u32, (y1 - y0) as u32);
    draw_filled_rect_mut(canvas, rect, color);
}

fn fill_polygon(canvas: &mut RgbaImage, shape: &Shape, color: Rgba<u8>) {
    let (cx, cy) = shape.center();
    // Polygon fills include their edges, so far edges pull in by one pixel
    let snap = |v: f64, c: f64| if v > c { span_start(v) - 1 } else { span_start(v) };

    let mut pts: Vec<Point<i32>> = Vec::new();
    for (x, y) in shape.outline() {
        let p = Point::new(snap(x, cx), snap(y, cy));
        if pts.last() != Some(&p) {
            pts.push(p);
        }
    }
    while pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }

    if pts.len() < 3 {
        let (x, y, w, h) = shape.bounds();
        fill_rect(canvas, x, y, w, h, color);
        return;
    }
    draw_polygon_mut(canvas, &pts, color);
}
