//! # qrstyle
//!
//! A Rust library for rendering styled QR codes to raster images and SVG documents.
//! Both back-ends are driven by one geometric model, so a PNG and an SVG of the same
//! code and style show the same modules, eyes and logo area.
//!
//! ## Features
//!
//! - **Module Shapes**: Square, circle, rounded and liquid (bridged circles) data modules
//! - **Eye Shapes**: Square, circle, rounded and leaf finder patterns
//! - **Colors**: Any RGBA foreground on a solid or transparent background
//! - **Logo Overlay**: Centered logo on an opaque backing, error correction forced to `H`
//! - **Label**: Caption drawn under raster renders
//! - **Payloads**: Formatters for Wi-Fi, vCard, email, SMS and URL payloads
//!
//! ## Quick Start
//!
//! ### SVG
//!
//! ```rust
//! use qrstyle::{EyeShape, ModuleShape, QRStyler};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let svg = QRStyler::new("https://example.com")
//!     .module_shape(ModuleShape::Liquid) // if not provided, defaults to ModuleShape::Square
//!     .eye_shape(EyeShape::Leaf)         // if not provided, defaults to EyeShape::Square
//!     .to_svg(400)?;
//!
//! assert!(svg.starts_with("<svg"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Raster
//!
//! Raster renders are async because the logo is decoded off the caller's thread.
//!
//! ```rust,no_run
//! use qrstyle::{Background, Color, ECLevel, QRStyler};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut styler = QRStyler::new("https://example.com");
//! styler
//!     .foreground("#1d3557".parse::<Color>()?)
//!     .background(Background::Transparent)
//!     .ec_level(ECLevel::Q)  // Ignored while a logo is set, which always encodes at H
//!     .logo("logo.png")
//!     .label("SCAN ME");     // Bold sans-serif by default, `label_font` overrides it
//!
//! let out = styler.to_raster(400).await?;
//! println!("logo: {:?}", out.logo); // A logo that fails to decode is reported, not raised
//! out.save("styled_qr.png")?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Style From JSON
//!
//! ```rust
//! use qrstyle::{payload::format_wifi, QRStyler, Style};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let style = Style::from_json(r##"{ "moduleShape": "circle", "foreground": "#e63946" }"##)?;
//! let data = format_wifi("Home;Net", "secret", "WPA", false);
//! let svg = QRStyler::new(&data).style(style).to_svg(300)?;
//!
//! assert!(svg.contains("#e63946"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Rendering Model
//!
//! ### Data Modules
//! Every dark module outside the three finder blocks and the logo area is drawn as one shape.
//! Liquid modules bridge into their right and bottom neighbors when those are filled too.
//!
//! ### Eyes
//! Each finder block is an outer 7x7 shape, a 5x5 hole in the background color and a 3x3 core.
//! With a transparent background the hole is left unpainted.
//!
//! ### Logo
//! The logo covers a centered square of `floor(N * 0.22)` modules, which are left blank.
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod encoder;
pub mod geometry;
pub mod payload;
pub mod render;
pub mod style;

pub use builder::QRStyler;
pub use common::error::{RenderError, RenderResult};
pub use common::metadata::{Background, Color, ECLevel, EyeShape, ModuleShape};
pub use encoder::{encode, Encode, ModuleMatrix, QrcodeEncoder};
pub use payload::Payload;
pub use render::{LogoStatus, RasterOutput};
pub use style::{LabelFont, LogoSource, Style};
