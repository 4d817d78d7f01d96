use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

use ab_glyph::FontArc;
use serde::Deserialize;

use crate::common::{Background, Color, ECLevel, EyeShape, ModuleShape, RenderError, RenderResult};

// Logo source
//------------------------------------------------------------------------------

/// Where the logo image comes from. Strings starting with `data:` are data uris,
/// any other string is taken as a file path.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum LogoSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
    DataUri(String),
}

impl From<String> for LogoSource {
    fn from(s: String) -> Self {
        if s.starts_with("data:") {
            Self::DataUri(s)
        } else {
            Self::Path(PathBuf::from(s))
        }
    }
}

impl From<&str> for LogoSource {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Vec<u8>> for LogoSource {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(b)
    }
}

impl Debug for LogoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
            Self::Path(p) => write!(f, "Path({})", p.display()),
            Self::DataUri(u) => write!(f, "DataUri({} chars)", u.len()),
        }
    }
}

// Label font
//------------------------------------------------------------------------------

// DejaVu Sans Bold, see assets/DejaVuSans-LICENSE.txt
static BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans-Bold.ttf");

/// Font used to draw the caption under a raster render. Defaults to a bundled bold sans-serif.
#[derive(Clone)]
pub struct LabelFont(pub FontArc);

impl LabelFont {
    pub fn bundled() -> RenderResult<Self> {
        FontArc::try_from_slice(BUNDLED_FONT)
            .map(Self)
            .map_err(|e| RenderError::InvalidConfig(format!("bundled label font: {e}")))
    }

    pub fn try_from_vec(data: Vec<u8>) -> RenderResult<Self> {
        FontArc::try_from_vec(data)
            .map(Self)
            .map_err(|e| RenderError::InvalidConfig(format!("label font: {e}")))
    }
}

impl Debug for LabelFont {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("LabelFont")
    }
}

// Style
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub module_shape: ModuleShape,
    pub eye_shape: EyeShape,
    pub foreground: Color,
    pub background: Background,
    pub logo: Option<LogoSource>,
    pub label: Option<String>,
    /// Overrides the bundled label font.
    #[serde(skip)]
    pub label_font: Option<LabelFont>,
    pub ec_level: ECLevel,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            module_shape: ModuleShape::Square,
            eye_shape: EyeShape::Square,
            foreground: Color::BLACK,
            background: Background::default(),
            logo: None,
            label: None,
            label_font: None,
            ec_level: ECLevel::M,
        }
    }
}

impl Style {
    pub fn from_json(json: &str) -> RenderResult<Self> {
        serde_json::from_str(json).map_err(|e| RenderError::InvalidConfig(e.to_string()))
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// Label text, if one is set and non-empty.
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }

    /// Level the payload is actually encoded at. A logo hides modules, so it always forces `H`.
    pub fn effective_ec_level(&self) -> ECLevel {
        if self.has_logo() {
            ECLevel::H
        } else {
            self.ec_level
        }
    }
}

#[cfg(test)]
mod style_tests {
    use std::path::PathBuf;

    use super::{LabelFont, LogoSource, Style};
    use crate::common::{Background, Color, ECLevel, EyeShape, ModuleShape};

    #[test]
    fn test_default() {
        let s = Style::default();
        assert_eq!(s.foreground, Color::BLACK);
        assert_eq!(s.background, Background::Solid(Color::WHITE));
        assert_eq!(s.effective_ec_level(), ECLevel::M);
        assert_eq!(s.label_text(), None);
    }

    #[test]
    fn test_logo_forces_h() {
        let s = Style { ec_level: ECLevel::L, logo: Some(vec![1, 2, 3].into()), ..Style::default() };
        assert_eq!(s.effective_ec_level(), ECLevel::H);
    }

    #[test]
    fn test_empty_label() {
        let s = Style { label: Some(String::new()), ..Style::default() };
        assert_eq!(s.label_text(), None);
    }

    #[test]
    fn test_from_json() {
        let json = r##"{
            "moduleShape": "liquid",
            "eyeShape": "pentagon",
            "foreground": "#336699",
            "background": "transparent",
            "logo": "assets/logo.png",
            "label": "SCAN ME",
            "ecLevel": "Q"
        }"##;
        let s = Style::from_json(json).unwrap();
        assert_eq!(s.module_shape, ModuleShape::Liquid);
        assert_eq!(s.eye_shape, EyeShape::Square);
        assert_eq!(s.foreground, Color::rgb(0x33, 0x66, 0x99));
        assert_eq!(s.background, Background::Transparent);
        assert_eq!(s.logo, Some(LogoSource::Path(PathBuf::from("assets/logo.png"))));
        assert_eq!(s.label_text(), Some("SCAN ME"));
        assert_eq!(s.ec_level, ECLevel::Q);
    }

    #[test]
    fn test_from_json_defaults() {
        let s = Style::from_json("{}").unwrap();
        assert_eq!(s.module_shape, ModuleShape::Square);
        assert_eq!(s.ec_level, ECLevel::M);
    }

    #[test]
    fn test_from_json_bad_color() {
        assert!(Style::from_json(r#"{ "foreground": "red" }"#).is_err());
    }

    #[test]
    fn test_bundled_font() {
        use ab_glyph::Font;

        let font = LabelFont::bundled().unwrap();
        assert_ne!(font.0.glyph_id('S').0, 0);
        assert!(LabelFont::try_from_vec(vec![0; 16]).is_err());
    }

    #[test]
    fn test_logo_source_from_str() {
        assert!(matches!(LogoSource::from("data:image/png;base64,AAAA"), LogoSource::DataUri(_)));
        assert!(matches!(LogoSource::from("/tmp/logo.png"), LogoSource::Path(_)));
    }
}
