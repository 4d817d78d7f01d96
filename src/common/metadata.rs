use std::fmt::{Display, Formatter};
use std::str::FromStr;

use image::Rgba;
use serde::Deserialize;
use tracing::debug;

use super::error::{RenderError, RenderResult};

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize)]
pub enum ECLevel {
    L = 0,
    #[default]
    M = 1,
    Q = 2,
    H = 3,
}

impl FromStr for ECLevel {
    type Err = RenderError;

    fn from_str(s: &str) -> RenderResult<Self> {
        match s.trim() {
            "L" | "l" => Ok(Self::L),
            "M" | "m" => Ok(Self::M),
            "Q" | "q" => Ok(Self::Q),
            "H" | "h" => Ok(Self::H),
            _ => Err(RenderError::InvalidConfig(format!("unknown error correction level {s}"))),
        }
    }
}

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);
    pub const CLEAR: Self = Self([0, 0, 0, 0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.0;
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

impl FromStr for Color {
    type Err = RenderError;

    fn from_str(s: &str) -> RenderResult<Self> {
        let invalid = || RenderError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }

        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| invalid());
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

        match hex.len() {
            3 => Ok(Self([nibble(0)? * 17, nibble(1)? * 17, nibble(2)? * 17, 255])),
            6 => Ok(Self([byte(0)?, byte(2)?, byte(4)?, 255])),
            8 => Ok(Self([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = RenderError;

    fn try_from(s: String) -> RenderResult<Self> {
        s.parse()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}


// Background
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(try_from = "String")]
pub enum Background {
    Solid(Color),
    Transparent,
}

impl Background {
    pub fn color(self) -> Option<Color> {
        match self {
            Self::Solid(c) => Some(c),
            Self::Transparent => None,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::Solid(Color::WHITE)
    }
}

impl From<Color> for Background {
    fn from(c: Color) -> Self {
        Self::Solid(c)
    }
}

impl FromStr for Background {
    type Err = RenderError;

    fn from_str(s: &str) -> RenderResult<Self> {
        if s.trim().eq_ignore_ascii_case("transparent") {
            return Ok(Self::Transparent);
        }
        s.parse().map(Self::Solid)
    }
}

impl TryFrom<String> for Background {
    type Error = RenderError;

    fn try_from(s: String) -> RenderResult<Self> {
        s.parse()
    }
}

// Module & eye shapes. Unknown names fall back to square instead of failing
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(from = "String")]
pub enum ModuleShape {
    #[default]
    Square,
    Circle,
    Liquid,
    Rounded,
}

impl From<&str> for ModuleShape {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Self::Square,
            "circle" => Self::Circle,
            "liquid" => Self::Liquid,
            "rounded" => Self::Rounded,
            other => {
                debug!(shape = other, "unknown module shape, using square");
                Self::Square
            }
        }
    }
}

impl From<String> for ModuleShape {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(from = "String")]
pub enum EyeShape {
    #[default]
    Square,
    Circle,
    Leaf,
    Rounded,
}

impl From<&str> for EyeShape {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Self::Square,
            "circle" => Self::Circle,
            "leaf" => Self::Leaf,
            "rounded" => Self::Rounded,
            other => {
                debug!(shape = other, "unknown eye shape, using square");
                Self::Square
            }
        }
    }
}

impl From<String> for EyeShape {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
