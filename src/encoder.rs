use qrcode::types::QrError;
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::common::{ECLevel, RenderError, RenderResult};

// Module matrix
//------------------------------------------------------------------------------

/// Square grid of modules produced by an encoder, `true` being a dark module.
///
/// The matrix carries no quiet zone; the finder patterns sit flush against the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    w: usize,
    grid: Vec<bool>,
}

impl ModuleMatrix {
    /// Builds a matrix from row-major cells. `grid.len()` must equal `w * w`.
    pub fn new(w: usize, grid: Vec<bool>) -> RenderResult<Self> {
        if grid.len() != w * w {
            return Err(RenderError::InvalidMatrix(format!("{} cells for width {w}", grid.len())));
        }
        Ok(Self { w, grid })
    }

    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> RenderResult<Self> {
        let w = rows.len();
        if let Some(r) = rows.iter().find(|r| r.as_ref().len() != w) {
            let len = r.as_ref().len();
            return Err(RenderError::InvalidMatrix(format!("row of {len} cells for width {w}")));
        }
        let grid = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::new(w, grid)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.w && c < self.w, "Cell ({r}, {c}) out of bounds");
        self.grid[r * self.w + c]
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }

    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1));
        for row in self.grid.chunks(self.w) {
            res.extend(row.iter().map(|&m| if m { '█' } else { ' ' }));
            res.push('\n');
        }
        res
    }
}

// Encoder seam
//------------------------------------------------------------------------------

pub trait Encode {
    fn encode(&self, text: &str, ecl: ECLevel) -> RenderResult<ModuleMatrix>;
}

/// Default encoder backed by the `qrcode` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrcodeEncoder;

impl Encode for QrcodeEncoder {
    fn encode(&self, text: &str, ecl: ECLevel) -> RenderResult<ModuleMatrix> {
        if text.is_empty() {
            return Err(RenderError::EmptyData);
        }

        debug!(len = text.len(), ?ecl, "encoding payload");
        let code = QrCode::with_error_correction_level(text.as_bytes(), ecl.into())
            .map_err(|e| match e {
                QrError::DataTooLong => RenderError::DataTooLong(ecl),
                e => RenderError::Unencodable(e.to_string()),
            })?;

        let w = code.width();
        let grid = code.to_colors().into_iter().map(|c| c == qrcode::Color::Dark).collect();
        debug!(width = w, "payload encoded");
        ModuleMatrix::new(w, grid)
    }
}

impl From<ECLevel> for EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => EcLevel::L,
            ECLevel::M => EcLevel::M,
            ECLevel::Q => EcLevel::Q,
            ECLevel::H => EcLevel::H,
        }
    }
}

pub fn encode(text: &str, ecl: ECLevel) -> RenderResult<ModuleMatrix> {
    QrcodeEncoder.encode(text, ecl)
}

#[cfg(test)]
mod encoder_tests {
    use test_case::test_case;

    use super::{encode, ModuleMatrix};
    use crate::common::{ECLevel, RenderError};

    fn assert_finder_at(m: &ModuleMatrix, r0: usize, c0: usize) {
        for i in 0..7 {
            for j in 0..7 {
                let exp = match (i, j) {
                    (0 | 6, _) | (_, 0 | 6) => true,
                    (1 | 5, _) | (_, 1 | 5) => false,
                    _ => true,
                };
                assert_eq!(m.get(r0 + i, c0 + j), exp, "Finder mismatch at ({}, {})", r0 + i, c0 + j);
            }
        }
    }

    #[test]
    fn test_encode_url() {
        let m = encode("https://example.com", ECLevel::M).unwrap();
        let w = m.width();
        assert_eq!(w, 25);
        assert_finder_at(&m, 0, 0);
        assert_finder_at(&m, 0, w - 7);
        assert_finder_at(&m, w - 7, 0);
    }

    #[test_case(ECLevel::L)]
    #[test_case(ECLevel::M)]
    #[test_case(ECLevel::Q)]
    #[test_case(ECLevel::H)]
    fn test_valid_width(ecl: ECLevel) {
        let m = encode("Hello, world! 🌏", ecl).unwrap();
        assert!(m.width() >= 21);
        assert_eq!((m.width() - 17) % 4, 0);
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(encode("", ECLevel::M), Err(RenderError::EmptyData));
    }

    #[test]
    fn test_data_too_long() {
        let data = "1234567890".repeat(306);
        assert_eq!(encode(&data, ECLevel::H), Err(RenderError::DataTooLong(ECLevel::H)));
    }

    #[test]
    fn test_higher_level_never_shrinks() {
        let data = "https://example.com/some/longer/path?with=query";
        let low = encode(data, ECLevel::L).unwrap().width();
        let high = encode(data, ECLevel::H).unwrap().width();
        assert!(high >= low);
    }

    #[test]
    fn test_from_rows() {
        let m = ModuleMatrix::from_rows(&[[true, false], [false, true]]).unwrap();
        assert_eq!(m.width(), 2);
        assert!(m.get(1, 1));
        assert!(!m.get(0, 1));
        assert_eq!(m.count_dark_modules(), 2);
        assert_eq!(m.to_debug_str(), "█ \n █\n");
    }

    #[test]
    fn test_non_square_rejected() {
        assert!(matches!(ModuleMatrix::new(3, vec![true; 8]), Err(RenderError::InvalidMatrix(_))));
        let rows: [&[bool]; 2] = [&[true, false], &[true]];
        assert!(matches!(ModuleMatrix::from_rows(&rows), Err(RenderError::InvalidMatrix(_))));
    }
}
