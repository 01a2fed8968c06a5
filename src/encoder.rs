use qrcode::types::QrError;
use qrcode::QrCode;
use tracing::debug;

use crate::common::{QRError, QRResult};

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ECLevel {
    L,
    M,
    Q,
    H,
}

impl From<ECLevel> for qrcode::EcLevel {
    fn from(ecl: ECLevel) -> Self {
        match ecl {
            ECLevel::L => qrcode::EcLevel::L,
            ECLevel::M => qrcode::EcLevel::M,
            ECLevel::Q => qrcode::EcLevel::Q,
            ECLevel::H => qrcode::EcLevel::H,
        }
    }
}

// Matrix
//------------------------------------------------------------------------------

/// Square grid of modules, `true` for dark. Row-major, no quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    w: usize,
    grid: Vec<bool>,
}

impl Matrix {
    pub fn new(w: usize, grid: Vec<bool>) -> Self {
        debug_assert!(grid.len() == w * w, "Grid length {} doesn't match width {w}", grid.len());
        Self { w, grid }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn get(&self, r: usize, c: usize) -> bool {
        debug_assert!(r < self.w && c < self.w, "Module ({r}, {c}) out of bounds");
        self.grid[r * self.w + c]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.grid.chunks_exact(self.w.max(1))
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m).count()
    }

    /// Clears every module inside the half-open row/column ranges. Parts of the region that
    /// fall outside the grid are ignored.
    pub fn clear_region(&mut self, top: i64, left: i64, height: i64, width: i64) {
        let w = self.w as i64;
        let (r0, r1) = (top.clamp(0, w), (top + height).clamp(0, w));
        let (c0, c1) = (left.clamp(0, w), (left + width).clamp(0, w));
        for r in r0..r1 {
            for c in c0..c1 {
                self.grid[(r * w + c) as usize] = false;
            }
        }
    }

    #[cfg(test)]
    pub fn from_pattern(pattern: &str) -> Self {
        let rows = pattern.split_whitespace().collect::<Vec<_>>();
        let w = rows.len();
        let grid = rows.iter().flat_map(|row| row.chars().map(|c| c == '#')).collect();
        Self::new(w, grid)
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.w * (self.w + 1) + 1);
        res.push('\n');
        for row in self.rows() {
            res.extend(row.iter().map(|&m| if m { '#' } else { '.' }));
            res.push('\n');
        }
        res
    }
}

// Encoder
//------------------------------------------------------------------------------

/// Turns text into a module matrix. Colours are applied later by the composition step.
pub trait Encoder {
    fn encode(&self, text: &str, ecl: ECLevel) -> QRResult<Matrix>;
}

/// [`Encoder`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl Encoder for QrCodeEncoder {
    fn encode(&self, text: &str, ecl: ECLevel) -> QRResult<Matrix> {
        if text.is_empty() {
            return Err(QRError::EmptyData);
        }

        let code = QrCode::with_error_correction_level(text.as_bytes(), ecl.into()).map_err(|e| match e {
            QrError::DataTooLong => QRError::DataTooLong,
            e => QRError::Encoding(e.to_string()),
        })?;

        let w = code.width();
        let grid = code.to_colors().into_iter().map(|c| c == qrcode::Color::Dark).collect();
        debug!(len = text.len(), ?ecl, width = w, "Encoded matrix");

        Ok(Matrix::new(w, grid))
    }
}

#[cfg(test)]
mod matrix_tests {
    use super::Matrix;

    #[test]
    fn test_from_pattern() {
        let m = Matrix::from_pattern("#.# .#. #.#");
        assert_eq!(m.width(), 3);
        assert!(m.get(0, 0));
        assert!(!m.get(0, 1));
        assert!(m.get(1, 1));
        assert_eq!(m.count_dark_modules(), 5);
    }

    #[test]
    fn test_clear_region() {
        let mut m = Matrix::from_pattern("#### #### #### ####");
        m.clear_region(1, 1, 2, 2);
        assert_eq!(m.to_debug_str(), "\n####\n#..#\n#..#\n####\n");
    }

    #[test]
    fn test_clear_region_partially_outside() {
        let mut m = Matrix::from_pattern("### ### ###");
        m.clear_region(-2, -2, 3, 3);
        assert_eq!(m.to_debug_str(), "\n.##\n###\n###\n");
    }

    #[test]
    fn test_clear_region_fully_outside() {
        let mut m = Matrix::from_pattern("### ### ###");
        m.clear_region(5, 5, 3, 3);
        m.clear_region(-10, 0, 3, 3);
        assert_eq!(m.count_dark_modules(), 9);
    }
}

#[cfg(test)]
mod encoder_tests {
    use test_case::test_case;

    use super::{ECLevel, Encoder, QrCodeEncoder};
    use crate::common::QRError;

    #[test_case("https://example.com", ECLevel::L)]
    #[test_case("https://example.com", ECLevel::H)]
    #[test_case("Hello, world! 🌏", ECLevel::M)]
    #[test_case("1234567890", ECLevel::Q)]
    fn test_encode_is_square(text: &str, ecl: ECLevel) {
        let matrix = QrCodeEncoder.encode(text, ecl).unwrap();
        let w = matrix.width();
        assert!(w >= 21 && (w - 21) % 4 == 0, "Unexpected width {w}");
        assert_eq!(matrix.rows().count(), w);
        // Top-left finder pattern corner is always dark
        assert!(matrix.get(0, 0));
        assert!(matrix.get(6, 6));
        assert!(!matrix.get(7, 7));
    }

    #[test]
    fn test_higher_ec_is_not_smaller() {
        let low = QrCodeEncoder.encode("https://example.com", ECLevel::L).unwrap();
        let high = QrCodeEncoder.encode("https://example.com", ECLevel::H).unwrap();
        assert!(high.width() >= low.width());
    }

    #[test]
    fn test_empty_data() {
        assert!(matches!(QrCodeEncoder.encode("", ECLevel::H), Err(QRError::EmptyData)));
    }

    #[test]
    fn test_data_too_long() {
        let data = "1234567890".repeat(400);
        assert!(matches!(QrCodeEncoder.encode(&data, ECLevel::H), Err(QRError::DataTooLong)));
    }
}
