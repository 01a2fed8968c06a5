//! Logo placement model.
//!
//! The three sliders (size, x, y) run over `10..=100` and `0..=100`, but values are stored as
//! given and never snapped into those ranges. They map onto overlay geometry in the rendered
//! image's pixel space:
//!
//! - `width = height = size`, independent of the matrix module count, so a size of 50 is
//!   always a 50px logo on a 200px code.
//! - `offset = 2 * pos - size`, which lets the logo travel across the whole code.
//!
//! In [`PlacementMode::Free`] nothing is clamped. Extreme values put the logo partly or fully
//! outside the code and it gets cropped by the view box. [`PlacementMode::Clamped`] keeps it
//! inside instead.

use serde::Deserialize;

/// Slider bounds. Informational only, [`Placement`] accepts anything.
pub const MIN_LOGO_SIZE: u8 = 10;
pub const MAX_LOGO_SIZE: u8 = 100;
pub const MAX_LOGO_POS: u8 = 100;
pub const DEFAULT_LOGO_SIZE: u8 = 50;
pub const DEFAULT_LOGO_POS: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    size: u8,
    x: u8,
    y: u8,
}

impl Default for Placement {
    fn default() -> Self {
        Self { size: DEFAULT_LOGO_SIZE, x: DEFAULT_LOGO_POS, y: DEFAULT_LOGO_POS }
    }
}

impl Placement {
    pub fn new(size: u8, x: u8, y: u8) -> Self {
        Self { size, x, y }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn set_size(&mut self, size: u8) -> &mut Self {
        self.size = size;
        self
    }

    pub fn set_x(&mut self, x: u8) -> &mut Self {
        self.x = x;
        self
    }

    pub fn set_y(&mut self, y: u8) -> &mut Self {
        self.y = y;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementMode {
    #[default]
    Free,
    Clamped,
}

/// Overlay box in display pixels. Offsets are the top-left corner and may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayGeometry {
    pub width: u32,
    pub height: u32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl OverlayGeometry {
    /// Shrinks the box to fit and shifts it so it lies within `[0, display_size]` on both axes.
    pub fn clamp_to(self, display_size: u32) -> Self {
        let width = self.width.min(display_size);
        let height = self.height.min(display_size);
        let max_x = (display_size - width) as i32;
        let max_y = (display_size - height) as i32;
        Self {
            width,
            height,
            offset_x: self.offset_x.clamp(0, max_x),
            offset_y: self.offset_y.clamp(0, max_y),
        }
    }

    pub fn is_within(&self, display_size: u32) -> bool {
        self.offset_x >= 0
            && self.offset_y >= 0
            && self.offset_x as i64 + self.width as i64 <= display_size as i64
            && self.offset_y as i64 + self.height as i64 <= display_size as i64
    }
}

pub fn compute_geometry(placement: Placement, display_size: u32, mode: PlacementMode) -> OverlayGeometry {
    let size = placement.size as i32;
    let geometry = OverlayGeometry {
        width: placement.size as u32,
        height: placement.size as u32,
        offset_x: 2 * placement.x as i32 - size,
        offset_y: 2 * placement.y as i32 - size,
    };

    match mode {
        PlacementMode::Free => geometry,
        PlacementMode::Clamped => geometry.clamp_to(display_size),
    }
}

#[cfg(test)]
mod placement_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::{compute_geometry, OverlayGeometry, Placement, PlacementMode};

    #[test]
    fn test_default() {
        let p = Placement::default();
        assert_eq!((p.size(), p.x(), p.y()), (50, 50, 50));
    }

    #[test_case(5, 0, 0 => (5, 0, 0); "size below slider minimum")]
    #[test_case(150, 101, 255 => (150, 101, 255); "all above slider maximum")]
    #[test_case(70, 20, 80 => (70, 20, 80); "in range")]
    fn test_values_kept_as_given(size: u8, x: u8, y: u8) -> (u8, u8, u8) {
        let p = Placement::new(size, x, y);
        (p.size(), p.x(), p.y())
    }

    #[test]
    fn test_setters_keep_out_of_range_values() {
        let mut p = Placement::default();
        p.set_size(0).set_x(200).set_y(101);
        assert_eq!((p.size(), p.x(), p.y()), (0, 200, 101));
    }

    #[test_case(50, 50, 50 => (50, 50, 50, 50); "default is centred")]
    #[test_case(50, 0, 0 => (50, 50, -50, -50); "top left bleeds off")]
    #[test_case(50, 100, 100 => (50, 50, 150, 150); "bottom right bleeds off")]
    #[test_case(10, 0, 100 => (10, 10, -10, 190); "small corners")]
    #[test_case(100, 50, 50 => (100, 100, 0, 0); "full size")]
    #[test_case(100, 0, 0 => (100, 100, -100, -100); "full size fully outside")]
    #[test_case(5, 120, 0 => (5, 5, 235, -5); "raw values outside slider ranges")]
    #[test_case(255, 255, 0 => (255, 255, 255, -255); "oversized logo")]
    fn test_free_geometry(size: u8, x: u8, y: u8) -> (u32, u32, i32, i32) {
        let g = compute_geometry(Placement::new(size, x, y), 200, PlacementMode::Free);
        (g.width, g.height, g.offset_x, g.offset_y)
    }

    #[test]
    fn test_geometry_ignores_display_size_when_free() {
        let p = Placement::new(40, 10, 90);
        assert_eq!(
            compute_geometry(p, 200, PlacementMode::Free),
            compute_geometry(p, 1000, PlacementMode::Free)
        );
    }

    #[test_case(50, 0, 0 => (0, 0); "pulled in from top left")]
    #[test_case(50, 100, 100 => (150, 150); "pulled in from bottom right")]
    #[test_case(50, 50, 50 => (50, 50); "untouched")]
    fn test_clamped_geometry(size: u8, x: u8, y: u8) -> (i32, i32) {
        let g = compute_geometry(Placement::new(size, x, y), 200, PlacementMode::Clamped);
        assert!(g.is_within(200));
        (g.offset_x, g.offset_y)
    }

    #[test]
    fn test_clamp_shrinks_to_display() {
        let g = OverlayGeometry { width: 100, height: 100, offset_x: -10, offset_y: 20 }.clamp_to(60);
        assert_eq!(g, OverlayGeometry { width: 60, height: 60, offset_x: 0, offset_y: 0 });
    }

    #[test]
    fn test_is_within() {
        let g = OverlayGeometry { width: 50, height: 50, offset_x: -50, offset_y: -50 };
        assert!(!g.is_within(200));
        let g = OverlayGeometry { width: 50, height: 50, offset_x: 150, offset_y: 0 };
        assert!(g.is_within(200));
    }

    proptest! {
        #[test]
        fn proptest_deterministic(size in 10u8..=100, x in 0u8..=100, y in 0u8..=100) {
            let p = Placement::new(size, x, y);
            prop_assert_eq!(
                compute_geometry(p, 200, PlacementMode::Free),
                compute_geometry(p, 200, PlacementMode::Free)
            );
        }

        #[test]
        fn proptest_square_and_unclamped(size in any::<u8>(), x in any::<u8>(), y in any::<u8>()) {
            let g = compute_geometry(Placement::new(size, x, y), 200, PlacementMode::Free);
            prop_assert_eq!(g.width, g.height);
            // Far edge always lands on twice the slider value
            prop_assert_eq!(g.offset_x + g.width as i32, 2 * x as i32);
            prop_assert_eq!(g.offset_y + g.height as i32, 2 * y as i32);
        }

        #[test]
        fn proptest_clamped_is_within(
            size in any::<u8>(),
            x in any::<u8>(),
            y in any::<u8>(),
            display in 10u32..400
        ) {
            let g = compute_geometry(Placement::new(size, x, y), display, PlacementMode::Clamped);
            prop_assert!(g.is_within(display));
        }
    }
}
