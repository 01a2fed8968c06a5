mod studio;

pub use studio::{Preview, Studio, EMPTY_PLACEHOLDER, RENDER_FAILED};

use crate::common::Color;
use crate::logo::Logo;
use crate::placement::Placement;

// Session
//------------------------------------------------------------------------------

/// Everything the user has entered during one editing session. Every setter bumps the
/// revision, so observers can tell that the rendered output is out of date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    text: String,
    fg: Color,
    bg: Color,
    logo: Option<Logo>,
    placement: Placement,
    revision: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            text: String::new(),
            fg: Color::foreground(),
            bg: Color::background(),
            logo: None,
            placement: Placement::default(),
            revision: 0,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn foreground(&self) -> &Color {
        &self.fg
    }

    pub fn background(&self) -> &Color {
        &self.bg
    }

    pub fn logo(&self) -> Option<&Logo> {
        self.logo.as_ref()
    }

    /// Only meaningful while a logo is set.
    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.touch();
    }

    pub fn set_foreground(&mut self, color: Color) {
        self.fg = color;
        self.touch();
    }

    pub fn set_background(&mut self, color: Color) {
        self.bg = color;
        self.touch();
    }

    /// Replacing one logo with another keeps the current placement. Removing it resets
    /// placement so the next logo starts from the defaults.
    pub fn set_logo(&mut self, logo: Option<Logo>) {
        if logo.is_none() {
            self.placement = Placement::default();
        }
        self.logo = logo;
        self.touch();
    }

    pub fn remove_logo(&mut self) {
        self.set_logo(None);
    }

    pub fn set_logo_size(&mut self, size: u8) {
        self.placement.set_size(size);
        self.touch();
    }

    pub fn set_logo_x(&mut self, x: u8) {
        self.placement.set_x(x);
        self.touch();
    }

    pub fn set_logo_y(&mut self, y: u8) {
        self.placement.set_y(y);
        self.touch();
    }

    /// Resets text, logo and both colours in a single step.
    pub fn clear(&mut self) {
        self.text.clear();
        self.fg = Color::foreground();
        self.bg = Color::background();
        self.logo = None;
        self.placement = Placement::default();
        self.touch();
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
