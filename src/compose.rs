use std::borrow::Cow;

use tracing::debug;

use crate::common::Color;
use crate::encoder::Matrix;
use crate::placement::OverlayGeometry;

/// Quiet zone, in modules, drawn on each side when the margin is enabled.
pub const MARGIN_SIZE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub display_size: u32,
    pub include_margin: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { display_size: 200, include_margin: true }
    }
}

impl RenderOptions {
    pub fn margin(&self) -> usize {
        if self.include_margin {
            MARGIN_SIZE
        } else {
            0
        }
    }
}

/// Image layered on top of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay<'a> {
    pub href: &'a str,
    pub geometry: OverlayGeometry,
    /// Clear the modules under the image before drawing.
    pub excavate: bool,
}

// Document
//------------------------------------------------------------------------------

/// Composed SVG. Cheap to rebuild, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    svg: String,
    view_size: usize,
    has_overlay: bool,
}

impl Document {
    pub fn as_str(&self) -> &str {
        &self.svg
    }

    pub fn into_string(self) -> String {
        self.svg
    }

    /// Side of the view box in modules, margin included.
    pub fn view_size(&self) -> usize {
        self.view_size
    }

    pub fn has_overlay(&self) -> bool {
        self.has_overlay
    }
}

// Compose
//------------------------------------------------------------------------------

/// Overlay box converted from display pixels to module units, relative to the matrix origin.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ImageBox {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl ImageBox {
    fn new(geometry: OverlayGeometry, view_size: usize, display_size: u32) -> Self {
        // Multiply before dividing so integral results stay exact
        let to_modules = |px: f64| px * view_size as f64 / display_size as f64;
        Self {
            x: to_modules(geometry.offset_x as f64),
            y: to_modules(geometry.offset_y as f64),
            w: to_modules(geometry.width as f64),
            h: to_modules(geometry.height as f64),
        }
    }

    /// Module region touched by the image as `(top, left, height, width)`.
    fn excavation(&self) -> (i64, i64, i64, i64) {
        let (fx, fy) = (self.x.floor(), self.y.floor());
        let w = (self.w + self.x - fx).ceil();
        let h = (self.h + self.y - fy).ceil();
        (fy as i64, fx as i64, h as i64, w as i64)
    }
}

pub fn compose(
    matrix: &Matrix,
    foreground: &Color,
    background: &Color,
    overlay: Option<&Overlay>,
    opts: RenderOptions,
) -> Document {
    let margin = opts.margin();
    let n = matrix.width() + 2 * margin;
    let placed = overlay.map(|o| (o, ImageBox::new(o.geometry, n, opts.display_size)));

    let cells = match placed {
        Some((o, img)) if o.excavate => {
            let (top, left, h, w) = img.excavation();
            let mut excavated = matrix.clone();
            excavated.clear_region(top, left, h, w);
            Cow::Owned(excavated)
        }
        _ => Cow::Borrowed(matrix),
    };

    let size = opts.display_size;
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" height="{size}" width="{size}" viewBox="0 0 {n} {n}">"#
    );
    svg.push_str(&format!(
        r#"<path fill="{}" d="M0,0 h{n}v{n}H0z" shape-rendering="crispEdges"/>"#,
        escape_attr(background.as_str())
    ));
    svg.push_str(&format!(
        r#"<path fill="{}" d="{}" shape-rendering="crispEdges"/>"#,
        escape_attr(foreground.as_str()),
        module_path(&cells, margin)
    ));
    if let Some((o, img)) = placed {
        svg.push_str(&format!(
            r#"<image href="{}" height="{}" width="{}" x="{}" y="{}" preserveAspectRatio="none"/>"#,
            escape_attr(o.href),
            fmt_num(img.h),
            fmt_num(img.w),
            fmt_num(img.x + margin as f64),
            fmt_num(img.y + margin as f64),
        ));
    }
    svg.push_str("</svg>");

    debug!(modules = matrix.width(), overlay = placed.is_some(), len = svg.len(), "Composed document");

    Document { svg, view_size: n, has_overlay: placed.is_some() }
}

/// One subpath per horizontal run of dark modules.
fn module_path(matrix: &Matrix, margin: usize) -> String {
    let mut path = String::new();
    let mut push_run = |r: usize, start: usize, len: usize| {
        let (x, y) = (start + margin, r + margin);
        path.push_str(&format!("M{x} {y}h{len}v1H{x}z"));
    };

    for (r, row) in matrix.rows().enumerate() {
        let mut start = None;
        for (c, &dark) in row.iter().enumerate() {
            match (dark, start) {
                (true, None) => start = Some(c),
                (false, Some(s)) => {
                    push_run(r, s, c - s);
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            push_run(r, s, row.len() - s);
        }
    }
    path
}

fn fmt_num(v: f64) -> String {
    let s = format!("{v:.4}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut res = String::with_capacity(s.len() + 8);
    for ch in s.chars() {
        match ch {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&apos;"),
            ch => res.push(ch),
        }
    }
    Cow::Owned(res)
}
