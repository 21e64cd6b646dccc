//! Graphics rendering functions
//!
//! This module provides functions for drawing shapes on images:
//! - Lines (straight, with variable width)
//! - Boxes (rectangle outlines)
//! - Polylines (connected line segments, optionally closed)
//!
//! Shapes are first generated as point arrays ([`Pta`]) and then rendered
//! onto a [`PixMut`]; points outside the image are clipped.

use super::{PixMut, PixelDepth};
use crate::box_::Box;
use crate::error::{Error, Result};
use crate::pta::Pta;

/// RGB color for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black color
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    /// White color
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };
    /// Red color
    pub const RED: Color = Color { r: 255, g: 0, b: 0 };
    /// Green color (pure green channel)
    pub const GREEN: Color = Color { r: 0, g: 255, b: 0 };
    /// Blue color
    pub const BLUE: Color = Color { r: 0, g: 0, b: 255 };
    /// Cyan color
    pub const CYAN: Color = Color {
        r: 0,
        g: 255,
        b: 255,
    };
    /// Magenta color
    pub const MAGENTA: Color = Color {
        r: 255,
        g: 0,
        b: 255,
    };
    /// Yellow color
    pub const YELLOW: Color = Color {
        r: 255,
        g: 255,
        b: 0,
    };

    /// Convert to grayscale value (0-255)
    pub fn to_gray(&self) -> u8 {
        ((self.r as u32 + self.g as u32 + self.b as u32) / 3) as u8
    }

    /// Compose as 32-bit RGBA pixel
    pub fn to_pixel32(&self) -> u32 {
        crate::color::compose_rgb(self.r, self.g, self.b)
    }

    /// Mix `self` over `base` with opacity `fract` (0.0 keeps `base`).
    pub fn blend_over(&self, base: (u8, u8, u8), fract: f32) -> (u8, u8, u8) {
        let fract = fract.clamp(0.0, 1.0);
        let mix = |under: u8, over: u8| -> u8 {
            ((1.0 - fract) * under as f32 + fract * over as f32).round() as u8
        };
        (
            mix(base.0, self.r),
            mix(base.1, self.g),
            mix(base.2, self.b),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// =============================================================================
// Point array generation helpers
// =============================================================================

/// Generate a point array for a line using Bresenham's integer algorithm.
///
/// The line connects `(x1, y1)` to `(x2, y2)` with 8-connectivity.
pub fn generate_line_pta(x1: i32, y1: i32, x2: i32, y2: i32) -> Pta {
    if x1 == x2 && y1 == y2 {
        let mut pta = Pta::with_capacity(1);
        pta.push(x1 as f32, y1 as f32);
        return pta;
    }

    let dx = (x2 - x1).abs();
    let dy = (y2 - y1).abs();
    let sx = if x2 > x1 { 1i32 } else { -1 };
    let sy = if y2 > y1 { 1i32 } else { -1 };

    let npts = dx.max(dy) + 1;
    let mut pta = Pta::with_capacity(npts as usize);

    let mut x = x1;
    let mut y = y1;

    if dx >= dy {
        let mut err = dx / 2;
        for _ in 0..npts {
            pta.push(x as f32, y as f32);
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy / 2;
        for _ in 0..npts {
            pta.push(x as f32, y as f32);
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }

    pta
}

/// Generate a point array for a line with specified width.
///
/// For width > 1, parallel lines are added alternately on both sides.
pub fn generate_wide_line_pta(x1: i32, y1: i32, x2: i32, y2: i32, width: u32) -> Pta {
    let width = width.max(1);
    let base = generate_line_pta(x1, y1, x2, y2);
    if width == 1 {
        return base;
    }

    let mut result = Pta::with_capacity(base.len() * width as usize);
    result.extend(&base);

    let is_horizontal = (x2 - x1).abs() > (y2 - y1).abs();
    for i in 1..width {
        let offset = (i + 1).div_ceil(2) as i32;
        let offset = if i % 2 == 1 { -offset } else { offset };
        let parallel = if is_horizontal {
            generate_line_pta(x1, y1 + offset, x2, y2 + offset)
        } else {
            generate_line_pta(x1 + offset, y1, x2 + offset, y2)
        };
        result.extend(&parallel);
    }

    result
}

/// Generate a point array for a box outline.
pub fn generate_box_pta(b: &Box, width: u32) -> Pta {
    let width = width.max(1);
    let (x, y, w, h) = (b.x, b.y, b.w, b.h);
    if w <= 0 || h <= 0 {
        return Pta::new();
    }

    let half_w = (width / 2) as i32;
    let mut result = Pta::with_capacity((2 * (w + h) * width as i32) as usize);

    // top and bottom span the corners
    result.extend(&generate_wide_line_pta(
        x - half_w,
        y,
        x + w - 1 + half_w,
        y,
        width,
    ));
    result.extend(&generate_wide_line_pta(
        x - half_w,
        y + h - 1,
        x + w - 1 + half_w,
        y + h - 1,
        width,
    ));

    if h > 2 + 2 * half_w {
        result.extend(&generate_wide_line_pta(
            x,
            y + 1 + half_w,
            x,
            y + h - 2 - half_w,
            width,
        ));
        result.extend(&generate_wide_line_pta(
            x + w - 1,
            y + 1 + half_w,
            x + w - 1,
            y + h - 2 - half_w,
            width,
        ));
    }

    result
}

/// Generate a point array for a polyline connecting vertices.
///
/// If `close` is true, the last vertex is connected back to the first.
pub fn generate_polyline_pta(vertices: &Pta, width: u32, close: bool) -> Pta {
    let n = vertices.len();
    if n < 2 {
        return Pta::new();
    }

    let mut result = Pta::new();
    let mut segment = |a: (f32, f32), b: (f32, f32)| {
        result.extend(&generate_wide_line_pta(
            a.0 as i32, a.1 as i32, b.0 as i32, b.1 as i32, width,
        ));
    };

    for (a, b) in vertices.iter().zip(vertices.iter().skip(1)) {
        segment(a, b);
    }
    if close && let (Some(last), Some(first)) = (vertices.get(n - 1), vertices.get(0)) {
        segment(last, first);
    }

    result
}

// =============================================================================
// PixMut rendering implementations
// =============================================================================

impl PixMut {
    fn pta_targets<'a>(&self, pta: &'a Pta) -> impl Iterator<Item = (u32, u32)> + 'a {
        let (w, h) = (self.width() as i32, self.height() as i32);
        pta.iter().filter_map(move |(x, y)| {
            let (xi, yi) = (x as i32, y as i32);
            (xi >= 0 && xi < w && yi >= 0 && yi < h).then_some((xi as u32, yi as u32))
        })
    }

    /// Render a point array with a specific RGB color.
    ///
    /// For non-32bpp images, the color is converted to grayscale.
    pub fn render_pta_color(&mut self, pta: &Pta, color: Color) -> Result<()> {
        let pixel_val = match self.depth() {
            PixelDepth::Bit1 => 1u32,
            PixelDepth::Bit8 => color.to_gray() as u32,
            PixelDepth::Bit16 => {
                let g = color.to_gray() as u32;
                (g << 8) | g
            }
            PixelDepth::Bit32 => color.to_pixel32(),
        };
        for (x, y) in self.pta_targets(pta).collect::<Vec<_>>() {
            self.set_pixel_unchecked(x, y, pixel_val);
        }
        Ok(())
    }

    /// Render a point array with alpha blending (32bpp only).
    ///
    /// `fract` is the blend fraction: 1.0 = fully opaque, 0.0 = fully transparent.
    pub fn render_pta_blend(&mut self, pta: &Pta, color: Color, fract: f32) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        for (x, y) in self.pta_targets(pta).collect::<Vec<_>>() {
            let current = crate::color::extract_rgb(self.get_pixel_unchecked(x, y));
            let (r, g, b) = color.blend_over(current, fract);
            self.set_pixel_unchecked(x, y, crate::color::compose_rgb(r, g, b));
        }
        Ok(())
    }

    /// Render a line with a specific color.
    pub fn render_line_color(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        width: u32,
        color: Color,
    ) -> Result<()> {
        let pta = generate_wide_line_pta(x1, y1, x2, y2, width.max(1));
        self.render_pta_color(&pta, color)
    }

    /// Render a box with a specific color.
    pub fn render_box_color(&mut self, b: &Box, width: u32, color: Color) -> Result<()> {
        let pta = generate_box_pta(b, width.max(1));
        self.render_pta_color(&pta, color)
    }

    /// Render a polyline with a specific color.
    pub fn render_polyline_color(
        &mut self,
        vertices: &Pta,
        width: u32,
        color: Color,
        close: bool,
    ) -> Result<()> {
        let pta = generate_polyline_pta(vertices, width.max(1), close);
        self.render_pta_color(&pta, color)
    }
}
