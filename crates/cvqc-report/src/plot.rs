//! Raster line plot of the intensity histograms
//!
//! One polyline per image over a shared pair of axes. The x axis spans
//! the intensity domain of the image depth (`0..=256` for 8 bpp), the y
//! axis spans `0..=max count` over all images.

use crate::CvResult;
use crate::histogram::HistogramTable;
use crate::options::PlotOptions;
use cvqc_core::{Color, Pix, PixMut, PixelDepth, Pta};

/// Line colors cycled over the images
pub const PLOT_COLORS: [Color; 7] = [
    Color::RED,
    Color::GREEN,
    Color::BLUE,
    Color::CYAN,
    Color::MAGENTA,
    Color::YELLOW,
    Color::BLACK,
];

struct Axes {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
    x_domain: f64,
    y_domain: f64,
}

impl Axes {
    fn point(&self, intensity: u32, count: u64) -> (f32, f32) {
        let span_x = f64::from(self.right - self.left);
        let span_y = f64::from(self.bottom - self.top);
        let x = f64::from(self.left) + (f64::from(intensity) / self.x_domain * span_x).round();
        let y = if self.y_domain > 0.0 {
            f64::from(self.bottom) - (count as f64 / self.y_domain * span_y).round()
        } else {
            f64::from(self.bottom)
        };
        (x as f32, y as f32)
    }
}

/// Render the histogram tables as a 32 bpp line plot
///
/// The line of table `i` is drawn in `PLOT_COLORS[i % PLOT_COLORS.len()]`,
/// so colors follow stack order (red, green, blue, cyan, magenta, yellow,
/// black, then red again). No legend is rendered; a reader maps a color
/// back to its image through that order.
///
/// An empty table contributes no line; the axes are always drawn.
pub fn render_histogram_plot(tables: &[HistogramTable], options: &PlotOptions) -> CvResult<Pix> {
    let (left, top, right, bottom) = options.plot_area()?;
    let max_intensity = tables.iter().map(|t| t.max_intensity).max().unwrap_or(255);
    let axes = Axes {
        left,
        top,
        right,
        bottom,
        x_domain: f64::from(max_intensity) + 1.0,
        y_domain: tables.iter().map(|t| t.max_count()).max().unwrap_or(0) as f64,
    };

    let mut canvas = PixMut::new(options.width, options.height, PixelDepth::Bit32)?;
    canvas.set_all(Color::WHITE.to_pixel32());
    draw_axes(&mut canvas, &axes)?;

    for (i, table) in tables.iter().enumerate() {
        let color = PLOT_COLORS[i % PLOT_COLORS.len()];
        let vertices: Pta = table.iter().map(|(v, c)| axes.point(v, c)).collect();
        match vertices.len() {
            0 => {}
            1 => canvas.render_pta_color(&vertices, color)?,
            _ => canvas.render_polyline_color(&vertices, options.line_width, color, false)?,
        }
    }
    log::debug!(
        "histogram plot: {} line(s), x domain {}, y domain {}",
        tables.len(),
        axes.x_domain,
        axes.y_domain
    );

    Ok(canvas.into())
}

fn draw_axes(canvas: &mut PixMut, axes: &Axes) -> CvResult<()> {
    let (left, top, right, bottom) = (
        axes.left as i32,
        axes.top as i32,
        axes.right as i32,
        axes.bottom as i32,
    );
    canvas.render_line_color(left, top, left, bottom, 1, Color::BLACK)?;
    canvas.render_line_color(left, bottom, right, bottom, 1, Color::BLACK)?;

    // Ticks at every eighth of the intensity domain
    for k in 0..=8 {
        let x = left + (f64::from(right - left) * f64::from(k) / 8.0).round() as i32;
        canvas.render_line_color(x, bottom, x, bottom + 4, 1, Color::BLACK)?;
    }
    Ok(())
}
