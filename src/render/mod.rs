//! SVG rendering of per-residue topic scores along a 2D-projected backbone.
//!
//! The trace is linearly upsampled, each short stroke is coloured by its
//! residue's score on a coolwarm scale and faded by its confidence.

mod colormap;
mod error;
mod projection;

pub use colormap::{coolwarm, level};
pub use error::Error;
pub use projection::{best_projection, confidence_opacities};

use plotters::prelude::*;
use plotters_svg::SVGBackend;

/// Layout settings for [`render`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Interpolated points per residue.
    pub upsample_rate: usize,
    /// Canvas height in pixels; the width follows the trace's aspect ratio.
    pub height: u32,
    pub margin: u32,
    pub line_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            upsample_rate: 3,
            height: 500,
            margin: 20,
            line_width: 2,
        }
    }
}

/// Draws the projected trace and returns the SVG document.
///
/// `weights` are scaled by `max_value` into the colour map and
/// `opacities` (0 to 1) fade each residue's strokes.
pub fn render(
    coords: &[[f64; 2]],
    weights: &[f64],
    opacities: &[f64],
    max_value: f64,
    options: &RenderOptions,
) -> Result<String, Error> {
    if coords.len() != weights.len() || coords.len() != opacities.len() {
        return Err(Error::LengthMismatch {
            coords: coords.len(),
            weights: weights.len(),
            opacities: opacities.len(),
        });
    }
    if coords.len() < 2 {
        return Err(Error::TooFewResidues(coords.len()));
    }
    if !(max_value > 0.0 && max_value.is_finite()) {
        return Err(Error::InvalidMaxValue(max_value));
    }
    let rate = options.upsample_rate;
    if rate == 0 {
        return Err(Error::InvalidUpsampleRate);
    }

    let points = upsample(coords, rate);
    let frame = Frame::fit(&points, options.height, options.margin);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (frame.width, frame.height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        for i in 0..points.len() - rate {
            let residue = i / rate;
            let (r, g, b) = coolwarm(level(weights[residue], max_value));
            let style = ShapeStyle {
                color: RGBAColor(r, g, b, opacities[residue].clamp(0.0, 1.0)),
                filled: false,
                stroke_width: options.line_width,
            };
            let segment = vec![frame.pixel(points[i]), frame.pixel(points[i + 1])];
            root.draw(&PathElement::new(segment, style))
                .map_err(draw_error)?;
        }

        root.present().map_err(draw_error)?;
    }

    Ok(svg)
}

/// Linear interpolation to `rate` points per residue.
///
/// Point `k` sits at fractional residue position `k / rate`; positions past
/// the last residue repeat it.
pub fn upsample(coords: &[[f64; 2]], rate: usize) -> Vec<[f64; 2]> {
    let Some(last) = coords.len().checked_sub(1) else {
        return Vec::new();
    };

    (0..coords.len() * rate)
        .map(|k| {
            let pos = k as f64 / rate as f64;
            let lo = (pos.floor() as usize).min(last);
            let hi = (lo + 1).min(last);
            let t = pos - lo as f64;
            if lo == hi {
                coords[lo]
            } else {
                [
                    coords[lo][0] + (coords[hi][0] - coords[lo][0]) * t,
                    coords[lo][1] + (coords[hi][1] - coords[lo][1]) * t,
                ]
            }
        })
        .collect()
}

fn draw_error(e: impl std::fmt::Display) -> Error {
    Error::Draw(e.to_string())
}

/// Maps trace coordinates into pixel space, y pointing up.
struct Frame {
    width: u32,
    height: u32,
    scale: f64,
    min: [f64; 2],
    max_y: f64,
    margin: f64,
}

impl Frame {
    fn fit(points: &[[f64; 2]], height: u32, margin: u32) -> Self {
        let (mut min, mut max) = ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]);
        for p in points {
            for axis in 0..2 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        let span_x = (max[0] - min[0]).max(1e-6);
        let span_y = (max[1] - min[1]).max(1e-6);

        let inner_height = f64::from(height.saturating_sub(2 * margin).max(1));
        let scale = inner_height / span_y;
        let width = (span_x * scale).ceil() as u32 + 2 * margin;

        Self {
            width: width.max(1),
            height: height.max(1),
            scale,
            min,
            max_y: max[1],
            margin: f64::from(margin),
        }
    }

    fn pixel(&self, p: [f64; 2]) -> (i32, i32) {
        let x = self.margin + (p[0] - self.min[0]) * self.scale;
        let y = self.margin + (self.max_y - p[1]) * self.scale;
        (x.round() as i32, y.round() as i32)
    }
}
