use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use ndarray::{Array2, Axis};
use ndarray_npy::NpzWriter;
use rayon::prelude::*;
use rug::ops::Pow;
use rug::{Assign, Float};

use crate::foundation::error::{ReelError, ReelResult};

/// Parameters of a Mandelbrot zoom sequence.
///
/// Frame `k` shrinks the initial window toward `focus` by `1 - zoom_factor^-k`. Pixels hold
/// `floor(255 * iterations / max_iterations)`. Frame `k` is computed with
/// `32 + floor(k * log2(zoom_factor))` mantissa bits: plain `f64` while that fits, arbitrary
/// precision floats beyond it.
#[derive(Clone, Debug, PartialEq)]
pub struct MandelbrotZoom {
    /// Frame width in pixels (array columns).
    pub width: usize,
    /// Frame height in pixels (array rows).
    pub height: usize,
    /// Number of frames to generate.
    pub frames: usize,
    /// Iteration cap per pixel.
    pub max_iterations: u32,
    /// Zoom multiplier applied per frame.
    pub zoom_factor: f64,
    /// Point the window converges to, `[re, im]`.
    pub focus: [f64; 2],
    /// Lower-left corner of frame 0, `[re, im]`.
    pub lower_left: [f64; 2],
    /// Upper-right corner of frame 0, `[re, im]`.
    pub upper_right: [f64; 2],
}

impl Default for MandelbrotZoom {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            frames: 300,
            max_iterations: 200,
            zoom_factor: 1.15,
            focus: [0.001643721971153, -0.822467633298876],
            lower_left: [-1.5, -1.5],
            upper_right: [1.5, 1.5],
        }
    }
}

const BASE_PRECISION_BITS: u32 = 32;
const CORNER_PRECISION_BITS: u32 = 256;

/// Pixel coordinates of one frame: column reals and row imaginaries.
#[derive(Clone, Debug)]
pub(crate) enum PixelAxes {
    Fast { xs: Vec<f64>, ys: Vec<f64> },
    Precise { precision: u32, xs: Vec<Float>, ys: Vec<Float> },
}

impl MandelbrotZoom {
    /// Check sizes and the zoom factor.
    pub fn validate(&self) -> ReelResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation(
                "mandelbrot width/height must be non-zero",
            ));
        }
        if self.frames == 0 {
            return Err(ReelError::validation("mandelbrot frame count must be non-zero"));
        }
        if self.max_iterations == 0 {
            return Err(ReelError::validation("max_iterations must be non-zero"));
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor < 1.0 {
            return Err(ReelError::validation(
                "zoom_factor must be finite and >= 1",
            ));
        }
        Ok(())
    }

    /// Mantissa bits used for frame `frame`.
    pub fn precision_bits(&self, frame: usize) -> u32 {
        BASE_PRECISION_BITS + ((frame as f64) * self.zoom_factor.log2()) as u32
    }

    /// `f64` window `(lower_left, upper_right)` of frame `frame`. Only exact enough for frames
    /// within `f64` precision.
    pub(crate) fn window(&self, frame: usize) -> ([f64; 2], [f64; 2]) {
        let reduction = 1.0 - self.zoom_factor.powf(-(frame as f64));
        let shift = |corner: [f64; 2]| -> [f64; 2] {
            [
                corner[0] + (self.focus[0] - corner[0]) * reduction,
                corner[1] + (self.focus[1] - corner[1]) * reduction,
            ]
        };
        (shift(self.lower_left), shift(self.upper_right))
    }

    fn window_precise(&self, frame: usize, precision: u32) -> ([Float; 2], [Float; 2]) {
        let corner_bits = precision.max(CORNER_PRECISION_BITS);
        let k = u32::try_from(frame).unwrap_or(u32::MAX);
        let reduction = 1.0 - 1 / Float::with_val(precision, self.zoom_factor).pow(k);
        let shift = |corner: [f64; 2]| -> [Float; 2] {
            [0, 1].map(|a| {
                let start = Float::with_val(corner_bits, corner[a]);
                let delta = Float::with_val(corner_bits, self.focus[a]) - &start;
                start + delta * &reduction
            })
        };
        (shift(self.lower_left), shift(self.upper_right))
    }

    pub(crate) fn pixel_axes(&self, frame: usize) -> PixelAxes {
        let precision = self.precision_bits(frame);
        if precision <= f64::MANTISSA_DIGITS {
            let (ll, ur) = self.window(frame);
            let dx = (ur[0] - ll[0]) / self.width as f64;
            let dy = (ur[1] - ll[1]) / self.height as f64;
            return PixelAxes::Fast {
                xs: (0..self.width).map(|i| ll[0] + dx * i as f64).collect(),
                ys: (0..self.height).map(|j| ll[1] + dy * j as f64).collect(),
            };
        }

        let (ll, ur) = self.window_precise(frame, precision);
        let dx = Float::with_val(precision, &ur[0] - &ll[0]) / self.width as f64;
        let dy = Float::with_val(precision, &ur[1] - &ll[1]) / self.height as f64;
        let axis = |origin: &Float, step: &Float, n: usize| -> Vec<Float> {
            (0..n)
                .map(|i| origin + step * Float::with_val(precision, i as f64))
                .collect()
        };
        PixelAxes::Precise {
            precision,
            xs: axis(&ll[0], &dx, self.width),
            ys: axis(&ll[1], &dy, self.height),
        }
    }

    /// Render frame `frame` as a `height x width` array. Rows are computed in parallel.
    pub fn render_frame(&self, frame: usize) -> Array2<u8> {
        let max_iterations = self.max_iterations;
        match self.pixel_axes(frame) {
            PixelAxes::Fast { xs, ys } => {
                self.fill_rows(|i, j| escape_value(xs[i], ys[j], max_iterations))
            }
            PixelAxes::Precise { precision, xs, ys } => {
                tracing::trace!(frame, precision, "rendering with extended precision");
                self.fill_rows(|i, j| {
                    escape_value_precise(&xs[i], &ys[j], max_iterations, precision)
                })
            }
        }
    }

    fn fill_rows(&self, pixel: impl Fn(usize, usize) -> u8 + Sync) -> Array2<u8> {
        let mut out = Array2::<u8>::zeros((self.height, self.width));
        out.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(j, mut row)| {
                for (i, px) in row.iter_mut().enumerate() {
                    *px = pixel(i, j);
                }
            });
        out
    }

    /// Render every frame and write it to `writer` as an `.npz` archive (`"0"`, `"1"`, ...).
    pub fn write_npz<W: Write + Seek>(&self, writer: W) -> ReelResult<W> {
        self.validate()?;
        let mut npz = NpzWriter::new(writer);
        for frame in 0..self.frames {
            tracing::debug!(frame, total = self.frames, "generating frame");
            let image = self.render_frame(frame);
            npz.add_array(frame.to_string(), &image).map_err(|e| {
                ReelError::encode(format!("failed to write array for frame {frame}: {e}"))
            })?;
        }
        npz.finish()
            .map_err(|e| ReelError::encode(format!("failed to finish npz archive: {e}")))
    }

    /// [`MandelbrotZoom::write_npz`] into a file at `path`.
    #[tracing::instrument(skip_all, fields(path = %path.display(), frames = self.frames))]
    pub fn write_npz_file(&self, path: &Path) -> ReelResult<()> {
        crate::encode::ffmpeg::ensure_parent_dir(path)?;
        let file = File::create(path).map_err(|e| {
            ReelError::encode(format!("failed to create '{}': {e}", path.display()))
        })?;
        let mut writer = self.write_npz(BufWriter::new(file))?;
        writer
            .flush()
            .map_err(|e| ReelError::encode(format!("failed to flush '{}': {e}", path.display())))?;
        tracing::info!("wrote mandelbrot archive");
        Ok(())
    }
}

/// Escape-time value of `c = x + iy`, scaled to `0..=255`.
///
/// Iteration stops once `|z|^2` reaches 2 or `max_iterations` is hit.
pub fn escape_value(x: f64, y: f64, max_iterations: u32) -> u8 {
    let (mut zr, mut zi) = (0.0f64, 0.0f64);
    let mut iterations = 0u32;
    while zr * zr + zi * zi < 2.0 && iterations < max_iterations {
        let next_r = zr * zr - zi * zi + x;
        zi = 2.0 * zr * zi + y;
        zr = next_r;
        iterations += 1;
    }
    scale_iterations(iterations, max_iterations)
}

/// [`escape_value`] carried out with `precision`-bit floats.
pub(crate) fn escape_value_precise(
    x: &Float,
    y: &Float,
    max_iterations: u32,
    precision: u32,
) -> u8 {
    let mut zr = Float::new(precision);
    let mut zi = Float::new(precision);
    let mut zr2 = Float::new(precision);
    let mut zi2 = Float::new(precision);
    let mut norm = Float::new(precision);
    let mut iterations = 0u32;
    while iterations < max_iterations {
        norm.assign(&zr2 + &zi2);
        if norm >= 2.0 {
            break;
        }
        zi *= &zr;
        zi *= 2;
        zi += y;
        zr.assign(&zr2 - &zi2);
        zr += x;
        zr2.assign(zr.square_ref());
        zi2.assign(zi.square_ref());
        iterations += 1;
    }
    scale_iterations(iterations, max_iterations)
}

fn scale_iterations(iterations: u32, max_iterations: u32) -> u8 {
    ((255.0 * f64::from(iterations)) / f64::from(max_iterations)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/data/mandelbrot.rs"]
mod tests;
