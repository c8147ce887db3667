//! Terminal drawing surface.
//!
//! Each terminal cell holds two vertically stacked pixels drawn with the
//! lower-half-block glyph: background colour is the top pixel, foreground
//! colour the bottom one. Pixels persist between frames; only the fade pass
//! dims them, which is what leaves streaks behind moving entities.

use crate::color::hsl_to_rgb;
use crate::surface::{Stroke, Surface};
use std::f32::consts::TAU;
use std::io::{self, Write};

type Rgb = (f32, f32, f32);

pub struct Canvas {
    width: usize,
    height: usize,
    bg_color: (u8, u8, u8),
    pixels: Vec<Rgb>,
    output_buf: Vec<u8>,
}

impl Canvas {
    /// `width` x `height` pixels; a terminal of `cols` x `rows` gives
    /// `cols` x `rows * 2`.
    pub fn new(width: usize, height: usize, bg_color: (u8, u8, u8)) -> Self {
        let bg = to_float(bg_color);
        Self {
            width,
            height,
            bg_color,
            pixels: vec![bg; width * height],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<(u8, u8, u8)> {
        if x < self.width && y < self.height {
            Some(to_bytes(self.pixels[y * self.width + x]))
        } else {
            None
        }
    }

    fn cell(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        if !(x >= 0.0 && y >= 0.0) {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then_some((x, y))
    }

    fn blend(&mut self, (x, y): (usize, usize), color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        let px = &mut self.pixels[y * self.width + x];
        px.0 += (color.0 - px.0) * alpha;
        px.1 += (color.1 - px.1) * alpha;
        px.2 += (color.2 - px.2) * alpha;
    }

    /// Blends each point once, skipping points that land on the pixel
    /// painted just before them.
    fn stroke_points(&mut self, points: impl Iterator<Item = (f32, f32)>, stroke: Stroke) {
        let color = to_float(hsl_to_rgb(&stroke));
        let mut last = None;
        for (x, y) in points {
            let Some(cell) = self.cell(x, y) else {
                continue;
            };
            if last == Some(cell) {
                continue;
            }
            last = Some(cell);
            self.blend(cell, color, stroke.alpha);
        }
    }

    /// Liang-Barsky clip of a segment to the canvas rectangle.
    fn clip(&self, from: (f32, f32), to: (f32, f32)) -> Option<((f32, f32), (f32, f32))> {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        if !(from.0.is_finite() && from.1.is_finite() && dx.is_finite() && dy.is_finite()) {
            return None;
        }

        let (mut t0, mut t1) = (0.0f32, 1.0f32);
        for (p, q) in [
            (-dx, from.0),
            (dx, self.width as f32 - from.0),
            (-dy, from.1),
            (dy, self.height as f32 - from.1),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some((
            (from.0 + dx * t0, from.1 + dy * t0),
            (from.0 + dx * t1, from.1 + dy * t1),
        ))
    }

    /// Encodes the current pixels as ANSI truecolour output and writes it.
    pub fn write_frame(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        // None forces the first cell of each row to emit both colours.
        let mut prev_top: Option<(u8, u8, u8)> = None;
        let mut prev_bot: Option<(u8, u8, u8)> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = to_bytes(self.pixels[y * self.width + x]);
                let bot = if y + 1 < self.height {
                    to_bytes(self.pixels[(y + 1) * self.width + x])
                } else {
                    self.bg_color
                };

                if prev_top != Some(top) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = None;
            prev_bot = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }
}

impl Surface for Canvas {
    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        let Some((from, to)) = self.clip(from, to) else {
            return;
        };
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        // Clipped, so this is bounded by the canvas diagonal.
        let steps = (dx.abs().max(dy.abs()).ceil() as usize).min(self.width + self.height);
        let points = (0..=steps).map(|i| {
            let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            (from.0 + dx * t, from.1 + dy * t)
        });
        self.stroke_points(points, stroke);
    }

    fn ring(&mut self, center: (f32, f32), radius: f32, stroke: Stroke) {
        if !radius.is_finite() {
            return;
        }
        let samples = (TAU * radius)
            .ceil()
            .min(2.0 * (self.width + self.height) as f32)
            .max(8.0) as usize;
        let points = (0..samples).map(|i| {
            let angle = i as f32 / samples as f32 * TAU;
            (center.0 + angle.cos() * radius, center.1 + angle.sin() * radius)
        });
        self.stroke_points(points, stroke);
    }

    fn fade(&mut self, alpha: f32) {
        let bg = to_float(self.bg_color);
        let alpha = alpha.clamp(0.0, 1.0);
        for px in &mut self.pixels {
            px.0 += (bg.0 - px.0) * alpha;
            px.1 += (bg.1 - px.1) * alpha;
            px.2 += (bg.2 - px.2) * alpha;
        }
    }
}

fn to_float(c: (u8, u8, u8)) -> Rgb {
    (c.0 as f32, c.1 as f32, c.2 as f32)
}

fn to_bytes(c: Rgb) -> (u8, u8, u8) {
    (
        c.0.round().clamp(0.0, 255.0) as u8,
        c.1.round().clamp(0.0, 255.0) as u8,
        c.2.round().clamp(0.0, 255.0) as u8,
    )
}
