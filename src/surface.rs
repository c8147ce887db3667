//! Drawing abstraction between the simulation and whatever displays it.

/// Stroke style in HSLA, matching how the entities pick their colours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Degrees, any value; wrapped when converted to RGB.
    pub hue: f32,
    /// Percent, 0-100.
    pub saturation: f32,
    /// Percent, 0-100.
    pub lightness: f32,
    /// 0-1.
    pub alpha: f32,
}

impl Stroke {
    pub fn hsl(hue: f32, lightness: f32) -> Self {
        Self::hsla(hue, lightness, 1.0)
    }

    pub fn hsla(hue: f32, lightness: f32, alpha: f32) -> Self {
        Self {
            hue,
            saturation: 100.0,
            lightness,
            alpha,
        }
    }
}

/// Anything the engine can draw on.
pub trait Surface {
    /// Straight line segment between two points.
    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke);
    /// Circle outline.
    fn ring(&mut self, center: (f32, f32), radius: f32, stroke: Stroke);
    /// Composite a translucent background over the whole surface.
    fn fade(&mut self, alpha: f32);
}

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: (f32, f32),
        to: (f32, f32),
        stroke: Stroke,
    },
    Ring {
        center: (f32, f32),
        radius: f32,
        stroke: Stroke,
    },
    Fade {
        alpha: f32,
    },
}

/// Records draw calls instead of rasterising them.
impl Surface for Vec<DrawCommand> {
    fn line(&mut self, from: (f32, f32), to: (f32, f32), stroke: Stroke) {
        self.push(DrawCommand::Line { from, to, stroke });
    }

    fn ring(&mut self, center: (f32, f32), radius: f32, stroke: Stroke) {
        self.push(DrawCommand::Ring {
            center,
            radius,
            stroke,
        });
    }

    fn fade(&mut self, alpha: f32) {
        self.push(DrawCommand::Fade { alpha });
    }
}
