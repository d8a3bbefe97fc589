//! Primitive accumulator with scoped coordinate frames.
//!
//! Drawing calls take coordinates in the current local frame and record
//! primitives in page coordinates. [`Canvas::with_transform`] enters a nested
//! frame for the duration of a closure and restores the outer frame when the
//! closure returns, so no frame can leak from one element into the next.

use fresnel_geometry::primitives::{
    FillCircle, FillRect, Ink, Primitive, StrokeCircle, StrokeRect, TextRun,
};
use fresnel_geometry::transform::Transform;

use crate::font_metrics::{text_width, HELVETICA};

/// Accumulates primitives for a page or a single element.
#[derive(Debug, Clone)]
pub struct Canvas {
    transform: Transform,
    ink: Ink,
    primitives: Vec<Primitive>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(Ink::Black)
    }
}

impl Canvas {
    /// An empty canvas drawing with `ink` in page coordinates.
    pub fn new(ink: Ink) -> Self {
        Self {
            transform: Transform::default(),
            ink,
            primitives: Vec::new(),
        }
    }

    pub fn ink(&self) -> Ink {
        self.ink
    }

    /// The current local-to-page transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Run `draw` with `local` applied inside the current frame.
    pub fn with_transform<T>(&mut self, local: &Transform, draw: impl FnOnce(&mut Canvas) -> T) -> T {
        let outer = self.transform.clone();
        self.transform = local.then(&outer);
        let result = draw(self);
        self.transform = outer;
        result
    }

    /// Run `draw` with the origin moved to `(dx, dy)`.
    pub fn translated<T>(&mut self, dx: f64, dy: f64, draw: impl FnOnce(&mut Canvas) -> T) -> T {
        self.with_transform(&Transform::translation(dx, dy), draw)
    }

    /// Run `draw` with the frame rotated counter-clockwise by `degrees`.
    pub fn rotated<T>(&mut self, degrees: f64, draw: impl FnOnce(&mut Canvas) -> T) -> T {
        self.with_transform(&Transform::rotation_degrees(degrees), draw)
    }

    pub fn stroke_circle(&mut self, centre: [f64; 2], radius: f64, stroke_width: f64) {
        self.primitives.push(Primitive::StrokeCircle(StrokeCircle {
            centre: self.transform.apply(&centre),
            radius,
            stroke_width,
            ink: self.ink,
        }));
    }

    pub fn fill_circle(&mut self, centre: [f64; 2], radius: f64) {
        self.primitives.push(Primitive::FillCircle(FillCircle {
            centre: self.transform.apply(&centre),
            radius,
            ink: self.ink,
        }));
    }

    /// Outline an axis-aligned rectangle. Only valid in unrotated frames.
    pub fn stroke_rect(&mut self, origin: [f64; 2], size: [f64; 2], stroke_width: f64) {
        self.primitives.push(Primitive::StrokeRect(StrokeRect {
            origin: self.transform.apply(&origin),
            size,
            stroke_width,
            ink: self.ink,
        }));
    }

    /// Fill an axis-aligned rectangle with `ink`. Only valid in unrotated frames.
    pub fn fill_rect(&mut self, origin: [f64; 2], size: [f64; 2], ink: Ink) {
        self.primitives.push(Primitive::FillRect(FillRect {
            origin: self.transform.apply(&origin),
            size,
            ink,
        }));
    }

    /// Set Helvetica text with its baseline starting at `origin`.
    pub fn text(&mut self, origin: [f64; 2], content: impl Into<String>, size: f64) {
        self.primitives.push(Primitive::Text(TextRun {
            origin: self.transform.apply(&origin),
            content: content.into(),
            font: HELVETICA.to_string(),
            size,
            ink: self.ink,
        }));
    }

    /// Set Helvetica text horizontally centred on `centre`.
    pub fn centred_text(&mut self, centre: [f64; 2], content: impl Into<String>, size: f64) {
        let content = content.into();
        let half = text_width(&content, size) / 2.0;
        self.text([centre[0] - half, centre[1]], content, size);
    }

    /// Append primitives that are already in page coordinates.
    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(primitives);
    }

    /// Drop everything drawn so far; the frame and ink are kept.
    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Consume the canvas, returning the recorded primitives in order.
    pub fn finish(self) -> Vec<Primitive> {
        self.primitives
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn centre_of(p: &Primitive) -> [f64; 2] {
        match p {
            Primitive::StrokeCircle(c) => c.centre,
            Primitive::FillCircle(c) => c.centre,
            other => panic!("not a circle: {other:?}"),
        }
    }

    #[test]
    fn test_scoped_transform_is_restored() {
        let mut canvas = Canvas::default();
        canvas.translated(10.0, 20.0, |c| {
            c.fill_circle([1.0, 0.0], 0.5);
        });
        canvas.fill_circle([1.0, 0.0], 0.5);

        let prims = canvas.finish();
        assert_eq!(centre_of(&prims[0]), [11.0, 20.0]);
        assert_eq!(centre_of(&prims[1]), [1.0, 0.0]);
    }

    #[test]
    fn test_nested_rotation_inside_translation() {
        let mut canvas = Canvas::default();
        canvas.translated(100.0, 50.0, |c| {
            c.rotated(90.0, |c| c.fill_circle([2.0, 0.0], 0.1));
            c.fill_circle([2.0, 0.0], 0.1);
        });
        let prims = canvas.finish();
        let rotated = centre_of(&prims[0]);
        assert_abs_diff_eq!(rotated[0], 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rotated[1], 52.0, epsilon = 1e-12);
        assert_eq!(centre_of(&prims[1]), [102.0, 50.0]);
    }

    #[test]
    fn test_centred_text_offsets_by_half_width() {
        let mut canvas = Canvas::default();
        canvas.centred_text([50.0, 10.0], "0000", 1.0);
        let Primitive::Text(run) = &canvas.primitives()[0] else {
            panic!("expected text");
        };
        // four digits at 0.556 em each
        assert_abs_diff_eq!(run.origin[0], 50.0 - 1.112, epsilon = 1e-12);
        assert_eq!(run.font, HELVETICA);
    }

    #[test]
    fn test_primitives_carry_canvas_ink() {
        let mut canvas = Canvas::new(Ink::White);
        canvas.stroke_circle([0.0, 0.0], 1.0, 0.1);
        assert_eq!(canvas.primitives()[0].ink(), Ink::White);
    }
}
