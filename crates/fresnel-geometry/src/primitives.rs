//! Vector drawing primitives.
//!
//! A page is an ordered list of [`Primitive`]s in page coordinates:
//! millimetres, origin at the bottom-left corner, y pointing up. The list is
//! handed unchanged to an external rasteriser, so the serialised form is part
//! of the output contract.

use serde::{Deserialize, Serialize};

/// Colour of a mark on the film.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ink {
    #[default]
    Black,
    White,
}

impl Ink {
    /// The opposite ink, used for negative film.
    pub fn inverted(self) -> Self {
        match self {
            Ink::Black => Ink::White,
            Ink::White => Ink::Black,
        }
    }
}

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    StrokeCircle(StrokeCircle),
    FillCircle(FillCircle),
    StrokeRect(StrokeRect),
    FillRect(FillRect),
    Text(TextRun),
}

/// A circle outline. The stroke is centred on the radius, so a stroke of
/// width `w` covers `radius - w/2 ..= radius + w/2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeCircle {
    /// Centre position (mm).
    pub centre: [f64; 2],
    /// Radius (mm).
    pub radius: f64,
    /// Stroke width (mm).
    pub stroke_width: f64,
    pub ink: Ink,
}

/// A solid disc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillCircle {
    /// Centre position (mm).
    pub centre: [f64; 2],
    /// Radius (mm).
    pub radius: f64,
    pub ink: Ink,
}

/// An axis-aligned rectangle outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeRect {
    /// Lower-left corner (mm).
    pub origin: [f64; 2],
    /// Width and height (mm).
    pub size: [f64; 2],
    /// Stroke width (mm).
    pub stroke_width: f64,
    pub ink: Ink,
}

/// A solid axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillRect {
    /// Lower-left corner (mm).
    pub origin: [f64; 2],
    /// Width and height (mm).
    pub size: [f64; 2],
    pub ink: Ink,
}

/// A horizontal run of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// Start of the baseline (mm).
    pub origin: [f64; 2],
    pub content: String,
    /// Font name as understood by the rasteriser.
    pub font: String,
    /// Font size (mm).
    pub size: f64,
    pub ink: Ink,
}

impl Primitive {
    /// The ink this primitive is drawn with.
    pub fn ink(&self) -> Ink {
        match self {
            Primitive::StrokeCircle(c) => c.ink,
            Primitive::FillCircle(c) => c.ink,
            Primitive::StrokeRect(r) => r.ink,
            Primitive::FillRect(r) => r.ink,
            Primitive::Text(t) => t.ink,
        }
    }

    /// Text content, if this is a text run.
    pub fn text(&self) -> Option<&str> {
        match self {
            Primitive::Text(t) => Some(&t.content),
            _ => None,
        }
    }

    /// Axis-aligned bounding box: returns (min_corner, max_corner).
    ///
    /// Text runs report only their baseline origin since glyph extents are
    /// resolved by the rasteriser.
    pub fn bounding_box(&self) -> ([f64; 2], [f64; 2]) {
        match self {
            Primitive::StrokeCircle(c) => {
                let r = c.radius + c.stroke_width / 2.0;
                (
                    [c.centre[0] - r, c.centre[1] - r],
                    [c.centre[0] + r, c.centre[1] + r],
                )
            }
            Primitive::FillCircle(c) => (
                [c.centre[0] - c.radius, c.centre[1] - c.radius],
                [c.centre[0] + c.radius, c.centre[1] + c.radius],
            ),
            Primitive::StrokeRect(r) => {
                let half = r.stroke_width / 2.0;
                (
                    [r.origin[0] - half, r.origin[1] - half],
                    [
                        r.origin[0] + r.size[0] + half,
                        r.origin[1] + r.size[1] + half,
                    ],
                )
            }
            Primitive::FillRect(r) => (
                r.origin,
                [r.origin[0] + r.size[0], r.origin[1] + r.size[1]],
            ),
            Primitive::Text(t) => (t.origin, t.origin),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_circle_bounds_include_stroke() {
        let p = Primitive::StrokeCircle(StrokeCircle {
            centre: [10.0, 20.0],
            radius: 5.0,
            stroke_width: 2.0,
            ink: Ink::Black,
        });
        let (min, max) = p.bounding_box();
        assert_eq!(min, [4.0, 14.0]);
        assert_eq!(max, [16.0, 26.0]);
    }

    #[test]
    fn test_ink_inversion() {
        assert_eq!(Ink::Black.inverted(), Ink::White);
        assert_eq!(Ink::White.inverted().inverted(), Ink::White);
    }

    #[test]
    fn test_serialised_tag() {
        let p = Primitive::FillCircle(FillCircle {
            centre: [0.0, 0.0],
            radius: 1.0,
            ink: Ink::White,
        });
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"type\":\"fill_circle\""), "{json}");
        assert!(json.contains("\"ink\":\"white\""), "{json}");
    }
}
