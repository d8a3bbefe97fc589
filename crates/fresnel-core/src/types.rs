//! Core types shared across the Fresnel engine.
//!
//! This module defines the element specification supplied by callers, the
//! layout modes, and the containers for rendered output.

use std::fmt;
use std::str::FromStr;

use fresnel_geometry::optics::{ZoneOptics, WAVELENGTH_DAYLIGHT};
use fresnel_geometry::primitives::Primitive;
use fresnel_geometry::sieve::SieveLayout;
use fresnel_geometry::transform::Transform;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest ring count accepted by [`OpticalElementSpec::validate`].
pub const MAX_RINGS: u32 = 50;

/// Accepted focal length range (mm).
pub const FOCAL_LENGTH_RANGE: (f64, f64) = (1.0, 10_000.0);

/// A single failed field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised while checking caller input.
#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Invalid element specification: {}", join_field_errors(.0))]
    Invalid(Vec<FieldError>),

    #[error("Unknown layout mode '{0}'. Valid modes: GRID, PLATE, SIEVE, PHOTON")]
    UnknownMode(String),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Optical and print parameters for one diagram. Immutable per render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpticalElementSpec {
    /// Focal length (mm).
    pub focal_length: f64,
    /// Design wavelength (mm).
    pub wavelength: f64,
    /// Number of opaque rings.
    pub rings: u32,
    /// Print magnification.
    pub magnification: f64,
    /// Diameter of the punch outline before magnification (mm).
    pub punch_diameter: f64,
    /// Sieve hole diameter as a multiple of the zone width.
    pub sieve_scale: f64,
    /// Gap between neighbouring sieve holes (mm).
    pub sieve_spacing: f64,
    /// Focal length of the duplicating camera (mm).
    pub camera_focal_length: f64,
}

impl Default for OpticalElementSpec {
    fn default() -> Self {
        Self {
            focal_length: 210.0,
            wavelength: WAVELENGTH_DAYLIGHT,
            rings: 7,
            magnification: 1.0,
            punch_diameter: 20.0,
            sieve_scale: 1.5,
            sieve_spacing: 0.04,
            camera_focal_length: 180.0,
        }
    }
}

impl OpticalElementSpec {
    pub fn optics(&self) -> ZoneOptics {
        ZoneOptics::new(self.focal_length, self.wavelength, self.magnification)
    }

    pub fn sieve(&self) -> SieveLayout {
        SieveLayout::new(self.sieve_scale, self.sieve_spacing)
    }

    /// Radius of the printed punch outline (mm).
    pub fn punch_radius(&self) -> f64 {
        self.punch_diameter * self.magnification / 2.0
    }

    /// Check every field against its accepted range.
    ///
    /// All failing fields are reported together.
    pub fn validate(&self) -> Result<(), SpecError> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &'static str, message: &str| {
            if !ok {
                errors.push(FieldError {
                    field,
                    message: message.to_string(),
                });
            }
        };

        let (f_min, f_max) = FOCAL_LENGTH_RANGE;
        check(
            self.focal_length.is_finite()
                && (f_min..=f_max).contains(&self.focal_length),
            "focal_length",
            "Focal length must be between 1 and 10000 mm",
        );
        check(
            (1..=MAX_RINGS).contains(&self.rings),
            "rings",
            "Number of rings must be between 1 and 50",
        );
        check(
            is_positive(self.wavelength),
            "wavelength",
            "Wavelength must be positive",
        );
        check(
            is_positive(self.punch_diameter),
            "punch_diameter",
            "Punch diameter must be positive",
        );
        check(
            is_positive(self.magnification),
            "magnification",
            "Magnification must be positive",
        );
        check(
            is_positive(self.sieve_scale),
            "sieve_scale",
            "Sieve scale must be positive",
        );
        check(
            self.sieve_spacing.is_finite() && self.sieve_spacing >= 0.0,
            "sieve_spacing",
            "Sieve spacing must not be negative",
        );
        check(
            is_positive(self.camera_focal_length),
            "camera_focal_length",
            "Camera focal length must be positive",
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SpecError::Invalid(errors))
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// The three kinds of diffractive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    ZonePlate,
    ZoneSieve,
    PhotonSieve,
}

impl ElementKind {
    /// Grid sections are drawn in this order.
    pub const ALL: [ElementKind; 3] = [
        ElementKind::ZonePlate,
        ElementKind::ZoneSieve,
        ElementKind::PhotonSieve,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::ZonePlate => "Zone Plate",
            ElementKind::ZoneSieve => "Zone Sieve",
            ElementKind::PhotonSieve => "Photon Sieve",
        }
    }
}

/// How a page is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LayoutMode {
    /// Every element kind, repeated across a grid.
    Grid,
    /// One centred zone plate.
    Plate,
    /// One centred zone sieve.
    Sieve,
    /// One centred photon sieve.
    Photon,
}

impl LayoutMode {
    /// The element drawn by a centred mode; `None` for [`LayoutMode::Grid`].
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self {
            LayoutMode::Grid => None,
            LayoutMode::Plate => Some(ElementKind::ZonePlate),
            LayoutMode::Sieve => Some(ElementKind::ZoneSieve),
            LayoutMode::Photon => Some(ElementKind::PhotonSieve),
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LayoutMode::Grid => "GRID",
            LayoutMode::Plate => "PLATE",
            LayoutMode::Sieve => "SIEVE",
            LayoutMode::Photon => "PHOTON",
        };
        f.write_str(name)
    }
}

impl FromStr for LayoutMode {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GRID" => Ok(LayoutMode::Grid),
            "PLATE" => Ok(LayoutMode::Plate),
            "SIEVE" => Ok(LayoutMode::Sieve),
            "PHOTON" => Ok(LayoutMode::Photon),
            _ => Err(SpecError::UnknownMode(s.to_string())),
        }
    }
}

/// A grid cell, counted from the top-left of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlot {
    pub row: usize,
    pub col: usize,
}

impl PageSlot {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Offset of this slot from slot (0, 0). Rows run down the page.
    pub fn offset(&self, pitch: f64) -> [f64; 2] {
        [self.col as f64 * pitch, -(self.row as f64 * pitch)]
    }
}

/// Primitives for one element instance and the placement that produced them.
#[derive(Debug, Clone)]
pub struct RenderedElement {
    pub kind: ElementKind,
    /// Maps element-local coordinates (centre at the origin) to the page.
    pub placement: Transform,
    pub primitives: Vec<Primitive>,
}

/// A finished page, ready for the rasteriser.
///
/// Coordinates are millimetres with the origin at the bottom-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescription {
    /// Page width (mm).
    pub width: f64,
    /// Page height (mm).
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

impl PageDescription {
    /// All text runs on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(Primitive::text)
    }
}
