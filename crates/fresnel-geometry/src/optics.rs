//! Closed-form zone geometry.
//!
//! The radius of the $n$-th Fresnel zone boundary for a plate of focal length
//! $f$ at wavelength $\lambda$ is
//!
//! $$r_n = \sqrt{n \lambda f + \frac{n^2 \lambda^2}{4}}$$
//!
//! Printed diagrams are drawn at $M r_n$ (the magnification undone by the
//! duplicating camera), while aperture accounting always works on the
//! unmagnified radii. Callers choose between the two through [`Scale`].
//!
//! The effective f-stop converts the open area of an element into the
//! diameter of a circular aperture with the same area, then applies
//! $N = f / D_{\text{eff}}$.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::sieve::SieveLayout;

/// Green light, in millimetres.
pub const WAVELENGTH_GREEN: f64 = 0.00022;
/// Daylight (nominal 560 nm), in millimetres.
pub const WAVELENGTH_DAYLIGHT: f64 = 0.00056;

/// Whether a radius is reported at print size or at its optical size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Multiplied by the print magnification. Used for drawing.
    Magnified,
    /// True optical size. Used for area and f-stop accounting.
    Actual,
}

/// An annular zone between two consecutive zone boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneRing {
    /// Zone index $n$; the ring spans $r_{n-1}..r_n$.
    pub index: u32,
    /// Inner radius (mm).
    pub inner_radius: f64,
    /// Outer radius (mm).
    pub outer_radius: f64,
}

impl ZoneRing {
    /// Radial width of the annulus (mm).
    pub fn width(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }

    /// Radius of the annulus mid-line (mm).
    pub fn centre_radius(&self) -> f64 {
        self.inner_radius + self.width() / 2.0
    }
}

/// Optical parameters that fix the zone boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneOptics {
    /// Focal length (mm).
    pub focal_length: f64,
    /// Design wavelength (mm).
    pub wavelength: f64,
    /// Print magnification.
    pub magnification: f64,
}

impl ZoneOptics {
    pub fn new(focal_length: f64, wavelength: f64, magnification: f64) -> Self {
        Self {
            focal_length,
            wavelength,
            magnification,
        }
    }

    /// Radius of the $n$-th zone boundary. `n = 0` is the optical axis.
    pub fn radius(&self, n: u32, scale: Scale) -> f64 {
        let n = n as f64;
        let lambda = self.wavelength;
        let r = (n * lambda * self.focal_length + n * n * lambda * lambda / 4.0).sqrt();
        match scale {
            Scale::Magnified => r * self.magnification,
            Scale::Actual => r,
        }
    }

    /// The annulus of zone `n`, bounded by $r_{n-1}$ and $r_n$.
    ///
    /// Zone 0 is degenerate (both radii zero).
    pub fn zone_ring(&self, n: u32, scale: Scale) -> ZoneRing {
        ZoneRing {
            index: n,
            inner_radius: self.radius(n.saturating_sub(1), scale),
            outer_radius: self.radius(n, scale),
        }
    }

    /// Printed width of zone `n` (mm).
    pub fn annulus_width(&self, n: u32) -> f64 {
        self.zone_ring(n, Scale::Magnified).width()
    }

    /// Printed mid-line radius of zone `n` (mm).
    pub fn ring_center_radius(&self, n: u32) -> f64 {
        self.zone_ring(n, Scale::Magnified).centre_radius()
    }

    /// Printed diameter of a plate with `rings` opaque rings: the outer edge
    /// of zone $2R - 1$.
    pub fn plate_diameter(&self, rings: u32) -> f64 {
        2.0 * self.radius((2 * rings).saturating_sub(1), Scale::Magnified)
    }

    /// Unmagnified area of the central zone, $\pi r_1^2$ (mm²).
    pub fn central_zone_area(&self) -> f64 {
        let r1 = self.radius(1, Scale::Actual);
        PI * r1 * r1
    }

    /// Effective f-stop of a solid zone plate with `rings` open zones.
    ///
    /// Every Fresnel zone has (to first order) the same area as the central
    /// zone, so the open area is $R \pi r_1^2$.
    pub fn effective_plate_f_stop(&self, rings: u32) -> u32 {
        let open_area = self.central_zone_area() * rings as f64;
        f_stop_for_area(self.focal_length, open_area)
    }

    /// Effective f-stop of a sieve: the solid central zone plus every hole
    /// punched in zones $2, 4, \ldots, 2R$.
    pub fn effective_sieve_f_stop(&self, rings: u32, sieve: &SieveLayout) -> u32 {
        let mut open_area = self.central_zone_area();
        for n in (2..=2 * rings).step_by(2) {
            let ring = self.zone_ring(n, Scale::Actual);
            let holes = sieve.hole_count(ring.width(), ring.centre_radius());
            open_area += holes as f64 * sieve.hole_area(ring.width());
        }
        f_stop_for_area(self.focal_length, open_area)
    }
}

/// $N = f / D_{\text{eff}}$ with $D_{\text{eff}} = \sqrt{4A/\pi}$, rounded
/// to the nearest integer and never below 1.
fn f_stop_for_area(focal_length: f64, open_area: f64) -> u32 {
    let diameter = (4.0 * open_area / PI).sqrt();
    let stop = (focal_length / diameter).round();
    if stop.is_finite() {
        (stop as u32).max(1)
    } else {
        u32::MAX
    }
}
