//! Hole layout for zone sieves and photon sieves.
//!
//! A perforated zone is replaced by a ring of equal circular holes centred on
//! the zone mid-line. Hole diameter is the zone width times the sieve scale
//! factor; holes are packed around the circumference with an extra gap of
//! `spacing` mm between neighbours.
//!
//! The starting angle of each ring is random so that holes on adjacent rings
//! do not line up radially. The random source is always supplied by the
//! caller; seed it to make a layout reproducible.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::optics::ZoneRing;

/// Sieve hole sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SieveLayout {
    /// Hole diameter as a multiple of the zone width.
    pub scale: f64,
    /// Gap between neighbouring holes along the ring (mm).
    pub spacing: f64,
}

impl SieveLayout {
    pub fn new(scale: f64, spacing: f64) -> Self {
        Self { scale, spacing }
    }

    /// Radius of a hole punched in a zone of the given width (mm).
    pub fn hole_radius(&self, width: f64) -> f64 {
        width * self.scale / 2.0
    }

    /// Area of a single hole (mm²).
    pub fn hole_area(&self, width: f64) -> f64 {
        let r = self.hole_radius(width);
        PI * r * r
    }

    /// Number of holes that fit around a ring of mid-line radius `centre`.
    ///
    /// Returns zero when a single hole plus its gap is longer than the
    /// circumference.
    pub fn hole_count(&self, width: f64, centre: f64) -> usize {
        let pitch = width * self.scale + self.spacing;
        let count = (2.0 * PI * centre / pitch).floor();
        if count.is_finite() && count > 0.0 {
            count as usize
        } else {
            0
        }
    }

    /// Lay out the holes for one zone, drawing a random starting angle.
    pub fn distribute<R: Rng + ?Sized>(&self, ring: &ZoneRing, rng: &mut R) -> HoleRing {
        let base_rotation = rng.gen_range(0.0..360.0);
        let width = ring.width();
        let count = self.hole_count(width, ring.centre_radius());
        if count == 0 {
            log::debug!(
                "zone {}: no room for holes (width {:.5} mm, centre {:.5} mm)",
                ring.index,
                width,
                ring.centre_radius()
            );
        }
        HoleRing {
            centre_radius: ring.centre_radius(),
            hole_radius: self.hole_radius(width),
            count,
            base_rotation,
        }
    }
}

/// One hole of a perforated zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SieveHole {
    /// Angular position, counter-clockwise from the +x axis (degrees).
    pub angle: f64,
    /// Hole radius (mm).
    pub radius: f64,
    /// Distance of the hole centre from the element centre (mm).
    pub centre_radius: f64,
}

impl SieveHole {
    /// Hole centre relative to the element centre (mm).
    pub fn position(&self) -> [f64; 2] {
        let (sin, cos) = self.angle.to_radians().sin_cos();
        [self.centre_radius * cos, self.centre_radius * sin]
    }
}

/// The holes of one perforated zone, evenly spaced from a base rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoleRing {
    /// Mid-line radius of the zone (mm).
    pub centre_radius: f64,
    /// Radius of every hole in the ring (mm).
    pub hole_radius: f64,
    /// Number of holes; may be zero.
    pub count: usize,
    /// Angle of the first hole (degrees, in [0, 360)).
    pub base_rotation: f64,
}

impl HoleRing {
    /// Angular step between neighbouring holes (degrees).
    pub fn step(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            360.0 / self.count as f64
        }
    }

    pub fn holes(&self) -> impl Iterator<Item = SieveHole> + '_ {
        let step = self.step();
        (0..self.count).map(move |i| SieveHole {
            angle: (self.base_rotation + i as f64 * step) % 360.0,
            radius: self.hole_radius,
            centre_radius: self.centre_radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optics::{Scale, ZoneOptics, WAVELENGTH_DAYLIGHT};
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hole_count_formula() {
        let sieve = SieveLayout::new(1.5, 0.04);
        // 2π·10 / (0.2·1.5 + 0.04) = 62.83 / 0.34 = 184.8
        assert_eq!(sieve.hole_count(0.2, 10.0), 184);
        assert_abs_diff_eq!(sieve.hole_radius(0.2), 0.15, epsilon = 1e-12);
    }

    #[test]
    fn test_narrow_ring_gets_no_holes() {
        let sieve = SieveLayout::new(1.0, 5.0);
        assert_eq!(sieve.hole_count(0.1, 0.5), 0);
    }

    #[test]
    fn test_count_independent_of_phase() {
        let optics = ZoneOptics::new(210.0, WAVELENGTH_DAYLIGHT, 1.0);
        let ring = optics.zone_ring(5, Scale::Magnified);
        let sieve = SieveLayout::new(1.5, 0.04);
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(2);
        let first = sieve.distribute(&ring, &mut a);
        let second = sieve.distribute(&ring, &mut b);
        assert_eq!(first.count, second.count);
        assert_eq!(first.hole_radius, second.hole_radius);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let optics = ZoneOptics::new(210.0, WAVELENGTH_DAYLIGHT, 4.0);
        let ring = optics.zone_ring(9, Scale::Magnified);
        let sieve = SieveLayout::new(1.5, 0.04);
        let first = sieve.distribute(&ring, &mut StdRng::seed_from_u64(42));
        let second = sieve.distribute(&ring, &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn test_holes_evenly_spaced_on_midline() {
        let ring = HoleRing {
            centre_radius: 3.0,
            hole_radius: 0.1,
            count: 8,
            base_rotation: 10.0,
        };
        let holes: Vec<_> = ring.holes().collect();
        assert_eq!(holes.len(), 8);
        assert_abs_diff_eq!(holes[0].angle, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(holes[3].angle, 145.0, epsilon = 1e-12);
        for hole in &holes {
            let [x, y] = hole.position();
            assert_abs_diff_eq!((x * x + y * y).sqrt(), 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_base_rotation_in_range() {
        let optics = ZoneOptics::new(210.0, WAVELENGTH_DAYLIGHT, 1.0);
        let ring = optics.zone_ring(3, Scale::Magnified);
        let sieve = SieveLayout::new(1.5, 0.04);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let layout = sieve.distribute(&ring, &mut rng);
            assert!((0.0..360.0).contains(&layout.base_rotation));
        }
    }
}
