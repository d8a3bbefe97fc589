//! Drawing of individual diffractive elements.
//!
//! Every element starts with its punch outline. The opaque zones are the odd
//! zones $1, 3, \ldots, 2R-1$; each is drawn as a single circle stroked with
//! the zone width, which paints the whole annulus without filled paths.
//!
//! - **Zone plate**: every opaque zone is solid.
//! - **Zone sieve**: the central zone is solid, the others are perforated.
//! - **Photon sieve**: the perforated rings are shifted out by one zone
//!   ($r_n..r_{n+1}$ for odd $n$) and there is no solid centre.
//!
//! All drawing uses magnified radii.

use fresnel_geometry::optics::{Scale, ZoneOptics, ZoneRing};
use fresnel_geometry::primitives::Ink;
use fresnel_geometry::sieve::SieveLayout;
use fresnel_geometry::transform::Transform;
use rand::Rng;

use crate::canvas::Canvas;
use crate::types::{ElementKind, OpticalElementSpec, RenderedElement};

/// Stroke width of the punch outline (mm).
pub const PUNCH_STROKE_WIDTH: f64 = 0.1;

/// Zone indices drawn opaque: 1, 3, ..., 2R-1.
pub fn opaque_zones(rings: u32) -> impl Iterator<Item = u32> {
    (1..2 * rings).step_by(2)
}

/// Renders elements for one specification.
#[derive(Debug, Clone)]
pub struct ElementRenderer<'a> {
    spec: &'a OpticalElementSpec,
    optics: ZoneOptics,
    sieve: SieveLayout,
}

impl<'a> ElementRenderer<'a> {
    pub fn new(spec: &'a OpticalElementSpec) -> Self {
        Self {
            spec,
            optics: spec.optics(),
            sieve: spec.sieve(),
        }
    }

    /// Render one element into its own primitive list, placed on the page by
    /// `placement`.
    pub fn render<R: Rng + ?Sized>(
        &self,
        kind: ElementKind,
        placement: &Transform,
        ink: Ink,
        rng: &mut R,
    ) -> RenderedElement {
        let mut canvas = Canvas::new(ink);
        canvas.with_transform(placement, |c| self.draw(kind, c, rng));
        RenderedElement {
            kind,
            placement: placement.clone(),
            primitives: canvas.finish(),
        }
    }

    /// Draw one element centred on the canvas's current origin.
    pub fn draw<R: Rng + ?Sized>(&self, kind: ElementKind, canvas: &mut Canvas, rng: &mut R) {
        self.draw_punch_outline(canvas);
        match kind {
            ElementKind::ZonePlate => self.draw_zone_plate(canvas),
            ElementKind::ZoneSieve => self.draw_zone_sieve(canvas, rng),
            ElementKind::PhotonSieve => self.draw_photon_sieve(canvas, rng),
        }
    }

    fn draw_punch_outline(&self, canvas: &mut Canvas) {
        canvas.stroke_circle([0.0, 0.0], self.spec.punch_radius(), PUNCH_STROKE_WIDTH);
    }

    fn draw_zone_plate(&self, canvas: &mut Canvas) {
        for n in opaque_zones(self.spec.rings) {
            let ring = self.optics.zone_ring(n, Scale::Magnified);
            stroke_annulus(canvas, &ring);
        }
    }

    fn draw_zone_sieve<R: Rng + ?Sized>(&self, canvas: &mut Canvas, rng: &mut R) {
        for n in opaque_zones(self.spec.rings) {
            let ring = self.optics.zone_ring(n, Scale::Magnified);
            if n == 1 {
                stroke_annulus(canvas, &ring);
            } else {
                self.perforate(canvas, &ring, rng);
            }
        }
    }

    fn draw_photon_sieve<R: Rng + ?Sized>(&self, canvas: &mut Canvas, rng: &mut R) {
        for n in opaque_zones(self.spec.rings) {
            let ring = self.optics.zone_ring(n + 1, Scale::Magnified);
            self.perforate(canvas, &ring, rng);
        }
    }

    /// Fill one ring of holes. Each hole is drawn on the +x axis inside a
    /// frame rotated to its angular position.
    fn perforate<R: Rng + ?Sized>(&self, canvas: &mut Canvas, ring: &ZoneRing, rng: &mut R) {
        let layout = self.sieve.distribute(ring, rng);
        for hole in layout.holes() {
            canvas.rotated(hole.angle, |c| {
                c.fill_circle([hole.centre_radius, 0.0], hole.radius);
            });
        }
    }
}

fn stroke_annulus(canvas: &mut Canvas, ring: &ZoneRing) {
    canvas.stroke_circle([0.0, 0.0], ring.centre_radius(), ring.width());
}
