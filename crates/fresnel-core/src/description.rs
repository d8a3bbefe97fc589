//! Annotation text printed next to each element.
//!
//! The two line formats are read back by downstream tooling and must not
//! change:
//!
//! ```text
//! Focal Length: 210mm | Zones: 8 | Zone Plate Diameter: 2.65633mm | F/Stop: 108
//! Magnification: 15x | Camera Focal Length: 180mm | Camera Distance: 2880mm / 113in
//! ```

use crate::types::{ElementKind, OpticalElementSpec};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Builds description lines for one specification.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionFormatter<'a> {
    spec: &'a OpticalElementSpec,
}

impl<'a> DescriptionFormatter<'a> {
    pub fn new(spec: &'a OpticalElementSpec) -> Self {
        Self { spec }
    }

    /// Effective f-stop reported for `kind`: the solid-plate estimate for
    /// zone plates, the hole-area estimate for both sieve kinds.
    pub fn f_stop(&self, kind: ElementKind) -> u32 {
        let optics = self.spec.optics();
        match kind {
            ElementKind::ZonePlate => optics.effective_plate_f_stop(self.spec.rings),
            ElementKind::ZoneSieve | ElementKind::PhotonSieve => {
                optics.effective_sieve_f_stop(self.spec.rings, &self.spec.sieve())
            }
        }
    }

    /// First line: focal length, zone count, printed diameter and f-stop.
    pub fn stats_line(&self, kind: ElementKind) -> String {
        let diameter = self.spec.optics().plate_diameter(self.spec.rings);
        format!(
            "Focal Length: {}mm | Zones: {} | Zone Plate Diameter: {}mm | F/Stop: {}",
            format_number(self.spec.focal_length),
            self.spec.rings,
            format_number(diameter),
            self.f_stop(kind)
        )
    }

    /// Lens-to-film distance for the duplicating camera, $M (f_d + f_d / M)$ (mm).
    pub fn camera_distance(&self) -> f64 {
        let mag = self.spec.magnification;
        let focal = self.spec.camera_focal_length;
        mag * (focal + focal / mag)
    }

    /// Second line: how to set up the duplicating camera.
    pub fn camera_line(&self) -> String {
        let distance = self.camera_distance();
        format!(
            "Magnification: {}x | Camera Focal Length: {}mm | Camera Distance: {}mm / {}in",
            format_number(self.spec.magnification),
            format_number(self.spec.camera_focal_length),
            distance.round() as i64,
            (distance / MM_PER_INCH).round() as i64
        )
    }

    /// Both lines of a centred description block.
    pub fn lines(&self, kind: ElementKind) -> [String; 2] {
        [self.stats_line(kind), self.camera_line()]
    }
}

/// Format a real with at most six significant digits and no trailing zeros.
///
/// Whole numbers print without a decimal point.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == value.trunc() && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (5 - magnitude).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
