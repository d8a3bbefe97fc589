//! Integration tests for whole-page composition.
//!
//! Coverage:
//! - Every layout mode yields a non-empty page
//! - Unknown modes produce an annotation followed by the GRID page
//! - Pinned random phase gives identical pages
//! - Reference optics and description values
//! - Grid row cursor threading across calls

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

use fresnel_core::compose::{unknown_mode_message, PageComposer};
use fresnel_core::description::DescriptionFormatter;
use fresnel_core::types::{ElementKind, LayoutMode, OpticalElementSpec, PageDescription};
use fresnel_geometry::optics::{Scale, WAVELENGTH_DAYLIGHT};
use fresnel_geometry::primitives::Primitive;

// ─────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────

fn reference_spec() -> OpticalElementSpec {
    OpticalElementSpec {
        focal_length: 210.0,
        wavelength: WAVELENGTH_DAYLIGHT,
        rings: 8,
        magnification: 1.0,
        ..Default::default()
    }
}

fn compose(mode: &str, seed: u64) -> (PageDescription, LayoutMode, usize) {
    let composer = PageComposer::default();
    let page = composer.compose_str(&reference_spec(), mode, 0, &mut StdRng::seed_from_u64(seed));
    (page.page, page.mode, page.next_row)
}

// ─────────────────────────────────────────────────────────────
// Mode coverage
// ─────────────────────────────────────────────────────────────

#[test]
fn test_every_mode_produces_primitives() {
    for mode in ["GRID", "PLATE", "SIEVE", "PHOTON"] {
        let (page, _, _) = compose(mode, 1);
        assert!(!page.primitives.is_empty(), "{mode} page is empty");
        assert_eq!(page.width, 216.0);
        assert_eq!(page.height, 279.0);
    }
}

#[test]
fn test_grid_page_layout() {
    let (page, mode, next_row) = compose("GRID", 1);
    assert_eq!(mode, LayoutMode::Grid);
    assert_eq!(next_row, 9);
    assert!(matches!(page.primitives[0], Primitive::StrokeRect(_)), "border first");

    let texts: Vec<_> = page.texts().collect();
    assert_eq!(texts.len(), 3, "one description line per section");
    let plate = DescriptionFormatter::new(&reference_spec()).stats_line(ElementKind::ZonePlate);
    assert_eq!(texts[0], plate);
}

#[test]
fn test_centred_page_has_two_line_description() {
    let (page, mode, _) = compose("PLATE", 1);
    assert_eq!(mode, LayoutMode::Plate);
    let texts: Vec<_> = page.texts().collect();
    assert_eq!(
        texts,
        [
            "Focal Length: 210mm | Zones: 8 | Zone Plate Diameter: 2.65633mm | F/Stop: 108",
            "Magnification: 1x | Camera Focal Length: 180mm | Camera Distance: 360mm / 14in",
        ]
    );
}

#[test]
fn test_centred_element_is_on_page_centre() {
    let (page, _, _) = compose("PHOTON", 4);
    let Primitive::StrokeCircle(outline) = &page.primitives[0] else {
        panic!("punch outline expected first");
    };
    assert_eq!(outline.centre, [108.0, 139.5]);
    assert_abs_diff_eq!(outline.radius, 10.0, epsilon = 1e-12);
}

// ─────────────────────────────────────────────────────────────
// Unknown mode fallback
// ─────────────────────────────────────────────────────────────

#[test]
fn test_unknown_mode_falls_back_to_grid() {
    let (fallback, mode, next_row) = compose("HOLOGRAM", 9);
    let (grid, _, _) = compose("GRID", 9);

    assert_eq!(mode, LayoutMode::Grid);
    assert_eq!(next_row, 9);
    assert_eq!(fallback.primitives[0].text(), Some(unknown_mode_message("HOLOGRAM").as_str()));
    assert_eq!(&fallback.primitives[1..], grid.primitives.as_slice());
}

// ─────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────

#[test]
fn test_pinned_phase_is_idempotent() {
    for mode in ["GRID", "SIEVE", "PHOTON"] {
        let (a, _, _) = compose(mode, 1234);
        let (b, _, _) = compose(mode, 1234);
        assert_eq!(a, b, "{mode} differs between identical renders");
    }
}

#[test]
fn test_phase_changes_only_hole_positions() {
    let (a, _, _) = compose("SIEVE", 1);
    let (b, _, _) = compose("SIEVE", 2);
    assert_eq!(a.primitives.len(), b.primitives.len());
    for (pa, pb) in a.primitives.iter().zip(&b.primitives) {
        match (pa, pb) {
            (Primitive::FillCircle(ha), Primitive::FillCircle(hb)) => {
                assert_abs_diff_eq!(ha.radius, hb.radius, epsilon = 1e-12);
                let ra = (ha.centre[0] - 108.0).hypot(ha.centre[1] - 139.5);
                let rb = (hb.centre[0] - 108.0).hypot(hb.centre[1] - 139.5);
                assert_abs_diff_eq!(ra, rb, epsilon = 1e-9);
            }
            _ => assert_eq!(pa, pb),
        }
    }
}

// ─────────────────────────────────────────────────────────────
// Reference values
// ─────────────────────────────────────────────────────────────

#[test]
fn test_reference_geometry() {
    let spec = reference_spec();
    let optics = spec.optics();
    assert_abs_diff_eq!(optics.radius(1, Scale::Actual), 0.3429, epsilon = 1e-4);
    assert_abs_diff_eq!(optics.radius(15, Scale::Magnified), 1.3282, epsilon = 1e-4);
    let stop = optics.effective_plate_f_stop(spec.rings);
    assert!((106..=110).contains(&stop), "f-stop {stop}");
}

#[test]
fn test_camera_distance_reference() {
    let spec = OpticalElementSpec {
        magnification: 15.0,
        camera_focal_length: 180.0,
        ..reference_spec()
    };
    let composer = PageComposer::default();
    let page = composer.compose(&spec, LayoutMode::Plate, 0, &mut StdRng::seed_from_u64(0));
    let camera = page.page.texts().nth(1).unwrap();
    assert!(camera.ends_with("Camera Distance: 2880mm / 113in"), "{camera}");
}

// ─────────────────────────────────────────────────────────────
// Row cursor threading
// ─────────────────────────────────────────────────────────────

#[test]
fn test_cursor_stacks_sections_lower_on_page() {
    let composer = PageComposer::default();
    let spec = reference_spec();
    let mut rng = StdRng::seed_from_u64(0);
    let first = composer.compose(&spec, LayoutMode::Grid, 0, &mut rng);
    let second = composer.compose(&spec, LayoutMode::Grid, first.next_row, &mut rng);
    assert_eq!(second.next_row, 18);

    let first_text_y = |page: &PageDescription| {
        page.primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Text(t) => Some(t.origin[1]),
                _ => None,
            })
            .unwrap()
    };
    assert!(first_text_y(&second.page) < first_text_y(&first.page));
}

#[test]
fn test_page_serialises_to_json() {
    let (page, _, _) = compose("PLATE", 0);
    let json = serde_json::to_string(&page).unwrap();
    assert!(json.contains("\"type\":\"stroke_circle\""));
    let back: PageDescription = serde_json::from_str(&json).unwrap();
    assert_eq!(back.primitives.len(), page.primitives.len());
}
