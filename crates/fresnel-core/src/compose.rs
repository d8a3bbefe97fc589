//! Top-level page composition.
//!
//! The requested mode is resolved once into a [`PageState`]:
//!
//! | Mode | Page |
//! |------|------|
//! | `GRID` | Border frame plus one grid section per element kind |
//! | `PLATE` / `SIEVE` / `PHOTON` | One centred element with its description block |
//! | anything else | An error annotation, then the `GRID` page |
//!
//! Each call produces exactly one page. The grid row cursor is threaded
//! through explicitly: pass the `next_row` of one [`ComposedPage`] as the
//! `start_row` of the next call to stack further sections.

use fresnel_geometry::primitives::Ink;
use rand::Rng;

use crate::canvas::Canvas;
use crate::layout::{LayoutEngine, PageLayout};
use crate::types::{ElementKind, LayoutMode, OpticalElementSpec, PageDescription};

/// The composition path chosen for a mode string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Grid,
    Centred(ElementKind),
    /// Unrecognised mode; carries the original input.
    Invalid(String),
}

impl PageState {
    pub fn select(mode: &str) -> Self {
        match mode.parse::<LayoutMode>() {
            Ok(mode) => mode.into(),
            Err(_) => PageState::Invalid(mode.to_string()),
        }
    }
}

impl From<LayoutMode> for PageState {
    fn from(mode: LayoutMode) -> Self {
        match mode.element_kind() {
            Some(kind) => PageState::Centred(kind),
            None => PageState::Grid,
        }
    }
}

/// A finished page and the state to carry into the next call.
#[derive(Debug, Clone)]
pub struct ComposedPage {
    pub page: PageDescription,
    /// The mode actually drawn; `GRID` after an unknown-mode fallback.
    pub mode: LayoutMode,
    /// First free grid row after this page.
    pub next_row: usize,
}

/// Composes pages for a fixed page layout.
#[derive(Debug, Clone, Default)]
pub struct PageComposer {
    layout: PageLayout,
    negative: bool,
}

impl PageComposer {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            negative: false,
        }
    }

    /// Draw white on a black page, for negative film.
    pub fn with_negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Compose a page for a mode given as text, falling back to `GRID` with
    /// a visible annotation when the text is not a known mode.
    pub fn compose_str<R: Rng + ?Sized>(
        &self,
        spec: &OpticalElementSpec,
        mode: &str,
        start_row: usize,
        rng: &mut R,
    ) -> ComposedPage {
        self.compose_state(spec, PageState::select(mode), start_row, rng)
    }

    pub fn compose<R: Rng + ?Sized>(
        &self,
        spec: &OpticalElementSpec,
        mode: LayoutMode,
        start_row: usize,
        rng: &mut R,
    ) -> ComposedPage {
        self.compose_state(spec, mode.into(), start_row, rng)
    }

    fn compose_state<R: Rng + ?Sized>(
        &self,
        spec: &OpticalElementSpec,
        state: PageState,
        start_row: usize,
        rng: &mut R,
    ) -> ComposedPage {
        let engine = LayoutEngine::new(spec, &self.layout);
        let mut canvas = self.start_page();

        let (mode, next_row) = match state {
            PageState::Grid => {
                let next_row = self.compose_grid(&engine, &mut canvas, start_row, rng);
                (LayoutMode::Grid, next_row)
            }
            PageState::Centred(kind) => {
                engine.compose_centred(&mut canvas, kind, rng);
                let mode = match kind {
                    ElementKind::ZonePlate => LayoutMode::Plate,
                    ElementKind::ZoneSieve => LayoutMode::Sieve,
                    ElementKind::PhotonSieve => LayoutMode::Photon,
                };
                (mode, start_row)
            }
            PageState::Invalid(requested) => {
                log::warn!("unknown layout mode '{}', falling back to GRID", requested);
                engine.draw_error(&mut canvas, &unknown_mode_message(&requested));
                let next_row = self.compose_grid(&engine, &mut canvas, start_row, rng);
                (LayoutMode::Grid, next_row)
            }
        };

        let primitives = canvas.finish();
        log::info!(
            "composed {} page: {} primitives, next row {}",
            mode,
            primitives.len(),
            next_row
        );
        ComposedPage {
            page: PageDescription {
                width: self.layout.size[0],
                height: self.layout.size[1],
                primitives,
            },
            mode,
            next_row,
        }
    }

    fn compose_grid<R: Rng + ?Sized>(
        &self,
        engine: &LayoutEngine<'_>,
        canvas: &mut Canvas,
        start_row: usize,
        rng: &mut R,
    ) -> usize {
        engine.draw_border(canvas);
        engine.compose_grid(canvas, start_row, rng)
    }

    /// A blank page; negative pages start with a full-page black fill.
    fn start_page(&self) -> Canvas {
        if self.negative {
            let mut canvas = Canvas::new(Ink::White);
            canvas.fill_rect([0.0, 0.0], self.layout.size, Ink::Black);
            canvas
        } else {
            Canvas::new(Ink::Black)
        }
    }
}

/// Text of the annotation drawn for an unrecognised mode.
pub fn unknown_mode_message(requested: &str) -> String {
    format!("Unknown type '{}' - showing GRID", requested.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresnel_geometry::primitives::Primitive;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_state_selection() {
        assert_eq!(PageState::select("GRID"), PageState::Grid);
        assert_eq!(
            PageState::select("plate"),
            PageState::Centred(ElementKind::ZonePlate)
        );
        assert_eq!(
            PageState::select("PHOTON"),
            PageState::Centred(ElementKind::PhotonSieve)
        );
        assert_eq!(
            PageState::select("HOLOGRAM"),
            PageState::Invalid("HOLOGRAM".into())
        );
    }

    #[test]
    fn test_centred_mode_keeps_cursor() {
        let composer = PageComposer::default();
        let spec = OpticalElementSpec::default();
        let page = composer.compose(&spec, LayoutMode::Sieve, 4, &mut StdRng::seed_from_u64(0));
        assert_eq!(page.mode, LayoutMode::Sieve);
        assert_eq!(page.next_row, 4);
        assert!(!page
            .page
            .primitives
            .iter()
            .any(|p| matches!(p, Primitive::StrokeRect(_))));
    }

    #[test]
    fn test_negative_page_inverts_ink() {
        let composer = PageComposer::default().with_negative(true);
        let spec = OpticalElementSpec::default();
        let page = composer.compose(&spec, LayoutMode::Plate, 0, &mut StdRng::seed_from_u64(0));
        let prims = &page.page.primitives;
        assert!(matches!(&prims[0], Primitive::FillRect(r) if r.ink == Ink::Black));
        assert!(prims[1..].iter().all(|p| p.ink() == Ink::White));
    }

    #[test]
    fn test_unknown_mode_message() {
        assert_eq!(
            unknown_mode_message(" ZONE "),
            "Unknown type 'ZONE' - showing GRID"
        );
    }
}
