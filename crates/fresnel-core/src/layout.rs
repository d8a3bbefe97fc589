//! Placement of elements and annotations on a page.
//!
//! Two strategies are supported:
//!
//! - **Grid**: inside an 8" × 10" border frame, each element kind gets a
//!   section of `rows × cols` copies followed by one description line. The
//!   caller passes the first free row in and receives the next free row back,
//!   so several sections (or several calls) can share a page.
//! - **Centred**: one element in the middle of the page with the two-line
//!   description block beneath it.

use fresnel_geometry::transform::Transform;
use rand::Rng;

use crate::canvas::Canvas;
use crate::description::{DescriptionFormatter, MM_PER_INCH};
use crate::render::ElementRenderer;
use crate::types::{ElementKind, OpticalElementSpec, PageSlot};

/// US Letter, portrait (mm).
pub const LETTER_SIZE: [f64; 2] = [216.0, 279.0];

/// 8" × 10" border frame (mm).
pub const BORDER_SIZE: [f64; 2] = [8.0 * MM_PER_INCH, 10.0 * MM_PER_INCH];

/// Grid geometry inside the border frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Element rows per section.
    pub rows: usize,
    /// Elements per row.
    pub cols: usize,
    /// Centre-to-centre slot distance (mm).
    pub pitch: f64,
    /// Gap between the border frame and the first slot (mm).
    pub inset: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 7,
            pitch: MM_PER_INCH,
            inset: MM_PER_INCH / 2.0,
        }
    }
}

impl GridLayout {
    /// Rows consumed by one section: the elements plus the description line.
    pub fn section_rows(&self) -> usize {
        self.rows + 1
    }
}

/// Page geometry and text styling.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// Page size (mm).
    pub size: [f64; 2],
    /// Border frame size (mm), centred on the page.
    pub border: [f64; 2],
    /// Border frame stroke width (mm).
    pub border_stroke: f64,
    pub grid: GridLayout,
    /// Description font size (mm).
    pub text_size: f64,
    /// Baseline-to-baseline distance in a description block (mm).
    pub line_spacing: f64,
    /// Distance from an element's lowest mark to its first description line (mm).
    pub description_gap: f64,
    /// Font size of the unknown-mode annotation (mm).
    pub error_text_size: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            size: LETTER_SIZE,
            border: BORDER_SIZE,
            border_stroke: 0.25,
            grid: GridLayout::default(),
            text_size: 3.0,
            line_spacing: 5.0,
            description_gap: 8.0,
            error_text_size: 5.0,
        }
    }
}

impl PageLayout {
    pub fn centre(&self) -> [f64; 2] {
        [self.size[0] / 2.0, self.size[1] / 2.0]
    }

    /// Lower-left corner of the border frame.
    pub fn border_origin(&self) -> [f64; 2] {
        [
            (self.size[0] - self.border[0]) / 2.0,
            (self.size[1] - self.border[1]) / 2.0,
        ]
    }

    /// Centre of slot (0, 0): the top-left slot inside the border.
    pub fn grid_origin(&self) -> [f64; 2] {
        let [left, bottom] = self.border_origin();
        let top = bottom + self.border[1];
        let half = self.grid.pitch / 2.0;
        [left + self.grid.inset + half, top - self.grid.inset - half]
    }

    pub fn slot_centre(&self, slot: PageSlot) -> [f64; 2] {
        let [x, y] = self.grid_origin();
        let [dx, dy] = slot.offset(self.grid.pitch);
        [x + dx, y + dy]
    }

    /// Number of grid rows that fit inside the border frame.
    pub fn row_capacity(&self) -> usize {
        let usable = self.border[1] - 2.0 * self.grid.inset;
        (usable / self.grid.pitch + 1e-9).floor().max(0.0) as usize
    }
}

/// Places rendered elements and their annotations onto a canvas.
#[derive(Debug, Clone)]
pub struct LayoutEngine<'a> {
    layout: &'a PageLayout,
    renderer: ElementRenderer<'a>,
    formatter: DescriptionFormatter<'a>,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(spec: &'a OpticalElementSpec, layout: &'a PageLayout) -> Self {
        Self {
            layout,
            renderer: ElementRenderer::new(spec),
            formatter: DescriptionFormatter::new(spec),
        }
    }

    pub fn layout(&self) -> &PageLayout {
        self.layout
    }

    /// Outline the 8" × 10" frame.
    pub fn draw_border(&self, canvas: &mut Canvas) {
        canvas.stroke_rect(
            self.layout.border_origin(),
            self.layout.border,
            self.layout.border_stroke,
        );
    }

    /// Draw a section for every element kind starting at grid row
    /// `start_row`. Returns the first row after the last section.
    pub fn compose_grid<R: Rng + ?Sized>(
        &self,
        canvas: &mut Canvas,
        start_row: usize,
        rng: &mut R,
    ) -> usize {
        let mut next_row = start_row;
        for kind in ElementKind::ALL {
            next_row = self.compose_grid_section(canvas, kind, next_row, rng);
        }

        let capacity = self.layout.row_capacity();
        if next_row > capacity {
            log::warn!(
                "grid rows {}..{} exceed the {} rows that fit on one page",
                start_row,
                next_row,
                capacity
            );
        }
        next_row
    }

    /// Draw `rows × cols` copies of `kind` from grid row `row`, then its
    /// description line. Returns the row after the description.
    pub fn compose_grid_section<R: Rng + ?Sized>(
        &self,
        canvas: &mut Canvas,
        kind: ElementKind,
        row: usize,
        rng: &mut R,
    ) -> usize {
        let grid = &self.layout.grid;
        log::debug!(
            "{} section: rows {}..{} ({} x {})",
            kind.display_name(),
            row,
            row + grid.rows,
            grid.rows,
            grid.cols
        );

        for r in 0..grid.rows {
            for col in 0..grid.cols {
                let [x, y] = self.layout.slot_centre(PageSlot::new(row + r, col));
                let placement = Transform::translation(x, y);
                let element = self.renderer.render(kind, &placement, canvas.ink(), rng);
                canvas.extend(element.primitives);
            }
        }

        let [_, baseline] = self.layout.slot_centre(PageSlot::new(row + grid.rows, 0));
        let left = self.layout.border_origin()[0] + grid.inset;
        canvas.text(
            [left, baseline],
            self.formatter.stats_line(kind),
            self.layout.text_size,
        );

        row + grid.section_rows()
    }

    /// Draw one `kind` element at the page centre with its two-line
    /// description block beneath it.
    pub fn compose_centred<R: Rng + ?Sized>(
        &self,
        canvas: &mut Canvas,
        kind: ElementKind,
        rng: &mut R,
    ) {
        let centre = self.layout.centre();
        let placement = Transform::translation(centre[0], centre[1]);
        let element = self.renderer.render(kind, &placement, canvas.ink(), rng);

        let lowest = element
            .primitives
            .iter()
            .map(|p| p.bounding_box().0[1])
            .fold(centre[1], f64::min);
        log::debug!(
            "centred {} with {} primitives, lowest mark at y={:.3} mm",
            kind.display_name(),
            element.primitives.len(),
            lowest
        );
        canvas.extend(element.primitives);

        let mut baseline = lowest - self.layout.description_gap;
        for line in self.formatter.lines(kind) {
            canvas.centred_text([centre[0], baseline], line, self.layout.text_size);
            baseline -= self.layout.line_spacing;
        }
    }

    /// Centred annotation above the border frame.
    pub fn draw_error(&self, canvas: &mut Canvas, message: &str) {
        let top = self.layout.border_origin()[1] + self.layout.border[1];
        let baseline = (top + self.layout.size[1]) / 2.0 - self.layout.error_text_size / 3.0;
        canvas.centred_text(
            [self.layout.centre()[0], baseline],
            message,
            self.layout.error_text_size,
        );
    }
}
