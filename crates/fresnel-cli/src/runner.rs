//! Job runner: resolves the configuration, composes the page and writes it out.

use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use fresnel_core::compose::{ComposedPage, PageComposer};
use fresnel_core::description::{format_number, DescriptionFormatter};
use fresnel_core::types::{ElementKind, LayoutMode, OpticalElementSpec, PageDescription};
use fresnel_geometry::optics::Scale;

use crate::config::JobConfig;

/// Result of one render job.
#[derive(Debug)]
pub struct RenderOutput {
    pub spec: OpticalElementSpec,
    /// Mode text as requested, before any fallback.
    pub requested_mode: String,
    /// Seed used for the sieve ring phases.
    pub seed: u64,
    pub composed: ComposedPage,
}

/// Command-line overrides applied on top of the job file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub mode: Option<String>,
    pub seed: Option<u64>,
}

/// Resolve and validate the element specification of a job.
pub fn resolve_spec(job: &JobConfig) -> Result<OpticalElementSpec> {
    let spec = job.resolve_spec()?;
    spec.validate()?;
    Ok(spec)
}

/// Compose the page described by a job.
pub fn render_job(job: &JobConfig, overrides: &Overrides) -> Result<RenderOutput> {
    let spec = resolve_spec(job)?;
    let requested_mode = match &overrides.mode {
        Some(mode) => mode.clone(),
        None => job.mode()?,
    };

    let seed = match overrides.seed.or(job.layout.seed) {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            log::info!("no seed given, using {}", seed);
            seed
        }
    };
    let mut rng = StdRng::seed_from_u64(seed);

    let composer = PageComposer::default().with_negative(job.layout.negative);
    let composed = composer.compose_str(&spec, &requested_mode, job.layout.start_row, &mut rng);

    Ok(RenderOutput {
        spec,
        requested_mode,
        seed,
        composed,
    })
}

#[derive(Serialize)]
struct PageFile<'a> {
    generator: &'static str,
    version: &'static str,
    requested_mode: &'a str,
    mode: LayoutMode,
    seed: u64,
    next_row: usize,
    spec: &'a OpticalElementSpec,
    page: &'a PageDescription,
}

/// Write the page description and job metadata as JSON.
pub fn write_page_json(output: &RenderOutput, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = PageFile {
        generator: "fresnel-cli",
        version: env!("CARGO_PKG_VERSION"),
        requested_mode: &output.requested_mode,
        mode: output.composed.mode,
        seed: output.seed,
        next_row: output.composed.next_row,
        spec: &output.spec,
        page: &output.composed.page,
    };
    let json = serde_json::to_string_pretty(&file).context("Failed to serialise page")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!(
        "page written to {} ({} primitives)",
        path.display(),
        output.composed.page.primitives.len()
    );
    Ok(())
}

/// Zone radius table and effective apertures, as printed by `zones`.
pub fn zone_report(spec: &OpticalElementSpec) -> String {
    let optics = spec.optics();
    let formatter = DescriptionFormatter::new(spec);
    let mut out = String::new();

    out.push_str(&format!(
        "Focal length {}mm, wavelength {}mm, {} rings, magnification {}x\n\n",
        format_number(spec.focal_length),
        format_number(spec.wavelength),
        spec.rings,
        format_number(spec.magnification)
    ));
    out.push_str(&format!(
        "{:>4}  {:>12}  {:>12}  {:>12}\n",
        "n", "radius_mm", "printed_mm", "width_mm"
    ));
    for n in 1..2 * spec.rings {
        let ring = optics.zone_ring(n, Scale::Actual);
        out.push_str(&format!(
            "{:>4}  {:>12.6}  {:>12.6}  {:>12.6}\n",
            n,
            ring.outer_radius,
            optics.radius(n, Scale::Magnified),
            ring.width()
        ));
    }
    out.push('\n');
    out.push_str(&format!(
        "Zone plate diameter: {}mm\n",
        format_number(optics.plate_diameter(spec.rings))
    ));
    out.push_str(&format!(
        "Zone plate f-stop: {}\n",
        formatter.f_stop(ElementKind::ZonePlate)
    ));
    out.push_str(&format!(
        "Sieve f-stop: {}\n",
        formatter.f_stop(ElementKind::ZoneSieve)
    ));
    out.push_str(&format!(
        "Camera distance: {}mm\n",
        format_number(formatter.camera_distance().round())
    ));
    out
}
