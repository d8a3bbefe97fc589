//! TOML configuration deserialisation for render jobs.

use std::path::Path;

use anyhow::{Context, Result};
use fresnel_core::types::{LayoutMode, OpticalElementSpec};
use serde::Deserialize;

/// Top-level job configuration.
#[derive(Debug, Default, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub element: ElementConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Element parameters. Unset fields come from the preset, then from the
/// built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ElementConfig {
    /// Name of a built-in preset (see `fresnel-cli presets`).
    pub preset: Option<String>,
    pub focal_length: Option<f64>,
    pub wavelength: Option<f64>,
    pub rings: Option<u32>,
    pub magnification: Option<f64>,
    pub punch_diameter: Option<f64>,
    pub sieve_scale: Option<f64>,
    pub sieve_spacing: Option<f64>,
    pub camera_focal_length: Option<f64>,
}

/// Page composition settings.
#[derive(Debug, Default, Deserialize)]
pub struct LayoutConfig {
    /// "GRID", "PLATE", "SIEVE" or "PHOTON". Default: the preset's mode, else "PLATE".
    pub mode: Option<String>,
    /// First free grid row (default: 0).
    #[serde(default)]
    pub start_row: usize,
    /// Seed for the sieve ring phases. Drawn at random when absent.
    pub seed: Option<u64>,
    /// White marks on a black page (default: false).
    #[serde(default)]
    pub negative: bool,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to write the page description as JSON (default: true).
    #[serde(default = "default_true")]
    pub save_json: bool,
    /// Whether to write an SVG preview (default: true).
    #[serde(default = "default_true")]
    pub save_svg: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_json: true,
            save_svg: true,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// A named starting point for common uses.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub name: &'static str,
    pub summary: &'static str,
    pub mode: LayoutMode,
    pub focal_length: f64,
    pub rings: u32,
    pub wavelength: f64,
    pub punch_diameter: f64,
    pub magnification: f64,
}

pub const PRESETS: [Preset; 3] = [
    Preset {
        name: "photography",
        summary: "Short pinhole-camera style plate for general photography",
        mode: LayoutMode::Plate,
        focal_length: 85.0,
        rings: 10,
        wavelength: 0.00056,
        punch_diameter: 15.0,
        magnification: 2.0,
    },
    Preset {
        name: "solar",
        summary: "Long-focus plate for solar imaging",
        mode: LayoutMode::Plate,
        focal_length: 500.0,
        rings: 15,
        wavelength: 0.00056,
        punch_diameter: 50.0,
        magnification: 1.0,
    },
    Preset {
        name: "microscopy",
        summary: "Very short focus sieve, printed large",
        mode: LayoutMode::Sieve,
        focal_length: 10.0,
        rings: 20,
        wavelength: 0.00045,
        punch_diameter: 5.0,
        magnification: 5.0,
    },
];

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

impl JobConfig {
    fn preset(&self) -> Result<Option<&'static Preset>> {
        match &self.element.preset {
            None => Ok(None),
            Some(name) => find_preset(name).map(Some).with_context(|| {
                let valid: Vec<_> = PRESETS.iter().map(|p| p.name).collect();
                format!("Unknown preset '{}'. Valid presets: {}", name, valid.join(", "))
            }),
        }
    }

    /// Build the element specification: defaults, then the preset, then the
    /// explicit fields.
    pub fn resolve_spec(&self) -> Result<OpticalElementSpec> {
        let mut spec = OpticalElementSpec::default();
        if let Some(preset) = self.preset()? {
            spec.focal_length = preset.focal_length;
            spec.rings = preset.rings;
            spec.wavelength = preset.wavelength;
            spec.punch_diameter = preset.punch_diameter;
            spec.magnification = preset.magnification;
        }

        let e = &self.element;
        if let Some(v) = e.focal_length {
            spec.focal_length = v;
        }
        if let Some(v) = e.wavelength {
            spec.wavelength = v;
        }
        if let Some(v) = e.rings {
            spec.rings = v;
        }
        if let Some(v) = e.magnification {
            spec.magnification = v;
        }
        if let Some(v) = e.punch_diameter {
            spec.punch_diameter = v;
        }
        if let Some(v) = e.sieve_scale {
            spec.sieve_scale = v;
        }
        if let Some(v) = e.sieve_spacing {
            spec.sieve_spacing = v;
        }
        if let Some(v) = e.camera_focal_length {
            spec.camera_focal_length = v;
        }
        Ok(spec)
    }

    /// The requested mode text. Left unparsed so an unknown mode reaches the
    /// composer's fallback.
    pub fn mode(&self) -> Result<String> {
        if let Some(mode) = &self.layout.mode {
            return Ok(mode.clone());
        }
        let mode = self.preset()?.map(|p| p.mode).unwrap_or(LayoutMode::Plate);
        Ok(mode.to_string())
    }
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &Path) -> Result<JobConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<JobConfig> {
    Ok(toml::from_str(content)?)
}
