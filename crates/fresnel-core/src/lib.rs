//! # Fresnel Core
//!
//! The rendering and layout engine for printed diffractive optics. Given an
//! [`OpticalElementSpec`](types::OpticalElementSpec) and a
//! [`LayoutMode`](types::LayoutMode), it produces one page of vector
//! primitives for an external rasteriser.
//!
//! ## Architecture
//!
//! [`compose::PageComposer`] selects the composition path, the
//! [`layout::LayoutEngine`] positions elements and text, the
//! [`render::ElementRenderer`] draws each element using the zone geometry
//! from `fresnel-geometry`, and [`description::DescriptionFormatter`] builds
//! the annotation lines. All drawing goes through a [`canvas::Canvas`].
//!
//! Rendering is synchronous and holds no global state. The only
//! nondeterminism is the starting angle of each sieve ring, taken from the
//! caller's random number generator; pass a seeded generator to make a page
//! reproducible.
//!
//! ## Modules
//!
//! - [`types`]: Element specification, modes, and output containers.
//! - [`canvas`]: Primitive accumulator with scoped transforms.
//! - [`render`]: Zone plate, zone sieve and photon sieve drawing.
//! - [`description`]: Annotation text.
//! - [`layout`]: Grid and centred placement.
//! - [`compose`]: Mode dispatch and page assembly.
//! - [`font_metrics`]: Helvetica widths for text centring.

pub mod canvas;
pub mod compose;
pub mod description;
pub mod font_metrics;
pub mod layout;
pub mod render;
pub mod types;
