//! # Fresnel Geometry
//!
//! Geometry for printed diffractive optics. This crate provides:
//!
//! - **Zone optics** ([`optics`]): Closed-form zone radii, annulus widths,
//!   and effective f-stops for zone plates and sieves.
//! - **Sieve layout** ([`sieve`]): Hole size, hole count, and angular
//!   placement for perforated zones.
//! - **Primitives** ([`primitives`]): The serialisable vector drawing
//!   operations that make up a page.
//! - **Transformations** ([`transform`]): Rotate and translate operations
//!   used to place elements and holes.

pub mod optics;
pub mod primitives;
pub mod sieve;
pub mod transform;
