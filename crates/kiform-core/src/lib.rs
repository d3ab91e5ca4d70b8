//! kiform Core Types
//!
//! This crate provides the typed entity model behind kiform's footprint
//! codec. It includes:
//!
//! - **Geometry**: Points, placements, sizes and 3D triples ([`geometry`] module)
//! - **Graphics**: Texts and drawn shapes ([`graphics`] module)
//! - **Pads**: Copper and drill features with their overrides ([`pad`] module)
//! - **Models**: 3D model references ([`model`] module)
//! - **Footprint**: The footprint entity and its attributes ([`footprint`] module)
//! - **Factory**: Default footprints per mount type ([`factory`] module)

pub mod factory;
pub mod footprint;
pub mod geometry;
pub mod graphics;
pub mod model;
pub mod pad;
