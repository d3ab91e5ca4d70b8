//! 3D model references.

use crate::geometry::Xyz;

/// `(model "path" [hide] [(opacity o)] (offset ...) (scale ...) (rotate ...))`.
///
/// Offsets are in millimetres, rotations in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub path: String,
    pub hide: bool,
    pub opacity: Option<f64>,
    pub offset: Xyz,
    pub scale: Xyz,
    pub rotate: Xyz,
}

impl Model {
    /// A model with identity placement.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            hide: false,
            opacity: None,
            offset: Xyz::ZERO,
            scale: Xyz::ONE,
            rotate: Xyz::ZERO,
        }
    }
}
