//! Layer composition
//!
//! Turns the two datasets plus the current visual parameters into an ordered
//! list of render instructions. Composition is a pure, total function: it
//! never fails, has no side effects, and identical inputs produce
//! structurally identical output.
//!
//! Layer order is fixed: frame, global density, local density, optional
//! raw-point overlay, annotation dots, annotation labels. The global layer
//! is down-weighted so the local distribution reads as the foreground.

use crate::annotations::{self, ReferenceAnnotation};
use crate::config::VisualParameters;
use crate::sample::{Dataset, SamplePoint, Scope};

/// Intensity weight of the global density layer (the local layer is fully
/// opaque at base)
pub const GLOBAL_LAYER_WEIGHT: f64 = 0.2;

/// Contour threshold count handed to density estimation
pub const DENSITY_THRESHOLDS: usize = 100;

/// Radius of raw-point overlay markers, canvas pixels
pub const POINT_OVERLAY_RADIUS: f64 = 1.5;

/// Opacity of raw-point overlay markers
pub const POINT_OVERLAY_OPACITY: f64 = 0.1;

/// One renderable layer, borrowing its source data
///
/// Density rendering operates on raw points plus a bandwidth, so density
/// instructions carry the point slice itself, not a pre-binned grid.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerInstruction<'a> {
    /// Plot border, no data dependency
    Frame,
    /// A smoothed density layer over one point cloud
    Density {
        scope: Scope,
        points: &'a [SamplePoint],
        /// Base intensity weight of the whole layer
        weight: f64,
        /// Smoothing radius, canvas pixels
        bandwidth: f64,
        /// None renders contour strokes only
        fill_opacity: Option<f64>,
        stroke_opacity: f64,
        /// Contour threshold count
        thresholds: usize,
    },
    /// Raw sample markers over the local dataset
    Points {
        points: &'a [SamplePoint],
        radius: f64,
        opacity: f64,
    },
    /// Colored dots at the reference annotation positions
    AnnotationDots {
        annotations: &'static [ReferenceAnnotation],
    },
    /// Name labels at the reference annotation positions
    AnnotationLabels {
        annotations: &'static [ReferenceAnnotation],
    },
}

/// Derive the ordered render instructions for one composition pass
///
/// Skew shifts the two density layers' opacities in opposite directions:
/// the global layer gets `opacity - skew`, the local layer `opacity + skew`.
/// The shifted values are handed on without re-clamping; `opacity 0.9,
/// skew 0.5` yields 1.4 here, and the rendering boundary clamps it. The
/// point overlay materializes only when `show_points` is set.
pub fn compose<'a>(
    local: &'a Dataset,
    global: &'a Dataset,
    params: &VisualParameters,
) -> Vec<LayerInstruction<'a>> {
    let mut layers = Vec::with_capacity(6);

    layers.push(LayerInstruction::Frame);

    layers.push(LayerInstruction::Density {
        scope: Scope::Global,
        points: global.points(),
        weight: GLOBAL_LAYER_WEIGHT,
        bandwidth: params.bandwidth(),
        fill_opacity: None,
        stroke_opacity: params.opacity() - params.skew(),
        thresholds: DENSITY_THRESHOLDS,
    });

    layers.push(LayerInstruction::Density {
        scope: Scope::Local,
        points: local.points(),
        weight: 1.0,
        bandwidth: params.bandwidth(),
        fill_opacity: Some(params.opacity() + params.skew()),
        stroke_opacity: params.opacity() + params.skew(),
        thresholds: DENSITY_THRESHOLDS,
    });

    if params.show_points() {
        layers.push(LayerInstruction::Points {
            points: local.points(),
            radius: POINT_OVERLAY_RADIUS,
            opacity: POINT_OVERLAY_OPACITY,
        });
    }

    layers.push(LayerInstruction::AnnotationDots {
        annotations: annotations::annotations(),
    });
    layers.push(LayerInstruction::AnnotationLabels {
        annotations: annotations::annotations(),
    });

    layers
}
