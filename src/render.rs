//! Render driver contract
//!
//! The core hands a driver the ordered layer instructions (which borrow the
//! raw datasets) plus the fixed plot configuration, and gets back an opaque
//! artifact. Driver internals - the density estimator, color scale, axis
//! drawing - are the driver's business; the core's obligations end at this
//! boundary. In particular, post-skew opacities arrive unclamped and the
//! driver must clamp them into [0,1] itself.

use crate::config::PlotConfig;
use crate::error::Result;
use crate::layers::LayerInstruction;

/// Everything a driver needs for one composition pass
#[derive(Debug)]
pub struct PlotScene<'a> {
    /// Render instructions in composition order
    pub layers: Vec<LayerInstruction<'a>>,
    /// Fixed canvas/caption/color-scheme configuration
    pub config: &'a PlotConfig,
}

/// An opaque rendered artifact
///
/// Holds the encoded image; releasing the artifact is just dropping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// A density-rendering backend
pub trait RenderDriver {
    /// Produce a fresh artifact from a scene
    fn render(&self, scene: &PlotScene) -> Result<Artifact>;
}

/// The single display attachment point
///
/// At most one artifact is attached at a time. Attaching a new artifact
/// releases the previous one; dropping the slot releases whatever is
/// attached, even if a recomposition was in flight.
#[derive(Debug, Default)]
pub struct DisplaySlot {
    current: Option<Artifact>,
}

impl DisplaySlot {
    pub fn new() -> Self {
        DisplaySlot { current: None }
    }

    /// Replace the attached artifact, releasing the old one
    pub fn attach(&mut self, artifact: Artifact) {
        self.current = Some(artifact);
    }

    /// Release the attached artifact, if any
    pub fn detach(&mut self) {
        self.current = None;
    }

    /// The currently attached artifact
    pub fn current(&self) -> Option<&Artifact> {
        self.current.as_ref()
    }
}
