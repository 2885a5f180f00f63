//! Recomposition pipeline
//!
//! One pure-ish entry point invoked after every trigger (a dataset fetch
//! resolving or a parameter edit): read the current state, compose the
//! layers, hand the scene to the driver, return the fresh artifact. The
//! caller attaches the artifact to the display slot, which releases the
//! previous one.

use crate::config::PlotConfig;
use crate::error::Result;
use crate::grid;
use crate::layers;
use crate::render::{Artifact, PlotScene, RenderDriver};
use crate::state::ViewState;

/// Recompute the visual artifact from the current state
///
/// Returns `Ok(None)` while either dataset is still unset; composition is
/// only attempted once both fetches have resolved.
pub fn recompute(
    state: &ViewState,
    config: &PlotConfig,
    driver: &dyn RenderDriver,
) -> Result<Option<Artifact>> {
    let Some((local, global)) = state.datasets() else {
        return Ok(None);
    };

    let local_grid = grid::build_grid(local.points());
    println!(
        "  Occupancy: local {} samples ({} peak/cell), global {} samples",
        local.len(),
        local_grid.max_count(),
        global.len()
    );

    let scene = PlotScene {
        layers: layers::compose(local, global, &state.params),
        config,
    };
    println!("  Composed {} layers", scene.layers.len());

    let artifact = driver.render(&scene)?;
    Ok(Some(artifact))
}
