//! Visual parameters and fixed plot configuration
//!
//! The four adjustable inputs (opacity, bandwidth, skew, point visibility)
//! form the control surface of the visualization. Each comes from a
//! continuous slider, so out-of-range edits are clamped into the declared
//! range rather than rejected - every intermediate slider value must be
//! representable. Setters report whether the stored value changed so the
//! owner knows to recompose.

/// Opacity range, slider step, and default
pub const OPACITY_RANGE: (f64, f64) = (0.0, 1.0);
pub const OPACITY_STEP: f64 = 0.1;
pub const DEFAULT_OPACITY: f64 = 0.5;

/// Density bandwidth range (canvas pixels), slider step, and default
pub const BANDWIDTH_RANGE: (f64, f64) = (10.0, 80.0);
pub const BANDWIDTH_STEP: f64 = 2.0;
pub const DEFAULT_BANDWIDTH: f64 = 20.0;

/// Skew range, slider step, and default
pub const SKEW_RANGE: (f64, f64) = (-1.0, 1.0);
pub const SKEW_STEP: f64 = 0.01;
pub const DEFAULT_SKEW: f64 = 0.0;

/// Validated rendering parameters
///
/// Skew shifts opacity symmetrically in opposite directions between the two
/// density layers: positive skew emphasizes the local distribution over the
/// global one, negative skew does the reverse, without touching bandwidth.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualParameters {
    opacity: f64,
    bandwidth: f64,
    skew: f64,
    show_points: bool,
}

impl Default for VisualParameters {
    fn default() -> Self {
        VisualParameters {
            opacity: DEFAULT_OPACITY,
            bandwidth: DEFAULT_BANDWIDTH,
            skew: DEFAULT_SKEW,
            show_points: false,
        }
    }
}

impl VisualParameters {
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn skew(&self) -> f64 {
        self.skew
    }

    pub fn show_points(&self) -> bool {
        self.show_points
    }

    /// Set base opacity, clamped into [0,1]. Returns true if the value changed.
    pub fn set_opacity(&mut self, value: f64) -> bool {
        let clamped = value.clamp(OPACITY_RANGE.0, OPACITY_RANGE.1);
        let changed = clamped != self.opacity;
        self.opacity = clamped;
        changed
    }

    /// Set density bandwidth, clamped into [10,80]. Returns true if changed.
    pub fn set_bandwidth(&mut self, value: f64) -> bool {
        let clamped = value.clamp(BANDWIDTH_RANGE.0, BANDWIDTH_RANGE.1);
        let changed = clamped != self.bandwidth;
        self.bandwidth = clamped;
        changed
    }

    /// Set opacity skew, clamped into [-1,1]. Returns true if changed.
    pub fn set_skew(&mut self, value: f64) -> bool {
        let clamped = value.clamp(SKEW_RANGE.0, SKEW_RANGE.1);
        let changed = clamped != self.skew;
        self.skew = clamped;
        changed
    }

    /// Toggle the raw-point overlay. Returns true if changed.
    pub fn set_show_points(&mut self, value: bool) -> bool {
        let changed = value != self.show_points;
        self.show_points = value;
        changed
    }
}

/// Plot domain on both axes; the visualization always spans the unit square
pub const PLOT_DOMAIN: (f64, f64) = (0.0, 1.0);

/// Fixed plot configuration, independent of user parameters
///
/// The plot domain is always the unit square on both axes, the canvas is a
/// fixed square, and density intensity maps through a turbo color scheme
/// keyed to a [0,1] domain.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Canvas edge length in pixels (the canvas is square)
    pub canvas_size: u32,
    /// Caption rendered with the artifact
    pub caption: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            canvas_size: 400,
            caption: "Session mood map: this session vs. all sessions".to_string(),
        }
    }
}
