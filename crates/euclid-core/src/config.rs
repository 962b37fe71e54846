//! Tunables for the canvas: zoom bounds, gesture thresholds, artifact
//! placement and nominal card metrics.

/// Configuration shared by the view, the interaction controller, the
/// render surface and the artifact generator.
///
/// `Default` reproduces the prototype's behaviour exactly; tests and hosts
/// override individual fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Lower zoom bound. Default: **0.1**.
    pub min_zoom: f64,
    /// Upper zoom bound. Default: **5.0**.
    pub max_zoom: f64,
    /// Zoom delta per wheel pixel when ctrl/meta is held. Default: **0.001**.
    pub wheel_zoom_sensitivity: f64,
    /// Zoom delta of the toolbar +/- buttons. Default: **0.1**.
    pub zoom_step: f64,
    /// Pointer travel (screen px) after which a gesture counts as a drag.
    /// Default: **5.0**.
    pub drag_threshold: f64,
    /// Canvas point placed at the container centre on first layout.
    /// Default: **1000.0**.
    pub recenter_anchor: f64,
    /// Horizontal distance of generated artifacts from their source.
    pub artifact_offset_x: f64,
    /// Vertical offsets of the LinkedIn, thread and caption artifacts.
    pub artifact_offsets_y: [f64; 3],
    /// Background grid spacing at zoom 1.
    pub grid_spacing: f64,
    /// Pixels per rem for surface-node widths.
    pub rem: f64,
    /// Compact card size (canvas units) used for hit testing.
    pub card_size: (f64, f64),
    /// Default surface width in rem when a node does not specify one.
    pub surface_width_rem: f64,
    /// Nominal surface-node height (canvas units) used for hit testing.
    pub surface_height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            wheel_zoom_sensitivity: 0.001,
            zoom_step: 0.1,
            drag_threshold: 5.0,
            recenter_anchor: 1000.0,
            artifact_offset_x: 300.0,
            artifact_offsets_y: [-150.0, 50.0, 250.0],
            grid_spacing: 20.0,
            rem: 16.0,
            card_size: (256.0, 128.0),
            surface_width_rem: 48.0,
            surface_height: 480.0,
        }
    }
}

impl CanvasConfig {
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}
