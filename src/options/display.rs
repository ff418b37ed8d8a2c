use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// How voxels and the backdrop are drawn.
pub struct DisplayOptions {
    /// Clear color (linear RGB).
    #[schemars(skip)]
    pub background: [f32; 3],
    /// Drawn cube edge length relative to the grid cell. Values below 1
    /// leave a visible seam between neighbours.
    #[schemars(title = "Voxel Size", range(min = 0.5, max = 1.0), extend("step" = 0.01))]
    pub voxel_scale: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: [0.035, 0.04, 0.055],
            voxel_scale: 0.96,
        }
    }
}
