use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Directional key light plus a camera-aligned fill.
pub struct LightingOptions {
    /// Direction the key light travels (world space, need not be unit).
    #[schemars(skip)]
    pub key_direction: [f32; 3],
    /// Strength of the directional key light.
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub key_intensity: f32,
    /// Strength of the camera-aligned fill light.
    #[schemars(title = "Fill Light", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub fill_intensity: f32,
    /// Constant light added to every face.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            key_direction: [-0.4, -1.0, -0.3],
            key_intensity: 0.9,
            fill_intensity: 0.25,
            ambient: 0.35,
        }
    }
}
