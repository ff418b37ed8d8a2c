use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and idle-orbit parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Orbit angular speed in radians per second while auto-rotating.
    #[schemars(title = "Orbit Speed", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub orbit_speed: f32,
    /// Camera height above the target as a fraction of orbit distance.
    #[schemars(title = "Elevation", range(min = 0.0, max = 1.5), extend("step" = 0.05))]
    pub elevation: f32,
    /// Closest allowed orbit distance.
    #[schemars(skip)]
    pub min_distance: f32,
    /// How quickly target and distance chase the scene bounds (per second).
    #[schemars(title = "Follow Rate", range(min = 0.5, max = 20.0), extend("step" = 0.5))]
    pub follow_rate: f32,
    /// Whether the orbit advances on startup.
    pub auto_rotate: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            orbit_speed: 0.35,
            elevation: 0.45,
            min_distance: 30.0,
            follow_rate: 4.0,
            auto_rotate: true,
        }
    }
}
