use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::easing::EasingFunction;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Trajectory parameters for the dismantle and rebuild transitions.
pub struct AnimationOptions {
    /// Fixed seed for the trajectory random source. `None` seeds from OS
    /// entropy.
    #[schemars(skip)]
    pub seed: Option<u64>,
    /// Explosion and debris physics.
    pub dismantle: DismantleOptions,
    /// Reassembly timing and arc shape.
    pub rebuild: RebuildOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Dismantle", inline)]
#[serde(default)]
/// Debris physics constants.
pub struct DismantleOptions {
    /// Downward acceleration (units/s²).
    #[schemars(title = "Gravity", range(min = 1.0, max = 100.0), extend("step" = 1.0))]
    pub gravity: f32,
    /// Fraction of vertical speed kept after a floor bounce.
    #[schemars(title = "Bounciness", range(min = 0.0, max = 0.95), extend("step" = 0.05))]
    pub restitution: f32,
    /// Horizontal and spin speed multiplier applied on floor contact.
    #[schemars(title = "Friction", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub friction: f32,
    /// Lower bound of the outward impulse magnitude.
    #[schemars(title = "Min Impulse", range(min = 0.0, max = 40.0), extend("step" = 0.5))]
    pub impulse_min: f32,
    /// Upper bound of the outward impulse magnitude.
    #[schemars(title = "Max Impulse", range(min = 0.0, max = 40.0), extend("step" = 0.5))]
    pub impulse_max: f32,
    /// Extra upward velocity added to every particle.
    #[schemars(title = "Upward Bias", range(min = 0.0, max = 30.0), extend("step" = 0.5))]
    pub upward_bias: f32,
    /// Per-axis spin is drawn from `[-spin_max, spin_max]` rad/s.
    #[schemars(title = "Spin", range(min = 0.0, max = 30.0), extend("step" = 0.5))]
    pub spin_max: f32,
    /// Vertical speed below which a grounded particle stops bouncing.
    #[schemars(skip)]
    pub settle_epsilon: f32,
    /// Height of the floor plane.
    #[schemars(skip)]
    pub floor_y: f32,
    /// Longest physics sub-step in seconds.
    #[schemars(skip)]
    pub max_step: f32,
}

impl Default for DismantleOptions {
    fn default() -> Self {
        Self {
            gravity: 40.0,
            restitution: 0.45,
            friction: 0.8,
            impulse_min: 6.0,
            impulse_max: 16.0,
            upward_bias: 8.0,
            spin_max: 8.0,
            settle_epsilon: 0.6,
            floor_y: -12.0,
            max_step: 1.0 / 30.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rebuild", inline)]
#[serde(default)]
/// Reassembly timing.
pub struct RebuildOptions {
    /// Seconds each particle spends travelling to its target.
    #[schemars(title = "Duration", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub duration: f32,
    /// Start delays are drawn from `[0, max_stagger]` seconds.
    #[schemars(title = "Stagger", range(min = 0.0, max = 3.0), extend("step" = 0.1))]
    pub max_stagger: f32,
    /// Peak height of the travel arc above the straight path.
    #[schemars(title = "Arc Height", range(min = 0.0, max = 20.0), extend("step" = 0.5))]
    pub arc_height: f32,
    /// Progress curve along the arc.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for RebuildOptions {
    fn default() -> Self {
        Self {
            duration: 1.2,
            max_stagger: 0.8,
            arc_height: 6.0,
            easing: EasingFunction::DEFAULT,
        }
    }
}
