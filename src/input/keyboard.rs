use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// dismantle = "KeyD"
/// toggle_auto_rotate = "Space"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Blow the current structure apart.
    Dismantle,
    /// Reassemble the debris into the next target model.
    Rebuild,
    /// Pause or resume the idle orbit.
    ToggleAutoRotate,
    /// Hard-reset to the initial model.
    ResetModel,
    /// Log the current scene as JSON.
    ExportJson,
}

impl KeyAction {
    /// Every bindable action.
    pub const ALL: [Self; 5] = [
        Self::Dismantle,
        Self::Rebuild,
        Self::ToggleAutoRotate,
        Self::ResetModel,
        Self::ExportJson,
    ];
}
