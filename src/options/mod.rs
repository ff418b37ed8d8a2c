//! Tweakable engine settings with TOML preset support.
//!
//! Camera, animation, display, lighting and keybinding settings are
//! consolidated here. Options serialize to/from TOML so a preset file can
//! override any subset of them.

mod animation;
mod camera;
mod display;
mod keybindings;
mod lighting;

use std::path::Path;

pub use animation::{AnimationOptions, DismantleOptions, RebuildOptions};
pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::VoxelError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation.dismantle]`) work.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Dismantle physics and rebuild timing.
    pub animation: AnimationOptions,
    /// Voxel size and backdrop.
    pub display: DisplayOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, VoxelError> {
        toml::from_str(content).map_err(|e| VoxelError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, VoxelError> {
        let content = std::fs::read_to_string(path).map_err(VoxelError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), VoxelError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VoxelError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VoxelError::Io)?;
        }
        std::fs::write(path, content).map_err(VoxelError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
