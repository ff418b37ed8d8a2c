use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `dismantle` → `"KeyD"`). Key strings
    /// use the `winit::keyboard::KeyCode` debug format.
    pub bindings: HashMap<KeyAction, String>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::Dismantle, "KeyD".into()),
            (KeyAction::Rebuild, "KeyB".into()),
            (KeyAction::ToggleAutoRotate, "KeyR".into()),
            (KeyAction::ResetModel, "KeyN".into()),
            (KeyAction::ExportJson, "KeyE".into()),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action bound to a key string. When several actions
    /// share a key, the first in [`KeyAction::ALL`] wins.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        KeyAction::ALL
            .into_iter()
            .find(|action| self.key_for(*action) == Some(key))
    }

    /// Key currently bound to `action`.
    #[must_use]
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.bindings.get(&action).map(String::as_str)
    }
}
