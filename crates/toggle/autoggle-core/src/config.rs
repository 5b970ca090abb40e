//! Generator configuration and per-invocation toggle settings.

use serde::{Deserialize, Serialize};

use crate::selector::AddressingMode;

/// Where and how generated assets and parameters are named.
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Parent of every per-generation storage location.
    pub base_path: String,
    pub parameter_prefix: String,
    /// Used when the sanitized node name is empty.
    pub fallback_name: String,
    /// Hex digits taken from the random disambiguator (1..=32).
    pub disambiguator_len: usize,
    pub controller_prefix: String,
    pub controller_extension: String,
    pub on_clip_file: String,
    pub off_clip_file: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_path: "Assets/AUToggle/Generated".to_string(),
            parameter_prefix: "AUToggle".to_string(),
            fallback_name: "GameObject".to_string(),
            disambiguator_len: 8,
            controller_prefix: "AC".to_string(),
            controller_extension: "controller".to_string(),
            on_clip_file: "ON.anim".to_string(),
            off_clip_file: "OFF.anim".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub(crate) fn disambiguator_len(&self) -> usize {
        self.disambiguator_len.clamp(1, 32)
    }
}

/// Opaque handle to a host icon asset.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct IconRef(pub String);

/// User-facing inputs of one setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleSettings {
    /// Blank falls back to the target node's name.
    pub menu_label: String,
    pub icon: Option<IconRef>,
    /// Shown on load when true.
    pub default_state: bool,
    /// Persist the toggle state across sessions.
    pub saved: bool,
    /// Bypasses the complexity heuristic when set.
    pub addressing: Option<AddressingMode>,
}

impl Default for ToggleSettings {
    fn default() -> Self {
        Self {
            menu_label: String::new(),
            icon: None,
            default_state: true,
            saved: true,
            addressing: None,
        }
    }
}

impl ToggleSettings {
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.menu_label = label.into();
        self
    }

    pub fn with_default_state(mut self, shown: bool) -> Self {
        self.default_state = shown;
        self
    }

    pub fn with_saved(mut self, saved: bool) -> Self {
        self.saved = saved;
        self
    }

    pub fn with_icon(mut self, icon: IconRef) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_addressing(mut self, mode: AddressingMode) -> Self {
        self.addressing = Some(mode);
        self
    }

    /// Configured label, or `fallback` when the label is blank.
    pub fn display_label<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.menu_label.trim().is_empty() {
            fallback
        } else {
            &self.menu_label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = GeneratorConfig::from_json(r#"{ "parameter_prefix": "Toggle" }"#).unwrap();
        assert_eq!(cfg.parameter_prefix, "Toggle");
        assert_eq!(cfg.base_path, GeneratorConfig::default().base_path);
    }

    #[test]
    fn blank_label_falls_back() {
        let s = ToggleSettings::default().with_label("   ");
        assert_eq!(s.display_label("Hat"), "Hat");
        let s = s.with_label("Cap");
        assert_eq!(s.display_label("Hat"), "Cap");
    }
}
