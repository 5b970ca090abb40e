//! Declarative records handed to the host composition system.
//!
//! Everything here is plain data. The host attaches the records to the target
//! node; the install marker is the only record uninstall and re-setup
//! detection consult.

use serde::{Deserialize, Serialize};

use crate::asset::AssetRef;
use crate::config::{IconRef, ToggleSettings};
use crate::error::{ToggleError, ToggleResult};
use crate::naming::GeneratedNames;
use crate::state_machine::StateMachine;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncType {
    Bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    pub sync_type: SyncType,
    pub saved: bool,
    pub default_value: f32,
    pub has_explicit_default: bool,
    pub internal: bool,
    pub is_prefix: bool,
    pub local_only: bool,
    /// Empty: no remap.
    pub remap_to: String,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    Toggle,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    pub icon: Option<IconRef>,
    pub control: ControlType,
    pub parameter: String,
    /// Nominal "on" value; hosts derive the effective one when `automatic_value` is set.
    pub value: f32,
    pub synced: bool,
    pub saved: bool,
    pub is_default: bool,
    pub automatic_value: bool,
}

/// Layer category the machine is merged into.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerCategory {
    /// Base locomotion layers; never used by toggles.
    BaseMotion,
    /// Feature logic (expressions, toggles).
    FeatureLogic,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathMode {
    /// Curve paths are relative to the node the records are attached to.
    Relative,
    /// Curve paths are relative to the composition root.
    Absolute,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MergeInstruction {
    pub state_machine: AssetRef,
    pub layer: LayerCategory,
    /// Drop a machine left at the same attachment point by an earlier generation.
    pub delete_attached: bool,
    pub path_mode: PathMode,
    pub match_write_defaults: bool,
}

/// Installs the menu entry into the composition root's menu.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuInstaller {
    /// `None`: the root menu.
    pub install_target_menu: Option<String>,
    /// Parameter of the menu entry this installer publishes.
    #[serde(default)]
    pub menu_parameter: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct InstallMarker {
    pub parameter_name: String,
    pub storage_token: String,
}

/// Immutable output of one setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToggleConfig {
    pub parameter_name: String,
    pub default_state: bool,
    pub saved: bool,
    pub menu_label: String,
    pub icon: Option<IconRef>,
    pub on_clip: AssetRef,
    pub off_clip: AssetRef,
    pub state_machine: StateMachine,
    pub parameter: ParameterDecl,
    pub menu_entry: MenuEntry,
    pub merge: MergeInstruction,
    pub menu_installer: MenuInstaller,
    pub marker: InstallMarker,
}

impl ToggleConfig {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub fn parameter_decl(name: &str, settings: &ToggleSettings) -> ParameterDecl {
    ParameterDecl {
        name: name.to_string(),
        sync_type: SyncType::Bool,
        saved: settings.saved,
        default_value: if settings.default_state { 1.0 } else { 0.0 },
        has_explicit_default: true,
        internal: false,
        is_prefix: false,
        local_only: false,
        remap_to: String::new(),
    }
}

pub fn menu_entry(name: &str, object_name: &str, settings: &ToggleSettings) -> MenuEntry {
    MenuEntry {
        label: settings.display_label(object_name).to_string(),
        icon: settings.icon.clone(),
        control: ControlType::Toggle,
        parameter: name.to_string(),
        value: 1.0,
        synced: true,
        saved: settings.saved,
        is_default: settings.default_state,
        automatic_value: true,
    }
}

pub fn merge_instruction(state_machine: AssetRef) -> MergeInstruction {
    MergeInstruction {
        state_machine,
        layer: LayerCategory::FeatureLogic,
        delete_attached: true,
        path_mode: PathMode::Relative,
        match_write_defaults: false,
    }
}

/// Assemble the bundle. `object_name` is the target node's own name.
pub fn emit(
    names: &GeneratedNames,
    object_name: &str,
    settings: &ToggleSettings,
    state_machine: StateMachine,
) -> ToggleResult<ToggleConfig> {
    if names.parameter.is_empty() {
        return Err(ToggleError::EmptyParameterName);
    }
    state_machine.validate()?;
    let menu = menu_entry(&names.parameter, object_name, settings);
    Ok(ToggleConfig {
        parameter_name: names.parameter.clone(),
        default_state: settings.default_state,
        saved: settings.saved,
        menu_label: menu.label.clone(),
        icon: settings.icon.clone(),
        on_clip: names.on_clip.clone(),
        off_clip: names.off_clip.clone(),
        parameter: parameter_decl(&names.parameter, settings),
        menu_entry: menu,
        merge: merge_instruction(names.controller.clone()),
        menu_installer: MenuInstaller {
            install_target_menu: None,
            menu_parameter: Some(names.parameter.clone()),
        },
        marker: InstallMarker {
            parameter_name: names.parameter.clone(),
            storage_token: names.location.clone(),
        },
        state_machine,
    })
}
