use std::fmt;

use serde::{Deserialize, Serialize};

use autoggle_core::{InstallMarker, MenuEntry, MenuInstaller, MergeInstruction, ParameterDecl};

/// Kinds of records a setup attaches to its target node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Parameters,
    MenuItem,
    MergeAnimator,
    MenuInstaller,
    InstallMarker,
}

impl RecordKind {
    /// Attach order used by setup; uninstall removes in the same set.
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Parameters,
        RecordKind::MenuItem,
        RecordKind::MergeAnimator,
        RecordKind::MenuInstaller,
        RecordKind::InstallMarker,
    ];

    /// Kinds whose pre-existing presence is worth a warning before setup.
    pub const COMPOSITION: [RecordKind; 4] = [
        RecordKind::Parameters,
        RecordKind::MenuItem,
        RecordKind::MergeAnimator,
        RecordKind::MenuInstaller,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Parameters => "Parameters",
            RecordKind::MenuItem => "Menu Item",
            RecordKind::MergeAnimator => "Merge Animator",
            RecordKind::MenuInstaller => "Menu Installer",
            RecordKind::InstallMarker => "Install Marker",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum AttachedRecord {
    /// Hosts may hold several parameter declarations in one record.
    Parameters(Vec<ParameterDecl>),
    MenuItem(MenuEntry),
    MergeAnimator(MergeInstruction),
    MenuInstaller(MenuInstaller),
    InstallMarker(InstallMarker),
}

impl AttachedRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            AttachedRecord::Parameters(_) => RecordKind::Parameters,
            AttachedRecord::MenuItem(_) => RecordKind::MenuItem,
            AttachedRecord::MergeAnimator(_) => RecordKind::MergeAnimator,
            AttachedRecord::MenuInstaller(_) => RecordKind::MenuInstaller,
            AttachedRecord::InstallMarker(_) => RecordKind::InstallMarker,
        }
    }

    /// Whether a setup that left `marker` behind attached this record.
    pub fn is_owned_by(&self, marker: &InstallMarker) -> bool {
        let param = marker.parameter_name.as_str();
        match self {
            AttachedRecord::Parameters(decls) => {
                !decls.is_empty() && decls.iter().all(|d| d.name == param)
            }
            AttachedRecord::MenuItem(entry) => entry.parameter == param,
            AttachedRecord::MergeAnimator(merge) => {
                merge.state_machine.location == marker.storage_token
            }
            AttachedRecord::MenuInstaller(installer) => {
                installer.menu_parameter.as_deref() == Some(param)
            }
            AttachedRecord::InstallMarker(m) => m == marker,
        }
    }

    pub fn as_marker(&self) -> Option<&InstallMarker> {
        match self {
            AttachedRecord::InstallMarker(m) => Some(m),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker() -> InstallMarker {
        InstallMarker {
            parameter_name: "AUToggle_Hat_00000001".into(),
            storage_token: "Assets/Gen/AUToggle_Hat_00000001".into(),
        }
    }

    #[test]
    fn ownership_follows_marker_parameter() {
        let m = marker();
        let owned = AttachedRecord::MenuInstaller(MenuInstaller {
            install_target_menu: None,
            menu_parameter: Some(m.parameter_name.clone()),
        });
        let foreign = AttachedRecord::MenuInstaller(MenuInstaller::default());
        assert!(owned.is_owned_by(&m));
        assert!(!foreign.is_owned_by(&m));
        assert!(AttachedRecord::InstallMarker(m.clone()).is_owned_by(&m));
        assert!(!AttachedRecord::Parameters(Vec::new()).is_owned_by(&m));
    }
}
