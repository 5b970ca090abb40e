//! Setup and uninstall against a storage and a composition collaborator.
//!
//! Setup either completes or leaves both collaborators as it found them:
//! anything created after the storage location exists is rolled back on error.

use anyhow::{Context, Result};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use autoggle_core::{
    generate, AddressingMode, Disambiguator, GeneratedNames, Generation, GeneratorConfig, NodeId,
    RandomDisambiguator, SceneGraph, ToggleError, ToggleSettings,
};

use crate::composition::CompositionHost;
use crate::preflight::preflight;
use crate::records::{AttachedRecord, RecordKind};
use crate::storage::{AssetStore, StoredAsset};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetupReport {
    pub object_name: String,
    pub parameter_name: String,
    pub storage_token: String,
    pub mode: AddressingMode,
    pub target_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UninstallReport {
    pub object_name: String,
    pub parameter_name: String,
    /// Generated assets stay where they are.
    pub preserved_location: String,
    pub removed: Vec<RecordKind>,
}

pub struct Installer {
    config: GeneratorConfig,
    disambiguator: Box<dyn Disambiguator>,
}

impl Default for Installer {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Installer {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            disambiguator: Box::new(RandomDisambiguator),
        }
    }

    pub fn with_disambiguator(mut self, source: impl Disambiguator + 'static) -> Self {
        self.disambiguator = Box::new(source);
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn setup<S, C>(
        &mut self,
        graph: &SceneGraph,
        target: NodeId,
        settings: &ToggleSettings,
        store: &mut S,
        host: &mut C,
    ) -> Result<SetupReport>
    where
        S: AssetStore + ?Sized,
        C: CompositionHost + ?Sized,
    {
        let check = preflight(graph, target, settings, &*host)?;
        if let Some(err) = check.blocking_error() {
            error!("autoggle: setup of '{}' refused: {err}", check.object_name);
            return Err(err.into());
        }

        let object_name = check.object_name;
        let names = GeneratedNames::derive(&self.config, &object_name, &mut *self.disambiguator);
        info!("autoggle: parameter name: {}", names.parameter);
        info!("autoggle: storage location: {}", names.location);

        if store.location_exists(&names.location) {
            error!(
                "autoggle: location '{}' already exists; setup halted",
                names.location
            );
            return Err(ToggleError::StorageOccupied {
                location: names.location,
            }
            .into());
        }

        let generation = generate(graph, target, settings, &names)?;

        store
            .create_location(&names.location)
            .with_context(|| format!("create storage location '{}'", names.location))?;

        let mut attached: Vec<AttachedRecord> = Vec::new();
        let mut outcome = persist(store, &names, &generation);
        if outcome.is_ok() {
            outcome = attach_all(host, target, &generation, &mut attached);
        }

        if let Err(err) = outcome {
            error!("autoggle: setup of '{object_name}' failed, rolling back: {err:#}");
            for record in attached.iter().rev() {
                if !host.detach(target, record) {
                    warn!(
                        "autoggle: {} record vanished from '{object_name}' before rollback",
                        record.kind()
                    );
                }
            }
            if let Err(cleanup) = store.delete_location(&names.location) {
                warn!(
                    "autoggle: could not remove '{}' during rollback: {cleanup:#}",
                    names.location
                );
            }
            return Err(err);
        }

        info!(
            "autoggle: '{object_name}' set up with {} target(s)",
            generation.targets.len()
        );
        Ok(SetupReport {
            object_name,
            parameter_name: generation.config.parameter_name.clone(),
            storage_token: generation.config.marker.storage_token.clone(),
            mode: generation.mode,
            target_count: generation.targets.len(),
        })
    }
}

fn persist<S: AssetStore + ?Sized>(
    store: &mut S,
    names: &GeneratedNames,
    generation: &Generation,
) -> Result<()> {
    let assets = [
        (&names.controller, serde_json::to_value(generation.state_machine())?),
        (&names.on_clip, serde_json::to_value(&generation.clips.on)?),
        (&names.off_clip, serde_json::to_value(&generation.clips.off)?),
    ];
    for (asset, body) in assets {
        store
            .put_asset(
                &asset.location,
                StoredAsset {
                    name: asset.file.clone(),
                    kind: asset.kind,
                    body,
                },
            )
            .with_context(|| format!("persist '{asset}'"))?;
    }
    Ok(())
}

fn attach_all<C: CompositionHost + ?Sized>(
    host: &mut C,
    target: NodeId,
    generation: &Generation,
    attached: &mut Vec<AttachedRecord>,
) -> Result<()> {
    let cfg = &generation.config;
    let records = [
        AttachedRecord::Parameters(vec![cfg.parameter.clone()]),
        AttachedRecord::MenuItem(cfg.menu_entry.clone()),
        AttachedRecord::MergeAnimator(cfg.merge.clone()),
        AttachedRecord::MenuInstaller(cfg.menu_installer.clone()),
        AttachedRecord::InstallMarker(cfg.marker.clone()),
    ];
    for record in records {
        let kind = record.kind();
        host.attach(target, record.clone())
            .with_context(|| format!("attach {kind} record"))?;
        attached.push(record);
    }
    Ok(())
}

/// Remove the records the installed setup attached, recognised through its
/// install marker. Other records on the node and persisted assets stay.
pub fn uninstall<C: CompositionHost + ?Sized>(
    graph: &SceneGraph,
    target: NodeId,
    host: &mut C,
) -> Result<UninstallReport> {
    let object_name = graph.node(target)?.name.clone();
    let Some(marker) = host.marker(target).cloned() else {
        warn!("autoggle: '{object_name}' has no install marker; nothing to uninstall");
        return Err(ToggleError::NotInstalled {
            object: object_name,
        }
        .into());
    };

    let owned: Vec<AttachedRecord> = host
        .records(target)
        .iter()
        .filter(|r| r.is_owned_by(&marker))
        .cloned()
        .collect();
    let removed: Vec<RecordKind> = owned
        .iter()
        .filter(|r| host.detach(target, r))
        .map(AttachedRecord::kind)
        .collect();

    info!(
        "autoggle: removed {} record(s) from '{object_name}'",
        removed.len()
    );
    info!(
        "autoggle: asset location '{}' preserved",
        marker.storage_token
    );
    Ok(UninstallReport {
        object_name,
        parameter_name: marker.parameter_name,
        preserved_location: marker.storage_token,
        removed,
    })
}
