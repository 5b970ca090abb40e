//! Checks run before a setup, reported as data so any front end can show them.

use log::warn;
use serde::{Deserialize, Serialize};

use autoggle_core::{NodeId, SceneGraph, ToggleError, ToggleResult, ToggleSettings};

use crate::composition::CompositionHost;
use crate::records::RecordKind;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingCompositionRoot,
    TargetIsCompositionRoot,
    AlreadyInstalled,
    /// Records of these kinds are already attached and will be joined by new ones.
    ExistingRecords(Vec<RecordKind>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub kind: IssueKind,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preflight {
    pub object_name: String,
    /// Label the menu entry will show.
    pub display_label: String,
    pub composition_root: Option<NodeId>,
    pub issues: Vec<Issue>,
}

impl Preflight {
    pub fn can_proceed(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// First blocking issue as an error.
    pub fn blocking_error(&self) -> Option<ToggleError> {
        let object = self.object_name.clone();
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .find_map(|i| match i.kind {
                IssueKind::MissingCompositionRoot => {
                    Some(ToggleError::MissingCompositionRoot { object: object.clone() })
                }
                IssueKind::TargetIsCompositionRoot => {
                    Some(ToggleError::TargetIsCompositionRoot { object: object.clone() })
                }
                IssueKind::AlreadyInstalled => {
                    Some(ToggleError::AlreadyInstalled { object: object.clone() })
                }
                IssueKind::ExistingRecords(_) => None,
            })
    }
}

pub fn preflight<C: CompositionHost + ?Sized>(
    graph: &SceneGraph,
    target: NodeId,
    settings: &ToggleSettings,
    host: &C,
) -> ToggleResult<Preflight> {
    let node = graph.node(target)?;
    let mut issues = Vec::new();

    let composition_root = host.composition_root_of(graph, target);
    match composition_root {
        None => issues.push(Issue {
            severity: Severity::Error,
            kind: IssueKind::MissingCompositionRoot,
            message: format!("'{}' is not inside a composition root", node.name),
        }),
        Some(root) if root == target => issues.push(Issue {
            severity: Severity::Error,
            kind: IssueKind::TargetIsCompositionRoot,
            message: format!(
                "'{}' is the composition root; select an item inside it",
                node.name
            ),
        }),
        Some(_) => {}
    }

    if host.marker(target).is_some() {
        issues.push(Issue {
            severity: Severity::Error,
            kind: IssueKind::AlreadyInstalled,
            message: format!("'{}' already has a toggle installed", node.name),
        });
    } else {
        let existing: Vec<RecordKind> = RecordKind::COMPOSITION
            .into_iter()
            .filter(|k| host.has(target, *k))
            .collect();
        if !existing.is_empty() {
            let labels: Vec<&str> = existing.iter().map(|k| k.label()).collect();
            let message = format!(
                "'{}' already carries: {}; new records of these kinds will be added",
                node.name,
                labels.join(", ")
            );
            warn!("autoggle: {message}");
            issues.push(Issue {
                severity: Severity::Warning,
                kind: IssueKind::ExistingRecords(existing),
                message,
            });
        }
    }

    Ok(Preflight {
        object_name: node.name.clone(),
        display_label: settings.display_label(&node.name).to_string(),
        composition_root,
        issues,
    })
}
