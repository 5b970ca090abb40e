//! Target selection: which nodes of a subtree receive an activity curve.
//!
//! Two addressing conventions exist:
//! - `Simple`: the subtree root itself is toggled (one target, path `""`).
//! - `PerNodeActive`: every descendant carrying a primary-targetable
//!   component (renderer, particles, light, collider, animator) is toggled
//!   individually and the root is left alone, so rig dynamics below the root
//!   keep running.
//!
//! When the caller does not request a convention, [`is_complex_subtree`]
//! picks one from a coarse heuristic (dynamic bones or a skeleton root named
//! `Armature` anywhere below the root).

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::ToggleResult;
use crate::scene::{ComponentTag, NodeId, SceneGraph};
use crate::target::{AnimationTarget, TargetSet};

/// Reserved skeleton root name, compared case-insensitively.
pub const SKELETON_ROOT_NAME: &str = "Armature";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressingMode {
    Simple,
    PerNodeActive,
}

/// True when anything strictly below `root` carries a dynamic bone or is named
/// like a skeleton root. Either condition alone is sufficient.
pub fn is_complex_subtree(graph: &SceneGraph, root: NodeId) -> bool {
    graph.descendants(root).into_iter().any(|id| {
        graph.get(id).is_some_and(|n| {
            n.has(ComponentTag::DynamicBone) || n.name.eq_ignore_ascii_case(SKELETON_ROOT_NAME)
        })
    })
}

/// An explicit request wins; otherwise fall back to the heuristic.
pub fn resolve_mode(
    graph: &SceneGraph,
    root: NodeId,
    requested: Option<AddressingMode>,
) -> AddressingMode {
    let mode = match requested {
        Some(mode) => mode,
        None if is_complex_subtree(graph, root) => AddressingMode::PerNodeActive,
        None => AddressingMode::Simple,
    };
    info!(
        "autoggle: '{}' uses {:?} addressing{}",
        graph.name(root).unwrap_or_default(),
        mode,
        if requested.is_some() { " (requested)" } else { "" }
    );
    mode
}

/// Compute the ordered target set for `root` under `mode`.
///
/// The result is a pure function of the graph and the mode: descendants are
/// visited in pre-order with children in their stored order.
pub fn select_targets(
    graph: &SceneGraph,
    root: NodeId,
    mode: AddressingMode,
) -> ToggleResult<TargetSet> {
    let root_node = graph.node(root)?;
    let mut targets = TargetSet::new();

    match mode {
        AddressingMode::Simple => {
            debug!("autoggle: targeting root '{}' activity", root_node.name);
            targets.insert(AnimationTarget::active(""));
        }
        AddressingMode::PerNodeActive => {
            for id in graph.descendants(root) {
                let Some(node) = graph.get(id) else { continue };
                if !node.has_primary_targetable() {
                    continue;
                }
                // tooling-only branches never toggle
                if node.is_tooling_only() {
                    debug!("autoggle: skipping tooling-only node '{}'", node.name);
                    continue;
                }
                let Some(path) = graph.relative_path(id, root) else {
                    continue;
                };
                debug!("autoggle: targeting '{path}' activity");
                targets.insert(AnimationTarget::active(path));
            }
        }
    }
    Ok(targets)
}

/// Mode resolution followed by selection.
pub fn select(
    graph: &SceneGraph,
    root: NodeId,
    requested: Option<AddressingMode>,
) -> ToggleResult<(AddressingMode, TargetSet)> {
    graph.node(root)?;
    let mode = resolve_mode(graph, root, requested);
    let targets = select_targets(graph, root, mode)?;
    Ok((mode, targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToggleError;

    #[test]
    fn childless_root_is_simple() {
        let mut g = SceneGraph::new();
        let root = g.add_root("Hat");
        g.attach(root, ComponentTag::VisualRenderer);
        assert!(!is_complex_subtree(&g, root));
        let (mode, targets) = select(&g, root, None).unwrap();
        assert_eq!(mode, AddressingMode::Simple);
        assert_eq!(targets.as_slice(), &[AnimationTarget::active("")]);
    }

    #[test]
    fn root_named_armature_does_not_count() {
        let mut g = SceneGraph::new();
        let root = g.add_root("Armature");
        g.add_child(root, "Mesh").unwrap();
        assert!(!is_complex_subtree(&g, root));
    }

    #[test]
    fn dynamic_bone_forces_per_node() {
        let mut g = SceneGraph::new();
        let root = g.add_root("Tail");
        let bone = g.add_child(root, "Bone").unwrap();
        g.attach(bone, ComponentTag::DynamicBone);
        let mesh = g.add_child(root, "Mesh").unwrap();
        g.attach(mesh, ComponentTag::VisualRenderer);

        let (mode, targets) = select(&g, root, None).unwrap();
        assert_eq!(mode, AddressingMode::PerNodeActive);
        assert_eq!(targets.as_slice(), &[AnimationTarget::active("Mesh")]);
    }

    #[test]
    fn explicit_request_overrides_heuristic() {
        let mut g = SceneGraph::new();
        let root = g.add_root("Outfit");
        g.add_child(root, "armature").unwrap();
        let (mode, targets) = select(&g, root, Some(AddressingMode::Simple)).unwrap();
        assert_eq!(mode, AddressingMode::Simple);
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn per_node_never_targets_the_root() {
        let mut g = SceneGraph::new();
        let root = g.add_root("Prop");
        g.attach(root, ComponentTag::VisualRenderer);
        let targets = select_targets(&g, root, AddressingMode::PerNodeActive).unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn unknown_root_is_rejected() {
        let g = SceneGraph::new();
        let err = select_targets(&g, NodeId(3), AddressingMode::Simple).unwrap_err();
        assert_eq!(err, ToggleError::UnknownNode(NodeId(3)));
    }
}
