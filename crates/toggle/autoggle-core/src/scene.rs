//! Read-only scene arena the selector walks.
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]; parents
//! are plain handles, so several generation calls can borrow the same graph
//! without any ownership ambiguity. The graph is built once by the host and
//! never mutated by the pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{ToggleError, ToggleResult};

/// Opaque dense handle into a [`SceneGraph`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Host classification of an attached behaviour, reduced to what the
/// target selection needs to decide on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentTag {
    VisualRenderer,
    ParticleEmitter,
    LightSource,
    Collider,
    AnimatorDriver,
    /// Physics-simulated bone attachment.
    DynamicBone,
    /// Authoring-time tooling, never evaluated at runtime.
    EditorOnlyMarker,
    /// Structural; always present and never a decision input.
    Transform,
    Other,
}

impl ComponentTag {
    /// Tags that on their own justify toggling the carrying node.
    pub const PRIMARY: [ComponentTag; 5] = [
        ComponentTag::VisualRenderer,
        ComponentTag::ParticleEmitter,
        ComponentTag::LightSource,
        ComponentTag::Collider,
        ComponentTag::AnimatorDriver,
    ];

    #[inline]
    pub fn is_primary_targetable(self) -> bool {
        Self::PRIMARY.contains(&self)
    }

    #[inline]
    pub fn is_editor_only(self) -> bool {
        matches!(self, ComponentTag::EditorOnlyMarker)
    }

    #[inline]
    pub fn is_structural(self) -> bool {
        matches!(self, ComponentTag::Transform)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub components: Vec<ComponentTag>,
}

impl SceneNode {
    pub fn has(&self, tag: ComponentTag) -> bool {
        self.components.contains(&tag)
    }

    pub fn has_primary_targetable(&self) -> bool {
        self.components.iter().any(|c| c.is_primary_targetable())
    }

    /// Every non-structural component is an editor-only marker, and there is
    /// at least one of them.
    pub fn is_tooling_only(&self) -> bool {
        let mut non_structural = self
            .components
            .iter()
            .filter(|c| !c.is_structural())
            .peekable();
        non_structural.peek().is_some() && non_structural.all(|c| c.is_editor_only())
    }
}

/// Nested description of a subtree, the shape hosts and fixtures hand over.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneSpec {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentTag>,
    #[serde(default)]
    pub children: Vec<SceneSpec>,
}

#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Materialize a nested spec as a new root; returns the graph and the root handle.
    pub fn from_spec(spec: &SceneSpec) -> (Self, NodeId) {
        let mut graph = Self::new();
        let root = graph.insert_spec(None, spec);
        (graph, root)
    }

    /// Append `spec` below `parent` (or as a new root).
    pub fn insert_spec(&mut self, parent: Option<NodeId>, spec: &SceneSpec) -> NodeId {
        let id = self.push(parent, spec.name.clone());
        for tag in &spec.components {
            self.attach(id, *tag);
        }
        for child in &spec.children {
            self.insert_spec(Some(id), child);
        }
        id
    }

    pub fn add_root(&mut self, name: impl Into<String>) -> NodeId {
        self.push(None, name.into())
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
    ) -> ToggleResult<NodeId> {
        if !self.contains(parent) {
            return Err(ToggleError::UnknownNode(parent));
        }
        Ok(self.push(Some(parent), name.into()))
    }

    fn push(&mut self, parent: Option<NodeId>, name: String) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SceneNode {
            id,
            name,
            parent,
            children: Vec::new(),
            components: vec![ComponentTag::Transform],
        });
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        id
    }

    /// Attach a tag; attaching the same tag twice is a no-op.
    pub fn attach(&mut self, node: NodeId, tag: ComponentTag) {
        if let Some(n) = self.nodes.get_mut(node.index()) {
            if !n.components.contains(&tag) {
                n.components.push(tag);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    pub fn node(&self, id: NodeId) -> ToggleResult<&SceneNode> {
        self.get(id).ok_or(ToggleError::UnknownNode(id))
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter(|n| n.parent.is_none()).map(|n| n.id)
    }

    /// Pre-order walk below `id`, children in insertion order; `id` itself is excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.parent(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Slash-joined names from `ancestor` (exclusive) down to `node`.
    /// `Some("")` when both are the same node, `None` when `ancestor` is not above `node`.
    pub fn relative_path(&self, node: NodeId, ancestor: NodeId) -> Option<String> {
        if !self.contains(node) || !self.contains(ancestor) {
            return None;
        }
        let mut segments: Vec<&str> = Vec::new();
        let mut cur = node;
        while cur != ancestor {
            segments.push(self.name(cur)?);
            cur = self.parent(cur)?;
        }
        segments.reverse();
        Some(segments.join("/"))
    }

    /// Resolve a relative path produced by [`SceneGraph::relative_path`].
    /// Sibling names may repeat; the first match in child order wins.
    pub fn find_by_path(&self, root: NodeId, path: &str) -> Option<NodeId> {
        if !self.contains(root) {
            return None;
        }
        if path.is_empty() {
            return Some(root);
        }
        let mut cur = root;
        for segment in path.split('/') {
            cur = *self
                .children(cur)
                .iter()
                .find(|c| self.name(**c) == Some(segment))?;
        }
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (SceneGraph, NodeId, NodeId, NodeId) {
        let mut g = SceneGraph::new();
        let root = g.add_root("Root");
        let a = g.add_child(root, "A").unwrap();
        let b = g.add_child(a, "B").unwrap();
        let _c = g.add_child(root, "C").unwrap();
        (g, root, a, b)
    }

    #[test]
    fn relative_paths() {
        let (g, root, a, b) = sample();
        assert_eq!(g.relative_path(root, root).as_deref(), Some(""));
        assert_eq!(g.relative_path(b, root).as_deref(), Some("A/B"));
        assert_eq!(g.relative_path(b, a).as_deref(), Some("B"));
        assert_eq!(g.relative_path(root, b), None);
        assert_eq!(g.find_by_path(root, "A/B"), Some(b));
        assert_eq!(g.find_by_path(root, "A/Z"), None);
    }

    #[test]
    fn descendants_are_preorder() {
        let (g, root, _, _) = sample();
        let names: Vec<&str> = g
            .descendants(root)
            .into_iter()
            .filter_map(|n| g.name(n))
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn tooling_only_needs_at_least_one_marker() {
        let mut g = SceneGraph::new();
        let root = g.add_root("Root");
        let bare = g.add_child(root, "Bare").unwrap();
        let gizmo = g.add_child(root, "Gizmo").unwrap();
        g.attach(gizmo, ComponentTag::EditorOnlyMarker);
        let mixed = g.add_child(root, "Mixed").unwrap();
        g.attach(mixed, ComponentTag::EditorOnlyMarker);
        g.attach(mixed, ComponentTag::Other);

        assert!(!g.get(bare).unwrap().is_tooling_only());
        assert!(g.get(gizmo).unwrap().is_tooling_only());
        assert!(!g.get(mixed).unwrap().is_tooling_only());
    }

    #[test]
    fn add_child_rejects_unknown_parent() {
        let mut g = SceneGraph::new();
        let root = g.add_root("Root");
        assert_eq!(
            g.add_child(NodeId(7), "Orphan"),
            Err(ToggleError::UnknownNode(NodeId(7)))
        );
        assert_eq!(g.len(), 1);
        assert!(g.children(root).is_empty());
    }

    #[test]
    fn spec_round_trips_into_arena() {
        let spec: SceneSpec = serde_json::from_str(
            r#"{ "name": "Root", "children": [ { "name": "Mesh", "components": ["visual_renderer"] } ] }"#,
        )
        .unwrap();
        let (g, root) = SceneGraph::from_spec(&spec);
        assert_eq!(g.len(), 2);
        let mesh = g.find_by_path(root, "Mesh").unwrap();
        assert!(g.get(mesh).unwrap().has(ComponentTag::VisualRenderer));
        assert!(g.get(mesh).unwrap().has(ComponentTag::Transform));
    }
}
