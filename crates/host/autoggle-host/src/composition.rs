//! Composition collaborator: the host system that records get attached to.

use anyhow::Result;
use hashbrown::HashSet;
use indexmap::IndexMap;

use autoggle_core::{InstallMarker, NodeId, SceneGraph};

use crate::records::{AttachedRecord, RecordKind};

pub trait CompositionHost {
    fn records(&self, node: NodeId) -> &[AttachedRecord];
    fn attach(&mut self, node: NodeId, record: AttachedRecord) -> Result<()>;
    /// Removes the most recently attached record equal to `record`.
    fn detach(&mut self, node: NodeId, record: &AttachedRecord) -> bool;
    /// Nearest composition root at or above `node`.
    fn composition_root_of(&self, graph: &SceneGraph, node: NodeId) -> Option<NodeId>;

    fn has(&self, node: NodeId, kind: RecordKind) -> bool {
        self.records(node).iter().any(|r| r.kind() == kind)
    }

    fn marker(&self, node: NodeId) -> Option<&InstallMarker> {
        self.records(node).iter().find_map(AttachedRecord::as_marker)
    }
}

#[derive(Debug, Default)]
pub struct MemoryComposition {
    records: IndexMap<NodeId, Vec<AttachedRecord>>,
    roots: HashSet<NodeId>,
}

impl MemoryComposition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: NodeId) -> Self {
        self.mark_root(root);
        self
    }

    pub fn mark_root(&mut self, root: NodeId) {
        self.roots.insert(root);
    }

    pub fn is_root(&self, node: NodeId) -> bool {
        self.roots.contains(&node)
    }

    /// Nodes that currently carry at least one record.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.records
            .iter()
            .filter(|(_, r)| !r.is_empty())
            .map(|(n, _)| *n)
    }
}

impl CompositionHost for MemoryComposition {
    fn records(&self, node: NodeId) -> &[AttachedRecord] {
        self.records.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    fn attach(&mut self, node: NodeId, record: AttachedRecord) -> Result<()> {
        self.records.entry(node).or_default().push(record);
        Ok(())
    }

    fn detach(&mut self, node: NodeId, record: &AttachedRecord) -> bool {
        let Some(list) = self.records.get_mut(&node) else {
            return false;
        };
        match list.iter().rposition(|r| r == record) {
            Some(idx) => {
                list.remove(idx);
                true
            }
            None => false,
        }
    }

    fn composition_root_of(&self, graph: &SceneGraph, node: NodeId) -> Option<NodeId> {
        let mut cur = Some(node);
        while let Some(id) = cur {
            if self.roots.contains(&id) {
                return Some(id);
            }
            cur = graph.parent(id);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoggle_core::MenuInstaller;

    #[test]
    fn root_lookup_walks_ancestors() {
        let mut g = SceneGraph::new();
        let avatar = g.add_root("Avatar");
        let hat = g.add_child(avatar, "Hat").unwrap();
        let stray = g.add_root("Stray");
        let host = MemoryComposition::new().with_root(avatar);
        assert_eq!(host.composition_root_of(&g, hat), Some(avatar));
        assert_eq!(host.composition_root_of(&g, avatar), Some(avatar));
        assert_eq!(host.composition_root_of(&g, stray), None);
    }

    #[test]
    fn detach_removes_only_the_matching_record() {
        let mut host = MemoryComposition::new();
        let n = NodeId(1);
        let user = AttachedRecord::MenuInstaller(MenuInstaller {
            install_target_menu: Some("Outfits".into()),
            menu_parameter: None,
        });
        let ours = AttachedRecord::MenuInstaller(MenuInstaller::default());
        host.attach(n, user.clone()).unwrap();
        host.attach(n, ours.clone()).unwrap();

        assert!(host.detach(n, &ours));
        assert_eq!(host.records(n), std::slice::from_ref(&user));
        assert!(!host.detach(n, &ours));
        assert!(host.has(n, RecordKind::MenuInstaller));
    }
}
