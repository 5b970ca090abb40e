//! Animation targets and the ordered, deduplicated set the selector produces.

use std::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Property a curve drives. Only node-level activity is addressed; per-component
/// `enabled` targeting is a possible extension and deliberately absent.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKey {
    Active,
}

impl PropertyKey {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKey::Active => "active",
        }
    }

    /// Property name the host's curve bindings use.
    pub fn binding_name(self) -> &'static str {
        match self {
            PropertyKey::Active => "m_IsActive",
        }
    }
}

/// `(path, property)`; `path` is relative to the subtree root, `""` is the root.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnimationTarget {
    pub path: String,
    pub property: PropertyKey,
}

impl AnimationTarget {
    pub fn active(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            property: PropertyKey::Active,
        }
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

impl fmt::Display for AnimationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "<root>.{}", self.property.as_str())
        } else {
            write!(f, "{}.{}", self.path, self.property.as_str())
        }
    }
}

/// Insertion-ordered targets without duplicates. Iteration order never depends
/// on hashing, only on the order of [`TargetSet::insert`] calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AnimationTarget>", into = "Vec<AnimationTarget>")]
pub struct TargetSet {
    ordered: Vec<AnimationTarget>,
    #[serde(skip)]
    seen: HashSet<AnimationTarget>,
}

impl TargetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when an equal `(path, property)` is already present.
    pub fn insert(&mut self, target: AnimationTarget) -> bool {
        if self.seen.contains(&target) {
            return false;
        }
        self.seen.insert(target.clone());
        self.ordered.push(target);
        true
    }

    pub fn contains(&self, target: &AnimationTarget) -> bool {
        self.seen.contains(target)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnimationTarget> {
        self.ordered.iter()
    }

    pub fn as_slice(&self) -> &[AnimationTarget] {
        &self.ordered
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

impl From<Vec<AnimationTarget>> for TargetSet {
    fn from(targets: Vec<AnimationTarget>) -> Self {
        targets.into_iter().collect()
    }
}

impl From<TargetSet> for Vec<AnimationTarget> {
    fn from(set: TargetSet) -> Self {
        set.ordered
    }
}

impl FromIterator<AnimationTarget> for TargetSet {
    fn from_iter<I: IntoIterator<Item = AnimationTarget>>(iter: I) -> Self {
        let mut set = TargetSet::new();
        for t in iter {
            set.insert(t);
        }
        set
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a AnimationTarget;
    type IntoIter = std::slice::Iter<'a, AnimationTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.ordered.iter()
    }
}
