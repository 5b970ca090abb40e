//! Storage collaborator: where generated clips and machines are persisted.

use anyhow::{anyhow, bail, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use autoggle_core::AssetKind;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredAsset {
    pub name: String,
    pub kind: AssetKind,
    pub body: serde_json::Value,
}

impl StoredAsset {
    pub fn from_value<T: Serialize>(name: &str, kind: AssetKind, value: &T) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            kind,
            body: serde_json::to_value(value)?,
        })
    }
}

/// Locations are opaque tokens; the installer never interprets them beyond
/// equality. Callers serialize writes per location by holding `&mut`.
pub trait AssetStore {
    fn location_exists(&self, location: &str) -> bool;
    /// Fails if the location already exists.
    fn create_location(&mut self, location: &str) -> Result<()>;
    /// Fails if the location is missing or already holds an asset named `asset.name`.
    fn put_asset(&mut self, location: &str, asset: StoredAsset) -> Result<()>;
    fn delete_location(&mut self, location: &str) -> Result<()>;
    fn assets(&self, location: &str) -> Option<Vec<&StoredAsset>>;
}

/// Insertion-ordered in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    folders: IndexMap<String, IndexMap<String, StoredAsset>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.folders.keys().map(String::as_str)
    }

    pub fn asset(&self, location: &str, name: &str) -> Option<&StoredAsset> {
        self.folders.get(location).and_then(|f| f.get(name))
    }
}

impl AssetStore for MemoryStore {
    fn location_exists(&self, location: &str) -> bool {
        self.folders.contains_key(location)
    }

    fn create_location(&mut self, location: &str) -> Result<()> {
        if self.folders.contains_key(location) {
            bail!("location '{location}' already exists");
        }
        self.folders.insert(location.to_string(), IndexMap::new());
        Ok(())
    }

    fn put_asset(&mut self, location: &str, asset: StoredAsset) -> Result<()> {
        let folder = self
            .folders
            .get_mut(location)
            .ok_or_else(|| anyhow!("location '{location}' does not exist"))?;
        if folder.contains_key(&asset.name) {
            bail!("asset '{}' already exists in '{location}'", asset.name);
        }
        folder.insert(asset.name.clone(), asset);
        Ok(())
    }

    fn delete_location(&mut self, location: &str) -> Result<()> {
        self.folders
            .shift_remove(location)
            .map(|_| ())
            .ok_or_else(|| anyhow!("location '{location}' does not exist"))
    }

    fn assets(&self, location: &str) -> Option<Vec<&StoredAsset>> {
        self.folders.get(location).map(|f| f.values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_put_delete() {
        let mut store = MemoryStore::new();
        store.create_location("gen/a").unwrap();
        assert!(store.create_location("gen/a").is_err());
        let asset = StoredAsset::from_value("ON.anim", AssetKind::Clip, &1).unwrap();
        store.put_asset("gen/a", asset.clone()).unwrap();
        assert!(store.put_asset("gen/a", asset).is_err());
        assert_eq!(store.assets("gen/a").unwrap().len(), 1);
        store.delete_location("gen/a").unwrap();
        assert!(!store.location_exists("gen/a"));
        assert!(store.put_asset("gen/a", StoredAsset::from_value("x", AssetKind::Clip, &0).unwrap()).is_err());
    }
}
