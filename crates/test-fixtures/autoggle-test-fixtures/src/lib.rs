//! Shared JSON fixtures for the autoggle crates, keyed by `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenes: HashMap<String, SceneEntry>,
    /// Config name -> path of a `GeneratorConfig` document.
    #[serde(rename = "generator-configs")]
    generator_configs: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct SceneEntry {
    spec: String,
    #[serde(default)]
    expected: Option<String>,
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn entry<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Scene subtrees described as nested `{ name, components, children }` JSON,
/// optionally paired with the target selection they are expected to produce.
pub mod scenes {
    use super::*;

    /// Sorted, so fixture-driven tests iterate deterministically.
    pub fn keys() -> Vec<String> {
        let mut keys: Vec<String> = MANIFEST.scenes.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn spec<T: DeserializeOwned>(name: &str) -> Result<T> {
        load_json(&entry(&MANIFEST.scenes, "scene", name)?.spec)
    }

    pub fn expected<T: DeserializeOwned>(name: &str) -> Result<Option<T>> {
        match &entry(&MANIFEST.scenes, "scene", name)?.expected {
            Some(rel) => load_json(rel).map(Some),
            None => Ok(None),
        }
    }
}

pub mod generator_configs {
    use super::*;

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        load_json(entry(&MANIFEST.generator_configs, "generator config", name)?)
    }
}
