use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Clip,
    StateMachine,
}

/// Reference to a generated asset: storage location plus file name.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub location: String,
    pub file: String,
    pub kind: AssetKind,
}

impl AssetRef {
    pub fn new(location: impl Into<String>, file: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            location: location.into(),
            file: file.into(),
            kind,
        }
    }

    pub fn path(&self) -> String {
        if self.location.is_empty() {
            self.file.clone()
        } else {
            format!("{}/{}", self.location, self.file)
        }
    }
}

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
