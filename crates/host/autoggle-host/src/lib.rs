//! autoggle-host
//!
//! The two collaborators a toggle generation hands its output to: a storage
//! layer for the authored clips and state machine, and a composition host that
//! attaches the declarative records to the target node. In-memory versions of
//! both are provided; real hosts implement the traits.

pub mod composition;
pub mod installer;
pub mod preflight;
pub mod records;
pub mod storage;

pub use crate::composition::{CompositionHost, MemoryComposition};
pub use crate::installer::{uninstall, Installer, SetupReport, UninstallReport};
pub use crate::preflight::{preflight, Issue, IssueKind, Preflight, Severity};
pub use crate::records::{AttachedRecord, RecordKind};
pub use crate::storage::{AssetStore, MemoryStore, StoredAsset};
