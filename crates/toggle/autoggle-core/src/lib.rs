//! autoggle-core (host-agnostic)
//!
//! Generates a show/hide toggle for a scene subtree: picks the nodes to
//! drive, authors constant ON/OFF clips, builds the two-state machine and
//! emits the declarative records a host composition system attaches. No I/O
//! happens here; storage and composition live behind the host crate's traits.

pub mod asset;
pub mod clip;
pub mod config;
pub mod emitter;
pub mod error;
pub mod naming;
pub mod pipeline;
pub mod scene;
pub mod selector;
pub mod state_machine;
pub mod target;

// Re-exports for consumers (hosts)
pub use asset::{AssetKind, AssetRef};
pub use clip::{Clip, ClipAuthor, ClipPair, ConstantCurve, HIDDEN, SHOWN};
pub use config::{GeneratorConfig, IconRef, ToggleSettings};
pub use emitter::{
    InstallMarker, LayerCategory, MenuEntry, MenuInstaller, MergeInstruction, ParameterDecl,
    PathMode, ToggleConfig,
};
pub use error::{ToggleError, ToggleResult};
pub use naming::{
    sanitize_name, Disambiguator, GeneratedNames, RandomDisambiguator, SequenceDisambiguator,
};
pub use pipeline::{generate, Generation};
pub use scene::{ComponentTag, NodeId, SceneGraph, SceneNode, SceneSpec};
pub use selector::{is_complex_subtree, resolve_mode, select_targets, AddressingMode};
pub use state_machine::{StateId, StateMachine};
pub use target::{AnimationTarget, PropertyKey, TargetSet};
