//! Error taxonomy shared by the pipeline and its host collaborators.

use thiserror::Error;

use crate::scene::NodeId;

/// Failures of a single generation attempt. None of them leave partial state
/// behind inside this crate; host-side rollback is the caller's concern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    #[error("node {0:?} does not exist in the scene graph")]
    UnknownNode(NodeId),
    #[error("parameter name must not be empty")]
    EmptyParameterName,
    #[error("storage location '{location}' already exists")]
    StorageOccupied { location: String },
    #[error("'{object}' already carries an install marker")]
    AlreadyInstalled { object: String },
    #[error("'{object}' has no install marker")]
    NotInstalled { object: String },
    #[error("'{object}' is not inside a composition root")]
    MissingCompositionRoot { object: String },
    #[error("'{object}' is a composition root and cannot host a toggle")]
    TargetIsCompositionRoot { object: String },
    #[error("invalid state machine: {0}")]
    InvalidStateMachine(String),
}

pub type ToggleResult<T> = Result<T, ToggleError>;
