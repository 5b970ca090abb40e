//! Selector -> clip author -> state machine -> emitter, in one call.

use serde::{Deserialize, Serialize};

use crate::clip::{ClipAuthor, ClipPair};
use crate::config::ToggleSettings;
use crate::emitter::{self, ToggleConfig};
use crate::error::ToggleResult;
use crate::naming::GeneratedNames;
use crate::scene::{NodeId, SceneGraph};
use crate::selector::{self, AddressingMode};
use crate::state_machine::StateMachine;
use crate::target::TargetSet;

/// Everything one generation produces. The clips and the machine are what the
/// storage collaborator persists; `config` is what the composition host attaches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub mode: AddressingMode,
    pub targets: TargetSet,
    pub clips: ClipPair,
    pub config: ToggleConfig,
}

impl Generation {
    pub fn state_machine(&self) -> &StateMachine {
        &self.config.state_machine
    }
}

pub fn generate(
    graph: &SceneGraph,
    root: NodeId,
    settings: &ToggleSettings,
    names: &GeneratedNames,
) -> ToggleResult<Generation> {
    let object_name = graph.node(root)?.name.clone();
    let (mode, targets) = selector::select(graph, root, settings.addressing)?;

    let clips = ClipAuthor::new().author_new(&targets);
    let machine = StateMachine::build(
        &names.parameter,
        settings.default_state,
        names.on_clip.clone(),
        names.off_clip.clone(),
    );
    let config = emitter::emit(names, &object_name, settings, machine)?;

    Ok(Generation {
        mode,
        targets,
        clips,
        config,
    })
}
