//! Two-state machine driven by one boolean parameter.

use serde::{Deserialize, Serialize};

use crate::asset::AssetRef;
use crate::error::{ToggleError, ToggleResult};

pub const ON_STATE_NAME: &str = "ON_State";
pub const OFF_STATE_NAME: &str = "OFF_State";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StateId {
    On,
    Off,
}

impl StateId {
    pub fn from_bool(shown: bool) -> Self {
        if shown {
            StateId::On
        } else {
            StateId::Off
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: StateId,
    pub name: String,
    pub motion: AssetRef,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ConditionMode {
    /// Parameter is true.
    If,
    /// Parameter is false.
    IfNot,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub mode: ConditionMode,
    pub parameter: String,
    pub threshold: f32,
}

impl Condition {
    pub fn holds(&self, value: bool) -> bool {
        match self.mode {
            ConditionMode::If => value,
            ConditionMode::IfNot => !value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
    pub condition: Condition,
    /// Always false: transitions fire on condition alone.
    pub has_exit_time: bool,
    /// Always zero: no cross-fade.
    pub duration: f32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    Bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineParameter {
    pub name: String,
    pub kind: ParameterKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateMachine {
    pub parameter: MachineParameter,
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
    pub default_state: StateId,
}

impl StateMachine {
    /// `OFF -> ON` when the parameter is true, `ON -> OFF` when it is false,
    /// both instantaneous. The initial state is fixed here from `default_state`.
    pub fn build(
        parameter: &str,
        default_state: bool,
        on_motion: AssetRef,
        off_motion: AssetRef,
    ) -> Self {
        let instant = |from, to, mode| Transition {
            from,
            to,
            condition: Condition {
                mode,
                parameter: parameter.to_string(),
                threshold: 0.0,
            },
            has_exit_time: false,
            duration: 0.0,
        };
        Self {
            parameter: MachineParameter {
                name: parameter.to_string(),
                kind: ParameterKind::Bool,
            },
            states: vec![
                State {
                    id: StateId::On,
                    name: ON_STATE_NAME.to_string(),
                    motion: on_motion,
                },
                State {
                    id: StateId::Off,
                    name: OFF_STATE_NAME.to_string(),
                    motion: off_motion,
                },
            ],
            transitions: vec![
                instant(StateId::Off, StateId::On, ConditionMode::If),
                instant(StateId::On, StateId::Off, ConditionMode::IfNot),
            ],
            default_state: StateId::from_bool(default_state),
        }
    }

    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    /// State reached from `current` after one evaluation with the parameter at `value`.
    pub fn next_state(&self, current: StateId, value: bool) -> StateId {
        self.transitions
            .iter()
            .find(|t| t.from == current && t.condition.holds(value))
            .map(|t| t.to)
            .unwrap_or(current)
    }

    pub fn validate(&self) -> ToggleResult<()> {
        if self.parameter.name.is_empty() {
            return Err(ToggleError::EmptyParameterName);
        }
        for id in [StateId::On, StateId::Off] {
            if self.states.iter().filter(|s| s.id == id).count() != 1 {
                return Err(ToggleError::InvalidStateMachine(format!(
                    "expected exactly one {id:?} state"
                )));
            }
        }
        if self.transitions.len() != 2 {
            return Err(ToggleError::InvalidStateMachine(format!(
                "expected 2 transitions, found {}",
                self.transitions.len()
            )));
        }
        for t in &self.transitions {
            if t.condition.parameter != self.parameter.name {
                return Err(ToggleError::InvalidStateMachine(format!(
                    "transition {:?} -> {:?} references unknown parameter '{}'",
                    t.from, t.to, t.condition.parameter
                )));
            }
            if t.has_exit_time || t.duration != 0.0 {
                return Err(ToggleError::InvalidStateMachine(format!(
                    "transition {:?} -> {:?} is not instantaneous",
                    t.from, t.to
                )));
            }
        }
        Ok(())
    }
}
