use std::collections::BTreeSet;

use cityscape_kernel::MoveIntent;
use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::action::Action;

/// Everything the tick loop needs from input for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    pub held: BTreeSet<Action>,
    /// Relative pointer motion since the previous tick (x turns, y tilts).
    pub pointer_delta: DVec2,
    /// The window or host asked the process to exit.
    pub exit_requested: bool,
}

impl InputState {
    pub fn holding(actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            held: actions.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn with_pointer(mut self, delta: DVec2) -> Self {
        self.pointer_delta = delta;
        self
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    pub fn quit_requested(&self) -> bool {
        self.exit_requested || self.is_held(Action::Quit)
    }

    /// Movement portion of this snapshot for the observer's movement model.
    pub fn move_intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.is_held(Action::MoveForward),
            back: self.is_held(Action::MoveBack),
            strafe_left: self.is_held(Action::StrafeLeft),
            strafe_right: self.is_held(Action::StrafeRight),
            sprint: self.is_held(Action::Sprint),
            look_delta: self.pointer_delta,
        }
    }
}

/// Anything that can be polled once per tick for an input snapshot.
pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

/// Replays a fixed list of snapshots, then repeats the last one.
///
/// Used for headless runs and deterministic replays.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    frames: Vec<InputState>,
    cursor: usize,
}

impl ScriptedInput {
    pub fn new(frames: Vec<InputState>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// The same snapshot every tick.
    pub fn constant(state: InputState) -> Self {
        Self::new(vec![state])
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> InputState {
        let Some(last) = self.frames.len().checked_sub(1) else {
            return InputState::default();
        };
        let state = self.frames[self.cursor.min(last)].clone();
        self.cursor = self.cursor.saturating_add(1);
        state
    }
}
