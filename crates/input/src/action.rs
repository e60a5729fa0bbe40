use serde::{Deserialize, Serialize};

/// A logical action an input device can hold down.
///
/// Device backends map their keys onto these; the tick loop never sees raw
/// key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    Sprint,
    /// Try the door of any building in reach.
    Interact,
    Quit,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::Sprint,
        Action::Interact,
        Action::Quit,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn actions_are_distinct() {
        let unique: BTreeSet<Action> = Action::ALL.into_iter().collect();
        assert_eq!(unique.len(), Action::ALL.len());
    }

    #[test]
    fn actions_use_snake_case_names() {
        let json = serde_json::to_string(&Action::MoveForward).unwrap();
        assert_eq!(json, "\"move_forward\"");
        let back: Action = serde_json::from_str("\"strafe_left\"").unwrap();
        assert_eq!(back, Action::StrafeLeft);
    }
}
