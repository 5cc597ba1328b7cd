//! Error taxonomy for the session lifecycle, configuration and rendering seams

use std::fmt;

use thiserror::Error;

/// Which selection is still outstanding when a start is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Avatar,
    Difficulty,
}

impl Selection {
    /// User-facing prompt asking for the missing selection
    pub fn prompt(&self) -> &'static str {
        match self {
            Selection::Avatar => "Please select the avatar",
            Selection::Difficulty => "Please select the difficulty",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Avatar => f.write_str("avatar"),
            Selection::Difficulty => f.write_str("difficulty"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unrecognized difficulty tier: {0:?}")]
    InvalidDifficulty(String),
    #[error("cannot start: no {missing} selected")]
    IncompleteSelection { missing: Selection },
    #[error("sprite not found: {0}")]
    ResourceMissing(String),
    #[error("avatar index {0} is out of range")]
    InvalidAvatar(usize),
    #[error("a session is already running")]
    SessionActive,
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
    #[error("failed to parse tuning: {0}")]
    TuningParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_selection_message() {
        let err = GameError::IncompleteSelection {
            missing: Selection::Difficulty,
        };
        assert_eq!(err.to_string(), "cannot start: no difficulty selected");
        assert_eq!(Selection::Avatar.prompt(), "Please select the avatar");
    }
}
