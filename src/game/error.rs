use thiserror::Error;

/// Failures the simulation reports to its caller.
///
/// A snake running into itself is not one of them: that is ordinary game flow
/// and is handled by resetting the snake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid configuration: {reason}")]
    ConfigurationInvalid { reason: String },

    #[error("no free cell left for food: snake covers all {cells} cells")]
    BoardExhausted { cells: usize },
}

impl GameError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        GameError::ConfigurationInvalid {
            reason: reason.into(),
        }
    }
}
