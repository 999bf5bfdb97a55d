//! Error types surfaced by the runtime.
//!
//! [`TurnFault`] is what the per-agent turn boundary contains; it never
//! escapes a turn. [`RuntimeError`] covers match setup and worker coordination.
use arena_content::ScenarioError;
use arena_core::{ActionError, ArenaError, ErrorSeverity, Position};
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

/// A fault raised while an agent decided its turn.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TurnFault {
    /// The environment refused an action. Expected during normal play.
    #[error("action precondition failed: {0}")]
    ActionPreconditionFailed(ActionError),

    /// Anything else, including panics inside the decision logic.
    #[error("unexpected fault: {0}")]
    UnexpectedFault(String),
}

impl ArenaError for TurnFault {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ActionPreconditionFailed(error) => error.severity(),
            Self::UnexpectedFault(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ActionPreconditionFailed(error) => error.error_code(),
            Self::UnexpectedFault(_) => "UNEXPECTED_FAULT",
        }
    }
}

impl From<ActionError> for TurnFault {
    fn from(error: ActionError) -> Self {
        Self::ActionPreconditionFailed(error)
    }
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("invalid scenario: {0}")]
    InvalidScenario(#[from] ScenarioError),

    #[error("could not place unit at {position:?}")]
    PlacementFailed { position: Position },

    #[error("match already finished at round {round}")]
    MatchFinished { round: u32 },

    #[error("match worker command channel closed")]
    CommandChannelClosed,

    #[error("match worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("match worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
