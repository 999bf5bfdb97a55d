//! Common error infrastructure for arena-core.
//!
//! Every action an agent issues through the facade can be refused by the
//! environment. Those refusals are expected, non-fatal and are surfaced as
//! [`ActionError`]; the host decides how to log them and always lets the turn
//! end normally.

use crate::types::{Direction, Position, UnitKind};

/// Severity level of an error, used for categorization and logging priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The environment refused an action this turn; the next turn may succeed.
    ///
    /// Examples: cooldown active, destination occupied
    Recoverable,

    /// The request itself was malformed and will keep failing unchanged.
    ///
    /// Examples: shared array index past the end
    Validation,

    /// Unexpected state inconsistency. These indicate bugs.
    Internal,

    /// The agent cannot continue to make decisions.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for errors raised while an agent takes its turn.
pub trait ArenaError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for this error variant, used as a log field.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// An action the environment refused because one of its rules did not hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error("movement cooldown active")]
    MovementCooldown,

    #[error("action cooldown active")]
    ActionCooldown,

    #[error("unit cannot move in direction {direction}")]
    Immobile { direction: Direction },

    #[error("destination {destination:?} is out of bounds")]
    OutOfBounds { destination: Position },

    #[error("destination {destination:?} is occupied")]
    Occupied { destination: Position },

    #[error("no hostile unit at {target:?}")]
    NoTarget { target: Position },

    #[error("target {target:?} is out of range")]
    OutOfRange { target: Position },

    #[error("unit cannot build {kind}")]
    CannotBuild { kind: UnitKind },

    #[error("insufficient resources: need {required}, have {available}")]
    InsufficientResources { required: u32, available: u32 },

    #[error("no deposit to mine at {position:?}")]
    NoDeposit { position: Position },

    #[error("shared array index {index} out of bounds (len {len})")]
    SharedIndexOutOfBounds { index: usize, len: usize },

    #[error("value {value} cannot be stored in a shared cell")]
    UnencodableValue { value: i32 },
}

impl ArenaError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SharedIndexOutOfBounds { .. } | Self::CannotBuild { .. } => {
                ErrorSeverity::Validation
            }
            Self::UnencodableValue { .. } => ErrorSeverity::Internal,
            _ => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MovementCooldown => "MOVEMENT_COOLDOWN",
            Self::ActionCooldown => "ACTION_COOLDOWN",
            Self::Immobile { .. } => "IMMOBILE",
            Self::OutOfBounds { .. } => "OUT_OF_BOUNDS",
            Self::Occupied { .. } => "OCCUPIED",
            Self::NoTarget { .. } => "NO_TARGET",
            Self::OutOfRange { .. } => "OUT_OF_RANGE",
            Self::CannotBuild { .. } => "CANNOT_BUILD",
            Self::InsufficientResources { .. } => "INSUFFICIENT_RESOURCES",
            Self::NoDeposit { .. } => "NO_DEPOSIT",
            Self::SharedIndexOutOfBounds { .. } => "SHARED_INDEX_OUT_OF_BOUNDS",
            Self::UnencodableValue { .. } => "UNENCODABLE_VALUE",
        }
    }
}
