//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, journaling, and action providers
//! so clients can bubble them up with consistent context.
use battle_core::EntityId;
use thiserror::Error;
use tokio::sync::oneshot;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("battle worker command channel closed")]
    CommandChannelClosed,

    #[error("battle worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("battle worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("event stream closed before the battle ended")]
    EventStreamClosed,

    #[error("runtime requires a roster before building")]
    MissingRoster,

    #[error("the battle has not started yet")]
    NotStarted,

    #[error("the battle has already started")]
    AlreadyStarted,

    #[error("the battle is over")]
    BattleOver,

    #[error("not waiting on {provided}; current actor is {expected:?}")]
    NotAwaitingActor {
        expected: Option<EntityId>,
        provided: EntityId,
    },

    #[error("{actor} is not part of this battle")]
    UnknownActor { actor: EntityId },

    #[error("action provider failed: {0}")]
    Provider(String),

    #[error("failed to write battle journal")]
    Journal(#[from] std::io::Error),
}
