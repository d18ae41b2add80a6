//! Session orchestration.
//!
//! Defines the collaborator seams the state machine drives (observation
//! source, colour detection, move oracle, actuation), the control
//! commands an operator can issue during any blocking wait, and the
//! session-level error type.

pub mod machine;
pub mod retry;
pub mod translator;

pub use machine::{Session, SessionOutcome, SessionState};
pub use retry::RetryPolicy;
pub use translator::{translate, Actuation};

use crate::board::piece::Colour;
use crate::board::state::ApplyError;
use crate::protocol::oracle::{OracleError, OracleVerdict};
use crate::vision::mapper::BoardAddress;
use crate::vision::observation::{Observation, ObservationError};
use crate::vision::reconcile::ReconcileError;

/// An operator command that can arrive while the session is waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Discard the current game and return to colour assignment.
    Restart,
    /// End the session.
    Exit,
}

/// Errors surfaced by the session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A blocking wait was aborted by an operator command. The in-flight
    /// result is discarded, never applied.
    #[error("session interrupted by {0:?} command")]
    Interrupted(ControlCommand),

    #[error("collaborator failed: {0}")]
    Collaborator(String),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    BadObservation(#[from] ObservationError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error("oracle retry budget exhausted after {attempts} attempts")]
    OracleExhausted {
        attempts: u32,
        #[source]
        last: OracleError,
    },

    /// The actuated move produced no observable change on the board.
    #[error("actuated move produced no observable change")]
    Stalled,

    /// Internal invariant: a turn state was reached with no board.
    #[error("session has no board state")]
    MissingBoard,

    /// Internal invariant: a turn state was reached with no colour.
    #[error("session has no assigned colour")]
    MissingColour,
}

/// Produces raw piece observations from the external board.
pub trait ObservationSource {
    /// Blocks until the opponent has completed a move.
    fn wait_for_opponent_move(&mut self) -> Result<(), SessionError>;

    /// Blocks until the visible position stabilizes, then snapshots it.
    fn poll_observation(&mut self) -> Result<Observation, SessionError>;
}

/// One-shot detection of the session's assigned colour.
pub trait ColourDetector {
    fn detect_own_colour(&mut self) -> Result<Colour, SessionError>;
}

/// Recommends a move for an encoded position.
///
/// Transport failures should be reported as `SessionError::Oracle`;
/// those are the failures the retry policy treats as retryable.
pub trait MoveOracle {
    fn best_move(&mut self, fen: &str) -> Result<OracleVerdict, SessionError>;
}

/// Executes a translated move on the external board. Success is inferred
/// by the next reconciliation, not by the return value.
pub trait Actuator {
    fn perform(&mut self, origin: BoardAddress, dest: BoardAddress) -> Result<(), SessionError>;

    /// Blocks until the operator approves re-issuing a stalled actuation.
    fn confirm_retry(&mut self) -> Result<(), SessionError>;
}
