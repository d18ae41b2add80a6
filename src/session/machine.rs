//! The session state machine.
//!
//! Sequences colour assignment, turn waiting, oracle querying, and
//! own-move execution as one iterative, cancellable loop on a single
//! session thread. A restart or exit command issued during any blocking
//! wait aborts the wait, discards the in-flight result, and transitions
//! without leaving a partially applied board.

use crate::board::moves::Move;
use crate::board::piece::Colour;
use crate::board::state::BoardState;
use crate::protocol::fen::encode_fen;
use crate::protocol::oracle::OracleVerdict;
use crate::vision::reconcile::reconcile;

use super::retry::RetryPolicy;
use super::translator::translate;
use super::{Actuator, ColourDetector, ControlCommand, MoveOracle, ObservationSource, SessionError};

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingColourAssignment,
    /// Entered only when the assigned colour moves second.
    AwaitingOpponentFirstMove,
    AwaitingOracleMove,
    /// Carries the oracle's move until actuation confirms it.
    ExecutingOwnMove(Move),
    /// Entered after a stalled actuation; the move is not re-issued
    /// until the operator approves.
    AwaitingRetryApproval(Move),
    AwaitingOpponentMove,
    Restarted,
    Ended,
}

/// How a session run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The operator ended the session.
    Exited,
    /// The oracle had no move for the current position.
    OracleDone,
}

/// Drives one game session against the collaborator seams.
pub struct Session<C> {
    collaborators: C,
    retry: RetryPolicy,
    state: SessionState,
    colour: Option<Colour>,
    board: Option<BoardState>,
}

impl<C> Session<C>
where
    C: ObservationSource + ColourDetector + MoveOracle + Actuator,
{
    pub fn new(collaborators: C) -> Self {
        Session {
            collaborators,
            retry: RetryPolicy::default(),
            state: SessionState::AwaitingColourAssignment,
            colour: None,
            board: None,
        }
    }

    /// Replaces the oracle retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The current board, once a game is underway.
    pub fn board(&self) -> Option<&BoardState> {
        self.board.as_ref()
    }

    /// Handles interruption of a blocking step: a control command moves
    /// the machine to `Restarted`/`Ended` and discards the in-flight
    /// result; any other error propagates.
    fn checked<T>(&mut self, result: Result<T, SessionError>) -> Result<Option<T>, SessionError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(SessionError::Interrupted(ControlCommand::Restart)) => {
                self.state = SessionState::Restarted;
                Ok(None)
            }
            Err(SessionError::Interrupted(ControlCommand::Exit)) => {
                self.state = SessionState::Ended;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Runs the session until the operator exits or the oracle runs out
    /// of moves. Turn-fatal errors (ambiguous observation, exhausted
    /// oracle budget, stalled actuation) return `Err` with the board
    /// state preserved; the caller may resume with another `run` call.
    pub fn run(&mut self) -> Result<SessionOutcome, SessionError> {
        loop {
            match self.state {
                SessionState::AwaitingColourAssignment => {
                    let result = self.collaborators.detect_own_colour();
                    let Some(colour) = self.checked(result)? else {
                        continue;
                    };
                    self.colour = Some(colour);
                    match colour {
                        Colour::White => {
                            self.board = Some(BoardState::starting());
                            self.state = SessionState::AwaitingOracleMove;
                        }
                        Colour::Black => {
                            self.state = SessionState::AwaitingOpponentFirstMove;
                        }
                    }
                }

                SessionState::AwaitingOpponentFirstMove => {
                    let result = self.collaborators.wait_for_opponent_move();
                    if self.checked(result)?.is_none() {
                        continue;
                    }
                    let result = self.collaborators.poll_observation();
                    let Some(obs) = self.checked(result)? else {
                        continue;
                    };
                    let mut board = BoardState::starting();
                    let mv = reconcile(&board, &obs)?;
                    board.apply(mv)?;
                    self.board = Some(board);
                    self.state = SessionState::AwaitingOracleMove;
                }

                SessionState::AwaitingOracleMove => {
                    let fen = {
                        let board = self.board.as_ref().ok_or(SessionError::MissingBoard)?;
                        encode_fen(board)
                    };
                    let result = self.retry.query(&mut self.collaborators, &fen);
                    let Some(verdict) = self.checked(result)? else {
                        continue;
                    };
                    match verdict {
                        OracleVerdict::Best(mv) => {
                            self.state = SessionState::ExecutingOwnMove(mv);
                        }
                        OracleVerdict::NoMove => {
                            self.state = SessionState::Ended;
                            return Ok(SessionOutcome::OracleDone);
                        }
                    }
                }

                SessionState::ExecutingOwnMove(mv) => {
                    let colour = self.colour.ok_or(SessionError::MissingColour)?;
                    let board = self.board.as_mut().ok_or(SessionError::MissingBoard)?;
                    let before = board.clone();
                    let actuation = translate(board, mv, colour)?;

                    let mut interrupted = false;
                    for (origin, dest) in actuation.legs() {
                        let result = self.collaborators.perform(origin, dest);
                        if self.checked(result)?.is_none() {
                            interrupted = true;
                            break;
                        }
                    }
                    if interrupted {
                        continue;
                    }

                    let result = self.collaborators.poll_observation();
                    let Some(obs) = self.checked(result)? else {
                        continue;
                    };
                    if obs.matches(&before) {
                        // The click did not take. Roll the local model
                        // back and surface the stall instead of blindly
                        // re-issuing the actuation.
                        self.board = Some(before);
                        self.state = SessionState::AwaitingRetryApproval(mv);
                        return Err(SessionError::Stalled);
                    }
                    self.state = SessionState::AwaitingOpponentMove;
                }

                SessionState::AwaitingRetryApproval(mv) => {
                    let result = self.collaborators.confirm_retry();
                    if self.checked(result)?.is_none() {
                        continue;
                    }
                    self.state = SessionState::ExecutingOwnMove(mv);
                }

                SessionState::AwaitingOpponentMove => {
                    let result = self.collaborators.wait_for_opponent_move();
                    if self.checked(result)?.is_none() {
                        continue;
                    }
                    let result = self.collaborators.poll_observation();
                    let Some(obs) = self.checked(result)? else {
                        continue;
                    };
                    let board = self.board.as_mut().ok_or(SessionError::MissingBoard)?;
                    let mv = reconcile(board, &obs)?;
                    board.apply(mv)?;
                    self.state = SessionState::AwaitingOracleMove;
                }

                SessionState::Restarted => {
                    self.board = None;
                    self.colour = None;
                    self.state = SessionState::AwaitingColourAssignment;
                }

                SessionState::Ended => {
                    return Ok(SessionOutcome::Exited);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::square::Square;
    use crate::protocol::oracle::OracleError;
    use crate::vision::mapper::BoardAddress;
    use crate::vision::observation::Observation;
    use std::collections::VecDeque;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    /// A scripted stand-in for every collaborator seam.
    #[derive(Default)]
    struct Scripted {
        colours: VecDeque<Result<Colour, SessionError>>,
        waits: VecDeque<Result<(), SessionError>>,
        observations: VecDeque<Result<Observation, SessionError>>,
        verdicts: VecDeque<Result<OracleVerdict, SessionError>>,
        retries: VecDeque<Result<(), SessionError>>,
        performed: Vec<(BoardAddress, BoardAddress)>,
    }

    impl ObservationSource for Scripted {
        fn wait_for_opponent_move(&mut self) -> Result<(), SessionError> {
            self.waits.pop_front().unwrap_or(Ok(()))
        }

        fn poll_observation(&mut self) -> Result<Observation, SessionError> {
            self.observations
                .pop_front()
                .unwrap_or_else(|| Err(SessionError::Collaborator("script ran dry".into())))
        }
    }

    impl ColourDetector for Scripted {
        fn detect_own_colour(&mut self) -> Result<Colour, SessionError> {
            self.colours
                .pop_front()
                .unwrap_or_else(|| Err(SessionError::Collaborator("script ran dry".into())))
        }
    }

    impl MoveOracle for Scripted {
        fn best_move(&mut self, _fen: &str) -> Result<OracleVerdict, SessionError> {
            self.verdicts
                .pop_front()
                .unwrap_or_else(|| Err(SessionError::Oracle(OracleError::Unreachable("dry".into()))))
        }
    }

    impl Actuator for Scripted {
        fn perform(
            &mut self,
            origin: BoardAddress,
            dest: BoardAddress,
        ) -> Result<(), SessionError> {
            self.performed.push((origin, dest));
            Ok(())
        }

        fn confirm_retry(&mut self) -> Result<(), SessionError> {
            self.retries.pop_front().unwrap_or(Ok(()))
        }
    }

    /// Observes the position after applying moves to the starting board.
    fn observed_line(moves: &[(&str, &str)]) -> Observation {
        let mut board = BoardState::starting();
        for (from, to) in moves {
            board.apply(Move::new(sq(from), sq(to))).unwrap();
        }
        Observation::from_state(&board)
    }

    #[test]
    fn exit_during_colour_assignment_ends_cleanly() {
        let mut script = Scripted::default();
        script
            .colours
            .push_back(Err(SessionError::Interrupted(ControlCommand::Exit)));
        let mut session = Session::new(script);
        assert_eq!(session.run().unwrap(), SessionOutcome::Exited);
        assert_eq!(session.state(), SessionState::Ended);
        assert!(session.board().is_none());
    }

    #[test]
    fn white_plays_until_oracle_has_no_move() {
        let mut script = Scripted::default();
        script.colours.push_back(Ok(Colour::White));
        // Turn 1: oracle says e2e4; post-actuation observation confirms.
        script
            .verdicts
            .push_back(Ok(OracleVerdict::Best(Move::new(sq("e2"), sq("e4")))));
        script.observations.push_back(Ok(observed_line(&[("e2", "e4")])));
        // Opponent replies e7e5.
        script
            .observations
            .push_back(Ok(observed_line(&[("e2", "e4"), ("e7", "e5")])));
        // Turn 2: no move left.
        script.verdicts.push_back(Ok(OracleVerdict::NoMove));

        let mut session = Session::new(script);
        assert_eq!(session.run().unwrap(), SessionOutcome::OracleDone);
        let board = session.board().expect("board exists after play");
        assert_eq!(board.fullmove_number, 2);
        assert_eq!(board.side_to_move, Colour::White);
    }

    #[test]
    fn stalled_actuation_rolls_the_board_back() {
        let mut script = Scripted::default();
        script.colours.push_back(Ok(Colour::White));
        script
            .verdicts
            .push_back(Ok(OracleVerdict::Best(Move::new(sq("e2"), sq("e4")))));
        // Post-actuation observation still shows the starting position.
        script.observations.push_back(Ok(observed_line(&[])));

        let mut session = Session::new(script);
        let result = session.run();
        assert!(matches!(result, Err(SessionError::Stalled)));
        // Local model rolled back to the pre-move position.
        let board = session.board().expect("board preserved");
        assert!(board.piece_at(sq("e2")).is_some());
        assert_eq!(
            session.state(),
            SessionState::AwaitingRetryApproval(Move::new(sq("e2"), sq("e4")))
        );
    }

    #[test]
    fn stalled_move_is_not_reissued_without_approval() {
        let mut script = Scripted::default();
        script.colours.push_back(Ok(Colour::White));
        script
            .verdicts
            .push_back(Ok(OracleVerdict::Best(Move::new(sq("e2"), sq("e4")))));
        script.observations.push_back(Ok(observed_line(&[])));
        // The operator exits at the approval prompt instead of retrying.
        script
            .retries
            .push_back(Err(SessionError::Interrupted(ControlCommand::Exit)));

        let mut session = Session::new(script);
        assert!(matches!(session.run(), Err(SessionError::Stalled)));
        // Resuming blocks on approval; the exit there ends the session
        // with the actuation never repeated.
        assert_eq!(session.run().unwrap(), SessionOutcome::Exited);
        assert_eq!(session.state(), SessionState::Ended);
    }

    #[test]
    fn approved_retry_reexecutes_the_move() {
        let mut script = Scripted::default();
        script.colours.push_back(Ok(Colour::White));
        script
            .verdicts
            .push_back(Ok(OracleVerdict::Best(Move::new(sq("e2"), sq("e4")))));
        // First actuation stalls, the approved retry lands.
        script.observations.push_back(Ok(observed_line(&[])));
        script.retries.push_back(Ok(()));
        script.observations.push_back(Ok(observed_line(&[("e2", "e4")])));
        // Opponent replies, then the oracle is done.
        script
            .observations
            .push_back(Ok(observed_line(&[("e2", "e4"), ("e7", "e5")])));
        script.verdicts.push_back(Ok(OracleVerdict::NoMove));

        let mut session = Session::new(script);
        assert!(matches!(session.run(), Err(SessionError::Stalled)));
        assert_eq!(session.run().unwrap(), SessionOutcome::OracleDone);
        let board = session.board().expect("board exists after the retry");
        assert!(board.piece_at(sq("e4")).is_some());
        assert_eq!(board.fullmove_number, 2);
    }

    #[test]
    fn restart_recreates_the_session() {
        let mut script = Scripted::default();
        // First assignment, then a restart arrives while waiting for the
        // opponent's first move, then a fresh assignment and an exit.
        script.colours.push_back(Ok(Colour::Black));
        script
            .waits
            .push_back(Err(SessionError::Interrupted(ControlCommand::Restart)));
        script
            .colours
            .push_back(Err(SessionError::Interrupted(ControlCommand::Exit)));

        let mut session = Session::new(script);
        assert_eq!(session.run().unwrap(), SessionOutcome::Exited);
        assert!(session.board().is_none());
    }

    #[test]
    fn black_builds_board_from_first_observation() {
        let mut script = Scripted::default();
        script.colours.push_back(Ok(Colour::Black));
        // White opened d2d4.
        script.observations.push_back(Ok(observed_line(&[("d2", "d4")])));
        script.verdicts.push_back(Ok(OracleVerdict::NoMove));

        let mut session = Session::new(script);
        assert_eq!(session.run().unwrap(), SessionOutcome::OracleDone);
        let board = session.board().expect("board reconstructed");
        assert_eq!(board.side_to_move, Colour::Black);
        assert!(board.piece_at(sq("d4")).is_some());
        assert!(board.piece_at(sq("d2")).is_none());
    }
}
