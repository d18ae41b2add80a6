//! Console collaborators.
//!
//! Stdin/stdout implementations of the collaborator seams for manual
//! operation: the operator relays what the external board shows and
//! performs the clicks the session asks for. `restart` and `exit` typed
//! at any prompt interrupt the pending wait.

use std::io::{BufRead, Write};

use crate::board::piece::Colour;
use crate::protocol::lan::parse_lan;
use crate::protocol::oracle::{decode_reply, OracleError, OracleVerdict};
use crate::session::{
    Actuator, ColourDetector, ControlCommand, MoveOracle, ObservationSource, SessionError,
};
use crate::vision::mapper::BoardAddress;
use crate::vision::observation::Observation;

/// Parses an operator control word.
pub fn parse_control(word: &str) -> Option<ControlCommand> {
    match word {
        "restart" => Some(ControlCommand::Restart),
        "exit" | "quit" => Some(ControlCommand::Exit),
        _ => None,
    }
}

/// Operator console backing every collaborator seam.
pub struct Console<R, W> {
    input: R,
    output: W,
    preset_colour: Option<Colour>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            preset_colour: None,
        }
    }

    /// Skips the interactive colour prompt with a fixed assignment.
    pub fn with_colour(mut self, colour: Colour) -> Self {
        self.preset_colour = Some(colour);
        self
    }

    /// Prompts and reads one trimmed line. End of input counts as an
    /// exit command; control words interrupt the pending wait.
    fn read_line(&mut self, prompt: &str) -> Result<String, SessionError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::Interrupted(ControlCommand::Exit));
        }
        let line = line.trim().to_string();
        if let Some(cmd) = parse_control(&line) {
            return Err(SessionError::Interrupted(cmd));
        }
        Ok(line)
    }
}

impl<R: BufRead, W: Write> ColourDetector for Console<R, W> {
    fn detect_own_colour(&mut self) -> Result<Colour, SessionError> {
        if let Some(colour) = self.preset_colour {
            return Ok(colour);
        }
        loop {
            let line = self.read_line("own colour (white/black): ")?;
            match line.as_str() {
                "white" | "w" => return Ok(Colour::White),
                "black" | "b" => return Ok(Colour::Black),
                other => eprintln!("unknown colour: '{other}'"),
            }
        }
    }
}

impl<R: BufRead, W: Write> ObservationSource for Console<R, W> {
    fn wait_for_opponent_move(&mut self) -> Result<(), SessionError> {
        self.read_line("press enter once the opponent has moved: ")?;
        Ok(())
    }

    fn poll_observation(&mut self) -> Result<Observation, SessionError> {
        loop {
            let line = self.read_line("board placement (FEN first field): ")?;
            match Observation::from_placement(&line) {
                Ok(obs) => return Ok(obs),
                Err(e) => eprintln!("unreadable placement: {e}"),
            }
        }
    }
}

impl<R: BufRead, W: Write> MoveOracle for Console<R, W> {
    fn best_move(&mut self, fen: &str) -> Result<OracleVerdict, SessionError> {
        writeln!(self.output, "query position: {fen}")?;
        let line = self.read_line("oracle reply (JSON or coordinate move): ")?;
        if line.starts_with('{') {
            return Ok(decode_reply(&line)?);
        }
        if line == "nomove" {
            return Ok(OracleVerdict::NoMove);
        }
        let mv = parse_lan(&line).map_err(OracleError::BadMoveText)?;
        Ok(OracleVerdict::Best(mv))
    }
}

impl<R: BufRead, W: Write> Actuator for Console<R, W> {
    fn perform(&mut self, origin: BoardAddress, dest: BoardAddress) -> Result<(), SessionError> {
        writeln!(
            self.output,
            "perform: row {} col {} -> row {} col {}",
            origin.row, origin.col, dest.row, dest.col
        )?;
        Ok(())
    }

    fn confirm_retry(&mut self) -> Result<(), SessionError> {
        self.read_line("move did not register; press enter to retry: ")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::moves::Move;
    use crate::board::square::Square;
    use crate::board::state::BoardState;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<String>, Vec<u8>> {
        Console::new(Cursor::new(input.to_string()), Vec::new())
    }

    #[test]
    fn parse_control_words() {
        assert_eq!(parse_control("restart"), Some(ControlCommand::Restart));
        assert_eq!(parse_control("exit"), Some(ControlCommand::Exit));
        assert_eq!(parse_control("quit"), Some(ControlCommand::Exit));
        assert_eq!(parse_control("e2e4"), None);
    }

    #[test]
    fn detects_colour_after_a_retry() {
        let mut c = console("purple\nblack\n");
        assert_eq!(c.detect_own_colour().unwrap(), Colour::Black);
    }

    #[test]
    fn preset_colour_skips_the_prompt() {
        let mut c = console("").with_colour(Colour::White);
        assert_eq!(c.detect_own_colour().unwrap(), Colour::White);
    }

    #[test]
    fn control_word_interrupts_a_wait() {
        let mut c = console("restart\n");
        assert!(matches!(
            c.wait_for_opponent_move(),
            Err(SessionError::Interrupted(ControlCommand::Restart))
        ));
    }

    #[test]
    fn end_of_input_counts_as_exit() {
        let mut c = console("");
        assert!(matches!(
            c.wait_for_opponent_move(),
            Err(SessionError::Interrupted(ControlCommand::Exit))
        ));
    }

    #[test]
    fn reads_a_placement_observation() {
        let mut c = console("garbage\nrnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR\n");
        let obs = c.poll_observation().unwrap();
        assert!(obs.matches(&BoardState::starting()));
    }

    #[test]
    fn oracle_accepts_json_and_plain_moves() {
        let e2e4 = OracleVerdict::Best(Move::new(
            Square::from_algebraic("e2").unwrap(),
            Square::from_algebraic("e4").unwrap(),
        ));

        let mut c = console("{\"status\":\"ok\",\"move\":\"e2e4\"}\n");
        assert_eq!(c.best_move("fen").unwrap(), e2e4);

        let mut c = console("e2e4\n");
        assert_eq!(c.best_move("fen").unwrap(), e2e4);

        let mut c = console("nomove\n");
        assert_eq!(c.best_move("fen").unwrap(), OracleVerdict::NoMove);

        let mut c = console("not-a-move\n");
        assert!(matches!(
            c.best_move("fen"),
            Err(SessionError::Oracle(OracleError::BadMoveText(_)))
        ));
    }

    #[test]
    fn perform_reports_both_addresses() {
        let mut c = console("");
        c.perform(
            BoardAddress { row: 6, col: 4 },
            BoardAddress { row: 4, col: 4 },
        )
        .unwrap();
        let out = String::from_utf8(c.output).unwrap();
        assert!(out.contains("row 6 col 4 -> row 4 col 4"));
    }

    #[test]
    fn retry_approval_honours_control_words() {
        let mut c = console("\n");
        assert!(c.confirm_retry().is_ok());

        let mut c = console("exit\n");
        assert!(matches!(
            c.confirm_retry(),
            Err(SessionError::Interrupted(ControlCommand::Exit))
        ));
    }
}
