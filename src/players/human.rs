//! Interactive player reading moves from a text stream

use std::io::{self, BufRead, BufReader, Stdin, Stdout, Write};

use crate::{Error, Result, ports::Player, rps::Move};

const PROMPT: &str = "What move would you like to play? (R,P,S): ";
const INVALID_MOVE: &str = "Invalid move, please choose R, P or S";

/// A person at the keyboard (or any line-oriented input)
///
/// Each round prompts on `output` and reads one line from `input`. Unknown
/// moves are reported and the prompt repeats; end of input ends the match
/// with [`Error::InputClosed`].
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl HumanPlayer<BufReader<Stdin>, Stdout> {
    /// Player wired to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead + Send, W: Write + Send> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn write_out(&mut self, text: &str, newline: bool) -> Result<()> {
        let written = if newline {
            writeln!(self.output, "{text}")
        } else {
            write!(self.output, "{text}")
        };
        written
            .and_then(|()| self.output.flush())
            .map_err(|source| Error::Io {
                operation: "write prompt".to_string(),
                source,
            })
    }
}

impl<R: BufRead + Send, W: Write + Send> Player for HumanPlayer<R, W> {
    fn decide_move(&mut self, _round_index: usize) -> Result<Move> {
        loop {
            self.write_out(PROMPT, false)?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|source| Error::Io {
                    operation: "read move".to_string(),
                    source,
                })?;
            if read == 0 {
                return Err(Error::InputClosed {
                    player: self.name().to_string(),
                });
            }

            match line.parse::<Move>() {
                Ok(mv) => return Ok(mv),
                Err(_) => self.write_out(INVALID_MOVE, true)?,
            }
        }
    }

    fn name(&self) -> &str {
        "HumanPlayer"
    }
}
