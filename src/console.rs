/// Line console that runs next to the game on the same loop.
///
/// Characters arrive one at a time (`Console::feed`); a completed line is
/// parsed into a `Command` and executed against the board. Output goes to any
/// `fmt::Write` sink.

use std::fmt::{self, Write};

use thiserror::Error;

use crate::config::{Panel, Playfield};
use crate::game::Board;
use crate::hal::{Color, DrawSurface, PanelTransport, RandomSource};

pub const PROMPT: &str = "flappy> ";
/// Panel command byte plus up to four parameters.
pub const MAX_LCD_BYTES: usize = 5;
pub const MAX_LINE: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    Lcd,
    Test,
}

pub const COMMANDS: &[(&str, CommandKind)] = &[
    ("help", CommandKind::Help),
    ("lcd", CommandKind::Lcd),
    ("test", CommandKind::Test),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    /// `None` when invoked without arguments (prints usage).
    Lcd(Option<LcdWrite>),
    Test,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LcdWrite {
    pub command: u8,
    pub params: Vec<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unknown command {0:?}, try help")]
    UnknownCommand(String),
    #[error("lcd takes at most {max} bytes, got {0}", max = MAX_LCD_BYTES)]
    TooManyBytes(usize),
    #[error("line longer than {max} characters", max = MAX_LINE)]
    LineTooLong,
}

// ── Parsing ──────────────────────────────────────────────────────────────────

/// Parse one line. `Ok(None)` for a blank line.
pub fn parse(line: &str) -> Result<Option<Command>, ConsoleError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let kind = COMMANDS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, kind)| *kind)
        .ok_or_else(|| ConsoleError::UnknownCommand(name.to_string()))?;

    let command = match kind {
        CommandKind::Help => Command::Help,
        CommandKind::Test => Command::Test,
        CommandKind::Lcd => {
            // Words that are not hex bytes are skipped.
            let bytes: Vec<u8> = words.filter_map(parse_hex_byte).collect();
            if bytes.len() > MAX_LCD_BYTES {
                return Err(ConsoleError::TooManyBytes(bytes.len()));
            }
            match bytes.split_first() {
                None => Command::Lcd(None),
                Some((&command, params)) => Command::Lcd(Some(LcdWrite {
                    command,
                    params: params.to_vec(),
                })),
            }
        }
    };
    Ok(Some(command))
}

fn parse_hex_byte(word: &str) -> Option<u8> {
    let digits = word
        .strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
        .unwrap_or(word);
    u8::from_str_radix(digits, 16).ok()
}

// ── Execution ────────────────────────────────────────────────────────────────

pub fn execute<S, I, C, R, W>(
    command: &Command,
    board: &mut Board<S, I, C, R>,
    out: &mut W,
) -> fmt::Result
where
    S: DrawSurface + PanelTransport,
    R: RandomSource,
    W: Write,
{
    match command {
        Command::Help => {
            out.write_str("Available commands:\n\n")?;
            for (name, _) in COMMANDS {
                writeln!(out, "\t{}", name)?;
            }
            out.write_char('\n')?;
        }
        Command::Lcd(None) => {
            writeln!(out, "usage: lcd <cmd> [param...]   (hex bytes)")?;
        }
        Command::Lcd(Some(write)) => {
            board.display.write_command(write.command, &write.params);
            log::debug!("lcd {:02x} {:02x?}", write.command, write.params);
        }
        Command::Test => noise_test(board),
    }
    Ok(())
}

/// Fill the panel with noise drawn over this panel's pipe-gap range, so a
/// skewed generator shows up as visible banding. On 160-line panels about a
/// quarter of pixels are white.
fn noise_test<S, I, C, R>(board: &mut Board<S, I, C, R>)
where
    S: DrawSurface,
    R: RandomSource,
{
    let (w, h) = (board.display.width(), board.display.height());
    let (min, max) = Playfield::from(Panel { width: w, height: h }).gap_range();
    board.display.set_window(0, 0, w, h);
    for _ in 0..(w as u32 * h as u32) {
        let sample = board.rng.rand_range(min, max);
        let color = if sample % 256 < 32 {
            Color::WHITE
        } else {
            Color::BLACK
        };
        board.display.push_pixel(color);
    }
}

// ── Line editor ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Console {
    line: String,
    overflowed: bool,
}

impl Console {
    pub fn new() -> Self {
        Console::default()
    }

    /// The line typed so far.
    pub fn pending(&self) -> &str {
        &self.line
    }

    pub fn prompt<W: Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str(PROMPT)
    }

    /// Feed one character; runs the line when it is a line terminator.
    pub fn feed<S, I, C, R, W>(
        &mut self,
        ch: char,
        board: &mut Board<S, I, C, R>,
        out: &mut W,
    ) -> fmt::Result
    where
        S: DrawSurface + PanelTransport,
        R: RandomSource,
        W: Write,
    {
        match ch {
            '\r' | '\n' => {
                let line = std::mem::take(&mut self.line);
                let overflowed = std::mem::replace(&mut self.overflowed, false);
                out.write_char('\n')?;

                let parsed = if overflowed {
                    Err(ConsoleError::LineTooLong)
                } else {
                    parse(&line)
                };
                match parsed {
                    Ok(Some(command)) => execute(&command, board, out)?,
                    Ok(None) => {}
                    Err(e) => writeln!(out, "error: {}", e)?,
                }
                self.prompt(out)
            }
            '\u{8}' | '\u{7f}' => {
                if self.line.pop().is_some() {
                    out.write_str("\u{8} \u{8}")?;
                }
                Ok(())
            }
            c if c.is_control() => Ok(()),
            c => {
                if self.line.len() >= MAX_LINE {
                    self.overflowed = true;
                    return Ok(());
                }
                self.line.push(c);
                out.write_char(c)
            }
        }
    }
}
