use std::collections::VecDeque;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};

use flappy_tft::console::Console;
use flappy_tft::framebuffer::FrameBuffer;
use flappy_tft::hal::DrawSurface;
use flappy_tft::rng::Lehmer32;
use flappy_tft::terminal::{KeyButton, StdClock, TerminalPresenter};
use flappy_tft::{Board, Config, GameStateMachine};

type HostBoard = Board<FrameBuffer, KeyButton, StdClock, Lehmer32>;

/// Console lines kept below the panel.
const SCROLLBACK: usize = 6;
/// Yield between polls so the busy loop does not pin a core.
const IDLE: Duration = Duration::from_millis(1);

// ── Console pane ──────────────────────────────────────────────────────────────

/// Console output shown under the panel, last `SCROLLBACK` lines plus the
/// line being typed.
#[derive(Default)]
struct ConsolePane {
    lines: VecDeque<String>,
    current: String,
    dirty: bool,
}

impl ConsolePane {
    fn push_output(&mut self, text: &str) {
        for ch in text.chars() {
            match ch {
                '\n' => {
                    let line = std::mem::take(&mut self.current);
                    self.lines.push_back(line);
                    while self.lines.len() > SCROLLBACK {
                        self.lines.pop_front();
                    }
                }
                '\u{8}' => {
                    self.current.pop();
                }
                '\t' => self.current.push_str("    "),
                c => self.current.push(c),
            }
        }
        self.dirty = true;
    }

    fn draw<W: Write>(&mut self, out: &mut W, top: u16) -> io::Result<()> {
        if !self.dirty {
            return Ok(());
        }
        out.queue(style::SetForegroundColor(Color::Grey))?;
        let rows = self.lines.iter().map(String::as_str).chain([self.current.as_str()]);
        for (i, line) in rows.enumerate() {
            out.queue(cursor::MoveTo(0, top + i as u16))?;
            out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
            out.queue(Print(line))?;
        }
        out.queue(style::ResetColor)?;
        out.flush()?;
        self.dirty = false;
        Ok(())
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

enum Flow {
    Continue,
    Quit,
}

/// Space drives the button unless a console line is being typed; everything
/// else printable goes to the console.
fn handle_event(
    ev: Event,
    board: &mut HostBoard,
    console: &mut Console,
    pane: &mut ConsolePane,
    presenter: &mut TerminalPresenter,
) -> Flow {
    match ev {
        Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
            let jump_key = code == KeyCode::Char(' ')
                && (console.pending().is_empty() || kind == KeyEventKind::Release);
            if jump_key {
                match kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => board.button.press(Instant::now()),
                    KeyEventKind::Release => board.button.release(),
                }
                return Flow::Continue;
            }
            if kind == KeyEventKind::Release {
                return Flow::Continue;
            }

            let ch = match code {
                KeyCode::Esc => return Flow::Quit,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Flow::Quit;
                }
                KeyCode::Enter => '\n',
                KeyCode::Backspace => '\u{8}',
                KeyCode::Char(c) => c,
                _ => return Flow::Continue,
            };
            let mut echo = String::new();
            if console.feed(ch, board, &mut echo).is_ok() {
                pane.push_output(&echo);
            }
        }
        Event::Resize(..) => {
            presenter.invalidate();
            pane.dirty = true;
        }
        _ => {}
    }
    Flow::Continue
}

fn game_loop<W: Write>(
    out: &mut W,
    board: &mut HostBoard,
    machine: &mut GameStateMachine,
    rx: &mpsc::Receiver<Event>,
) -> io::Result<()> {
    let mut presenter = TerminalPresenter::new((0, 0));
    let mut console = Console::new();
    let mut pane = ConsolePane::default();
    let pane_top = TerminalPresenter::rows_for(board.display.height()) + 1;

    let mut prompt = String::new();
    if console.prompt(&mut prompt).is_ok() {
        pane.push_output(&prompt);
    }

    loop {
        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Flow::Quit = handle_event(ev, board, &mut console, &mut pane, &mut presenter) {
                return Ok(());
            }
        }

        machine.tick(board);

        presenter.present(out, &board.display)?;
        pane.draw(out, pane_top)?;
        thread::sleep(IDLE);
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    log::info!("panel {}x{}", config.panel.width, config.panel.height);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(terminal::Clear(terminal::ClearType::All))?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to HOLD_WINDOW.
    let keyboard_enhanced = matches!(terminal::supports_keyboard_enhancement(), Ok(true))
        && out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();

    // Dedicate a thread to blocking event reads so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let mut board = Board::new(
        FrameBuffer::new(config.panel.width, config.panel.height),
        KeyButton::new(keyboard_enhanced),
        StdClock::new(),
        Lehmer32::default(),
    );
    let mut machine = GameStateMachine::new(&config);

    let result = game_loop(&mut out, &mut board, &mut machine, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("exiting, last score {}", machine.score());
    result
}
