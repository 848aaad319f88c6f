//! The SIMPL console: a line editor, a bounded scrollback and a command
//! history driving one [`Interpreter`] session.
//!
//! The host delivers [`Terminal::on_connect`], [`Terminal::on_key`] and
//! [`Terminal::on_tick`] one at a time, and the terminal re‑renders from
//! scrollback through the [`Screen`] passed in with each event.
//!
//! Every submitted line is evaluated to completion before the next event.
//! Parse and evaluation errors are caught at the line boundary and printed
//! into scrollback; they never end the session.

use std::collections::VecDeque;

use log::{debug, info};

use crate::builtins::Signal;
use crate::config::TerminalConfig;
use crate::error::SimplError;
use crate::interpreter::Interpreter;
use crate::scanner::tokenize;
use crate::screen::Screen;
use crate::value::Value;

/// ASCII key codes understood by [`Terminal::on_key`].
pub mod keys {
    pub const BACKSPACE: u8 = 8;
    pub const TAB: u8 = 9;
    pub const ENTER: u8 = 10;
    pub const UP: u8 = 17;
    pub const DOWN: u8 = 18;
    pub const LEFT: u8 = 19;
    pub const ESCAPE: u8 = 27;
    pub const DELETE: u8 = 127;
}

/// Requests to the host's scene navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    /// Switch away from the terminal.
    Leave,
}

pub struct Terminal {
    config: TerminalConfig,
    interpreter: Interpreter,
    lines: VecDeque<String>,
    line: Vec<u8>,
    history: Vec<String>,
    history_focus: usize,
    /// In‑progress line stashed while browsing history.
    draft: Vec<u8>,
    /// Lines of a statement still waiting for its `end`.
    pending: Vec<String>,
    tick: u32,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new(TerminalConfig::default())
    }
}

impl Terminal {
    pub fn new(config: TerminalConfig) -> Self {
        Self::with_interpreter(config, Interpreter::new())
    }

    pub fn with_interpreter(config: TerminalConfig, interpreter: Interpreter) -> Self {
        info!("Terminal created ({}x{})", config.width, config.height);

        let mut terminal = Self {
            lines: VecDeque::with_capacity(config.scrollback),
            config,
            interpreter,
            line: Vec::new(),
            history: Vec::new(),
            history_focus: 0,
            draft: Vec::new(),
            pending: Vec::new(),
            tick: 0,
        };

        for banner_line in terminal.config.banner.clone() {
            terminal.push_line(banner_line);
        }

        terminal
    }

    // ───────────────────────────── accessors ────────────────────────────

    pub fn lines(&self) -> &VecDeque<String> {
        &self.lines
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn history_focus(&self) -> usize {
        self.history_focus
    }

    /// The in‑progress input line.
    pub fn input(&self) -> String {
        String::from_utf8_lossy(&self.line).into_owned()
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Is a multi‑line statement waiting for more lines?
    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    // ───────────────────────────── host events ──────────────────────────

    pub fn on_connect(&mut self, screen: &mut dyn Screen) {
        debug!("Terminal connected");

        self.draw(screen);
    }

    pub fn on_tick(&mut self, screen: &mut dyn Screen) {
        self.tick = self.tick.wrapping_add(1);
        self.draw_cursor(screen);
    }

    /// Handle one key press.  Returns a request when the terminal wants the
    /// host to navigate away.
    pub fn on_key(&mut self, key: u8, screen: &mut dyn Screen) -> Option<SceneRequest> {
        debug!("Key {}", key);

        match key {
            keys::BACKSPACE | keys::LEFT => {
                self.line.pop();
            }

            keys::TAB => {
                if self.line.len() < self.config.max_input {
                    loop {
                        self.line.push(b' ');

                        if self.line.len() >= self.config.max_input
                            || self.line.len() % self.config.tab_width.max(1) == 0
                        {
                            break;
                        }
                    }
                }
            }

            keys::ENTER => {
                let text: String = self.input();
                self.line.clear();
                self.submit(&text, screen);
            }

            keys::UP => self.recall(true),

            keys::DOWN => self.recall(false),

            keys::ESCAPE => {
                info!("Leaving terminal");

                return Some(SceneRequest::Leave);
            }

            keys::DELETE => {
                // Word delete: up to and including the previous space.
                while let Some(c) = self.line.pop() {
                    if c == b' ' {
                        break;
                    }
                }
            }

            32..=126 => {
                if self.line.len() < self.config.max_input {
                    self.line.push(key);
                }
            }

            _ => {
                let col: i32 = to_coord(self.config.width.saturating_sub(6));
                screen.draw_text(&format!("{:>3}", key), self.config.text_color, col, 0);
            }
        }

        self.draw_line(screen);
        self.draw_cursor(screen);

        None
    }

    /// Run one line through the interpreter and print the outcome.  Returns
    /// the entries appended to scrollback, in order.
    pub fn submit(&mut self, text: &str, screen: &mut dyn Screen) -> Vec<String> {
        info!("Line submitted: {:?}", text);

        let source: String = if self.pending.is_empty() {
            text.to_string()
        } else {
            format!("{}\n{}", self.pending.join("\n"), text)
        };

        let result: Result<Option<Value>, SimplError> = self.interpreter.interpret(&source);

        let mut printed: Vec<String> = vec![text.to_string()];

        if !tokenize(text).is_empty() {
            self.history.push(text.to_string());
        }

        match result {
            Err(e) if e.is_incomplete() => {
                debug!("Statement continues on the next line");

                self.pending.push(text.to_string());
            }

            Ok(value) => {
                self.pending.clear();

                match value {
                    None | Some(Value::Null) => {}
                    Some(value) => printed.push(format!("{}{}", self.config.result_marker, value)),
                }
            }

            Err(e) => {
                info!("Line failed: {}", e);

                self.pending.clear();
                printed.push(format!("{}{}", self.config.error_marker, e));
            }
        }

        for entry in &printed {
            self.push_line(entry.clone());
        }

        self.history_focus = self.history.len();
        self.draft.clear();

        for signal in self.interpreter.take_signals() {
            match signal {
                Signal::ClearScreen => {
                    self.lines.clear();
                    screen.clear();
                }
            }
        }

        self.draw_lines(screen);

        printed
    }

    // ───────────────────────────── internals ────────────────────────────

    /// Bounded FIFO: the oldest entry goes before the newest comes in.
    fn push_line(&mut self, text: String) {
        if self.lines.len() >= self.config.scrollback {
            self.lines.pop_front();
        }

        self.lines.push_back(text);
    }

    /// Move through history; `up` goes to older entries.
    fn recall(&mut self, up: bool) {
        let newest: usize = self.history.len();
        let old: usize = self.history_focus;
        let new: usize = if up {
            old.saturating_sub(1)
        } else {
            (old + 1).min(newest)
        };

        if old == newest && new == newest {
            return;
        }

        if old == newest {
            self.draft = self.line.clone();
        }

        self.history_focus = new;
        self.line = match self.history.get(new) {
            Some(entry) => entry.as_bytes().to_vec(),
            None => self.draft.clone(),
        };

        // Lines given to `submit` directly can be longer than the editor allows.
        self.line.truncate(self.config.max_input);

        debug!("History focus {} of {}", self.history_focus, newest);
    }

    fn input_row(&self) -> usize {
        self.lines.len().min(self.config.height.saturating_sub(1))
    }

    fn draw(&self, screen: &mut dyn Screen) {
        self.draw_lines(screen);
        self.draw_line(screen);
        self.draw_cursor(screen);
    }

    fn draw_lines(&self, screen: &mut dyn Screen) {
        screen.clear();

        let visible: usize = self.config.height.saturating_sub(1);
        let start: usize = self.lines.len().saturating_sub(visible);

        for (row, text) in self.lines.iter().skip(start).enumerate() {
            screen.draw_text(&glyphs(text), self.config.text_color, 0, to_coord(row));
        }
    }

    fn draw_line(&self, screen: &mut dyn Screen) {
        let row: i32 = to_coord(self.input_row());

        screen.draw_text(&" ".repeat(self.config.width), 0, 0, row);
        screen.draw_text(
            &format!("{} ", glyphs(&self.input())),
            self.config.input_color,
            0,
            row,
        );
    }

    /// Shown on one tick in sixteen, alternating glyph every sixteen ticks.
    fn draw_cursor(&self, screen: &mut dyn Screen) {
        if self.tick & 0xf != 0xf {
            return;
        }

        let glyph: &str = if self.tick & 0x10 != 0 { "▄" } else { " " };

        screen.draw_text(
            glyph,
            self.config.cursor_color,
            to_coord(self.line.len()),
            to_coord(self.input_row()),
        );
    }
}

/// `=` is shown as `═`, the console font's assignment glyph.
fn glyphs(text: &str) -> String {
    text.replace('=', "═")
}

fn to_coord(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::TextScreen;

    #[test]
    fn tick_wraps_without_drawing_the_cursor() {
        let mut terminal = Terminal::default();
        let mut screen = TextScreen::new(56, 20);

        terminal.tick = u32::MAX - 1;
        terminal.on_tick(&mut screen);

        assert_eq!(terminal.tick(), u32::MAX);
        assert_eq!(screen.row_text(0), "▄");

        let mut screen = TextScreen::new(56, 20);
        terminal.on_tick(&mut screen);

        assert_eq!(terminal.tick(), 0);
        assert_eq!(screen.row_text(0), "");
    }
}
