/// Keyboard handling: terminal key events → held directions + one-shot commands.
///
/// Instead of acting on each key event individually, we record the frame
/// number of the last press/repeat event for every key.  A key counts as
/// held while that record is younger than the hold window.  This covers
/// both classes of terminal:
/// * **Keyboard-enhancement capable** (kitty protocol): real `Release`
///   events remove the key at once.
/// * **Classic terminals**: only `Press` events arrive (OS key-repeat shows
///   up as repeated presses), so keys expire after the window goes quiet.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::InputState;

/// One-shot actions produced by a key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Fire,
    Restart,
    Quit,
}

pub struct Controls {
    /// Each held key → the frame it was last seen (press or repeat).
    key_frame: HashMap<KeyCode, u64>,
    hold_window: u64,
}

/// Letters are tracked case-insensitively so Shift does not drop a key.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl Controls {
    pub fn new(hold_window: u64) -> Self {
        Controls {
            key_frame: HashMap::new(),
            hold_window: hold_window.max(1),
        }
    }

    /// Record a key event seen during `frame`, returning any command it fires.
    ///
    /// Fire is edge-triggered: only a `Press` shoots, a `Repeat` never does.
    pub fn handle(&mut self, event: KeyEvent, frame: u64) -> Option<Command> {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(code, frame);
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
                    KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(Command::Quit)
                    }
                    KeyCode::Char('r') => Some(Command::Restart),
                    KeyCode::Char(' ') => Some(Command::Fire),
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
                None
            }
        }
    }

    fn is_held(&self, key: KeyCode, frame: u64) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| frame.saturating_sub(last) < self.hold_window)
            .unwrap_or(false)
    }

    fn any_held(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|&k| self.is_held(k, frame))
    }

    /// Directions live during `frame`.
    pub fn input_state(&self, frame: u64) -> InputState {
        InputState {
            up: self.any_held(&[KeyCode::Up, KeyCode::Char('w')], frame),
            down: self.any_held(&[KeyCode::Down, KeyCode::Char('s')], frame),
            left: self.any_held(&[KeyCode::Left, KeyCode::Char('a')], frame),
            right: self.any_held(&[KeyCode::Right, KeyCode::Char('d')], frame),
        }
    }

    /// Forget every held key, e.g. after a restart.
    pub fn clear(&mut self) {
        self.key_frame.clear();
    }
}
