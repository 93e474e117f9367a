use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::action::Action;

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Reveal,
    MarkKnown,
    Skip,
    Restart,
    Quit,
    /// Ctrl+C
    ForceQuit,
    Resize,
}

impl TuiEvent {
    /// The core action this key stands for. `Resize` has none.
    pub fn to_action(self) -> Option<Action> {
        match self {
            TuiEvent::Reveal => Some(Action::RevealDefinition),
            TuiEvent::MarkKnown => Some(Action::MarkKnown),
            TuiEvent::Skip => Some(Action::Skip),
            TuiEvent::Restart => Some(Action::Restart),
            TuiEvent::Quit | TuiEvent::ForceQuit => Some(Action::Quit),
            TuiEvent::Resize => None,
        }
    }
}

/// Maps a key press to an event. Releases and repeats are ignored.
pub fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    if key_event.modifiers == KeyModifiers::CONTROL && key_event.code == KeyCode::Char('c') {
        return Some(TuiEvent::ForceQuit);
    }
    // Other chords (Ctrl+K, Alt+S, ...) are not bindings
    if !matches!(key_event.modifiers, KeyModifiers::NONE | KeyModifiers::SHIFT) {
        return None;
    }
    match key_event.code {
        KeyCode::Char(' ') | KeyCode::Enter => Some(TuiEvent::Reveal),
        KeyCode::Char('k') | KeyCode::Char('K') => Some(TuiEvent::MarkKnown),
        KeyCode::Char('s') | KeyCode::Char('n') | KeyCode::Right => Some(TuiEvent::Skip),
        KeyCode::Char('r') => Some(TuiEvent::Restart),
        KeyCode::Char('q') | KeyCode::Esc => Some(TuiEvent::Quit),
        _ => None,
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }
    match event::read() {
        Ok(Event::Key(key_event)) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            map_key(key_event)
        }
        Ok(Event::Resize(_, _)) => Some(TuiEvent::Resize),
        Ok(_) => None,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            None
        }
    }
}
