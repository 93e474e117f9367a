//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the card, and
//! translates key presses into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm. It is
//! also where effects returned by `update()` are carried out: definition
//! lookups run on a tokio task and report back over a channel, saves run
//! inline.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::lookup::DefinitionLookup;
use crate::core::state::App;
use crate::core::store::WordStore;
use crate::tui::event::{poll_event_immediate, poll_event_timeout};

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Loads the word lists and runs the review loop until the user quits.
pub fn run(lookup: DefinitionLookup, store: WordStore) -> std::io::Result<()> {
    let lists = store.load();
    let mut app = App::new(lookup, lists);
    let mut rng = rand::thread_rng();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    let result = loop {
        app.refill_current_word(&mut rng);

        if app.is_loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            if let Err(e) = terminal.draw(|f| ui::draw_ui(f, &app, spinner_frame)) {
                break Err(e);
            }
            needs_redraw = false;
        }

        let timeout = if app.is_loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = event.to_action() {
                should_quit |= dispatch(&mut app, action, &store, &tx);
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break Ok(());
        }

        // Handle background task actions (finished lookups)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if dispatch(&mut app, action, &store, &tx) {
                should_quit = true;
            }
        }

        if should_quit {
            break Ok(());
        }
    };

    ratatui::restore();
    info!(
        "Session ended: {} to learn, {} known",
        app.lists.to_learn.len(),
        app.lists.known.len()
    );
    result
}

/// Runs `action` through the reducer and carries out the resulting effect.
/// Returns `true` when the app should quit.
fn dispatch(app: &mut App, action: Action, store: &WordStore, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::Quit => true,
        Effect::FetchDefinition(word) => {
            spawn_lookup(app.lookup.clone(), word, tx.clone());
            false
        }
        Effect::MarkKnown(word) => {
            let follow_up = match store.mark_known(&app.lists, &word) {
                Ok(lists) => Action::MarkedKnown { word, lists },
                Err(e) => {
                    warn!("Failed to save word lists: {}", e);
                    Action::SaveFailed(e.to_string())
                }
            };
            dispatch(app, follow_up, store, tx)
        }
    }
}

fn spawn_lookup(lookup: DefinitionLookup, word: String, tx: mpsc::Sender<Action>) {
    info!("Spawning definition lookup for '{}'", word);
    tokio::spawn(async move {
        let result = lookup
            .try_fetch_definition(&word)
            .await
            .map_err(|e| e.to_string());
        if let Err(e) = &result {
            warn!("Definition lookup for '{}' failed: {}", word, e);
        }
        if tx.send(Action::DefinitionReady { word, result }).is_err() {
            warn!("Failed to send lookup result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_app, words};

    #[test]
    fn test_dispatch_mark_known_persists() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::in_dir(dir.path());
        let (tx, _rx) = mpsc::channel();
        let mut app = test_app(&["word", "example", "test"], &[]);
        app.current_word = Some("example".to_string());

        assert!(!dispatch(&mut app, Action::MarkKnown, &store, &tx));

        assert_eq!(app.lists.to_learn, words(&["word", "test"]));
        assert_eq!(app.lists.known, words(&["example"]));
        assert!(app.current_word.is_none());
        assert_eq!(store.load(), app.lists);
    }

    #[test]
    fn test_dispatch_mark_known_absent_word_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::in_dir(dir.path());
        let (tx, _rx) = mpsc::channel();
        let mut app = test_app(&["word"], &[]);
        app.current_word = Some("gone".to_string());

        dispatch(&mut app, Action::MarkKnown, &store, &tx);

        assert!(!store.to_learn_path().exists());
        assert!(!store.known_path().exists());
        assert!(app.current_word.is_none());
    }

    #[test]
    fn test_dispatch_save_failure_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the store expects a directory
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let store = WordStore::in_dir(&blocker.join("sub"));
        let (tx, _rx) = mpsc::channel();
        let mut app = test_app(&["word", "test"], &[]);
        app.current_word = Some("word".to_string());
        let before = app.lists.clone();

        dispatch(&mut app, Action::MarkKnown, &store, &tx);

        assert_eq!(app.lists, before);
        assert_eq!(app.current_word.as_deref(), Some("word"));
        assert!(app.error.as_deref().unwrap().starts_with("Could not save word lists"));
    }

    #[tokio::test]
    async fn test_dispatch_reveal_sends_definition_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::in_dir(dir.path());
        let (tx, rx) = mpsc::channel();
        let mut app = test_app(&["word"], &[]);
        app.current_word = Some("word".to_string());

        dispatch(&mut app, Action::RevealDefinition, &store, &tx);
        assert!(app.is_loading);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        dispatch(&mut app, action, &store, &tx);

        assert!(!app.is_loading);
        let def = app.definition.unwrap();
        assert_eq!(def.meaning.as_deref(), Some("X"));
        assert_eq!(def.usage.as_deref(), Some("Y"));
    }

    #[test]
    fn test_dispatch_quit() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::in_dir(dir.path());
        let (tx, _rx) = mpsc::channel();
        let mut app = test_app(&[], &[]);
        assert!(dispatch(&mut app, Action::Quit, &store, &tx));
    }
}
