//! # Actions
//!
//! Everything that can happen in wordcards becomes an `Action`.
//! User presses `k`? That's `Action::MarkKnown`.
//! The model answers? That's `Action::DefinitionReady { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an [`Effect`] describing the I/O the adapter must
//! perform next. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Results of that I/O come back in as actions (`DefinitionReady`,
//! `MarkedKnown`, `SaveFailed`), so the whole flow can be replayed in tests.

use log::{debug, info, warn};

use crate::core::lookup::DefinitionResult;
use crate::core::state::App;
use crate::core::store::WordLists;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Ask the model for the current word's meaning.
    RevealDefinition,
    /// Lookup finished for `word`.
    DefinitionReady {
        word: String,
        result: Result<DefinitionResult, String>,
    },
    /// The user knows the current word.
    MarkKnown,
    /// The store ran the move. `lists` is `None` when the word was not in the to-learn list.
    MarkedKnown {
        word: String,
        lists: Option<WordLists>,
    },
    /// Writing the word lists failed.
    SaveFailed(String),
    /// Show this word again some other time.
    Skip,
    /// Start over once every word is known.
    Restart,
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    FetchDefinition(String),
    MarkKnown(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::RevealDefinition => {
            if app.is_loading {
                return Effect::None;
            }
            let Some(word) = app.current_word.clone() else {
                return Effect::None;
            };
            app.is_loading = true;
            app.error = None;
            app.status_message = format!("Looking up '{word}'...");
            Effect::FetchDefinition(word)
        }
        Action::DefinitionReady { word, result } => {
            app.is_loading = false;
            if app.current_word.as_deref() != Some(word.as_str()) {
                debug!("Dropping definition for '{}': card changed", word);
                return Effect::None;
            }
            match result {
                Ok(definition) => {
                    app.definition = Some(definition);
                    app.status_message.clear();
                }
                Err(msg) => {
                    app.definition = None;
                    app.status_message.clear();
                    app.error = Some(format!("Could not get a definition: {msg}"));
                }
            }
            Effect::None
        }
        Action::MarkKnown => {
            if app.is_loading {
                return Effect::None;
            }
            match app.current_word.clone() {
                Some(word) => Effect::MarkKnown(word),
                None => Effect::None,
            }
        }
        Action::MarkedKnown { word, lists } => {
            match lists {
                Some(lists) => {
                    info!("'{}' moved to known words", word);
                    app.lists = lists;
                    app.status_message = format!("'{word}' added to known words!");
                }
                None => debug!("'{}' was not in the to-learn list", word),
            }
            app.error = None;
            app.clear_card();
            Effect::None
        }
        Action::SaveFailed(msg) => {
            warn!("Save failed: {}", msg);
            app.error = Some(format!("Could not save word lists: {msg}"));
            Effect::None
        }
        Action::Skip => {
            if app.is_loading || app.current_word.is_none() {
                return Effect::None;
            }
            app.clear_card();
            app.error = None;
            app.status_message = String::from("You'll see this word again later!");
            Effect::None
        }
        Action::Restart => {
            if app.lists.is_exhausted() {
                app.status_message = String::from("Restarting is not available yet.");
            }
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
