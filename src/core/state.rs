//! # Application State
//!
//! Core session state for wordcards. Domain data only, no TUI types.
//!
//! ```text
//! App
//! ├── lookup: DefinitionLookup            // provider + model + prompt languages
//! ├── lists: WordLists                    // to-learn / known
//! ├── current_word: Option<String>        // card on screen
//! ├── definition: Option<DefinitionResult> // revealed meaning for current_word
//! ├── status_message: String              // status bar text
//! ├── error: Option<String>               // last surfaced failure
//! └── is_loading: bool                    // lookup in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs,
//! plus [`App::refill_current_word`], which the adapter calls before drawing.

use log::debug;
use rand::Rng;

use crate::core::lookup::{DefinitionLookup, DefinitionResult};
use crate::core::store::{WordLists, pick_random};

pub struct App {
    pub lookup: DefinitionLookup,
    pub lists: WordLists,
    pub current_word: Option<String>,
    pub definition: Option<DefinitionResult>,
    pub status_message: String,
    pub error: Option<String>,
    pub is_loading: bool,
}

impl App {
    pub fn new(lookup: DefinitionLookup, lists: WordLists) -> Self {
        Self {
            lookup,
            lists,
            current_word: None,
            definition: None,
            status_message: String::from("Welcome to wordcards!"),
            error: None,
            is_loading: false,
        }
    }

    pub fn model_name(&self) -> &str {
        self.lookup.model()
    }

    /// Draws a new card if none is showing and words remain.
    ///
    /// Returns the word now on screen, if any.
    pub fn refill_current_word<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&str> {
        if self.current_word.is_none()
            && let Some(word) = pick_random(&self.lists.to_learn, rng)
        {
            debug!("New card: {}", word);
            self.current_word = Some(word);
        }
        self.current_word.as_deref()
    }

    /// Drops the current card and anything revealed for it.
    pub fn clear_card(&mut self) {
        self.current_word = None;
        self.definition = None;
    }
}
