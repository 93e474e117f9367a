//! # Word Store
//!
//! Durable home for the two word lists: words still to learn and words the
//! user already knows. Each list lives in its own JSON file:
//!
//! ```text
//! { "words": ["serendipity", "ephemeral"] }
//! ```
//!
//! Loading never fails. A missing or unreadable file means the whole store
//! starts over from [`FALLBACK_WORDS`]. Saving always rewrites both files
//! (both staged as `.tmp`, then renamed into place).

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Words offered when no saved lists can be read.
pub const FALLBACK_WORDS: [&str; 3] = ["word", "example", "test"];

pub const TO_LEARN_FILE: &str = "to_learn.json";
pub const KNOWN_FILE: &str = "known.json";

/// On-disk shape of a word file.
#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
struct WordFile {
    #[serde(alias = "kelimeler")]
    words: Vec<String>,
}

/// The pair of word collections.
///
/// A word is in at most one of the lists as long as every move goes through
/// [`WordLists::mark_known`]. Nothing checks this on load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordLists {
    pub to_learn: Vec<String>,
    pub known: Vec<String>,
}

impl WordLists {
    pub fn new(to_learn: Vec<String>, known: Vec<String>) -> Self {
        Self { to_learn, known }
    }

    /// The starting deck used when nothing is on disk.
    pub fn fallback() -> Self {
        Self {
            to_learn: FALLBACK_WORDS.iter().map(|w| w.to_string()).collect(),
            known: Vec::new(),
        }
    }

    /// Moves the first occurrence of `word` from `to_learn` to the end of `known`.
    ///
    /// Returns `false` and leaves both lists alone if `word` is not in `to_learn`.
    pub fn mark_known(&mut self, word: &str) -> bool {
        match self.to_learn.iter().position(|w| w == word) {
            Some(idx) => {
                let moved = self.to_learn.remove(idx);
                self.known.push(moved);
                true
            }
            None => false,
        }
    }

    /// Non-mutating form of [`mark_known`](Self::mark_known): `None` when it would be a no-op.
    pub fn with_known(&self, word: &str) -> Option<WordLists> {
        let mut next = self.clone();
        next.mark_known(word).then_some(next)
    }

    pub fn is_exhausted(&self) -> bool {
        self.to_learn.is_empty()
    }
}

/// Picks a word uniformly at random. `None` for an empty list.
pub fn pick_random<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> Option<String> {
    words.choose(rng).cloned()
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Serialize(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "could not write {}: {source}", path.display())
            }
            StoreError::Serialize(e) => write!(f, "could not serialize word list: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Serialize(e) => Some(e),
        }
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Debug, Clone)]
pub struct WordStore {
    to_learn_path: PathBuf,
    known_path: PathBuf,
}

impl WordStore {
    pub fn new(to_learn_path: impl Into<PathBuf>, known_path: impl Into<PathBuf>) -> Self {
        Self {
            to_learn_path: to_learn_path.into(),
            known_path: known_path.into(),
        }
    }

    /// Store with both files under `dir`, using the default file names.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(TO_LEARN_FILE), dir.join(KNOWN_FILE))
    }

    pub fn to_learn_path(&self) -> &Path {
        &self.to_learn_path
    }

    pub fn known_path(&self) -> &Path {
        &self.known_path
    }

    /// Reads both lists. Falls back to [`WordLists::fallback`] if either file
    /// is missing or cannot be parsed.
    pub fn load(&self) -> WordLists {
        match (
            read_word_file(&self.to_learn_path),
            read_word_file(&self.known_path),
        ) {
            (Some(to_learn), Some(known)) => {
                info!(
                    "Loaded word lists: {} to learn, {} known",
                    to_learn.len(),
                    known.len()
                );
                WordLists { to_learn, known }
            }
            _ => {
                info!("Word lists unavailable, starting from the default deck");
                WordLists::fallback()
            }
        }
    }

    /// Rewrites both files from scratch.
    ///
    /// Both files are staged as `.tmp` before either is renamed into place,
    /// and `known` is committed first. A failure part way through can leave
    /// a word on both lists on disk, never on neither.
    pub fn save(&self, lists: &WordLists) -> Result<(), StoreError> {
        let to_learn_tmp = stage_word_file(&self.to_learn_path, &lists.to_learn)?;
        let known_tmp = match stage_word_file(&self.known_path, &lists.known) {
            Ok(tmp) => tmp,
            Err(e) => {
                discard(&to_learn_tmp);
                return Err(e);
            }
        };
        if let Err(e) = commit(&known_tmp, &self.known_path) {
            discard(&known_tmp);
            discard(&to_learn_tmp);
            return Err(e);
        }
        if let Err(e) = commit(&to_learn_tmp, &self.to_learn_path) {
            discard(&to_learn_tmp);
            return Err(e);
        }
        debug!(
            "Saved word lists: {} to learn, {} known",
            lists.to_learn.len(),
            lists.known.len()
        );
        Ok(())
    }

    /// Moves `word` to the known list and persists the result.
    ///
    /// Returns `Ok(None)` without touching disk when `word` is not in
    /// `to_learn`. `lists` itself is never modified; on success the caller
    /// swaps in the returned pair.
    pub fn mark_known(
        &self,
        lists: &WordLists,
        word: &str,
    ) -> Result<Option<WordLists>, StoreError> {
        let Some(next) = lists.with_known(word) else {
            debug!("mark_known: '{}' not in to-learn list, nothing to save", word);
            return Ok(None);
        };
        self.save(&next)?;
        Ok(Some(next))
    }
}

fn read_word_file(path: &Path) -> Option<Vec<String>> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Word file not found: {}", path.display());
            return None;
        }
        Err(e) => {
            warn!("Failed to read word file {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str::<WordFile>(&contents) {
        Ok(file) => Some(file.words),
        Err(e) => {
            warn!("Malformed word file {}: {}", path.display(), e);
            None
        }
    }
}

/// Writes a word list as pretty JSON next to `path` and returns the `.tmp` path.
fn stage_word_file(path: &Path, words: &[String]) -> Result<PathBuf, StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let file = WordFile {
        words: words.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(StoreError::Serialize)?;
    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);
    fs::write(&tmp_path, json).map_err(io_err)?;
    Ok(tmp_path)
}

fn commit(tmp_path: &Path, path: &Path) -> Result<(), StoreError> {
    fs::rename(tmp_path, path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn discard(tmp_path: &Path) {
    if let Err(e) = fs::remove_file(tmp_path) {
        warn!("Failed to remove {}: {}", tmp_path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_mark_known_moves_word() {
        let mut lists = WordLists::new(words(&["word", "example", "test"]), vec![]);
        assert!(lists.mark_known("example"));
        assert_eq!(lists.to_learn, words(&["word", "test"]));
        assert_eq!(lists.known, words(&["example"]));
    }

    #[test]
    fn test_mark_known_preserves_total_for_every_word() {
        let original = WordLists::new(words(&["a", "b", "c", "d"]), words(&["z"]));
        for w in &original.to_learn {
            let next = original.with_known(w).unwrap();
            assert!(!next.to_learn.contains(w));
            assert!(next.known.contains(w));
            assert_eq!(
                next.to_learn.len() + next.known.len(),
                original.to_learn.len() + original.known.len()
            );
        }
    }

    #[test]
    fn test_mark_known_absent_word_is_noop() {
        let mut lists = WordLists::new(words(&["a", "b"]), words(&["c"]));
        let before = lists.clone();
        assert!(!lists.mark_known("c"));
        assert!(!lists.mark_known("nope"));
        assert_eq!(lists, before);
        assert!(before.with_known("nope").is_none());
    }

    #[test]
    fn test_mark_known_removes_only_first_duplicate() {
        let mut lists = WordLists::new(words(&["a", "b", "a"]), vec![]);
        assert!(lists.mark_known("a"));
        assert_eq!(lists.to_learn, words(&["b", "a"]));
        assert_eq!(lists.known, words(&["a"]));
    }

    #[test]
    fn test_mark_known_appends_to_end() {
        let mut lists = WordLists::new(words(&["new"]), words(&["old1", "old2"]));
        lists.mark_known("new");
        assert_eq!(lists.known, words(&["old1", "old2", "new"]));
    }

    #[test]
    fn test_pick_random_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(pick_random(&[], &mut rng), None);
    }

    #[test]
    fn test_pick_random_returns_member() {
        let list = words(&["x", "y", "z"]);
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let picked = pick_random(&list, &mut rng).unwrap();
            assert!(list.contains(&picked));
        }
    }

    #[test]
    fn test_pick_random_is_not_constant() {
        let list = words(&["x", "y"]);
        let mut rng = rand::thread_rng();
        let seen: HashSet<String> = (0..200)
            .filter_map(|_| pick_random(&list, &mut rng))
            .collect();
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_word_file_accepts_legacy_key() {
        let file: WordFile = serde_json::from_str(r#"{"kelimeler": ["a", "b"]}"#).unwrap();
        assert_eq!(file.words, words(&["a", "b"]));
    }

    #[test]
    fn test_word_file_pretty_format() {
        let file = WordFile {
            words: words(&["a"]),
        };
        let json = serde_json::to_string_pretty(&file).unwrap();
        assert_eq!(json, "{\n  \"words\": [\n    \"a\"\n  ]\n}");
    }

    #[test]
    fn test_fallback_deck() {
        let lists = WordLists::fallback();
        assert_eq!(lists.to_learn, words(&["word", "example", "test"]));
        assert!(lists.known.is_empty());
        assert!(!lists.is_exhausted());
    }
}
