//! Dictionary used to validate formed words.
//!
//! Words are stored uppercase and matched case-insensitively. A lexicon starts
//! unloaded; querying it in that state is a configuration fault, not a "no".

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("dictionary queried before it was loaded")]
    NotLoaded,

    #[error("failed to read dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Word membership oracle
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: Option<HashSet<String>>,
}

impl Lexicon {
    /// An unloaded lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// A loaded lexicon built from a list of words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::new();
        lexicon.replace_words(words);
        lexicon
    }

    /// Load a newline-delimited word list, replacing any previous list.
    ///
    /// Blank lines, `#` comments and entries with non-alphabetic characters
    /// are skipped. Returns the number of words loaded.
    pub fn load_from_str(&mut self, text: &str) -> usize {
        self.replace_words(text.lines())
    }

    /// Load a word list file, replacing any previous list
    pub fn load_from_path(&mut self, path: impl AsRef<Path>) -> Result<usize, LexiconError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let count = self.load_from_str(&text);
        info!(path = %path.display(), words = count, "Dictionary loaded");
        Ok(count)
    }

    /// Case-insensitive membership test
    pub fn is_valid(&self, word: &str) -> Result<bool, LexiconError> {
        let words = self.words.as_ref().ok_or(LexiconError::NotLoaded)?;
        Ok(words.contains(&word.to_ascii_uppercase()))
    }

    pub fn is_loaded(&self) -> bool {
        self.words.is_some()
    }

    /// Number of loaded words (0 when unloaded)
    pub fn len(&self) -> usize {
        self.words.as_ref().map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate loaded words, uppercase, in no particular order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().flatten().map(String::as_str)
    }

    fn replace_words<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: HashSet<String> = words
            .into_iter()
            .filter_map(|w| normalize(w.as_ref()))
            .collect();
        let count = set.len();
        self.words = Some(set);
        count
    }
}

fn normalize(line: &str) -> Option<String> {
    let word = line.trim();
    if word.is_empty() || word.starts_with('#') {
        return None;
    }
    word.chars()
        .all(|c| c.is_ascii_alphabetic())
        .then(|| word.to_ascii_uppercase())
}
