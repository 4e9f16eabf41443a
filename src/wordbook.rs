use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;
use thiserror::Error;

pub const EXPORT_HEADER: [&str; 4] = ["word", "phonetic", "translation", "form"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("wordbook is empty")]
    Empty,
    #[error("cannot write export file: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordbookEntry {
    pub word: String,
    pub phonetic: String,
    pub translation: String,
    pub form: String,
}

/// Insertion-ordered collection of saved words, keyed by headword. The
/// shell keeps one per session; the store is not involved.
#[derive(Debug, Default)]
pub struct Wordbook {
    entries: Vec<WordbookEntry>,
}

impl Wordbook {
    pub fn new() -> Self {
        Wordbook::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.entries.iter().any(|e| e.word == word)
    }

    /// Adds the entry, or removes the existing one with the same word.
    /// Returns true when the word is present afterwards.
    pub fn toggle(&mut self, entry: WordbookEntry) -> bool {
        if let Some(pos) = self.entries.iter().position(|e| e.word == entry.word) {
            self.entries.remove(pos);
            false
        } else {
            self.entries.push(entry);
            true
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[WordbookEntry] {
        &self.entries
    }
}

/// Writes the wordbook as CSV with a fixed header, preceded by a UTF-8
/// byte-order mark so spreadsheet tools pick the right encoding.
pub fn export_csv<W: Write>(entries: &[WordbookEntry], mut writer: W) -> Result<(), ExportError> {
    if entries.is_empty() {
        return Err(ExportError::Empty);
    }
    writer.write_all(b"\xef\xbb\xbf")?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(EXPORT_HEADER)?;
    for entry in entries {
        csv_writer.write_record([
            &entry.word,
            &entry.phonetic,
            &entry.translation,
            &entry.form,
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn export_to_path(entries: &[WordbookEntry], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    export_csv(entries, file)
}

/// Default export location, named after the moment of export.
pub fn timestamped_path(dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    dir.join(format!("wordbook-{stamp}.csv"))
}
