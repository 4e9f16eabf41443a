use serde::Serialize;

use crate::exchange::{self, FORM_NAMES};
use crate::model::resolve_escapes;
use crate::store::{DictStore, StoreError};
use crate::tokenizer::tokenize;

/// One displayable result row, escapes resolved and exchange decoded.
#[derive(Debug, Clone, Serialize)]
pub struct RenderRow {
    pub id: i32,
    pub word: String,
    pub phonetic: String,
    pub translation: String,
    pub exchange: Vec<String>,
    pub ignored: bool,
}

#[derive(Debug, Default, Serialize)]
pub struct SearchOutcome {
    pub rows: Vec<RenderRow>,
    pub unknown: Vec<String>,
}

/// Composes tokenizer, store and exchange decoder into the lookup flow
/// the shell renders.
pub struct SearchEngine {
    store: DictStore,
}

impl SearchEngine {
    pub fn new(store: DictStore) -> Self {
        SearchEngine { store }
    }

    pub fn store(&self) -> &DictStore {
        &self.store
    }

    /// Tokenizes the sentence and partitions the tokens into dictionary
    /// hits and unknown words, both in first-occurrence order. An ignored
    /// entry is dropped from both lists unless `show_ignored` is set.
    pub fn search(&self, sentence: &str, show_ignored: bool) -> Result<SearchOutcome, StoreError> {
        let mut outcome = SearchOutcome::default();
        for token in tokenize(sentence) {
            match self.store.lookup(&token)? {
                None => outcome.unknown.push(token),
                Some(entry) => {
                    if entry.ignored && !show_ignored {
                        continue;
                    }
                    outcome.rows.push(RenderRow {
                        id: entry.id,
                        word: entry.word,
                        phonetic: entry.phonetic,
                        translation: resolve_escapes(&entry.translation),
                        exchange: exchange::decode_lines(&entry.exchange, &FORM_NAMES),
                        ignored: entry.ignored,
                    });
                }
            }
        }
        Ok(outcome)
    }

    /// Flips the persisted ignored flag and returns the new value. Two
    /// calls restore the original state.
    pub fn toggle_ignored(&self, id: i32) -> Result<bool, StoreError> {
        let entry = self
            .store
            .find_by_id(id)?
            .ok_or(StoreError::NotFound(id))?;
        let next = !entry.ignored;
        self.store.set_ignored(id, next)?;
        Ok(next)
    }
}
