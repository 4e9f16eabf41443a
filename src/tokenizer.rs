use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"[\w-]+").unwrap();
}

/// Splits free text into unique, lower-cased candidate dictionary words,
/// in first-occurrence order. Possessive suffixes are stripped, compound
/// words are split on `_`/`-`, and mixed-case words are camel-split.
pub fn tokenize(sentence: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while let Some(m) = WORD_RE.find_at(sentence, pos) {
        pos = m.end() + possessive_len(&sentence[m.end()..]);
        for part in split_word(m.as_str()) {
            let token = part.to_lowercase();
            if token.is_empty() {
                continue;
            }
            if seen.insert(token.clone()) {
                tokens.push(token);
            }
        }
    }
    tokens
}

/// Length in bytes of a trailing possessive suffix (half- or full-width
/// apostrophe, optional `s`), counted only when a word boundary follows it.
fn possessive_len(rest: &str) -> usize {
    let mut chars = rest.chars();
    let apostrophe = match chars.next() {
        Some(c @ ('\'' | '\u{2019}')) => c.len_utf8(),
        _ => return 0,
    };
    let next = chars.next();
    if next == Some('s') {
        match chars.next() {
            // `'s` ran into more word characters, retry the bare apostrophe
            Some(c) if is_word_char(c) => {}
            _ => return apostrophe + 1,
        }
    }
    match next {
        Some(c) if is_word_char(c) => 0,
        _ => apostrophe,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn split_word(core: &str) -> Vec<&str> {
    if core.contains(['_', '-']) {
        core.split(['_', '-']).filter(|s| !s.is_empty()).collect()
    } else if core.chars().any(char::is_uppercase) {
        camel_split(core)
    } else {
        vec![core]
    }
}

/// Camel-case segmentation: digit runs, capitalized lower-case runs, and
/// acronym runs. The last letter of an acronym run starts the next word
/// when a lower-case letter follows, so `HTTPServerError` yields
/// `HTTP`, `Server`, `Error`.
fn camel_split(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let n = chars.len();
    let end_of = |j: usize| if j < n { chars[j].0 } else { word.len() };
    let mut parts = Vec::new();
    let mut i = 0;
    while i < n {
        let (start, c) = chars[i];
        if c.is_numeric() {
            let mut j = i + 1;
            while j < n && chars[j].1.is_numeric() {
                j += 1;
            }
            parts.push(&word[start..end_of(j)]);
            i = j;
        } else if c.is_uppercase() {
            let mut j = i + 1;
            while j < n && chars[j].1.is_uppercase() {
                j += 1;
            }
            if j < n && chars[j].1.is_lowercase() {
                if j - i > 1 {
                    parts.push(&word[start..chars[j - 1].0]);
                }
                let head = chars[j - 1].0;
                let mut k = j;
                while k < n && chars[k].1.is_lowercase() {
                    k += 1;
                }
                parts.push(&word[head..end_of(k)]);
                i = k;
            } else {
                parts.push(&word[start..end_of(j)]);
                i = j;
            }
        } else if c.is_lowercase() {
            let mut j = i + 1;
            while j < n && chars[j].1.is_lowercase() {
                j += 1;
            }
            parts.push(&word[start..end_of(j)]);
            i = j;
        } else {
            i += 1;
        }
    }
    parts
}
