use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::entries;

#[derive(Debug, Clone, Queryable, Selectable, Serialize)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DictionaryEntry {
    pub id: i32,
    pub word: String,
    pub phonetic: String,
    pub translation: String,
    pub exchange: String,
    pub definition: String,
    pub ignored: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = entries)]
pub struct NewEntry<'a> {
    pub word: &'a str,
    pub phonetic: &'a str,
    pub translation: &'a str,
    pub exchange: &'a str,
    pub definition: &'a str,
}

/// One row of the tabular import source, escape sequences kept verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportRecord {
    pub word: String,
    pub phonetic: String,
    pub translation: String,
    pub exchange: String,
    pub definition: String,
}

/// Text fields store line breaks as the literal two-character sequences
/// `\n` and `\r`; they are resolved only when a field is rendered.
pub fn resolve_escapes(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\r", "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_resolve_at_render_time() {
        assert_eq!(resolve_escapes("n. cat\\nv. to cat"), "n. cat\nv. to cat");
        assert_eq!(resolve_escapes("line\\r\\nnext"), "line\nnext");
        assert_eq!(resolve_escapes("plain"), "plain");
    }
}
