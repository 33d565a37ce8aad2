use serde::{Deserialize, Serialize};
use std::fmt;

pub type DocId = u32;

/// The tokenized fields a document can be searched on. Path, filename and
/// modification time are stored verbatim and never tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Contents,
    Title,
    Summary,
    Date,
}

impl Field {
    pub const TOKENIZED: [Field; 4] = [Field::Contents, Field::Title, Field::Summary, Field::Date];

    /// Fields an unqualified query runs against.
    pub const DEFAULT_SEARCH: [Field; 3] = [Field::Contents, Field::Title, Field::Date];

    pub fn name(self) -> &'static str {
        match self {
            Field::Contents => "contents",
            Field::Title => "title",
            Field::Summary => "summary",
            Field::Date => "date",
        }
    }

    pub fn parse(name: &str) -> Option<Field> {
        match name {
            "contents" => Some(Field::Contents),
            "title" => Some(Field::Title),
            "summary" => Some(Field::Summary),
            "date" => Some(Field::Date),
            _ => None,
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A document as handed over by the collector. Fields a source does not
/// provide stay empty rather than absent, so every document answers every
/// field lookup.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub path: String,
    pub filename: String,
    pub last_modified: String,
    pub contents: String,
    pub title: String,
    pub summary: String,
    pub date: String,
}

impl Document {
    pub fn field_text(&self, field: Field) -> &str {
        match field {
            Field::Contents => &self.contents,
            Field::Title => &self.title,
            Field::Summary => &self.summary,
            Field::Date => &self.date,
        }
    }
}

/// What the index retains of a document for result display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDoc {
    pub path: String,
    pub filename: String,
    pub last_modified: String,
    pub title: String,
    pub summary: String,
}

impl From<&Document> for StoredDoc {
    fn from(doc: &Document) -> Self {
        StoredDoc {
            path: doc.path.clone(),
            filename: doc.filename.clone(),
            last_modified: doc.last_modified.clone(),
            title: doc.title.clone(),
            summary: doc.summary.clone(),
        }
    }
}
