use findex_core::{Document, Error, Result};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use walkdir::WalkDir;

lazy_static! {
    static ref SEL_TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref SEL_SUMMARY: Selector = Selector::parse("summary").expect("valid selector");
    static ref SEL_TIME: Selector = Selector::parse("time").expect("valid selector");
    static ref SEL_BODY: Selector = Selector::parse("body").expect("valid selector");
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Text,
    Html,
}

/// Walks a directory tree and yields every `.txt` and `.html` file as a
/// [`Document`], lazily and in deterministic (file-name sorted) order.
/// Files that cannot be read come through as errors so the consumer can
/// skip them without stopping the walk.
pub fn collect_documents(root: impl AsRef<Path>) -> impl Iterator<Item = Result<Document>> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(%err, "skipping unreadable entry");
                    return None;
                }
            };
            if !entry.file_type().is_file() {
                return None;
            }
            let kind = match entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase())
            {
                Some(ext) if ext == "txt" => Kind::Text,
                Some(ext) if ext == "html" => Kind::Html,
                _ => return None,
            };
            Some(read_document(entry.path(), kind))
        })
}

fn read_document(path: &Path, kind: Kind) -> Result<Document> {
    let bytes = fs::read(path).map_err(|source| Error::DocumentRead {
        path: path.display().to_string(),
        source,
    })?;
    // Lossy decoding: undecodable bytes degrade to replacement characters
    // instead of failing the document.
    let text = String::from_utf8_lossy(&bytes);

    let mut doc = match kind {
        Kind::Text => Document { contents: text.into_owned(), ..Default::default() },
        Kind::Html => parse_html(&text),
    };
    doc.path = path.display().to_string();
    doc.filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    doc.last_modified = modified_timestamp(path);
    Ok(doc)
}

/// Title from `<title>`, summary from `<summary>`, date from the first
/// `<time>` tag's datetime attribute (falling back to its text). Documents
/// without these tags get empty strings, never missing fields.
fn parse_html(raw: &str) -> Document {
    let html = Html::parse_document(raw);
    let title = html
        .select(&SEL_TITLE)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    let summary = html
        .select(&SEL_SUMMARY)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_string())
        .unwrap_or_default();
    let date = html
        .select(&SEL_TIME)
        .next()
        .map(|node| match node.value().attr("datetime") {
            Some(datetime) => datetime.to_string(),
            None => node.text().collect::<String>().trim().to_string(),
        })
        .unwrap_or_default();
    let contents = html
        .select(&SEL_BODY)
        .next()
        .map(|node| node.text().collect::<String>())
        .unwrap_or_else(|| html.root_element().text().collect::<String>());

    Document { contents, title, summary, date, ..Default::default() }
}

fn modified_timestamp(path: &Path) -> String {
    fs::metadata(path)
        .ok()
        .and_then(|meta| meta.modified().ok())
        .map(OffsetDateTime::from)
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_default()
}
