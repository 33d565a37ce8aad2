pub mod analyzer;
pub mod document;
pub mod error;
pub mod index;
pub mod indexer;
pub mod persist;
pub mod query;

pub use analyzer::{Analyzer, Token};
pub use document::{DocId, Document, Field, StoredDoc};
pub use error::{Error, Result};
pub use index::{IndexStore, Posting};
pub use indexer::Indexer;
pub use query::{Hit, QueryEngine};
