use crate::error::{Error, Result};
use crate::index::IndexStore;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
}

/// Maps an index directory to the files inside it. The layout is private to
/// this crate; nothing promises compatibility with other index formats.
pub struct IndexPaths {
    pub root: PathBuf,
}

impl IndexPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn index(&self) -> PathBuf {
        self.root.join("index.bin")
    }
    fn meta(&self) -> PathBuf {
        self.root.join("meta.json")
    }
}

pub fn save_index(paths: &IndexPaths, store: &IndexStore) -> Result<()> {
    create_dir_all(&paths.root)?;

    let mut f = File::create(paths.index())?;
    let bytes = bincode::serialize(store)?;
    f.write_all(&bytes)?;

    let meta = MetaFile {
        num_docs: store.num_docs(),
        created_at: time::OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: FORMAT_VERSION,
    };
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(&meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_index(paths: &IndexPaths) -> Result<(IndexStore, MetaFile)> {
    let mut buf = String::new();
    File::open(paths.meta())?.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    if meta.version != FORMAT_VERSION {
        return Err(Error::VersionMismatch { found: meta.version, expected: FORMAT_VERSION });
    }

    let mut bytes = Vec::new();
    File::open(paths.index())?.read_to_end(&mut bytes)?;
    let store: IndexStore = bincode::deserialize(&bytes)?;
    Ok((store, meta))
}
