use std::fs;
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::Builder;

use crate::domain::BirdRecord;
use crate::error::BirdError;

const TAXA_CSV: &str = "data/ebird-ws1.1-taxa.csv";
const RECORD_CACHE: &str = "cache/birds.json";
const PREFERENCES: &str = "preferences.json";

#[derive(Debug, Clone)]
pub struct Store {
    root: Utf8PathBuf,
}

impl Store {
    pub fn new() -> Result<Self, BirdError> {
        let cwd = std::env::current_dir().map_err(|err| BirdError::Filesystem(err.to_string()))?;
        let root = Utf8PathBuf::from_path_buf(cwd)
            .map_err(|_| BirdError::Filesystem("invalid plugin root path".to_string()))?;
        Ok(Self { root })
    }

    pub fn new_with_root(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn taxa_csv_path(&self) -> Utf8PathBuf {
        self.root.join(TAXA_CSV)
    }

    pub fn record_cache_path(&self) -> Utf8PathBuf {
        self.root.join(RECORD_CACHE)
    }

    pub fn preferences_path(&self) -> Utf8PathBuf {
        self.root.join(PREFERENCES)
    }

    pub fn exists(&self, path: &Utf8Path) -> bool {
        path.as_std_path().exists()
    }

    /// `Ok(None)` when the cache is absent, `CacheDecode` when it does not hold
    /// a record list.
    pub fn read_record_cache(&self) -> Result<Option<Vec<BirdRecord>>, BirdError> {
        let path = self.record_cache_path();
        let content = match fs::read(path.as_std_path()) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(BirdError::Filesystem(format!("read {path}: {err}")));
            }
        };
        let records = serde_json::from_slice(&content)
            .map_err(|err| BirdError::CacheDecode(err.to_string()))?;
        Ok(Some(records))
    }

    pub fn write_record_cache(&self, records: &[BirdRecord]) -> Result<(), BirdError> {
        let content =
            serde_json::to_vec(records).map_err(|err| BirdError::Filesystem(err.to_string()))?;
        Self::write_bytes_atomic(&self.record_cache_path(), &content)
    }

    pub fn read_taxa_csv(&self) -> Result<String, BirdError> {
        let path = self.taxa_csv_path();
        fs::read_to_string(path.as_std_path())
            .map_err(|err| BirdError::Filesystem(format!("read {path}: {err}")))
    }

    pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), BirdError> {
        let parent = path
            .parent()
            .ok_or_else(|| BirdError::Filesystem("invalid destination path".to_string()))?;
        fs::create_dir_all(parent.as_std_path())
            .map_err(|err| BirdError::Filesystem(err.to_string()))?;
        let mut temp = Builder::new()
            .prefix("birdref-file")
            .tempfile_in(parent.as_std_path())
            .map_err(|err| BirdError::Filesystem(err.to_string()))?;
        temp.write_all(content)
            .map_err(|err| BirdError::Filesystem(err.to_string()))?;
        temp.persist(path.as_std_path())
            .map_err(|err| BirdError::Filesystem(err.to_string()))?;
        Ok(())
    }
}
