//! Output files: `{slug}_{YYYYMMDD_HHMMSS}.html` under the output directory.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

pub const FALLBACK_SLUG: &str = "recipe";
const MAX_NAME_ATTEMPTS: u32 = 100;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub trait RecipeStore: Send + Sync {
    /// Persists the page and returns the path it was written to.
    fn save(&self, html: &str, keyword: &str) -> Result<PathBuf, StorageError>;
}

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Writes to a temp file in the target directory, then links it into
    /// place without replacing anything already there. A taken name gets a
    /// `_2`, `_3`, ... suffix.
    pub fn save_at(
        &self,
        html: &str,
        keyword: &str,
        now: NaiveDateTime,
    ) -> Result<PathBuf, StorageError> {
        let mut temp =
            NamedTempFile::new_in(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        if let Err(e) = temp.write_all(html.as_bytes()).and_then(|_| temp.flush()) {
            return Err(StorageError::io(temp.path(), e));
        }

        let base = recipe_file_stem(keyword, now);
        let mut attempt = 1;
        loop {
            let name = if attempt == 1 {
                format!("{base}.html")
            } else {
                format!("{base}_{attempt}.html")
            };
            let path = self.dir.join(name);

            match temp.persist_noclobber(&path) {
                Ok(_) => {
                    info!("Saved recipe to {}", path.display());
                    return Ok(path);
                }
                Err(e)
                    if e.error.kind() == io::ErrorKind::AlreadyExists
                        && attempt < MAX_NAME_ATTEMPTS =>
                {
                    temp = e.file;
                    attempt += 1;
                }
                Err(e) => return Err(StorageError::io(&path, e.error)),
            }
        }
    }
}

impl RecipeStore for FileStore {
    fn save(&self, html: &str, keyword: &str) -> Result<PathBuf, StorageError> {
        self.save_at(html, keyword, Local::now().naive_local())
    }
}

/// ASCII letters, digits and whitespace survive; whitespace runs become a
/// single `_`; the result is lowercased.
pub fn slugify(keyword: &str) -> String {
    let kept: String = keyword
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let slug = kept.split_whitespace().collect::<Vec<_>>().join("_").to_lowercase();
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

fn recipe_file_stem(keyword: &str, now: NaiveDateTime) -> String {
    format!("{}_{}", slugify(keyword), now.format("%Y%m%d_%H%M%S"))
}

pub fn recipe_filename(keyword: &str, now: NaiveDateTime) -> String {
    format!("{}.html", recipe_file_stem(keyword, now))
}
